//! Line-oriented shell hosting one game session.

use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use tabiya_core::perft::{divide, perft};

use crate::command::{Command, ShellOption, parse_command};
use crate::error::SessionError;
use crate::game::Game;
use crate::response::{Payload, PerftEntry, Response};

/// Configuration knobs adjustable via `set`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShellConfig {
    /// Write indented JSON instead of one object per line.
    pub pretty_json: bool,
    /// Attach a text diagram to state and move responses.
    pub show_board: bool,
}

/// The protocol shell, holding the session and its configuration.
///
/// Reads one command per line and answers each with a JSON response.
pub struct Shell {
    game: Game,
    config: ShellConfig,
}

impl Shell {
    /// Create a shell with a new game and default configuration.
    pub fn new() -> Self {
        Self::with_config(ShellConfig::default())
    }

    /// Create a shell with a new game and the given configuration.
    pub fn with_config(config: ShellConfig) -> Self {
        Self {
            game: Game::new(),
            config,
        }
    }

    /// The session driven by this shell.
    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn config(&self) -> ShellConfig {
        self.config
    }

    /// Run the command loop until `quit` or end of input.
    ///
    /// A line that is not valid UTF-8 is answered with an error response.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        mut output: W,
    ) -> Result<(), SessionError> {
        info!("tabiya shell started");

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line.trim(),
                Err(e) => {
                    let e = SessionError::from(e);
                    warn!(error = %e, "undecodable input line");
                    self.write_response(&mut output, &Response::error(e))?;
                    continue;
                }
            };
            if line.is_empty() {
                continue;
            }
            debug!(cmd = %line, "received command");

            let (response, quit) = match parse_command(line) {
                Ok(Command::Quit) => (Response::ok(Payload::Ack {}), true),
                Ok(cmd) => (self.execute(cmd), false),
                Err(e) => {
                    warn!(error = %e, "command parse error");
                    (Response::error(e), false)
                }
            };

            self.write_response(&mut output, &response)?;
            if quit {
                break;
            }
        }

        info!("tabiya shell shutting down");
        Ok(())
    }

    /// Execute one parsed command, turning failures into error responses.
    pub fn execute(&mut self, cmd: Command) -> Response {
        match self.dispatch(cmd) {
            Ok(payload) => Response::ok(payload),
            Err(e) => Response::error(e),
        }
    }

    fn dispatch(&mut self, cmd: Command) -> Result<Payload, SessionError> {
        match cmd {
            Command::New | Command::Reset => {
                self.game.reset();
                Ok(self.state_payload())
            }
            Command::Fen(fen) => {
                self.game.load_fen(&fen)?;
                Ok(self.state_payload())
            }
            Command::GetFen => Ok(Payload::Fen {
                fen: self.game.to_fen(),
            }),
            Command::State => Ok(self.state_payload()),
            Command::Moves(square) => Ok(Payload::Moves {
                square: square.to_string(),
                moves: self.game.legal_moves(square),
            }),
            Command::Move(mv) => {
                self.game.play(mv)?;
                Ok(self.state_payload())
            }
            Command::Promo { from, to } => Ok(Payload::Promotion {
                promotion: self.game.is_promotion_move(from, to),
            }),
            Command::History => Ok(Payload::History {
                history: self.game.history_uci(),
            }),
            Command::Board => Ok(Payload::Board {
                diagram: self.diagram(),
            }),
            Command::Perft(depth) => Ok(self.handle_perft(depth)),
            Command::Set(option) => {
                self.handle_set(option);
                Ok(Payload::Config {
                    pretty: self.config.pretty_json,
                    board: self.config.show_board,
                })
            }
            Command::Quit => Ok(Payload::Ack {}),
        }
    }

    fn handle_perft(&self, depth: usize) -> Payload {
        let state = self.game.game_state();
        let entries: Vec<PerftEntry> = if depth == 0 {
            Vec::new()
        } else {
            divide(state, depth)
                .into_iter()
                .map(|(mv, nodes)| PerftEntry { mv, nodes })
                .collect()
        };
        let nodes = if depth == 0 {
            perft(state, 0)
        } else {
            entries.iter().map(|entry| entry.nodes).sum()
        };
        debug!(depth, nodes, "perft finished");
        Payload::Perft {
            depth,
            nodes,
            divide: entries,
        }
    }

    fn handle_set(&mut self, option: ShellOption) {
        match option {
            ShellOption::Pretty(on) => self.config.pretty_json = on,
            ShellOption::Board(on) => self.config.show_board = on,
        }
        debug!(config = ?self.config, "configuration changed");
    }

    fn state_payload(&self) -> Payload {
        Payload::State {
            state: self.game.state(),
            diagram: self.config.show_board.then(|| self.diagram()),
        }
    }

    fn diagram(&self) -> String {
        self.game.game_state().board().pretty().to_string()
    }

    fn write_response<W: Write>(&self, output: &mut W, response: &Response) -> Result<(), SessionError> {
        let text = if self.config.pretty_json {
            serde_json::to_string_pretty(response)?
        } else {
            serde_json::to_string(response)?
        };
        writeln!(output, "{text}")?;
        output.flush()?;
        Ok(())
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}
