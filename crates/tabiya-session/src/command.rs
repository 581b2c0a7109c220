//! Line protocol command parsing.

use tabiya_core::{Move, PieceKind, Square};

use crate::error::SessionError;

/// Deepest perft the shell will run.
pub const MAX_PERFT_DEPTH: usize = 6;

/// A shell option adjustable via `set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellOption {
    /// Pretty-print JSON responses.
    Pretty(bool),
    /// Attach a text diagram of the board to state responses.
    Board(bool),
}

/// A parsed protocol command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `new` -- start a new game.
    New,
    /// `fen <six fields>` -- load a position.
    Fen(String),
    /// `getfen` -- print the current FEN.
    GetFen,
    /// `state` -- print the full snapshot.
    State,
    /// `moves <square>` -- list legal destinations of a piece.
    Moves(Square),
    /// `move <uci>` -- play a move.
    Move(Move),
    /// `promo <from> <to>` -- ask whether a move needs a promotion piece.
    Promo {
        /// Source square.
        from: Square,
        /// Destination square.
        to: Square,
    },
    /// `history` -- list the moves played.
    History,
    /// `board` -- print a text diagram.
    Board,
    /// `perft <depth>` -- count leaf nodes of the legal move tree.
    Perft(usize),
    /// `set <option> <on|off>` -- adjust the shell configuration.
    Set(ShellOption),
    /// `reset` -- return to the starting position.
    Reset,
    /// `quit` -- leave the shell.
    Quit,
}

/// Parse a single line of protocol input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, SessionError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&name, args)) = tokens.split_first() else {
        return Err(SessionError::MalformedCommand {
            command: String::new(),
        });
    };

    match name {
        "new" => Ok(Command::New),
        "getfen" => Ok(Command::GetFen),
        "state" => Ok(Command::State),
        "history" => Ok(Command::History),
        "board" => Ok(Command::Board),
        "reset" => Ok(Command::Reset),
        "quit" => Ok(Command::Quit),
        "fen" => parse_fen(args),
        "moves" => {
            let square = required(args, 0, "moves", "square")?;
            Ok(Command::Moves(parse_square(square)?))
        }
        "move" => {
            let uci = required(args, 0, "move", "move")?;
            Ok(Command::Move(parse_move(uci)?))
        }
        "promo" => {
            let from = parse_square(required(args, 0, "promo", "source square")?)?;
            let to = parse_square(required(args, 1, "promo", "destination square")?)?;
            Ok(Command::Promo { from, to })
        }
        "perft" => parse_perft(args),
        "set" => parse_set(args),
        other => Err(SessionError::MalformedCommand {
            command: other.to_string(),
        }),
    }
}

fn required<'a>(
    args: &[&'a str],
    index: usize,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, SessionError> {
    args.get(index)
        .copied()
        .ok_or(SessionError::MissingArgument { command, argument })
}

/// The FEN fields are passed through; validation happens when loading.
fn parse_fen(args: &[&str]) -> Result<Command, SessionError> {
    if args.is_empty() {
        return Err(SessionError::MissingArgument {
            command: "fen",
            argument: "position",
        });
    }
    Ok(Command::Fen(args.join(" ")))
}

fn parse_square(text: &str) -> Result<Square, SessionError> {
    Square::from_algebraic(text).ok_or_else(|| SessionError::InvalidSquare {
        square: text.to_string(),
    })
}

/// Parse UCI move text, telling a bad promotion suffix apart from a bad move.
fn parse_move(text: &str) -> Result<Move, SessionError> {
    if let Some(mv) = Move::from_uci(text) {
        return Ok(mv);
    }

    if text.len() == 5 && text.is_ascii() {
        let (squares, suffix) = text.split_at(4);
        if Move::from_uci(squares).is_some()
            && PieceKind::from_promotion_name(suffix).is_none()
        {
            return Err(SessionError::InvalidPromotion {
                piece: suffix.to_string(),
            });
        }
    }

    Err(SessionError::InvalidMove {
        uci_move: text.to_string(),
    })
}

fn parse_perft(args: &[&str]) -> Result<Command, SessionError> {
    let value = required(args, 0, "perft", "depth")?;
    match value.parse::<usize>() {
        Ok(depth) if depth <= MAX_PERFT_DEPTH => Ok(Command::Perft(depth)),
        _ => Err(SessionError::InvalidDepth {
            value: value.to_string(),
        }),
    }
}

fn parse_set(args: &[&str]) -> Result<Command, SessionError> {
    let name = required(args, 0, "set", "option")?;
    let value = required(args, 1, "set", "value")?;

    let enabled = match value {
        "on" | "true" => true,
        "off" | "false" => false,
        other => {
            return Err(SessionError::InvalidOption {
                option: format!("{name} {other}"),
            });
        }
    };

    match name {
        "pretty" => Ok(Command::Set(ShellOption::Pretty(enabled))),
        "board" => Ok(Command::Set(ShellOption::Board(enabled))),
        other => Err(SessionError::InvalidOption {
            option: other.to_string(),
        }),
    }
}
