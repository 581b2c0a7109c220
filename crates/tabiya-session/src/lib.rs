//! Game session over the tabiya rules engine, with its JSON snapshot
//! surface and a line protocol shell.

pub mod command;
pub mod error;
pub mod game;
pub mod response;
pub mod shell;
pub mod snapshot;

pub use command::{Command, ShellOption, parse_command};
pub use error::SessionError;
pub use game::Game;
pub use response::{Payload, PerftEntry, Response};
pub use shell::{Shell, ShellConfig};
pub use snapshot::{LegalMove, Snapshot};
