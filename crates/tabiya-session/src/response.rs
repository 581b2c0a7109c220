//! JSON response envelope written for every protocol command.

use serde::Serialize;

use crate::snapshot::{LegalMove, Snapshot};

/// One line of protocol output: `{"ok": true, ...}` or `{"ok": false, "error": "..."}`.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub ok: bool,
    #[serde(flatten)]
    pub payload: Payload,
}

/// Command-specific response fields.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Payload {
    State {
        state: Snapshot,
        #[serde(skip_serializing_if = "Option::is_none")]
        diagram: Option<String>,
    },
    Fen {
        fen: String,
    },
    Moves {
        square: String,
        moves: Vec<LegalMove>,
    },
    Promotion {
        promotion: bool,
    },
    History {
        history: Vec<String>,
    },
    Board {
        diagram: String,
    },
    Perft {
        depth: usize,
        nodes: u64,
        divide: Vec<PerftEntry>,
    },
    Config {
        pretty: bool,
        board: bool,
    },
    Error {
        error: String,
    },
    Ack {},
}

/// Node count below one root move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerftEntry {
    #[serde(rename = "move")]
    pub mv: String,
    pub nodes: u64,
}

impl Response {
    pub fn ok(payload: Payload) -> Response {
        Response { ok: true, payload }
    }

    pub fn error(message: impl ToString) -> Response {
        Response {
            ok: false,
            payload: Payload::Error {
                error: message.to_string(),
            },
        }
    }
}
