//! Wire protocol between the board and the simulation engine.
//!
//! The field names and casing are the compatibility contract, as is the
//! shape asymmetry: the outbound set message wraps the matrix in a `World`
//! object with `Cells`/`Width`/`Height`, while the inbound update carries
//! the raw matrix under `World` directly.

use serde::{Deserialize, Serialize};

use crate::error::LifegridError;
use crate::grid::Grid;

/// Sent once, immediately after connecting: the full local grid snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct SetMessage {
    #[serde(rename = "Command")]
    pub command: &'static str,
    #[serde(rename = "World")]
    pub world: WorldSnapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshot {
    #[serde(rename = "Cells")]
    pub cells: Vec<Vec<bool>>,
    #[serde(rename = "Width")]
    pub width: usize,
    #[serde(rename = "Height")]
    pub height: usize,
}

impl SetMessage {
    pub fn from_grid(grid: &Grid) -> Self {
        Self {
            command: "set",
            world: WorldSnapshot {
                cells: grid.cells().to_vec(),
                width: grid.width(),
                height: grid.height(),
            },
        }
    }

    pub fn to_json(&self) -> Result<String, LifegridError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Body of an inbound `update` message: one full computed generation plus
/// the engine's monotonic send counter.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBody {
    #[serde(rename = "World")]
    pub world: Vec<Vec<bool>>,
    #[serde(rename = "SendCount")]
    pub send_count: u64,
}

/// Envelope used to route on the command before decoding the full body.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Command")]
    command: String,
}

/// A decoded engine message. Commands we do not handle are kept as
/// [`EngineMessage::Other`] so future engine commands stay a no-op.
#[derive(Debug, Clone)]
pub enum EngineMessage {
    Update(UpdateBody),
    Other(String),
}

impl EngineMessage {
    /// Two-phase decode: route on the envelope's command, then decode the
    /// body for the commands we understand.
    pub fn parse(text: &str) -> Result<Self, LifegridError> {
        let envelope: Envelope = serde_json::from_str(text)?;

        match envelope.command.as_str() {
            "update" => Ok(EngineMessage::Update(serde_json::from_str(text)?)),
            _ => Ok(EngineMessage::Other(envelope.command)),
        }
    }
}
