//! Extension message protocol
//!
//! Messages are plain JSON objects tagged by `type`:
//!
//! | Message | Direction | Response |
//! |---|---|---|
//! | `{"type":"GET_STATE"}` | popup/page → hub | `{enabled, intensity}` |
//! | `{"type":"UPDATE_STATE","state":{..}}` | popup → hub | `{"success":true}` |
//! | `{"type":"STATE_CHANGED","state":{..}}` | hub → tabs | none |

use crate::types::Settings;
use serde::{Deserialize, Serialize};

/// A message on the extension bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Ask the hub for the current settings
    GetState,

    /// Replace the persisted settings
    UpdateState { state: Settings },

    /// Hub notification that settings changed
    StateChanged { state: Settings },
}

impl Message {
    /// Wire name of the message type
    pub fn kind(&self) -> &'static str {
        match self {
            Message::GetState => "GET_STATE",
            Message::UpdateState { .. } => "UPDATE_STATE",
            Message::StateChanged { .. } => "STATE_CHANGED",
        }
    }
}

/// Acknowledgement sent once an update is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAck {
    pub success: bool,
}

impl UpdateAck {
    /// Successful acknowledgement
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Hub response to a request
///
/// Untagged on the wire. `Ack` is listed first: `Settings` accepts any object
/// (all its fields default), so it has to be the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    /// Reply to `UPDATE_STATE`
    Ack(UpdateAck),

    /// Reply to `GET_STATE`
    State(Settings),
}
