// Turns transport frames into snapshots and intents into transport frames.
// No game logic lives here.

use serde::de::IgnoredAny;
use thiserror::Error;

use crate::api::{Intent, Login, Snapshot};
use crate::types::PLAYER_COUNT;

// Key under which the chosen payload travels back to the server.
pub const ENVELOPE_KEY: &str = "action";

#[derive(Debug, Error)]
pub enum DecodeError {
    // The frame isn't JSON at all.
    #[error("malformed frame: {0}")]
    MalformedFrame(#[source] serde_json::Error),

    // The frame is JSON, but not a snapshot we understand.
    #[error("unknown snapshot shape: {0}")]
    UnknownShape(String),
}

pub fn decode(frame: &[u8]) -> Result<Snapshot, DecodeError> {
    // Check well-formedness separately so that shape problems found early in
    // the frame aren't reported for frames that are broken later on.
    serde_json::from_slice::<IgnoredAny>(frame).map_err(DecodeError::MalformedFrame)?;

    let snapshot: Snapshot =
        serde_json::from_slice(frame).map_err(|e| DecodeError::UnknownShape(e.to_string()))?;

    if snapshot.trick.cards.len() > PLAYER_COUNT {
        return Err(DecodeError::UnknownShape(format!(
            "current trick holds {} cards",
            snapshot.trick.cards.len()
        )));
    }

    if let Some(prev_trick) = &snapshot.prev_trick {
        if prev_trick.cards.len() > PLAYER_COUNT {
            return Err(DecodeError::UnknownShape(format!(
                "previous trick holds {} cards",
                prev_trick.cards.len()
            )));
        }
    }

    if snapshot.names.len() != PLAYER_COUNT {
        return Err(DecodeError::UnknownShape(format!(
            "expected {} names, got {}",
            PLAYER_COUNT,
            snapshot.names.len()
        )));
    }

    Ok(snapshot)
}

// Cannot fail: the payload is already valid JSON and is spliced in verbatim.
pub fn encode(intent: &Intent) -> String {
    format!("{{\"{}\":{}}}", ENVELOPE_KEY, intent.payload.as_json())
}

pub fn encode_login(login: &Login) -> Result<String, serde_json::Error> {
    serde_json::to_string(login)
}
