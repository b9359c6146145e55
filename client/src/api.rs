// The API used by the server and this client to communicate. Inbound frames
// are snapshots of the table as seen from our seat; outbound frames either
// log in or echo back one of the actions the server offered.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;

use crate::types::{Card, PlayerIndex};

// Server-defined data attached to an action. The client never looks inside:
// the exact bytes received are the bytes sent back.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct ActionPayload(Box<RawValue>);

impl ActionPayload {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        RawValue::from_string(json.to_string()).map(ActionPayload)
    }

    pub fn as_json(&self) -> &str {
        self.0.get()
    }
}

impl PartialEq for ActionPayload {
    fn eq(&self, other: &Self) -> bool {
        self.as_json() == other.as_json()
    }
}

impl Eq for ActionPayload {}

impl fmt::Debug for ActionPayload {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ActionPayload({})", self.as_json())
    }
}

// Display text for a choice. Strings are shown as-is; anything else the
// server sends is shown as its JSON text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Label(pub String);

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Label(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        }))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Inbound.

// A card in our hand together with the action that plays it. Sent as a
// two-element array: [caption, payload].
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
pub struct HandEntry {
    pub caption: String,
    pub payload: ActionPayload,
}

// One answer to a question. Sent as a two-element array: [label, payload].
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
pub struct Choice {
    pub label: Label,
    pub payload: ActionPayload,
}

// The trick in progress, in the order the cards were played starting with
// the leader. Invariant (checked by the codec): at most PLAYER_COUNT cards.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
pub struct TrickPayload {
    pub leader: PlayerIndex,
    pub cards: Vec<Card>,
}

// The most recently completed trick, lead-relative like the current one.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
pub struct PreviousTrickPayload {
    pub leader: PlayerIndex,
    pub cards: Vec<Card>,

    // Absent from older servers; the winner always leads the next trick.
    #[serde(default)]
    pub winner: Option<PlayerIndex>,
}

// Free-form messages attached to a snapshot.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
pub enum Message {
    // A question for us (doubling, bids, stakes, ...). An empty choice list
    // means there is nothing to decide.
    Ask {
        question: String,
        #[serde(default)]
        choices: Vec<Choice>,
    },

    // A status line to show as-is.
    Info(String),
}

// The contract announced for the game, shown next to the declarer's name.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
pub struct Contract {
    pub player: PlayerIndex,
    pub caption: String,
}

// A complete description of the table as visible to us. Each snapshot
// replaces the previous one; nothing is sent as a diff.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
pub struct Snapshot {
    pub hand: Vec<HandEntry>,

    pub trick: TrickPayload,

    pub prev_trick: Option<PreviousTrickPayload>,

    pub msg: Option<Message>,

    // Display names by seat. Invariant (checked by the codec): one per seat.
    pub names: Vec<String>,

    pub contract: Option<Contract>,

    // The seat the server is waiting on, if any.
    pub awaiting: Option<PlayerIndex>,
}

// Outbound.

// The first frame on a fresh connection.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Login {
    #[serde(rename = "str_player_name")]
    pub player_name: String,
}

// A chosen action on its way back to the server.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Intent {
    pub payload: ActionPayload,
}
