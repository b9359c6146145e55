// Builds the view model the renderer draws from server snapshots.
//
// Snapshots are complete, so each one produces a complete new view model.
// The previous view model is only consulted for things a snapshot cannot
// carry: which hand slots are already on screen, and the last completed trick
// when the server doesn't resend it.

use log::trace;

use crate::api::{Choice, HandEntry, Message, Snapshot};
use crate::relative::{last_played, to_absolute, to_relative};
use crate::types::{Card, PlayerIndex, SeatMap, PLAYER_COUNT};

// Identifies a hand slot across snapshots so the renderer can keep the
// slots it already drew.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SlotId(pub u64);

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HandSlot {
    pub id: SlotId,
    pub entry: HandEntry,
}

// The trick in progress.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisplayedTrick {
    pub leader: PlayerIndex,

    // Lead-relative. Invariant: at most PLAYER_COUNT cards.
    pub cards: Vec<Card>,

    pub seats: SeatMap<Card>,

    // The seat whose card was played last, which animates on render.
    pub animate: Option<PlayerIndex>,
}

impl DisplayedTrick {
    pub fn animates(&self, epi: PlayerIndex) -> bool {
        self.animate == Some(epi)
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

// The last completed trick, kept on screen until the next one completes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PreviousTrick {
    pub seats: SeatMap<Card>,
    pub winner: PlayerIndex,

    // Set when the trick has just been completed, as opposed to being
    // redrawn while nothing happened to it.
    pub animate_entrance: bool,
}

// A pending question and its answers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LegalActionSet {
    pub prompt: String,
    pub choices: Vec<Choice>, // Invariant: non-empty.
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlayerStatusView {
    pub caption: String,
    pub awaiting_input: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ViewModel {
    pub hand: Vec<HandSlot>,

    // The id the next new hand slot will get.
    pub next_slot: SlotId,

    pub trick: DisplayedTrick,

    pub previous_trick: Option<PreviousTrick>,

    pub actions: Option<LegalActionSet>,

    pub info: Option<String>,

    pub players: Vec<PlayerStatusView>, // Invariant: length of PLAYER_COUNT.
}

impl ViewModel {
    pub fn player(&self, epi: PlayerIndex) -> &PlayerStatusView {
        &self.players[epi.to_usize()]
    }
}

// Produces the view model for `snapshot`. Deterministic and total: any
// snapshot, including one that bypassed the codec's checks, yields a view
// model.
pub fn reconcile(prev: Option<&ViewModel>, snapshot: &Snapshot) -> ViewModel {
    let (hand, next_slot) = reconcile_hand(prev, &snapshot.hand);
    let trick = reconcile_trick(snapshot);
    let previous_trick = reconcile_previous_trick(prev, snapshot, &trick);

    let (actions, info) = match &snapshot.msg {
        Some(Message::Ask { question, choices }) if !choices.is_empty() => (
            Some(LegalActionSet {
                prompt: question.clone(),
                choices: choices.clone(),
            }),
            None,
        ),
        Some(Message::Info(text)) => (None, Some(text.clone())),
        _ => (None, None),
    };

    ViewModel {
        hand,
        next_slot,
        trick,
        previous_trick,
        actions,
        info,
        players: reconcile_players(snapshot),
    }
}

// Hand slots behave like a queue: cards leave from the front and new cards
// are appended at the back. Slots are matched by position only, since the
// server's order is the display order.
fn reconcile_hand(prev: Option<&ViewModel>, entries: &[HandEntry]) -> (Vec<HandSlot>, SlotId) {
    let (prev_ids, mut next_slot) = match prev {
        Some(view) => (
            view.hand.iter().map(|slot| slot.id).collect::<Vec<_>>(),
            view.next_slot,
        ),
        None => (Vec::new(), SlotId(0)),
    };

    let dropped = prev_ids.len().saturating_sub(entries.len());
    let mut ids = prev_ids[dropped..].to_vec();
    while ids.len() < entries.len() {
        ids.push(next_slot);
        next_slot = SlotId(next_slot.0 + 1);
    }

    let hand = ids
        .into_iter()
        .zip(entries.iter().cloned())
        .map(|(id, entry)| HandSlot { id, entry })
        .collect();

    (hand, next_slot)
}

fn reconcile_trick(snapshot: &Snapshot) -> DisplayedTrick {
    let leader = snapshot.trick.leader;
    let cards: Vec<Card> = snapshot.trick.cards.iter().take(PLAYER_COUNT).copied().collect();

    DisplayedTrick {
        leader,
        seats: to_absolute(leader, cards.iter().copied()),
        animate: last_played(leader, cards.len()),
        cards,
    }
}

// An empty current trick means either that a trick was just completed or
// that none has been played yet. Only a changed previous-trick payload tells
// the two apart, so only then does the previous trick animate in.
fn reconcile_previous_trick(
    prev: Option<&ViewModel>,
    snapshot: &Snapshot,
    trick: &DisplayedTrick,
) -> Option<PreviousTrick> {
    let stored = prev.and_then(|view| view.previous_trick.as_ref());
    let Some(payload) = &snapshot.prev_trick else {
        return stored.map(|previous_trick| PreviousTrick {
            animate_entrance: false,
            ..previous_trick.clone()
        });
    };

    let winner = payload.winner.unwrap_or(trick.leader);

    // Servers resend the last trick with every snapshot.
    let resent = stored.is_some_and(|previous_trick| {
        previous_trick.winner == winner
            && to_relative(payload.leader, &previous_trick.seats) == payload.cards
    });

    let animate_entrance = trick.is_empty() && !resent;
    if animate_entrance {
        trace!("trick completed, won by seat {}", winner);
    }

    Some(PreviousTrick {
        seats: to_absolute(payload.leader, payload.cards.iter().copied()),
        winner,
        animate_entrance,
    })
}

fn reconcile_players(snapshot: &Snapshot) -> Vec<PlayerStatusView> {
    PlayerIndex::values()
        .map(|epi| {
            let name = snapshot
                .names
                .get(epi.to_usize())
                .cloned()
                .unwrap_or_default();
            let caption = match &snapshot.contract {
                Some(contract) if contract.player == epi => {
                    format!("{} ({})", name, contract.caption)
                }
                _ => name,
            };

            PlayerStatusView {
                caption,
                awaiting_input: snapshot.awaiting == Some(epi),
            }
        })
        .collect()
}
