// The actions on offer to us, and the intents they turn into once chosen.
//
// Payloads are server-defined (card plays, bids, yes/no answers, stakes) and
// are passed back without being looked at. Whether a choice is still valid
// when it arrives is for the server to decide.

use thiserror::Error;

use crate::api::{ActionPayload, Intent};
use crate::view::ViewModel;

// Where a choice is shown.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChoiceSource {
    Question,
    Hand,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChoiceView<'a> {
    pub label: String,
    pub payload: &'a ActionPayload,
    pub source: ChoiceSource,
}

#[derive(Debug, Error, PartialEq)]
pub enum SelectionError {
    #[error("{0:?} is not a choice number")]
    NotANumber(String),

    #[error("there is no choice {number} (have {available})")]
    NoSuchChoice { number: usize, available: usize },
}

// Everything we may do right now: answers to the pending question first,
// then the cards in our hand, each in server order.
pub fn choices(view: &ViewModel) -> Vec<ChoiceView<'_>> {
    let answers = view.actions.iter().flat_map(|actions| {
        actions.choices.iter().map(|choice| ChoiceView {
            label: choice.label.to_string(),
            payload: &choice.payload,
            source: ChoiceSource::Question,
        })
    });

    let cards = view.hand.iter().map(|slot| ChoiceView {
        label: slot.entry.caption.clone(),
        payload: &slot.entry.payload,
        source: ChoiceSource::Hand,
    });

    answers.chain(cards).collect()
}

// Looks up a choice by the 1-based number it is displayed with.
pub fn choice(view: &ViewModel, number: usize) -> Result<ChoiceView<'_>, SelectionError> {
    let mut all = choices(view);
    let available = all.len();
    if number == 0 || number > available {
        return Err(SelectionError::NoSuchChoice { number, available });
    }
    Ok(all.swap_remove(number - 1))
}

// Parses a line of user input as a choice number.
pub fn parse_selection(line: &str) -> Result<usize, SelectionError> {
    line.trim()
        .parse()
        .map_err(|_| SelectionError::NotANumber(line.trim().to_string()))
}

// Exactly one intent per selection, carrying the payload unchanged.
pub fn select(payload: &ActionPayload) -> Intent {
    Intent {
        payload: payload.clone(),
    }
}
