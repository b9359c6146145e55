// End-to-end runs through the codec, the view model builder and the action registry, starting
// from frames as the server sends them.

use schafkopf_client::actions::{choices, select, ChoiceSource};
use schafkopf_client::codec::{decode, encode};
use schafkopf_client::types::{Card, PlayerIndex, PLAYER_COUNT};
use schafkopf_client::view::{reconcile, ViewModel};

fn seat(i: usize) -> PlayerIndex {
    PlayerIndex::new(i).unwrap()
}

fn card(code: &str) -> Card {
    code.parse().unwrap()
}

fn apply(prev: Option<&ViewModel>, frame: &str) -> ViewModel {
    reconcile(prev, &decode(frame.as_bytes()).unwrap())
}

const NAMES: &str = r#""names": ["Alice", "Bob", "Carol", "Dave"]"#;

#[test]
fn single_card_trick_with_two_cards_in_hand() {
    let view = apply(
        None,
        &format!(
            r#"{{"trick": {{"leader": 1, "cards": ["H7"]}},
                "hand": [["E7", {{"card": "E7"}}], ["GZ", {{"card": "GZ"}}]],
                {NAMES}}}"#
        ),
    );

    assert_eq!(view.hand.len(), 2);
    assert_eq!(view.trick.seats.get(seat(1)), Some(&card("H7")));
    assert!(view.trick.animates(seat(1)));
    for other in [0, 2, 3] {
        assert_eq!(view.trick.seats.get(seat(other)), None);
        assert!(!view.trick.animates(seat(other)));
    }
}

#[test]
fn question_answers_round_trip_untouched() {
    let view = apply(
        None,
        &format!(
            r#"{{"trick": {{"leader": 0, "cards": []}}, "hand": [],
                "msg": {{"Ask": {{"question": "Doubling?",
                    "choices": [["Yes", {{"Doubling" : [true, 1]}}], ["No", {{"Doubling": [false]}}]]}}}},
                {NAMES}}}"#
        ),
    );

    let actions = view.actions.as_ref().unwrap();
    assert_eq!(actions.prompt, "Doubling?");
    let labels: Vec<String> = actions.choices.iter().map(|c| c.label.to_string()).collect();
    assert_eq!(labels, vec!["Yes", "No"]);

    let offered = choices(&view);
    assert!(offered.iter().all(|choice| choice.source == ChoiceSource::Question));

    let intent = select(offered[0].payload);
    assert_eq!(intent.payload.as_json(), r#"{"Doubling" : [true, 1]}"#);
    assert_eq!(encode(&intent), r#"{"action":{"Doubling" : [true, 1]}}"#);
}

#[test]
fn played_card_drops_the_leading_slot() {
    let first = apply(
        None,
        &format!(
            r#"{{"trick": {{"leader": 0, "cards": []}},
                "hand": [["SA", 0], ["E7", 1], ["GZ", 2]], {NAMES}}}"#
        ),
    );
    let second = apply(
        Some(&first),
        &format!(
            r#"{{"trick": {{"leader": 0, "cards": ["SA"]}},
                "hand": [["E7", 1], ["GZ", 2]], {NAMES}}}"#
        ),
    );

    assert_eq!(second.hand.len(), first.hand.len() - 1);
    assert_eq!(second.hand[0].id, first.hand[1].id);
    assert_eq!(second.hand[1].id, first.hand[2].id);
    let captions: Vec<&str> = second.hand.iter().map(|s| s.entry.caption.as_str()).collect();
    assert_eq!(captions, vec!["E7", "GZ"]);
}

#[test]
fn completed_trick_moves_to_previous_and_animates_in() {
    let full = apply(
        None,
        &format!(
            r#"{{"trick": {{"leader": 2, "cards": ["GA", "G7", "GK", "HO"]}},
                "hand": [], {NAMES}}}"#
        ),
    );
    assert_eq!(full.trick.cards.len(), PLAYER_COUNT);
    assert!(full.trick.animates(seat(1)));

    let next = apply(
        Some(&full),
        &format!(
            r#"{{"trick": {{"leader": 1, "cards": []}},
                "prev_trick": {{"leader": 2, "cards": ["GA", "G7", "GK", "HO"], "winner": 1}},
                "hand": [], {NAMES}}}"#
        ),
    );

    let previous_trick = next.previous_trick.as_ref().unwrap();
    assert_eq!(previous_trick.seats, full.trick.seats);
    assert_eq!(previous_trick.winner, seat(1));
    assert!(previous_trick.animate_entrance);
    assert_eq!(next.trick.animate, None);

    // The first card of the new trick: the previous trick stays, but stops animating.
    let led = apply(
        Some(&next),
        &format!(
            r#"{{"trick": {{"leader": 1, "cards": ["EA"]}}, "hand": [], {NAMES}}}"#
        ),
    );
    let kept = led.previous_trick.as_ref().unwrap();
    assert_eq!(kept.seats, full.trick.seats);
    assert!(!kept.animate_entrance);
}

#[test]
fn resent_previous_trick_animates_only_once() {
    let frame = |awaiting: usize| {
        format!(
            r#"{{"trick": {{"leader": 1, "cards": []}},
                "prev_trick": {{"leader": 2, "cards": ["GA", "G7", "GK", "HO"], "winner": 1}},
                "hand": [], "awaiting": {awaiting}, {NAMES}}}"#
        )
    };

    let completed = apply(None, &frame(1));
    assert!(completed.previous_trick.as_ref().unwrap().animate_entrance);

    // The leader hasn't played yet; the server repeats the last trick.
    let waiting = apply(Some(&completed), &frame(1));
    let reloaded = apply(Some(&waiting), &frame(2));
    for view in [&waiting, &reloaded] {
        let previous_trick = view.previous_trick.as_ref().unwrap();
        assert_eq!(previous_trick.seats, completed.previous_trick.as_ref().unwrap().seats);
        assert_eq!(previous_trick.winner, seat(1));
        assert!(!previous_trick.animate_entrance);
    }
}

#[test]
fn fresh_deal_does_not_animate_a_previous_trick() {
    let full = apply(
        None,
        &format!(
            r#"{{"trick": {{"leader": 0, "cards": ["SA", "S7", "S8", "S9"]}},
                "hand": [], {NAMES}}}"#
        ),
    );
    let dealt = apply(
        Some(&full),
        &format!(
            r#"{{"trick": {{"leader": 1, "cards": []}},
                "hand": [["E7", 0], ["E8", 1]], {NAMES}}}"#
        ),
    );

    assert_eq!(dealt.previous_trick, None);
    assert_eq!(dealt.trick.animate, None);
}

#[test]
fn duplicate_delivery_is_harmless() {
    let frame = format!(
        r#"{{"trick": {{"leader": 3, "cards": ["EO", "HU"]}},
            "prev_trick": {{"leader": 0, "cards": ["SA", "S7", "S8", "S9"]}},
            "hand": [["E7", 0]], "awaiting": 1, {NAMES}}}"#
    );
    let first = apply(None, &frame);

    assert_eq!(apply(Some(&first), &frame), apply(Some(&first), &frame));
}
