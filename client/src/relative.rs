// Converts between lead-relative sequences (the order cards were played in,
// starting with whoever led) and seat-indexed mappings.

use crate::types::{PlayerIndex, SeatMap, PLAYER_COUNT};

// The element at offset `i` belongs to seat `leader + i` (mod PLAYER_COUNT).
// Seats past the end of a short sequence stay empty.
pub fn to_absolute<T, I>(leader: PlayerIndex, relative_seq: I) -> SeatMap<T>
where
    I: IntoIterator<Item = T>,
{
    let mut seats = SeatMap::new();
    for (offset, t) in relative_seq.into_iter().take(PLAYER_COUNT).enumerate() {
        seats.insert(leader.wrapping_add(offset), t);
    }
    seats
}

// Walks the table from the leader and collects seats until the first empty
// one.
pub fn to_relative<T: Clone>(leader: PlayerIndex, seats: &SeatMap<T>) -> Vec<T> {
    (0..PLAYER_COUNT)
        .map_while(|offset| seats.get(leader.wrapping_add(offset)).cloned())
        .collect()
}

// The seat that played the most recent card of a trick of `len` cards, if
// any card has been played.
pub fn last_played(leader: PlayerIndex, len: usize) -> Option<PlayerIndex> {
    len.checked_sub(1).map(|offset| leader.wrapping_add(offset))
}
