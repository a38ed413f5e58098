use core::fmt;
use serde::{Deserialize, Serialize};

/// Seat index at the table, 0-based in turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn next(self, players: usize) -> PlayerId {
        PlayerId(((self.0 as usize + 1) % players) as u8)
    }

    /// All seats of a table with `players` participants.
    pub fn seats(players: usize) -> impl Iterator<Item = PlayerId> {
        (0..players as u8).map(PlayerId)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::PlayerId;

    #[test]
    fn next_wraps_around() {
        assert_eq!(PlayerId(2).next(3), PlayerId(0));
        assert_eq!(PlayerId(0).next(3), PlayerId(1));
    }

    #[test]
    fn seats_enumerate_in_turn_order() {
        let seats: Vec<_> = PlayerId::seats(3).collect();
        assert_eq!(seats, vec![PlayerId(0), PlayerId(1), PlayerId(2)]);
    }
}
