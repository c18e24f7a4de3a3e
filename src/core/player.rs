//! Participant identification and the per-participant arena.
//!
//! ## PlayerId
//!
//! Stable participant identifier. Ids never change and are never reused:
//! a participant that becomes unavailable keeps its slot.
//!
//! ## PlayerMap
//!
//! Flat `Vec`-backed arena indexed by `PlayerId`. Effect packets and
//! selections refer to participants by id and look them up here, so
//! rewriting a packet's endpoints is a plain value copy.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Participant identifier supporting up to 255 participants.
///
/// Ids are 0-based and ordered; legality queries return targets sorted by id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new participant ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all participant IDs for a match of `player_count`.
    ///
    /// ```
    /// use skill_clash::core::PlayerId;
    ///
    /// let ids: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(ids, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Per-participant storage with O(1) access by `PlayerId`.
///
/// ```
/// use skill_clash::core::{PlayerId, PlayerMap};
///
/// let mut mp: PlayerMap<i64> = PlayerMap::with_value(3, 100);
/// mp[PlayerId::new(1)] -= 7;
/// assert_eq!(mp[PlayerId::new(1)], 93);
/// assert_eq!(mp.player_count(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a map with one entry per participant, built by `factory`.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 participant");
        assert!(player_count <= 255, "At most 255 participants supported");

        let data = PlayerId::all(player_count).map(factory).collect();
        Self { data }
    }

    /// Create a map with every entry set to `value`.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Create a map of default values.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Number of participants.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs in id order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Reset every entry to its default.
    pub fn reset(&mut self)
    where
        T: Default,
    {
        self.data.iter_mut().for_each(|v| *v = T::default());
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_display_and_order() {
        assert_eq!(format!("{}", PlayerId::new(2)), "P2");
        assert!(PlayerId::new(0) < PlayerId::new(1));
    }

    #[test]
    fn test_player_map_factory() {
        let map: PlayerMap<i64> = PlayerMap::new(4, |p| p.index() as i64 * 10);
        assert_eq!(map[PlayerId::new(3)], 30);
        assert_eq!(map.iter().map(|(id, _)| id).last(), Some(PlayerId::new(3)));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut map: PlayerMap<Vec<u8>> = PlayerMap::with_default(2);
        map[PlayerId::new(0)].push(1);
        map.reset();
        assert!(map[PlayerId::new(0)].is_empty());
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 participant")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<i32> = PlayerMap::with_value(0, 0);
    }
}
