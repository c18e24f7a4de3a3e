//! Match rules: legality queries, decision providers and match outcomes.
//!
//! The engine never decides *for* a participant. It computes the legal
//! options with the functions in [`legality`] and hands them to a
//! [`DecisionProvider`].

pub mod decision;
pub mod legality;

pub use decision::{DecisionProvider, RandomDecisions, ScriptedDecisions};
pub use legality::{
    available_players, exposed_players, imitable_skills, legal_skills, legal_targets,
    movable_players,
};

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Outcome of a finished match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// The only participant still available.
    Winner(PlayerId),
    /// Nobody is left.
    Draw,
}

impl GameResult {
    /// Check if a participant won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Winner(p) => write!(f, "{p} wins"),
            GameResult::Draw => write!(f, "draw"),
        }
    }
}
