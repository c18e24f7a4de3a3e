//! Engine error type.
//!
//! Only consistency faults and configuration problems are errors. Rule
//! outcomes (a dropped action, a blocked packet, a missing target) are
//! reported through the event log instead.

use thiserror::Error;

use crate::skills::SkillId;

/// Errors that abort a round or refuse to start a match.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid match configuration: {0}")]
    InvalidConfig(String),

    /// The skill table and the legality rules disagree: a selection that
    /// must be resolved before instantiation reached it.
    #[error("Skill {0} cannot be instantiated as a round action")]
    NotInstantiable(SkillId),

    #[error("Unknown skill id {0}")]
    UnknownSkill(i64),

    #[error("Match did not finish within {0} rounds")]
    RoundLimitReached(u32),
}
