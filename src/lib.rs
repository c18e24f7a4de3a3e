//! # skill-clash
//!
//! Turn resolution engine for a multiplayer, simultaneous-move skill
//! battle.
//!
//! Each round every participant picks a skill and its targets. Skills
//! resolve in five priority tiers; some emit delayed effect packets
//! ("balls") into an N×N routing matrix, where later skills can block,
//! reflect or redirect them before opposing balls cancel and the rest are
//! delivered.
//!
//! ## Design Principles
//!
//! 1. **Ids, not references**: participants live in a `PlayerMap` arena
//!    and everything else refers to them by `PlayerId`. Rewriting a ball's
//!    endpoints is a value copy.
//!
//! 2. **Closed sums**: skills and balls are enums with one resolution
//!    function per tier, so the priority order is exhaustive at compile
//!    time.
//!
//! 3. **Structured history**: every resolution decision is appended to an
//!    `EventLog`; `tracing` carries the human-readable side channel.
//!
//! ## Modules
//!
//! - `core`: participant ids and state, configuration, RNG, errors
//! - `skills`: the skill catalog and instantiated actions
//! - `effects`: balls, the routing matrix and delivery
//! - `stack`: tier-ordered scheduling and deduplication
//! - `rules`: legality queries, decision providers, match results
//! - `events`: the structured event log
//! - `game`: the `Match` round loop

pub mod core;
pub mod skills;
pub mod effects;
pub mod stack;
pub mod rules;
pub mod events;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    EngineError, GameRng, HealthPool, MatchConfig, Participant, ParticipantDefaults, PlayerId,
    PlayerMap, Timer,
};

pub use crate::skills::{Action, Skill, SkillId, SkillInfo, Tier};

pub use crate::effects::{Ball, BallKind, BallMatrix, EffectResolver, ResolverContext};

pub use crate::stack::PriorityScheduler;

pub use crate::rules::{DecisionProvider, GameResult, RandomDecisions, ScriptedDecisions};

pub use crate::events::{EventLog, EventRecord, MatchEvent};

pub use crate::game::{Match, Selection};
