//! Core engine types: participant ids, participant state, configuration,
//! RNG and errors.
//!
//! Everything else in the crate refers to participants by `PlayerId` and
//! looks them up in a `PlayerMap<Participant>`.

pub mod player;
pub mod participant;
pub mod config;
pub mod rng;
pub mod error;

pub use player::{PlayerId, PlayerMap};
pub use participant::{HealthPool, Participant, Timer};
pub use config::{MatchConfig, ParticipantDefaults};
pub use rng::GameRng;
pub use error::EngineError;
