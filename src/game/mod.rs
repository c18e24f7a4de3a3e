//! Match orchestration.
//!
//! [`Match`] owns the participants and drives the round algorithm; a
//! [`Selection`] is one participant's skill and targets for a round.

mod engine;
mod selection;

pub use engine::Match;
pub use selection::Selection;
