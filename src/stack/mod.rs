//! Action scheduling.
//!
//! A round's actions are queued on a [`PriorityScheduler`] and resolved in
//! tier order. Tier 0 runs first and unconditionally. Deduplication runs
//! between tier 0 and the rest and only ever sees tiers 1-4.

mod scheduler;

pub use scheduler::PriorityScheduler;
