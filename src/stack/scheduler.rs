//! Tier-ordered action scheduling.
//!
//! Actions are queued in instantiation order. Resolution is three steps:
//!
//! 1. [`run_immediate`](PriorityScheduler::run_immediate): tier-0 actions,
//!    unconditionally.
//! 2. [`deduplicate`](PriorityScheduler::deduplicate): drop conflicting
//!    rewrites and mind-swaps.
//! 3. [`run_remaining`](PriorityScheduler::run_remaining): tiers 1-4 in
//!    ascending tier order, stable within a tier.

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::core::PlayerId;
use crate::effects::ResolverContext;
use crate::events::{DropReason, EventLog, MatchEvent};
use crate::skills::{Action, SkillId, Tier};

/// The round's action list.
#[derive(Clone, Debug, Default)]
pub struct PriorityScheduler {
    actions: Vec<Action>,
}

impl PriorityScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action.
    pub fn queue(&mut self, action: Action) {
        self.actions.push(action);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Queued actions in insertion order.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Resolve and remove every tier-0 action, in insertion order.
    pub fn run_immediate(&mut self, ctx: &mut ResolverContext) {
        let (immediate, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.actions)
            .into_iter()
            .partition(|a| a.tier() == Tier::Immediate);
        self.actions = rest;

        for action in &immediate {
            action.resolve(ctx);
        }
    }

    /// Drop conflicting actions. Returns what was dropped.
    ///
    /// - Two or more mass-redirects: all of them go.
    /// - Two or more mind-swaps on the same target: all of those go.
    pub fn deduplicate(&mut self, log: &mut EventLog) -> Vec<Action> {
        let redirects = self
            .actions
            .iter()
            .filter(|a| a.id() == SkillId::Banshoutenin)
            .count();

        let mut swaps_by_target: FxHashMap<PlayerId, usize> = FxHashMap::default();
        for target in self.actions.iter().filter_map(|a| a.skill.mind_swap_target()) {
            *swaps_by_target.entry(target).or_default() += 1;
        }

        let (dropped, kept): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.actions).into_iter().partition(|a| {
                (redirects > 1 && a.id() == SkillId::Banshoutenin)
                    || a
                        .skill
                        .mind_swap_target()
                        .is_some_and(|t| swaps_by_target[&t] > 1)
            });
        self.actions = kept;

        for action in &dropped {
            let reason = if action.id() == SkillId::Banshoutenin {
                DropReason::DuplicateMassRedirect
            } else {
                DropReason::RepeatedMindSwapTarget
            };
            warn!(%action, ?reason, "action dropped");
            log.push(MatchEvent::ActionDropped {
                player: action.source,
                skill: action.id(),
                reason,
            });
        }

        dropped
    }

    /// Resolve and remove every remaining action, ascending by tier.
    pub fn run_remaining(&mut self, ctx: &mut ResolverContext) {
        let mut remaining = std::mem::take(&mut self.actions);
        remaining.sort_by_key(Action::tier);

        for action in &remaining {
            action.resolve(ctx);
        }
    }

    /// Forget every queued action.
    pub fn clear(&mut self) {
        self.actions.clear();
    }
}
