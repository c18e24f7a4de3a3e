//! Per-participant state and its transitions.
//!
//! A participant has two health pools. The primary pool is active until it
//! is depleted; after a reanimation the secondary ("reanimated") pool is
//! active until it is depleted or sealed. A participant is *available* iff
//! it has never died, or it died and is currently reanimated. Unavailable
//! participants are never removed: the record stays in the arena.
//!
//! All mutation goes through the methods below. Each one emits a `tracing`
//! debug line; structured events are recorded by the resolution layer.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::ParticipantDefaults;
use super::player::PlayerId;

/// Which health pool is currently taking damage and healing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthPool {
    Primary,
    Reanimated,
}

/// Round-scoped counters that decay toward 0 at round end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timer {
    Bind,
    AcupointSeal,
    SixPaths,
    ShadowClones,
}

/// Mutable state of one participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    id: PlayerId,
    defaults: ParticipantDefaults,

    hp: i64,
    max_hp: i64,
    has_died: bool,
    reanimated: bool,
    second_hp: i64,
    second_max_hp: i64,
    mp: i64,

    bind_turns: u32,
    acupoint_seal_turns: u32,
    sixpaths_mode_turns: u32,
    shadow_clone_count: u32,

    exposed: bool,
    fatal_sealed: bool,
    in_alternate_zone: bool,
    soul_drained: bool,
    charmed_by: Option<PlayerId>,
    copying: bool,
}

impl Participant {
    /// Create a participant with the configured starting pools.
    pub fn new(id: PlayerId, defaults: ParticipantDefaults) -> Self {
        Self {
            id,
            defaults,
            hp: defaults.hp,
            max_hp: defaults.max_hp,
            has_died: false,
            reanimated: false,
            second_hp: defaults.second_hp,
            second_max_hp: defaults.second_max_hp,
            mp: defaults.mp,
            bind_turns: 0,
            acupoint_seal_turns: 0,
            sixpaths_mode_turns: 0,
            shadow_clone_count: 0,
            exposed: false,
            fatal_sealed: false,
            in_alternate_zone: false,
            soul_drained: false,
            charmed_by: None,
            copying: false,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Never died, or died and currently reanimated.
    #[must_use]
    pub fn is_available(&self) -> bool {
        !self.has_died || self.reanimated
    }

    #[must_use]
    pub fn has_died(&self) -> bool {
        self.has_died
    }

    #[must_use]
    pub fn is_reanimated(&self) -> bool {
        self.reanimated
    }

    /// The pool that damage and healing currently apply to.
    #[must_use]
    pub fn active_pool(&self) -> HealthPool {
        if self.reanimated {
            HealthPool::Reanimated
        } else {
            HealthPool::Primary
        }
    }

    #[must_use]
    pub fn hp(&self) -> i64 {
        self.hp
    }

    #[must_use]
    pub fn max_hp(&self) -> i64 {
        self.max_hp
    }

    #[must_use]
    pub fn second_hp(&self) -> i64 {
        self.second_hp
    }

    #[must_use]
    pub fn second_max_hp(&self) -> i64 {
        self.second_max_hp
    }

    /// Health of the active pool.
    #[must_use]
    pub fn current_hp(&self) -> i64 {
        match self.active_pool() {
            HealthPool::Primary => self.hp,
            HealthPool::Reanimated => self.second_hp,
        }
    }

    #[must_use]
    pub fn mp(&self) -> i64 {
        self.mp
    }

    #[must_use]
    pub fn timer(&self, kind: Timer) -> u32 {
        match kind {
            Timer::Bind => self.bind_turns,
            Timer::AcupointSeal => self.acupoint_seal_turns,
            Timer::SixPaths => self.sixpaths_mode_turns,
            Timer::ShadowClones => self.shadow_clone_count,
        }
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.bind_turns > 0
    }

    #[must_use]
    pub fn is_acupoint_sealed(&self) -> bool {
        self.acupoint_seal_turns > 0
    }

    #[must_use]
    pub fn is_in_sixpaths_mode(&self) -> bool {
        self.sixpaths_mode_turns > 0
    }

    #[must_use]
    pub fn shadow_clones(&self) -> u32 {
        self.shadow_clone_count
    }

    #[must_use]
    pub fn is_exposed(&self) -> bool {
        self.exposed
    }

    #[must_use]
    pub fn is_fatal_sealed(&self) -> bool {
        self.fatal_sealed
    }

    #[must_use]
    pub fn in_alternate_zone(&self) -> bool {
        self.in_alternate_zone
    }

    /// Whether two participants share a zone.
    #[must_use]
    pub fn shares_zone_with(&self, other: &Participant) -> bool {
        self.in_alternate_zone == other.in_alternate_zone
    }

    #[must_use]
    pub fn is_soul_drained(&self) -> bool {
        self.soul_drained
    }

    /// Who revealed this participant with a mind-swap, if anyone.
    #[must_use]
    pub fn charmed_by(&self) -> Option<PlayerId> {
        self.charmed_by
    }

    /// Never fatal-sealed and not already reanimated.
    #[must_use]
    pub fn can_be_reanimated(&self) -> bool {
        !self.fatal_sealed && !self.reanimated
    }

    // === Health ===

    /// Apply damage to the active pool.
    ///
    /// Returns the amount actually absorbed, `min(pool before, amount)`,
    /// which is what life-steal restores. Unavailable participants absorb
    /// nothing.
    pub fn receive_damage(&mut self, amount: i64) -> i64 {
        if !self.is_available() || amount <= 0 {
            return 0;
        }

        let pool = self.active_pool();
        let slot = match pool {
            HealthPool::Primary => &mut self.hp,
            HealthPool::Reanimated => &mut self.second_hp,
        };
        let before = *slot;
        *slot = (before - amount).max(0);
        debug!(participant = %self.id, ?pool, amount, remaining = *slot, "damage taken");

        if *slot == 0 {
            match pool {
                HealthPool::Primary => self.has_died = true,
                HealthPool::Reanimated => self.reanimated = false,
            }
            debug!(participant = %self.id, ?pool, "pool depleted");
        }

        before.min(amount)
    }

    /// Restore health on the active pool, clamped to that pool's cap.
    ///
    /// Returns the pool's new value.
    pub fn restore_health(&mut self, amount: i64) -> i64 {
        let (slot, cap) = match self.active_pool() {
            HealthPool::Primary => (&mut self.hp, self.max_hp),
            HealthPool::Reanimated => (&mut self.second_hp, self.second_max_hp),
        };
        *slot = (*slot + amount).min(cap);
        debug!(participant = %self.id, amount, remaining = *slot, "health restored");
        *slot
    }

    /// Raise the active pool's cap to the configured maximum.
    pub fn raise_max_health(&mut self) -> i64 {
        let cap = self.defaults.raised_max_hp;
        match self.active_pool() {
            HealthPool::Primary => self.max_hp = cap,
            HealthPool::Reanimated => self.second_max_hp = cap,
        }
        debug!(participant = %self.id, cap, "max health raised");
        cap
    }

    // === Resource ===

    /// Add to the resource pool. Returns the new value.
    pub fn restore_resource(&mut self, amount: i64) -> i64 {
        self.mp += amount;
        debug!(participant = %self.id, amount, remaining = self.mp, "mp restored");
        self.mp
    }

    /// Spend from the resource pool, flooring at 0. Returns the new value.
    pub fn spend_resource(&mut self, amount: i64) -> i64 {
        self.mp = (self.mp - amount).max(0);
        if amount != 0 {
            debug!(participant = %self.id, amount, remaining = self.mp, "mp spent");
        }
        self.mp
    }

    /// Mark the pool to be zeroed after delivery.
    pub fn mark_soul_drained(&mut self) {
        self.soul_drained = true;
    }

    /// Zero the pool if it was drained this round. Returns whether it was.
    pub fn resolve_soul_drain(&mut self) -> bool {
        if !self.soul_drained {
            return false;
        }
        self.soul_drained = false;
        self.mp = 0;
        debug!(participant = %self.id, "mp drained to 0");
        true
    }

    // === Status ===

    /// Add `delta` to a timer, flooring at 0. Returns the new value.
    pub fn adjust_timer(&mut self, kind: Timer, delta: i64) -> u32 {
        let slot = match kind {
            Timer::Bind => &mut self.bind_turns,
            Timer::AcupointSeal => &mut self.acupoint_seal_turns,
            Timer::SixPaths => &mut self.sixpaths_mode_turns,
            Timer::ShadowClones => &mut self.shadow_clone_count,
        };
        *slot = (i64::from(*slot) + delta).clamp(0, i64::from(u32::MAX)) as u32;
        if delta > 0 {
            debug!(participant = %self.id, ?kind, value = *slot, "timer raised");
        }
        *slot
    }

    /// Set the exposed flag. Returns `true` if it was already set.
    pub fn reveal(&mut self) -> bool {
        let already = self.exposed;
        if already {
            debug!(participant = %self.id, "already exposed");
        }
        self.exposed = true;
        debug!(participant = %self.id, "exposed");
        already
    }

    /// Reveal and record who took control of the next action.
    pub fn charm(&mut self, by: PlayerId) -> bool {
        let already = self.reveal();
        self.charmed_by = Some(by);
        already
    }

    /// Seal permanently, killing the active pool.
    pub fn permanently_seal(&mut self) {
        self.fatal_sealed = true;
        if self.reanimated {
            self.reanimated = false;
            debug!(participant = %self.id, "reanimated pool sealed");
        } else {
            self.has_died = true;
            debug!(participant = %self.id, "primary pool sealed, died");
        }
    }

    /// Grant a fresh reanimated pool.
    ///
    /// Returns `false` without changing anything if the participant cannot
    /// be reanimated. A participant that had died loses its resource pool.
    pub fn reanimate(&mut self) -> bool {
        if !self.can_be_reanimated() {
            debug!(participant = %self.id, "cannot be reanimated");
            return false;
        }

        self.reanimated = true;
        self.second_hp = self.defaults.second_hp;
        self.second_max_hp = self.defaults.second_max_hp;
        if self.has_died {
            self.mp = 0;
        }
        debug!(participant = %self.id, hp = self.second_hp, "reanimated");
        true
    }

    /// Flip the zone flag. Returns the new value.
    pub fn toggle_zone(&mut self) -> bool {
        self.in_alternate_zone = !self.in_alternate_zone;
        debug!(participant = %self.id, alternate = self.in_alternate_zone, "zone toggled");
        self.in_alternate_zone
    }

    /// Round-end decay: timers tick down, exposure and charm clear.
    ///
    /// The clone count ticks down whether or not clones acted this round.
    pub fn decay_statuses(&mut self) {
        self.adjust_timer(Timer::Bind, -1);
        self.adjust_timer(Timer::AcupointSeal, -1);
        self.adjust_timer(Timer::SixPaths, -1);
        self.adjust_timer(Timer::ShadowClones, -1);
        self.exposed = false;
        self.charmed_by = None;
    }

    // === Copy bookkeeping ===

    /// Mark that the next instantiation is a copied action.
    pub(crate) fn begin_copy(&mut self) {
        self.copying = true;
    }

    /// Clear the copy mark, returning whether it was set.
    pub(crate) fn take_copy_flag(&mut self) -> bool {
        std::mem::take(&mut self.copying)
    }
}
