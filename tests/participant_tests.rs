//! Participant state-machine tests.
//!
//! Property tests drive arbitrary sequences of damage, healing, sealing and
//! reanimation through a participant and check that availability always
//! matches its death history.

use proptest::prelude::*;

use skill_clash::core::{HealthPool, Participant, ParticipantDefaults, PlayerId, Timer};

#[derive(Clone, Debug)]
enum Op {
    Damage(i64),
    Heal(i64),
    Reanimate,
    Seal,
    Decay,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0i64..5).prop_map(Op::Damage),
        2 => (0i64..5).prop_map(Op::Heal),
        2 => Just(Op::Reanimate),
        1 => Just(Op::Seal),
        1 => Just(Op::Decay),
    ]
}

fn fresh() -> Participant {
    Participant::new(PlayerId::new(0), ParticipantDefaults::default())
}

proptest! {
    /// Availability is exactly "never died, or died and reanimated".
    #[test]
    fn availability_tracks_death_history(ops in prop::collection::vec(op(), 0..60)) {
        let mut p = fresh();
        let mut sealed = false;

        for op in ops {
            let was_available = p.is_available();
            match op {
                Op::Damage(n) => {
                    let absorbed = p.receive_damage(n);
                    prop_assert!(absorbed <= n.max(0));
                    if !was_available {
                        prop_assert_eq!(absorbed, 0);
                    }
                }
                Op::Heal(n) => {
                    p.restore_health(n);
                }
                Op::Reanimate => {
                    let ok = p.reanimate();
                    if sealed {
                        prop_assert!(!ok);
                    }
                }
                Op::Seal => {
                    // Sealing a reanimated participant that never died only ends the second pool
                    let comes_back = p.is_reanimated() && !p.has_died();
                    p.permanently_seal();
                    prop_assert_eq!(p.is_available(), comes_back);
                    sealed = true;
                }
                Op::Decay => p.decay_statuses(),
            }

            prop_assert_eq!(p.is_available(), !p.has_died() || p.is_reanimated());
            prop_assert!(p.hp() >= 0 && p.second_hp() >= 0);
            prop_assert!(p.hp() <= p.max_hp());
            prop_assert!(p.second_hp() <= p.second_max_hp());
            if sealed {
                prop_assert!(!p.can_be_reanimated());
                // Once dead, a sealed participant stays dead
                if p.has_died() {
                    prop_assert!(!p.is_available());
                }
            }
        }
    }

    /// Timers never go below zero, whatever the deltas.
    #[test]
    fn timers_floor_at_zero(deltas in prop::collection::vec(-3i64..4, 0..30)) {
        let mut p = fresh();
        let mut expected: i64 = 0;
        for d in deltas {
            expected = (expected + d).max(0);
            prop_assert_eq!(i64::from(p.adjust_timer(Timer::Bind, d)), expected);
        }
    }
}

/// Test that a reanimated participant dies again when the second pool empties.
#[test]
fn test_second_life_cycle() {
    let mut p = fresh();
    p.receive_damage(2);
    assert!(!p.is_available());

    assert!(p.reanimate());
    assert_eq!(p.active_pool(), HealthPool::Reanimated);
    assert_eq!(p.current_hp(), 2);
    assert_eq!(p.mp(), 0);

    // Healing goes to the active pool
    p.restore_health(5);
    assert_eq!(p.second_hp(), 4);
    assert_eq!(p.hp(), 0);

    assert_eq!(p.receive_damage(10), 4);
    assert!(!p.is_available());
    assert!(p.has_died());

    // Not sealed and no longer reanimated, so it may come back again
    assert!(p.can_be_reanimated());
}

/// Test that sealing a participant reanimated before dying leaves the primary pool.
#[test]
fn test_seal_after_living_reanimation_keeps_primary_pool() {
    let mut p = fresh();
    assert!(p.reanimate());
    assert_eq!(p.active_pool(), HealthPool::Reanimated);

    p.permanently_seal();

    assert!(p.is_available());
    assert!(!p.is_reanimated());
    assert!(p.is_fatal_sealed());
    assert!(!p.can_be_reanimated());
    assert_eq!(p.active_pool(), HealthPool::Primary);
    assert_eq!(p.hp(), 2);
    assert_eq!(p.mp(), 100);

    // The primary pool still dies normally, and there is no way back
    p.receive_damage(2);
    assert!(!p.is_available());
    assert!(!p.reanimate());
}

/// Test that raising max health only affects the active pool.
#[test]
fn test_raise_max_health_targets_active_pool() {
    let mut p = fresh();
    p.raise_max_health();
    assert_eq!(p.max_hp(), 6);
    assert_eq!(p.second_max_hp(), 4);
}
