//! Decision providers.
//!
//! The engine asks a `DecisionProvider` for every live choice: the skill a
//! participant uses and the targets it picks. Answers outside the offered
//! legal set are rejected and asked again, so a provider only has to
//! eventually return something legal.
//!
//! Two providers ship with the crate:
//!
//! - [`ScriptedDecisions`]: per-participant FIFO scripts, falling back to
//!   the first legal option. Deterministic; what the tests use.
//! - [`RandomDecisions`]: uniform choice seeded through `GameRng`.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::core::{GameRng, Participant, PlayerId};
use crate::skills::SkillId;

/// Source of participant choices.
pub trait DecisionProvider {
    /// Pick one of `legal` for `participant`. `legal` is never empty.
    fn choose_action(&mut self, participant: &Participant, legal: &[SkillId]) -> SkillId;

    /// Pick exactly `count` targets from `legal`, repetition allowed.
    /// `legal` is never empty and `count` is at least 1.
    fn choose_targets(
        &mut self,
        participant: &Participant,
        legal: &[PlayerId],
        count: usize,
    ) -> Vec<PlayerId>;
}

impl<T: DecisionProvider + ?Sized> DecisionProvider for Box<T> {
    fn choose_action(&mut self, participant: &Participant, legal: &[SkillId]) -> SkillId {
        (**self).choose_action(participant, legal)
    }

    fn choose_targets(
        &mut self,
        participant: &Participant,
        legal: &[PlayerId],
        count: usize,
    ) -> Vec<PlayerId> {
        (**self).choose_targets(participant, legal, count)
    }
}

// =============================================================================
// Scripted
// =============================================================================

/// Plays back queued answers per participant.
///
/// When a participant's script runs dry the first legal option is used,
/// repeated to fill the target count.
///
/// ```
/// use skill_clash::core::PlayerId;
/// use skill_clash::rules::ScriptedDecisions;
/// use skill_clash::skills::SkillId;
///
/// let p0 = PlayerId::new(0);
/// let p1 = PlayerId::new(1);
/// let script = ScriptedDecisions::new()
///     .with_actions(p0, [SkillId::Rasengan, SkillId::Meditation])
///     .with_targets(p0, [vec![p1]]);
/// assert_eq!(script.pending_actions(p0), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedDecisions {
    actions: FxHashMap<PlayerId, VecDeque<SkillId>>,
    targets: FxHashMap<PlayerId, VecDeque<Vec<PlayerId>>>,
}

impl ScriptedDecisions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue skill answers for `player`.
    pub fn with_actions(
        mut self,
        player: PlayerId,
        actions: impl IntoIterator<Item = SkillId>,
    ) -> Self {
        self.push_actions(player, actions);
        self
    }

    /// Queue target answers for `player`.
    pub fn with_targets(
        mut self,
        player: PlayerId,
        targets: impl IntoIterator<Item = Vec<PlayerId>>,
    ) -> Self {
        self.push_targets(player, targets);
        self
    }

    pub fn push_actions(&mut self, player: PlayerId, actions: impl IntoIterator<Item = SkillId>) {
        self.actions.entry(player).or_default().extend(actions);
    }

    pub fn push_targets(
        &mut self,
        player: PlayerId,
        targets: impl IntoIterator<Item = Vec<PlayerId>>,
    ) {
        self.targets.entry(player).or_default().extend(targets);
    }

    /// Skill answers still queued for `player`.
    #[must_use]
    pub fn pending_actions(&self, player: PlayerId) -> usize {
        self.actions.get(&player).map_or(0, VecDeque::len)
    }

    /// Target answers still queued for `player`.
    #[must_use]
    pub fn pending_targets(&self, player: PlayerId) -> usize {
        self.targets.get(&player).map_or(0, VecDeque::len)
    }
}

impl DecisionProvider for ScriptedDecisions {
    fn choose_action(&mut self, participant: &Participant, legal: &[SkillId]) -> SkillId {
        self.actions
            .get_mut(&participant.id())
            .and_then(VecDeque::pop_front)
            .unwrap_or(legal[0])
    }

    fn choose_targets(
        &mut self,
        participant: &Participant,
        legal: &[PlayerId],
        count: usize,
    ) -> Vec<PlayerId> {
        self.targets
            .get_mut(&participant.id())
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| vec![legal[0]; count])
    }
}

// =============================================================================
// Random
// =============================================================================

/// Uniform random choices.
#[derive(Clone, Debug)]
pub struct RandomDecisions {
    rng: GameRng,
}

impl RandomDecisions {
    pub fn new(seed: u64) -> Self {
        Self { rng: GameRng::new(seed) }
    }
}

impl DecisionProvider for RandomDecisions {
    fn choose_action(&mut self, _participant: &Participant, legal: &[SkillId]) -> SkillId {
        self.rng.choose(legal).copied().unwrap_or(SkillId::Idle)
    }

    fn choose_targets(
        &mut self,
        _participant: &Participant,
        legal: &[PlayerId],
        count: usize,
    ) -> Vec<PlayerId> {
        (0..count)
            .filter_map(|_| self.rng.choose(legal).copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ParticipantDefaults;

    fn participant(n: u8) -> Participant {
        Participant::new(PlayerId::new(n), ParticipantDefaults::default())
    }

    #[test]
    fn test_scripted_plays_back_then_falls_back() {
        let p0 = participant(0);
        let mut script = ScriptedDecisions::new().with_actions(p0.id(), [SkillId::Chidori]);
        let legal = [SkillId::Meditation, SkillId::Chidori];

        assert_eq!(script.choose_action(&p0, &legal), SkillId::Chidori);
        assert_eq!(script.choose_action(&p0, &legal), SkillId::Meditation);
    }

    #[test]
    fn test_scripted_targets_are_consumed_in_order() {
        let p0 = participant(0);
        let (p1, p2) = (PlayerId::new(1), PlayerId::new(2));
        let mut script = ScriptedDecisions::new().with_targets(p0.id(), [vec![p2], vec![p1, p2]]);
        assert_eq!(script.pending_targets(p0.id()), 2);

        assert_eq!(script.choose_targets(&p0, &[p1, p2], 1), vec![p2]);
        assert_eq!(script.choose_targets(&p0, &[p1, p2], 2), vec![p1, p2]);
        assert_eq!(script.pending_targets(p0.id()), 0);
        assert_eq!(script.pending_targets(p1), 0);
    }

    #[test]
    fn test_scripted_target_fallback_fills_count() {
        let p0 = participant(0);
        let mut script = ScriptedDecisions::new();
        let legal = [PlayerId::new(2), PlayerId::new(3)];
        assert_eq!(
            script.choose_targets(&p0, &legal, 2),
            vec![PlayerId::new(2), PlayerId::new(2)]
        );
    }

    #[test]
    fn test_random_is_seeded_and_legal() {
        let p0 = participant(0);
        let legal: Vec<SkillId> = SkillId::ALL[..10].to_vec();
        let targets = [PlayerId::new(1), PlayerId::new(2)];

        let mut a = RandomDecisions::new(3);
        let mut b = RandomDecisions::new(3);
        for _ in 0..50 {
            let pick = a.choose_action(&p0, &legal);
            assert!(legal.contains(&pick));
            assert_eq!(pick, b.choose_action(&p0, &legal));

            let chosen = a.choose_targets(&p0, &targets, 4);
            assert_eq!(chosen.len(), 4);
            assert!(chosen.iter().all(|t| targets.contains(t)));
            assert_eq!(chosen, b.choose_targets(&p0, &targets, 4));
        }
    }
}
