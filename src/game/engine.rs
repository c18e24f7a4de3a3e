//! The match: participants, the round algorithm and termination.
//!
//! ## Round phases
//!
//! 1. Foresight load: exposed participants get last round's pre-selection.
//! 2. Live selection: skills for every movable participant, then targets.
//! 3. Shadow clones replay the selected skill.
//! 4. Copy-actions are replaced by an imitated skill.
//! 5. Selections are instantiated and charged.
//! 6. Status decay.
//! 7. Tier 0 resolves.
//! 8. Deduplication.
//! 9. Tiers 1-4 resolve.
//! 10. Ball delivery.
//! 11. Soul drains zero resource pools.
//! 12. Selections and the matrix are cleared.
//! 13. Foresight capture for participants exposed now.
//! 14. The match ends when at most one participant is available.

use tracing::{debug, info, warn};

use crate::core::{EngineError, MatchConfig, Participant, PlayerId, PlayerMap, Timer};
use crate::effects::{BallMatrix, EffectResolver, ResolverContext};
use crate::events::{DecisionStage, DropReason, EventLog, MatchEvent};
use crate::rules::{
    available_players, exposed_players, imitable_skills, legal_skills, legal_targets,
    movable_players, DecisionProvider, GameResult,
};
use crate::skills::{Action, SkillId, Targets};
use crate::stack::PriorityScheduler;

use super::Selection;

/// One match, owning every participant and the round state.
///
/// ```
/// use skill_clash::core::MatchConfig;
/// use skill_clash::game::Match;
/// use skill_clash::rules::RandomDecisions;
///
/// let config = MatchConfig::new(3).with_max_rounds(500);
/// let mut game = Match::with_config(config, RandomDecisions::new(7)).unwrap();
/// match game.run() {
///     Ok(result) => assert_eq!(game.result(), Some(result)),
///     Err(e) => assert!(e.to_string().contains("500")),
/// }
/// ```
pub struct Match<D> {
    config: MatchConfig,
    players: PlayerMap<Participant>,
    matrix: BallMatrix,
    scheduler: PriorityScheduler,
    selections: PlayerMap<Selection>,
    preselections: PlayerMap<Option<Selection>>,
    decisions: D,
    log: EventLog,
    round: u32,
    result: Option<GameResult>,
}

impl<D: DecisionProvider> Match<D> {
    /// Match with default participants.
    pub fn new(player_count: usize, decisions: D) -> Result<Self, EngineError> {
        Self::with_config(MatchConfig::new(player_count), decisions)
    }

    /// Match from an explicit configuration.
    pub fn with_config(config: MatchConfig, decisions: D) -> Result<Self, EngineError> {
        config.validate()?;
        let n = config.player_count;
        let defaults = config.defaults;

        Ok(Self {
            players: PlayerMap::new(n, |id| Participant::new(id, defaults)),
            matrix: BallMatrix::new(n),
            scheduler: PriorityScheduler::new(),
            selections: PlayerMap::with_default(n),
            preselections: PlayerMap::with_default(n),
            decisions,
            log: EventLog::new(),
            round: 0,
            result: None,
            config,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Rounds played so far.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Participant> {
        &self.players
    }

    #[must_use]
    pub fn participant(&self, player: PlayerId) -> &Participant {
        &self.players[player]
    }

    /// Direct access for setting up positions.
    pub fn participant_mut(&mut self, player: PlayerId) -> &mut Participant {
        &mut self.players[player]
    }

    /// Pre-selection waiting for next round, if any.
    #[must_use]
    pub fn preselection(&self, player: PlayerId) -> Option<&Selection> {
        self.preselections[player].as_ref()
    }

    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.log
    }

    pub fn decisions_mut(&mut self) -> &mut D {
        &mut self.decisions
    }

    /// Set once the match has ended.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    // === Driving ===

    /// Play rounds until the match ends.
    ///
    /// Fails with `RoundLimitReached` if `max_rounds` is configured and
    /// exhausted first.
    pub fn run(&mut self) -> Result<GameResult, EngineError> {
        loop {
            if let Some(result) = self.result {
                return Ok(result);
            }
            if let Some(max) = self.config.max_rounds {
                if self.round >= max {
                    warn!(rounds = self.round, "round limit reached");
                    return Err(EngineError::RoundLimitReached(max));
                }
            }
            self.play_round()?;
        }
    }

    /// Play a single round. Returns the result if the match ended.
    pub fn play_round(&mut self) -> Result<Option<GameResult>, EngineError> {
        if self.result.is_some() {
            return Ok(self.result);
        }

        self.round += 1;
        self.log.begin_round(self.round);
        self.log.push(MatchEvent::RoundStarted { round: self.round });
        info!(round = self.round, "round started");

        self.load_foresight();
        self.select_live();
        self.replicate_clones()?;
        self.resolve_copies();
        self.instantiate_selections()?;
        self.decay_statuses();

        {
            let mut ctx = ResolverContext::new(&mut self.players, &mut self.matrix, &mut self.log);
            self.scheduler.run_immediate(&mut ctx);
            self.scheduler.deduplicate(ctx.log);
            self.scheduler.run_remaining(&mut ctx);
            EffectResolver::deliver(&mut ctx);
            EffectResolver::resolve_soul_drains(&mut ctx);
        }

        self.selections.reset();
        self.matrix.clear();
        self.scheduler.clear();

        self.capture_foresight();

        Ok(self.check_termination())
    }

    // =========================================================================
    // Selection
    // =========================================================================

    fn load_foresight(&mut self) {
        for player in exposed_players(&self.players) {
            if let Some(selection) = self.preselections[player].take() {
                debug!(participant = %player, skill = %selection.skill, "foresight loaded");
                self.log.push(MatchEvent::ForesightLoaded {
                    player,
                    skill: selection.skill,
                    targets: selection.targets.clone(),
                });
                self.selections[player] = selection;
            }
        }
        self.preselections.reset();
    }

    fn select_live(&mut self) {
        let movable = movable_players(&self.players);

        for &player in &movable {
            let legal = legal_skills(&self.players[player]);
            self.selections[player].skill = self.choose_skill(player, &legal, DecisionStage::Live);
        }
        for &player in &movable {
            let skill = self.selections[player].skill;
            self.selections[player].targets =
                self.choose_targets(player, skill, DecisionStage::Live);
        }
    }

    fn replicate_clones(&mut self) -> Result<(), EngineError> {
        for player in available_players(&self.players) {
            let skill = self.selections[player].skill;
            if matches!(skill, SkillId::Idle | SkillId::Sharingan) {
                continue;
            }

            while self.players[player].shadow_clones() > 0
                && skill.cost() <= self.players[player].mp()
            {
                let remaining = self.players[player].adjust_timer(Timer::ShadowClones, -1);
                self.log.push(MatchEvent::CloneReplicated { player, skill, remaining });

                let targets = self.choose_targets(player, skill, DecisionStage::Clone);
                self.instantiate(player, skill, &targets, false)?;
            }
        }
        Ok(())
    }

    fn resolve_copies(&mut self) {
        for player in available_players(&self.players) {
            if self.selections[player].skill != SkillId::Sharingan {
                continue;
            }
            self.players[player].begin_copy();

            let current = PlayerMap::new(self.players.player_count(), |p| self.selections[p].skill);
            let imitable = imitable_skills(&self.players, &current, player);
            let copied = self.choose_skill(player, &imitable, DecisionStage::Copy);

            if copied == SkillId::Idle {
                self.players[player].take_copy_flag();
                self.selections[player] = Selection::idle();
                info!(participant = %player, "copy fizzled");
                self.log.push(MatchEvent::CopyFizzled { player });
                continue;
            }

            let targets = self.choose_targets(player, copied, DecisionStage::Copy);
            self.selections[player] = Selection::new(copied, targets);
            self.log.push(MatchEvent::CopyResolved { player, copied });
        }
    }

    /// Ask for a skill from `legal`, re-asking until the answer is legal.
    fn choose_skill(
        &mut self,
        player: PlayerId,
        legal: &[SkillId],
        stage: DecisionStage,
    ) -> SkillId {
        let skill = match legal {
            [] => SkillId::Idle,
            [only] => *only,
            _ => loop {
                let choice = self.decisions.choose_action(&self.players[player], legal);
                if legal.contains(&choice) {
                    break choice;
                }
                warn!(participant = %player, skill = %choice, ?stage, "illegal skill rejected");
                self.log.push(MatchEvent::DecisionRejected { player, stage });
            },
        };

        self.log.push(MatchEvent::ActionChosen { player, skill, stage });
        skill
    }

    /// Pick targets for `skill`, re-asking until the answer is legal.
    fn choose_targets(
        &mut self,
        player: PlayerId,
        skill: SkillId,
        stage: DecisionStage,
    ) -> Targets {
        let count = skill.target_count();
        if count == 0 {
            return Targets::new();
        }

        let legal = legal_targets(&self.players, player, skill);
        let targets: Targets = match legal.as_slice() {
            [] => {
                debug!(participant = %player, %skill, "no legal targets");
                self.log.push(MatchEvent::NoLegalTargets { player, skill });
                return Targets::new();
            }
            [only] => std::iter::repeat(*only).take(count).collect(),
            _ => loop {
                let choice = self.decisions.choose_targets(&self.players[player], &legal, count);
                if choice.len() == count && choice.iter().all(|t| legal.contains(t)) {
                    break choice.into_iter().collect();
                }
                warn!(participant = %player, %skill, ?choice, ?stage, "illegal targets rejected");
                self.log.push(MatchEvent::DecisionRejected { player, stage });
            },
        };

        self.log.push(MatchEvent::TargetsChosen {
            player,
            skill,
            targets: targets.clone(),
            stage,
        });
        targets
    }

    // =========================================================================
    // Instantiation
    // =========================================================================

    fn instantiate_selections(&mut self) -> Result<(), EngineError> {
        for player in available_players(&self.players) {
            let selection = self.selections[player].clone();
            if selection.is_idle() {
                continue;
            }
            self.instantiate(player, selection.skill, &selection.targets, true)?;
        }
        Ok(())
    }

    /// Build, charge and queue one action.
    ///
    /// A live instantiation consumes the copy mark and is charged the
    /// copy-action's cost if the mark was set.
    fn instantiate(
        &mut self,
        player: PlayerId,
        skill: SkillId,
        targets: &[PlayerId],
        live: bool,
    ) -> Result<(), EngineError> {
        let copying = live && self.players[player].take_copy_flag();

        let bound: Targets = if skill == SkillId::ChidoriCurrent {
            legal_targets(&self.players, player, skill).into_iter().collect()
        } else {
            targets.iter().copied().collect()
        };

        let Some(action) = Action::instantiate(skill, player, &bound)? else {
            warn!(participant = %player, %skill, "no targets, action dropped");
            self.log.push(MatchEvent::ActionDropped {
                player,
                skill,
                reason: DropReason::NoTargets,
            });
            return Ok(());
        };

        let cost = if copying { SkillId::Sharingan.cost() } else { skill.cost() };
        self.players[player].spend_resource(cost);
        debug!(%action, cost, "action queued");
        self.log.push(MatchEvent::ActionQueued { player, skill, cost_paid: cost });
        self.scheduler.queue(action);
        Ok(())
    }

    // =========================================================================
    // Round end
    // =========================================================================

    fn decay_statuses(&mut self) {
        for player in available_players(&self.players) {
            self.players[player].decay_statuses();
            self.log.push(MatchEvent::StatusesDecayed { player });
        }
    }

    fn capture_foresight(&mut self) {
        for player in exposed_players(&self.players) {
            let legal = legal_skills(&self.players[player]);
            let skill = self.choose_skill(player, &legal, DecisionStage::Foresight);
            let targets = self.choose_targets(player, skill, DecisionStage::Foresight);

            debug!(participant = %player, %skill, "foresight captured");
            self.log.push(MatchEvent::ForesightCaptured {
                player,
                skill,
                targets: targets.clone(),
            });
            self.preselections[player] = Some(Selection::new(skill, targets));
        }
    }

    fn check_termination(&mut self) -> Option<GameResult> {
        let available = available_players(&self.players);
        if available.len() > 1 {
            return None;
        }

        let result = available.first().map_or(GameResult::Draw, |p| GameResult::Winner(*p));
        info!(round = self.round, %result, "match ended");
        self.log.push(MatchEvent::MatchEnded { result });
        self.result = Some(result);
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ScriptedDecisions;

    fn p(n: u8) -> PlayerId {
        PlayerId::new(n)
    }

    #[test]
    fn test_rejects_single_player() {
        assert!(matches!(
            Match::new(1, ScriptedDecisions::new()),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_illegal_answer_is_reasked() {
        let script = ScriptedDecisions::new()
            .with_actions(p(0), [SkillId::HeavenlyTransfer, SkillId::Rasengan])
            .with_targets(p(0), [vec![p(0)], vec![p(1)]]);
        let mut game = Match::new(3, script).unwrap();
        game.participant_mut(p(0)).spend_resource(95);

        game.play_round().unwrap();

        let rejected = game
            .events()
            .events()
            .filter(|e| matches!(e, MatchEvent::DecisionRejected { player, .. } if *player == p(0)))
            .count();
        assert_eq!(rejected, 2);
        assert_eq!(game.participant(p(1)).hp(), 1);
    }

    #[test]
    fn test_copy_charges_copy_cost() {
        let script = ScriptedDecisions::new()
            .with_actions(p(0), [SkillId::Sharingan])
            .with_actions(p(1), [SkillId::Meditation])
            .with_actions(p(2), [SkillId::HeavenlyTransfer])
            .with_targets(p(2), [vec![p(1)]]);
        let mut game = Match::new(3, script).unwrap();

        game.play_round().unwrap();

        // Imitable: [Meditation, HeavenlyTransfer]; the fallback picks Meditation
        assert_eq!(game.participant(p(0)).mp(), 100 - 3 + 1);
        assert_eq!(game.participant(p(2)).mp(), 92);
        assert!(game.participant(p(1)).in_alternate_zone());
    }

    #[test]
    fn test_fizzled_copy_clears_mark() {
        let script = ScriptedDecisions::new()
            .with_actions(p(0), [SkillId::Sharingan, SkillId::Rasengan])
            .with_actions(p(1), [SkillId::Sharingan, SkillId::Meditation])
            .with_targets(p(0), [vec![p(1)]]);
        let mut game = Match::new(2, script).unwrap();

        game.play_round().unwrap();
        assert_eq!(game.participant(p(0)).mp(), 100);
        assert!(game
            .events()
            .for_round(1)
            .any(|e| matches!(e, MatchEvent::CopyFizzled { player } if *player == p(0))));

        game.play_round().unwrap();
        assert_eq!(game.participant(p(0)).mp(), 99);
    }

    #[test]
    fn test_shadow_clone_replays_skill() {
        let script = ScriptedDecisions::new()
            .with_actions(p(0), [SkillId::Rasengan])
            .with_targets(p(0), [vec![p(1)], vec![p(2)], vec![p(2)]]);
        let mut game = Match::new(3, script).unwrap();
        game.participant_mut(p(0)).adjust_timer(Timer::ShadowClones, 2);

        game.play_round().unwrap();

        assert_eq!(game.participant(p(0)).mp(), 97);
        assert_eq!(game.participant(p(1)).hp(), 1);
        assert_eq!(game.participant(p(2)).hp(), 0);
        assert!(!game.participant(p(2)).is_available());
        assert_eq!(game.participant(p(0)).shadow_clones(), 0);
    }

    #[test]
    fn test_exposure_forces_preselection() {
        let script = ScriptedDecisions::new()
            .with_actions(p(0), [SkillId::Byakugan])
            .with_targets(p(0), [vec![p(1)]])
            .with_actions(p(1), [SkillId::Meditation, SkillId::ShadowClone]);
        let mut game = Match::new(3, script).unwrap();

        game.play_round().unwrap();
        assert!(game.participant(p(1)).is_exposed());
        assert_eq!(
            game.preselection(p(1)).map(|s| s.skill),
            Some(SkillId::ShadowClone)
        );

        game.play_round().unwrap();
        // Decay runs before resolution, so the new clone survives the round
        assert_eq!(game.participant(p(1)).shadow_clones(), 1);
        assert!(!game.participant(p(1)).is_exposed());
        assert!(game.events().for_round(2).any(|e| matches!(
            e,
            MatchEvent::ForesightLoaded { player, skill: SkillId::ShadowClone, .. }
                if *player == p(1)
        )));
        assert_eq!(game.participant(p(1)).mp(), 101 - 2);
    }

    #[test]
    fn test_winner_declared() {
        let script = ScriptedDecisions::new()
            .with_actions(p(0), [SkillId::Rasenshuriken])
            .with_targets(p(0), [vec![p(1)]]);
        let mut game = Match::new(2, script).unwrap();

        assert_eq!(game.play_round().unwrap(), Some(GameResult::Winner(p(0))));
        assert_eq!(game.run().unwrap(), GameResult::Winner(p(0)));
        assert_eq!(game.round(), 1);
    }
}
