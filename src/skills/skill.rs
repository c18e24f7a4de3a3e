//! Instantiated actions and their resolution.
//!
//! An [`Action`] is one participant's skill for one round, with its targets
//! already bound. The payload is a closed sum over the five tiers; each
//! tier has its own resolution function, and [`Action::resolve`] is the
//! single dispatch point.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{EngineError, PlayerId, Timer};
use crate::effects::{Ball, BallKind, ResolverContext};
use crate::events::{MatchEvent, Rewrite, SkipReason};

use super::{SkillId, Tier};

/// Target list. Four covers every skill but the chidori current.
pub type Targets = SmallVec<[PlayerId; 4]>;

/// Tier 0. Runs before deduplication, whatever the source's state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImmediateSkill {
    BloodPossession { target: PlayerId },
    DeadDemonSeal { target: PlayerId },
}

/// Tier 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneShiftSkill {
    Kamui,
    HeavenlyTransfer { target: PlayerId },
}

/// Tier 2. Direct state changes on the source or one target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusSkill {
    Meditation,
    Heal { target: PlayerId },
    Byakugan { target: PlayerId },
    ShadowClone,
    SixPathsMode,
    NarakaPath,
    AnimalPath,
    Reanimation { target: PlayerId },
}

/// Tier 3. Emits balls into the routing matrix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmittingSkill {
    Rasengan { target: PlayerId },
    ShadowBinding { target: PlayerId },
    TwinRasengan { targets: [PlayerId; 2] },
    Chidori { target: PlayerId },
    EightTrigramsPalms { target: PlayerId },
    MindBodySwitch { target: PlayerId },
    Rasenshuriken { target: PlayerId },
    ChidoriCurrent { targets: Targets },
    HumanPath { target: PlayerId },
    AsuraPath { targets: [PlayerId; 4] },
}

/// Tier 4. Mutates balls already in the matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewriteSkill {
    RevolvingHeaven,
    MirrorReturn,
    ShinraTensei,
    Banshoutenin,
    PretaPath,
}

/// Tier-tagged skill payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Skill {
    Immediate(ImmediateSkill),
    ZoneShift(ZoneShiftSkill),
    Status(StatusSkill),
    Emitting(EmittingSkill),
    Rewrite(RewriteSkill),
}

impl Skill {
    /// Bind `targets` to the skill `id`.
    ///
    /// Returns `Ok(None)` when fewer targets were supplied than the skill
    /// needs. `Idle` and the copy-action have no payload and are rejected.
    pub fn build(id: SkillId, targets: &[PlayerId]) -> Result<Option<Self>, EngineError> {
        if targets.len() < id.target_count() {
            return Ok(None);
        }
        let t = |i: usize| targets[i];

        let skill = match id {
            SkillId::Idle | SkillId::Sharingan => return Err(EngineError::NotInstantiable(id)),

            SkillId::BloodPossession => {
                Skill::Immediate(ImmediateSkill::BloodPossession { target: t(0) })
            }
            SkillId::DeadDemonSeal => {
                Skill::Immediate(ImmediateSkill::DeadDemonSeal { target: t(0) })
            }

            SkillId::Kamui => Skill::ZoneShift(ZoneShiftSkill::Kamui),
            SkillId::HeavenlyTransfer => {
                Skill::ZoneShift(ZoneShiftSkill::HeavenlyTransfer { target: t(0) })
            }

            SkillId::Meditation => Skill::Status(StatusSkill::Meditation),
            SkillId::Heal => Skill::Status(StatusSkill::Heal { target: t(0) }),
            SkillId::Byakugan => Skill::Status(StatusSkill::Byakugan { target: t(0) }),
            SkillId::ShadowClone => Skill::Status(StatusSkill::ShadowClone),
            SkillId::SixPathsMode => Skill::Status(StatusSkill::SixPathsMode),
            SkillId::NarakaPath => Skill::Status(StatusSkill::NarakaPath),
            SkillId::AnimalPath => Skill::Status(StatusSkill::AnimalPath),
            SkillId::Reanimation => Skill::Status(StatusSkill::Reanimation { target: t(0) }),

            SkillId::Rasengan => Skill::Emitting(EmittingSkill::Rasengan { target: t(0) }),
            SkillId::ShadowBinding => {
                Skill::Emitting(EmittingSkill::ShadowBinding { target: t(0) })
            }
            SkillId::TwinRasengan => {
                Skill::Emitting(EmittingSkill::TwinRasengan { targets: [t(0), t(1)] })
            }
            SkillId::Chidori => Skill::Emitting(EmittingSkill::Chidori { target: t(0) }),
            SkillId::EightTrigramsPalms => {
                Skill::Emitting(EmittingSkill::EightTrigramsPalms { target: t(0) })
            }
            SkillId::MindBodySwitch => {
                Skill::Emitting(EmittingSkill::MindBodySwitch { target: t(0) })
            }
            SkillId::Rasenshuriken => {
                Skill::Emitting(EmittingSkill::Rasenshuriken { target: t(0) })
            }
            SkillId::ChidoriCurrent => Skill::Emitting(EmittingSkill::ChidoriCurrent {
                targets: targets.iter().copied().collect(),
            }),
            SkillId::HumanPath => Skill::Emitting(EmittingSkill::HumanPath { target: t(0) }),
            SkillId::AsuraPath => Skill::Emitting(EmittingSkill::AsuraPath {
                targets: [t(0), t(1), t(2), t(3)],
            }),

            SkillId::RevolvingHeaven => Skill::Rewrite(RewriteSkill::RevolvingHeaven),
            SkillId::MirrorReturn => Skill::Rewrite(RewriteSkill::MirrorReturn),
            SkillId::ShinraTensei => Skill::Rewrite(RewriteSkill::ShinraTensei),
            SkillId::Banshoutenin => Skill::Rewrite(RewriteSkill::Banshoutenin),
            SkillId::PretaPath => Skill::Rewrite(RewriteSkill::PretaPath),
        };

        Ok(Some(skill))
    }

    /// The catalog id this payload was built from.
    #[must_use]
    pub fn id(&self) -> SkillId {
        match self {
            Skill::Immediate(s) => match s {
                ImmediateSkill::BloodPossession { .. } => SkillId::BloodPossession,
                ImmediateSkill::DeadDemonSeal { .. } => SkillId::DeadDemonSeal,
            },
            Skill::ZoneShift(s) => match s {
                ZoneShiftSkill::Kamui => SkillId::Kamui,
                ZoneShiftSkill::HeavenlyTransfer { .. } => SkillId::HeavenlyTransfer,
            },
            Skill::Status(s) => match s {
                StatusSkill::Meditation => SkillId::Meditation,
                StatusSkill::Heal { .. } => SkillId::Heal,
                StatusSkill::Byakugan { .. } => SkillId::Byakugan,
                StatusSkill::ShadowClone => SkillId::ShadowClone,
                StatusSkill::SixPathsMode => SkillId::SixPathsMode,
                StatusSkill::NarakaPath => SkillId::NarakaPath,
                StatusSkill::AnimalPath => SkillId::AnimalPath,
                StatusSkill::Reanimation { .. } => SkillId::Reanimation,
            },
            Skill::Emitting(s) => match s {
                EmittingSkill::Rasengan { .. } => SkillId::Rasengan,
                EmittingSkill::ShadowBinding { .. } => SkillId::ShadowBinding,
                EmittingSkill::TwinRasengan { .. } => SkillId::TwinRasengan,
                EmittingSkill::Chidori { .. } => SkillId::Chidori,
                EmittingSkill::EightTrigramsPalms { .. } => SkillId::EightTrigramsPalms,
                EmittingSkill::MindBodySwitch { .. } => SkillId::MindBodySwitch,
                EmittingSkill::Rasenshuriken { .. } => SkillId::Rasenshuriken,
                EmittingSkill::ChidoriCurrent { .. } => SkillId::ChidoriCurrent,
                EmittingSkill::HumanPath { .. } => SkillId::HumanPath,
                EmittingSkill::AsuraPath { .. } => SkillId::AsuraPath,
            },
            Skill::Rewrite(s) => match s {
                RewriteSkill::RevolvingHeaven => SkillId::RevolvingHeaven,
                RewriteSkill::MirrorReturn => SkillId::MirrorReturn,
                RewriteSkill::ShinraTensei => SkillId::ShinraTensei,
                RewriteSkill::Banshoutenin => SkillId::Banshoutenin,
                RewriteSkill::PretaPath => SkillId::PretaPath,
            },
        }
    }

    #[must_use]
    pub fn tier(&self) -> Tier {
        match self {
            Skill::Immediate(_) => Tier::Immediate,
            Skill::ZoneShift(_) => Tier::ZoneShift,
            Skill::Status(_) => Tier::SelfStatus,
            Skill::Emitting(_) => Tier::EffectEmitting,
            Skill::Rewrite(_) => Tier::Rewrite,
        }
    }

    /// Target whose zone must match the source's for the skill to run.
    #[must_use]
    pub fn zone_checked_target(&self) -> Option<PlayerId> {
        match self {
            Skill::Status(
                StatusSkill::Heal { target }
                | StatusSkill::Byakugan { target }
                | StatusSkill::Reanimation { target },
            ) => Some(*target),
            _ => None,
        }
    }

    /// The mind-swap target, for deduplication.
    #[must_use]
    pub fn mind_swap_target(&self) -> Option<PlayerId> {
        match self {
            Skill::Emitting(EmittingSkill::MindBodySwitch { target }) => Some(*target),
            _ => None,
        }
    }
}

/// A skill bound to its source for one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub source: PlayerId,
    pub skill: Skill,
}

impl Action {
    /// Build an action. See [`Skill::build`].
    pub fn instantiate(
        id: SkillId,
        source: PlayerId,
        targets: &[PlayerId],
    ) -> Result<Option<Self>, EngineError> {
        Ok(Skill::build(id, targets)?.map(|skill| Self { source, skill }))
    }

    #[must_use]
    pub fn id(&self) -> SkillId {
        self.skill.id()
    }

    #[must_use]
    pub fn tier(&self) -> Tier {
        self.skill.tier()
    }

    #[must_use]
    pub fn cost(&self) -> i64 {
        self.id().cost()
    }

    /// Apply the action.
    ///
    /// Immediate actions always run. Every other tier is skipped when the
    /// source is unavailable, and zone-checked status skills are skipped
    /// when source and target are in different zones.
    pub fn resolve(&self, ctx: &mut ResolverContext) {
        let source = self.source;
        let id = self.id();

        if let Skill::Immediate(skill) = &self.skill {
            resolve_immediate(*skill, source, ctx);
            ctx.log.push(MatchEvent::ActionResolved { player: source, skill: id });
            return;
        }

        if !ctx.participant(source).is_available() {
            debug!(participant = %source, skill = %id, "source unavailable, skipped");
            ctx.log.push(MatchEvent::ActionSkipped {
                player: source,
                skill: id,
                reason: SkipReason::SourceUnavailable,
            });
            return;
        }

        if let Some(target) = self.skill.zone_checked_target() {
            if !ctx.same_zone(source, target) {
                debug!(participant = %source, skill = %id, "zones differ, skipped");
                ctx.log.push(MatchEvent::ActionSkipped {
                    player: source,
                    skill: id,
                    reason: SkipReason::ZoneMismatch,
                });
                return;
            }
        }

        match &self.skill {
            Skill::Immediate(_) => {}
            Skill::ZoneShift(skill) => resolve_zone_shift(*skill, source, ctx),
            Skill::Status(skill) => resolve_status(*skill, source, ctx),
            Skill::Emitting(skill) => resolve_emitting(skill, id, source, ctx),
            Skill::Rewrite(skill) => resolve_rewrite(*skill, source, ctx),
        }
        ctx.log.push(MatchEvent::ActionResolved { player: source, skill: id });
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} by {}", self.id(), self.source)
    }
}

// =============================================================================
// Per-tier resolution
// =============================================================================

fn resolve_immediate(skill: ImmediateSkill, source: PlayerId, ctx: &mut ResolverContext) {
    match skill {
        ImmediateSkill::BloodPossession { target } => {
            ctx.damage(source, 1);
            ctx.damage(target, 1);
        }
        ImmediateSkill::DeadDemonSeal { target } => {
            for player in [source, target] {
                ctx.players[player].permanently_seal();
                ctx.log.push(MatchEvent::Sealed { player });
            }
        }
    }
}

fn resolve_zone_shift(skill: ZoneShiftSkill, source: PlayerId, ctx: &mut ResolverContext) {
    let player = match skill {
        ZoneShiftSkill::Kamui => source,
        ZoneShiftSkill::HeavenlyTransfer { target } => target,
    };
    let in_alternate_zone = ctx.players[player].toggle_zone();
    ctx.log.push(MatchEvent::ZoneShifted { player, in_alternate_zone });
}

fn resolve_status(skill: StatusSkill, source: PlayerId, ctx: &mut ResolverContext) {
    match skill {
        StatusSkill::Meditation => ctx.gain_resource(source, 1),
        StatusSkill::Heal { target } => ctx.heal(target, 1),
        StatusSkill::Byakugan { target } => {
            let already_exposed = ctx.players[target].reveal();
            ctx.log.push(MatchEvent::Revealed { player: target, by: None, already_exposed });
        }
        StatusSkill::ShadowClone => ctx.raise_timer(source, Timer::ShadowClones, 1),
        StatusSkill::SixPathsMode => ctx.raise_timer(source, Timer::SixPaths, 2),
        StatusSkill::NarakaPath => {
            let max_hp = ctx.participant(source).max_hp();
            ctx.heal(source, max_hp);
        }
        StatusSkill::AnimalPath => {
            let cap = ctx.players[source].raise_max_health();
            ctx.log.push(MatchEvent::MaxHealthRaised { player: source, cap });
        }
        StatusSkill::Reanimation { target } => {
            if ctx.players[target].reanimate() {
                ctx.log.push(MatchEvent::Reanimated { player: target });
            } else {
                ctx.log.push(MatchEvent::ReanimationFailed { player: target });
            }
        }
    }
}

fn resolve_emitting(
    skill: &EmittingSkill,
    id: SkillId,
    source: PlayerId,
    ctx: &mut ResolverContext,
) {
    let ball =
        |kind: BallKind, cost: i64, target: PlayerId| Ball::new(id, kind, cost, source, target);

    match skill {
        EmittingSkill::Rasengan { target } => ctx.emit(ball(BallKind::damage(1), 1, *target)),
        EmittingSkill::ShadowBinding { target } => ctx.emit(ball(BallKind::Bind, 1, *target)),
        EmittingSkill::TwinRasengan { targets } => {
            for target in targets {
                ctx.emit(ball(BallKind::damage(1), 1, *target));
            }
        }
        EmittingSkill::Chidori { target } => ctx.emit(ball(BallKind::life_steal(1), 2, *target)),
        EmittingSkill::EightTrigramsPalms { target } => {
            ctx.emit(ball(BallKind::damage(1), 1, *target));
            ctx.emit(ball(BallKind::SealAcupoint, 1, *target));
        }
        EmittingSkill::MindBodySwitch { target } => ctx.emit(ball(BallKind::Expose, 2, *target)),
        EmittingSkill::Rasenshuriken { target } => {
            ctx.damage(source, 1);
            ctx.emit(ball(BallKind::damage(3), 3, *target));
        }
        EmittingSkill::ChidoriCurrent { targets } => {
            for target in targets {
                ctx.emit(ball(BallKind::life_steal(1), 1, *target));
            }
        }
        EmittingSkill::HumanPath { target } => ctx.emit(ball(BallKind::StealSoul, 5, *target)),
        EmittingSkill::AsuraPath { targets } => {
            for target in targets {
                ctx.emit(ball(BallKind::damage(1), 1, *target));
            }
        }
    }
}

fn resolve_rewrite(skill: RewriteSkill, source: PlayerId, ctx: &mut ResolverContext) {
    let mut absorbed = 0;
    let mut rewritten = Vec::new();

    for (queue, ball) in ctx.matrix.iter_mut() {
        let rewrite = match skill {
            RewriteSkill::RevolvingHeaven | RewriteSkill::PretaPath if ball.is_aimed_at(source) => {
                ball.target = None;
                if skill == RewriteSkill::PretaPath {
                    absorbed += ball.cost;
                }
                Rewrite::Blocked
            }
            RewriteSkill::MirrorReturn if ball.is_aimed_at(source) => {
                std::mem::swap(&mut ball.source, &mut ball.target);
                Rewrite::Reflected
            }
            RewriteSkill::ShinraTensei if ball.is_live() => {
                ball.target = ball.source;
                Rewrite::Redirected
            }
            RewriteSkill::Banshoutenin if ball.is_live() => {
                ball.target = Some(source);
                Rewrite::Redirected
            }
            _ => continue,
        };
        rewritten.push(MatchEvent::BallRewritten {
            by: source,
            queue,
            rewrite,
            source: ball.source,
            target: ball.target,
        });
    }

    debug!(participant = %source, count = rewritten.len(), "balls rewritten");
    for event in rewritten {
        ctx.log.push(event);
    }
    if absorbed > 0 {
        ctx.gain_resource(source, absorbed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Participant, ParticipantDefaults, PlayerMap};
    use crate::effects::BallMatrix;
    use crate::events::EventLog;

    fn p(n: u8) -> PlayerId {
        PlayerId::new(n)
    }

    struct Fixture {
        players: PlayerMap<Participant>,
        matrix: BallMatrix,
        log: EventLog,
    }

    impl Fixture {
        fn new(n: usize) -> Self {
            Self {
                players: PlayerMap::new(n, |id| {
                    Participant::new(id, ParticipantDefaults::default())
                }),
                matrix: BallMatrix::new(n),
                log: EventLog::new(),
            }
        }

        fn run(&mut self, id: SkillId, source: u8, targets: &[PlayerId]) {
            let action = Action::instantiate(id, p(source), targets).unwrap().unwrap();
            let mut ctx = ResolverContext::new(&mut self.players, &mut self.matrix, &mut self.log);
            action.resolve(&mut ctx);
        }
    }

    #[test]
    fn test_build_rejects_non_instantiable() {
        assert_eq!(
            Skill::build(SkillId::Idle, &[]),
            Err(EngineError::NotInstantiable(SkillId::Idle))
        );
        assert_eq!(
            Skill::build(SkillId::Sharingan, &[]),
            Err(EngineError::NotInstantiable(SkillId::Sharingan))
        );
    }

    #[test]
    fn test_build_without_targets_yields_nothing() {
        assert_eq!(Skill::build(SkillId::Rasengan, &[]), Ok(None));
        assert_eq!(Skill::build(SkillId::TwinRasengan, &[p(1)]), Ok(None));
    }

    #[test]
    fn test_id_round_trips_through_build() {
        let targets = [p(1), p(2), p(1), p(2)];
        for id in SkillId::ALL {
            if id == SkillId::Sharingan {
                continue;
            }
            let skill = Skill::build(id, &targets).unwrap().unwrap();
            assert_eq!(skill.id(), id);
            assert_eq!(skill.tier(), id.tier());
        }
    }

    #[test]
    fn test_unavailable_source_is_skipped() {
        let mut fx = Fixture::new(2);
        fx.players[p(0)].receive_damage(10);
        fx.run(SkillId::Rasengan, 0, &[p(1)]);

        assert!(fx.matrix.is_empty());
        assert!(fx.log.events().any(|e| matches!(
            e,
            MatchEvent::ActionSkipped { reason: SkipReason::SourceUnavailable, .. }
        )));
    }

    #[test]
    fn test_immediate_runs_for_unavailable_source() {
        let mut fx = Fixture::new(2);
        fx.players[p(0)].receive_damage(10);
        fx.run(SkillId::BloodPossession, 0, &[p(1)]);
        assert_eq!(fx.players[p(1)].hp(), 1);
    }

    #[test]
    fn test_heal_across_zones_is_skipped() {
        let mut fx = Fixture::new(2);
        fx.players[p(1)].receive_damage(1);
        fx.players[p(1)].toggle_zone();
        fx.run(SkillId::Heal, 0, &[p(1)]);
        assert_eq!(fx.players[p(1)].hp(), 1);
    }

    #[test]
    fn test_rasenshuriken_costs_source_health() {
        let mut fx = Fixture::new(2);
        fx.run(SkillId::Rasenshuriken, 0, &[p(1)]);
        assert_eq!(fx.players[p(0)].hp(), 1);
        let queue = fx.matrix.queue(p(0), p(1));
        assert_eq!(queue[0].kind, BallKind::damage(3));
    }

    #[test]
    fn test_revolving_heaven_blocks_incoming_only() {
        let mut fx = Fixture::new(3);
        fx.run(SkillId::Rasengan, 1, &[p(0)]);
        fx.run(SkillId::Rasengan, 0, &[p(2)]);
        fx.run(SkillId::RevolvingHeaven, 0, &[]);

        assert_eq!(fx.matrix.queue(p(1), p(0))[0].target, None);
        assert_eq!(fx.matrix.queue(p(0), p(2))[0].target, Some(p(2)));
    }

    #[test]
    fn test_mirror_return_swaps_endpoints() {
        let mut fx = Fixture::new(2);
        fx.run(SkillId::ShadowBinding, 1, &[p(0)]);
        fx.run(SkillId::MirrorReturn, 0, &[]);

        let ball = &fx.matrix.queue(p(1), p(0))[0];
        assert_eq!(ball.source, Some(p(0)));
        assert_eq!(ball.target, Some(p(1)));
    }

    #[test]
    fn test_preta_path_absorbs_costs() {
        let mut fx = Fixture::new(3);
        fx.run(SkillId::Chidori, 1, &[p(0)]);
        fx.run(SkillId::EightTrigramsPalms, 2, &[p(0)]);
        let before = fx.players[p(0)].mp();
        fx.run(SkillId::PretaPath, 0, &[]);

        assert_eq!(fx.players[p(0)].mp(), before + 4);
        assert!(fx.matrix.iter().all(|(_, b)| !b.is_live()));
    }

    #[test]
    fn test_naraka_path_restores_to_cap() {
        let mut fx = Fixture::new(2);
        fx.players[p(0)].receive_damage(1);
        fx.run(SkillId::NarakaPath, 0, &[]);
        assert_eq!(fx.players[p(0)].hp(), 4);
    }
}
