//! Effect resolution: the shared context skills mutate, and ball delivery.
//!
//! `ResolverContext` bundles the participant arena, the routing matrix and
//! the event log for the duration of one resolution pass. Health and
//! resource changes that should show up in the event log go through its
//! helpers rather than straight to `Participant`.

use tracing::debug;

use crate::core::{Participant, PlayerId, PlayerMap, Timer};
use crate::events::{EventLog, MatchEvent};

use super::{Ball, BallKind, BallMatrix};

/// Mutable view over everything resolution touches.
pub struct ResolverContext<'a> {
    pub players: &'a mut PlayerMap<Participant>,
    pub matrix: &'a mut BallMatrix,
    pub log: &'a mut EventLog,
}

impl<'a> ResolverContext<'a> {
    pub fn new(
        players: &'a mut PlayerMap<Participant>,
        matrix: &'a mut BallMatrix,
        log: &'a mut EventLog,
    ) -> Self {
        Self { players, matrix, log }
    }

    #[must_use]
    pub fn participant(&self, player: PlayerId) -> &Participant {
        &self.players[player]
    }

    /// Whether two participants currently share a zone.
    #[must_use]
    pub fn same_zone(&self, a: PlayerId, b: PlayerId) -> bool {
        self.players[a].shares_zone_with(&self.players[b])
    }

    /// Damage `player`, logging what was absorbed and any death.
    pub fn damage(&mut self, player: PlayerId, amount: i64) -> i64 {
        let p = &mut self.players[player];
        let pool = p.active_pool();
        let was_available = p.is_available();
        let absorbed = p.receive_damage(amount);
        let died = was_available && !p.is_available();

        if absorbed > 0 {
            self.log.push(MatchEvent::DamageTaken { player, amount: absorbed, pool });
        }
        if died {
            self.log.push(MatchEvent::Died { player, pool });
        }
        absorbed
    }

    /// Restore health on `player`'s active pool.
    pub fn heal(&mut self, player: PlayerId, amount: i64) {
        let hp = self.players[player].restore_health(amount);
        self.log.push(MatchEvent::HealthRestored { player, amount, hp });
    }

    /// Add to `player`'s resource pool.
    pub fn gain_resource(&mut self, player: PlayerId, amount: i64) {
        let mp = self.players[player].restore_resource(amount);
        self.log.push(MatchEvent::ResourceRestored { player, amount, mp });
    }

    /// Raise a status timer.
    pub fn raise_timer(&mut self, player: PlayerId, timer: Timer, by: i64) {
        let value = self.players[player].adjust_timer(timer, by);
        self.log.push(MatchEvent::TimerRaised { player, timer, value });
    }

    /// Queue a ball at its current endpoints.
    pub fn emit(&mut self, ball: Ball) {
        if let Some((source, target)) = ball.endpoints() {
            self.log.push(MatchEvent::BallQueued { source, target, kind: ball.kind });
            self.matrix.insert(source, target, ball);
        }
    }
}

/// Runs the delivery phase over a `ResolverContext`.
pub struct EffectResolver;

impl EffectResolver {
    /// Cancel opposing balls, then deliver every survivor in queue order.
    ///
    /// The matrix is empty afterwards.
    pub fn deliver(ctx: &mut ResolverContext) {
        for (i, j) in ctx.matrix.cancel_opposing() {
            debug!(first = %i, second = %j, "balls cancelled");
            ctx.log.push(MatchEvent::BallsCancelled { first: (i, j), second: (j, i) });
        }

        for (queue, ball) in ctx.matrix.drain() {
            Self::deliver_one(ctx, queue, &ball);
        }
    }

    /// Deliver a single ball that survived cancellation.
    pub fn deliver_one(ctx: &mut ResolverContext, queue: (PlayerId, PlayerId), ball: &Ball) {
        let Some((source, target)) = ball.endpoints() else {
            debug!(%ball, "ball spent");
            ctx.log.push(MatchEvent::BallSpent { queue, kind: ball.kind });
            return;
        };

        if !ctx.same_zone(source, target) {
            debug!(%ball, "ball missed, zones differ");
            ctx.log.push(MatchEvent::BallMissed { source, target, kind: ball.kind });
            return;
        }

        debug!(%ball, "ball hit");
        ctx.log.push(MatchEvent::BallHit { source, target, kind: ball.kind });

        match ball.kind {
            BallKind::Damage { amount, life_steal } => {
                let absorbed = ctx.damage(target, amount);
                if life_steal {
                    ctx.heal(source, absorbed);
                }
            }
            BallKind::Bind => ctx.raise_timer(target, Timer::Bind, 1),
            BallKind::SealAcupoint => ctx.raise_timer(target, Timer::AcupointSeal, 1),
            BallKind::Expose => {
                let already_exposed = ctx.players[target].charm(source);
                ctx.log.push(MatchEvent::Revealed {
                    player: target,
                    by: Some(source),
                    already_exposed,
                });
            }
            BallKind::StealSoul => {
                ctx.players[target].mark_soul_drained();
                let drained = ctx.players[target].mp();
                ctx.gain_resource(source, drained);
            }
        }
    }

    /// Zero the resource pool of every available participant drained this round.
    pub fn resolve_soul_drains(ctx: &mut ResolverContext) {
        let available: Vec<PlayerId> = ctx
            .players
            .iter()
            .filter(|(_, p)| p.is_available())
            .map(|(id, _)| id)
            .collect();

        for player in available {
            if ctx.players[player].resolve_soul_drain() {
                ctx.log.push(MatchEvent::SoulDrained { player });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ParticipantDefaults;
    use crate::skills::SkillId;

    fn arena(n: usize) -> PlayerMap<Participant> {
        PlayerMap::new(n, |id| Participant::new(id, ParticipantDefaults::default()))
    }

    fn p(n: u8) -> PlayerId {
        PlayerId::new(n)
    }

    #[test]
    fn test_life_steal_heals_absorbed_amount() {
        let mut players = arena(2);
        let mut matrix = BallMatrix::new(2);
        let mut log = EventLog::new();
        players[p(0)].receive_damage(1);

        let mut ctx = ResolverContext::new(&mut players, &mut matrix, &mut log);
        ctx.emit(Ball::new(SkillId::Chidori, BallKind::life_steal(1), 2, p(0), p(1)));
        EffectResolver::deliver(&mut ctx);

        assert_eq!(players[p(1)].hp(), 1);
        assert_eq!(players[p(0)].hp(), 2);
        assert!(matrix.is_empty());
    }

    #[test]
    fn test_zone_mismatch_misses() {
        let mut players = arena(2);
        let mut matrix = BallMatrix::new(2);
        let mut log = EventLog::new();

        let mut ctx = ResolverContext::new(&mut players, &mut matrix, &mut log);
        ctx.emit(Ball::new(SkillId::Rasengan, BallKind::damage(1), 1, p(0), p(1)));
        ctx.players[p(1)].toggle_zone();
        EffectResolver::deliver(&mut ctx);

        assert_eq!(players[p(1)].hp(), 2);
        assert!(log
            .events()
            .any(|e| matches!(e, MatchEvent::BallMissed { .. })));
    }

    #[test]
    fn test_steal_soul_reads_pool_at_delivery() {
        let mut players = arena(3);
        let mut matrix = BallMatrix::new(3);
        let mut log = EventLog::new();
        players[p(1)].spend_resource(90);

        let mut ctx = ResolverContext::new(&mut players, &mut matrix, &mut log);
        ctx.emit(Ball::new(SkillId::HumanPath, BallKind::StealSoul, 5, p(0), p(1)));
        ctx.emit(Ball::new(SkillId::HumanPath, BallKind::StealSoul, 5, p(2), p(1)));
        EffectResolver::deliver(&mut ctx);
        assert!(ctx.participant(p(1)).is_soul_drained());
        EffectResolver::resolve_soul_drains(&mut ctx);

        assert!(!players[p(1)].is_soul_drained());
        assert_eq!(players[p(0)].mp(), 110);
        assert_eq!(players[p(2)].mp(), 110);
        assert_eq!(players[p(1)].mp(), 0);
    }

    #[test]
    fn test_blocked_ball_is_spent() {
        let mut players = arena(2);
        let mut matrix = BallMatrix::new(2);
        let mut log = EventLog::new();

        let mut ball = Ball::new(SkillId::ShadowBinding, BallKind::Bind, 1, p(0), p(1));
        ball.target = None;
        matrix.insert(p(0), p(1), ball);

        let mut ctx = ResolverContext::new(&mut players, &mut matrix, &mut log);
        EffectResolver::deliver(&mut ctx);

        assert!(!players[p(1)].is_bound());
        assert!(log.events().any(|e| matches!(
            e,
            MatchEvent::BallSpent { queue, .. } if *queue == (p(0), p(1))
        )));
    }
}
