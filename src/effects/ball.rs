//! Effect packets ("balls").
//!
//! A ball is emitted by an effect-emitting skill and waits in the routing
//! matrix until delivery. Its endpoints are plain `PlayerId` values so
//! rewrites can null, swap, or replace them in place. A `None` target
//! marks the ball as blocked.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::skills::SkillId;

/// What a ball does on delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallKind {
    /// Damage the target. With `life_steal`, the source regains the amount
    /// actually absorbed.
    Damage { amount: i64, life_steal: bool },
    /// Target bind timer +1.
    Bind,
    /// Expose the target and record the source as its charmer.
    Expose,
    /// Target acupoint-seal timer +1.
    SealAcupoint,
    /// Drain the target's resource pool into the source.
    StealSoul,
}

impl BallKind {
    /// Plain damage without life-steal.
    #[must_use]
    pub const fn damage(amount: i64) -> Self {
        Self::Damage { amount, life_steal: false }
    }

    /// Damage that heals the source by the absorbed amount.
    #[must_use]
    pub const fn life_steal(amount: i64) -> Self {
        Self::Damage { amount, life_steal: true }
    }
}

/// An effect in flight from one participant to another.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    /// Skill that emitted the ball.
    pub skill: SkillId,
    pub kind: BallKind,
    /// Informational cost. Absorbed as resource by the preta path rewrite.
    pub cost: i64,
    pub source: Option<PlayerId>,
    pub target: Option<PlayerId>,
}

impl Ball {
    #[must_use]
    pub fn new(
        skill: SkillId,
        kind: BallKind,
        cost: i64,
        source: PlayerId,
        target: PlayerId,
    ) -> Self {
        Self {
            skill,
            kind,
            cost,
            source: Some(source),
            target: Some(target),
        }
    }

    /// Target not nulled by a rewrite.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.target.is_some()
    }

    /// Live and currently aimed at `player` by someone else.
    #[must_use]
    pub fn is_aimed_at(&self, player: PlayerId) -> bool {
        self.target == Some(player) && self.source != Some(player)
    }

    /// Both endpoints, if neither is absent.
    #[must_use]
    pub fn endpoints(&self) -> Option<(PlayerId, PlayerId)> {
        self.source.zip(self.target)
    }
}

impl std::fmt::Display for Ball {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.endpoints() {
            Some((source, target)) => write!(f, "{} {} -> {}", self.skill, source, target),
            None => write!(f, "{} (blocked)", self.skill),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aimed_at_excludes_own_balls() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);
        let ball = Ball::new(SkillId::Rasengan, BallKind::damage(1), 1, p0, p1);
        assert!(ball.is_aimed_at(p1));
        assert!(!ball.is_aimed_at(p0));

        // Redirected back onto its own source
        let mut own = ball.clone();
        own.target = Some(p0);
        assert!(!own.is_aimed_at(p0));
    }

    #[test]
    fn test_blocked_ball_has_no_endpoints() {
        let mut ball = Ball::new(
            SkillId::ShadowBinding,
            BallKind::Bind,
            1,
            PlayerId::new(2),
            PlayerId::new(0),
        );
        ball.target = None;
        assert!(!ball.is_live());
        assert!(!ball.is_aimed_at(PlayerId::new(0)));
        assert_eq!(ball.endpoints(), None);
        assert!(ball.to_string().ends_with("(blocked)"));
    }
}
