//! Match event types.
//!
//! One variant per resolution decision. Tests read these instead of parsing
//! log text, so variants carry ids and amounts, never formatted strings.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{HealthPool, PlayerId, Timer};
use crate::effects::BallKind;
use crate::rules::GameResult;
use crate::skills::SkillId;

/// Why a selected action never entered the schedule, or left it before running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropReason {
    /// The action needs targets and none were available.
    NoTargets,
    /// More than one mass-redirect was queued this round.
    DuplicateMassRedirect,
    /// Another mind-swap aimed at the same target this round.
    RepeatedMindSwapTarget,
}

/// Why a scheduled action ran with no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipReason {
    SourceUnavailable,
    ZoneMismatch,
}

/// How a rewrite changed a ball.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rewrite {
    /// Target nulled.
    Blocked,
    /// Source and target swapped.
    Reflected,
    /// Target replaced.
    Redirected,
}

/// Where a decision was requested from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionStage {
    Live,
    Clone,
    Copy,
    Foresight,
}

/// Something that happened during a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    RoundStarted {
        round: u32,
    },

    // === Selection ===
    ForesightLoaded {
        player: PlayerId,
        skill: SkillId,
        targets: SmallVec<[PlayerId; 4]>,
    },
    ActionChosen {
        player: PlayerId,
        skill: SkillId,
        stage: DecisionStage,
    },
    TargetsChosen {
        player: PlayerId,
        skill: SkillId,
        targets: SmallVec<[PlayerId; 4]>,
        stage: DecisionStage,
    },
    NoLegalTargets {
        player: PlayerId,
        skill: SkillId,
    },
    DecisionRejected {
        player: PlayerId,
        stage: DecisionStage,
    },
    CloneReplicated {
        player: PlayerId,
        skill: SkillId,
        remaining: u32,
    },
    CopyResolved {
        player: PlayerId,
        copied: SkillId,
    },
    CopyFizzled {
        player: PlayerId,
    },
    ForesightCaptured {
        player: PlayerId,
        skill: SkillId,
        targets: SmallVec<[PlayerId; 4]>,
    },

    // === Scheduling ===
    ActionQueued {
        player: PlayerId,
        skill: SkillId,
        cost_paid: i64,
    },
    ActionDropped {
        player: PlayerId,
        skill: SkillId,
        reason: DropReason,
    },
    ActionSkipped {
        player: PlayerId,
        skill: SkillId,
        reason: SkipReason,
    },
    ActionResolved {
        player: PlayerId,
        skill: SkillId,
    },

    // === Participant state ===
    DamageTaken {
        player: PlayerId,
        amount: i64,
        pool: HealthPool,
    },
    Died {
        player: PlayerId,
        pool: HealthPool,
    },
    HealthRestored {
        player: PlayerId,
        amount: i64,
        hp: i64,
    },
    MaxHealthRaised {
        player: PlayerId,
        cap: i64,
    },
    ResourceRestored {
        player: PlayerId,
        amount: i64,
        mp: i64,
    },
    TimerRaised {
        player: PlayerId,
        timer: Timer,
        value: u32,
    },
    Revealed {
        player: PlayerId,
        by: Option<PlayerId>,
        already_exposed: bool,
    },
    Sealed {
        player: PlayerId,
    },
    Reanimated {
        player: PlayerId,
    },
    ReanimationFailed {
        player: PlayerId,
    },
    ZoneShifted {
        player: PlayerId,
        in_alternate_zone: bool,
    },
    StatusesDecayed {
        player: PlayerId,
    },
    SoulDrained {
        player: PlayerId,
    },

    // === Balls ===
    BallQueued {
        source: PlayerId,
        target: PlayerId,
        kind: BallKind,
    },
    BallsCancelled {
        first: (PlayerId, PlayerId),
        second: (PlayerId, PlayerId),
    },
    BallRewritten {
        by: PlayerId,
        queue: (PlayerId, PlayerId),
        rewrite: Rewrite,
        source: Option<PlayerId>,
        target: Option<PlayerId>,
    },
    BallSpent {
        queue: (PlayerId, PlayerId),
        kind: BallKind,
    },
    BallMissed {
        source: PlayerId,
        target: PlayerId,
        kind: BallKind,
    },
    BallHit {
        source: PlayerId,
        target: PlayerId,
        kind: BallKind,
    },

    MatchEnded {
        result: GameResult,
    },
}
