//! The fixed skill table.
//!
//! Every skill has an id, a resource cost, a required target count and a
//! priority tier. `Idle` is the "nothing chosen / cannot act" sentinel and
//! is never instantiated.

use serde::{Deserialize, Serialize};

use crate::core::EngineError;

/// Priority tier. Lower tiers resolve first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Resolves before deduplication, even for unavailable sources.
    Immediate = 0,
    ZoneShift = 1,
    SelfStatus = 2,
    /// Emits balls into the routing matrix.
    EffectEmitting = 3,
    /// Rewrites balls already in the routing matrix.
    Rewrite = 4,
}

/// Skill identifier. Discriminants are the raw ids of the game table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum SkillId {
    Idle = -1,
    Meditation = 0,
    Heal = 1,
    Rasengan = 2,
    RevolvingHeaven = 3,
    ShadowBinding = 4,
    Byakugan = 5,
    TwinRasengan = 6,
    Chidori = 7,
    EightTrigramsPalms = 8,
    /// The "mind-swap": exposes its target and takes control of its next action.
    MindBodySwitch = 9,
    BloodPossession = 10,
    ShadowClone = 11,
    Rasenshuriken = 12,
    MirrorReturn = 13,
    /// The copy-action: replaced during selection by another participant's action.
    Sharingan = 14,
    ChidoriCurrent = 15,
    SixPathsMode = 16,
    ShinraTensei = 17,
    /// The mass-redirect: pulls every ball onto its user.
    Banshoutenin = 18,
    NarakaPath = 19,
    HumanPath = 20,
    AnimalPath = 21,
    AsuraPath = 22,
    PretaPath = 23,
    Reanimation = 24,
    DeadDemonSeal = 25,
    Kamui = 26,
    HeavenlyTransfer = 27,
}

/// Static description of a skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillInfo {
    pub id: SkillId,
    pub name: &'static str,
    pub cost: i64,
    pub target_count: usize,
    pub tier: Tier,
}

const fn info(
    id: SkillId,
    name: &'static str,
    cost: i64,
    target_count: usize,
    tier: Tier,
) -> SkillInfo {
    SkillInfo { id, name, cost, target_count, tier }
}

impl SkillId {
    /// Every selectable skill in id order (excludes `Idle`).
    pub const ALL: [SkillId; 28] = [
        SkillId::Meditation,
        SkillId::Heal,
        SkillId::Rasengan,
        SkillId::RevolvingHeaven,
        SkillId::ShadowBinding,
        SkillId::Byakugan,
        SkillId::TwinRasengan,
        SkillId::Chidori,
        SkillId::EightTrigramsPalms,
        SkillId::MindBodySwitch,
        SkillId::BloodPossession,
        SkillId::ShadowClone,
        SkillId::Rasenshuriken,
        SkillId::MirrorReturn,
        SkillId::Sharingan,
        SkillId::ChidoriCurrent,
        SkillId::SixPathsMode,
        SkillId::ShinraTensei,
        SkillId::Banshoutenin,
        SkillId::NarakaPath,
        SkillId::HumanPath,
        SkillId::AnimalPath,
        SkillId::AsuraPath,
        SkillId::PretaPath,
        SkillId::Reanimation,
        SkillId::DeadDemonSeal,
        SkillId::Kamui,
        SkillId::HeavenlyTransfer,
    ];

    /// Skills only selectable in six-paths mode.
    pub const SIX_PATHS: [SkillId; 7] = [
        SkillId::ShinraTensei,
        SkillId::Banshoutenin,
        SkillId::NarakaPath,
        SkillId::HumanPath,
        SkillId::AnimalPath,
        SkillId::AsuraPath,
        SkillId::PretaPath,
    ];

    /// Raw table id.
    #[must_use]
    pub const fn raw(self) -> i8 {
        self as i8
    }

    #[must_use]
    pub fn is_six_paths(self) -> bool {
        Self::SIX_PATHS.contains(&self)
    }

    /// Static table entry.
    #[must_use]
    pub const fn info(self) -> SkillInfo {
        use SkillId::*;
        use Tier::*;

        match self {
            Idle => info(Idle, "Idle", 0, 0, SelfStatus),
            Meditation => info(Meditation, "Meditation", 0, 0, SelfStatus),
            Heal => info(Heal, "Heal", 1, 1, SelfStatus),
            Rasengan => info(Rasengan, "Rasengan", 1, 1, EffectEmitting),
            RevolvingHeaven => info(RevolvingHeaven, "Revolving Heaven", 1, 0, Rewrite),
            ShadowBinding => info(ShadowBinding, "Shadow Binding", 1, 1, EffectEmitting),
            Byakugan => info(Byakugan, "Byakugan", 1, 1, SelfStatus),
            TwinRasengan => info(TwinRasengan, "Twin Rasengan", 2, 2, EffectEmitting),
            Chidori => info(Chidori, "Chidori", 2, 1, EffectEmitting),
            EightTrigramsPalms => info(
                EightTrigramsPalms,
                "Eight Trigrams Sixty-Four Palms",
                2,
                1,
                EffectEmitting,
            ),
            MindBodySwitch => info(MindBodySwitch, "Mind Body Switch", 2, 1, EffectEmitting),
            BloodPossession => info(
                BloodPossession,
                "Death-Controlling Possessed Blood",
                2,
                1,
                Immediate,
            ),
            ShadowClone => info(ShadowClone, "Shadow Clone", 2, 0, SelfStatus),
            Rasenshuriken => info(Rasenshuriken, "Rasenshuriken", 3, 1, EffectEmitting),
            MirrorReturn => info(MirrorReturn, "Mirror Return", 3, 0, Rewrite),
            Sharingan => info(Sharingan, "Sharingan", 3, 0, Immediate),
            ChidoriCurrent => info(ChidoriCurrent, "Chidori Current", 4, 0, EffectEmitting),
            SixPathsMode => info(SixPathsMode, "Six Paths Mode", 5, 0, SelfStatus),
            ShinraTensei => info(ShinraTensei, "Shinra Tensei", 0, 0, Rewrite),
            Banshoutenin => info(Banshoutenin, "Banshō Ten'in", 0, 0, Rewrite),
            NarakaPath => info(NarakaPath, "Naraka Path", 0, 0, SelfStatus),
            HumanPath => info(HumanPath, "Human Path", 0, 1, EffectEmitting),
            AnimalPath => info(AnimalPath, "Animal Path", 0, 0, SelfStatus),
            AsuraPath => info(AsuraPath, "Asura Path", 0, 4, EffectEmitting),
            PretaPath => info(PretaPath, "Preta Path", 0, 0, Rewrite),
            Reanimation => info(Reanimation, "Impure World Reincarnation", 6, 1, SelfStatus),
            DeadDemonSeal => info(DeadDemonSeal, "Dead Demon Consuming Seal", 7, 1, Immediate),
            Kamui => info(Kamui, "Kamui", 7, 0, ZoneShift),
            HeavenlyTransfer => info(HeavenlyTransfer, "Heavenly Transfer", 8, 1, ZoneShift),
        }
    }

    #[must_use]
    pub const fn cost(self) -> i64 {
        self.info().cost
    }

    #[must_use]
    pub const fn target_count(self) -> usize {
        self.info().target_count
    }

    #[must_use]
    pub const fn tier(self) -> Tier {
        self.info().tier
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.info().name
    }
}

impl TryFrom<i64> for SkillId {
    type Error = EngineError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if raw == -1 {
            return Ok(SkillId::Idle);
        }
        usize::try_from(raw)
            .ok()
            .and_then(|i| SkillId::ALL.get(i).copied())
            .ok_or(EngineError::UnknownSkill(raw))
    }
}

impl std::fmt::Display for SkillId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.name())
    }
}
