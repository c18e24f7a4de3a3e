//! A participant's choice for one round.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::skills::{SkillId, Targets};

/// Skill id plus the targets picked for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub skill: SkillId,
    pub targets: Targets,
}

impl Selection {
    pub fn new(skill: SkillId, targets: impl IntoIterator<Item = PlayerId>) -> Self {
        Self {
            skill,
            targets: targets.into_iter().collect(),
        }
    }

    /// Nothing chosen.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.skill == SkillId::Idle
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            skill: SkillId::Idle,
            targets: Targets::new(),
        }
    }
}
