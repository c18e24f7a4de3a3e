//! Skills: the static catalog and instantiated actions.
//!
//! - [`SkillId`] / [`SkillInfo`]: the fixed table of ids, costs, target
//!   counts and tiers.
//! - [`Action`]: a skill bound to a source and targets for one round,
//!   resolved through a [`ResolverContext`](crate::effects::ResolverContext).

mod catalog;
mod skill;

pub use catalog::{SkillId, SkillInfo, Tier};
pub use skill::{
    Action, EmittingSkill, ImmediateSkill, RewriteSkill, Skill, StatusSkill, Targets,
    ZoneShiftSkill,
};
