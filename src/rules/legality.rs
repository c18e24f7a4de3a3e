//! Legality queries.
//!
//! Stateless functions over the participant arena and the round's current
//! selections. All returned lists are sorted ascending, so a provider sees
//! the same options in the same order every time.

use crate::core::{Participant, PlayerId, PlayerMap};
use crate::skills::SkillId;

/// Participants that are alive or reanimated, in id order.
pub fn available_players(players: &PlayerMap<Participant>) -> Vec<PlayerId> {
    players
        .iter()
        .filter(|(_, p)| p.is_available())
        .map(|(id, _)| id)
        .collect()
}

/// Available participants that are currently exposed.
pub fn exposed_players(players: &PlayerMap<Participant>) -> Vec<PlayerId> {
    players
        .iter()
        .filter(|(_, p)| p.is_available() && p.is_exposed())
        .map(|(id, _)| id)
        .collect()
}

/// Available participants that choose live this round.
pub fn movable_players(players: &PlayerMap<Participant>) -> Vec<PlayerId> {
    players
        .iter()
        .filter(|(_, p)| p.is_available() && !p.is_exposed())
        .map(|(id, _)| id)
        .collect()
}

/// Skills `participant` may select.
///
/// An acupoint-sealed participant may only meditate. Otherwise every
/// affordable skill outside the path set, plus the whole path set while in
/// six-paths mode.
pub fn legal_skills(participant: &Participant) -> Vec<SkillId> {
    if participant.is_acupoint_sealed() {
        return vec![SkillId::Meditation];
    }

    let six_paths = participant.is_in_sixpaths_mode();
    SkillId::ALL
        .into_iter()
        .filter(|id| {
            if id.is_six_paths() {
                six_paths
            } else {
                id.cost() <= participant.mp()
            }
        })
        .collect()
}

/// Targets `source` may pick for `skill`.
///
/// Base set: available participants in the source's zone, other than the
/// source. Heal and reanimation add the source; reanimation adds
/// unavailable participants in the source's zone; heavenly transfer adds
/// every unavailable participant.
pub fn legal_targets(
    players: &PlayerMap<Participant>,
    source: PlayerId,
    skill: SkillId,
) -> Vec<PlayerId> {
    let src = &players[source];

    let mut targets: Vec<PlayerId> = players
        .iter()
        .filter(|(id, p)| *id != source && p.is_available() && p.shares_zone_with(src))
        .map(|(id, _)| id)
        .collect();

    match skill {
        SkillId::Heal => targets.push(source),
        SkillId::Reanimation => {
            targets.push(source);
            targets.extend(
                players
                    .iter()
                    .filter(|(_, p)| !p.is_available() && p.shares_zone_with(src))
                    .map(|(id, _)| id),
            );
        }
        SkillId::HeavenlyTransfer => {
            targets.extend(
                players
                    .iter()
                    .filter(|(_, p)| !p.is_available())
                    .map(|(id, _)| id),
            );
        }
        _ => {}
    }

    targets.sort_unstable();
    targets
}

/// Skills the copier may imitate this round.
///
/// The selections of available participants in the copier's zone, other
/// than the copier and anyone who also chose the copy-action. Duplicates
/// are kept, and `Idle` selections count.
pub fn imitable_skills(
    players: &PlayerMap<Participant>,
    selections: &PlayerMap<SkillId>,
    copier: PlayerId,
) -> Vec<SkillId> {
    let src = &players[copier];

    let mut skills: Vec<SkillId> = players
        .iter()
        .filter(|(id, p)| *id != copier && p.is_available() && p.shares_zone_with(src))
        .map(|(id, _)| selections[id])
        .filter(|skill| *skill != SkillId::Sharingan)
        .collect();

    skills.sort_unstable();
    skills
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ParticipantDefaults, Timer};

    fn arena(n: usize) -> PlayerMap<Participant> {
        PlayerMap::new(n, |id| Participant::new(id, ParticipantDefaults::default()))
    }

    fn p(n: u8) -> PlayerId {
        PlayerId::new(n)
    }

    #[test]
    fn test_sealed_may_only_meditate() {
        let mut players = arena(2);
        players[p(0)].adjust_timer(Timer::AcupointSeal, 1);
        assert_eq!(legal_skills(&players[p(0)]), vec![SkillId::Meditation]);
    }

    #[test]
    fn test_legal_skills_by_budget() {
        let mut players = arena(2);
        players[p(0)].spend_resource(99);
        let skills = legal_skills(&players[p(0)]);

        assert!(skills.contains(&SkillId::Rasengan));
        assert!(!skills.contains(&SkillId::Chidori));
        assert!(!skills.contains(&SkillId::ShinraTensei));
        assert!(skills.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_six_paths_unlock_path_skills() {
        let mut players = arena(2);
        players[p(0)].spend_resource(100);
        players[p(0)].adjust_timer(Timer::SixPaths, 2);
        let skills = legal_skills(&players[p(0)]);

        for id in SkillId::SIX_PATHS {
            assert!(skills.contains(&id));
        }
        assert!(skills.contains(&SkillId::Meditation));
        assert!(!skills.contains(&SkillId::Heal));
    }

    #[test]
    fn test_targets_exclude_self_and_other_zone() {
        let mut players = arena(4);
        players[p(3)].toggle_zone();
        assert_eq!(legal_targets(&players, p(0), SkillId::Rasengan), vec![p(1), p(2)]);
    }

    #[test]
    fn test_heal_may_target_self() {
        let players = arena(3);
        assert_eq!(legal_targets(&players, p(1), SkillId::Heal), vec![p(0), p(1), p(2)]);
    }

    #[test]
    fn test_reanimation_reaches_dead_in_zone() {
        let mut players = arena(4);
        players[p(2)].receive_damage(5);
        players[p(3)].receive_damage(5);
        players[p(3)].toggle_zone();

        assert_eq!(
            legal_targets(&players, p(0), SkillId::Reanimation),
            vec![p(0), p(1), p(2)]
        );
        assert_eq!(legal_targets(&players, p(0), SkillId::Rasengan), vec![p(1)]);
    }

    #[test]
    fn test_heavenly_transfer_reaches_dead_anywhere() {
        let mut players = arena(3);
        players[p(2)].receive_damage(5);
        players[p(2)].toggle_zone();
        assert_eq!(
            legal_targets(&players, p(0), SkillId::HeavenlyTransfer),
            vec![p(1), p(2)]
        );
    }

    #[test]
    fn test_imitable_skills() {
        let players = arena(4);
        let mut selections = PlayerMap::with_value(4, SkillId::Idle);
        selections[p(0)] = SkillId::Sharingan;
        selections[p(1)] = SkillId::Chidori;
        selections[p(2)] = SkillId::Sharingan;
        selections[p(3)] = SkillId::Rasengan;

        assert_eq!(
            imitable_skills(&players, &selections, p(0)),
            vec![SkillId::Rasengan, SkillId::Chidori]
        );
    }

    #[test]
    fn test_imitable_keeps_duplicates_and_idle() {
        let mut players = arena(4);
        players[p(3)].toggle_zone();
        let mut selections = PlayerMap::with_value(4, SkillId::Rasengan);
        selections[p(0)] = SkillId::Sharingan;
        selections[p(2)] = SkillId::Idle;

        assert_eq!(
            imitable_skills(&players, &selections, p(0)),
            vec![SkillId::Idle, SkillId::Rasengan]
        );

        selections[p(2)] = SkillId::Rasengan;
        assert_eq!(
            imitable_skills(&players, &selections, p(0)),
            vec![SkillId::Rasengan, SkillId::Rasengan]
        );
    }

    #[test]
    fn test_movable_excludes_exposed() {
        let mut players = arena(3);
        players[p(1)].reveal();
        players[p(2)].receive_damage(5);
        assert_eq!(movable_players(&players), vec![p(0)]);
        assert_eq!(exposed_players(&players), vec![p(1)]);
    }
}
