//! Tests for enemy FSM transitions and perception memory.

#[cfg(test)]
mod tests {
    use super::super::fsm::{cooldown_ready, next_state, select_engagement_state, EnemyBrain, EnemyState};
    use crate::config::EnemySettings;
    use bevy::prelude::*;

    fn settings() -> EnemySettings {
        EnemySettings::default()
    }

    #[test]
    fn test_engagement_by_distance() {
        let s = settings();

        assert_eq!(select_engagement_state(1.0, &s), EnemyState::Attack);
        assert_eq!(select_engagement_state(3.0, &s), EnemyState::Chase); // между melee и min
        assert_eq!(select_engagement_state(10.0, &s), EnemyState::Shooting);
        assert_eq!(select_engagement_state(18.0, &s), EnemyState::Chase);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let s = settings();

        // Ровно melee_range - уже не Attack
        assert_eq!(select_engagement_state(2.0, &s), EnemyState::Chase);
        // Ровно shooting_min_range - не Shooting
        assert_eq!(select_engagement_state(4.0, &s), EnemyState::Chase);
        // Ровно shooting_range - не Shooting
        assert_eq!(select_engagement_state(15.0, &s), EnemyState::Chase);
    }

    #[test]
    fn test_memory_keeps_chase() {
        let s = settings();

        assert_eq!(next_state(EnemyState::Shooting, false, 30.0, Some(1000), &s), EnemyState::Chase);
        assert_eq!(next_state(EnemyState::Chase, false, 30.0, Some(4999), &s), EnemyState::Chase);
        // Память истекла
        assert_eq!(next_state(EnemyState::Chase, false, 30.0, Some(5000), &s), EnemyState::Patrol);
        // Нет памяти
        assert_eq!(next_state(EnemyState::Attack, false, 1.0, None, &s), EnemyState::Patrol);
        // Из патруля память не вытаскивает
        assert_eq!(next_state(EnemyState::Patrol, false, 10.0, Some(10), &s), EnemyState::Patrol);
    }

    #[test]
    fn test_transition_is_pure() {
        let s = settings();
        let inputs = [
            (EnemyState::Patrol, true, 1.5, None),
            (EnemyState::Chase, false, 8.0, Some(300)),
            (EnemyState::Shooting, true, 12.0, Some(0)),
            (EnemyState::Attack, false, 25.0, Some(6000)),
        ];

        for (state, visible, distance, age) in inputs {
            let first = next_state(state, visible, distance, age, &s);
            for _ in 0..10 {
                assert_eq!(next_state(state, visible, distance, age, &s), first);
            }
        }
    }

    #[test]
    fn test_perceive_remembers_and_forgets() {
        let s = settings();
        let mut brain = EnemyBrain::new(Vec3::ZERO);
        let player = Vec3::new(0.0, 1.7, -10.0);

        let change = brain.perceive(true, player, 10.0, 1000, &s);
        assert_eq!(change, Some((EnemyState::Patrol, EnemyState::Shooting)));
        assert_eq!(brain.last_seen_position, Some(player));
        assert_eq!(brain.last_seen_ms, Some(1000));

        // Потеряли из виду - chase к последней позиции
        assert_eq!(
            brain.perceive(false, player, 10.0, 3000, &s),
            Some((EnemyState::Shooting, EnemyState::Chase))
        );
        assert_eq!(brain.last_seen_position, Some(player));

        // Память истекла - патруль, позиция стёрта
        assert_eq!(
            brain.perceive(false, player, 10.0, 6000, &s),
            Some((EnemyState::Chase, EnemyState::Patrol))
        );
        assert_eq!(brain.last_seen_position, None);
        assert_eq!(brain.memory_age(6000), None);
    }

    #[test]
    fn test_perceive_no_change_returns_none() {
        let s = settings();
        let mut brain = EnemyBrain::new(Vec3::ZERO);
        assert_eq!(brain.perceive(false, Vec3::ONE, 50.0, 0, &s), None);
        assert_eq!(brain.state, EnemyState::Patrol);
    }

    #[test]
    fn test_cooldown_strict() {
        assert!(cooldown_ready(None, 0, 1500));
        assert!(!cooldown_ready(Some(1000), 2500, 1500));
        assert!(cooldown_ready(Some(1000), 2501, 1500));
    }
}
