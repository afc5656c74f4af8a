//! Tests for line-of-sight and path-clearance queries.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::perception::{can_see_player, is_path_clear, EYE_HEIGHT, PATH_PROBE_HEIGHT};
    use super::super::raycast::{CollisionWorld, RayIntersect};
    use super::super::test_support::{entities, hit, ScriptedRays};
    use crate::components::SceneNode;

    #[test]
    fn test_visible_without_obstacles() {
        let rays = ScriptedRays::default();
        let agent = Vec3::ZERO;
        let player = Vec3::new(0.0, 0.0, -10.0);

        assert!(can_see_player(&rays, agent, player, &[], 20.0));

        // Луч идёт от глаз агента
        let calls = rays.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, Vec3::Y * EYE_HEIGHT);
    }

    #[test]
    fn test_obstacle_halfway_blocks() {
        let wall = entities(1)[0];
        let rays = ScriptedRays::with_hits(vec![hit(wall, SceneNode::Plain, 5.0)]);

        // 5 < 10 − 0.5 → не видно
        assert!(!can_see_player(&rays, Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0), &[wall], 20.0));
    }

    #[test]
    fn test_obstacle_near_player_distance_does_not_block() {
        let wall = entities(1)[0];

        for distance in [9.6, 9.9, 10.2] {
            let rays = ScriptedRays::with_hits(vec![hit(wall, SceneNode::Plain, distance)]);
            assert!(
                can_see_player(&rays, Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0), &[wall], 20.0),
                "hit на {} не должен блокировать",
                distance
            );
        }
    }

    #[test]
    fn test_beyond_sight_range_rejected_without_cast() {
        let rays = ScriptedRays::default();
        assert!(!can_see_player(&rays, Vec3::ZERO, Vec3::new(0.0, 0.0, -25.0), &[], 20.0));
        assert!(rays.calls.borrow().is_empty());
    }

    #[test]
    fn test_path_clear_probe() {
        let wall = entities(1)[0];
        let rays = ScriptedRays::with_hits(vec![hit(wall, SceneNode::Plain, 2.5)]);

        assert!(!is_path_clear(&rays, Vec3::ZERO, Vec3::X, 3.0, &[wall]));
        assert!(is_path_clear(&rays, Vec3::ZERO, Vec3::X, 2.0, &[wall]));
        // Пустой список препятствий - свободно
        assert!(is_path_clear(&rays, Vec3::ZERO, Vec3::X, 3.0, &[]));

        let calls = rays.calls.borrow();
        assert_eq!(calls[0].0, Vec3::Y * PATH_PROBE_HEIGHT);
    }

    #[test]
    fn test_line_of_sight_with_real_boxes() {
        let ids = entities(2);
        let (wall, player_body) = (ids[0], ids[1]);
        let mut collision = CollisionWorld::default();
        // Тело игрока вокруг точки игрока, стена - сбоку от линии взгляда
        collision.insert_body(player_body, Vec3::new(0.0, 1.0, -10.0), Vec3::splat(0.3), SceneNode::Plain);
        collision.insert_body(wall, Vec3::new(4.0, 1.5, -5.0), Vec3::new(0.15, 1.5, 2.5), SceneNode::Plain);

        let player = Vec3::new(0.0, 0.0, -10.0);
        assert!(can_see_player(&collision, Vec3::ZERO, player, &[wall, player_body], 20.0));

        // Сдвигаем стену на линию взгляда
        collision.insert_body(wall, Vec3::new(0.0, 1.5, -5.0), Vec3::new(2.5, 1.5, 0.15), SceneNode::Plain);
        assert!(!can_see_player(&collision, Vec3::ZERO, player, &[wall, player_body], 20.0));

        let hits = collision.intersect(Vec3::Y, Vec3::NEG_Z, &[wall], false);
        assert_eq!(hits.len(), 1);
    }
}
