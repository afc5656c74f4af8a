//! Tests for hitscan target resolution and zone damage.

#[cfg(test)]
mod tests {
    use bevy::ecs::system::SystemState;
    use bevy::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::super::shot::{compute_shot_damage, find_shot_target, resolve_shot, HitOutcome, ShotTarget};
    use crate::components::{Enemy, Health, HitZone, HitZoneKind, SceneNode};
    use crate::scene::SceneRegistry;
    use crate::spatial::test_support::{hit, ScriptedRays};

    struct Fixture {
        world: World,
        wall: Entity,
        root: Entity,
        head: Entity,
        body: Entity,
    }

    fn fixture(head_zone: HitZone) -> Fixture {
        let mut world = World::new();
        let wall = world.spawn(SceneNode::Plain).id();
        let root = world.spawn((Enemy, Health::new(30), SceneNode::Agent)).id();
        let head = world.spawn(SceneNode::Zone(head_zone)).id();
        let body = world.spawn(SceneNode::Zone(HitZone::BODY)).id();

        let mut registry = SceneRegistry::default();
        registry.add_object(wall);
        registry.register_enemy(root, &[body, head]);
        world.insert_resource(registry);

        Fixture {
            world,
            wall,
            root,
            head,
            body,
        }
    }

    #[test]
    fn test_coarse_agent_hit_resolves_directly() {
        let f = fixture(HitZone::HEAD);
        let rays = ScriptedRays::with_hits(vec![hit(f.root, SceneNode::Agent, 4.0)]);

        let target = find_shot_target(&rays, f.world.resource::<SceneRegistry>(), Vec3::ZERO, Vec3::NEG_Z);

        match target {
            ShotTarget::Agent { agent, zone, .. } => {
                assert_eq!(agent, f.root);
                assert_eq!(zone, HitZone::BODY);
            }
            other => panic!("ожидали Agent, получили {:?}", other),
        }
        // Recursive не понадобился
        assert_eq!(rays.calls.borrow().len(), 1);
    }

    #[test]
    fn test_recursive_retry_finds_part_in_front_of_wall() {
        let f = fixture(HitZone::HEAD);
        let rays = ScriptedRays::with_hits(vec![
            hit(f.wall, SceneNode::Plain, 10.0),
            hit(f.head, SceneNode::Zone(HitZone::HEAD), 6.0),
        ])
        .with_part(f.root, f.head);

        let target = find_shot_target(&rays, f.world.resource::<SceneRegistry>(), Vec3::ZERO, Vec3::NEG_Z);

        match target {
            ShotTarget::Agent { agent, zone, hit } => {
                assert_eq!(agent, f.root);
                assert_eq!(zone.kind, HitZoneKind::Head);
                assert_eq!(hit.entity, f.head);
            }
            other => panic!("ожидали Agent, получили {:?}", other),
        }

        let calls = rays.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert!(!calls[0].2 && calls[1].2, "сначала coarse, потом recursive");
    }

    #[test]
    fn test_wall_in_front_of_agent_occludes() {
        let f = fixture(HitZone::HEAD);
        let rays = ScriptedRays::with_hits(vec![
            hit(f.wall, SceneNode::Plain, 3.0),
            hit(f.body, SceneNode::Zone(HitZone::BODY), 6.0),
        ])
        .with_part(f.root, f.body);

        let target = find_shot_target(&rays, f.world.resource::<SceneRegistry>(), Vec3::ZERO, Vec3::NEG_Z);
        assert!(matches!(target, ShotTarget::NonTarget(h) if h.entity == f.wall));
    }

    #[test]
    fn test_recursive_runs_when_coarse_empty() {
        let f = fixture(HitZone::HEAD);
        let rays = ScriptedRays::with_hits(vec![hit(f.body, SceneNode::Zone(HitZone::BODY), 6.0)])
            .with_part(f.root, f.body);

        let target = find_shot_target(&rays, f.world.resource::<SceneRegistry>(), Vec3::ZERO, Vec3::NEG_Z);
        assert!(matches!(target, ShotTarget::Agent { agent, .. } if agent == f.root));
    }

    #[test]
    fn test_nothing_hit_is_miss() {
        let f = fixture(HitZone::HEAD);
        let rays = ScriptedRays::default();
        let target = find_shot_target(&rays, f.world.resource::<SceneRegistry>(), Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(target, ShotTarget::Miss);
    }

    #[test]
    fn test_zone_damage_factors() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert_eq!(compute_shot_damage(100.0, &HitZone::BODY, 30, &mut rng), (100, false));
        assert_eq!(compute_shot_damage(100.0, &HitZone::LIMB, 30, &mut rng), (80, false));

        let head_no_crit = HitZone {
            critical_chance: 0.0,
            ..HitZone::HEAD
        };
        assert_eq!(compute_shot_damage(100.0, &head_no_crit, 30, &mut rng), (300, false));
    }

    #[test]
    fn test_forced_critical_equals_current_health() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let forced = HitZone {
            critical_chance: 1.0,
            ..HitZone::HEAD
        };

        for current in [1, 17, 30, 50] {
            assert_eq!(compute_shot_damage(100.0, &forced, current, &mut rng), (current, true));
        }
    }

    #[test]
    fn test_headshot_critical_defeats_and_unregisters_in_same_call() {
        let forced = HitZone {
            critical_chance: 1.0,
            ..HitZone::HEAD
        };
        let mut f = fixture(forced);
        let rays = ScriptedRays::with_hits(vec![hit(f.head, SceneNode::Zone(forced), 6.0)])
            .with_part(f.root, f.head);
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let mut state: SystemState<(
            Commands,
            ResMut<SceneRegistry>,
            Query<&mut Health, With<Enemy>>,
        )> = SystemState::new(&mut f.world);

        let outcome = {
            let (mut commands, mut registry, mut healths) = state.get_mut(&mut f.world);
            let outcome = resolve_shot(
                &rays,
                &mut registry,
                &mut healths,
                &mut commands,
                Vec3::ZERO,
                Vec3::NEG_Z,
                100.0,
                &mut rng,
            );

            // Снят из live-коллекции в том же вызове
            assert!(!registry.is_live_enemy(f.root));
            assert!(!registry.contains_object(f.root));
            assert_eq!(registry.owner_of(f.head), None);
            outcome
        };
        state.apply(&mut f.world);

        match outcome {
            HitOutcome::AgentHit {
                agent,
                damage,
                is_critical,
                defeated,
                ..
            } => {
                assert_eq!(agent, f.root);
                assert_eq!(damage, 30, "crit = ровно HP до попадания");
                assert!(is_critical);
                assert!(defeated);
            }
            other => panic!("ожидали AgentHit, получили {:?}", other),
        }

        assert!(f.world.get_entity(f.root).is_err());
        assert!(f.world.get_entity(f.head).is_err());
        assert!(f.world.get_entity(f.wall).is_ok());
    }

    #[test]
    fn test_limb_hit_on_armored_agent_survives() {
        let mut f = fixture(HitZone::HEAD);
        f.world.entity_mut(f.root).insert(Health::new(150));
        let rays = ScriptedRays::with_hits(vec![hit(f.body, SceneNode::Zone(HitZone::LIMB), 5.0)])
            .with_part(f.root, f.body);
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let mut state: SystemState<(
            Commands,
            ResMut<SceneRegistry>,
            Query<&mut Health, With<Enemy>>,
        )> = SystemState::new(&mut f.world);

        let outcome = {
            let (mut commands, mut registry, mut healths) = state.get_mut(&mut f.world);
            resolve_shot(
                &rays,
                &mut registry,
                &mut healths,
                &mut commands,
                Vec3::ZERO,
                Vec3::NEG_Z,
                100.0,
                &mut rng,
            )
        };
        state.apply(&mut f.world);

        assert!(matches!(outcome, HitOutcome::AgentHit { damage: 80, defeated: false, .. }));
        assert_eq!(f.world.get::<Health>(f.root).map(|h| h.current), Some(70));
        assert!(f.world.resource::<SceneRegistry>().is_live_enemy(f.root));
    }
}
