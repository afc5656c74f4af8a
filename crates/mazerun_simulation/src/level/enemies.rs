//! Спавн агентов: root + четыре зоны попадания, регистрация в SceneRegistry.

use bevy::prelude::*;
use rand::Rng;
use thiserror::Error;

use crate::ai::EnemyBrain;
use crate::components::{Collider, Enemy, EnemyProfile, EnemyType, Health, HitZone, SceneNode, ZonePart};
use crate::config::{EnemySettings, LevelConfig};
use crate::maze::MazeGraph;
use crate::scene::SceneRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpawnRejected {
    #[error("enemy limit reached ({0})")]
    LimitReached(usize),
}

/// Геометрия частей агента: (зона, half extents, offset от root'а)
pub const AGENT_PARTS: [(HitZone, Vec3, Vec3); 4] = [
    (HitZone::BODY, Vec3::new(0.3, 0.75, 0.2), Vec3::ZERO),
    (HitZone::HEAD, Vec3::new(0.25, 0.25, 0.25), Vec3::new(0.0, 0.95, 0.0)),
    (HitZone::LIMB, Vec3::new(0.075, 0.25, 0.075), Vec3::new(-0.35, 0.5, 0.0)),
    (HitZone::LIMB, Vec3::new(0.075, 0.25, 0.075), Vec3::new(0.35, 0.5, 0.0)),
];

/// Спавн одного агента. `floor_position` - точка на полу, root поднимается
/// на `LevelConfig::enemy_y_offset`.
pub fn spawn_enemy(world: &mut World, floor_position: Vec3, enemy_type: EnemyType) -> Result<Entity, SpawnRejected> {
    let settings = world.get_resource::<EnemySettings>().cloned().unwrap_or_default();
    let y_offset = world
        .get_resource::<LevelConfig>()
        .map_or(LevelConfig::default().enemy_y_offset, |level| level.enemy_y_offset);

    let live = world.get_resource::<SceneRegistry>().map_or(0, |r| r.enemies().len());
    if live >= settings.max_count {
        crate::logger::log_warning(&format!("Spawn: enemy limit {} reached", settings.max_count));
        return Err(SpawnRejected::LimitReached(settings.max_count));
    }

    let position = floor_position + Vec3::Y * y_offset;
    let stats = enemy_type.stats();

    let root = world
        .spawn((
            Enemy,
            enemy_type,
            EnemyProfile::from_settings(&settings, enemy_type),
            EnemyBrain::new(position),
            Health::new(stats.health),
            Transform::from_translation(position),
            SceneNode::Agent,
        ))
        .id();

    let parts: Vec<Entity> = AGENT_PARTS
        .iter()
        .map(|&(zone, half_extents, offset)| {
            world
                .spawn((
                    ZonePart { owner: root },
                    Collider::cuboid(half_extents).with_offset(offset),
                    SceneNode::Zone(zone),
                ))
                .id()
        })
        .collect();

    world.get_resource_or_insert_with(SceneRegistry::default).register_enemy(root, &parts);

    crate::logger::log(&format!("👾 Spawned {:?} {:?} at {:?} (HP {})", enemy_type, root, position, stats.health));
    Ok(root)
}

/// Расставить до `count` агентов по случайным клеткам.
///
/// Клетки из `[2, W−2) × [2, H−2)`, не ближе `2·cell` (xz) к уже стоящему
/// агенту, не больше `3·count` попыток. Возвращает сколько заспавнено.
pub fn spawn_enemies<R: Rng + ?Sized>(world: &mut World, maze: &MazeGraph, count: usize, rng: &mut R) -> usize {
    let cell_size = world
        .get_resource::<LevelConfig>()
        .map_or(LevelConfig::default().cell_size, |level| level.cell_size);

    if maze.width() < 5 || maze.height() < 5 {
        crate::logger::log_warning(&format!(
            "Spawn: maze {}x{} has no interior cells for enemies",
            maze.width(),
            maze.height()
        ));
        return 0;
    }

    let max_attempts = count * 3;
    let mut spawned = 0;
    let mut attempts = 0;

    while spawned < count && attempts < max_attempts {
        attempts += 1;

        let x = rng.gen_range(2..maze.width() - 2);
        let z = rng.gen_range(2..maze.height() - 2);
        let Some(position) = maze.cell_world_position(x, z, cell_size) else {
            continue;
        };

        if is_too_close(world, position, cell_size * 2.0) {
            continue;
        }

        match spawn_enemy(world, position, EnemyType::random(rng)) {
            Ok(_) => spawned += 1,
            Err(SpawnRejected::LimitReached(_)) => break,
        }
    }

    crate::logger::log_info(&format!("👾 Spawned {} enemies ({} attempts)", spawned, attempts));
    spawned
}

fn is_too_close(world: &mut World, position: Vec3, min_distance: f32) -> bool {
    let mut enemies = world.query_filtered::<&Transform, With<Enemy>>();
    enemies.iter(world).any(|transform| {
        let delta = transform.translation - position;
        Vec2::new(delta.x, delta.z).length() < min_distance
    })
}
