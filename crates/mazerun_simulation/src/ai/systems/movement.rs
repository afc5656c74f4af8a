//! Перемещение агентов: moveEnemy + выбор patrol target.
//!
//! Агенты двигаются в горизонтальной плоскости (высота root'а фиксирована).

use bevy::prelude::*;
use rand::Rng;

use crate::spatial::{is_path_clear, RayIntersect};

/// Ближе этого - цель достигнута
pub const ARRIVAL_THRESHOLD: f32 = 0.2;

/// Дальность probe-луча при выборе patrol направления
pub const PATROL_PROBE_DISTANCE: f32 = 3.0;

/// Patrol направления в порядке перебора: +X, +Z, −X, −Z
pub const PATROL_DIRECTIONS: [Vec3; 4] = [Vec3::X, Vec3::Z, Vec3::NEG_X, Vec3::NEG_Z];

/// Куда смотрит агент при движении
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    /// Патруль: по направлению движения
    Movement,
    /// Chase/Shooting/Attack: на цель
    Target,
}

pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x - b.x, a.z - b.z).length()
}

/// Поворот по yaw на точку (высота цели игнорируется)
pub fn face_towards(transform: &mut Transform, target: Vec3) {
    let flat = Vec3::new(target.x, transform.translation.y, target.z);
    if horizontal_distance(transform.translation, flat) > f32::EPSILON {
        transform.look_at(flat, Dir3::Y);
    }
}

/// Шаг к цели: `direction × speed × dt`, если дальше ARRIVAL_THRESHOLD.
///
/// Возвращает false если уже на месте ("arrived").
pub fn move_enemy(transform: &mut Transform, target: Vec3, speed: f32, delta_secs: f32, facing: Facing) -> bool {
    let position = transform.translation;
    if horizontal_distance(position, target) <= ARRIVAL_THRESHOLD {
        return false;
    }

    let direction = Vec3::new(target.x - position.x, 0.0, target.z - position.z).normalize_or_zero();
    transform.translation += direction * speed * delta_secs;

    match facing {
        Facing::Movement => face_towards(transform, transform.translation + direction),
        Facing::Target => face_towards(transform, target),
    }
    true
}

/// Новая patrol точка
///
/// Случайное свободное направление; если все закрыты - то, что лучше всего
/// смотрит в сторону spawn'а. Дистанция в [2, 5).
pub fn choose_patrol_target<R: RayIntersect + ?Sized, G: Rng + ?Sized>(
    rays: &R,
    position: Vec3,
    spawn_point: Vec3,
    obstacles: &[Entity],
    rng: &mut G,
) -> Vec3 {
    let clear: Vec<Vec3> = PATROL_DIRECTIONS
        .into_iter()
        .filter(|&direction| is_path_clear(rays, position, direction, PATROL_PROBE_DISTANCE, obstacles))
        .collect();

    let direction = if clear.is_empty() {
        direction_towards_home(position, spawn_point)
    } else {
        clear[rng.gen_range(0..clear.len())]
    };

    let distance = rng.gen_range(2.0..5.0);
    Vec3::new(
        position.x + direction.x * distance,
        position.y,
        position.z + direction.z * distance,
    )
}

/// Кардинальное направление с максимальным dot к spawn'у
pub fn direction_towards_home(position: Vec3, spawn_point: Vec3) -> Vec3 {
    let to_spawn = (spawn_point - position).normalize_or_zero();

    let mut best = PATROL_DIRECTIONS[0];
    let mut best_dot = -1.0;
    for direction in PATROL_DIRECTIONS {
        let dot = to_spawn.dot(direction);
        if dot > best_dot {
            best_dot = dot;
            best = direction;
        }
    }
    best
}
