//! Perception queries: line-of-sight и свобода пути.
//!
//! Пустой список пересечений всегда = видно / путь свободен.

use bevy::prelude::*;

use super::raycast::RayIntersect;

/// Высота глаз агента над его root'ом
pub const EYE_HEIGHT: f32 = 1.0;

/// Препятствие почти на дистанции игрока не блокирует (это коллайдер самого игрока)
pub const VISIBILITY_TOLERANCE: f32 = 0.5;

/// Подъём probe-луча над землёй (чтобы не цеплять пол)
pub const PATH_PROBE_HEIGHT: f32 = 0.5;

/// Видит ли агент игрока
///
/// Дальше `sight_range` - сразу false. Иначе луч от глаз агента к игроку:
/// видимость, если первое препятствие не ближе `distance − 0.5`.
pub fn can_see_player<R: RayIntersect + ?Sized>(
    rays: &R,
    agent_position: Vec3,
    player_position: Vec3,
    obstacles: &[Entity],
    sight_range: f32,
) -> bool {
    let distance = agent_position.distance(player_position);
    if distance > sight_range {
        return false;
    }

    let direction = (player_position - agent_position).normalize_or_zero();
    if direction == Vec3::ZERO {
        // Стоим в одной точке
        return true;
    }

    let origin = agent_position + Vec3::Y * EYE_HEIGHT;
    let hits = rays.intersect(origin, direction, obstacles, false);

    match hits.first() {
        None => true,
        Some(first) => {
            first.distance >= distance - VISIBILITY_TOLERANCE
                || (first.distance > 0.0 && (first.distance - distance).abs() < VISIBILITY_TOLERANCE)
        }
    }
}

/// Свободен ли путь на `probe_distance` вперёд от точки чуть над землёй
pub fn is_path_clear<R: RayIntersect + ?Sized>(
    rays: &R,
    position: Vec3,
    direction: Vec3,
    probe_distance: f32,
    obstacles: &[Entity],
) -> bool {
    let origin = position + Vec3::Y * PATH_PROBE_HEIGHT;
    let hits = rays.intersect(origin, direction.normalize_or_zero(), obstacles, false);

    hits.first().map_or(true, |first| first.distance > probe_distance)
}
