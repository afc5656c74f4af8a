//! Атаки агентов: hitscan выстрел по игроку и melee.

use bevy::prelude::*;
use rand::Rng;

use crate::components::EnemyProfile;
use crate::spatial::{RayHit, RayIntersect, EYE_HEIGHT};

/// Разброс при промахе accuracy roll (±0.05 на ось)
pub const SHOT_SPREAD: f32 = 0.1;

/// Ближе этого выстрел не засчитывается (луч стартует "внутри" цели)
pub const MIN_SHOT_DISTANCE: f32 = 0.5;

/// Результат выстрела агента
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyShot {
    pub direction: Vec3,
    /// Ближайшее попадание (для impact эффекта)
    pub impact: Option<RayHit>,
    /// Урон игроку, если засчитан
    pub damage: Option<u32>,
}

/// Урон с падением по дистанции, минимум 1
pub fn falloff_damage(shooting_damage: f32, hit_distance: f32, shooting_range: f32) -> u32 {
    let raw = (shooting_damage * (1.0 - hit_distance / shooting_range)).floor();
    raw.max(1.0) as u32
}

/// Выстрел агента по игроку
///
/// Луч от глаз агента к глазам игрока + jitter если провален accuracy roll. Урон только
/// если ближайшее попадание - тело игрока, повторный accuracy roll успешен и
/// дистанция в (0.5, shooting_range).
#[allow(clippy::too_many_arguments)]
pub fn enemy_shoot<R: RayIntersect + ?Sized, G: Rng + ?Sized>(
    rays: &R,
    position: Vec3,
    player_position: Vec3,
    player: Entity,
    obstacles: &[Entity],
    profile: &EnemyProfile,
    shooting_range: f32,
    rng: &mut G,
) -> EnemyShot {
    let origin = position + Vec3::Y * EYE_HEIGHT;
    let mut direction = (player_position - origin).normalize_or_zero();

    if rng.gen::<f32>() > profile.accuracy {
        let jitter = Vec3::new(
            rng.gen::<f32>() - 0.5,
            rng.gen::<f32>() - 0.5,
            rng.gen::<f32>() - 0.5,
        ) * SHOT_SPREAD;
        direction = (direction + jitter).normalize_or_zero();
    }

    let mut candidates = Vec::with_capacity(obstacles.len() + 1);
    candidates.extend_from_slice(obstacles);
    candidates.push(player);

    let hits = rays.intersect(origin, direction, &candidates, false);
    let impact = hits.first().copied();

    let damage = impact.and_then(|hit| {
        if hit.entity != player {
            return None;
        }
        let landed = rng.gen::<f32>() < profile.accuracy
            && hit.distance > MIN_SHOT_DISTANCE
            && hit.distance < shooting_range;
        landed.then(|| falloff_damage(profile.shooting_damage, hit.distance, shooting_range))
    });

    EnemyShot {
        direction,
        impact,
        damage,
    }
}
