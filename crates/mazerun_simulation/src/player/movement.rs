//! Движение игрока: трение, ускорение от input, per-axis collision probe.

use bevy::prelude::*;

use super::PlayerInput;
use crate::clock::SimClock;
use crate::components::{Player, PlayerMotion};
use crate::config::PlayerConfig;
use crate::scene::SceneRegistry;
use crate::spatial::{CollisionWorld, RayIntersect};

/// Меньше этого по оси - не двигаемся и не проверяем коллизию
const MIN_AXIS_SPEED: f32 = 0.001;

/// Трение + ускорение от input (локальные оси, вперёд = −z)
pub fn integrate_velocity(velocity: Vec3, input: &PlayerInput, config: &PlayerConfig, delta_secs: f32) -> Vec3 {
    let mut velocity = velocity;
    velocity.x -= velocity.x * config.friction * delta_secs;
    velocity.z -= velocity.z * config.friction * delta_secs;

    let direction = Vec3::new(
        input.right as i32 as f32 - input.left as i32 as f32,
        0.0,
        input.forward as i32 as f32 - input.backward as i32 as f32,
    )
    .normalize_or_zero();

    if input.forward || input.backward {
        velocity.z -= direction.z * config.speed * delta_secs;
    }
    if input.left || input.right {
        velocity.x -= direction.x * config.speed * delta_secs;
    }

    velocity
}

/// Движение на `movement` заблокировано, если препятствие ближе `|movement| + margin`
pub fn is_movement_blocked<R: RayIntersect + ?Sized>(
    rays: &R,
    position: Vec3,
    movement: Vec3,
    margin: f32,
    obstacles: &[Entity],
) -> bool {
    let length = movement.length();
    if length <= f32::EPSILON {
        return false;
    }

    rays.intersect(position, movement / length, obstacles, false)
        .first()
        .is_some_and(|hit| hit.distance <= length + margin)
}

/// Yaw-only оси взгляда (right, forward) в плоскости XZ
pub fn flat_axes(transform: &Transform) -> (Vec3, Vec3) {
    let forward = transform.forward().as_vec3();
    let forward = Vec3::new(forward.x, 0.0, forward.z).normalize_or(Vec3::NEG_Z);
    let right = Vec3::new(-forward.z, 0.0, forward.x);
    (right, forward)
}

/// Система: перемещение игрока
pub fn move_player(
    clock: Res<SimClock>,
    input: Res<PlayerInput>,
    config: Res<PlayerConfig>,
    collision: Res<CollisionWorld>,
    registry: Res<SceneRegistry>,
    mut players: Query<(&mut Transform, &mut PlayerMotion), With<Player>>,
) {
    let delta = clock.delta_secs;
    if delta <= 0.0 {
        return;
    }

    for (mut transform, mut motion) in players.iter_mut() {
        let mut velocity = integrate_velocity(motion.velocity, &input, &config, delta);
        let (right, forward) = flat_axes(&transform);
        let position = transform.translation;

        // Скорость отрицательна в сторону движения (как у FPS controls)
        let strafe = right * (-velocity.x * delta);
        let advance = forward * (-velocity.z * delta);

        if velocity.x.abs() > MIN_AXIS_SPEED
            && is_movement_blocked(&*collision, position, strafe, config.collision_margin, registry.objects())
        {
            velocity.x = 0.0;
        }
        if velocity.z.abs() > MIN_AXIS_SPEED
            && is_movement_blocked(&*collision, position, advance, config.collision_margin, registry.objects())
        {
            velocity.z = 0.0;
        }

        if velocity.x.abs() > MIN_AXIS_SPEED {
            transform.translation += right * (-velocity.x * delta);
        }
        if velocity.z.abs() > MIN_AXIS_SPEED {
            transform.translation += forward * (-velocity.z * delta);
        }
        transform.translation.y = config.eye_height;

        motion.velocity = velocity;
    }
}
