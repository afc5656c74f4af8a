//! Player control components

use bevy::prelude::*;

/// Маркер игрока
///
/// Transform игрока = позиция глаз (камеры) + поворот взгляда.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Кинематика игрока: скорость в локальных осях (x - strafe, z - forward)
///
/// Знаки как у first-person controls: вперёд = отрицательный z.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerMotion {
    pub velocity: Vec3,
}
