//! Enemy Agent State Machine
//!
//! FSM на агента: Patrol / Chase / Shooting / Attack.
//! Переходы - чистая функция (видимость, дистанция, возраст памяти),
//! поведение состояния - в `systems::fsm::update_enemies`.

use bevy::prelude::*;

pub mod components;
pub mod systems;

pub use components::{cooldown_ready, next_state, select_engagement_state, EnemyBrain, EnemyState};
pub use systems::update_enemies;

use crate::{SimTick, TickSet};

/// AI Plugin
///
/// `update_enemies` в TickSet::Enemies: после движения игрока и синхронизации
/// CollisionWorld, до выстрелов игрока.
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(SimTick, update_enemies.in_set(TickSet::Enemies));
    }
}
