//! HUD snapshot: то, что видит игрок (health, ammo, prompt).

use bevy::prelude::*;
use std::fmt;

use super::NearbyInteractable;
use crate::components::{Health, Player};
use crate::scene::SceneRegistry;
use crate::weapon::AmmoState;

/// Текущее состояние HUD
///
/// Обновляется в конце tick'а, рендер - забота клиента.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct HudStatus {
    pub health: u32,
    pub max_health: u32,
    pub magazine: u32,
    pub reserve: u32,
    pub reloading: bool,
    pub prompt: Option<&'static str>,
    pub enemies_remaining: usize,
    pub game_over: bool,
}

impl fmt::Display for HudStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Health: {} / {} | Ammo: {} | {}",
            self.health, self.max_health, self.magazine, self.reserve
        )?;
        if self.reloading {
            write!(f, " (reloading)")?;
        }
        if let Some(prompt) = self.prompt {
            write!(f, " | {}", prompt)?;
        }
        if self.game_over {
            write!(f, " | GAME OVER")?;
        }
        Ok(())
    }
}

/// Система: пересобрать HudStatus
pub fn refresh_hud(
    registry: Res<SceneRegistry>,
    nearby: Res<NearbyInteractable>,
    mut hud: ResMut<HudStatus>,
    players: Query<(&Health, &AmmoState), With<Player>>,
) {
    let Ok((health, ammo)) = players.single() else {
        return;
    };

    let next = HudStatus {
        health: health.current,
        max_health: health.max,
        magazine: ammo.current,
        reserve: ammo.reserve,
        reloading: ammo.is_reloading(),
        prompt: nearby.prompt(),
        enemies_remaining: registry.enemies().len(),
        game_over: health.is_dead(),
    };

    if *hud != next {
        *hud = next;
    }
}
