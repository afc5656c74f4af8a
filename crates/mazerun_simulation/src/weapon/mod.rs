//! Weapon module: ammo state machine + команды игрока (fire/reload).
//!
//! Выстрел разрешается здесь (AmmoState::fire), а резолвится в
//! `crate::combat` (hitscan pipeline).

use bevy::prelude::*;

pub mod ammo;
pub mod systems;


pub use ammo::{AmmoState, FireRejected, ReloadRejected, WeaponState};
pub use systems::{handle_reload_intents, update_reload_state};

use crate::TickSet;

/// Команда: выстрел игрока (направление = взгляд Transform игрока)
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct PlayerShootIntent;

/// Команда: перезарядка
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ReloadIntent;

#[derive(Event, Debug, Clone, Copy)]
pub struct ReloadStarted {
    pub at_ms: u64,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct ReloadFinished {
    pub transferred: u32,
}

/// Выстрел отклонён ("click" пустого магазина и т.п.)
#[derive(Event, Debug, Clone, Copy)]
pub struct FireRejectedEvent {
    pub reason: FireRejected,
}

/// Weapon Plugin
///
/// Порядок (внутри TickSet::Player):
/// 1. handle_reload_intents - старт перезарядки
/// 2. update_reload_state - завершение по таймстемпу
pub struct WeaponPlugin;

impl Plugin for WeaponPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerShootIntent>()
            .add_event::<ReloadIntent>()
            .add_event::<ReloadStarted>()
            .add_event::<ReloadFinished>()
            .add_event::<FireRejectedEvent>();

        app.add_systems(
            crate::SimTick,
            (handle_reload_intents, update_reload_state)
                .chain()
                .in_set(TickSet::Player),
        );
    }
}
