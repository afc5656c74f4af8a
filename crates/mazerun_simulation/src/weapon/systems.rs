//! Weapon systems: reload intents и polled завершение перезарядки.

use bevy::prelude::*;

use super::{AmmoState, ReloadFinished, ReloadIntent, ReloadStarted};
use crate::clock::SimClock;
use crate::combat::{EffectKind, EffectTriggered};
use crate::components::Player;
use crate::config::WeaponData;

/// Система: ReloadIntent → AmmoState::reload
///
/// Отклонённая команда логируется и ничего не меняет.
pub fn handle_reload_intents(
    mut intents: EventReader<ReloadIntent>,
    clock: Res<SimClock>,
    mut players: Query<(&Transform, &mut AmmoState), With<Player>>,
    mut started: EventWriter<ReloadStarted>,
    mut effects: EventWriter<EffectTriggered>,
) {
    for _ in intents.read() {
        let Ok((transform, mut ammo)) = players.single_mut() else {
            crate::logger::log_warning("ReloadIntent: player entity not found");
            continue;
        };

        match ammo.reload(clock.now_ms) {
            Ok(()) => {
                started.write(ReloadStarted { at_ms: clock.now_ms });
                effects.write(EffectTriggered {
                    kind: EffectKind::ReloadSound,
                    position: transform.translation,
                });
                crate::logger::log(&format!(
                    "🔄 Reload started: {}/{} (reserve {})",
                    ammo.current, ammo.max, ammo.reserve
                ));
            }
            Err(reason) => {
                crate::logger::log(&format!("🔄 Reload rejected: {}", reason));
            }
        }
    }
}

/// Система: завершение перезарядки по elapsed ≥ reload_time
pub fn update_reload_state(
    clock: Res<SimClock>,
    weapon: Res<WeaponData>,
    mut ammo_query: Query<&mut AmmoState>,
    mut finished: EventWriter<ReloadFinished>,
) {
    for mut ammo in ammo_query.iter_mut() {
        if !ammo.is_reloading() {
            continue;
        }

        if let Some(transferred) = ammo.update(clock.now_ms, weapon.reload_time_ms) {
            finished.write(ReloadFinished { transferred });
            crate::logger::log(&format!(
                "✅ Reload complete: {}/{} (reserve {})",
                ammo.current, ammo.max, ammo.reserve
            ));
        }
    }
}
