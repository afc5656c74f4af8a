//! Combat Resolution Pipeline
//!
//! - shot: hitscan target resolution + zone damage + defeat
//! - damage: player damage sink, defeat cleanup, события
//! - effects: cosmetic сигналы с polled expiry
//! - systems: выстрел игрока (AmmoState → resolve_shot → события)

use bevy::prelude::*;

pub mod damage;
pub mod effects;
pub mod shot;
pub mod systems;

#[cfg(test)]
mod shot_tests;

pub use damage::{apply_player_damage, defeat_enemy, DamageSource, EnemyDefeated, PlayerDamaged, PlayerDied};
pub use effects::{expire_effects, track_effects, ActiveEffect, ActiveEffects, EffectKind, EffectTriggered};
pub use shot::{compute_shot_damage, find_shot_target, resolve_shot, HitOutcome, ShotTarget};
pub use systems::process_player_shots;

use crate::{SimTick, TickSet};

/// Event: выстрел игрока разрешён
#[derive(Event, Debug, Clone, Copy)]
pub struct ShotResolved {
    pub outcome: HitOutcome,
}

/// Combat Plugin
///
/// Порядок выполнения:
/// 1. apply_player_damage - урон от агентов этого tick'а (TickSet::Combat)
/// 2. process_player_shots - выстрелы игрока (мёртвый игрок уже не стреляет)
/// 3. expire_effects → track_effects (TickSet::Cleanup)
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerDamaged>()
            .add_event::<PlayerDied>()
            .add_event::<EnemyDefeated>()
            .add_event::<ShotResolved>()
            .add_event::<EffectTriggered>()
            .init_resource::<ActiveEffects>();

        app.add_systems(
            SimTick,
            (apply_player_damage, process_player_shots)
                .chain()
                .in_set(TickSet::Combat),
        )
        .add_systems(
            SimTick,
            (expire_effects, track_effects).chain().in_set(TickSet::Cleanup),
        );
    }
}
