//! Damage events, defeat cleanup и player damage sink.

use bevy::prelude::*;

use crate::components::{Health, Player};
use crate::scene::SceneRegistry;

/// Источник урона по игроку
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum DamageSource {
    Melee,
    Shot,
}

/// Event: агент нанёс урон игроку
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerDamaged {
    pub attacker: Entity,
    pub amount: u32,
    pub source: DamageSource,
}

/// Event: игрок умер (game over)
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerDied;

/// Event: агент побеждён и снят со всех коллекций
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyDefeated {
    pub entity: Entity,
    pub critical: bool,
}

/// Снимает агента со всех коллекций и despawn'ит root + части.
///
/// Registry чистится первым: даже если despawn не удался, агент больше не
/// считается живым. Возвращает false если агент уже был снят.
pub fn defeat_enemy(commands: &mut Commands, registry: &mut SceneRegistry, agent: Entity) -> bool {
    let Some(parts) = registry.unregister_enemy(agent) else {
        crate::logger::log_warning(&format!("Defeat: {:?} is not a live agent", agent));
        return false;
    };

    for entity in parts.into_iter().chain(std::iter::once(agent)) {
        match commands.get_entity(entity) {
            Ok(mut entity_commands) => {
                entity_commands.despawn();
            }
            Err(_) => {
                crate::logger::log_error(&format!(
                    "Defeat: {:?} already gone, registry cleaned anyway",
                    entity
                ));
            }
        }
    }

    crate::logger::log_info(&format!(
        "☠️ Enemy {:?} defeated ({} left)",
        agent,
        registry.enemies().len()
    ));
    true
}

/// Система: player damage sink
///
/// Мёртвый игрок урон не получает. Переход в 0 HP → PlayerDied.
pub fn apply_player_damage(
    mut events: EventReader<PlayerDamaged>,
    mut players: Query<&mut Health, With<Player>>,
    mut died: EventWriter<PlayerDied>,
) {
    for event in events.read() {
        let Ok(mut health) = players.single_mut() else {
            crate::logger::log_warning("PlayerDamaged: player entity not found");
            continue;
        };

        if health.is_dead() {
            continue;
        }

        health.take_damage(event.amount);
        crate::logger::log(&format!(
            "🩸 Player took {} {:?} damage from {:?} → HP {}/{}",
            event.amount, event.source, event.attacker, health.current, health.max
        ));

        if health.is_dead() {
            died.write(PlayerDied);
            crate::logger::log_info("💀 Player died - game over");
        }
    }
}
