//! Interaction: поиск ближайшего interactable и подбор (ammo crate).

use bevy::prelude::*;

use super::{InteractIntent, NearbyInteractable};
use crate::components::{Interactable, Player, SceneNode};
use crate::config::PlayerConfig;
use crate::scene::SceneRegistry;
use crate::weapon::AmmoState;

/// Первый interactable из `objects` (в порядке регистрации) в пределах `range`
pub fn find_nearby_interactable<'a>(
    player_position: Vec3,
    range: f32,
    objects: impl IntoIterator<Item = (Entity, &'a Transform, &'a SceneNode)>,
) -> Option<(Entity, Interactable)> {
    objects.into_iter().find_map(|(entity, transform, node)| match node {
        SceneNode::Interactable(interactable) if transform.translation.distance(player_position) <= range => {
            Some((entity, *interactable))
        }
        _ => None,
    })
}

/// Система: обновить NearbyInteractable (prompt для HUD)
pub fn check_interaction(
    config: Res<PlayerConfig>,
    registry: Res<SceneRegistry>,
    mut nearby: ResMut<NearbyInteractable>,
    players: Query<&Transform, With<Player>>,
    nodes: Query<(&Transform, &SceneNode), Without<Player>>,
) {
    let Ok(player_transform) = players.single() else {
        nearby.target = None;
        return;
    };

    let candidates = registry
        .objects()
        .iter()
        .filter_map(|&entity| nodes.get(entity).ok().map(|(transform, node)| (entity, transform, node)));

    let found = find_nearby_interactable(player_transform.translation, config.interaction_range, candidates);
    if nearby.target != found {
        nearby.target = found;
    }
}

/// Система: InteractIntent → подбор ближайшего предмета
///
/// Без nearby target команда игнорируется.
pub fn handle_interact_intents(
    mut commands: Commands,
    mut intents: EventReader<InteractIntent>,
    mut registry: ResMut<SceneRegistry>,
    mut nearby: ResMut<NearbyInteractable>,
    mut players: Query<&mut AmmoState, With<Player>>,
) {
    for _ in intents.read() {
        let Some((entity, interactable)) = nearby.target.take() else {
            continue;
        };
        let Ok(mut ammo) = players.single_mut() else {
            crate::logger::log_warning("InteractIntent: player entity not found");
            continue;
        };

        match interactable {
            Interactable::AmmoCrate { amount } => {
                let added = ammo.add_reserve(amount);
                registry.remove_object(entity);
                if let Ok(mut entity_commands) = commands.get_entity(entity) {
                    entity_commands.despawn();
                }
                crate::logger::log(&format!(
                    "📦 Picked up ammo crate: +{} (reserve {}/{})",
                    added, ammo.reserve, ammo.max_reserve
                ));
            }
        }
    }
}
