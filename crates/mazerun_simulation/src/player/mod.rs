//! Player module: input → движение, interaction, HUD.
//!
//! Камера/ввод живут в клиенте; симуляция получает `PlayerInput`
//! (удерживаемые клавиши) и команды-события.

use bevy::prelude::*;

pub mod hud;
pub mod interaction;
pub mod movement;

pub use hud::{refresh_hud, HudStatus};
pub use interaction::{check_interaction, find_nearby_interactable, handle_interact_intents};
pub use movement::{flat_axes, integrate_velocity, is_movement_blocked, move_player};

use crate::components::{Collider, Health, Interactable, Player, PlayerMotion, SceneNode};
use crate::config::{PlayerConfig, WeaponData};
use crate::weapon::AmmoState;
use crate::{SimTick, TickSet};

/// Half-extents тела игрока (от пола до макушки, глаза внутри)
pub const PLAYER_BODY_HALF_EXTENTS: Vec3 = Vec3::new(0.3, 0.95, 0.3);

/// Центр тела относительно глаз
pub const PLAYER_BODY_OFFSET: Vec3 = Vec3::new(0.0, -0.75, 0.0);

/// Удерживаемые клавиши движения
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

/// Команда: взаимодействие (E)
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct InteractIntent;

/// Ближайший interactable в радиусе взаимодействия
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct NearbyInteractable {
    pub target: Option<(Entity, Interactable)>,
}

impl NearbyInteractable {
    pub fn prompt(&self) -> Option<&'static str> {
        self.target.map(|(_, interactable)| interactable.prompt())
    }
}

/// Спавн игрока в позиции глаз
pub fn spawn_player(world: &mut World, eye_position: Vec3) -> Entity {
    let config = world.get_resource::<PlayerConfig>().cloned().unwrap_or_default();
    let weapon = world.get_resource::<WeaponData>().cloned().unwrap_or_default();

    let player = world
        .spawn((
            Player,
            Transform::from_translation(eye_position),
            Health::new(config.max_health),
            AmmoState::from_weapon(&weapon),
            PlayerMotion::default(),
            Collider::cuboid(PLAYER_BODY_HALF_EXTENTS).with_offset(PLAYER_BODY_OFFSET),
            SceneNode::Plain,
        ))
        .id();

    crate::logger::log_info(&format!("🧍 Player spawned at {:?} (HP {})", eye_position, config.max_health));
    player
}

/// Player Plugin
///
/// Порядок (TickSet::Player, set выключен после game over):
/// move_player → check_interaction → handle_interact_intents.
/// HUD - в TickSet::Cleanup, всегда.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<InteractIntent>()
            .init_resource::<PlayerInput>()
            .init_resource::<NearbyInteractable>()
            .init_resource::<HudStatus>();

        app.add_systems(
            SimTick,
            (move_player, check_interaction, handle_interact_intents)
                .chain()
                .in_set(TickSet::Player),
        )
        .add_systems(SimTick, refresh_hud.in_set(TickSet::Cleanup));
    }
}
