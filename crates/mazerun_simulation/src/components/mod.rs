//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: здоровье (Health) - общее для игрока и врагов
//! - enemy: маркер врага, тип и поведенческий профиль
//! - world: scene node tagging (SceneNode, HitZone, Interactable, Collider, ZonePart)
//! - player: player marker и кинематика (Player, PlayerMotion)

pub mod actor;
pub mod enemy;
pub mod player;
pub mod world;

pub use actor::*;
pub use enemy::*;
pub use player::*;
pub use world::*;
