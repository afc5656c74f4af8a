//! Level assembly поверх MazeGraph.
//!
//! - builder: пол, стены, ящики, старт игрока
//! - enemies: спавн агентов с зонами попадания

pub mod builder;
pub mod enemies;

pub use builder::{build_maze_level, spawn_ammo_crate, LevelInfo, AMMO_CRATE_HALF_EXTENTS, FLOOR_THICKNESS};
pub use enemies::{spawn_enemies, spawn_enemy, SpawnRejected, AGENT_PARTS};
