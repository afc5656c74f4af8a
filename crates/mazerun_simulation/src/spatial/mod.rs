//! Spatial Query Service
//!
//! - `raycast`: ray-intersection primitive (`RayIntersect`) + per-tick
//!   snapshot коллайдеров (`CollisionWorld`)
//! - `perception`: line-of-sight и path-clearance поверх `RayIntersect`

pub mod perception;
pub mod raycast;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod perception_tests;

pub use perception::{can_see_player, is_path_clear, EYE_HEIGHT, PATH_PROBE_HEIGHT, VISIBILITY_TOLERANCE};
pub use raycast::{sync_collision_world, BodyBox, CollisionWorld, RayHit, RayIntersect};
