//! AI systems (FSM tick, перемещение, атаки)

pub mod attack;
pub mod fsm;
pub mod movement;

pub use attack::{enemy_shoot, falloff_damage, EnemyShot, MIN_SHOT_DISTANCE, SHOT_SPREAD};
pub use fsm::update_enemies;
pub use movement::{
    choose_patrol_target, direction_towards_home, face_towards, horizontal_distance, move_enemy, Facing,
    ARRIVAL_THRESHOLD, PATROL_DIRECTIONS, PATROL_PROBE_DISTANCE,
};
