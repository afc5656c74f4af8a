//! AI components (FSM state + память агента)

pub mod fsm;

#[cfg(test)]
mod fsm_tests;

pub use fsm::{cooldown_ready, next_state, select_engagement_state, EnemyBrain, EnemyState};
