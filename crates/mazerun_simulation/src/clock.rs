//! Монотонные часы симуляции (миллисекунды).
//!
//! Все cooldown/memory/reload/effect сравнения идут через `SimClock`,
//! а не через таймеры с callback'ами: состояние опрашивается раз в tick.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct SimClock {
    /// Время с начала симуляции (ms)
    pub now_ms: u64,
    /// Длительность последнего tick'а (секунды)
    pub delta_secs: f32,
}

impl SimClock {
    pub fn advance(&mut self, delta_ms: u64) {
        self.now_ms = self.now_ms.saturating_add(delta_ms);
        self.delta_secs = delta_ms as f32 / 1000.0;
    }

    pub fn elapsed_since(&self, timestamp_ms: u64) -> u64 {
        self.now_ms.saturating_sub(timestamp_ms)
    }
}
