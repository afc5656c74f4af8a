//! Cosmetic signals: решаем *когда* эффект случился, рендер - забота host'а.
//!
//! Каждый сигнал с длительностью живёт в `ActiveEffects` до expiry-таймстемпа
//! и снимается polling'ом раз в tick (никаких отложенных callback'ов,
//! переживающих despawn агента).

use bevy::prelude::*;

use crate::clock::SimClock;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectKind {
    /// Вспышка попадания игрока (в агента или в стену)
    ImpactFlash { on_enemy: bool },
    /// Кровь; heavy - headshot
    BloodSplatter { heavy: bool },
    CriticalFlash,
    /// Трассер от ствола до точки попадания (position)
    Tracer { from: Vec3 },
    /// Звук попадания; voice_line - реплика "I'm hit"
    HitSound { voice_line: bool },
    /// Вспышка на агенте, пережившем попадание
    DamageFlash { agent: Entity },
    EnemyMuzzleFlash { agent: Entity },
    /// Попадание вражеской пули (в стену или игрока)
    EnemyBulletImpact,
    ReloadSound,
}

impl EffectKind {
    /// Время жизни (ms). None - fire-and-forget (звуки), не отслеживается.
    pub fn duration_ms(&self) -> Option<u64> {
        match self {
            EffectKind::ImpactFlash { .. } => Some(200),
            EffectKind::BloodSplatter { heavy: false } => Some(500),
            EffectKind::BloodSplatter { heavy: true } => Some(800),
            EffectKind::CriticalFlash => Some(150),
            EffectKind::Tracer { .. } => Some(150),
            EffectKind::DamageFlash { .. } => Some(150),
            EffectKind::EnemyMuzzleFlash { .. } => Some(100),
            EffectKind::EnemyBulletImpact => Some(150),
            EffectKind::HitSound { .. } | EffectKind::ReloadSound => None,
        }
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EffectTriggered {
    pub kind: EffectKind,
    pub position: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveEffect {
    pub kind: EffectKind,
    pub position: Vec3,
    pub expires_at_ms: u64,
}

/// Эффекты, которые сейчас "на экране"
#[derive(Resource, Debug, Default)]
pub struct ActiveEffects {
    effects: Vec<ActiveEffect>,
}

impl ActiveEffects {
    pub fn push(&mut self, kind: EffectKind, position: Vec3, now_ms: u64) -> bool {
        let Some(duration) = kind.duration_ms() else {
            return false;
        };
        self.effects.push(ActiveEffect {
            kind,
            position,
            expires_at_ms: now_ms.saturating_add(duration),
        });
        true
    }

    /// Убирает истёкшие. Возвращает сколько снято.
    pub fn expire(&mut self, now_ms: u64) -> usize {
        let before = self.effects.len();
        self.effects.retain(|e| e.expires_at_ms > now_ms);
        before - self.effects.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

/// Система: EffectTriggered → ActiveEffects
pub fn track_effects(
    mut events: EventReader<EffectTriggered>,
    clock: Res<SimClock>,
    mut active: ResMut<ActiveEffects>,
) {
    for event in events.read() {
        active.push(event.kind, event.position, clock.now_ms);
    }
}

/// Система: polled expiry
pub fn expire_effects(clock: Res<SimClock>, mut active: ResMut<ActiveEffects>) {
    if active.is_empty() {
        return;
    }
    active.expire(clock.now_ms);
}
