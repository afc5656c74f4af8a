//! Враги: маркер, типы и поведенческий профиль.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::EnemySettings;

/// Маркер врага (root entity агента)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Enemy;

/// Тип врага - модификаторы поверх EnemySettings
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub enum EnemyType {
    Soldier,
    Armored,
    Fast,
}

/// Статы типа врага
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyTypeStats {
    pub health: u32,
    pub damage_multiplier: f32,
    pub speed_multiplier: f32,
    /// Делитель cooldown'ов (больше = чаще стреляет/бьёт)
    pub fire_rate_multiplier: f32,
}

impl EnemyType {
    pub const ALL: [EnemyType; 3] = [EnemyType::Soldier, EnemyType::Armored, EnemyType::Fast];

    pub fn stats(&self) -> EnemyTypeStats {
        match self {
            EnemyType::Soldier => EnemyTypeStats {
                health: 30,
                damage_multiplier: 1.0,
                speed_multiplier: 1.0,
                fire_rate_multiplier: 1.0,
            },
            EnemyType::Armored => EnemyTypeStats {
                health: 50,
                damage_multiplier: 0.8,
                speed_multiplier: 0.8,
                fire_rate_multiplier: 1.2,
            },
            EnemyType::Fast => EnemyTypeStats {
                health: 20,
                damage_multiplier: 1.2,
                speed_multiplier: 1.5,
                fire_rate_multiplier: 1.3,
            },
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Поведенческий профиль агента (скорости, урон, cooldown'ы, точность)
///
/// Без этого компонента (или с невалидными значениями) агент пропускается в tick'е.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct EnemyProfile {
    pub movement_speed: f32,
    pub patrol_speed: f32,
    pub melee_damage: u32,
    pub shooting_damage: f32,
    pub attack_cooldown_ms: u64,
    pub shooting_cooldown_ms: u64,
    pub accuracy: f32,
}

impl EnemyProfile {
    pub fn from_settings(settings: &EnemySettings, enemy_type: EnemyType) -> Self {
        let stats = enemy_type.stats();
        let fire_rate = stats.fire_rate_multiplier.max(f32::EPSILON);

        Self {
            movement_speed: settings.movement_speed * stats.speed_multiplier,
            patrol_speed: settings.patrol_speed * stats.speed_multiplier,
            melee_damage: (settings.melee_damage * stats.damage_multiplier).round() as u32,
            shooting_damage: settings.shooting_damage * stats.damage_multiplier,
            attack_cooldown_ms: (settings.attack_cooldown / fire_rate * 1000.0).round() as u64,
            shooting_cooldown_ms: (settings.shooting_cooldown / fire_rate * 1000.0).round() as u64,
            accuracy: settings.accuracy,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.movement_speed.is_finite()
            && self.movement_speed >= 0.0
            && self.patrol_speed.is_finite()
            && self.patrol_speed >= 0.0
            && self.shooting_damage.is_finite()
            && (0.0..=1.0).contains(&self.accuracy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_applies_type_modifiers() {
        let settings = EnemySettings::default();

        let soldier = EnemyProfile::from_settings(&settings, EnemyType::Soldier);
        assert_eq!(soldier.melee_damage, 10);
        assert_eq!(soldier.attack_cooldown_ms, 1500);
        assert!((soldier.movement_speed - 1.8).abs() < 1e-6);

        let armored = EnemyProfile::from_settings(&settings, EnemyType::Armored);
        assert_eq!(armored.melee_damage, 8);
        assert_eq!(armored.shooting_cooldown_ms, 1250);

        let fast = EnemyProfile::from_settings(&settings, EnemyType::Fast);
        assert!((fast.patrol_speed - 1.8).abs() < 1e-6);
        assert_eq!(fast.melee_damage, 12);
    }

    #[test]
    fn test_profile_validation() {
        let mut profile = EnemyProfile::from_settings(&EnemySettings::default(), EnemyType::Soldier);
        assert!(profile.is_valid());

        profile.movement_speed = f32::NAN;
        assert!(!profile.is_valid());
    }
}
