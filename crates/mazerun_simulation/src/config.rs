//! Конфигурация симуляции.
//!
//! Все значения по умолчанию - баланс оригинальной игры. Host может
//! переопределить любую часть через JSON (`SimulationConfig::from_json_str`),
//! недостающие поля берутся из `Default`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Параметры уровня (maze + предметы + спавн врагов)
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub maze_width: usize,
    pub maze_height: usize,
    /// Размер клетки в world units
    pub cell_size: f32,
    /// Вероятность удалить north/east стену после DFS (циклы)
    pub loop_chance: f32,
    pub wall_height: f32,
    pub wall_thickness: f32,
    pub enemy_count: usize,
    /// Шанс ammo crate в каждой клетке
    pub ammo_spawn_chance: f32,
    pub ammo_crate_amount: u32,
    /// Подъём root'а врага над полом
    pub enemy_y_offset: f32,
    pub start_cell: (usize, usize),
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            maze_width: 25,
            maze_height: 25,
            cell_size: 5.0,
            loop_chance: 0.15,
            wall_height: 3.0,
            wall_thickness: 0.3,
            enemy_count: 30,
            ammo_spawn_chance: 0.05,
            ammo_crate_amount: 10,
            enemy_y_offset: 0.9,
            start_cell: (1, 1),
        }
    }
}

/// Общие параметры enemy AI (до модификаторов типа врага)
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemySettings {
    pub melee_range: f32,
    pub sight_range: f32,
    pub shooting_range: f32,
    pub shooting_min_range: f32,
    pub melee_damage: f32,
    pub shooting_damage: f32,
    /// Секунды
    pub attack_cooldown: f32,
    /// Секунды
    pub shooting_cooldown: f32,
    pub accuracy: f32,
    pub movement_speed: f32,
    pub patrol_speed: f32,
    pub max_count: usize,
    pub memory_duration_ms: u64,
}

impl Default for EnemySettings {
    fn default() -> Self {
        Self {
            melee_range: 2.0,
            sight_range: 20.0,
            shooting_range: 15.0,
            shooting_min_range: 4.0,
            melee_damage: 10.0,
            shooting_damage: 8.0,
            attack_cooldown: 1.5,
            shooting_cooldown: 1.5,
            accuracy: 0.7,
            movement_speed: 1.8,
            patrol_speed: 1.2,
            max_count: 50,
            memory_duration_ms: 5000,
        }
    }
}

/// Оружие игрока (PP7)
///
/// `name`, `damage` и `accuracy` - табличные данные для host'а (HUD, меню);
/// симуляция читает магазин, reload, резерв и `shot_base_damage`.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponData {
    pub name: String,
    pub magazine_size: u32,
    pub reload_time_ms: u64,
    pub damage: u32,
    pub accuracy: f32,
    pub starting_reserve: u32,
    pub max_reserve: u32,
    /// Базовый урон hitscan выстрела до множителя зоны
    pub shot_base_damage: f32,
}

impl Default for WeaponData {
    fn default() -> Self {
        Self {
            name: "PP7".to_string(),
            magazine_size: 8,
            reload_time_ms: 1000,
            damage: 25,
            accuracy: 0.9,
            starting_reserve: 24,
            max_reserve: 200,
            shot_base_damage: 100.0,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub eye_height: f32,
    pub speed: f32,
    pub friction: f32,
    pub collision_margin: f32,
    pub max_health: u32,
    pub interaction_range: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            eye_height: 1.7,
            speed: 40.0,
            friction: 10.0,
            collision_margin: 0.5,
            max_health: 100,
            interaction_range: 2.5,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid simulation config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Полный набор конфигов (для загрузки одним JSON документом)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub level: LevelConfig,
    pub enemy: EnemySettings,
    pub weapon: WeaponData,
    pub player: PlayerConfig,
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Кладёт все части конфига в World как resources (перезаписывая defaults)
    pub fn insert_into(self, world: &mut World) {
        world.insert_resource(self.level);
        world.insert_resource(self.enemy);
        world.insert_resource(self.weapon);
        world.insert_resource(self.player);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "level": { "maze_width": 9, "maze_height": 7 }, "enemy": { "accuracy": 1.0 } }"#;
        let config = SimulationConfig::from_json_str(json).expect("valid json");

        assert_eq!(config.level.maze_width, 9);
        assert_eq!(config.level.maze_height, 7);
        assert_eq!(config.level.cell_size, 5.0);
        assert_eq!(config.enemy.accuracy, 1.0);
        assert_eq!(config.enemy.memory_duration_ms, 5000);
        assert_eq!(config.weapon, WeaponData::default());
    }

    #[test]
    fn test_weapon_table_override_reaches_world() {
        let json = r#"{ "weapon": { "name": "Klobb", "damage": 12, "magazine_size": 20 } }"#;
        let mut world = World::new();
        SimulationConfig::from_json_str(json).expect("valid json").insert_into(&mut world);

        let weapon = world.resource::<WeaponData>();
        assert_eq!(weapon.name, "Klobb");
        assert_eq!(weapon.damage, 12);
        assert_eq!(weapon.accuracy, 0.9);
        assert_eq!(weapon.magazine_size, 20);
        assert_eq!(weapon.shot_base_damage, 100.0);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let result = SimulationConfig::from_json_str("{ level: ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_insert_into_world() {
        let mut world = World::new();
        let mut config = SimulationConfig::default();
        config.player.max_health = 250;
        config.insert_into(&mut world);

        assert_eq!(world.resource::<PlayerConfig>().max_health, 250);
        assert_eq!(world.resource::<LevelConfig>().maze_width, 25);
    }
}
