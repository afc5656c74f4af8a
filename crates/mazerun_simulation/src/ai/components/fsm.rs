//! Enemy FSM: состояния, память о игроке, cooldown таймстемпы.

use bevy::prelude::*;

use crate::config::EnemySettings;

/// Состояние агента
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum EnemyState {
    /// Бродит по лабиринту
    #[default]
    Patrol,
    /// Идёт к последней известной позиции игрока
    Chase,
    /// Стреляет с дистанции (shooting_min_range, shooting_range)
    Shooting,
    /// Бьёт в ближнем бою (< melee_range)
    Attack,
}

/// Выбор состояния по дистанции до видимого игрока.
///
/// Все пороги строгие: на границе ровно `shooting_min_range` - Chase.
pub fn select_engagement_state(distance: f32, settings: &EnemySettings) -> EnemyState {
    if distance < settings.melee_range {
        EnemyState::Attack
    } else if distance < settings.shooting_range && distance > settings.shooting_min_range {
        EnemyState::Shooting
    } else {
        EnemyState::Chase
    }
}

/// Чистая функция перехода: (текущее, видимость, дистанция, возраст памяти) → новое
pub fn next_state(
    current: EnemyState,
    can_see_player: bool,
    distance: f32,
    memory_age_ms: Option<u64>,
    settings: &EnemySettings,
) -> EnemyState {
    if can_see_player {
        return select_engagement_state(distance, settings);
    }

    match memory_age_ms {
        Some(age) if age < settings.memory_duration_ms && current != EnemyState::Patrol => EnemyState::Chase,
        _ => EnemyState::Patrol,
    }
}

/// "Мозг" агента: состояние + perception memory + cooldown'ы + patrol
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct EnemyBrain {
    pub state: EnemyState,
    pub last_seen_position: Option<Vec3>,
    pub last_seen_ms: Option<u64>,
    pub last_attack_ms: Option<u64>,
    pub last_shot_ms: Option<u64>,
    pub patrol_target: Option<Vec3>,
    pub spawn_point: Vec3,
}

impl EnemyBrain {
    pub fn new(spawn_point: Vec3) -> Self {
        Self {
            state: EnemyState::Patrol,
            last_seen_position: None,
            last_seen_ms: None,
            last_attack_ms: None,
            last_shot_ms: None,
            patrol_target: None,
            spawn_point,
        }
    }

    pub fn memory_age(&self, now_ms: u64) -> Option<u64> {
        self.last_seen_position?;
        self.last_seen_ms.map(|seen| now_ms.saturating_sub(seen))
    }

    pub fn remember_player(&mut self, position: Vec3, now_ms: u64) {
        self.last_seen_position = Some(position);
        self.last_seen_ms = Some(now_ms);
    }

    pub fn forget_player(&mut self) {
        self.last_seen_position = None;
    }

    /// Обновить память и состояние. Возвращает (old, new) если состояние сменилось.
    pub fn perceive(
        &mut self,
        can_see_player: bool,
        player_position: Vec3,
        distance: f32,
        now_ms: u64,
        settings: &EnemySettings,
    ) -> Option<(EnemyState, EnemyState)> {
        if can_see_player {
            self.remember_player(player_position, now_ms);
        }

        let old = self.state;
        let new = next_state(old, can_see_player, distance, self.memory_age(now_ms), settings);
        if !can_see_player && new == EnemyState::Patrol {
            self.forget_player();
        }

        self.state = new;
        (old != new).then_some((old, new))
    }
}

/// Cooldown прошёл? Строго `now − last > cooldown`; без таймстемпа - готов.
pub fn cooldown_ready(last_ms: Option<u64>, now_ms: u64, cooldown_ms: u64) -> bool {
    last_ms.map_or(true, |last| now_ms.saturating_sub(last) > cooldown_ms)
}
