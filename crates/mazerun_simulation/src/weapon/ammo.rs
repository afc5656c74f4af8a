//! Ammo/Weapon state machine: idle ↔ reloading.
//!
//! Инварианты:
//! - 0 ≤ current ≤ max, 0 ≤ reserve ≤ max_reserve
//! - reload не стартует при полном магазине или пустом резерве
//! - одновременно максимум одна перезарядка
//!
//! Отклонённая команда ничего не меняет и возвращает typed error.

use bevy::prelude::*;
use thiserror::Error;

use crate::config::WeaponData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum WeaponState {
    Idle,
    Reloading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FireRejected {
    #[error("magazine is empty")]
    Empty,
    #[error("weapon is reloading")]
    Reloading,
    #[error("player is dead")]
    PlayerDead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReloadRejected {
    #[error("already reloading")]
    AlreadyReloading,
    #[error("magazine already full")]
    MagazineFull,
    #[error("no reserve ammo")]
    NoReserve,
}

/// Магазин + резерв игрока
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct AmmoState {
    pub current: u32,
    pub max: u32,
    pub reserve: u32,
    pub max_reserve: u32,
    /// Some(t) - идёт перезарядка, начатая в t (ms)
    pub reload_started_ms: Option<u64>,
}

impl Default for AmmoState {
    fn default() -> Self {
        Self::from_weapon(&WeaponData::default())
    }
}

impl AmmoState {
    pub fn new(magazine_size: u32, reserve: u32, max_reserve: u32) -> Self {
        Self {
            current: magazine_size,
            max: magazine_size,
            reserve: reserve.min(max_reserve),
            max_reserve,
            reload_started_ms: None,
        }
    }

    pub fn from_weapon(weapon: &WeaponData) -> Self {
        Self::new(weapon.magazine_size, weapon.starting_reserve, weapon.max_reserve)
    }

    pub fn state(&self) -> WeaponState {
        if self.reload_started_ms.is_some() {
            WeaponState::Reloading
        } else {
            WeaponState::Idle
        }
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_started_ms.is_some()
    }

    /// Установка магазина с clamp в [0, max]. Возвращает итоговое значение.
    pub fn set_magazine(&mut self, count: i64) -> u32 {
        self.current = count.clamp(0, self.max as i64) as u32;
        self.current
    }

    /// Выстрел: −1 патрон. Возвращает остаток в магазине.
    pub fn fire(&mut self, player_dead: bool) -> Result<u32, FireRejected> {
        if player_dead {
            return Err(FireRejected::PlayerDead);
        }
        if self.is_reloading() {
            return Err(FireRejected::Reloading);
        }
        if self.current == 0 {
            return Err(FireRejected::Empty);
        }

        self.current -= 1;
        Ok(self.current)
    }

    /// Старт перезарядки в момент `now_ms`
    pub fn reload(&mut self, now_ms: u64) -> Result<(), ReloadRejected> {
        if self.is_reloading() {
            return Err(ReloadRejected::AlreadyReloading);
        }
        if self.current >= self.max {
            return Err(ReloadRejected::MagazineFull);
        }
        if self.reserve == 0 {
            return Err(ReloadRejected::NoReserve);
        }

        self.reload_started_ms = Some(now_ms);
        Ok(())
    }

    /// Per-tick: завершение перезарядки по истечении `reload_time_ms`.
    ///
    /// Возвращает Some(переложенные патроны) в tick завершения.
    pub fn update(&mut self, now_ms: u64, reload_time_ms: u64) -> Option<u32> {
        let started = self.reload_started_ms?;
        if now_ms.saturating_sub(started) < reload_time_ms {
            return None;
        }

        let deficit = self.max.saturating_sub(self.current);
        let transferred = deficit.min(self.reserve);
        self.current += transferred;
        self.reserve -= transferred;
        self.reload_started_ms = None;

        Some(transferred)
    }

    /// Патроны из ящика. Возвращает реально добавленное (резерв ограничен max_reserve).
    pub fn add_reserve(&mut self, amount: u32) -> u32 {
        let before = self.reserve;
        self.reserve = self.reserve.saturating_add(amount).min(self.max_reserve);
        self.reserve - before
    }

    /// Прогресс перезарядки 0..1 (None если не перезаряжаемся)
    pub fn reload_progress(&self, now_ms: u64, reload_time_ms: u64) -> Option<f32> {
        let started = self.reload_started_ms?;
        if reload_time_ms == 0 {
            return Some(1.0);
        }
        Some((now_ms.saturating_sub(started) as f32 / reload_time_ms as f32).min(1.0))
    }
}
