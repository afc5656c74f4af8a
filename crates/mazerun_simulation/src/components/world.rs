//! Scene node tagging: что за объект попал под луч.
//!
//! Вместо динамического "userData" каждый collidable node несёт `SceneNode`
//! и разбирается через `match`.

use bevy::prelude::*;

/// Тип зоны попадания
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum HitZoneKind {
    Body,
    Head,
    Limb,
}

/// Зона попадания на части тела агента
///
/// Статична: назначается при спавне, не меняется.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct HitZone {
    pub kind: HitZoneKind,
    pub damage_factor: f32,
    /// Шанс instant-kill (только head)
    pub critical_chance: f32,
}

impl HitZone {
    pub const BODY: HitZone = HitZone {
        kind: HitZoneKind::Body,
        damage_factor: 1.0,
        critical_chance: 0.0,
    };

    pub const HEAD: HitZone = HitZone {
        kind: HitZoneKind::Head,
        damage_factor: 3.0,
        critical_chance: 0.3,
    };

    pub const LIMB: HitZone = HitZone {
        kind: HitZoneKind::Limb,
        damage_factor: 0.8,
        critical_chance: 0.0,
    };

    pub fn is_head(&self) -> bool {
        self.kind == HitZoneKind::Head
    }
}

/// Интерактивный предмет
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum Interactable {
    AmmoCrate { amount: u32 },
}

impl Interactable {
    pub fn prompt(&self) -> &'static str {
        match self {
            Interactable::AmmoCrate { .. } => "Press E for Ammo",
        }
    }
}

/// Тег scene node
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub enum SceneNode {
    /// Стены, пол, тело игрока
    Plain,
    /// Root агента
    Agent,
    /// Часть тела агента с зоной урона
    Zone(HitZone),
    Interactable(Interactable),
}

impl SceneNode {
    pub fn is_agent_related(&self) -> bool {
        matches!(self, SceneNode::Agent | SceneNode::Zone(_))
    }
}

/// Axis-aligned box для ray queries
///
/// `offset` - в локальных координатах entity (для ZonePart - в координатах owner'а).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Collider {
    pub half_extents: Vec3,
    pub offset: Vec3,
}

impl Collider {
    pub fn cuboid(half_extents: Vec3) -> Self {
        Self {
            half_extents,
            offset: Vec3::ZERO,
        }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }
}

/// Часть агента (body/head/limb). Своего Transform нет - позиция от owner'а.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct ZonePart {
    pub owner: Entity,
}
