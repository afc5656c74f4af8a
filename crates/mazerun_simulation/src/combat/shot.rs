//! Hitscan resolution: луч → цель → урон → исход.
//!
//! 1. Coarse cast по всем scene objects (non-recursive).
//! 2. Если ближайшее попадание не агент/зона, а агенты есть - recursive cast
//!    только по агентам (части тела под coarse bounding'ом).
//! 3. Owner агента - O(1) через parent-index map в SceneRegistry.
//! 4. Урон = base × zone factor; head + crit roll → урон = текущее HP.
//! 5. HP ≤ 0 → агент снимается со всех коллекций в том же вызове.

use bevy::prelude::*;
use rand::Rng;

use super::damage::defeat_enemy;
use crate::components::{Enemy, Health, HitZone, SceneNode};
use crate::scene::SceneRegistry;
use crate::spatial::{RayHit, RayIntersect};

/// Во что попал луч (до применения урона)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotTarget {
    Miss,
    NonTarget(RayHit),
    Agent { agent: Entity, hit: RayHit, zone: HitZone },
}

/// Итог выстрела
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    Miss,
    NonTargetHit {
        entity: Entity,
        point: Vec3,
    },
    AgentHit {
        agent: Entity,
        zone: HitZone,
        damage: u32,
        is_critical: bool,
        defeated: bool,
        point: Vec3,
    },
}

impl HitOutcome {
    pub fn hit_agent(&self) -> bool {
        matches!(self, HitOutcome::AgentHit { .. })
    }

    pub fn point(&self) -> Option<Vec3> {
        match self {
            HitOutcome::Miss => None,
            HitOutcome::NonTargetHit { point, .. } | HitOutcome::AgentHit { point, .. } => Some(*point),
        }
    }
}

/// Шаги 1–3: найти цель
pub fn find_shot_target<R: RayIntersect + ?Sized>(
    rays: &R,
    registry: &SceneRegistry,
    origin: Vec3,
    direction: Vec3,
) -> ShotTarget {
    let coarse = rays.intersect(origin, direction, registry.objects(), false);
    let nearest = coarse.first().copied();

    if let Some(hit) = nearest {
        if hit.node.is_agent_related() {
            return classify_agent_hit(registry, hit);
        }
    }

    // Recursive только если coarse не дал ни агента, ни зоны
    if !registry.enemies().is_empty() {
        let fine = rays.intersect(origin, direction, registry.enemies(), true);
        if let Some(hit) = fine.iter().copied().find(|h| h.node.is_agent_related()) {
            // Стена ближе агента - агент закрыт
            if nearest.map_or(true, |occluder| hit.distance <= occluder.distance) {
                return classify_agent_hit(registry, hit);
            }
        }
    }

    match nearest {
        Some(hit) => ShotTarget::NonTarget(hit),
        None => ShotTarget::Miss,
    }
}

fn classify_agent_hit(registry: &SceneRegistry, hit: RayHit) -> ShotTarget {
    let Some(agent) = registry
        .owner_of(hit.entity)
        .filter(|&owner| registry.is_live_enemy(owner))
    else {
        crate::logger::log_warning(&format!(
            "Shot: agent-tagged {:?} has no live owner, treating as non-target",
            hit.entity
        ));
        return ShotTarget::NonTarget(hit);
    };

    let zone = match hit.node {
        SceneNode::Zone(zone) => zone,
        // Попадание в root без зоны - как в тело
        _ => HitZone::BODY,
    };

    ShotTarget::Agent { agent, hit, zone }
}

/// Шаг 4: урон по зоне. Возвращает (damage, is_critical).
pub fn compute_shot_damage<R: Rng + ?Sized>(
    base_damage: f32,
    zone: &HitZone,
    current_health: u32,
    rng: &mut R,
) -> (u32, bool) {
    if zone.is_head() && zone.critical_chance > 0.0 && rng.gen::<f32>() < zone.critical_chance {
        return (current_health, true);
    }

    ((base_damage * zone.damage_factor).round().max(0.0) as u32, false)
}

/// Полный pipeline выстрела: цель → урон → defeat.
///
/// Агент без Health пропускается (data-integrity guard) и считается non-target.
#[allow(clippy::too_many_arguments)]
pub fn resolve_shot<R: RayIntersect + ?Sized, G: Rng + ?Sized>(
    rays: &R,
    registry: &mut SceneRegistry,
    healths: &mut Query<&mut Health, With<Enemy>>,
    commands: &mut Commands,
    origin: Vec3,
    direction: Vec3,
    base_damage: f32,
    rng: &mut G,
) -> HitOutcome {
    let (agent, hit, zone) = match find_shot_target(rays, registry, origin, direction) {
        ShotTarget::Miss => return HitOutcome::Miss,
        ShotTarget::NonTarget(hit) => {
            return HitOutcome::NonTargetHit {
                entity: hit.entity,
                point: hit.point,
            }
        }
        ShotTarget::Agent { agent, hit, zone } => (agent, hit, zone),
    };

    let Ok(mut health) = healths.get_mut(agent) else {
        crate::logger::log_warning(&format!("Shot: agent {:?} has no Health, skipping", agent));
        return HitOutcome::NonTargetHit {
            entity: hit.entity,
            point: hit.point,
        };
    };

    let (damage, is_critical) = compute_shot_damage(base_damage, &zone, health.current, rng);
    health.take_damage(damage);
    let defeated = health.is_dead();

    crate::logger::log(&format!(
        "💥 Shot hit {:?} ({:?}): {} dmg{} → HP {}/{}",
        agent,
        zone.kind,
        damage,
        if is_critical { " CRITICAL" } else { "" },
        health.current,
        health.max
    ));

    if defeated {
        defeat_enemy(commands, registry, agent);
    }

    HitOutcome::AgentHit {
        agent,
        zone,
        damage,
        is_critical,
        defeated,
        point: hit.point,
    }
}
