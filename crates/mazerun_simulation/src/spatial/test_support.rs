//! Stub ray caster для unit-тестов: возвращает заранее заданные попадания.

use bevy::prelude::*;
use std::cell::RefCell;

use super::raycast::{RayHit, RayIntersect};

/// Отдаёт `hits`, отфильтрованные по candidates (и частям при recursive),
/// независимо от геометрии. Запоминает все запросы.
#[derive(Default)]
pub struct ScriptedRays {
    pub hits: Vec<RayHit>,
    pub parts: Vec<(Entity, Entity)>,
    pub calls: RefCell<Vec<(Vec3, Vec3, bool)>>,
}

impl ScriptedRays {
    pub fn with_hits(hits: Vec<RayHit>) -> Self {
        Self {
            hits,
            ..Default::default()
        }
    }

    pub fn with_part(mut self, owner: Entity, part: Entity) -> Self {
        self.parts.push((owner, part));
        self
    }
}

impl RayIntersect for ScriptedRays {
    fn intersect(&self, origin: Vec3, direction: Vec3, candidates: &[Entity], recursive: bool) -> Vec<RayHit> {
        self.calls.borrow_mut().push((origin, direction, recursive));

        let mut hits: Vec<RayHit> = self
            .hits
            .iter()
            .filter(|hit| {
                candidates.contains(&hit.entity)
                    || (recursive
                        && self
                            .parts
                            .iter()
                            .any(|(owner, part)| *part == hit.entity && candidates.contains(owner)))
            })
            .copied()
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

pub fn hit(entity: Entity, node: crate::components::SceneNode, distance: f32) -> RayHit {
    RayHit {
        entity,
        node,
        point: Vec3::new(0.0, 0.0, -distance),
        distance,
    }
}

pub fn entities(count: usize) -> Vec<Entity> {
    let mut world = World::new();
    (0..count).map(|_| world.spawn_empty().id()).collect()
}
