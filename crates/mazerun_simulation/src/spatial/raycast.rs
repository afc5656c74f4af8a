//! Ray-intersection primitive.
//!
//! `CollisionWorld` - snapshot world-space AABB всех коллайдеров,
//! пересобирается `sync_collision_world` в начале tick'а и ещё раз перед
//! выстрелом игрока (агенты успели сдвинуться).

use bevy::math::bounding::{Aabb3d, RayCast3d};
use bevy::prelude::*;
use std::collections::HashMap;

use crate::components::{Collider, SceneNode, ZonePart};
use crate::scene::SceneRegistry;

/// Одно пересечение луча с объектом
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub node: SceneNode,
    pub point: Vec3,
    pub distance: f32,
}

/// Ray-intersection primitive
///
/// Возвращает пересечения с `candidates`, отсортированные по distance
/// (ближайший первым). `recursive = true` дополнительно проверяет
/// зарегистрированные части каждого кандидата (body/head/limbs агента).
pub trait RayIntersect {
    fn intersect(&self, origin: Vec3, direction: Vec3, candidates: &[Entity], recursive: bool) -> Vec<RayHit>;
}

/// World-space бокс одного коллайдера
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyBox {
    pub center: Vec3,
    pub half_extents: Vec3,
    pub node: SceneNode,
}

#[derive(Resource, Debug, Default)]
pub struct CollisionWorld {
    bodies: HashMap<Entity, BodyBox>,
    children: HashMap<Entity, Vec<Entity>>,
}

impl CollisionWorld {
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.children.clear();
    }

    pub fn insert_body(&mut self, entity: Entity, center: Vec3, half_extents: Vec3, node: SceneNode) {
        self.bodies.insert(
            entity,
            BodyBox {
                center,
                half_extents,
                node,
            },
        );
    }

    pub fn set_children(&mut self, owner: Entity, parts: Vec<Entity>) {
        self.children.insert(owner, parts);
    }

    pub fn body(&self, entity: Entity) -> Option<&BodyBox> {
        self.bodies.get(&entity)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    fn hit_body(&self, entity: Entity, ray: &RayCast3d, origin: Vec3, direction: Dir3) -> Option<RayHit> {
        let body = self.bodies.get(&entity)?;
        let aabb = Aabb3d::new(body.center, body.half_extents);
        let distance = ray.aabb_intersection_at(&aabb)?;

        Some(RayHit {
            entity,
            node: body.node,
            point: origin + direction * distance,
            distance,
        })
    }
}

impl RayIntersect for CollisionWorld {
    fn intersect(&self, origin: Vec3, direction: Vec3, candidates: &[Entity], recursive: bool) -> Vec<RayHit> {
        // Нулевое направление - пересечений нет
        let Ok(direction) = Dir3::new(direction) else {
            return Vec::new();
        };
        let ray = RayCast3d::new(origin, direction, f32::MAX);

        let mut hits = Vec::new();
        for &candidate in candidates {
            if let Some(hit) = self.hit_body(candidate, &ray, origin, direction) {
                hits.push(hit);
            }

            if recursive {
                let parts = self.children.get(&candidate).map(Vec::as_slice).unwrap_or(&[]);
                hits.extend(
                    parts
                        .iter()
                        .filter_map(|&part| self.hit_body(part, &ray, origin, direction)),
                );
            }
        }

        // Stable sort: при равной дистанции порядок кандидатов сохраняется
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

/// AABB, охватывающий повёрнутый/масштабированный бокс
fn world_half_extents(transform: &Transform, half_extents: Vec3) -> Vec3 {
    let scaled = half_extents * transform.scale.abs();
    let m = Mat3::from_quat(transform.rotation);
    m.x_axis.abs() * scaled.x + m.y_axis.abs() * scaled.y + m.z_axis.abs() * scaled.z
}

/// Система: пересборка CollisionWorld из Transform + Collider
///
/// Части агентов (ZonePart) позиционируются от Transform owner'а;
/// часть без живого owner'а пропускается.
pub fn sync_collision_world(
    mut collision: ResMut<CollisionWorld>,
    registry: Res<SceneRegistry>,
    bodies: Query<(Entity, &Transform, &Collider, &SceneNode), Without<ZonePart>>,
    parts: Query<(Entity, &ZonePart, &Collider, &SceneNode)>,
    owners: Query<&Transform>,
) {
    collision.clear();

    for (entity, transform, collider, node) in bodies.iter() {
        collision.insert_body(
            entity,
            transform.transform_point(collider.offset),
            world_half_extents(transform, collider.half_extents),
            *node,
        );
    }

    for (entity, part, collider, node) in parts.iter() {
        let Ok(owner_transform) = owners.get(part.owner) else {
            continue;
        };
        collision.insert_body(
            entity,
            owner_transform.transform_point(collider.offset),
            world_half_extents(owner_transform, collider.half_extents),
            *node,
        );
    }

    for &enemy in registry.enemies() {
        collision.set_children(enemy, registry.parts_of(enemy).to_vec());
    }
}
