//! SceneRegistry - состояние симуляции, разделяемое AI и combat.
//!
//! Держит:
//! - упорядоченный список collidable/targetable объектов (стены, пол, ящики, агенты)
//! - упорядоченный список живых агентов
//! - parent-index map: часть → owner агент, owner → части
//!
//! Все мутации только через явные add/remove. Порядок вставки сохраняется
//! (детерминизм ray queries при равных дистанциях).

use bevy::prelude::*;
use std::collections::HashMap;

#[derive(Resource, Debug, Default)]
pub struct SceneRegistry {
    objects: Vec<Entity>,
    enemies: Vec<Entity>,
    owner_of: HashMap<Entity, Entity>,
    parts_of: HashMap<Entity, Vec<Entity>>,
}

impl SceneRegistry {
    /// Добавить collidable объект. Повторное добавление - no-op.
    pub fn add_object(&mut self, entity: Entity) {
        if !self.objects.contains(&entity) {
            self.objects.push(entity);
        }
    }

    /// Убрать объект. Возвращает false если его не было.
    pub fn remove_object(&mut self, entity: Entity) -> bool {
        let before = self.objects.len();
        self.objects.retain(|&e| e != entity);
        self.objects.len() != before
    }

    pub fn objects(&self) -> &[Entity] {
        &self.objects
    }

    pub fn contains_object(&self, entity: Entity) -> bool {
        self.objects.contains(&entity)
    }

    /// Все объекты кроме `entity` (препятствия с точки зрения агента)
    pub fn obstacles_except(&self, entity: Entity) -> Vec<Entity> {
        self.objects.iter().copied().filter(|&e| e != entity).collect()
    }

    /// Регистрирует агента: live list + scene objects + parent-index map
    pub fn register_enemy(&mut self, root: Entity, parts: &[Entity]) {
        if !self.enemies.contains(&root) {
            self.enemies.push(root);
        }
        self.add_object(root);

        self.owner_of.insert(root, root);
        for &part in parts {
            self.owner_of.insert(part, root);
        }
        self.parts_of.insert(root, parts.to_vec());
    }

    /// Снимает агента со всех коллекций. Возвращает его части (для despawn).
    ///
    /// Вызывается даже если despawn потом провалится: registry чистится первым.
    pub fn unregister_enemy(&mut self, root: Entity) -> Option<Vec<Entity>> {
        let was_live = self.enemies.contains(&root);
        self.enemies.retain(|&e| e != root);
        self.remove_object(root);

        let parts = self.parts_of.remove(&root);
        self.owner_of.retain(|_, owner| *owner != root);

        match parts {
            Some(parts) => Some(parts),
            None if was_live => Some(Vec::new()),
            None => None,
        }
    }

    pub fn enemies(&self) -> &[Entity] {
        &self.enemies
    }

    pub fn is_live_enemy(&self, entity: Entity) -> bool {
        self.enemies.contains(&entity)
    }

    /// O(1) поиск owner агента по части (root отображается сам в себя)
    pub fn owner_of(&self, entity: Entity) -> Option<Entity> {
        self.owner_of.get(&entity).copied()
    }

    pub fn parts_of(&self, owner: Entity) -> &[Entity] {
        self.parts_of.get(&owner).map(Vec::as_slice).unwrap_or(&[])
    }
}
