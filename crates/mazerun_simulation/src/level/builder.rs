//! Сборка уровня из MazeGraph: пол, стены, ящики с патронами, игрок, враги.

use bevy::prelude::*;
use rand::Rng;

use super::enemies::spawn_enemies;
use crate::components::{Collider, Interactable, Player, SceneNode};
use crate::config::{LevelConfig, PlayerConfig};
use crate::maze::{Direction, MazeGraph};
use crate::player::spawn_player;
use crate::scene::SceneRegistry;
use crate::DeterministicRng;

/// Толщина пола (верх пола = y 0)
pub const FLOOR_THICKNESS: f32 = 0.2;

/// Half-extents ящика с патронами
pub const AMMO_CRATE_HALF_EXTENTS: Vec3 = Vec3::splat(0.25);

/// Итог сборки уровня
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelInfo {
    pub start_position: Vec3,
    pub wall_count: usize,
    pub crate_count: usize,
    pub enemy_count: usize,
}

/// Собрать уровень в `world`
///
/// Все случайные решения (лабиринт, ящики, враги) - из `DeterministicRng`.
pub fn build_maze_level(world: &mut World) -> LevelInfo {
    let level = world.get_resource::<LevelConfig>().cloned().unwrap_or_default();
    let player_config = world.get_resource::<PlayerConfig>().cloned().unwrap_or_default();

    world.get_resource_or_insert_with(SceneRegistry::default);
    if !world.contains_resource::<DeterministicRng>() {
        crate::logger::log_warning("Level: DeterministicRng missing, using default seed");
        world.insert_resource(DeterministicRng::default());
    }

    world.resource_scope(|world, mut rng: Mut<DeterministicRng>| {
        let rng = &mut rng.rng;
        let maze = MazeGraph::generate(level.maze_width, level.maze_height, level.loop_chance, rng);

        spawn_floor(world, &maze, &level);
        let wall_count = spawn_walls(world, &maze, &level);

        let (start_x, start_z) = level.start_cell;
        let start_floor = maze
            .cell_world_position(start_x, start_z, level.cell_size)
            .unwrap_or(Vec3::ZERO);
        let start_position = Vec3::new(start_floor.x, player_config.eye_height, start_floor.z);
        place_player(world, start_position);

        let mut crate_count = place_starting_crates(world, start_floor, &level);
        crate_count += place_random_crates(world, &maze, &level, rng);

        let enemy_count = spawn_enemies(world, &maze, level.enemy_count, rng);

        world.insert_resource(maze);

        let info = LevelInfo {
            start_position,
            wall_count,
            crate_count,
            enemy_count,
        };
        crate::logger::log_info(&format!(
            "🏗️ Level built: {}x{} maze, {} walls, {} crates, {} enemies",
            level.maze_width, level.maze_height, wall_count, crate_count, enemy_count
        ));
        info
    })
}

fn spawn_scene_object(world: &mut World, center: Vec3, half_extents: Vec3, node: SceneNode) -> Entity {
    let entity = world
        .spawn((Transform::from_translation(center), Collider::cuboid(half_extents), node))
        .id();
    world.get_resource_or_insert_with(SceneRegistry::default).add_object(entity);
    entity
}

fn spawn_floor(world: &mut World, maze: &MazeGraph, level: &LevelConfig) -> Entity {
    let half_width = maze.width() as f32 * level.cell_size / 2.0;
    let half_depth = maze.height() as f32 * level.cell_size / 2.0;
    // Клетки центрированы по (x − W/2)·cell, так что пол сдвинут на полклетки
    let center = Vec3::new(-level.cell_size / 2.0, -FLOOR_THICKNESS / 2.0, -level.cell_size / 2.0);

    spawn_scene_object(
        world,
        center,
        Vec3::new(half_width, FLOOR_THICKNESS / 2.0, half_depth),
        SceneNode::Plain,
    )
}

/// Одна стена на каждую закрытую сторону каждой клетки
fn spawn_walls(world: &mut World, maze: &MazeGraph, level: &LevelConfig) -> usize {
    let half_cell = level.cell_size / 2.0;
    let half_height = level.wall_height / 2.0;
    let half_thickness = level.wall_thickness / 2.0;
    let mut count = 0;

    for cell in maze.cells() {
        let position = cell.world_position(level.cell_size, maze.width(), maze.height());

        for direction in Direction::ALL {
            if !cell.walls.get(direction) {
                continue;
            }

            let (dx, dz) = direction.offset();
            let center = Vec3::new(
                position.x + dx as f32 * half_cell,
                half_height,
                position.z + dz as f32 * half_cell,
            );
            let half_extents = match direction {
                Direction::North | Direction::South => Vec3::new(half_cell, half_height, half_thickness),
                Direction::East | Direction::West => Vec3::new(half_thickness, half_height, half_cell),
            };

            spawn_scene_object(world, center, half_extents, SceneNode::Plain);
            count += 1;
        }
    }

    count
}

fn place_player(world: &mut World, start_position: Vec3) {
    let mut players = world.query_filtered::<&mut Transform, With<Player>>();
    let moved = players
        .single_mut(world)
        .map(|mut transform| transform.translation = start_position)
        .is_ok();
    if !moved {
        spawn_player(world, start_position);
    }
}

pub fn spawn_ammo_crate(world: &mut World, position: Vec3, amount: u32) -> Entity {
    spawn_scene_object(
        world,
        position,
        AMMO_CRATE_HALF_EXTENTS,
        SceneNode::Interactable(Interactable::AmmoCrate { amount }),
    )
}

fn place_starting_crates(world: &mut World, start_floor: Vec3, level: &LevelConfig) -> usize {
    let y = AMMO_CRATE_HALF_EXTENTS.y;
    let offsets = [Vec3::ZERO, Vec3::X, Vec3::Z];

    for offset in offsets {
        spawn_ammo_crate(
            world,
            Vec3::new(start_floor.x, y, start_floor.z) + offset,
            level.ammo_crate_amount,
        );
    }
    offsets.len()
}

fn place_random_crates<R: Rng + ?Sized>(world: &mut World, maze: &MazeGraph, level: &LevelConfig, rng: &mut R) -> usize {
    let mut count = 0;
    for cell in maze.cells() {
        if rng.gen::<f32>() < level.ammo_spawn_chance {
            let position = cell.world_position(level.cell_size, maze.width(), maze.height());
            spawn_ammo_crate(
                world,
                Vec3::new(position.x, AMMO_CRATE_HALF_EXTENTS.y, position.z),
                level.ammo_crate_amount,
            );
            count += 1;
        }
    }
    count
}
