//! Тесты детерминизма
//!
//! Один seed → один и тот же лабиринт, расстановка и исход боя

use bevy::prelude::*;
use mazerun_simulation::*;

const TICK_MS: u64 = 16;

fn small_level(seed: u64) -> (App, LevelInfo) {
    let mut app = create_headless_app(seed);
    app.world_mut().insert_resource(LevelConfig {
        maze_width: 11,
        maze_height: 11,
        enemy_count: 6,
        ..Default::default()
    });
    let info = build_maze_level(app.world_mut());
    (app, info)
}

/// Прогон: игрок идёт вперёд и стреляет каждые 30 tick'ов
fn run_simulation(seed: u64, tick_count: usize) -> Vec<u8> {
    let (mut app, _) = small_level(seed);
    app.world_mut().insert_resource(PlayerInput {
        forward: true,
        ..Default::default()
    });

    for tick in 0..tick_count {
        if tick % 30 == 0 {
            app.world_mut().send_event(PlayerShootIntent);
        }
        if tick % 200 == 0 {
            app.world_mut().send_event(ReloadIntent);
        }
        step_simulation(app.world_mut(), TICK_MS);
    }

    let world = app.world_mut();
    let mut snapshot = world_snapshot::<Transform>(world);
    snapshot.extend(world_snapshot::<Health>(world));
    snapshot.extend(world_snapshot::<EnemyBrain>(world));
    snapshot.extend(world_snapshot::<AmmoState>(world));
    snapshot
}

#[test]
fn test_level_same_seed_same_layout() {
    let (mut first, first_info) = small_level(12345);
    let (mut second, second_info) = small_level(12345);

    assert_eq!(first_info, second_info);
    assert_eq!(
        first.world().resource::<MazeGraph>(),
        second.world().resource::<MazeGraph>()
    );
    assert_eq!(
        world_snapshot::<Transform>(first.world_mut()),
        world_snapshot::<Transform>(second.world_mut())
    );
}

#[test]
fn test_level_different_seed_different_layout() {
    let (first, _) = small_level(1);
    let (second, _) = small_level(2);

    assert_ne!(
        first.world().resource::<MazeGraph>(),
        second.world().resource::<MazeGraph>()
    );
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    const TICK_COUNT: usize = 400;

    let snapshot1 = run_simulation(SEED, TICK_COUNT);
    let snapshot2 = run_simulation(SEED, TICK_COUNT);

    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;
    const TICK_COUNT: usize = 200;

    let snapshots: Vec<_> = (0..3).map(|_| run_simulation(SEED, TICK_COUNT)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

#[test]
fn test_level_is_walled_and_connected() {
    let (app, info) = small_level(7);
    let maze = app.world().resource::<MazeGraph>();

    assert!(maze.is_fully_connected());
    assert!(maze.walls_are_symmetric());
    assert!(info.wall_count > 0);
    assert!(info.enemy_count <= 6);
    assert_eq!(app.world().resource::<SceneRegistry>().enemies().len(), info.enemy_count);
}
