//! Headless симуляция MAZERUN
//!
//! Строит уровень и гоняет tick'и без рендера (smoke-прогон AI и combat)

use mazerun_simulation::{build_maze_level, create_headless_app, logger, step_simulation, HudStatus, SceneRegistry};

fn main() {
    let seed = 42;
    let mut app = create_headless_app(seed);
    logger::set_log_level(logger::LogLevel::Info);
    logger::log_info(&format!("Starting MAZERUN headless simulation (seed: {})", seed));

    let info = build_maze_level(app.world_mut());
    logger::log_info(&format!("Level: {:?}", info));

    // 1000 тиков по 16ms
    for tick in 0..1000 {
        step_simulation(app.world_mut(), 16);

        if tick % 100 == 0 {
            let world = app.world();
            let enemies = world.resource::<SceneRegistry>().enemies().len();
            logger::log_info(&format!(
                "Tick {}: {} entities, {} enemies, HUD [{}]",
                tick,
                world.entities().len(),
                enemies,
                world.resource::<HudStatus>()
            ));
        }
    }

    logger::log_info("Simulation complete!");
}
