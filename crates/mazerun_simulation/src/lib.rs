//! MAZERUN Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: лабиринт, враги с FSM, hitscan combat.
//!
//! Один логический tick = один прогон schedule `SimTick` (single-threaded):
//! Sync → Player → Enemies → Resync → Combat → Cleanup.
//! Host (клиент с рендером/вводом) шлёт команды-события и читает HudStatus,
//! EffectTriggered и прочие события.

use bevy::ecs::schedule::{ExecutorKind, ScheduleLabel};
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod clock;
pub mod combat;
pub mod components;
pub mod config;
pub mod level;
pub mod logger;
pub mod maze;
pub mod player;
pub mod scene;
pub mod spatial;
pub mod weapon;

// Re-export для удобства
pub use ai::{AIPlugin, EnemyBrain, EnemyState};
pub use clock::SimClock;
pub use combat::{
    CombatPlugin, EffectKind, EffectTriggered, EnemyDefeated, HitOutcome, PlayerDamaged, PlayerDied, ShotResolved,
};
pub use components::*;
pub use config::{ConfigError, EnemySettings, LevelConfig, PlayerConfig, SimulationConfig, WeaponData};
pub use level::{build_maze_level, spawn_enemy, LevelInfo, SpawnRejected};
pub use logger::init_logger;
pub use maze::MazeGraph;
pub use player::{spawn_player, HudStatus, InteractIntent, PlayerInput, PlayerPlugin};
pub use scene::SceneRegistry;
pub use spatial::{CollisionWorld, RayIntersect};
pub use weapon::{AmmoState, PlayerShootIntent, ReloadIntent, WeaponPlugin};

/// Seed по умолчанию (если host не задал свой)
pub const DEFAULT_SEED: u64 = 42;

/// Schedule одного логического tick'а
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimTick;

/// Фазы tick'а (выполняются строго по порядку)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    /// CollisionWorld ← Transform + Collider
    Sync,
    /// Движение игрока, interaction, перезарядка
    Player,
    /// Enemy FSM
    Enemies,
    /// CollisionWorld после движения агентов
    Resync,
    /// Урон по игроку, выстрелы игрока
    Combat,
    /// Expiry эффектов, HUD
    Cleanup,
}

/// Run condition: игрок существует и жив (game over замораживает мир)
pub fn player_alive(players: Query<&Health, With<Player>>) -> bool {
    players.single().is_ok_and(|health| health.is_alive())
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_schedule(SimTick);
        app.edit_schedule(SimTick, |schedule| {
            // Детерминизм: никакого параллелизма внутри tick'а
            schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        });

        app.configure_sets(
            SimTick,
            (
                TickSet::Sync,
                TickSet::Player.run_if(player_alive),
                TickSet::Enemies.run_if(player_alive),
                TickSet::Resync,
                TickSet::Combat,
                TickSet::Cleanup,
            )
                .chain(),
        );

        // Seed от host'а не перетираем
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(DEFAULT_SEED));
        }

        app.init_resource::<SimClock>()
            .init_resource::<SceneRegistry>()
            .init_resource::<CollisionWorld>()
            .init_resource::<LevelConfig>()
            .init_resource::<EnemySettings>()
            .init_resource::<WeaponData>()
            .init_resource::<PlayerConfig>()
            .register_type::<Health>()
            .register_type::<SceneNode>()
            .register_type::<ZonePart>()
            .register_type::<EnemyProfile>();

        app.add_plugins((WeaponPlugin, PlayerPlugin, AIPlugin, CombatPlugin));

        app.add_systems(SimTick, spatial::sync_collision_world.in_set(TickSet::Sync))
            .add_systems(SimTick, spatial::sync_collision_world.in_set(TickSet::Resync));
    }
}

/// Гоняет `SimTick` из FixedUpdate (для host App с реальным временем)
pub struct FixedTickDriverPlugin;

impl Plugin for FixedTickDriverPlugin {
    fn build(&self, app: &mut App) {
        // Fixed timestep 60Hz для simulation tick
        app.insert_resource(Time::<Fixed>::from_hz(60.0))
            .add_systems(FixedUpdate, drive_sim_tick);
    }
}

fn drive_sim_tick(world: &mut World) {
    let delta_ms = world
        .get_resource::<Time>()
        .map_or(0, |time| time.delta().as_millis() as u64);

    world.get_resource_or_insert_with(SimClock::default).advance(delta_ms);
    if let Err(error) = world.try_run_schedule(SimTick) {
        crate::logger::log_error(&format!("SimTick failed to run: {:?}", error));
    }
}

/// Один tick вручную: часы += delta, события ротируются, SimTick.
///
/// Для headless прогонов и тестов (без App::update). Команды, отправленные
/// до вызова, обрабатываются в этом tick'е; события tick'а доступны после.
pub fn step_simulation(world: &mut World, delta_ms: u64) {
    rotate_events(world);
    world.get_resource_or_insert_with(SimClock::default).advance(delta_ms);

    if let Err(error) = world.try_run_schedule(SimTick) {
        crate::logger::log_error(&format!("SimTick failed to run: {:?}", error));
    }
}

fn rotate<E: Event>(world: &mut World) {
    if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
        events.update();
    }
}

/// Double-buffer rotation (без неё события копятся между ручными tick'ами)
fn rotate_events(world: &mut World) {
    rotate::<PlayerShootIntent>(world);
    rotate::<ReloadIntent>(world);
    rotate::<InteractIntent>(world);
    rotate::<weapon::ReloadStarted>(world);
    rotate::<weapon::ReloadFinished>(world);
    rotate::<weapon::FireRejectedEvent>(world);
    rotate::<PlayerDamaged>(world);
    rotate::<PlayerDied>(world);
    rotate::<EnemyDefeated>(world);
    rotate::<ShotResolved>(world);
    rotate::<EffectTriggered>(world);
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Уровень не строится: вызови `build_maze_level(app.world_mut())`.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
