//! Enemy FSM tick: perception → transition → поведение состояния.

use bevy::prelude::*;

use super::attack::enemy_shoot;
use super::movement::{choose_patrol_target, face_towards, horizontal_distance, move_enemy, Facing, ARRIVAL_THRESHOLD};
use crate::ai::components::{cooldown_ready, EnemyBrain, EnemyState};
use crate::clock::SimClock;
use crate::combat::{defeat_enemy, DamageSource, EffectKind, EffectTriggered, EnemyDefeated, PlayerDamaged};
use crate::components::{Enemy, EnemyProfile, Health, Player};
use crate::config::EnemySettings;
use crate::scene::SceneRegistry;
use crate::spatial::{can_see_player, CollisionWorld};
use crate::DeterministicRng;

/// Система: обновление всех живых агентов
///
/// Порядок на агента:
/// 1. HP == 0 → снять со всех коллекций до оценки состояния
/// 2. Data-integrity guard: нет профиля/мозга или профиль невалиден → skip
/// 3. can_see_player → EnemyBrain::perceive (переход FSM)
/// 4. Поведение текущего состояния
///
/// Агенты перебираются по snapshot'у registry в обратном порядке, так что
/// снятие агента посреди цикла ничего не пропускает.
#[allow(clippy::too_many_arguments)]
pub fn update_enemies(
    mut commands: Commands,
    clock: Res<SimClock>,
    settings: Res<EnemySettings>,
    collision: Res<CollisionWorld>,
    mut registry: ResMut<SceneRegistry>,
    mut rng: ResMut<DeterministicRng>,
    players: Query<(Entity, &Transform), (With<Player>, Without<Enemy>)>,
    mut enemies: Query<(&mut Transform, &Health, Option<&EnemyProfile>, Option<&mut EnemyBrain>), With<Enemy>>,
    mut player_damage: EventWriter<PlayerDamaged>,
    mut effects: EventWriter<EffectTriggered>,
    mut defeated: EventWriter<EnemyDefeated>,
) {
    let Ok((player, player_transform)) = players.single() else {
        return;
    };
    let player_position = player_transform.translation;
    let now = clock.now_ms;
    let delta = clock.delta_secs;

    let agents = registry.enemies().to_vec();
    for &agent in agents.iter().rev() {
        let Ok((mut transform, health, profile, brain)) = enemies.get_mut(agent) else {
            crate::logger::log_warning(&format!("AI: live agent {:?} has no Enemy/Transform/Health, skipping", agent));
            continue;
        };

        if health.is_dead() {
            if defeat_enemy(&mut commands, &mut registry, agent) {
                defeated.write(EnemyDefeated {
                    entity: agent,
                    critical: false,
                });
            }
            continue;
        }

        let (Some(profile), Some(mut brain)) = (profile.copied(), brain) else {
            crate::logger::log_warning(&format!("AI: agent {:?} missing behavior profile, skipping tick", agent));
            continue;
        };
        if !profile.is_valid() {
            crate::logger::log_warning(&format!("AI: agent {:?} has invalid profile {:?}, skipping tick", agent, profile));
            continue;
        }

        let obstacles = registry.obstacles_except(agent);
        let position = transform.translation;
        let distance = position.distance(player_position);
        let sees_player = can_see_player(&*collision, position, player_position, &obstacles, settings.sight_range);

        if let Some((from, to)) = brain.perceive(sees_player, player_position, distance, now, &settings) {
            crate::logger::log(&format!(
                "🧠 Agent {:?}: {:?} → {:?} (distance {:.1}, visible {})",
                agent, from, to, distance, sees_player
            ));
        }

        let state = brain.state;
        let last_seen = brain.last_seen_position;
        match state {
            EnemyState::Patrol => {
                let needs_target = brain
                    .patrol_target
                    .map_or(true, |target| horizontal_distance(position, target) < ARRIVAL_THRESHOLD);
                if needs_target {
                    let spawn_point = brain.spawn_point;
                    brain.patrol_target = Some(choose_patrol_target(
                        &*collision,
                        position,
                        spawn_point,
                        &obstacles,
                        &mut rng.rng,
                    ));
                }

                if let Some(target) = brain.patrol_target {
                    move_enemy(&mut transform, target, profile.patrol_speed, delta, Facing::Movement);
                }
            }
            EnemyState::Chase => match last_seen {
                Some(last_seen) => {
                    move_enemy(&mut transform, last_seen, profile.movement_speed, delta, Facing::Target);
                    face_towards(&mut transform, last_seen);
                }
                None => {
                    // Память стёрта - сразу в патруль
                    brain.state = EnemyState::Patrol;
                }
            },
            EnemyState::Shooting => {
                face_towards(&mut transform, player_position);

                if cooldown_ready(brain.last_shot_ms, now, profile.shooting_cooldown_ms) {
                    let shot = enemy_shoot(
                        &*collision,
                        position,
                        player_position,
                        player,
                        &obstacles,
                        &profile,
                        settings.shooting_range,
                        &mut rng.rng,
                    );
                    brain.last_shot_ms = Some(now);

                    effects.write(EffectTriggered {
                        kind: EffectKind::EnemyMuzzleFlash { agent },
                        position,
                    });
                    if let Some(impact) = shot.impact {
                        effects.write(EffectTriggered {
                            kind: EffectKind::EnemyBulletImpact,
                            position: impact.point,
                        });
                    }
                    if let Some(amount) = shot.damage {
                        player_damage.write(PlayerDamaged {
                            attacker: agent,
                            amount,
                            source: DamageSource::Shot,
                        });
                    }
                }
            }
            EnemyState::Attack => {
                face_towards(&mut transform, player_position);

                if cooldown_ready(brain.last_attack_ms, now, profile.attack_cooldown_ms) {
                    brain.last_attack_ms = Some(now);
                    player_damage.write(PlayerDamaged {
                        attacker: agent,
                        amount: profile.melee_damage,
                        source: DamageSource::Melee,
                    });
                    crate::logger::log(&format!("👊 Agent {:?} melee attacks ({} dmg)", agent, profile.melee_damage));
                }
            }
        }
    }
}
