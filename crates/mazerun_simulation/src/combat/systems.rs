//! Combat systems: выстрел игрока через hitscan pipeline.

use bevy::prelude::*;
use rand::Rng;

use super::{
    resolve_shot, EffectKind, EffectTriggered, EnemyDefeated, HitOutcome, ShotResolved,
};
use crate::components::{Enemy, Health, Player};
use crate::config::WeaponData;
use crate::scene::SceneRegistry;
use crate::spatial::CollisionWorld;
use crate::weapon::{AmmoState, FireRejectedEvent, PlayerShootIntent};
use crate::DeterministicRng;

/// Шанс реплики "I'm hit" вместо обычного звука попадания
const VOICE_LINE_CHANCE: f32 = 0.05;

/// Длина трассера при промахе
const MISS_TRACER_LENGTH: f32 = 100.0;

/// Система: PlayerShootIntent → AmmoState::fire → resolve_shot
///
/// Порядок внутри tick'а: после AI (агенты уже сдвинулись) и после
/// повторной синхронизации CollisionWorld.
#[allow(clippy::too_many_arguments)]
pub fn process_player_shots(
    mut commands: Commands,
    mut intents: EventReader<PlayerShootIntent>,
    weapon: Res<WeaponData>,
    collision: Res<CollisionWorld>,
    mut registry: ResMut<SceneRegistry>,
    mut rng: ResMut<DeterministicRng>,
    mut players: Query<(&Transform, &Health, &mut AmmoState), (With<Player>, Without<Enemy>)>,
    mut healths: Query<&mut Health, With<Enemy>>,
    mut resolved: EventWriter<ShotResolved>,
    mut rejected: EventWriter<FireRejectedEvent>,
    mut defeated: EventWriter<EnemyDefeated>,
    mut effects: EventWriter<EffectTriggered>,
) {
    for _ in intents.read() {
        let Ok((transform, player_health, mut ammo)) = players.single_mut() else {
            crate::logger::log_warning("PlayerShootIntent: player entity not found");
            continue;
        };

        if let Err(reason) = ammo.fire(player_health.is_dead()) {
            crate::logger::log(&format!("🔫 Can't shoot: {}", reason));
            rejected.write(FireRejectedEvent { reason });
            continue;
        }

        let origin = transform.translation;
        let direction = transform.forward().as_vec3();
        let tracer_from = origin - Vec3::Y * 0.1 + Vec3::new(direction.x, 0.0, direction.z) * 0.5;

        let outcome = resolve_shot(
            &*collision,
            &mut registry,
            &mut healths,
            &mut commands,
            origin,
            direction,
            weapon.shot_base_damage,
            &mut rng.rng,
        );

        let tracer_to = outcome
            .point()
            .unwrap_or(tracer_from + direction * MISS_TRACER_LENGTH);
        effects.write(EffectTriggered {
            kind: EffectKind::Tracer { from: tracer_from },
            position: tracer_to,
        });

        match outcome {
            HitOutcome::Miss => {
                crate::logger::log("🔫 Shot missed everything");
            }
            HitOutcome::NonTargetHit { point, .. } => {
                effects.write(EffectTriggered {
                    kind: EffectKind::ImpactFlash { on_enemy: false },
                    position: point,
                });
            }
            HitOutcome::AgentHit {
                agent,
                zone,
                is_critical,
                defeated: was_defeated,
                point,
                ..
            } => {
                let heavy = zone.is_head();
                effects.write_batch([
                    EffectTriggered {
                        kind: EffectKind::ImpactFlash { on_enemy: true },
                        position: point,
                    },
                    EffectTriggered {
                        kind: EffectKind::BloodSplatter { heavy },
                        position: point,
                    },
                    EffectTriggered {
                        kind: EffectKind::HitSound {
                            voice_line: rng.rng.gen::<f32>() < VOICE_LINE_CHANCE,
                        },
                        position: point,
                    },
                ]);

                if is_critical {
                    effects.write(EffectTriggered {
                        kind: EffectKind::CriticalFlash,
                        position: point,
                    });
                }

                if was_defeated {
                    defeated.write(EnemyDefeated {
                        entity: agent,
                        critical: is_critical,
                    });
                } else {
                    effects.write(EffectTriggered {
                        kind: EffectKind::DamageFlash { agent },
                        position: point,
                    });
                }
            }
        }

        resolved.write(ShotResolved { outcome });
    }
}
