//! Combat domain: combat systems for input, hits, damage, and cleanup.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::ai::EnemyBrain;
use crate::combat::attacks::AttackSequencer;
use crate::combat::components::{
    AttackVisual, Combatant, DamageOutcome, Enemy, Health, KnockbackReceiver, Lifetime, Team,
};
use crate::combat::events::{
    AttackFinishedEvent, AttackStartedEvent, DamageEvent, DeathEvent, KnockbackEvent,
    MeleeStrikeEvent,
};
use crate::combat::projectile::spawn_projectile;
use crate::combat::resolver::{HitVolume, KnockbackPolicy, area_targets, knockback_direction};
use crate::combat::resources::{
    CombatInput, KnockbackTuning, MeleeTuning, ProjectileTuning, SwordTuning,
};
use crate::movement::{GameLayer, MovementState, Player, PlayerTuning};

/// Layer holding the bodies a team can hurt.
fn hostile_layer(team: Team) -> GameLayer {
    match team {
        Team::Player => GameLayer::Enemy,
        Team::Enemy => GameLayer::Player,
    }
}

/// Entity name for log lines, or its id when unnamed.
pub(crate) fn label(name: Option<&Name>, entity: Entity) -> String {
    name.map(|n| n.to_string())
        .unwrap_or_else(|| format!("{entity:?}"))
}

pub(crate) fn read_combat_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut input: ResMut<CombatInput>,
) {
    input.swing = keyboard.just_pressed(KeyCode::KeyJ) || mouse.just_pressed(MouseButton::Left);
    input.throw = keyboard.just_pressed(KeyCode::KeyK) || mouse.just_pressed(MouseButton::Right);
}

/// Spawn the sword swing volume and throw knives for the player.
pub(crate) fn process_player_attacks(
    mut commands: Commands,
    input: Res<CombatInput>,
    sword: Res<SwordTuning>,
    knife: Res<ProjectileTuning>,
    players: Query<(Entity, &Transform, &MovementState), With<Player>>,
) {
    if !input.swing && !input.throw {
        return;
    }

    for (entity, transform, movement) in &players {
        if movement.is_suspended() {
            continue;
        }

        let position = transform.translation.truncate();
        let facing = movement.facing;

        if input.swing {
            let center = position + facing * sword.reach;
            commands.spawn((
                Name::new("Sword Swing"),
                HitVolume::new(
                    entity,
                    Team::Player,
                    sword.damage,
                    sword.knockback_force,
                    KnockbackPolicy::FromAnchor,
                ),
                Lifetime::seconds(sword.duration),
                Sprite {
                    color: Color::srgba(1.0, 1.0, 0.6, 0.5),
                    custom_size: Some(Vec2::new(sword.radius * 2.0, sword.radius * 0.6)),
                    ..default()
                },
                Transform::from_xyz(center.x, center.y, 1.5)
                    .with_rotation(Quat::from_rotation_z(facing.to_angle())),
                Collider::circle(sword.radius),
                Sensor,
                CollisionEventsEnabled,
                CollisionLayers::new(GameLayer::PlayerHitbox, [GameLayer::Enemy]),
            ));
            debug!("Player swings toward {:?}", facing);
        }

        if input.throw {
            spawn_projectile(
                &mut commands,
                entity,
                Team::Player,
                position + facing * 0.5,
                facing,
                &knife,
            );
            debug!("Player throws a knife toward {:?}", facing);
        }
    }
}

pub(crate) fn tick_attack_sequencers(
    time: Res<Time>,
    mut strike_events: MessageWriter<MeleeStrikeEvent>,
    mut finished_events: MessageWriter<AttackFinishedEvent>,
    mut query: Query<(Entity, &Transform, &Team, &mut AttackSequencer)>,
) {
    let dt = time.delta_secs();

    for (entity, transform, team, mut sequencer) in &mut query {
        let step = sequencer.tick(dt);
        let origin = transform.translation.truncate();

        if step.struck {
            let profile = *sequencer.profile();
            strike_events.write(MeleeStrikeEvent {
                attacker: entity,
                team: *team,
                origin,
                center: sequencer.attack_point(origin),
                radius: profile.radius(),
                damage: profile.damage(),
                knockback_force: profile.knockback_force(),
            });
        }
        if step.finished {
            finished_events.write(AttackFinishedEvent { attacker: entity });
        }
    }
}

/// Hit every hostile combatant inside a strike's circle.
pub(crate) fn resolve_melee_strikes(
    spatial: SpatialQuery,
    mut strike_events: MessageReader<MeleeStrikeEvent>,
    mut damage_events: MessageWriter<DamageEvent>,
    mut knockback_events: MessageWriter<KnockbackEvent>,
    targets: Query<(&Team, &Transform), With<Combatant>>,
) {
    for strike in strike_events.read() {
        let hits = area_targets(
            &spatial,
            strike.center,
            strike.radius,
            hostile_layer(strike.team),
        );

        for target in hits {
            if target == strike.attacker {
                continue;
            }
            let Ok((team, transform)) = targets.get(target) else {
                continue;
            };
            if !strike.team.is_hostile_to(*team) {
                continue;
            }

            damage_events.write(DamageEvent {
                source: strike.attacker,
                target,
                amount: strike.damage,
            });

            if let Some(direction) = knockback_direction(
                KnockbackPolicy::FromAttacker,
                strike.origin,
                None,
                Vec2::ZERO,
                transform.translation.truncate(),
            ) {
                knockback_events.write(KnockbackEvent {
                    source: strike.attacker,
                    target,
                    direction,
                    force: strike.knockback_force,
                });
            }
            debug!("Melee strike from {:?} hit {:?}", strike.attacker, target);
        }
    }
}

pub(crate) fn spawn_attack_visuals(
    mut commands: Commands,
    mut started_events: MessageReader<AttackStartedEvent>,
    tuning: Res<MeleeTuning>,
) {
    for event in started_events.read() {
        let size = tuning.radius * 2.0;
        commands.spawn((
            AttackVisual,
            Lifetime::seconds(tuning.visual_lifetime),
            Sprite {
                color: Color::srgba(1.0, 0.3, 0.3, 0.5),
                custom_size: Some(Vec2::splat(size)),
                ..default()
            },
            Transform::from_xyz(event.attack_point.x, event.attack_point.y, 1.5)
                .with_rotation(Quat::from_rotation_z(event.direction.to_angle())),
        ));
    }
}

pub(crate) fn detect_hit_volume_contacts(
    mut collision_events: MessageReader<CollisionStart>,
    mut damage_events: MessageWriter<DamageEvent>,
    mut knockback_events: MessageWriter<KnockbackEvent>,
    mut volumes: Query<(&mut HitVolume, &Transform)>,
    targets: Query<(&Team, &Transform), With<Combatant>>,
    anchors: Query<&Transform, Without<HitVolume>>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (volume_entity, target) in pairs {
            let Ok((mut volume, volume_transform)) = volumes.get_mut(volume_entity) else {
                continue;
            };
            let Ok((team, target_transform)) = targets.get(target) else {
                continue;
            };
            if !volume.register_contact(target, *team) {
                continue;
            }

            damage_events.write(DamageEvent {
                source: volume.owner,
                target,
                amount: volume.damage,
            });

            let anchor = anchors
                .get(volume.owner)
                .ok()
                .map(|t| t.translation.truncate());
            if let Some(direction) = knockback_direction(
                volume.policy,
                volume_transform.translation.truncate(),
                anchor,
                Vec2::ZERO,
                target_transform.translation.truncate(),
            ) {
                knockback_events.write(KnockbackEvent {
                    source: volume.owner,
                    target,
                    direction,
                    force: volume.knockback_force,
                });
            }
        }
    }
}

/// Running into an enemy shoves it away from the player.
pub(crate) fn push_on_body_contact(
    mut collision_events: MessageReader<CollisionStart>,
    mut knockback_events: MessageWriter<KnockbackEvent>,
    tuning: Res<PlayerTuning>,
    players: Query<&Transform, With<Player>>,
    enemies: Query<&Transform, With<Enemy>>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (player, enemy) in pairs {
            let (Ok(player_transform), Ok(enemy_transform)) =
                (players.get(player), enemies.get(enemy))
            else {
                continue;
            };

            if let Some(direction) = knockback_direction(
                KnockbackPolicy::FromAttacker,
                player_transform.translation.truncate(),
                None,
                Vec2::ZERO,
                enemy_transform.translation.truncate(),
            ) {
                knockback_events.write(KnockbackEvent {
                    source: player,
                    target: enemy,
                    direction,
                    force: tuning.push_force,
                });
            }
        }
    }
}

pub(crate) fn apply_damage(
    mut damage_events: MessageReader<DamageEvent>,
    mut death_events: MessageWriter<DeathEvent>,
    mut query: Query<(&mut Health, Option<&Name>)>,
) {
    for event in damage_events.read() {
        let Ok((mut health, name)) = query.get_mut(event.target) else {
            continue;
        };

        match health.take_damage(event.amount) {
            DamageOutcome::Killed { applied } => {
                debug!("{} took {} fatal damage", label(name, event.target), applied);
                death_events.write(DeathEvent {
                    entity: event.target,
                });
            }
            DamageOutcome::Wounded { applied } => {
                debug!(
                    "{} took {} damage ({}/{})",
                    label(name, event.target),
                    applied,
                    health.current(),
                    health.max()
                );
            }
            DamageOutcome::Ignored => {}
        }
    }
}

pub(crate) fn apply_knockback(
    mut knockback_events: MessageReader<KnockbackEvent>,
    tuning: Res<KnockbackTuning>,
    mut query: Query<(
        &KnockbackReceiver,
        &mut LinearVelocity,
        Option<&mut EnemyBrain>,
        Option<&mut AttackSequencer>,
        Option<&mut MovementState>,
    )>,
) {
    for event in knockback_events.read() {
        let Ok((receiver, mut velocity, brain, sequencer, movement)) =
            query.get_mut(event.target)
        else {
            continue;
        };

        let duration = receiver.apply(&mut velocity.0, event.direction, event.force);

        if let Some(mut brain) = brain {
            brain.suspend(duration);
        }
        if tuning.interrupts_attacks {
            if let Some(mut sequencer) = sequencer {
                if sequencer.cancel() {
                    debug!("Knockback interrupted the attack of {:?}", event.target);
                }
            }
        }
        if let Some(mut movement) = movement {
            movement.suspend(duration);
        }
    }
}

pub(crate) fn process_deaths(
    mut commands: Commands,
    mut death_events: MessageReader<DeathEvent>,
    names: Query<Option<&Name>>,
) {
    for event in death_events.read() {
        let Ok(name) = names.get(event.entity) else {
            continue;
        };
        info!("{} has been defeated!", label(name, event.entity));
        commands.entity(event.entity).try_despawn();
    }
}

pub(crate) fn expire_lifetimes(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Lifetime)>,
) {
    let dt = time.delta_secs();
    for (entity, mut lifetime) in &mut query {
        lifetime.0.tick(dt);
        if lifetime.0.is_ready() {
            commands.entity(entity).try_despawn();
        }
    }
}
