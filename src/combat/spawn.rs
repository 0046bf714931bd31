//! Combat domain: enemy and arena spawning helpers.

use std::f32::consts::TAU;

use avian2d::prelude::*;
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::combat::ai::{AimPivot, BehaviorConfig, EnemyBrain, MoveIntent};
use crate::combat::attacks::{AttackSequencer, MeleeProfile};
use crate::combat::components::{Combatant, Enemy, Health, KnockbackReceiver, Team};
use crate::combat::resources::{ArenaTuning, EnemyTuning, KnockbackTuning, MeleeTuning};
use crate::movement::{GameLayer, Wall};
use crate::sprites::AnimationParams;

/// Bundle for spawning a melee enemy
#[derive(Bundle)]
pub struct EnemyBundle {
    pub enemy: Enemy,
    pub combatant: Combatant,
    pub team: Team,
    pub health: Health,
    pub knockback: KnockbackReceiver,
    pub brain: EnemyBrain,
    pub sequencer: AttackSequencer,
    pub intent: MoveIntent,
    pub animation: AnimationParams,
    pub sprite: Sprite,
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub collision_events: CollisionEventsEnabled,
    pub collision_layers: CollisionLayers,
    pub velocity: LinearVelocity,
    pub damping: LinearDamping,
    pub locked_axes: LockedAxes,
    pub gravity_scale: GravityScale,
}

impl EnemyBundle {
    pub fn new(
        position: Vec2,
        config: BehaviorConfig,
        profile: MeleeProfile,
        tuning: &EnemyTuning,
        knockback: &KnockbackTuning,
    ) -> Self {
        let size = Vec2::splat(tuning.body_radius * 2.0);

        Self {
            enemy: Enemy,
            combatant: Combatant,
            team: Team::Enemy,
            health: Health::new(tuning.max_health),
            knockback: KnockbackReceiver::new(knockback.suspension),
            brain: EnemyBrain::new(config),
            sequencer: AttackSequencer::new(profile),
            intent: MoveIntent::default(),
            animation: AnimationParams::default(),
            sprite: Sprite {
                color: Color::srgb(0.8, 0.25, 0.25),
                custom_size: Some(size),
                ..default()
            },
            transform: Transform::from_xyz(position.x, position.y, 1.0),
            rigid_body: RigidBody::Dynamic,
            collider: Collider::circle(tuning.body_radius),
            collision_events: CollisionEventsEnabled,
            collision_layers: CollisionLayers::new(
                GameLayer::Enemy,
                [
                    GameLayer::Wall,
                    GameLayer::Player,
                    GameLayer::Enemy,
                    GameLayer::PlayerHitbox,
                ],
            ),
            velocity: LinearVelocity::default(),
            // High damping so knockback velocity decays quickly
            damping: LinearDamping(tuning.linear_damping),
            locked_axes: LockedAxes::ROTATION_LOCKED,
            gravity_scale: GravityScale(0.0),
        }
    }
}

/// Spawn an enemy with its aim pivot child.
pub fn spawn_enemy(commands: &mut Commands, name: String, bundle: EnemyBundle) -> Entity {
    let reach = bundle.sequencer.profile().reach();

    commands
        .spawn((Name::new(name), bundle))
        .with_children(|parent| {
            parent.spawn((
                AimPivot,
                Transform::default(),
                Visibility::default(),
            ))
            .with_children(|pivot| {
                pivot.spawn((
                    Sprite {
                        color: Color::srgb(0.95, 0.6, 0.2),
                        custom_size: Some(Vec2::new(reach, 0.12)),
                        ..default()
                    },
                    Transform::from_xyz(reach * 0.5, 0.0, 0.1),
                ));
            });
        })
        .id()
}

/// Deterministic enemy positions on a ring around the origin.
pub fn enemy_positions(arena: &ArenaTuning) -> Vec<Vec2> {
    let mut rng = ChaCha8Rng::seed_from_u64(arena.seed);
    let inner = arena.spawn_radius_min.min(arena.spawn_radius_max);
    let outer = arena.spawn_radius_min.max(arena.spawn_radius_max);
    let limit = (arena.half_extent - 1.0).max(0.0);

    (0..arena.enemy_count)
        .map(|_| {
            let angle = rng.random_range(0.0..TAU);
            let radius = rng.random_range(inner..=outer);
            let position = Vec2::from_angle(angle) * radius;
            position.clamp(Vec2::splat(-limit), Vec2::splat(limit))
        })
        .collect()
}

fn spawn_walls(commands: &mut Commands, arena: &ArenaTuning) {
    let span = arena.half_extent * 2.0 + arena.wall_thickness * 2.0;
    let offset = arena.half_extent + arena.wall_thickness * 0.5;
    let walls = [
        (Vec2::new(0.0, offset), Vec2::new(span, arena.wall_thickness)),
        (Vec2::new(0.0, -offset), Vec2::new(span, arena.wall_thickness)),
        (Vec2::new(offset, 0.0), Vec2::new(arena.wall_thickness, span)),
        (Vec2::new(-offset, 0.0), Vec2::new(arena.wall_thickness, span)),
    ];

    for (position, size) in walls {
        commands.spawn((
            Wall,
            Sprite {
                color: Color::srgb(0.3, 0.3, 0.35),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            CollisionLayers::new(
                GameLayer::Wall,
                [GameLayer::Player, GameLayer::Enemy, GameLayer::PlayerHitbox],
            ),
        ));
    }
}

pub(crate) fn spawn_arena(
    mut commands: Commands,
    arena: Res<ArenaTuning>,
    enemy: Res<EnemyTuning>,
    melee: Res<MeleeTuning>,
    knockback: Res<KnockbackTuning>,
) {
    spawn_walls(&mut commands, &arena);

    let config = match BehaviorConfig::try_from(&*enemy) {
        Ok(config) => config,
        Err(e) => {
            error!("Enemy tuning rejected, no enemies spawned: {}", e);
            return;
        }
    };
    let profile = match MeleeProfile::try_from(&*melee) {
        Ok(profile) => profile,
        Err(e) => {
            error!("Melee tuning rejected, no enemies spawned: {}", e);
            return;
        }
    };

    let positions = enemy_positions(&arena);
    for (i, position) in positions.iter().enumerate() {
        let bundle = EnemyBundle::new(*position, config, profile, &enemy, &knockback);
        spawn_enemy(&mut commands, format!("Enemy {}", i + 1), bundle);
    }

    info!(
        "Arena ready: {} enemies (seed {})",
        positions.len(),
        arena.seed
    );
}
