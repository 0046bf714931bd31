//! Movement domain: player spawning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{Combatant, Health, KnockbackReceiver, KnockbackTuning, Team};
use crate::movement::{GameLayer, MovementState, Player, PlayerTuning};
use crate::sprites::AnimationParams;

pub(crate) fn spawn_player(
    mut commands: Commands,
    tuning: Res<PlayerTuning>,
    knockback: Res<KnockbackTuning>,
    existing_player: Query<Entity, With<Player>>,
) {
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let size = Vec2::splat(tuning.body_radius * 2.0);

    commands.spawn((
        Name::new("Player"),
        // Identity & Movement
        (Player, MovementState::default(), AnimationParams::default()),
        // Combat
        (
            Combatant,
            Team::Player,
            Health::new(tuning.max_health),
            KnockbackReceiver::new(knockback.suspension),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 1.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::circle(tuning.body_radius),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            LinearDamping(tuning.linear_damping),
            GravityScale(0.0),
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::Player, [GameLayer::Wall, GameLayer::Enemy]),
        ),
    ));
}
