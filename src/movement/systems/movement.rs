//! Movement domain: player locomotion on the physics step.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{MovementInput, MovementState, Player, PlayerTuning};

pub(crate) fn update_timers(time: Res<Time>, mut query: Query<&mut MovementState, With<Player>>) {
    let dt = time.delta_secs();
    for mut state in &mut query {
        state.suspension.tick(dt);
    }
}

pub(crate) fn update_facing(
    input: Res<MovementInput>,
    mut query: Query<&mut MovementState, With<Player>>,
) {
    if input.axis == Vec2::ZERO {
        return;
    }
    for mut state in &mut query {
        if !state.is_suspended() {
            state.facing = input.axis;
        }
    }
}

/// Velocity is set directly from input; knockback suspends it so the body coasts.
pub(crate) fn apply_player_movement(
    input: Res<MovementInput>,
    tuning: Res<PlayerTuning>,
    mut query: Query<(&MovementState, &mut LinearVelocity), With<Player>>,
) {
    for (state, mut velocity) in &mut query {
        if state.is_suspended() {
            continue;
        }
        velocity.0 = input.axis * tuning.move_speed;
    }
}
