//! Animation parameters and sprite facing.
//!
//! Combat code only writes [`AnimationParams`]; clip selection reads them.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::combat::{AttackFinishedEvent, AttackStartedEvent};
use crate::combat::ai::EnemyBrain;
use crate::movement::MovementState;

/// Squared speed above which a body counts as moving.
pub const MOVING_SPEED_SQ: f32 = 0.1;
/// Horizontal velocity needed to flip while moving.
pub const MOVE_FLIP_THRESHOLD: f32 = 0.1;
/// Horizontal aim needed to flip while standing still.
pub const AIM_FLIP_THRESHOLD: f32 = 0.01;

/// Per-entity values an animator would read.
#[derive(Component, Debug, Default, Clone)]
pub struct AnimationParams {
    pub moving: bool,
    /// Current velocity while moving, zero otherwise.
    pub move_vector: Vec2,
    /// Sprite faces left.
    pub flip_x: bool,
    /// Incremented once per started attack.
    pub attack_triggers: u32,
    /// Between an attack starting and its recovery ending.
    pub attacking: bool,
}

/// Decide whether the sprite faces left.
///
/// Moving bodies face their velocity; idle ones face their aim. Inside the
/// dead zones the previous facing is kept.
pub fn sprite_flip(current: bool, velocity: Vec2, aim: Vec2) -> bool {
    if velocity.length_squared() > MOVING_SPEED_SQ {
        if velocity.x < -MOVE_FLIP_THRESHOLD {
            true
        } else if velocity.x > MOVE_FLIP_THRESHOLD {
            false
        } else {
            current
        }
    } else if aim.x < -AIM_FLIP_THRESHOLD {
        true
    } else if aim.x > AIM_FLIP_THRESHOLD {
        false
    } else {
        current
    }
}

pub fn update_animation_params(
    mut query: Query<(
        &LinearVelocity,
        &mut AnimationParams,
        &mut Sprite,
        Option<&EnemyBrain>,
        Option<&MovementState>,
    )>,
) {
    for (velocity, mut params, mut sprite, brain, movement) in &mut query {
        let aim = brain
            .map(|b| b.look())
            .or_else(|| movement.map(|m| m.facing))
            .unwrap_or(Vec2::ZERO);

        params.moving = velocity.0.length_squared() > MOVING_SPEED_SQ;
        params.move_vector = if params.moving { velocity.0 } else { Vec2::ZERO };
        params.flip_x = sprite_flip(params.flip_x, velocity.0, aim);

        if sprite.flip_x != params.flip_x {
            sprite.flip_x = params.flip_x;
        }
    }
}

pub fn trigger_attack_animations(
    mut started_events: MessageReader<AttackStartedEvent>,
    mut query: Query<&mut AnimationParams>,
) {
    for event in started_events.read() {
        if let Ok(mut params) = query.get_mut(event.attacker) {
            params.attack_triggers += 1;
            params.attacking = true;
        }
    }
}

pub fn finish_attack_animations(
    mut finished_events: MessageReader<AttackFinishedEvent>,
    mut query: Query<&mut AnimationParams>,
) {
    for event in finished_events.read() {
        if let Ok(mut params) = query.get_mut(event.attacker) {
            params.attacking = false;
        }
    }
}
