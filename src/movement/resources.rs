//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct PlayerTuning {
    pub move_speed: f32,
    /// Knockback force applied to enemies the player body bumps into
    pub push_force: f32,
    pub max_health: u32,
    pub body_radius: f32,
    pub linear_damping: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            push_force: 10.0,
            max_health: 10,
            body_radius: 0.4,
            linear_damping: 5.0,
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    /// Normalized (or zero) movement direction
    pub axis: Vec2,
}
