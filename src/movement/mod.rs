//! Movement domain: player locomotion plugin wiring and public exports.

mod bootstrap;
mod components;
mod resources;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{GameLayer, MovementState, Player, Wall};
pub use resources::{MovementInput, PlayerTuning};

use bevy::prelude::*;

use crate::movement::bootstrap::spawn_player;
use crate::movement::systems::{apply_player_movement, read_input, update_facing, update_timers};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerTuning>()
            .init_resource::<MovementInput>()
            .add_systems(Startup, spawn_player)
            .add_systems(Update, (read_input, update_timers, update_facing).chain())
            .add_systems(FixedUpdate, apply_player_movement);
    }
}
