//! Sprites module: animation parameters and sprite flipping.

pub mod animation;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

pub use animation::*;

pub struct SpritesPlugin;

impl Plugin for SpritesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            (
                update_animation_params,
                (trigger_attack_animations, finish_attack_animations).chain(),
            ),
        );
    }
}
