//! Debug overlay for tuning combat ranges (dev-tools builds only).
//!
//! F1 or backquote toggles gizmos for enemy chase/attack ranges and the
//! hit area of attacks that are winding up.

use bevy::prelude::*;

use crate::combat::ai::EnemyBrain;
use crate::combat::{AttackPhase, AttackSequencer};

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    pub show_gizmos: bool,
}

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>().add_systems(
            Update,
            (
                toggle_debug_gizmos,
                draw_combat_gizmos.run_if(|state: Res<DebugState>| state.show_gizmos),
            )
                .chain(),
        );
    }
}

fn toggle_debug_gizmos(keyboard: Res<ButtonInput<KeyCode>>, mut debug_state: ResMut<DebugState>) {
    if keyboard.just_pressed(KeyCode::F1) || keyboard.just_pressed(KeyCode::Backquote) {
        debug_state.show_gizmos = !debug_state.show_gizmos;
        info!(
            "[DEBUG] Combat gizmos {}",
            if debug_state.show_gizmos { "ON" } else { "OFF" }
        );
    }
}

fn draw_combat_gizmos(
    mut gizmos: Gizmos,
    enemies: Query<(&Transform, &EnemyBrain, &AttackSequencer)>,
) {
    for (transform, brain, sequencer) in &enemies {
        let position = transform.translation.truncate();
        let config = brain.config();

        gizmos.circle_2d(position, config.chase_range(), Color::srgba(1.0, 1.0, 0.0, 0.4));
        gizmos.circle_2d(position, config.attack_range(), Color::srgba(1.0, 0.5, 0.0, 0.6));

        let color = if sequencer.phase() == AttackPhase::WindingUp {
            Color::srgb(1.0, 0.1, 0.1)
        } else {
            Color::srgba(1.0, 0.1, 0.1, 0.3)
        };
        gizmos.circle_2d(
            sequencer.attack_point(position),
            sequencer.profile().radius(),
            color,
        );
    }
}
