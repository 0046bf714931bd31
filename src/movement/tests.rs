//! Movement domain: tests for player movement and knockback suspension.

use avian2d::prelude::LinearVelocity;
use bevy::prelude::*;

use super::systems::apply_player_movement;
use super::{MovementInput, MovementState, Player, PlayerTuning};

fn movement_app(axis: Vec2) -> App {
    let mut app = App::new();
    app.insert_resource(MovementInput { axis })
        .insert_resource(PlayerTuning::default())
        .add_systems(Update, apply_player_movement);
    app
}

#[test]
fn test_suspension_keeps_longest_duration() {
    let mut state = MovementState::default();
    assert!(!state.is_suspended());

    state.suspend(0.3);
    state.suspend(0.1);
    assert!(state.is_suspended());
    assert!((state.suspension.remaining() - 0.3).abs() < 1e-6);

    state.suspension.tick(0.3);
    assert!(!state.is_suspended());
}

#[test]
fn test_default_facing_is_right() {
    assert_eq!(MovementState::default().facing, Vec2::X);
}

#[test]
fn test_player_velocity_follows_input() {
    let mut app = movement_app(Vec2::Y);
    let player = app
        .world_mut()
        .spawn((Player, MovementState::default(), LinearVelocity::default()))
        .id();

    app.update();

    let velocity = app.world().get::<LinearVelocity>(player).unwrap();
    assert_eq!(velocity.0, Vec2::Y * PlayerTuning::default().move_speed);
}

#[test]
fn test_suspended_player_coasts() {
    let mut app = movement_app(Vec2::Y);
    let mut state = MovementState::default();
    state.suspend(1.0);

    let player = app
        .world_mut()
        .spawn((Player, state, LinearVelocity(Vec2::new(-7.0, 0.0))))
        .id();

    app.update();

    let velocity = app.world().get::<LinearVelocity>(player).unwrap();
    assert_eq!(velocity.0, Vec2::new(-7.0, 0.0));
}
