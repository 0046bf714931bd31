//! Sprites domain: tests for animation parameters and sprite flipping.

use avian2d::prelude::LinearVelocity;
use bevy::prelude::*;

use super::{
    AnimationParams, finish_attack_animations, sprite_flip, trigger_attack_animations,
    update_animation_params,
};
use crate::combat::ai::{BehaviorConfig, EnemyBrain};
use crate::combat::{AttackFinishedEvent, AttackStartedEvent};
use crate::movement::MovementState;

#[test]
fn test_moving_flip_follows_velocity() {
    assert!(sprite_flip(false, Vec2::new(-2.0, 0.0), Vec2::X));
    assert!(!sprite_flip(true, Vec2::new(2.0, 0.0), Vec2::NEG_X));
}

#[test]
fn test_moving_vertically_keeps_facing() {
    assert!(sprite_flip(true, Vec2::new(0.05, 3.0), Vec2::X));
    assert!(!sprite_flip(false, Vec2::new(-0.05, -3.0), Vec2::NEG_X));
}

#[test]
fn test_idle_flip_follows_aim() {
    assert!(sprite_flip(false, Vec2::ZERO, Vec2::new(-0.5, 0.5)));
    assert!(!sprite_flip(true, Vec2::new(0.1, 0.1), Vec2::new(0.5, 0.5)));
    assert!(sprite_flip(true, Vec2::ZERO, Vec2::new(0.005, 1.0)));
}

#[test]
fn test_params_and_sprite_follow_body() {
    let mut app = App::new();
    app.add_message::<AttackStartedEvent>().add_systems(
        Update,
        (update_animation_params, trigger_attack_animations),
    );

    let player = app
        .world_mut()
        .spawn((
            LinearVelocity(Vec2::new(-3.0, 0.0)),
            AnimationParams::default(),
            Sprite::default(),
            MovementState::default(),
        ))
        .id();

    app.world_mut().write_message(AttackStartedEvent {
        attacker: player,
        attack_point: Vec2::ZERO,
        direction: Vec2::X,
    });
    app.update();

    let params = app.world().get::<AnimationParams>(player).unwrap();
    assert!(params.moving);
    assert_eq!(params.move_vector, Vec2::new(-3.0, 0.0));
    assert!(params.flip_x);
    assert_eq!(params.attack_triggers, 1);
    assert!(app.world().get::<Sprite>(player).unwrap().flip_x);
}

#[test]
fn test_attacking_flag_spans_start_to_finish() {
    let mut app = App::new();
    app.add_message::<AttackStartedEvent>()
        .add_message::<AttackFinishedEvent>()
        .add_systems(
            Update,
            (trigger_attack_animations, finish_attack_animations).chain(),
        );

    let enemy = app.world_mut().spawn(AnimationParams::default()).id();

    app.world_mut().write_message(AttackStartedEvent {
        attacker: enemy,
        attack_point: Vec2::X,
        direction: Vec2::X,
    });
    app.update();
    assert!(app.world().get::<AnimationParams>(enemy).unwrap().attacking);

    app.world_mut()
        .write_message(AttackFinishedEvent { attacker: enemy });
    app.update();
    let params = app.world().get::<AnimationParams>(enemy).unwrap();
    assert!(!params.attacking);
    assert_eq!(params.attack_triggers, 1);
}

#[test]
fn test_idle_enemy_sprite_faces_player() {
    let mut app = App::new();
    app.add_systems(Update, update_animation_params);

    let mut brain = EnemyBrain::new(BehaviorConfig::new(8.0, 1.5, 3.0).unwrap());
    // Far outside chase range: the aim stays put but the sprite turns
    brain.tick(0.016, Vec2::ZERO, Vec2::new(-50.0, 0.0), false);
    assert_eq!(brain.facing(), Vec2::X);

    let enemy = app
        .world_mut()
        .spawn((
            LinearVelocity::default(),
            AnimationParams::default(),
            Sprite::default(),
            brain,
        ))
        .id();
    app.update();

    assert!(app.world().get::<AnimationParams>(enemy).unwrap().flip_x);
    assert!(app.world().get::<Sprite>(enemy).unwrap().flip_x);
}
