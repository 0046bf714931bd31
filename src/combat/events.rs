//! Combat domain: combat-related events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::combat::components::Team;

#[derive(Debug)]
pub struct DamageEvent {
    pub source: Entity,
    pub target: Entity,
    pub amount: u32,
}

impl Message for DamageEvent {}

/// Velocity-change impulse for `target`; `direction` is already resolved by a knockback policy.
#[derive(Debug)]
pub struct KnockbackEvent {
    pub source: Entity,
    pub target: Entity,
    pub direction: Vec2,
    pub force: f32,
}

impl Message for KnockbackEvent {}

/// Written once, on the hit that empties a health pool
#[derive(Debug)]
pub struct DeathEvent {
    pub entity: Entity,
}

impl Message for DeathEvent {}

/// An attack request was accepted and the wind-up has begun
#[derive(Debug)]
pub struct AttackStartedEvent {
    pub attacker: Entity,
    pub attack_point: Vec2,
    pub direction: Vec2,
}

impl Message for AttackStartedEvent {}

/// Wind-up finished: resolve the melee hit area now
#[derive(Debug)]
pub struct MeleeStrikeEvent {
    pub attacker: Entity,
    pub team: Team,
    /// Attacker body position, the knockback origin
    pub origin: Vec2,
    pub center: Vec2,
    pub radius: f32,
    pub damage: u32,
    pub knockback_force: f32,
}

impl Message for MeleeStrikeEvent {}

#[derive(Debug)]
pub struct AttackFinishedEvent {
    pub attacker: Entity,
}

impl Message for AttackFinishedEvent {}
