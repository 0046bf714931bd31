//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::core::Countdown;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Arena walls and other blocking surfaces
    Wall,
    /// Player character
    Player,
    /// Enemy characters
    Enemy,
    /// Player hit volumes and projectiles (damage enemies)
    PlayerHitbox,
}

/// Capability marker: the single entity enemies target.
#[derive(Component, Debug)]
pub struct Player;

/// Marker for blocking wall colliders
#[derive(Component, Debug)]
pub struct Wall;

#[derive(Component, Debug, Clone)]
pub struct MovementState {
    /// Last non-zero input direction; used to aim weapons.
    pub facing: Vec2,
    /// Knockback lock: input is ignored until it expires.
    pub suspension: Countdown,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            facing: Vec2::X,
            suspension: Countdown::ready(),
        }
    }
}

impl MovementState {
    pub fn suspend(&mut self, duration: f32) {
        self.suspension.extend_to(duration);
    }

    pub fn is_suspended(&self) -> bool {
        !self.suspension.is_ready()
    }
}
