//! Combat domain: components and combat-related state types.

use bevy::prelude::*;

use crate::core::Countdown;

/// Marks an entity as a combat participant
#[derive(Component, Debug)]
pub struct Combatant;

#[derive(Component, Debug)]
pub struct Enemy;

/// Team affiliation to prevent friendly fire
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    Player,
    Enemy,
}

impl Team {
    pub fn is_hostile_to(self, other: Team) -> bool {
        self != other
    }
}

/// Result of a single [`Health::take_damage`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// The pool was already dead; nothing changed.
    Ignored,
    Wounded { applied: u32 },
    /// This call brought the pool to zero. Returned at most once per pool.
    Killed { applied: u32 },
}

/// Health pool for damageable entities.
///
/// Once it reaches zero the pool is dead for good; later damage is ignored.
#[derive(Component, Debug, Clone)]
pub struct Health {
    current: u32,
    max: u32,
    dead: bool,
}

impl Health {
    pub fn new(max: u32) -> Self {
        let max = max.max(1);
        Self {
            current: max,
            max,
            dead: false,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        if self.dead {
            return DamageOutcome::Ignored;
        }

        let applied = amount.min(self.current);
        self.current -= applied;

        if self.current == 0 {
            self.dead = true;
            DamageOutcome::Killed { applied }
        } else {
            DamageOutcome::Wounded { applied }
        }
    }
}

/// Receives physical knockback and reports how long its owner is suspended.
#[derive(Component, Debug, Clone)]
pub struct KnockbackReceiver {
    /// Seconds the owner's behavior is suspended per knockback, regardless of force
    pub suspension: f32,
}

impl KnockbackReceiver {
    pub fn new(suspension: f32) -> Self {
        Self {
            suspension: suspension.max(0.0),
        }
    }

    /// Zero `velocity`, then add the impulse `direction * force`.
    ///
    /// The impulse is a velocity change, so it does not depend on frame time.
    /// Returns the suspension duration to impose on the owner.
    pub fn apply(&self, velocity: &mut Vec2, direction: Vec2, force: f32) -> f32 {
        *velocity = Vec2::ZERO;
        *velocity += direction.normalize_or_zero() * force;
        self.suspension
    }
}

/// Despawns the entity once the countdown runs out (visual effects, swings).
#[derive(Component, Debug)]
pub struct Lifetime(pub Countdown);

impl Lifetime {
    pub fn seconds(duration: f32) -> Self {
        Self(Countdown::armed(duration))
    }
}

/// Short-lived visual spawned at an enemy's attack point
#[derive(Component, Debug)]
pub struct AttackVisual;
