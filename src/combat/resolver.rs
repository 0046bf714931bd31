//! Combat domain: hit detection queries and knockback direction policies.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::components::Team;
use crate::movement::GameLayer;

/// Where a hit's knockback pushes the target from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnockbackPolicy {
    /// From the attacking body or hit volume centre toward the target
    FromAttacker,
    /// From the owner's body toward the target; nothing if the owner is gone
    FromAnchor,
    /// Along the attacker's direction of travel
    AlongTravel,
}

/// Normalize `direction`, falling back to +X when it has no length.
pub fn direction_or_default(direction: Vec2) -> Vec2 {
    let dir = direction.normalize_or_zero();
    if dir == Vec2::ZERO { Vec2::X } else { dir }
}

/// Resolve a knockback direction for a hit on a target at `target`.
///
/// Returns `None` only for [`KnockbackPolicy::FromAnchor`] without an anchor.
pub fn knockback_direction(
    policy: KnockbackPolicy,
    origin: Vec2,
    anchor: Option<Vec2>,
    travel: Vec2,
    target: Vec2,
) -> Option<Vec2> {
    let raw = match policy {
        KnockbackPolicy::FromAttacker => target - origin,
        KnockbackPolicy::FromAnchor => target - anchor?,
        KnockbackPolicy::AlongTravel => travel,
    };
    Some(direction_or_default(raw))
}

/// Entities whose colliders on `layer` overlap a circle, each reported once.
pub fn area_targets(
    spatial: &SpatialQuery,
    center: Vec2,
    radius: f32,
    layer: GameLayer,
) -> Vec<Entity> {
    let mut hits = spatial.shape_intersections(
        &Collider::circle(radius),
        center,
        0.0,
        &SpatialQueryFilter::from_mask(layer),
    );
    hits.sort_unstable();
    hits.dedup();
    hits
}

/// A sensor region owned by an attacker that damages each target at most once.
#[derive(Component, Debug)]
pub struct HitVolume {
    pub owner: Entity,
    pub team: Team,
    pub damage: u32,
    pub knockback_force: f32,
    pub policy: KnockbackPolicy,
    single_use: bool,
    spent: bool,
    hit_entities: Vec<Entity>,
}

impl HitVolume {
    pub fn new(
        owner: Entity,
        team: Team,
        damage: u32,
        knockback_force: f32,
        policy: KnockbackPolicy,
    ) -> Self {
        Self {
            owner,
            team,
            damage,
            knockback_force,
            policy,
            single_use: false,
            spent: false,
            hit_entities: Vec::new(),
        }
    }

    /// Stop registering contacts after the first one that qualifies.
    pub fn single_use(mut self) -> Self {
        self.single_use = true;
        self
    }

    pub fn is_spent(&self) -> bool {
        self.spent
    }

    pub fn has_hit(&self, target: Entity) -> bool {
        self.hit_entities.contains(&target)
    }

    /// Record a contact. Returns true when it should deal damage.
    pub fn register_contact(&mut self, target: Entity, target_team: Team) -> bool {
        if self.spent
            || target == self.owner
            || !self.team.is_hostile_to(target_team)
            || self.has_hit(target)
        {
            return false;
        }

        self.hit_entities.push(target);
        if self.single_use {
            self.spent = true;
        }
        true
    }
}
