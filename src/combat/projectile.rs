//! Combat domain: thrown projectiles, from launch to despawn.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::{Combatant, Team};
use crate::combat::events::{DamageEvent, KnockbackEvent};
use crate::combat::resolver::{KnockbackPolicy, knockback_direction};
use crate::combat::resources::ProjectileTuning;
use crate::core::{Countdown, VisibleRegion};
use crate::movement::{GameLayer, Wall};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectilePhase {
    Flying,
    /// Done; ignores every further contact and is despawned
    Spent,
}

/// What a projectile touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileContact {
    Combatant { entity: Entity, team: Team },
    Wall,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    Ignored,
    /// Damage the combatant that was touched
    Hit,
    Blocked,
}

#[derive(Component, Debug)]
pub struct Projectile {
    owner: Entity,
    team: Team,
    damage: u32,
    knockback_force: f32,
    lifetime: Countdown,
    phase: ProjectilePhase,
}

impl Projectile {
    pub fn new(owner: Entity, team: Team, damage: u32, knockback_force: f32, lifetime: f32) -> Self {
        Self {
            owner,
            team,
            damage,
            knockback_force,
            lifetime: Countdown::armed(lifetime),
            phase: ProjectilePhase::Flying,
        }
    }

    pub fn owner(&self) -> Entity {
        self.owner
    }

    pub fn damage(&self) -> u32 {
        self.damage
    }

    pub fn knockback_force(&self) -> f32 {
        self.knockback_force
    }

    pub fn phase(&self) -> ProjectilePhase {
        self.phase
    }

    pub fn is_spent(&self) -> bool {
        self.phase == ProjectilePhase::Spent
    }

    /// Returns true if this call is the one that spent the projectile.
    pub fn spend(&mut self) -> bool {
        let was_flying = self.phase == ProjectilePhase::Flying;
        self.phase = ProjectilePhase::Spent;
        was_flying
    }

    /// Age the projectile. It is spent once its lifetime runs out or it leaves view.
    pub fn tick(&mut self, dt: f32, in_view: bool) -> bool {
        if self.is_spent() {
            return false;
        }
        self.lifetime.tick(dt);
        if self.lifetime.is_ready() || !in_view {
            return self.spend();
        }
        false
    }

    pub fn register_contact(&mut self, contact: ProjectileContact) -> ContactOutcome {
        if self.is_spent() {
            return ContactOutcome::Ignored;
        }

        match contact {
            ProjectileContact::Combatant { entity, team } => {
                if entity == self.owner || !self.team.is_hostile_to(team) {
                    return ContactOutcome::Ignored;
                }
                self.spend();
                ContactOutcome::Hit
            }
            ProjectileContact::Wall => {
                self.spend();
                ContactOutcome::Blocked
            }
            ProjectileContact::Other => ContactOutcome::Ignored,
        }
    }
}

/// Sprite rotation that points along `velocity`, if it is moving.
pub fn orientation(velocity: Vec2) -> Option<Quat> {
    (velocity.length_squared() > f32::EPSILON).then(|| Quat::from_rotation_z(velocity.to_angle()))
}

pub fn spawn_projectile(
    commands: &mut Commands,
    owner: Entity,
    team: Team,
    origin: Vec2,
    direction: Vec2,
    tuning: &ProjectileTuning,
) -> Entity {
    let velocity = direction.normalize_or_zero() * tuning.speed;
    let mut transform = Transform::from_xyz(origin.x, origin.y, 2.0);
    if let Some(rotation) = orientation(velocity) {
        transform.rotation = rotation;
    }

    commands
        .spawn((
            Name::new("Knife"),
            Projectile::new(
                owner,
                team,
                tuning.damage,
                tuning.knockback_force,
                tuning.lifetime,
            ),
            Sprite {
                color: Color::srgb(0.85, 0.85, 0.9),
                custom_size: Some(Vec2::new(tuning.radius * 4.0, tuning.radius * 1.5)),
                ..default()
            },
            transform,
            (
                RigidBody::Dynamic,
                Collider::circle(tuning.radius),
                Sensor,
                CollisionEventsEnabled,
                CollisionLayers::new(GameLayer::PlayerHitbox, [GameLayer::Enemy, GameLayer::Wall]),
                LinearVelocity(velocity),
                GravityScale(0.0),
                LockedAxes::ROTATION_LOCKED,
            ),
        ))
        .id()
}

pub(crate) fn tick_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    region: Res<VisibleRegion>,
    tuning: Res<ProjectileTuning>,
    mut projectiles: Query<(Entity, &mut Projectile, &LinearVelocity, &mut Transform)>,
) {
    let dt = time.delta_secs();

    for (entity, mut projectile, velocity, mut transform) in &mut projectiles {
        if !projectile.is_spent() {
            if let Some(rotation) = orientation(velocity.0) {
                transform.rotation = rotation;
            }
            let in_view = region.contains(transform.translation.truncate(), tuning.view_margin);
            projectile.tick(dt, in_view);
        }

        if projectile.is_spent() {
            commands.entity(entity).try_despawn();
        }
    }
}

pub(crate) fn resolve_projectile_contacts(
    mut collision_events: MessageReader<CollisionStart>,
    mut damage_events: MessageWriter<DamageEvent>,
    mut knockback_events: MessageWriter<KnockbackEvent>,
    mut projectiles: Query<(&mut Projectile, &LinearVelocity)>,
    combatants: Query<&Team, With<Combatant>>,
    walls: Query<(), With<Wall>>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (projectile_entity, other) in pairs {
            let Ok((mut projectile, velocity)) = projectiles.get_mut(projectile_entity) else {
                continue;
            };

            let contact = if let Ok(team) = combatants.get(other) {
                ProjectileContact::Combatant {
                    entity: other,
                    team: *team,
                }
            } else if walls.contains(other) {
                ProjectileContact::Wall
            } else {
                ProjectileContact::Other
            };

            match projectile.register_contact(contact) {
                ContactOutcome::Hit => {
                    damage_events.write(DamageEvent {
                        source: projectile.owner(),
                        target: other,
                        amount: projectile.damage(),
                    });
                    if let Some(direction) = knockback_direction(
                        KnockbackPolicy::AlongTravel,
                        Vec2::ZERO,
                        None,
                        velocity.0,
                        Vec2::ZERO,
                    ) {
                        knockback_events.write(KnockbackEvent {
                            source: projectile.owner(),
                            target: other,
                            direction,
                            force: projectile.knockback_force(),
                        });
                    }
                    debug!("Projectile hit {:?}", other);
                }
                ContactOutcome::Blocked => debug!("Projectile blocked by a wall"),
                ContactOutcome::Ignored => {}
            }
        }
    }
}
