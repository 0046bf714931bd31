//! Validation for combat tuning values.

use super::data::{CombatDefaults, SCHEMA_VERSION};
use crate::combat::ai::BehaviorConfig;
use crate::combat::{MeleeProfile, TuningError, non_negative, positive};

/// A validation error with context about what failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub section: &'static str,
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn from_tuning(section: &'static str, error: TuningError) -> Self {
        Self {
            section,
            field: error.field(),
            message: error.to_string(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}: {}", self.section, self.field, self.message)
    }
}

/// Push an error for every check that fails
macro_rules! check {
    ($errors:expr, $section:expr, $($result:expr),+ $(,)?) => {
        $(
            if let Err(e) = $result {
                $errors.push(ValidationError::from_tuning($section, e));
            }
        )+
    };
}

fn at_least_one(field: &'static str, value: u32) -> Result<u32, TuningError> {
    if value >= 1 {
        Ok(value)
    } else {
        Err(TuningError::NotPositive {
            field,
            value: value as f32,
        })
    }
}

/// Validate every section of the combat tuning.
/// Returns a list of validation errors, empty if everything is usable.
pub fn validate_defaults(defaults: &CombatDefaults) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if defaults.schema_version != SCHEMA_VERSION {
        errors.push(ValidationError {
            section: "combat",
            field: "schema_version",
            message: format!(
                "expected schema version {}, found {}",
                SCHEMA_VERSION, defaults.schema_version
            ),
        });
    }

    let enemy = &defaults.enemy;
    check!(
        errors,
        "enemy",
        BehaviorConfig::try_from(enemy),
        at_least_one("max_health", enemy.max_health),
        positive("body_radius", enemy.body_radius),
        non_negative("linear_damping", enemy.linear_damping),
    );

    let melee = &defaults.melee;
    check!(
        errors,
        "melee",
        MeleeProfile::try_from(melee),
        non_negative("visual_lifetime", melee.visual_lifetime),
    );

    check!(
        errors,
        "knockback",
        non_negative("suspension", defaults.knockback.suspension),
    );

    let player = &defaults.player;
    check!(
        errors,
        "player",
        non_negative("move_speed", player.move_speed),
        non_negative("push_force", player.push_force),
        at_least_one("max_health", player.max_health),
        positive("body_radius", player.body_radius),
        non_negative("linear_damping", player.linear_damping),
    );

    let sword = &defaults.sword;
    check!(
        errors,
        "sword",
        positive("duration", sword.duration),
        positive("radius", sword.radius),
        non_negative("reach", sword.reach),
        non_negative("knockback_force", sword.knockback_force),
    );

    let projectile = &defaults.projectile;
    check!(
        errors,
        "projectile",
        positive("speed", projectile.speed),
        positive("lifetime", projectile.lifetime),
        positive("radius", projectile.radius),
        non_negative("knockback_force", projectile.knockback_force),
        non_negative("view_margin", projectile.view_margin),
    );

    let arena = &defaults.arena;
    check!(
        errors,
        "arena",
        positive("half_extent", arena.half_extent),
        positive("wall_thickness", arena.wall_thickness),
        non_negative("spawn_radius_min", arena.spawn_radius_min),
        non_negative("spawn_radius_max", arena.spawn_radius_max),
    );
    if arena.spawn_radius_min > arena.spawn_radius_max {
        errors.push(ValidationError {
            section: "arena",
            field: "spawn_radius_min",
            message: format!(
                "spawn_radius_min ({}) must not exceed spawn_radius_max ({})",
                arena.spawn_radius_min, arena.spawn_radius_max
            ),
        });
    }

    errors
}
