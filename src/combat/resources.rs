//! Combat domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Invariant violated while building a validated tuning value.
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// `chase_range` must be strictly greater than `attack_range`
    RangesOutOfOrder { chase_range: f32, attack_range: f32 },
    Negative { field: &'static str, value: f32 },
    NotPositive { field: &'static str, value: f32 },
    /// Total attack duration shorter than its wind-up
    WindUpTooLong { wind_up: f32, duration: f32 },
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TuningError::RangesOutOfOrder {
                chase_range,
                attack_range,
            } => write!(
                f,
                "chase_range ({chase_range}) must be greater than attack_range ({attack_range})"
            ),
            TuningError::Negative { field, value } => {
                write!(f, "{field} must not be negative (got {value})")
            }
            TuningError::NotPositive { field, value } => {
                write!(f, "{field} must be greater than zero (got {value})")
            }
            TuningError::WindUpTooLong { wind_up, duration } => write!(
                f,
                "wind_up ({wind_up}) must not exceed the total attack duration ({duration})"
            ),
        }
    }
}

impl std::error::Error for TuningError {}

impl TuningError {
    /// The tuning field the error is about.
    pub fn field(&self) -> &'static str {
        match self {
            TuningError::RangesOutOfOrder { .. } => "chase_range",
            TuningError::Negative { field, .. } | TuningError::NotPositive { field, .. } => *field,
            TuningError::WindUpTooLong { .. } => "wind_up",
        }
    }
}

pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<f32, TuningError> {
    // NaN fails this comparison as well
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(TuningError::Negative { field, value })
    }
}

pub(crate) fn positive(field: &'static str, value: f32) -> Result<f32, TuningError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(TuningError::NotPositive { field, value })
    }
}

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct EnemyTuning {
    pub chase_range: f32,
    pub attack_range: f32,
    pub move_speed: f32,
    pub max_health: u32,
    pub body_radius: f32,
    /// High damping so knockback velocity decays quickly
    pub linear_damping: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            chase_range: 10.0,
            attack_range: 1.5,
            move_speed: 3.0,
            max_health: 3,
            body_radius: 0.4,
            linear_damping: 5.0,
        }
    }
}

/// Enemy melee attack timing and hit area
#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct MeleeTuning {
    pub damage: u32,
    pub wind_up: f32,
    /// Wind-up plus recovery
    pub duration: f32,
    pub cooldown: f32,
    pub radius: f32,
    /// Distance from the body centre to the attack point
    pub reach: f32,
    pub knockback_force: f32,
    pub visual_lifetime: f32,
}

impl Default for MeleeTuning {
    fn default() -> Self {
        Self {
            damage: 1,
            wind_up: 0.3,
            duration: 0.6,
            cooldown: 2.0,
            radius: 0.5,
            reach: 0.75,
            knockback_force: 6.0,
            visual_lifetime: 0.3,
        }
    }
}

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct KnockbackTuning {
    /// Seconds behavior stays suspended after a knockback
    pub suspension: f32,
    /// Whether a knockback cancels an attack that is still winding up or recovering
    pub interrupts_attacks: bool,
}

impl Default for KnockbackTuning {
    fn default() -> Self {
        Self {
            suspension: 0.25,
            interrupts_attacks: true,
        }
    }
}

/// Player sword swing
#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct SwordTuning {
    pub damage: u32,
    pub duration: f32,
    pub radius: f32,
    pub reach: f32,
    pub knockback_force: f32,
}

impl Default for SwordTuning {
    fn default() -> Self {
        Self {
            damage: 1,
            duration: 0.25,
            radius: 0.7,
            reach: 0.8,
            knockback_force: 15.0,
        }
    }
}

/// Player thrown knife
#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct ProjectileTuning {
    pub damage: u32,
    pub speed: f32,
    pub lifetime: f32,
    pub radius: f32,
    pub knockback_force: f32,
    /// Extra world units past the screen edge before a projectile counts as off-screen
    pub view_margin: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            damage: 1,
            speed: 12.0,
            lifetime: 3.0,
            radius: 0.15,
            knockback_force: 10.0,
            view_margin: 1.0,
        }
    }
}

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct ArenaTuning {
    pub seed: u64,
    pub enemy_count: u32,
    /// Half the side length of the square arena
    pub half_extent: f32,
    pub wall_thickness: f32,
    pub spawn_radius_min: f32,
    pub spawn_radius_max: f32,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            seed: 42,
            enemy_count: 6,
            half_extent: 14.0,
            wall_thickness: 1.0,
            spawn_radius_min: 6.0,
            spawn_radius_max: 12.0,
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct CombatInput {
    pub swing: bool,
    pub throw: bool,
}
