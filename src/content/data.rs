//! Data definitions for the combat tuning file.
//!
//! These structs mirror assets/data/combat.ron. Every section may be omitted,
//! in which case its built-in defaults apply.

use serde::{Deserialize, Serialize};

use crate::combat::{
    ArenaTuning, EnemyTuning, KnockbackTuning, MeleeTuning, ProjectileTuning, SwordTuning,
};
use crate::movement::PlayerTuning;

pub const SCHEMA_VERSION: u32 = 1;

// ============================================================================
// Combat Defaults (combat.ron) - Single struct, not a list
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CombatDefaults {
    pub schema_version: u32,
    pub enemy: EnemyTuning,
    pub melee: MeleeTuning,
    pub knockback: KnockbackTuning,
    pub player: PlayerTuning,
    pub sword: SwordTuning,
    pub projectile: ProjectileTuning,
    pub arena: ArenaTuning,
}

impl Default for CombatDefaults {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            enemy: EnemyTuning::default(),
            melee: MeleeTuning::default(),
            knockback: KnockbackTuning::default(),
            player: PlayerTuning::default(),
            sword: SwordTuning::default(),
            projectile: ProjectileTuning::default(),
            arena: ArenaTuning::default(),
        }
    }
}
