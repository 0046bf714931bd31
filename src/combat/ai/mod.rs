//! Combat domain: AI system modules for enemies.

pub(crate) mod enemy;


pub use enemy::{
    AimPivot, BehaviorConfig, BehaviorState, BrainOutput, EnemyBrain, MoveIntent, fresh_state,
    next_state,
};
pub(crate) use enemy::{apply_enemy_movement, link_enemy_targets, orient_aim_pivots, update_enemy_ai};
