//! Combat domain: plugin wiring, message registration and public exports.

pub mod ai;
mod attacks;
mod components;
mod events;
mod projectile;
mod resolver;
mod resources;
mod spawn;
mod systems;

#[cfg(test)]
mod tests;

pub use attacks::{AttackPhase, AttackSequencer, MeleeProfile, RequestOutcome, SequencerStep};
pub use components::{
    AttackVisual, Combatant, DamageOutcome, Enemy, Health, KnockbackReceiver, Lifetime, Team,
};
pub use events::{
    AttackFinishedEvent, AttackStartedEvent, DamageEvent, DeathEvent, KnockbackEvent,
    MeleeStrikeEvent,
};
pub use projectile::{ContactOutcome, Projectile, ProjectileContact, ProjectilePhase};
pub use resolver::{HitVolume, KnockbackPolicy, direction_or_default, knockback_direction};
pub use resources::{
    ArenaTuning, CombatInput, EnemyTuning, KnockbackTuning, MeleeTuning, ProjectileTuning,
    SwordTuning, TuningError,
};
pub(crate) use resources::{non_negative, positive};

use bevy::prelude::*;

use crate::combat::ai::{
    apply_enemy_movement, link_enemy_targets, orient_aim_pivots, update_enemy_ai,
};
use crate::combat::projectile::{resolve_projectile_contacts, tick_projectiles};
use crate::combat::spawn::spawn_arena;
use crate::combat::systems::{
    apply_damage, apply_knockback, detect_hit_volume_contacts, expire_lifetimes,
    process_deaths, process_player_attacks, push_on_body_contact, read_combat_input,
    resolve_melee_strikes, spawn_attack_visuals, tick_attack_sequencers,
};

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyTuning>()
            .init_resource::<MeleeTuning>()
            .init_resource::<KnockbackTuning>()
            .init_resource::<SwordTuning>()
            .init_resource::<ProjectileTuning>()
            .init_resource::<ArenaTuning>()
            .init_resource::<CombatInput>()
            .add_message::<DamageEvent>()
            .add_message::<KnockbackEvent>()
            .add_message::<DeathEvent>()
            .add_message::<AttackStartedEvent>()
            .add_message::<MeleeStrikeEvent>()
            .add_message::<AttackFinishedEvent>()
            .add_systems(Startup, spawn_arena)
            .add_systems(
                Update,
                (
                    (read_combat_input, process_player_attacks).chain(),
                    (
                        link_enemy_targets,
                        tick_attack_sequencers,
                        update_enemy_ai,
                        orient_aim_pivots,
                    )
                        .chain(),
                    (
                        resolve_melee_strikes,
                        spawn_attack_visuals,
                        detect_hit_volume_contacts,
                        resolve_projectile_contacts,
                        push_on_body_contact,
                    )
                        .chain(),
                    (
                        apply_damage,
                        apply_knockback,
                        process_deaths,
                        tick_projectiles,
                        expire_lifetimes,
                    )
                        .chain(),
                )
                    .chain(),
            )
            .add_systems(FixedUpdate, apply_enemy_movement);
    }
}
