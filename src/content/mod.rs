//! Content domain: loads and validates combat tuning from assets/data.

mod data;
mod loader;
mod validation;


pub use data::{CombatDefaults, SCHEMA_VERSION};
pub use loader::{ContentLoadError, load_combat_defaults, parse_single};
pub use validation::{ValidationError, validate_defaults};

use bevy::prelude::*;
use std::path::Path;

pub const CONTENT_PATH: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_combat_content);
    }
}

/// Load, validate and accept the tuning, or fall back to the built-in defaults.
pub fn resolve_defaults(base_path: &Path) -> CombatDefaults {
    let defaults = match load_combat_defaults(base_path) {
        Ok(defaults) => defaults,
        Err(e) => {
            error!("{}", e);
            error!("Using built-in combat defaults");
            return CombatDefaults::default();
        }
    };

    let errors = validate_defaults(&defaults);
    if errors.is_empty() {
        info!(
            "Loaded combat tuning from {}",
            base_path.join(loader::COMBAT_FILE).display()
        );
        return defaults;
    }

    for e in &errors {
        error!("Content validation error: {}", e);
    }
    error!(
        "{} validation error(s); using built-in combat defaults",
        errors.len()
    );
    CombatDefaults::default()
}

fn load_combat_content(mut commands: Commands) {
    let defaults = resolve_defaults(Path::new(CONTENT_PATH));

    commands.insert_resource(defaults.enemy);
    commands.insert_resource(defaults.melee);
    commands.insert_resource(defaults.knockback);
    commands.insert_resource(defaults.player);
    commands.insert_resource(defaults.sword);
    commands.insert_resource(defaults.projectile);
    commands.insert_resource(defaults.arena);
}
