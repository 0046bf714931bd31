//! Core domain: timing primitive, camera and shared world resources.

mod resources;
mod systems;
mod timer;


pub use resources::VisibleRegion;
pub use timer::Countdown;

use bevy::prelude::*;

use crate::core::systems::{setup_camera, update_visible_region};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VisibleRegion>()
            .add_systems(Startup, setup_camera)
            .add_systems(First, update_visible_region);
    }
}
