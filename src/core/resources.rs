//! Core domain: shared resources read by several gameplay domains.

use bevy::prelude::*;

/// World-space rectangle currently covered by the gameplay camera.
///
/// `None` until a camera has reported its viewport (headless runs never do),
/// in which case nothing is considered off-screen.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct VisibleRegion {
    pub rect: Option<Rect>,
}

impl VisibleRegion {
    /// Whether `point` lies inside the visible rectangle grown by `margin`.
    pub fn contains(&self, point: Vec2, margin: f32) -> bool {
        match self.rect {
            Some(rect) => rect.inflate(margin).contains(point),
            None => true,
        }
    }
}
