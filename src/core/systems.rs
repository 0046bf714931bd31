//! Core domain: camera setup and visible region tracking.

use bevy::prelude::*;

use crate::core::resources::VisibleRegion;

/// World units per screen pixel for the gameplay camera (20 px per unit).
const CAMERA_SCALE: f32 = 1.0 / 20.0;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: CAMERA_SCALE,
            ..OrthographicProjection::default_2d()
        }),
    ));
}

pub(crate) fn update_visible_region(
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut region: ResMut<VisibleRegion>,
) {
    let Some((camera, camera_transform)) = cameras.iter().find(|(camera, _)| camera.is_active)
    else {
        region.rect = None;
        return;
    };

    let Some(size) = camera.logical_viewport_size() else {
        region.rect = None;
        return;
    };

    let corners = (
        camera.viewport_to_world_2d(camera_transform, Vec2::ZERO),
        camera.viewport_to_world_2d(camera_transform, size),
    );

    region.rect = match corners {
        (Ok(top_left), Ok(bottom_right)) => Some(Rect::from_corners(top_left, bottom_right)),
        _ => None,
    };
}
