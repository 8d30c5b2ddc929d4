//! Camera pose tracking for the sorting scene.
//!
//! The core never talks to the render world directly: gesture math
//! runs against [`ScenePose`], a snapshot of the camera's transform,
//! projection, and viewport. The binary mirrors the live camera into
//! it each frame; before that first sync (or whenever the camera or
//! window goes away) the pose is absent and drag updates are ignored.

/// Pose snapshot resource and project/unproject math.
pub mod scene_pose;

pub use scene_pose::{CameraPose, ScenePose};

use bevy::prelude::*;
use bevy::render::camera::CameraProjection;
use bevy::window::PrimaryWindow;

/// Mirror the live 3D camera into [`ScenePose`]. Registered by the
/// binary only; headless tests set the pose directly.
pub fn sync_scene_pose(
    cameras: Query<(&GlobalTransform, &Projection), With<Camera3d>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut pose: ResMut<ScenePose>,
) {
    let (Ok((camera_xf, projection)), Ok(window)) = (cameras.single(), windows.single()) else {
        pose.clear();
        return;
    };
    pose.set(CameraPose::new(
        camera_xf.compute_matrix(),
        projection.get_clip_from_view(),
        window.size(),
    ));
}
