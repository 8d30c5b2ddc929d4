use bevy::math::{Dir3, Mat4, Ray3d};
use bevy::prelude::*;

/// One frame's camera state: enough to project world points to the
/// viewport and back without touching the render world.
#[derive(Debug, Clone)]
pub struct CameraPose {
    /// Camera-to-world transform.
    pub camera_to_world: Mat4,
    /// View-to-clip projection.
    pub projection: Mat4,
    /// Logical viewport size in pixels.
    pub viewport: Vec2,
}

impl CameraPose {
    pub fn new(camera_to_world: Mat4, projection: Mat4, viewport: Vec2) -> Self {
        Self {
            camera_to_world,
            projection,
            viewport,
        }
    }

    /// Camera at the origin looking down -Z with a 60 degree vertical
    /// field of view. Startup default and test fixture.
    pub fn looking_forward(viewport: Vec2) -> Self {
        let aspect = (viewport.x / viewport.y).max(f32::EPSILON);
        Self::new(
            Mat4::IDENTITY,
            Mat4::perspective_rh(std::f32::consts::FRAC_PI_3, aspect, 0.1, 100.0),
            viewport,
        )
    }

    /// Project a world point to (viewport pixels, NDC depth). `None`
    /// when the point is behind the camera.
    pub fn world_to_viewport(&self, world: Vec3) -> Option<(Vec2, f32)> {
        let clip = self.projection * self.camera_to_world.inverse() * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        let screen = Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        );
        Some((screen, ndc.z))
    }

    /// Unproject a viewport point at a given NDC depth back to world
    /// space. The depth usually comes from projecting the point being
    /// dragged, so lateral motion holds distance from the camera.
    pub fn viewport_to_world(&self, screen: Vec2, ndc_depth: f32) -> Option<Vec3> {
        if self.viewport.x <= 0.0 || self.viewport.y <= 0.0 {
            return None;
        }
        let ndc = Vec3::new(
            screen.x / self.viewport.x * 2.0 - 1.0,
            1.0 - screen.y / self.viewport.y * 2.0,
            ndc_depth,
        );
        let clip_to_world = (self.projection * self.camera_to_world.inverse()).inverse();
        let world = clip_to_world.project_point3(ndc);
        world.is_finite().then_some(world)
    }

    /// Ray from the camera through a viewport point.
    pub fn viewport_ray(&self, screen: Vec2) -> Option<Ray3d> {
        let origin = self.camera_to_world.w_axis.truncate();
        let target = self.viewport_to_world(screen, 0.5)?;
        let direction = Dir3::new(target - origin).ok()?;
        Some(Ray3d::new(origin, direction))
    }
}

/// Current camera pose, if tracking has produced one. Absent before
/// the first sync; gesture systems treat that as "ignore the event",
/// never as an error.
#[derive(Resource, Default)]
pub struct ScenePose {
    pose: Option<CameraPose>,
}

impl ScenePose {
    pub fn set(&mut self, pose: CameraPose) {
        self.pose = Some(pose);
    }

    pub fn clear(&mut self) {
        self.pose = None;
    }

    pub fn get(&self) -> Option<&CameraPose> {
        self.pose.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pose() -> CameraPose {
        CameraPose::looking_forward(Vec2::new(800.0, 600.0))
    }

    #[test]
    fn project_then_unproject_recovers_the_point() {
        let pose = pose();
        let world = Vec3::new(0.4, -0.5, -1.5);
        let (screen, depth) = pose.world_to_viewport(world).unwrap();
        let back = pose.viewport_to_world(screen, depth).unwrap();
        assert!(back.distance(world) < 1e-3, "{back} vs {world}");
    }

    #[test]
    fn points_behind_the_camera_do_not_project() {
        assert!(pose().world_to_viewport(Vec3::new(0.0, 0.0, 2.0)).is_none());
    }

    #[test]
    fn viewport_ray_points_at_the_projected_target() {
        let pose = pose();
        let target = Vec3::new(1.0, 0.5, -1.5);
        let (screen, _) = pose.world_to_viewport(target).unwrap();
        let ray = pose.viewport_ray(screen).unwrap();
        let toward = (target - ray.origin).normalize();
        assert!(ray.direction.as_vec3().dot(toward) > 0.999);
    }

    #[test]
    fn cleared_pose_reads_as_absent() {
        let mut scene_pose = ScenePose::default();
        assert!(scene_pose.get().is_none());
        scene_pose.set(pose());
        assert!(scene_pose.get().is_some());
        scene_pose.clear();
        assert!(scene_pose.get().is_none());
    }
}
