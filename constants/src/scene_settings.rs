use bevy::prelude::*;

/// Default position for a freshly spawned or reset proxy: centered,
/// below eye level, in front of the camera.
pub const PROXY_STAGING_POSITION: Vec3 = Vec3::new(0.0, -0.5, -1.5);

/// Container zones sit on a lateral line facing the camera.
pub const ZONE_ROW_Y: f32 = 0.5;
pub const ZONE_ROW_Z: f32 = -1.5;
pub const ZONE_SPACING: f32 = 1.0;

pub const ZONE_MARKER_SIZE: Vec2 = Vec2::splat(1.0);
pub const PROXY_MARKER_SIZE: Vec2 = Vec2::splat(0.2);

/// Markers are flat quads; hit testing gives them a small depth so
/// near-grazing rays still register.
pub const ZONE_HIT_DEPTH: f32 = 0.1;
pub const PROXY_HIT_DEPTH: f32 = 0.1;

/// Default lateral drag gain. Tunable at runtime via `DragSettings`.
pub const DRAG_LATERAL_GAIN: f32 = 1.5;

/// Square input side expected by the classification model.
pub const MODEL_INPUT_SIZE: u32 = 299;

/// World position of zone `index` in a centered row of `count` zones.
pub fn zone_position(index: usize, count: usize) -> Vec3 {
    let offset = index as f32 - (count.saturating_sub(1)) as f32 * 0.5;
    Vec3::new(offset * ZONE_SPACING, ZONE_ROW_Y, ZONE_ROW_Z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_row_is_centered() {
        assert_eq!(zone_position(0, 5), Vec3::new(-2.0, ZONE_ROW_Y, ZONE_ROW_Z));
        assert_eq!(zone_position(2, 5), Vec3::new(0.0, ZONE_ROW_Y, ZONE_ROW_Z));
        assert_eq!(zone_position(4, 5), Vec3::new(2.0, ZONE_ROW_Y, ZONE_ROW_Z));
    }
}
