use bevy::prelude::*;
use constants::scene_settings::{ZONE_HIT_DEPTH, ZONE_MARKER_SIZE, zone_position};
use constants::zone::ZoneLabel;

use super::proxy::HitBounds;

/// A fixed drop target. Identity is the label; position and bounds are
/// set once at scene construction and never move.
#[derive(Component, Debug, Clone, Copy)]
pub struct ContainerZone {
    pub label: ZoneLabel,
}

/// Zone construction runs once per session.
#[derive(Resource, Default)]
pub struct ZonesBuilt(pub bool);

/// Spawn the five container zones along a lateral line facing the
/// camera. Idempotent.
pub fn build_zones(mut built: ResMut<ZonesBuilt>, mut commands: Commands) {
    if built.0 {
        return;
    }

    let count = ZoneLabel::ALL.len();
    for (index, label) in ZoneLabel::ALL.into_iter().enumerate() {
        commands.spawn((
            ContainerZone { label },
            Transform::from_translation(zone_position(index, count)),
            HitBounds(Vec3::new(
                ZONE_MARKER_SIZE.x,
                ZONE_MARKER_SIZE.y,
                ZONE_HIT_DEPTH,
            )),
            Name::new(label.as_str()),
        ));
    }

    built.0 = true;
    info!("built {count} container zones");
}
