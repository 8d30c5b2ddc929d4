use std::sync::Arc;

use bevy::prelude::*;
use constants::scene_settings::{PROXY_HIT_DEPTH, PROXY_MARKER_SIZE, PROXY_STAGING_POSITION};
use image::DynamicImage;

/// The one draggable object currently in play.
///
/// `pending_label` stays `None` until classification completes (and
/// forever on a per-request classification failure, in which case
/// every drop resolves as incorrect). `generation` ties in-flight
/// classification results to the proxy they were requested for.
#[derive(Component)]
pub struct MovableProxy {
    pub generation: u64,
    pub pending_label: Option<String>,
    pub image: Arc<DynamicImage>,
}

/// Hit-test extents (full size, not half extents) for zones and the
/// proxy alike.
#[derive(Component, Debug, Clone, Copy)]
pub struct HitBounds(pub Vec3);

/// Monotonic token handed to each spawned proxy; classification
/// results carrying an older token are stale and get discarded.
#[derive(Resource, Default)]
pub struct ProxyGeneration(pub u64);

/// Insert a proxy at the staging position. The caller is responsible
/// for the single-proxy guard.
pub fn spawn_proxy(commands: &mut Commands, image: Arc<DynamicImage>, generation: u64) -> Entity {
    commands
        .spawn((
            MovableProxy {
                generation,
                pending_label: None,
                image,
            },
            Transform::from_translation(PROXY_STAGING_POSITION),
            HitBounds(Vec3::new(
                PROXY_MARKER_SIZE.x,
                PROXY_MARKER_SIZE.y,
                PROXY_HIT_DEPTH,
            )),
            Name::new("classified-object"),
        ))
        .id()
}

/// Send the proxy back to the staging position after an incorrect or
/// no-hit drop.
pub fn reset_proxy_position(transform: &mut Transform) {
    transform.translation = PROXY_STAGING_POSITION;
}
