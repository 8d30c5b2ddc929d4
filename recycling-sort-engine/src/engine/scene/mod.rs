//! Scene ownership: the five fixed container zones and the single
//! movable proxy.
//!
//! Zones are immutable after construction. At most one proxy exists at
//! a time; it is spawned when a captured image enters the flow
//! (`engine::classify`), despawned on a correct drop, and repositioned
//! to the staging point on a failed one. All mutation happens on the
//! main schedule, which is the single-threaded scene context.

/// Movable proxy component and lifecycle helpers.
pub mod proxy;

/// Ordered ray/box hit testing.
pub mod raycast;

/// Fixed container zone construction.
pub mod zones;

pub use proxy::{HitBounds, MovableProxy, ProxyGeneration, reset_proxy_position, spawn_proxy};
pub use raycast::{RayHit, hit_test};
pub use zones::{ContainerZone, ZonesBuilt, build_zones};

use crate::engine::StatusMessage;
use crate::engine::camera::ScenePose;
use bevy::prelude::*;

/// Request to detach the current proxy without scoring it, so a new
/// object can be captured. No-op when nothing is in play.
#[derive(Event, Debug, Default)]
pub struct DiscardProxy;

pub fn discard_proxy(
    mut events: EventReader<DiscardProxy>,
    proxies: Query<Entity, With<MovableProxy>>,
    mut commands: Commands,
) {
    for _ in events.read() {
        match proxies.single() {
            Ok(entity) => {
                info!("discarding active proxy");
                commands.entity(entity).despawn();
            }
            Err(_) => debug!("discard requested with no active proxy"),
        }
    }
}

/// Registers zone construction, proxy bookkeeping, and the camera pose
/// snapshot the gesture systems read.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ZonesBuilt>()
            .init_resource::<ProxyGeneration>()
            .init_resource::<ScenePose>()
            .add_event::<DiscardProxy>()
            .add_event::<StatusMessage>()
            .add_systems(Startup, build_zones)
            .add_systems(Update, discard_proxy);
    }
}
