//! Pointer drag tool.
//!
//! Host pointer events drive an Idle/Dragging state machine: a drag
//! opens only when it begins on the proxy, `Changed` moves the proxy
//! laterally at its current depth, `Ended` hands the final screen
//! point to the outcome resolver, and `Cancelled` discards the session
//! without ever touching the score. Events are processed strictly in
//! arrival order within one synchronous system; the resolver is
//! chained directly after it so a drop resolves in the same frame.

/// Mouse-to-pointer-phase adapter (native input).
pub mod input;

/// Drop outcome resolution against the container zones.
pub mod resolve;

pub use input::mouse_drag_adapter;
pub use resolve::{ProxyDropped, resolve_drop};

use bevy::prelude::*;
use constants::scene_settings::DRAG_LATERAL_GAIN;

use crate::engine::StatusMessage;
use crate::engine::camera::ScenePose;
use crate::engine::scene::{ContainerZone, HitBounds, MovableProxy, hit_test};
use crate::engine::score::ScoreChanged;

/// Pointer gesture phase as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// One host pointer event. `position` is in logical viewport pixels;
/// it is ignored for `Cancelled`.
#[derive(Event, Debug, Clone, Copy)]
pub struct PointerDragEvent {
    pub phase: PointerPhase,
    pub position: Vec2,
}

/// Ephemeral state for one gesture lifecycle.
#[derive(Debug, Clone, Copy)]
pub struct DragSession {
    pub proxy: Entity,
    pub last_point: Vec2,
}

/// Gesture state machine: `None` is Idle, `Some` is Dragging.
#[derive(Resource, Default)]
pub struct DragState {
    pub session: Option<DragSession>,
}

/// Drag feel tuning.
#[derive(Resource)]
pub struct DragSettings {
    /// Scale applied to lateral (x/y) motion while depth stays fixed.
    pub lateral_gain: f32,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            lateral_gain: DRAG_LATERAL_GAIN,
        }
    }
}

pub fn handle_pointer_drag(
    mut events: EventReader<PointerDragEvent>,
    mut drag: ResMut<DragState>,
    settings: Res<DragSettings>,
    pose: Res<ScenePose>,
    mut proxies: Query<(Entity, &mut Transform, &HitBounds), With<MovableProxy>>,
    zones: Query<(Entity, &Transform, &HitBounds), (With<ContainerZone>, Without<MovableProxy>)>,
    mut drops: EventWriter<ProxyDropped>,
) {
    for event in events.read() {
        match event.phase {
            PointerPhase::Began => {
                if drag.session.is_some() {
                    debug!("drag began while already dragging; ignored");
                    continue;
                }
                let Some(pose) = pose.get() else {
                    debug!("no camera pose yet; drag not started");
                    continue;
                };
                let Ok((proxy_entity, proxy_xf, proxy_bounds)) = proxies.single() else {
                    debug!("drag began with no object in play");
                    continue;
                };
                let Some(ray) = pose.viewport_ray(event.position) else {
                    continue;
                };

                let mut targets: Vec<(Entity, &Transform, Vec3)> = zones
                    .iter()
                    .map(|(entity, xf, bounds)| (entity, xf, bounds.0))
                    .collect();
                targets.push((proxy_entity, proxy_xf, proxy_bounds.0));

                // Only a grab that lands on the proxy opens a session.
                let hits = hit_test(ray, &targets);
                if hits.first().map(|hit| hit.entity) == Some(proxy_entity) {
                    drag.session = Some(DragSession {
                        proxy: proxy_entity,
                        last_point: event.position,
                    });
                }
            }
            PointerPhase::Changed => {
                let Some(session) = drag.session.as_mut() else {
                    debug!("drag change while idle; ignored");
                    continue;
                };
                // No pose available: leave the proxy where it is.
                let Some(pose) = pose.get() else {
                    continue;
                };
                let Ok((_, mut transform, _)) = proxies.get_mut(session.proxy) else {
                    debug!("dragged object vanished; cancelling session");
                    drag.session = None;
                    continue;
                };

                // Reference depth comes from the proxy's current
                // position; the pointer is unprojected at that depth
                // and lateral motion is scaled while depth holds.
                let Some((_, reference_depth)) = pose.world_to_viewport(transform.translation)
                else {
                    continue;
                };
                let Some(world) = pose.viewport_to_world(event.position, reference_depth) else {
                    continue;
                };
                transform.translation = Vec3::new(
                    settings.lateral_gain * world.x,
                    settings.lateral_gain * world.y,
                    transform.translation.z,
                );
                session.last_point = event.position;
            }
            PointerPhase::Ended => {
                let Some(_session) = drag.session.take() else {
                    debug!("drag end while idle; ignored");
                    continue;
                };
                drops.write(ProxyDropped {
                    point: event.position,
                });
            }
            PointerPhase::Cancelled => {
                if drag.session.take().is_some() {
                    info!("drag cancelled by host; no outcome resolved");
                }
            }
        }
    }
}

/// Registers the gesture state machine and the drop resolver, chained
/// so resolution happens the frame the gesture ends.
pub struct DragToolPlugin;

impl Plugin for DragToolPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DragState>()
            .init_resource::<DragSettings>()
            .add_event::<PointerDragEvent>()
            .add_event::<ProxyDropped>()
            .add_event::<StatusMessage>()
            .add_event::<ScoreChanged>()
            .add_systems(Update, (handle_pointer_drag, resolve_drop).chain());
    }
}
