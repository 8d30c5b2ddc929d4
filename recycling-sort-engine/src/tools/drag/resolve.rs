use bevy::prelude::*;
use constants::zone::ZoneLabel;

use crate::engine::StatusMessage;
use crate::engine::camera::ScenePose;
use crate::engine::scene::{
    ContainerZone, HitBounds, MovableProxy, hit_test, reset_proxy_position,
};
use crate::engine::score::{ScoreBoard, ScoreChanged};

/// A drag ended; resolve the drop at this screen point.
#[derive(Event, Debug, Clone, Copy)]
pub struct ProxyDropped {
    pub point: Vec2,
}

/// Case-insensitive match between the zone under the drop and the
/// proxy's pending classification. An unknown label (classification
/// failed or still pending) never matches.
pub fn is_correct(zone: ZoneLabel, pending: Option<&str>) -> bool {
    pending.is_some_and(|label| zone.matches(label))
}

/// Hit-test the final screen point against the container zones only
/// and settle the outcome: correct removes the proxy and scores,
/// anything else resets it to the staging position.
pub fn resolve_drop(
    mut drops: EventReader<ProxyDropped>,
    pose: Res<ScenePose>,
    zones: Query<(Entity, &Transform, &HitBounds, &ContainerZone), Without<MovableProxy>>,
    mut proxies: Query<(Entity, &mut Transform, &MovableProxy)>,
    mut score: ResMut<ScoreBoard>,
    mut commands: Commands,
    mut messages: EventWriter<StatusMessage>,
    mut score_events: EventWriter<ScoreChanged>,
) {
    // The despawn below is deferred through `Commands`, so the query
    // still sees a removed proxy for the rest of this frame.
    let mut removed = false;

    for drop in drops.read() {
        if removed {
            debug!("drop after the object was already resolved; ignored");
            continue;
        }
        let Ok((proxy_entity, mut proxy_xf, proxy)) = proxies.single_mut() else {
            debug!("drop resolved with no object in play");
            continue;
        };

        let zone_label = pose
            .get()
            .and_then(|pose| pose.viewport_ray(drop.point))
            .and_then(|ray| {
                let targets: Vec<(Entity, &Transform, Vec3)> = zones
                    .iter()
                    .map(|(entity, xf, bounds, _)| (entity, xf, bounds.0))
                    .collect();
                hit_test(ray, &targets).first().map(|hit| hit.entity)
            })
            .and_then(|entity| zones.get(entity).ok())
            .map(|(_, _, _, zone)| zone.label);

        match zone_label {
            None => {
                messages.write(StatusMessage("Try to place the item in a bin.".into()));
                reset_proxy_position(&mut proxy_xf);
            }
            Some(zone) if is_correct(zone, proxy.pending_label.as_deref()) => {
                let new_score = score.award();
                commands.entity(proxy_entity).despawn();
                removed = true;
                info!("correct drop on '{}'; score is now {new_score}", zone.as_str());
                messages.write(StatusMessage("Correct! +1 point".into()));
                score_events.write(ScoreChanged(new_score));
            }
            Some(zone) => {
                debug!(
                    "incorrect drop on '{}' (pending label {:?})",
                    zone.as_str(),
                    proxy.pending_label
                );
                messages.write(StatusMessage(
                    "Sorry, that is incorrect. Try again.".into(),
                ));
                reset_proxy_position(&mut proxy_xf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_is_case_insensitive() {
        assert!(is_correct(ZoneLabel::Plastic, Some("Plastic")));
        assert!(is_correct(ZoneLabel::Plastic, Some("PLASTIC")));
        assert!(!is_correct(ZoneLabel::Plastic, Some("metal")));
    }

    #[test]
    fn unknown_label_never_matches() {
        for zone in ZoneLabel::ALL {
            assert!(!is_correct(zone, None));
        }
    }
}
