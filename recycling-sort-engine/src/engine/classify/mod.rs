//! Asynchronous image classification.
//!
//! A captured image spawns the movable proxy immediately (label still
//! pending) and hands the image to the classifier on the compute task
//! pool. Results are applied back on the main schedule, and only when
//! their generation token still matches the live proxy. A result for
//! a proxy that has since been resolved or discarded is dropped, so a
//! stale classification can never overwrite a newer object's label.

/// Classifier trait, result/error types, and image preparation.
pub mod classifier;

/// Built-in color-prototype model.
pub mod palette;

pub use classifier::{ClassificationResult, ClassifyError, ImageClassifier, letterbox};
pub use palette::PaletteClassifier;

use std::sync::Arc;

use bevy::prelude::*;
use bevy::tasks::futures_lite::future;
use bevy::tasks::{AsyncComputeTaskPool, Task, block_on};
use constants::scene_settings::MODEL_INPUT_SIZE;
use image::DynamicImage;

use crate::engine::StatusMessage;
use crate::engine::scene::{MovableProxy, ProxyGeneration, spawn_proxy};

/// A still image supplied by the host's image source (camera, gallery,
/// file drop). One event per captured object.
#[derive(Event, Clone)]
pub struct ObjectCaptured {
    pub image: Arc<DynamicImage>,
}

/// The classifier behind the service. Swappable; the binary installs
/// the palette model.
#[derive(Resource, Clone)]
pub struct ClassifierHandle(pub Arc<dyn ImageClassifier>);

struct InFlightRequest {
    generation: u64,
    task: Task<Result<ClassificationResult, ClassifyError>>,
}

/// Classification requests not yet applied. Requests from earlier
/// proxy generations may still be in flight here after the proxy they
/// belong to is gone; they complete and get discarded.
#[derive(Resource, Default)]
pub struct PendingClassifications(Vec<InFlightRequest>);

impl PendingClassifications {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Spawn a proxy for each captured image and kick off classification
/// on the compute pool. A capture arriving while an object is already
/// in play is rejected: the player has to sort or discard it first.
pub fn submit_captures(
    mut captures: EventReader<ObjectCaptured>,
    existing: Query<(), With<MovableProxy>>,
    mut generation: ResMut<ProxyGeneration>,
    classifier: Res<ClassifierHandle>,
    mut pending: ResMut<PendingClassifications>,
    mut commands: Commands,
    mut messages: EventWriter<StatusMessage>,
) {
    // Spawns are deferred, so the query alone cannot guard two
    // captures arriving in the same frame.
    let mut occupied = !existing.is_empty();

    for capture in captures.read() {
        if occupied {
            warn!("an object is already in play; sort or discard it before capturing another");
            continue;
        }
        occupied = true;

        generation.0 += 1;
        let token = generation.0;
        spawn_proxy(&mut commands, capture.image.clone(), token);

        let classifier = classifier.0.clone();
        let image = capture.image.clone();
        let task = AsyncComputeTaskPool::get().spawn(async move {
            let prepared = letterbox(&image, MODEL_INPUT_SIZE);
            classifier.classify(&prepared)
        });
        pending.0.push(InFlightRequest {
            generation: token,
            task,
        });

        messages.write(StatusMessage("Classifying object. Please wait.".into()));
        info!("submitted classification request (generation {token})");
    }
}

/// Apply finished classification results on the scene context. Only a
/// result whose generation matches the live proxy is applied.
pub fn poll_classifications(
    mut pending: ResMut<PendingClassifications>,
    mut proxies: Query<&mut MovableProxy>,
    mut messages: EventWriter<StatusMessage>,
) {
    pending.0.retain_mut(|request| {
        let Some(outcome) = block_on(future::poll_once(&mut request.task)) else {
            return true;
        };

        let live = proxies
            .single_mut()
            .ok()
            .filter(|proxy| proxy.generation == request.generation);
        let Some(mut proxy) = live else {
            debug!(
                "discarding stale classification result (generation {})",
                request.generation
            );
            return false;
        };

        match outcome {
            Ok(result) => {
                info!(
                    "classified as '{}' (generation {})",
                    result.label, request.generation
                );
                proxy.pending_label = Some(result.label);
                messages.write(StatusMessage(
                    "Drag your garbage into the bin you think is correct.".into(),
                ));
            }
            Err(err) => {
                warn!("classification failed: {err}");
                messages.write(StatusMessage("Classification: Unknown".into()));
            }
        }
        false
    });
}

/// Registers the classification service around a host-provided model.
pub struct ClassifyPlugin {
    pub classifier: Arc<dyn ImageClassifier>,
}

impl Plugin for ClassifyPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClassifierHandle(self.classifier.clone()))
            .init_resource::<PendingClassifications>()
            .add_event::<ObjectCaptured>()
            .add_event::<StatusMessage>()
            .add_systems(Update, (submit_captures, poll_classifications).chain());
    }
}
