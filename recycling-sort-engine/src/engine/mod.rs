/// Camera pose state and projection math for drag unprojection.
pub mod camera;

/// Asynchronous image classification service.
pub mod classify;

/// Container zones, the movable proxy, and spatial queries.
pub mod scene;

/// Persisted score with change notifications.
pub mod score;

use bevy::prelude::*;

/// Short player-facing status line ("Correct! +1 point", "Try to place
/// the item in a bin.", ...). The HUD shows the latest one.
#[derive(Event, Debug, Clone)]
pub struct StatusMessage(pub String);
