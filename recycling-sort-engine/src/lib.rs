//! Interactive sorting game core.
//!
//! A captured object image is classified on a background task pool,
//! rendered as a draggable proxy in a 3D scene of fixed container
//! zones, and scored when the player drops it into the zone whose
//! label matches the classification.
//!
//! The core is split into plugins that run headless:
//!
//! - [`engine::scene::ScenePlugin`]: container zones, the single
//!   movable proxy, camera pose state, ray hit testing.
//! - [`engine::classify::ClassifyPlugin`]: asynchronous image
//!   classification with stale-result discarding.
//! - [`engine::score::ScorePlugin`]: persisted score with change
//!   notifications.
//! - [`tools::drag::DragToolPlugin`]: pointer drag state machine and
//!   drop outcome resolution.
//!
//! Window, camera, HUD, and input adapters live in the binary.

pub mod engine;
pub mod tools;
