pub mod scene_settings;
pub mod zone;
