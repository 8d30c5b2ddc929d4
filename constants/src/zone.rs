use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// The fixed, closed set of container zones. The bin lineup is part of
/// the scene definition and never changes at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneLabel {
    General,
    Metal,
    Plastic,
    Paper,
    Organic,
}

impl ZoneLabel {
    /// Zones in left-to-right scene order.
    pub const ALL: [ZoneLabel; 5] = [
        ZoneLabel::General,
        ZoneLabel::Metal,
        ZoneLabel::Plastic,
        ZoneLabel::Paper,
        ZoneLabel::Organic,
    ];

    /// Convert string identifier to a zone label, case-insensitively.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "general" => Some(Self::General),
            "metal" => Some(Self::Metal),
            "plastic" => Some(Self::Plastic),
            "paper" => Some(Self::Paper),
            "organic" => Some(Self::Organic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Metal => "metal",
            Self::Plastic => "plastic",
            Self::Paper => "paper",
            Self::Organic => "organic",
        }
    }

    /// Classifier labels are free-form strings; matching against a zone
    /// is always case-insensitive.
    pub fn matches(&self, label: &str) -> bool {
        label.eq_ignore_ascii_case(self.as_str())
    }

    /// Marker tint for the rendered zone quad.
    pub fn marker_color(&self) -> Color {
        match self {
            Self::General => Color::srgb(0.45, 0.45, 0.48),
            Self::Metal => Color::srgb(0.70, 0.72, 0.78),
            Self::Plastic => Color::srgb(0.85, 0.25, 0.25),
            Self::Paper => Color::srgb(0.90, 0.86, 0.74),
            Self::Organic => Color::srgb(0.30, 0.55, 0.24),
        }
    }
}
