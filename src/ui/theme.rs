// livetail - ui/theme.rs
//
// Colour scheme, level colour mapping, and layout constants.
// No dependencies on app state or business logic.

use crate::core::model::Level;
use egui::Color32;

/// Colour for a given severity level.
pub fn level_colour(level: Level) -> Color32 {
    match level {
        Level::Verbose => Color32::from_rgb(107, 114, 128), // Gray 500
        Level::Debug => Color32::from_rgb(148, 163, 184),   // Slate 400
        Level::Info => Color32::from_rgb(59, 130, 246),     // Blue 500
        Level::Warn => Color32::from_rgb(217, 119, 6),      // Amber 600
        Level::Error => Color32::from_rgb(220, 38, 38),     // Red 600
        Level::Fatal => Color32::from_rgb(255, 0, 0),
    }
}

/// Layout constants.
pub const ROW_HEIGHT: f32 = 20.0;
pub const MONO_FONT_SIZE: f32 = 12.0;
