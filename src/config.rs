//! Board Configuration
//!
//! Per-board constants: storage slot and color palette.

use crate::color::ColorProfile;

/// Settings one board store is built with
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardConfig {
    /// Local storage key holding the serialized state
    pub storage_key: &'static str,
    /// Saturation/lightness used for random colors
    pub palette: ColorProfile,
}

/// Kanban board defaults
pub const KANBAN: BoardConfig = BoardConfig {
    storage_key: "kanban-lab4-state",
    palette: ColorProfile { saturation: 70, lightness: 55 },
};

/// Shape board defaults
pub const SHAPES: BoardConfig = BoardConfig {
    storage_key: "lab5-shapes-state",
    palette: ColorProfile { saturation: 72, lightness: 70 },
};

/// Title given to freshly added cards
pub const DEFAULT_CARD_TITLE: &str = "Nowa karta";

/// Color input preset when the target has no usable color
pub const FALLBACK_PICKER_COLOR: &str = "#60a5fa";

/// Picker offset (px) when no origin element is known
pub const PICKER_FALLBACK_OFFSET: f64 = 12.0;
