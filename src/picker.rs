//! Color Picker Target
//!
//! One hidden native color input serves every board. Opening it arms a
//! target; picked colors go to the armed target until the input loses focus.

use crate::color::to_hex;
use crate::config::FALLBACK_PICKER_COLOR;
use crate::models::{ColumnKey, ShapeType};
use crate::store::{KanbanStore, ShapeStore};

/// Record(s) the next picked color applies to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickerTarget {
    Card { column: ColumnKey, id: String },
    Column(ColumnKey),
    Shape { id: String },
    Type(ShapeType),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PickerState {
    #[default]
    Idle,
    Armed(PickerTarget),
}

#[derive(Debug, Default)]
pub struct ColorPicker {
    state: PickerState,
}

impl ColorPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a target, replacing any armed one
    pub fn open(&mut self, target: PickerTarget) {
        log::debug!("color picker armed: {:?}", target);
        self.state = PickerState::Armed(target);
    }

    pub fn blur(&mut self) {
        self.state = PickerState::Idle;
    }

    pub fn target(&self) -> Option<&PickerTarget> {
        match &self.state {
            PickerState::Armed(target) => Some(target),
            PickerState::Idle => None,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &PickerState {
        &self.state
    }
}

/// Apply a picked color to a kanban target; other targets are ignored
pub fn apply_to_kanban(target: &PickerTarget, color: &str, store: &mut KanbanStore) {
    match target {
        PickerTarget::Card { column, id } => store.recolor_card(*column, id, Some(color)),
        PickerTarget::Column(column) => store.recolor_column(*column, Some(color)),
        PickerTarget::Shape { .. } | PickerTarget::Type(_) => {}
    }
}

/// Apply a picked color to a shape board target; other targets are ignored
pub fn apply_to_shapes(target: &PickerTarget, color: &str, store: &mut ShapeStore) {
    match target {
        PickerTarget::Shape { id } => store.recolor_shape(id, Some(color)),
        PickerTarget::Type(shape_type) => store.recolor_type(*shape_type, Some(color)),
        PickerTarget::Card { .. } | PickerTarget::Column(_) => {}
    }
}

/// Initial input value: the target's current color as `#rrggbb`
pub fn preset_color(target: &PickerTarget, kanban: &KanbanStore, shapes: &ShapeStore) -> String {
    let current = match target {
        PickerTarget::Card { column, id } => kanban.find(*column, id).map(|card| card.color.clone()),
        PickerTarget::Column(column) => kanban.snapshot().column(*column).first().map(|card| card.color.clone()),
        PickerTarget::Shape { id } => shapes.find(id).map(|shape| shape.color.clone()),
        PickerTarget::Type(shape_type) => shapes
            .snapshot()
            .into_iter()
            .find(|shape| shape.shape_type == *shape_type)
            .map(|shape| shape.color),
    };
    current
        .as_deref()
        .and_then(to_hex)
        .unwrap_or_else(|| FALLBACK_PICKER_COLOR.to_string())
}
