//! Input Dispatch
//!
//! Maps `data-action` names (and the card/shape they were clicked in) to
//! exactly one store call. DOM lookups stay in the components; everything
//! here works on plain strings so it can be tested natively.

use crate::models::{ColumnKey, Direction, ShapeType};
use crate::picker::PickerTarget;
use crate::store::{KanbanStore, ShapeStore};

/// Outcome of a dispatched intent the caller still has to act on
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Followup {
    Handled,
    OpenPicker(PickerTarget),
}

// ========================
// Kanban
// ========================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KanbanIntent {
    Add(ColumnKey),
    Sort(ColumnKey),
    Delete { column: ColumnKey, id: String },
    Move { column: ColumnKey, id: String, direction: Direction },
    EditTitle { column: ColumnKey, id: String, text: String },
    Pick(PickerTarget),
}

/// Resolve a click on a `data-action` button inside a column.
///
/// Column actions need only the column; card actions also need the id of
/// the enclosing card and resolve to nothing without one.
pub fn resolve_kanban_click(action: &str, column: ColumnKey, card_id: Option<&str>) -> Option<KanbanIntent> {
    match action {
        "add-card" => return Some(KanbanIntent::Add(column)),
        "sort-column" => return Some(KanbanIntent::Sort(column)),
        "color-column" => return Some(KanbanIntent::Pick(PickerTarget::Column(column))),
        _ => {}
    }

    let id = card_id?.to_string();
    let intent = match action {
        "delete-card" => KanbanIntent::Delete { column, id },
        "move-left" => KanbanIntent::Move { column, id, direction: Direction::Left },
        "move-right" => KanbanIntent::Move { column, id, direction: Direction::Right },
        "color-card" => KanbanIntent::Pick(PickerTarget::Card { column, id }),
        _ => return None,
    };
    Some(intent)
}

/// Title edits commit trimmed text on every input event
pub fn resolve_title_input(column: ColumnKey, card_id: &str, raw_text: &str) -> KanbanIntent {
    KanbanIntent::EditTitle {
        column,
        id: card_id.to_string(),
        text: raw_text.trim().to_string(),
    }
}

impl KanbanIntent {
    pub fn apply(self, store: &mut KanbanStore) -> Followup {
        match self {
            KanbanIntent::Add(column) => {
                store.add_card(column);
            }
            KanbanIntent::Sort(column) => store.sort_column(column),
            KanbanIntent::Delete { column, id } => store.delete_card(column, &id),
            KanbanIntent::Move { column, id, direction } => store.move_card(column, &id, direction),
            KanbanIntent::EditTitle { column, id, text } => store.update_title(column, &id, &text),
            KanbanIntent::Pick(target) => return Followup::OpenPicker(target),
        }
        Followup::Handled
    }
}

// ========================
// Shape board
// ========================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShapeIntent {
    Add(ShapeType),
    RecolorType(ShapeType),
    Remove(String),
    Pick(PickerTarget),
}

/// Resolve a click on a control-bar button
pub fn resolve_shape_control(action: &str) -> Option<ShapeIntent> {
    let intent = match action {
        "add-square" => ShapeIntent::Add(ShapeType::Square),
        "add-circle" => ShapeIntent::Add(ShapeType::Circle),
        "recolor-squares" => ShapeIntent::RecolorType(ShapeType::Square),
        "recolor-circles" => ShapeIntent::RecolorType(ShapeType::Circle),
        _ => return None,
    };
    Some(intent)
}

/// Resolve a right-click on a recolor button: pick the type's color by hand
pub fn resolve_shape_control_context(action: &str) -> Option<ShapeIntent> {
    match resolve_shape_control(action)? {
        ShapeIntent::RecolorType(shape_type) => Some(ShapeIntent::Pick(PickerTarget::Type(shape_type))),
        _ => None,
    }
}

/// Clicking a tile removes it
pub fn resolve_shape_click(shape_id: &str) -> ShapeIntent {
    ShapeIntent::Remove(shape_id.to_string())
}

/// Right-clicking a tile picks its color
pub fn resolve_shape_context(shape_id: &str) -> ShapeIntent {
    ShapeIntent::Pick(PickerTarget::Shape { id: shape_id.to_string() })
}

impl ShapeIntent {
    pub fn apply(self, store: &mut ShapeStore) -> Followup {
        match self {
            ShapeIntent::Add(shape_type) => {
                store.add_shape(shape_type);
            }
            ShapeIntent::RecolorType(shape_type) => store.recolor_type(shape_type, None),
            ShapeIntent::Remove(id) => store.remove_shape(&id),
            ShapeIntent::Pick(target) => return Followup::OpenPicker(target),
        }
        Followup::Handled
    }
}
