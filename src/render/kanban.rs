//! Kanban Board Render Plan

use crate::models::{Card, ColumnKey, KanbanState};
use crate::store::KanbanChange;

/// Everything needed to build one card element
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardView {
    pub id: String,
    pub title: String,
    pub color: String,
    pub can_move_left: bool,
    pub can_move_right: bool,
}

impl CardView {
    pub fn new(card: &Card, column: ColumnKey) -> Self {
        Self {
            id: card.id.clone(),
            title: card.title.clone(),
            color: card.color.clone(),
            can_move_left: !column.is_first(),
            can_move_right: !column.is_last(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardPatch {
    /// Drop every card element of a column
    ClearColumn(ColumnKey),
    Append { column: ColumnKey, view: CardView },
    Remove { id: String },
    SetColor { id: String, color: String },
    SetCount { column: ColumnKey, count: usize },
    /// Focus and select the title of a fresh card
    FocusTitle { id: String },
}

/// Patches bringing the board in line with `state` after `change`;
/// a missing descriptor means a full rebuild
pub fn plan_kanban(state: &KanbanState, change: Option<&KanbanChange>) -> Vec<CardPatch> {
    let mut patches: Vec<CardPatch> = ColumnKey::ALL
        .into_iter()
        .map(|column| CardPatch::SetCount { column, count: state.column(column).len() })
        .collect();

    match change {
        Some(KanbanChange::Add { column, id }) => {
            if let Some(card) = find(state, *column, id) {
                patches.push(CardPatch::Append { column: *column, view: CardView::new(card, *column) });
                patches.push(CardPatch::FocusTitle { id: id.clone() });
            }
        }
        Some(KanbanChange::Remove { id, .. }) => {
            patches.push(CardPatch::Remove { id: id.clone() });
        }
        Some(KanbanChange::Move { to, id, .. }) => {
            patches.push(CardPatch::Remove { id: id.clone() });
            if let Some(card) = find(state, *to, id) {
                patches.push(CardPatch::Append { column: *to, view: CardView::new(card, *to) });
            }
        }
        Some(KanbanChange::RecolorCard { column, id }) => {
            if let Some(card) = find(state, *column, id) {
                patches.push(set_color(card));
            }
        }
        Some(KanbanChange::RecolorColumn { column }) => {
            patches.extend(state.column(*column).iter().map(set_color));
        }
        Some(KanbanChange::Sort { column }) => {
            rebuild_column(state, *column, &mut patches);
        }
        // The edited field already shows the new text
        Some(KanbanChange::UpdateTitle { .. }) => {}
        Some(KanbanChange::Init) | None => {
            for column in ColumnKey::ALL {
                rebuild_column(state, column, &mut patches);
            }
        }
    }

    patches
}

fn find<'a>(state: &'a KanbanState, column: ColumnKey, id: &str) -> Option<&'a Card> {
    state.column(column).iter().find(|card| card.id == id)
}

fn set_color(card: &Card) -> CardPatch {
    CardPatch::SetColor {
        id: card.id.clone(),
        color: card.color.clone(),
    }
}

fn rebuild_column(state: &KanbanState, column: ColumnKey, patches: &mut Vec<CardPatch>) {
    patches.push(CardPatch::ClearColumn(column));
    patches.extend(state.column(column).iter().map(|card| CardPatch::Append {
        column,
        view: CardView::new(card, column),
    }));
}
