//! Board Models
//!
//! Records and persisted state layouts for both boards.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Fresh opaque record id
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current time as epoch milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

// ========================
// Shape board
// ========================

/// Shape kinds a tile can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Square,
    Circle,
}

impl ShapeType {
    pub const ALL: [ShapeType; 2] = [ShapeType::Square, ShapeType::Circle];

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeType::Square => "square",
            ShapeType::Circle => "circle",
        }
    }

    /// Polish label used in aria attributes
    pub fn label(self) -> &'static str {
        match self {
            ShapeType::Square => "kwadrat",
            ShapeType::Circle => "koło",
        }
    }
}

/// Shape tile (persisted as `{id, type, color, createdAt}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub id: String,
    #[serde(rename = "type")]
    pub shape_type: ShapeType,
    pub color: String,
    pub created_at: i64,
}

/// Persisted shape board layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapesState {
    pub shapes: Vec<Shape>,
}

// ========================
// Kanban board
// ========================

/// The three fixed kanban columns, in board order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnKey {
    Todo,
    InProgress,
    Done,
}

impl ColumnKey {
    pub const ALL: [ColumnKey; 3] = [ColumnKey::Todo, ColumnKey::InProgress, ColumnKey::Done];

    /// Key as used in storage and `data-column` attributes
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnKey::Todo => "todo",
            ColumnKey::InProgress => "inProgress",
            ColumnKey::Done => "done",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColumnKey::Todo => "Do zrobienia",
            ColumnKey::InProgress => "W trakcie",
            ColumnKey::Done => "Zrobione",
        }
    }

    pub fn index(self) -> usize {
        match self {
            ColumnKey::Todo => 0,
            ColumnKey::InProgress => 1,
            ColumnKey::Done => 2,
        }
    }

    /// Adjacent column in the given direction, if the board has one
    pub fn neighbor(self, direction: Direction) -> Option<ColumnKey> {
        let target = self.index().checked_add_signed(direction.offset())?;
        Self::ALL.get(target).copied()
    }

    pub fn is_first(self) -> bool {
        self.neighbor(Direction::Left).is_none()
    }

    pub fn is_last(self) -> bool {
        self.neighbor(Direction::Right).is_none()
    }
}

/// Card move direction (`-1` left, `+1` right)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn offset(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Kanban card (persisted as `{id, title, color, createdAt}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    pub color: String,
    pub created_at: i64,
}

/// Missing and `null` titles both read as empty
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Persisted kanban layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanState {
    pub todo: Vec<Card>,
    pub in_progress: Vec<Card>,
    pub done: Vec<Card>,
}

impl KanbanState {
    pub fn column(&self, key: ColumnKey) -> &[Card] {
        match key {
            ColumnKey::Todo => &self.todo,
            ColumnKey::InProgress => &self.in_progress,
            ColumnKey::Done => &self.done,
        }
    }

    pub fn column_mut(&mut self, key: ColumnKey) -> &mut Vec<Card> {
        match key {
            ColumnKey::Todo => &mut self.todo,
            ColumnKey::InProgress => &mut self.in_progress,
            ColumnKey::Done => &mut self.done,
        }
    }

    pub fn len(&self) -> usize {
        ColumnKey::ALL.iter().map(|key| self.column(*key).len()).sum()
    }
}
