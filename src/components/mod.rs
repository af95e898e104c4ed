//! UI Components
//!
//! Leptos shells for the two boards and the shared color input.

mod board_tab_bar;
mod color_picker;
mod kanban_board;
mod shape_board;

pub use board_tab_bar::{BoardTab, BoardTabBar};
pub use color_picker::ColorPickerInput;
pub use kanban_board::KanbanBoard;
pub use shape_board::ShapeBoard;
