//! Incremental Render Planning
//!
//! Turns a store snapshot plus the change descriptor into a list of patches.
//! Planning is pure; `crate::dom` applies the patches to real elements.

mod kanban;
mod shapes;

pub use kanban::{plan_kanban, CardPatch, CardView};
pub use shapes::{plan_shapes, ShapePatch, ShapeView};
