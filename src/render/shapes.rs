//! Shape Board Render Plan

use crate::models::{Shape, ShapeType};
use crate::store::{count_by_type, ShapeChange};

/// Everything needed to build one shape tile
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeView {
    pub id: String,
    pub shape_type: ShapeType,
    pub color: String,
}

impl ShapeView {
    pub fn aria_label(&self) -> String {
        format!("{} - kliknij, aby usunąć", self.shape_type.label())
    }
}

impl From<&Shape> for ShapeView {
    fn from(shape: &Shape) -> Self {
        Self {
            id: shape.id.clone(),
            shape_type: shape.shape_type,
            color: shape.color.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShapePatch {
    /// Drop every tile on the board
    Clear,
    Append(ShapeView),
    Remove { id: String },
    SetColor { id: String, color: String },
    SetCount { shape_type: ShapeType, count: usize },
}

/// Patches bringing the board in line with `shapes` after `change`;
/// a missing descriptor means a full rebuild
pub fn plan_shapes(shapes: &[Shape], change: Option<&ShapeChange>) -> Vec<ShapePatch> {
    let mut patches = Vec::new();

    for shape_type in ShapeType::ALL {
        patches.push(ShapePatch::SetCount { shape_type, count: count_by_type(shapes, shape_type) });
    }

    match change {
        Some(ShapeChange::Add { id, .. }) => {
            if let Some(shape) = shapes.iter().find(|shape| &shape.id == id) {
                patches.push(ShapePatch::Append(shape.into()));
            }
        }
        Some(ShapeChange::Remove { id }) => {
            patches.push(ShapePatch::Remove { id: id.clone() });
        }
        Some(ShapeChange::RecolorShape { id }) => {
            if let Some(shape) = shapes.iter().find(|shape| &shape.id == id) {
                patches.push(set_color(shape));
            }
        }
        Some(ShapeChange::RecolorType { shape_type }) => {
            patches.extend(
                shapes
                    .iter()
                    .filter(|shape| shape.shape_type == *shape_type)
                    .map(set_color),
            );
        }
        Some(ShapeChange::Init) | None => {
            patches.push(ShapePatch::Clear);
            patches.extend(shapes.iter().map(|shape| ShapePatch::Append(shape.into())));
        }
    }

    patches
}

fn set_color(shape: &Shape) -> ShapePatch {
    ShapePatch::SetColor {
        id: shape.id.clone(),
        color: shape.color.clone(),
    }
}
