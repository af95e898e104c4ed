//! Board Context
//!
//! Stores and the shared color picker, provided via Leptos Context API.

use leptos::prelude::*;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlInputElement};

use crate::config::{self, PICKER_FALLBACK_OFFSET};
use crate::picker::{apply_to_kanban, apply_to_shapes, preset_color, ColorPicker, PickerTarget};
use crate::storage::default_storage;
use crate::store::{KanbanStore, ShapeStore};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct BoardContext {
    pub kanban: StoredValue<KanbanStore, LocalStorage>,
    pub shapes: StoredValue<ShapeStore, LocalStorage>,
    picker: StoredValue<ColorPicker, LocalStorage>,
    /// The single hidden `<input type="color">`
    pub picker_input: NodeRef<leptos::html::Input>,
}

impl BoardContext {
    pub fn new() -> Self {
        Self {
            kanban: StoredValue::new_local(KanbanStore::new(config::KANBAN, default_storage())),
            shapes: StoredValue::new_local(ShapeStore::new(config::SHAPES, default_storage())),
            picker: StoredValue::new_local(ColorPicker::new()),
            picker_input: NodeRef::new(),
        }
    }

    /// Arm the picker and open the native dialog under `origin`
    pub fn open_picker(&self, target: PickerTarget, origin: Option<&Element>) {
        let preset = self
            .kanban
            .with_value(|kanban| self.shapes.with_value(|shapes| preset_color(&target, kanban, shapes)));
        self.picker.update_value(|picker| picker.open(target));

        let Some(input) = self.picker_input.get_untracked() else {
            log::warn!("color input is not mounted");
            return;
        };
        input.set_value(&preset);
        position_input(&input, origin);
        show_native_picker(&input);
    }

    /// Route a picked color to whatever target is armed
    pub fn apply_picked_color(&self, color: &str) {
        let Some(target) = self.picker.with_value(|picker| picker.target().cloned()) else {
            return;
        };
        self.kanban.update_value(|store| apply_to_kanban(&target, color, store));
        self.shapes.update_value(|store| apply_to_shapes(&target, color, store));
    }

    pub fn blur_picker(&self) {
        self.picker.update_value(|picker| picker.blur());
    }
}

/// Get the board context
pub fn use_boards() -> BoardContext {
    expect_context::<BoardContext>()
}

/// Page coordinates for the input: under `anchor` (viewport `bottom`, `left`)
/// shifted by the scroll offset, or a fixed corner without an anchor
fn picker_position(anchor: Option<(f64, f64)>, scroll: (f64, f64)) -> (f64, f64) {
    match anchor {
        Some((bottom, left)) => (bottom + scroll.1, left + scroll.0),
        None => (PICKER_FALLBACK_OFFSET, PICKER_FALLBACK_OFFSET),
    }
}

fn position_input(input: &HtmlInputElement, origin: Option<&Element>) {
    let window = web_sys::window();
    let anchor = origin.map(|origin| {
        let rect = origin.get_bounding_client_rect();
        (rect.bottom(), rect.left())
    });
    let scroll = window.as_ref().map_or((0.0, 0.0), |window| {
        (window.scroll_x().unwrap_or(0.0), window.scroll_y().unwrap_or(0.0))
    });
    let (top, left) = picker_position(anchor, scroll);

    let style = web_sys::HtmlElement::style(input);
    for (property, value) in [("top", top), ("left", left)] {
        if let Err(e) = style.set_property(property, &format!("{}px", value)) {
            log::warn!("color input `{}` not set: {:?}", property, e);
        }
    }
}

/// `showPicker()` where the browser has it, `click()` otherwise
fn show_native_picker(input: &HtmlInputElement) {
    let show_picker = js_sys::Reflect::get(input.as_ref(), &JsValue::from_str("showPicker"))
        .ok()
        .and_then(|value| value.dyn_into::<js_sys::Function>().ok());
    let opened = show_picker.is_some_and(|show| show.call0(input.as_ref()).is_ok());
    if !opened {
        input.click();
    }
}
