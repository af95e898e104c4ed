//! Shape Board Component
//!
//! Control bar, per-type counters and the tile board. Tiles are patched in
//! by a `ShapeBoardView` subscribed to the shape store.

use leptos::prelude::*;
use web_sys::Element;

use crate::context::use_boards;
use crate::dispatch::{
    resolve_shape_click, resolve_shape_context, resolve_shape_control, resolve_shape_control_context,
    Followup, ShapeIntent,
};
use crate::dom::{closest_data, event_element, ShapeBoardView};
use crate::render::plan_shapes;
use crate::store::ListenerId;

/// `data-action` of the button an event started in
fn clicked_action(ev: &web_sys::Event) -> Option<(Element, String)> {
    let button = event_element(ev)?.closest("[data-action]").ok().flatten()?;
    let action = button.get_attribute("data-action")?;
    Some((button, action))
}

/// Shape board
#[component]
pub fn ShapeBoard() -> impl IntoView {
    let ctx = use_boards();
    let root = NodeRef::<leptos::html::Div>::new();
    let listener = StoredValue::new(None::<ListenerId>);

    let dispatch = move |intent: ShapeIntent, origin: Option<&Element>| {
        if let Some(Followup::OpenPicker(target)) = ctx.shapes.try_update_value(|store| intent.apply(store)) {
            ctx.open_picker(target, origin);
        }
    };

    let on_control_click = move |ev: web_sys::MouseEvent| {
        let Some((button, action)) = clicked_action(&ev) else { return };
        if let Some(intent) = resolve_shape_control(&action) {
            dispatch(intent, Some(&button));
        }
    };

    let on_control_context = move |ev: web_sys::MouseEvent| {
        let Some((button, action)) = clicked_action(&ev) else { return };
        if let Some(intent) = resolve_shape_control_context(&action) {
            ev.prevent_default();
            dispatch(intent, Some(&button));
        }
    };

    let on_board_click = move |ev: web_sys::MouseEvent| {
        let Some(target) = event_element(&ev) else { return };
        if let Some(id) = closest_data(&target, ".shape", "data-id") {
            dispatch(resolve_shape_click(&id), None);
        }
    };

    let on_board_context = move |ev: web_sys::MouseEvent| {
        let Some(target) = event_element(&ev) else { return };
        if let Some(id) = closest_data(&target, ".shape", "data-id") {
            ev.prevent_default();
            dispatch(resolve_shape_context(&id), Some(&target));
        }
    };

    // Attach the DOM view once the board is mounted
    Effect::new(move |_| {
        if listener.get_value().is_some() {
            return;
        }
        let Some(root) = root.get_untracked() else {
            log::warn!("shape board root is not mounted");
            return;
        };
        let view = match ShapeBoardView::attach(&root.into()) {
            Ok(view) => view,
            Err(e) => {
                log::warn!("shape board not initialized: {}", e);
                return;
            }
        };
        let id = ctx.shapes.try_update_value(|store| {
            store.subscribe(move |shapes, change| view.apply(&plan_shapes(shapes, Some(change))))
        });
        listener.set_value(id);
    });

    on_cleanup(move || {
        if let Some(id) = listener.get_value() {
            ctx.shapes.update_value(|store| {
                store.unsubscribe(id);
            });
        }
    });

    view! {
        <div class="shape-board" node_ref=root>
            <div class="controls" on:click=on_control_click on:contextmenu=on_control_context>
                <button type="button" class="btn primary" data-action="add-square">"Dodaj kwadrat"</button>
                <button type="button" class="btn primary" data-action="add-circle">"Dodaj koło"</button>
                <button type="button" class="btn" data-action="recolor-squares">"Przekoloruj kwadraty"</button>
                <button type="button" class="btn" data-action="recolor-circles">"Przekoloruj koła"</button>
            </div>
            <p class="counters">
                "Kwadraty: " <span data-role="count-squares"></span>
                " · Koła: " <span data-role="count-circles"></span>
            </p>
            <div class="board" data-role="board" on:click=on_board_click on:contextmenu=on_board_context></div>
        </div>
    }
}
