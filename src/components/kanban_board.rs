//! Kanban Board Component
//!
//! Three fixed columns. Cards are patched in imperatively by a
//! `KanbanBoardView` subscribed to the kanban store; clicks and title edits
//! are delegated to each column element.

use leptos::prelude::*;

use crate::context::use_boards;
use crate::dispatch::{resolve_kanban_click, resolve_title_input, Followup};
use crate::dom::{closest_data, event_element, KanbanBoardView};
use crate::models::ColumnKey;
use crate::render::plan_kanban;
use crate::store::ListenerId;

/// One column: header with counter and actions, plus the card container
#[component]
fn KanbanColumn(column: ColumnKey) -> impl IntoView {
    let ctx = use_boards();

    let on_click = move |ev: web_sys::MouseEvent| {
        let Some(target) = event_element(&ev) else { return };
        let Ok(Some(button)) = target.closest("button[data-action]") else { return };
        let Some(action) = button.get_attribute("data-action") else { return };
        let card_id = closest_data(&button, ".card", "data-id");

        let Some(intent) = resolve_kanban_click(&action, column, card_id.as_deref()) else { return };
        if let Some(Followup::OpenPicker(target)) = ctx.kanban.try_update_value(|store| intent.apply(store)) {
            ctx.open_picker(target, Some(&button));
        }
    };

    let on_input = move |ev: web_sys::Event| {
        let Some(target) = event_element(&ev) else { return };
        if !target.matches(r#"[data-role="card-body"]"#).unwrap_or(false) {
            return;
        }
        let Some(card_id) = closest_data(&target, ".card", "data-id") else { return };
        let text = target.text_content().unwrap_or_default();

        let intent = resolve_title_input(column, &card_id, &text);
        ctx.kanban.update_value(|store| {
            intent.apply(store);
        });
    };

    view! {
        <section class="column" data-column=column.as_str() on:click=on_click on:input=on_input>
            <div class="column-header">
                <div class="column-title">
                    <h2>{column.label()}</h2>
                    <span class="counter" data-role="counter"></span>
                </div>
                <div class="column-actions">
                    <button type="button" class="btn primary icon" data-action="add-card">"+"</button>
                    <button type="button" class="btn" data-action="color-column">"Koloruj kolumnę"</button>
                    <button type="button" class="btn" data-action="sort-column">"Sortuj"</button>
                </div>
            </div>
            <div class="cards" data-role="cards"></div>
        </section>
    }
}

/// Kanban board
#[component]
pub fn KanbanBoard() -> impl IntoView {
    let ctx = use_boards();
    let root = NodeRef::<leptos::html::Div>::new();
    let listener = StoredValue::new(None::<ListenerId>);

    // Attach the DOM view once the columns are mounted
    Effect::new(move |_| {
        if listener.get_value().is_some() {
            return;
        }
        let Some(root) = root.get_untracked() else {
            log::warn!("kanban board root is not mounted");
            return;
        };
        let view = match KanbanBoardView::attach(&root.into()) {
            Ok(view) => view,
            Err(e) => {
                log::warn!("kanban board not initialized: {}", e);
                return;
            }
        };
        let id = ctx.kanban.try_update_value(|store| {
            store.subscribe(move |state, change| view.apply(&plan_kanban(state, Some(change))))
        });
        listener.set_value(id);
    });

    on_cleanup(move || {
        if let Some(id) = listener.get_value() {
            ctx.kanban.update_value(|store| {
                store.unsubscribe(id);
            });
        }
    });

    view! {
        <div class="board kanban-board" node_ref=root>
            {ColumnKey::ALL.into_iter().map(|column| view! { <KanbanColumn column=column /> }).collect_view()}
        </div>
    }
}
