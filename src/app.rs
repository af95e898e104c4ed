//! Boards App
//!
//! Tab bar plus the active board; both boards share one context.

use leptos::prelude::*;

use crate::components::{BoardTab, BoardTabBar, ColorPickerInput, KanbanBoard, ShapeBoard};
use crate::context::BoardContext;

#[component]
pub fn App() -> impl IntoView {
    let (current_tab, set_current_tab) = signal(BoardTab::Kanban);

    // Provide stores and picker to all children
    provide_context(BoardContext::new());

    view! {
        <div class="app-layout">
            <BoardTabBar current_tab=current_tab set_current_tab=set_current_tab />

            <main class="main-content">
                <Show
                    when=move || current_tab.get() == BoardTab::Kanban
                    fallback=|| view! { <ShapeBoard /> }
                >
                    <KanbanBoard />
                </Show>
            </main>

            <ColorPickerInput />
        </div>
    }
}
