//! Board Tab Bar Component
//!
//! Tab bar for switching between the kanban and shape boards.

use leptos::prelude::*;

/// Boards the app can show
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardTab {
    Kanban,
    Shapes,
}

impl BoardTab {
    pub const ALL: [BoardTab; 2] = [BoardTab::Kanban, BoardTab::Shapes];

    pub fn label(self) -> &'static str {
        match self {
            BoardTab::Kanban => "Kanban",
            BoardTab::Shapes => "Kształty",
        }
    }
}

/// Board Tab Bar component
#[component]
pub fn BoardTabBar(
    current_tab: ReadSignal<BoardTab>,
    set_current_tab: WriteSignal<BoardTab>,
) -> impl IntoView {
    view! {
        <nav class="board-tab-bar">
            {BoardTab::ALL.into_iter().map(|tab| {
                let tab_class = move || {
                    if current_tab.get() == tab { "board-tab active" } else { "board-tab" }
                };
                view! {
                    <button
                        type="button"
                        class=tab_class
                        on:click=move |_| set_current_tab.set(tab)
                    >
                        {tab.label()}
                    </button>
                }
            }).collect_view()}
        </nav>
    }
}
