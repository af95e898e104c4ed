//! Color Picker Input Component
//!
//! The single hidden native color input shared by both boards.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::context::use_boards;

/// Hidden `<input type="color">`; picked colors go to the armed target
#[component]
pub fn ColorPickerInput() -> impl IntoView {
    let ctx = use_boards();

    let apply = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        ctx.apply_picked_color(&input.value());
    };

    view! {
        <input
            type="color"
            class="color-picker"
            aria-hidden="true"
            tabindex="-1"
            style="position: absolute; opacity: 0; width: 36px; height: 36px; border: none; padding: 0; margin: 0; z-index: 9999;"
            node_ref=ctx.picker_input
            on:input=apply
            on:change=apply
            on:blur=move |_| ctx.blur_picker()
        />
    }
}
