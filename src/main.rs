//! Boards Frontend Entry Point

mod app;
mod collate;
mod color;
mod components;
mod config;
mod context;
mod dispatch;
mod dom;
mod logger;
mod models;
mod picker;
mod render;
mod storage;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = logger::init(logger::default_level()) {
        web_sys::console::warn_1(&format!("logger already set: {}", e).into());
    }
    mount_to_body(App);
}
