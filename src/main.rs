//! MIXION Kiosk Frontend Entry Point

mod api;
mod app;
mod components;
mod context;
mod models;
mod pages;
mod session;
mod store;
mod undo;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);
    mount_to_body(App);
}
