//! Leptos frontend: one page per controller, bound to the DOM through signals.

pub mod admin;
pub mod app;
pub mod cart;
pub mod catalog;
pub mod shell;

use wasm_bindgen::prelude::*;

/// WASM entry point, run when the module loads.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    storefront_observability::init_browser();

    leptos::mount_to_body(app::App);
}
