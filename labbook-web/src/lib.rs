#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod api;
pub mod app;
pub mod components;
pub mod dom;
pub mod platform;
pub mod theme;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Info);
    // Apply the saved theme before the first paint
    crate::theme::apply_theme(crate::theme::saved_theme());
    yew::Renderer::<app::App>::new().render();
}
