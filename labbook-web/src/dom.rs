use chrono::NaiveDate;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, Storage, Window};

/// Retrieve the global `window` object.
///
/// # Panics
/// Panics if executed outside of a browser context where `window` is unavailable.
#[must_use]
pub fn window() -> Window {
    web_sys::window().expect("`window` should be available in web context")
}

/// Retrieve the document object for DOM interactions.
///
/// # Panics
/// Panics when the document cannot be accessed from the current browser window.
#[must_use]
pub fn document() -> Document {
    window()
        .document()
        .expect("`document` should exist in browser context")
}

/// The page `<body>`, if it has been parsed.
#[must_use]
pub fn body() -> Option<HtmlElement> {
    document().body()
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Access the browser `localStorage` handle.
///
/// # Errors
/// Returns an error if the browser window cannot be accessed or `localStorage` is unavailable.
pub fn local_storage() -> Result<Storage, JsValue> {
    window()
        .local_storage()?
        .ok_or_else(|| JsValue::from_str("localStorage unavailable"))
}

/// Blocking browser alert.
pub fn alert(message: &str) {
    if let Err(err) = window().alert_with_message(message) {
        log::error!("alert failed: {}", js_error_message(&err));
    }
}

/// Vertical scroll offset of the page, 0 when unavailable.
#[must_use]
pub fn scroll_y() -> f64 {
    window().scroll_y().unwrap_or(0.0)
}

#[must_use]
pub fn element_exists(id: &str) -> bool {
    document().get_element_by_id(id).is_some()
}

/// Smooth scroll the element with `id` into view.
pub fn smooth_scroll_to(id: &str) {
    if let Some(target) = document().get_element_by_id(id) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        target.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

#[must_use]
pub fn pathname() -> String {
    window().location().pathname().unwrap_or_default()
}

/// Leave the page for `href`.
pub fn navigate(href: &str) {
    if let Err(err) = window().location().set_href(href) {
        log::error!("navigation to {href} failed: {}", js_error_message(&err));
    }
}

/// Today's date as a date input would report it for `valueAsDate = new Date()`.
#[must_use]
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        i32::try_from(now.get_utc_full_year()).unwrap_or(1970),
        now.get_utc_month() + 1,
        now.get_utc_date(),
    )
    .unwrap_or_default()
}

/// Seed material for per-call pseudo-random generators.
#[must_use]
pub fn entropy_seed() -> u64 {
    js_sys::Date::now().to_bits() ^ js_sys::Math::random().to_bits().rotate_left(32)
}
