// Theme helpers

use crate::platform::{WebPreferenceStorage, site_data};
use labbook_core::Theme;
use labbook_core::theme::{DARK_CLASS, load_theme, toggle_theme};

/// Add or remove the dark class on `<body>`.
pub fn apply_theme(theme: Theme) {
    let Some(body) = crate::dom::body() else {
        return;
    };
    let classes = body.class_list();
    let result = if theme.is_dark() {
        classes.add_1(DARK_CLASS)
    } else {
        classes.remove_1(DARK_CLASS)
    };
    if let Err(err) = result {
        log::warn!("theme class not applied: {}", crate::dom::js_error_message(&err));
    }
}

/// Theme saved in `localStorage`; light unless `"dark"` is stored.
#[must_use]
pub fn saved_theme() -> Theme {
    load_theme(&WebPreferenceStorage, &site_data().config.theme_key)
}

/// Theme currently shown, read back from the body class.
#[must_use]
pub fn current_theme() -> Theme {
    let dark = crate::dom::body().is_some_and(|body| body.class_list().contains(DARK_CLASS));
    if dark { Theme::Dark } else { Theme::Light }
}

/// Flip the page theme and persist it. The page is restyled even if the
/// preference cannot be saved.
pub fn toggle() -> Theme {
    let current = current_theme();
    let next = match toggle_theme(&WebPreferenceStorage, &site_data().config.theme_key, current) {
        Ok(next) => next,
        Err(err) => {
            log::warn!("theme preference not saved: {err}");
            current.toggled()
        }
    };
    apply_theme(next);
    next
}
