//! Light/dark theme preference.
use crate::PreferenceStorage;
use serde::{Deserialize, Serialize};

/// Class put on `<body>` while the dark theme is active.
pub const DARK_CLASS: &str = "dark-mode";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Only an explicit `"dark"` selects the dark theme.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Read the saved theme; storage failures fall back to light.
pub fn load_theme<P: PreferenceStorage>(storage: &P, key: &str) -> Theme {
    match storage.get_pref(key) {
        Ok(value) => Theme::from_stored(value.as_deref()),
        Err(err) => {
            log::warn!("theme preference unreadable: {err}");
            Theme::Light
        }
    }
}

/// Flip `current` and persist the result.
///
/// # Errors
///
/// Returns the storage error if the new value cannot be written.
pub fn toggle_theme<P: PreferenceStorage>(
    storage: &P,
    key: &str,
    current: Theme,
) -> Result<Theme, P::Error> {
    let next = current.toggled();
    storage.set_pref(key, next.as_str())?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::convert::Infallible;

    #[derive(Default)]
    struct MemoryPrefs {
        values: RefCell<HashMap<String, String>>,
    }

    impl PreferenceStorage for MemoryPrefs {
        type Error = Infallible;

        fn get_pref(&self, key: &str) -> Result<Option<String>, Self::Error> {
            Ok(self.values.borrow().get(key).cloned())
        }

        fn set_pref(&self, key: &str, value: &str) -> Result<(), Self::Error> {
            self.values
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[test]
    fn only_dark_selects_dark() {
        assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("light")), Theme::Light);
        assert_eq!(Theme::from_stored(Some("DARK")), Theme::Light);
        assert_eq!(Theme::from_stored(None), Theme::Light);
    }

    #[test]
    fn toggle_persists_flipped_value() {
        let prefs = MemoryPrefs::default();
        assert_eq!(load_theme(&prefs, "theme"), Theme::Light);
        let next = toggle_theme(&prefs, "theme", Theme::Light).unwrap();
        assert_eq!(next, Theme::Dark);
        assert_eq!(load_theme(&prefs, "theme"), Theme::Dark);
        let back = toggle_theme(&prefs, "theme", next).unwrap();
        assert_eq!(prefs.get_pref("theme").unwrap().as_deref(), Some("light"));
        assert_eq!(back, Theme::Light);
    }
}
