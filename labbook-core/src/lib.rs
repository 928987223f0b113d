//! Labbook booking engine
//!
//! Platform-agnostic core of the clinical lab booking widget: service
//! selection, the four-step wizard, invoice computation and the page chrome
//! rules. Browser specifics sit behind the traits defined here and in
//! [`surface`].

pub mod booking;
pub mod catalog;
pub mod chrome;
pub mod config;
pub mod controller;
pub mod format;
pub mod invoice;
pub mod money;
pub mod payment;
pub mod selection;
pub mod surface;
pub mod theme;
pub mod wizard;

// Re-export commonly used types
pub use booking::{
    BookingAck, BookingForm, BookingRecord, NETWORK_ERROR_NOTICE, Submission, SubmissionFailure,
    SubmissionStatus, SubmissionTicket, SubmitError, server_error_notice,
};
pub use catalog::{CatalogError, ServiceCatalog, ServiceOffering};
pub use chrome::{AnchorAction, Reveal, navbar_scrolled, resolve_anchor};
pub use config::{ConfigError, WidgetConfig};
pub use controller::BookingController;
pub use format::{format_amount, format_currency, selection_label, truncate_display};
pub use invoice::{Invoice, InvoiceError, Totals, generate_invoice_id, generate_verification_code};
pub use money::Money;
pub use payment::{PaymentMethod, PaymentStamp, StampTone};
pub use selection::{SelectionEntry, SelectionStore, Toggle};
pub use surface::{BookingSurface, InputField, MemorySurface, Region, SummaryLine, TextField};
pub use theme::{Theme, load_theme, toggle_theme};
pub use wizard::{Wizard, WizardError, WizardStep};

/// Trait for abstracting catalog and config loading.
/// Platform-specific implementations should provide this.
pub trait CatalogLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the service catalog from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or is invalid.
    fn load_catalog(&self) -> Result<ServiceCatalog, Self::Error>;

    /// Load the widget configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or is invalid.
    fn load_config(&self) -> Result<WidgetConfig, Self::Error>;
}

/// Trait for the small key/value store holding visitor preferences.
pub trait PreferenceStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read a stored preference
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_pref(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store a preference
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    fn set_pref(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// Everything the page needs at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteData {
    pub config: WidgetConfig,
    pub catalog: ServiceCatalog,
}

/// Site engine wiring a loader and preference storage together.
pub struct LabSite<L, P>
where
    L: CatalogLoader,
    P: PreferenceStorage,
{
    loader: L,
    prefs: P,
}

impl<L, P> LabSite<L, P>
where
    L: CatalogLoader,
    P: PreferenceStorage,
{
    /// Create a new site engine with the provided loader and preference storage
    pub const fn new(loader: L, prefs: P) -> Self {
        Self { loader, prefs }
    }

    /// Load config and catalog together.
    ///
    /// # Errors
    ///
    /// Returns an error if either document cannot be loaded.
    pub fn load(&self) -> Result<SiteData, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
    {
        let config = self.loader.load_config().map_err(Into::into)?;
        let catalog = self.loader.load_catalog().map_err(Into::into)?;
        log::debug!("loaded {} services", catalog.len());
        Ok(SiteData { config, catalog })
    }

    /// Build a controller over `surface`.
    pub fn controller<S: BookingSurface>(
        &self,
        config: WidgetConfig,
        surface: S,
    ) -> BookingController<S> {
        BookingController::new(config, surface)
    }

    /// Saved theme, light when unset or unreadable.
    pub fn theme(&self, config: &WidgetConfig) -> Theme {
        load_theme(&self.prefs, &config.theme_key)
    }

    /// Flip and persist the theme.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the preference cannot be written.
    pub fn toggle_theme(&self, config: &WidgetConfig, current: Theme) -> Result<Theme, P::Error> {
        toggle_theme(&self.prefs, &config.theme_key, current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::convert::Infallible;
    use std::rc::Rc;

    #[derive(Clone, Copy, Default)]
    struct FixtureLoader;

    impl CatalogLoader for FixtureLoader {
        type Error = CatalogError;

        fn load_catalog(&self) -> Result<ServiceCatalog, Self::Error> {
            ServiceCatalog::from_json(r#"{"services":[{"name":"CBC","price":1500}]}"#)
        }

        fn load_config(&self) -> Result<WidgetConfig, Self::Error> {
            Ok(WidgetConfig::default())
        }
    }

    #[derive(Clone, Default)]
    struct MemoryPrefs {
        values: Rc<RefCell<HashMap<String, String>>>,
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
    fn site_loads_and_builds_controller() {
        let site = LabSite::new(FixtureLoader, MemoryPrefs::default());
        let data = site.load().unwrap();
        assert_eq!(data.catalog.len(), 1);
        let mut controller = site.controller(data.config, MemorySurface::with_form());
        let cbc = data.catalog.find("CBC").unwrap();
        controller.toggle_service(&cbc.name, cbc.price);
        assert_eq!(controller.selection().total(), Money::from_major(1500));
    }

    #[test]
    fn site_theme_roundtrips_through_storage() {
        let prefs = MemoryPrefs::default();
        let site = LabSite::new(FixtureLoader, prefs.clone());
        let config = WidgetConfig::default();
        assert_eq!(site.theme(&config), Theme::Light);
        let next = site.toggle_theme(&config, Theme::Light).unwrap();
        assert_eq!(next, Theme::Dark);
        assert_eq!(prefs.values.borrow().get("theme").map(String::as_str), Some("dark"));
        assert_eq!(site.theme(&config), Theme::Dark);
    }
}
