//! Web implementations of the labbook-core platform traits.
//!
//! Catalog and widget config ship inside the wasm bundle; preferences live in
//! `localStorage`.

use labbook_core::{
    CatalogError, CatalogLoader, ConfigError, LabSite, PreferenceStorage, ServiceCatalog, SiteData,
    WidgetConfig,
};
use once_cell::sync::Lazy;

pub use labbook_core::*;

const SERVICES_JSON: &str = include_str!("../static/assets/data/services.json");
const WIDGET_JSON: &str = include_str!("../static/assets/data/widget.json");

/// Loader reading the embedded static assets.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebCatalogLoader;

#[derive(Debug, thiserror::Error)]
pub enum WebDataError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl CatalogLoader for WebCatalogLoader {
    type Error = WebDataError;

    fn load_catalog(&self) -> Result<ServiceCatalog, Self::Error> {
        Ok(ServiceCatalog::from_json(SERVICES_JSON)?)
    }

    fn load_config(&self) -> Result<WidgetConfig, Self::Error> {
        Ok(WidgetConfig::from_json(WIDGET_JSON)?)
    }
}

/// Preference storage backed by `localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebPreferenceStorage;

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PreferenceStorage for WebPreferenceStorage {
    type Error = WebStorageError;

    fn get_pref(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let storage = crate::dom::local_storage()
            .map_err(|e| WebStorageError::Storage(crate::dom::js_error_message(&e)))?;
        storage
            .get_item(key)
            .map_err(|e| WebStorageError::Storage(crate::dom::js_error_message(&e)))
    }

    fn set_pref(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let storage = crate::dom::local_storage()
            .map_err(|e| WebStorageError::Storage(crate::dom::js_error_message(&e)))?;
        storage
            .set_item(key, value)
            .map_err(|e| WebStorageError::Storage(crate::dom::js_error_message(&e)))
    }
}

pub type WebLabSite = LabSite<WebCatalogLoader, WebPreferenceStorage>;

/// Create a site engine with [`WebCatalogLoader`] and [`WebPreferenceStorage`].
#[must_use]
pub const fn create_web_site() -> WebLabSite {
    LabSite::new(WebCatalogLoader, WebPreferenceStorage)
}

static SITE_DATA: Lazy<SiteData> = Lazy::new(|| {
    create_web_site().load().unwrap_or_else(|err| {
        log::error!("embedded site data rejected, using defaults: {err:#}");
        SiteData {
            config: WidgetConfig::default(),
            catalog: ServiceCatalog::empty(),
        }
    })
});

/// Parsed config and catalog, loaded once.
#[must_use]
pub fn site_data() -> &'static SiteData {
    &SITE_DATA
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_assets_load() {
        let data = create_web_site().load().unwrap();
        assert_eq!(data.config, WidgetConfig::default());
        assert!(data.catalog.find("X-Ray").is_some());
        assert_eq!(site_data().catalog.len(), data.catalog.len());
    }
}
