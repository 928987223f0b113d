use anyhow::{Context, Result};
use chrono::NaiveDate;
use labbook_core::{
    BookingController, BookingSurface, InputField, MemorySurface, PaymentMethod, ServiceCatalog,
    ServiceOffering, Submission, WidgetConfig, WizardError, WizardStep,
};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Names used when a scenario needs a patient.
const PATIENTS: [&str; 4] = ["Nimal Perera", "Amaya Silva", "Kasun Fernando", "Dilini Jayasuriya"];

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Catalog(#[from] labbook_core::CatalogError),
    #[error(transparent)]
    Config(#[from] labbook_core::ConfigError),
}

/// Catalog and widget config the web crate ships, read from its static data.
#[derive(Debug, Clone)]
pub struct TesterAssets {
    pub config: WidgetConfig,
    pub catalog: ServiceCatalog,
}

impl TesterAssets {
    pub fn load_default() -> Self {
        let config = Self::load_config_from_assets().unwrap_or_else(|err| {
            eprintln!("⚠️ Falling back to default widget config: {err}");
            WidgetConfig::default()
        });
        let catalog = Self::load_catalog_from_assets().unwrap_or_else(|err| {
            eprintln!("⚠️ Falling back to built-in catalog: {err}");
            Self::fallback_catalog()
        });
        Self { config, catalog }
    }

    fn assets_data_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("labbook-web")
            .join("static")
            .join("assets")
            .join("data")
    }

    fn read_asset(name: &str) -> Result<String, AssetError> {
        let path = Self::assets_data_root().join(name);
        fs::read_to_string(&path).map_err(|source| AssetError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    fn load_config_from_assets() -> Result<WidgetConfig, AssetError> {
        Ok(WidgetConfig::from_json(&Self::read_asset("widget.json")?)?)
    }

    fn load_catalog_from_assets() -> Result<ServiceCatalog, AssetError> {
        let catalog = ServiceCatalog::from_json(&Self::read_asset("services.json")?)?;
        if catalog.services.is_empty() {
            return Ok(Self::fallback_catalog());
        }
        Ok(catalog)
    }

    fn fallback_catalog() -> ServiceCatalog {
        let offering = |name: &str, price: i64| ServiceOffering {
            name: name.to_string(),
            price: labbook_core::Money::from_major(price),
            blurb: String::new(),
            category: String::new(),
        };
        ServiceCatalog {
            services: vec![
                offering("CBC", 1500),
                offering("Lipid Profile", 2500),
                offering("X-Ray", 3000),
            ],
        }
    }
}

/// One seeded booking session: a controller on an in-memory surface plus the
/// RNG every random choice in the session draws from.
pub struct BookingRun {
    pub seed: u64,
    pub controller: BookingController<MemorySurface>,
    pub rng: ChaCha20Rng,
    assets: Arc<TesterAssets>,
}

impl BookingRun {
    pub fn new(assets: Arc<TesterAssets>, seed: u64) -> Self {
        let controller = BookingController::new(assets.config.clone(), MemorySurface::with_form());
        Self {
            seed,
            controller,
            rng: ChaCha20Rng::seed_from_u64(seed),
            assets,
        }
    }

    /// Fresh controller and page, same seed stream.
    pub fn reset(&mut self) {
        self.controller =
            BookingController::new(self.assets.config.clone(), MemorySurface::with_form());
    }

    pub fn catalog(&self) -> &[ServiceOffering] {
        &self.assets.catalog.services
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.assets.config
    }

    pub fn surface(&self) -> &MemorySurface {
        self.controller.surface()
    }

    /// Up to `count` distinct catalog services in random order.
    pub fn pick_services(&mut self, count: usize) -> Vec<ServiceOffering> {
        let mut services = self.assets.catalog.services.clone();
        services.shuffle(&mut self.rng);
        services.truncate(count);
        services
    }

    pub fn select(&mut self, services: &[ServiceOffering]) {
        for service in services {
            self.controller.toggle_service(&service.name, service.price);
        }
    }

    pub fn open(&mut self) -> Result<(), WizardError> {
        self.controller.open_booking(today())
    }

    pub fn fill_patient(&mut self) -> String {
        let name = PATIENTS.choose(&mut self.rng).copied().unwrap_or(PATIENTS[0]);
        self.controller
            .surface_mut()
            .set_input(InputField::PatientName, name);
        name.to_string()
    }

    /// Walk the wizard from a closed modal to the receipt.
    pub fn checkout(&mut self, method: &PaymentMethod) -> Result<Submission> {
        self.open().context("opening the booking wizard")?;
        self.controller
            .advance(WizardStep::Date)
            .context("advancing to the date step")?;
        self.fill_patient();
        self.controller
            .advance(WizardStep::Payment)
            .context("advancing to the payment step")?;
        self.controller.select_payment(method);
        self.controller
            .generate_invoice(&mut self.rng)
            .context("generating the invoice")
    }
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Builds seeded [`BookingRun`]s over a shared set of assets.
#[derive(Debug, Clone)]
pub struct BookingHarness {
    verbose: bool,
    assets: Arc<TesterAssets>,
}

impl BookingHarness {
    pub const fn new(assets: Arc<TesterAssets>, verbose: bool) -> Self {
        Self { verbose, assets }
    }

    pub const fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn assets(&self) -> &TesterAssets {
        &self.assets
    }

    pub fn start(&self, seed: u64) -> BookingRun {
        BookingRun::new(Arc::clone(&self.assets), seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn harness() -> BookingHarness {
        BookingHarness::new(Arc::new(TesterAssets::load_default()), false)
    }

    #[test]
    fn shipped_assets_load() {
        let assets = TesterAssets::load_default();
        assert!(assets.catalog.services.len() >= 3);
        assert_eq!(assets.config.currency, "LKR");
    }

    #[test]
    fn same_seed_picks_same_services() {
        let harness = harness();
        let first: Vec<String> = harness
            .start(9)
            .pick_services(3)
            .into_iter()
            .map(|s| s.name)
            .collect();
        let second: Vec<String> = harness
            .start(9)
            .pick_services(3)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn checkout_reaches_the_receipt() {
        let mut run = harness().start(3);
        let services = run.pick_services(2);
        run.select(&services);
        let submission = run.checkout(&PaymentMethod::Cash).expect("checkout");
        assert_eq!(run.controller.step(), WizardStep::Receipt);
        assert!(submission.record.id.starts_with("#INV-"));
        assert_eq!(run.controller.submission().ticket(), Some(submission.ticket));
    }

    #[test]
    fn checkout_without_selection_fails() {
        let mut run = harness().start(3);
        let err = run.checkout(&PaymentMethod::Card).unwrap_err();
        assert!(format!("{err:#}").contains("no services selected"));
    }
}
