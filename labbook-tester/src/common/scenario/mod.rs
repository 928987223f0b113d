use anyhow::Result;
use thirtyfour::prelude::*;

use crate::browser::PageProbe;
use crate::logic::BookingRun;

pub mod catalog;
pub mod smoke;

use catalog::{catalog_scenarios, find_catalog_scenario};

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub base_url: String,
    pub seed: u64,
    pub page: PageProbe<'a>,
    pub verbose: bool,
}

/// Check run against one seeded booking session.
pub type BookingCheck = fn(&mut BookingRun) -> Result<()>;

// Logic test scenario
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    pub check: BookingCheck,
}

impl TestScenario {
    pub fn new(name: impl Into<String>, check: BookingCheck) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

// Browser test scenario
#[async_trait::async_trait]
pub trait BrowserScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()>;
}

// Combined scenario that can run both logic and browser tests
pub trait CombinedScenario: BrowserScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario>;
}

/// Scenario with logic coverage only.
#[derive(Clone)]
pub struct LogicScenario {
    key: &'static str,
    name: &'static str,
    description: &'static str,
    check: BookingCheck,
}

impl LogicScenario {
    pub const fn new(
        key: &'static str,
        name: &'static str,
        description: &'static str,
        check: BookingCheck,
    ) -> Self {
        Self {
            key,
            name,
            description,
            check,
        }
    }

    pub const fn key(&self) -> &'static str {
        self.key
    }

    pub const fn description(&self) -> &'static str {
        self.description
    }
}

#[async_trait::async_trait]
impl BrowserScenario for LogicScenario {
    async fn run_browser(&self, _driver: &WebDriver, _ctx: &ScenarioCtx<'_>) -> Result<()> {
        anyhow::bail!("{} has no browser implementation", self.name)
    }
}

impl CombinedScenario for LogicScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new(self.name, self.check))
    }
}

pub fn get_scenario(name: &str) -> Option<Box<dyn CombinedScenario + Send + Sync>> {
    let key = name.to_lowercase();
    if key == "smoke" {
        return Some(Box::new(smoke::SmokeScenario));
    }
    find_catalog_scenario(&key).map(|scenario| Box::new(scenario) as _)
}

/// Whether `name` has a browser implementation.
pub fn has_browser_run(name: &str) -> bool {
    name.eq_ignore_ascii_case("smoke")
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    let mut scenarios = vec![("smoke", "Select a card and open the wizard (logic + browser)")];
    scenarios.extend(
        catalog_scenarios()
            .iter()
            .map(|scenario| (scenario.key(), scenario.description())),
    );
    scenarios
}

/// Every scenario key, in listing order.
pub fn all_scenario_keys() -> Vec<String> {
    list_scenarios()
        .into_iter()
        .map(|(key, _)| key.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_scenario_resolves_with_logic() {
        for (key, _) in list_scenarios() {
            let scenario = get_scenario(key).unwrap_or_else(|| panic!("missing {key}"));
            assert!(scenario.as_logic_scenario().is_some(), "{key}");
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(get_scenario("Cash-Booking").is_some());
        assert!(get_scenario("SMOKE").is_some());
        assert!(get_scenario("nope").is_none());
    }

    #[test]
    fn only_smoke_drives_a_browser() {
        assert!(has_browser_run("smoke"));
        assert!(!has_browser_run("cash-booking"));
    }
}
