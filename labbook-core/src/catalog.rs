//! Service catalog shown as the grid of selectable cards.
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// A single bookable lab service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub name: String,
    /// Price in whole currency units in JSON.
    pub price: Money,
    #[serde(default)]
    pub blurb: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCatalog {
    pub services: Vec<ServiceOffering>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate service name: {0}")]
    DuplicateName(String),
    #[error("service {0} has a negative price")]
    NegativePrice(String),
    #[error("service name must not be empty")]
    EmptyName,
}

impl ServiceCatalog {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse and validate a catalog document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, a name repeats or is blank,
    /// or a price is negative.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Names are the selection key, so they must be unique.
    ///
    /// # Errors
    ///
    /// Returns the first offending service.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for service in &self.services {
            if service.name.trim().is_empty() {
                return Err(CatalogError::EmptyName);
            }
            if service.price.is_negative() {
                return Err(CatalogError::NegativePrice(service.name.clone()));
            }
            if !seen.insert(service.name.as_str()) {
                return Err(CatalogError::DuplicateName(service.name.clone()));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&ServiceOffering> {
        self.services.iter().find(|service| service.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "services": [
            { "name": "CBC", "price": 1500, "blurb": "Full blood count", "category": "Blood" },
            { "name": "X-Ray", "price": 3000 }
        ]
    }"#;

    #[test]
    fn parses_with_optional_fields() {
        let catalog = ServiceCatalog::from_json(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 2);
        let xray = catalog.find("X-Ray").unwrap();
        assert_eq!(xray.price, Money::from_major(3000));
        assert!(xray.blurb.is_empty());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let json = r#"{"services":[{"name":"CBC","price":1},{"name":"CBC","price":2}]}"#;
        assert!(matches!(
            ServiceCatalog::from_json(json),
            Err(CatalogError::DuplicateName(name)) if name == "CBC"
        ));
    }

    #[test]
    fn negative_and_blank_entries_are_rejected() {
        let negative = r#"{"services":[{"name":"CBC","price":-1}]}"#;
        assert!(matches!(
            ServiceCatalog::from_json(negative),
            Err(CatalogError::NegativePrice(_))
        ));
        let blank = r#"{"services":[{"name":" ","price":1}]}"#;
        assert!(matches!(ServiceCatalog::from_json(blank), Err(CatalogError::EmptyName)));
    }
}
