//! Widget configuration with defaults matching the production page.
use crate::money::BASIS_POINTS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Relative URL the booking record is posted to.
    pub endpoint: String,
    /// Currency label printed before every amount.
    pub currency: String,
    /// Tax rate in basis points (500 = 5%).
    pub tax_rate_bps: u32,
    /// On-screen service summary length before it is cut with an ellipsis.
    pub summary_max_chars: usize,
    /// Browser storage key holding the theme preference.
    pub theme_key: String,
    /// Scroll offset in pixels past which the navbar is restyled.
    pub navbar_scroll_threshold: u32,
    /// Delay between consecutive service card reveals.
    pub reveal_stagger_ms: u32,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: "api/book_test.php".to_string(),
            currency: "LKR".to_string(),
            tax_rate_bps: 500,
            summary_max_chars: 30,
            theme_key: "theme".to_string(),
            navbar_scroll_threshold: 50,
            reveal_stagger_ms: 100,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("tax rate {0} bps exceeds 100%")]
    TaxRate(u32),
    #[error("summary length must be at least one character")]
    SummaryLength,
    #[error("booking endpoint must not be empty")]
    Endpoint,
}

impl WidgetConfig {
    /// Parse and validate a config document. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns the first out-of-range field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if i64::from(self.tax_rate_bps) > BASIS_POINTS {
            return Err(ConfigError::TaxRate(self.tax_rate_bps));
        }
        if self.summary_max_chars == 0 {
            return Err(ConfigError::SummaryLength);
        }
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Endpoint);
        }
        Ok(())
    }
}
