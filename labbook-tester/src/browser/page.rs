use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use thirtyfour::prelude::*;

/// Script reading the widget's visible state out of the DOM.
pub const STATE_PROBE: &str = r"
const bar = document.getElementById('floating-book-bar');
const modal = document.getElementById('bookingModal');
const step = document.querySelector('.wizard-step.active');
const text = (id) => { const el = document.getElementById(id); return el ? el.textContent : null; };
return {
  barVisible: !!bar && bar.classList.contains('visible'),
  selectedCount: text('selected-count'),
  selectedTotal: text('selected-total'),
  modalDisplay: modal ? modal.style.display : null,
  activeStep: step ? step.id : null,
  invoiceId: text('invoice-id'),
  darkMode: document.body.classList.contains('dark-mode'),
};
";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSnapshot {
    pub bar_visible: bool,
    pub selected_count: Option<String>,
    pub selected_total: Option<String>,
    pub modal_display: Option<String>,
    pub active_step: Option<String>,
    pub invoice_id: Option<String>,
    pub dark_mode: bool,
}

impl WidgetSnapshot {
    pub fn modal_open(&self) -> bool {
        self.modal_display.as_deref() == Some("flex")
    }
}

/// DOM-level driver for the booking widget.
#[derive(Debug, Clone)]
pub struct PageProbe<'a> {
    driver: &'a WebDriver,
}

impl<'a> PageProbe<'a> {
    pub const fn new(driver: &'a WebDriver) -> Self {
        Self { driver }
    }

    pub async fn ensure_widget(&self) -> Result<()> {
        let result = self
            .driver
            .execute(
                "return !!document.getElementById('floating-book-bar') && !!document.getElementById('bookingModal')",
                vec![],
            )
            .await?;
        if !result.json().as_bool().unwrap_or(false) {
            bail!("booking widget not mounted. Is the page served with the wasm bundle?");
        }
        Ok(())
    }

    pub async fn snapshot(&self) -> Result<WidgetSnapshot> {
        let result = self.driver.execute(STATE_PROBE, vec![]).await?;
        serde_json::from_value(result.json().clone()).context("parsing widget snapshot")
    }

    pub async fn card_count(&self) -> Result<usize> {
        Ok(self.driver.find_all(By::Css(".service-card")).await?.len())
    }

    /// Click the `index`th service card.
    pub async fn toggle_card(&self, index: usize) -> Result<String> {
        let cards = self.driver.find_all(By::Css(".service-card")).await?;
        let card = cards
            .get(index)
            .with_context(|| format!("no service card at index {index} ({} cards)", cards.len()))?;
        let name = card
            .find(By::Css("h3"))
            .await?
            .prop("textContent")
            .await?
            .unwrap_or_default();
        card.scroll_into_view().await?;
        // Cards fade in on reveal; a script click does not wait for the transition.
        self.driver
            .execute("arguments[0].click();", vec![card.to_json()?])
            .await?;
        Ok(name)
    }

    pub async fn click_book(&self) -> Result<()> {
        self.driver
            .find(By::Css("#floating-book-bar button"))
            .await?
            .click()
            .await?;
        Ok(())
    }

    pub async fn close_modal(&self) -> Result<()> {
        self.driver
            .find(By::Css("#bookingModal .close-modal"))
            .await?
            .click()
            .await?;
        Ok(())
    }
}
