use anyhow::{Context, Result, ensure};
use labbook_core::{Region, TextField, WizardStep, selection_label};
use std::time::Duration;
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, TestScenario};
use crate::logic::BookingRun;

/// Pick one service and open the booking wizard.
pub struct SmokeScenario;

fn smoke_check(run: &mut BookingRun) -> Result<()> {
    let services = run.pick_services(1);
    let service = services.first().context("catalog is empty")?;
    run.controller.toggle_service(&service.name, service.price);

    let surface = run.surface();
    ensure!(surface.is_visible(Region::FloatingBar), "floating bar hidden");
    ensure!(
        surface.text(TextField::SelectedCount) == Some(selection_label(1).as_str()),
        "count shows {:?}",
        surface.text(TextField::SelectedCount)
    );

    run.open()?;
    ensure!(
        run.surface().active_step() == Some(WizardStep::Summary),
        "wizard opened on {:?}",
        run.surface().active_step()
    );
    ensure!(run.surface().is_visible(Region::Modal), "modal hidden");
    Ok(())
}

#[async_trait::async_trait]
impl BrowserScenario for SmokeScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        driver.goto(&ctx.base_url).await?;
        driver
            .find(By::Css(".service-card"))
            .await
            .context("service grid never rendered")?;
        ctx.page.ensure_widget().await?;

        let before = ctx.page.snapshot().await?;
        ensure!(!before.bar_visible, "floating bar visible before any selection");

        let cards = ctx.page.card_count().await?;
        ensure!(cards > 0, "no service cards on the page");
        let index = usize::try_from(ctx.seed % u64::try_from(cards)?)?;
        let name = ctx.page.toggle_card(index).await?;
        if ctx.verbose {
            println!("  🖱️  Selected card {index}: {name}");
        }
        tokio::time::sleep(Duration::from_millis(400)).await;

        let selected = ctx.page.snapshot().await?;
        ensure!(selected.bar_visible, "floating bar hidden after selecting {name}");
        ensure!(
            selected.selected_count.as_deref() == Some(selection_label(1).as_str()),
            "count shows {:?}",
            selected.selected_count
        );

        ctx.page.click_book().await?;
        tokio::time::sleep(Duration::from_millis(400)).await;
        let opened = ctx.page.snapshot().await?;
        ensure!(opened.modal_open(), "modal display is {:?}", opened.modal_display);
        ensure!(
            opened.active_step.as_deref() == Some(WizardStep::Summary.element_id()),
            "wizard opened on {:?}",
            opened.active_step
        );
        if ctx.verbose {
            println!("  🧾 Wizard open on {}", WizardStep::Summary.element_id());
        }

        ctx.page.close_modal().await?;
        Ok(())
    }
}

impl CombinedScenario for SmokeScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new("Smoke", smoke_check))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{BookingHarness, TesterAssets};
    use std::sync::Arc;

    #[test]
    fn smoke_logic_passes() {
        let harness = BookingHarness::new(Arc::new(TesterAssets::load_default()), false);
        let scenario = SmokeScenario.as_logic_scenario().unwrap();
        for seed in 0..5 {
            (scenario.check)(&mut harness.start(seed)).unwrap();
        }
    }
}
