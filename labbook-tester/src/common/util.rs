use anyhow::{Context, Result};
use chrono::Utc;
use std::{fs, path::Path};
use thirtyfour::prelude::*;

use crate::browser::page::STATE_PROBE;

pub fn artifacts_dir(base: &str, browser: &str, scenario: &str, seed: u64) -> String {
    let ts = Utc::now().format("%Y%m%dT%H%M%S");
    format!("{base}/{browser}/{scenario}/seed-{seed}/{ts}")
}

/// What a failed browser run leaves behind.
#[derive(Debug, Default)]
struct Artifacts {
    screenshot: Option<Vec<u8>>,
    dom: Option<String>,
    widget_state: Option<serde_json::Value>,
    error_chain: String,
}

impl Artifacts {
    fn write_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        let files: [(&str, Option<Vec<u8>>); 3] = [
            ("screenshot.png", self.screenshot.clone()),
            ("dom.html", self.dom.as_ref().map(|html| html.clone().into_bytes())),
            (
                "widget-state.json",
                self.widget_state
                    .as_ref()
                    .and_then(|state| serde_json::to_vec_pretty(state).ok()),
            ),
        ];
        for (name, bytes) in files {
            if let Some(bytes) = bytes
                && let Err(err) = fs::write(dir.join(name), bytes)
            {
                log::warn!("skipping artifact {name}: {err}");
            }
        }
        fs::write(dir.join("error.txt"), &self.error_chain).context("writing error chain")?;
        Ok(())
    }
}

pub async fn capture_artifacts(driver: &WebDriver, dir: &str, err: &anyhow::Error) -> Result<()> {
    let artifacts = Artifacts {
        screenshot: driver.screenshot_as_png().await.ok(),
        dom: driver.source().await.ok(),
        widget_state: driver
            .execute(STATE_PROBE, vec![])
            .await
            .ok()
            .map(|ret| ret.json().clone()),
        error_chain: format!("{err:#}"),
    };
    artifacts.write_to(Path::new(dir))
}

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}
