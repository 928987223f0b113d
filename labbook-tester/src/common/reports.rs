use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

/// Outcome of one browser scenario against one browser and seed.
#[derive(Debug, Clone, Serialize)]
pub struct BrowserOutcome {
    pub browser: String,
    pub scenario_name: String,
    pub seed: u64,
    pub passed: bool,
    pub duration_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<String>,
}

impl BrowserOutcome {
    pub fn passed(browser: &str, scenario: &str, seed: u64, duration: Duration) -> Self {
        Self {
            browser: browser.to_string(),
            scenario_name: scenario.to_string(),
            seed,
            passed: true,
            duration_ms: duration.as_millis(),
            error: None,
            artifacts: None,
        }
    }

    pub fn failed(
        browser: &str,
        scenario: &str,
        seed: u64,
        duration: Duration,
        err: &anyhow::Error,
        artifacts: Option<String>,
    ) -> Self {
        Self {
            passed: false,
            error: Some(format!("{err:#}")),
            artifacts,
            ..Self::passed(browser, scenario, seed, duration)
        }
    }
}

pub fn generate_browser_console_report<W: Write + ?Sized>(
    out: &mut W,
    outcomes: &[BrowserOutcome],
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "🌐 Browser Results".bright_blue().bold())?;
    writeln!(out, "{}", "==================".blue())?;
    for outcome in outcomes {
        let status = if outcome.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(
            out,
            "{status} [{} seed {}] {} - {}ms",
            outcome.browser, outcome.seed, outcome.scenario_name, outcome.duration_ms
        )?;
        if let Some(error) = &outcome.error {
            writeln!(out, "   {}", error.red())?;
        }
        if let Some(dir) = &outcome.artifacts {
            writeln!(out, "   Artifacts: {dir}")?;
        }
    }
    Ok(())
}

pub fn generate_browser_markdown_report<W: Write + ?Sized>(
    out: &mut W,
    outcomes: &[BrowserOutcome],
) -> Result<()> {
    writeln!(out, "\n## Browser Runs\n")?;
    writeln!(out, "| Browser | Scenario | Seed | Status | Time |")?;
    writeln!(out, "|---|---|---|---|---|")?;
    for outcome in outcomes {
        let status = if outcome.passed { "✅" } else { "❌" };
        writeln!(
            out,
            "| {} | {} | {} | {status} | {}ms |",
            outcome.browser, outcome.scenario_name, outcome.seed, outcome.duration_ms
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_outcome_keeps_error_chain() {
        let err = anyhow::anyhow!("bar hidden").context("smoke");
        let outcome = BrowserOutcome::failed(
            "chrome",
            "smoke",
            3,
            Duration::from_millis(40),
            &err,
            Some("target/a".to_string()),
        );
        assert!(!outcome.passed);
        assert_eq!(outcome.error.as_deref(), Some("smoke: bar hidden"));
        assert_eq!(outcome.duration_ms, 40);
    }

    #[test]
    fn passing_outcome_omits_error_in_json() {
        let outcome = BrowserOutcome::passed("firefox", "smoke", 1, Duration::ZERO);
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(!json.contains("error"));
        assert!(json.contains("\"browser\":\"firefox\""));
    }

    #[test]
    fn markdown_rows_per_outcome() {
        let outcomes = [
            BrowserOutcome::passed("chrome", "smoke", 1, Duration::from_millis(5)),
            BrowserOutcome::passed("edge", "smoke", 1, Duration::from_millis(6)),
        ];
        let mut buf = Vec::new();
        generate_browser_markdown_report(&mut buf, &outcomes).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("| chrome | smoke | 1 | ✅ | 5ms |"));
        assert!(text.contains("| edge |"));
    }
}
