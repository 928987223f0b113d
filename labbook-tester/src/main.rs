mod browser;
mod common;
mod logic;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use browser::{BrowserConfig, BrowserKind, PageProbe, new_session};
use common::reports::{
    BrowserOutcome, generate_browser_console_report, generate_browser_markdown_report,
};
use common::scenario::{
    ScenarioCtx, all_scenario_keys, get_scenario, has_browser_run, list_scenarios,
};
use common::{artifacts_dir, capture_artifacts, split_csv};
use logic::{BookingHarness, LogicTester, TesterAssets, resolve_seeds};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TestMode {
    /// Drive the booking controller directly (fast, no browser)
    Logic,
    /// Drive the served widget through WebDriver
    Browser,
    /// Run both logic and browser tests
    Both,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HeadlessMode {
    /// Run browsers in headless mode
    Headless,
    /// Run browsers with visible windows
    Windowed,
}

impl HeadlessMode {
    const fn is_headless(self) -> bool {
        matches!(self, Self::Headless)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "labbook-tester", version)]
#[command(about = "Automated QA for the Labbook booking widget - booking logic and browser automation")]
struct Args {
    /// Test mode: logic (fast), browser (visual), or both
    #[arg(long, value_enum, default_value_t = TestMode::Logic)]
    mode: TestMode,

    /// Scenarios to run (comma-separated, `all` for every scenario)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated, decimal or 0x hex)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Iterations per scenario and seed (logic mode only)
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    // Browser-specific options
    /// Browsers to run (chrome,edge,firefox,safari) - browser mode only
    #[arg(long, default_value = "chrome")]
    browsers: String,

    /// URL the widget is served at (e.g. by `trunk serve`)
    #[arg(long, default_value = "http://localhost:8080/")]
    base_url: String,

    /// Artifacts directory for screenshots and DOM dumps of failed runs
    #[arg(long, default_value = "target/test-artifacts")]
    artifacts_dir: String,

    /// Connect to a Selenium Grid hub instead of local drivers
    #[arg(long)]
    hub: Option<String>,

    /// Run headless where supported
    #[arg(long, value_enum, default_value_t = HeadlessMode::Headless)]
    headless: HeadlessMode,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let scenarios = expand_scenarios(&args.scenarios);
    let seeds = resolve_seeds(&split_csv(&args.seeds))?;
    let harness = BookingHarness::new(Arc::new(TesterAssets::load_default()), args.verbose);
    log::info!(
        "{} services loaded, {} scenarios, {} seeds",
        harness.assets().catalog.services.len(),
        scenarios.len(),
        seeds.len()
    );

    let logic_results = run_logic_scenarios(&args, &scenarios, &seeds, &harness);
    let browser_results = run_browser_scenarios(&args, &scenarios, &seeds).await?;

    write_reports(&args, &logic_results, &browser_results, start_time)?;

    if logic_results.iter().any(|r| !r.passed) || browser_results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:22} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🧪 Labbook Automated Tester".bright_cyan().bold());
    println!("{}", "===========================".cyan());
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = Vec::new();
    for name in split_csv(scenarios_arg) {
        let expanded = if name.eq_ignore_ascii_case("all") {
            all_scenario_keys()
        } else {
            vec![name.to_lowercase()]
        };
        for key in expanded {
            if !scenarios.contains(&key) {
                scenarios.push(key);
            }
        }
    }
    scenarios
}

fn build_browser_config(args: &Args) -> BrowserConfig {
    BrowserConfig {
        headless: args.headless.is_headless(),
        remote_hub: args.hub.clone(),
        ..BrowserConfig::default()
    }
}

fn run_logic_scenarios(
    args: &Args,
    scenarios: &[String],
    seeds: &[u64],
    harness: &BookingHarness,
) -> Vec<logic::ScenarioResult> {
    let mut results: Vec<logic::ScenarioResult> = Vec::new();
    if !matches!(args.mode, TestMode::Logic | TestMode::Both) {
        return results;
    }

    println!("{}", "🧠 Running Logic Tests".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let logic_tester = LogicTester::new(harness.clone());

    for scenario_name in scenarios {
        let Some(combined_scenario) = get_scenario(scenario_name) else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
            continue;
        };
        if let Some(logic_scenario) = combined_scenario.as_logic_scenario() {
            results.extend(logic_tester.run_scenario(&logic_scenario, seeds, args.iterations));
        } else {
            eprintln!(
                "⚠️  Scenario {} has no logic test implementation",
                scenario_name.yellow()
            );
        }
    }

    results
}

async fn run_browser_scenarios(
    args: &Args,
    scenarios: &[String],
    seeds: &[u64],
) -> Result<Vec<BrowserOutcome>> {
    let mut outcomes = Vec::new();
    if !matches!(args.mode, TestMode::Browser | TestMode::Both) {
        return Ok(outcomes);
    }

    println!("{}", "🌐 Running Browser Tests".bright_blue().bold());
    println!("{}", "-".repeat(30).blue());

    let browser_scenarios: Vec<&String> = scenarios
        .iter()
        .filter(|name| has_browser_run(name))
        .collect();
    if browser_scenarios.is_empty() {
        eprintln!("⚠️  None of the selected scenarios drive a browser");
        return Ok(outcomes);
    }

    for browser_name in split_csv(&args.browsers) {
        let Some(kind) = BrowserKind::parse(&browser_name) else {
            eprintln!("⚠️  Unknown browser: {}", browser_name.yellow());
            continue;
        };

        let cfg = build_browser_config(args);
        let driver = match new_session(kind, &cfg).await {
            Ok(d) => d,
            Err(e) => {
                eprintln!("❌ Could not start {kind:?}: {e}");
                continue;
            }
        };

        for scenario_name in &browser_scenarios {
            outcomes.extend(run_browser_scenario(args, scenario_name, seeds, kind, &driver).await);
        }
        let _ = driver.quit().await;
    }

    Ok(outcomes)
}

async fn run_browser_scenario(
    args: &Args,
    scenario_name: &str,
    seeds: &[u64],
    kind: BrowserKind,
    driver: &thirtyfour::WebDriver,
) -> Vec<BrowserOutcome> {
    let mut outcomes = Vec::new();
    let Some(scenario) = get_scenario(scenario_name) else {
        return outcomes;
    };
    let label = kind.label();

    for &seed in seeds {
        let ctx = ScenarioCtx {
            base_url: args.base_url.clone(),
            seed,
            page: PageProbe::new(driver),
            verbose: args.verbose,
        };

        let scenario_start = Instant::now();
        let outcome = scenario.run_browser(driver, &ctx).await;
        let duration = scenario_start.elapsed();
        match outcome {
            Ok(()) => {
                println!(
                    "✅ [{} seed {}] {} - {:?}",
                    label.green(),
                    seed,
                    scenario_name,
                    duration
                );
                outcomes.push(BrowserOutcome::passed(&label, scenario_name, seed, duration));
            }
            Err(e) => {
                eprintln!(
                    "❌ [{} seed {}] {} - {:?}: {:#}",
                    label.red(),
                    seed,
                    scenario_name,
                    duration,
                    e
                );
                let dir = artifacts_dir(&args.artifacts_dir, &label, scenario_name, seed);
                let saved = match capture_artifacts(driver, &dir, &e).await {
                    Ok(()) => Some(dir),
                    Err(err) => {
                        log::warn!("could not save artifacts: {err:#}");
                        None
                    }
                };
                outcomes.push(BrowserOutcome::failed(
                    &label,
                    scenario_name,
                    seed,
                    duration,
                    &e,
                    saved,
                ));
            }
        }
    }
    outcomes
}

fn write_reports(
    args: &Args,
    results: &[logic::ScenarioResult],
    browser_results: &[BrowserOutcome],
    start_time: Instant,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report {
        ReportFormat::Json => {
            let payload = serde_json::json!({
                "logic": results,
                "browser": browser_results,
            });
            writeln!(
                &mut output_target,
                "{}",
                serde_json::to_string_pretty(&payload)?
            )?;
        }
        ReportFormat::Markdown => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Labbook Logic Test Results\n\n_No logic scenarios executed._"
                )?;
            } else {
                logic::reports::generate_markdown_report(&mut output_target, results)?;
            }
            if !browser_results.is_empty() {
                generate_browser_markdown_report(&mut output_target, browser_results)?;
            }
        }
        ReportFormat::Console => {
            if results.is_empty() {
                writeln!(&mut output_target, "No logic scenarios executed.")?;
            } else {
                logic::reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
            if !browser_results.is_empty() {
                generate_browser_console_report(&mut output_target, browser_results)?;
            }
        }
    }

    if args.report != ReportFormat::Json {
        let duration = start_time.elapsed();
        writeln!(&mut output_target)?;
        writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
