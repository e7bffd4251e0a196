use anyhow::Context;
use chrono::{Duration, NaiveDate};
use clap::{ArgGroup, Args, Parser, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::{Config, RankingOverrides, init_tracing, load_config};
use core_types::{FundPerformanceSnapshot, RankingRow};
use indicatif::{ProgressBar, ProgressStyle};
use market_data::{JsonDirSource, MockSource, PerformanceSource};
use pipeline::{RankingHistory, WeeklyPipeline, WeeklyReport};
use ranking::RankingEngine;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The main entry point for the FundScope weekly ranking application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A .env file is optional; FUNDSCOPE__ variables may also come from the shell.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    cli.overrides.apply(&mut config.ranking);
    config.ranking.validate()?;

    // Held until exit so buffered file logs are flushed.
    let _log_guard = init_tracing(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Run(args) => handle_run(args, &config).await,
        Commands::Simulate(args) => handle_simulate(args, &config).await,
        Commands::Rank(args) => handle_rank(args, &config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Weekly fund sector rankings, top-tier streaks and tier-exit alerts.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(flatten)]
    overrides: RankingOverrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank every monitored sector for one week and write the digest preview.
    Run(RunArgs),
    /// Run several consecutive weeks of mock data and summarise them.
    Simulate(SimulateArgs),
    /// Rank a single sector snapshot and print the result as JSON.
    Rank(RankArgs),
}

#[derive(Args)]
#[command(group(ArgGroup::new("source").required(true).args(["mock", "data_dir"])))]
struct RunArgs {
    /// The week being ranked (format: YYYY-MM-DD).
    #[arg(long)]
    date: NaiveDate,

    /// Use generated sector data.
    #[arg(long)]
    mock: bool,

    /// Read sector snapshots from `<DIR>/<date>/<sector-slug>.json`.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Ranking history carried between weekly runs.
    #[arg(long, default_value = "ranking_history.json")]
    history: PathBuf,

    /// Rank and preview without saving the history.
    #[arg(long)]
    dry_run: bool,

    /// Where `digest_preview_<date>.md` is written.
    #[arg(long, default_value = ".")]
    preview_dir: PathBuf,
}

#[derive(Args)]
struct SimulateArgs {
    /// The first simulated week (format: YYYY-MM-DD).
    #[arg(long)]
    from: NaiveDate,

    /// Number of consecutive weeks to run.
    #[arg(long, default_value_t = 8)]
    weeks: u32,

    /// Write every weekly report to this file as JSON.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct RankArgs {
    /// JSON array of fund performance snapshots for one sector.
    #[arg(long)]
    snapshot: PathBuf,

    /// JSON array of the sector's previous ranking rows.
    #[arg(long)]
    prior: Option<PathBuf>,

    #[arg(long)]
    sector_code: String,

    /// Display name; taken from the configuration when omitted.
    #[arg(long)]
    sector_name: Option<String>,

    /// The week being ranked (format: YYYY-MM-DD).
    #[arg(long)]
    date: NaiveDate,
}

// ==============================================================================
// Run Command Logic
// ==============================================================================

async fn handle_run(args: RunArgs, config: &Config) -> anyhow::Result<()> {
    let source: Arc<dyn PerformanceSource> = match &args.data_dir {
        Some(dir) => Arc::new(JsonDirSource::new(dir)),
        None => Arc::new(MockSource::new()),
    };

    let mut history = RankingHistory::load(&args.history)?;
    let pipeline = WeeklyPipeline::new(config, source)?;
    let report = pipeline.run_week(args.date, &mut history).await;

    let preview = write_preview(&report, &args.preview_dir)?;
    print_report(&report);
    println!("Digest preview written to {}", preview.display());

    if report.digest.should_send(&config.digest) {
        tracing::info!(subject = %report.digest.subject, "Digest ready for delivery.");
    } else {
        tracing::info!("No top-tier exits this week; digest withheld.");
    }

    if args.dry_run {
        tracing::info!("Dry run: ranking history not saved.");
    } else {
        history
            .save(&args.history)
            .with_context(|| format!("failed to save history to {}", args.history.display()))?;
    }

    Ok(())
}

fn write_preview(report: &WeeklyReport, dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create preview directory {}", dir.display()))?;
    let path = dir.join(format!("digest_preview_{}.md", report.week_date));
    std::fs::write(&path, report.digest.render_markdown()?)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

fn print_report(report: &WeeklyReport) {
    let summary = report.summary();
    println!("{}", report.digest.subject);
    println!(
        "{} sectors ranked, {} failed, {} funds, {} alerts",
        summary.sectors_ok, summary.sectors_failed, summary.total_funds, summary.alert_count
    );
    for code in &report.failed_sectors {
        println!("  failed: {code}");
    }
}

// ==============================================================================
// Simulate Command Logic
// ==============================================================================

async fn handle_simulate(args: SimulateArgs, config: &Config) -> anyhow::Result<()> {
    let pipeline = WeeklyPipeline::new(config, Arc::new(MockSource::new()))?;
    let mut history = RankingHistory::new();

    let progress_bar = ProgressBar::new(u64::from(args.weeks));
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
            .progress_chars("#>-"),
    );

    let mut reports = Vec::with_capacity(args.weeks as usize);
    for offset in 0..args.weeks {
        let week_date = args.from + Duration::weeks(i64::from(offset));
        progress_bar.set_message(format!("Ranking w/e {week_date}"));
        reports.push(pipeline.run_week(week_date, &mut history).await);
        progress_bar.inc(1);
    }
    progress_bar.finish_with_message("Simulation complete!");

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Week", "Sectors", "Failed", "Funds", "Alerts", "Funds dropped", "Top 6m fund",
    ]);
    for report in &reports {
        let summary = report.summary();
        let leader = report
            .digest
            .leaders
            .iter()
            .flat_map(|l| l.funds.first())
            .max_by(|a, b| a.return_6m.cmp(&b.return_6m))
            .map(|f| format!("{} ({:.2}%)", f.fund_name, f.return_6m))
            .unwrap_or_else(|| "n/a".to_string());
        table.add_row(vec![
            summary.week_date.to_string(),
            summary.sectors_ok.to_string(),
            summary.sectors_failed.to_string(),
            summary.total_funds.to_string(),
            summary.alert_count.to_string(),
            report.digest.drop_count().to_string(),
            leader,
        ]);
    }
    println!("{table}");

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&reports)?;
        std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        println!("Weekly reports written to {}", path.display());
    }

    Ok(())
}

// ==============================================================================
// Rank Command Logic
// ==============================================================================

fn handle_rank(args: RankArgs, config: &Config) -> anyhow::Result<()> {
    let performances: Vec<FundPerformanceSnapshot> = read_json(&args.snapshot)?;
    let prior: Vec<RankingRow> = match &args.prior {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };
    let sector_name = args
        .sector_name
        .as_deref()
        .unwrap_or_else(|| config.sector_name(&args.sector_code));

    let engine = RankingEngine::new(config.ranking)?;
    let result = engine.rank_sector(&args.sector_code, sector_name, args.date, &performances, &prior);

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}
