//! fxsentiment – news-sentiment signal for forex pairs.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fxsentiment::analysis::{AnalysisReport, PairAnalyzer};
use fxsentiment::config::Config;
use fxsentiment::news::{GdeltSource, NewsSource, StaticSource};
use fxsentiment::sentiment::{CurrencySentiment, Decision, PolarityScorer, QueryBuilder};
use fxsentiment::server;
use fxsentiment::utils::init_logging;

#[derive(Debug, Parser)]
#[command(name = "fxsentiment", author, version, about = "Forex news-sentiment signal", long_about = None)]
struct Args {
    /// Path to the configuration file (TOML). Without it ./config.toml, then the
    /// user config directory, then built-in defaults are used.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the default configuration to stdout and exit
    #[arg(long)]
    print_default_config: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Analyze one pair and print the result
    Analyze {
        /// Six-letter pair, e.g. EURUSD
        #[arg(short, long)]
        pair: String,
        /// GDELT look-back window, e.g. 24h, 3d
        #[arg(short, long)]
        timespan: Option<String>,
        /// Print the full JSON report
        #[arg(long)]
        json: bool,
        /// Read articles from a JSON file (`{"EUR": [...], "USD": [...]}`) instead of GDELT
        #[arg(long, value_name = "FILE")]
        from_file: Option<PathBuf>,
    },
    /// Write a default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.toml")]
        config: PathBuf,
        /// Overwrite if the file already exists
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    if args.print_default_config {
        println!("{}", Config::default_toml()?);
        return Ok(());
    }

    if let Some(Command::Init { config, force }) = &args.command {
        return write_default_config(config, *force);
    }

    let config = load_config(args.config.as_deref())?;
    init_logging(&config.app.log_level);
    fxsentiment::metrics::init().context("metrics init")?;

    match args.command {
        | Some(Command::Analyze { pair, timespan, json, from_file }) => {
            analyze_once(&config, &pair, timespan.as_deref(), json, from_file.as_deref()).await
        }
        | Some(Command::Serve) | None => run_service(&config).await,
        | Some(Command::Init { .. }) => Ok(()),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        | Some(path) if !path.exists() => {
            anyhow::bail!("Configuration file {} not found", path.display())
        }
        | Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        | None => Config::load().context("Failed to load configuration")?,
    };
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        eprintln!("Config file {} exists. Use --force to overwrite.", path.display());
        std::process::exit(1);
    }
    Config::default().save(path).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("✅ Wrote default configuration to {}", path.display());
    Ok(())
}

async fn run_service(config: &Config) -> Result<()> {
    let cfg = config.clone();
    let server_handle = tokio::spawn(async move { server::serve(&cfg).await });

    tokio::select! {
        res = server_handle => {
            res.context("server task panicked")?.context("HTTP server failed")?;
        }
        _ = tokio::signal::ctrl_c() => {
            log::info!("Shutdown signal received. Stopping...");
        }
    }
    Ok(())
}

async fn analyze_once(
    config: &Config, pair: &str, timespan: Option<&str>, json: bool, from_file: Option<&Path>,
) -> Result<()> {
    let source: Arc<dyn NewsSource> = match from_file {
        | Some(path) => Arc::new(
            StaticSource::from_json_file(path)
                .with_context(|| format!("Failed to read articles from {}", path.display()))?,
        ),
        | None => {
            let query =
                QueryBuilder::new(Arc::new(config.currencies.clone()), config.query.econ_terms.clone());
            Arc::new(GdeltSource::new(&config.news, query)?)
        }
    };
    let analyzer = PairAnalyzer::from_config(config, source, PolarityScorer::vader());
    let report = analyzer.analyze(pair, timespan).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &AnalysisReport) {
    let r = &report.result;
    let label = match r.decision {
        | Decision::Bullish => r.decision_label.green().bold(),
        | Decision::Bearish => r.decision_label.red().bold(),
        | Decision::Neutral => r.decision_label.yellow().bold(),
    };
    println!("{} ({})  {}", r.pair.bold(), report.timespan, label);
    println!("  spread {:+.3}", r.spread);
    print_side(&r.base, &r.base_sentiment);
    print_side(&r.quote, &r.quote_sentiment);
    println!();
    println!("{}", r.summary);
    println!("{}", r.why.dimmed());
}

fn print_side(code: &str, s: &CurrencySentiment) {
    println!(
        "  {}  avg {:+.3}  high-impact {}  weight {:.2}",
        code.cyan(),
        s.weighted_average,
        s.high_impact_count,
        s.total_weight_mass
    );
    for inf in &s.top_influencers {
        println!("      [{:.1} | {:+.2}] {}", inf.weight, inf.polarity_score, inf.title);
    }
}
