use anyhow::{Context, Result};
use clap::Parser;
use retail_dashboard::{
    cache::DatasetCache,
    config::{DashboardConfig, DEFAULT_CONFIG_PATH},
    dashboard::{resolve_selection, Dashboard},
    data::month_abbrev,
    report,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "retail-dashboard",
    version,
    about = "Monthly product sales metrics for a retail transaction dataset"
)]
struct Args {
    /// YAML config file; missing file means defaults
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Dataset CSV, overrides `dataset_path` from the config
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Months to include, e.g. `--months Jan,Feb`; defaults to every month present
    #[arg(short, long, value_delimiter = ',')]
    months: Vec<String>,

    /// Print the dashboard as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // ─── 1) init logging ─────────────────────────────────────────────
    let default_level = if args.verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) resolve configuration ────────────────────────────────────
    let mut config = DashboardConfig::load_or_default(&args.config)?;
    if let Some(data) = args.data {
        config.dataset_path = data;
    }
    if !args.months.is_empty() {
        config.selected_months = args.months;
    }
    config.validate()?;
    info!(dataset = %config.dataset_path.display(), "startup");

    // ─── 3) load + aggregate ─────────────────────────────────────────
    let records = DatasetCache::global().get_or_load(&config.dataset_path)?;
    let configured = config.months()?;
    let selected = resolve_selection(&records, configured);
    let labels: Vec<&str> = selected
        .iter()
        .map(|m| month_abbrev(*m))
        .collect();
    info!(rows = records.len(), months = ?labels, "building dashboard");

    let dash = Dashboard::build(&records, &selected, &config)
        .with_context(|| format!("no transactions for months {:?}", labels))?;

    // ─── 4) render ───────────────────────────────────────────────────
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&dash).context("serializing dashboard")?
        );
    } else {
        print!("{}", report::render(&dash, &config.currency_symbol));
    }

    info!("done");
    Ok(())
}
