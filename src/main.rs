use anyhow::{anyhow, bail, Context};
use clap::Parser;
use geoprox_proximity::MatchConfig;
use geoprox_storage::{
    is_supported_file, spawn_analysis, write_json, write_rows_csv, write_summary_csv, AnalysisStore,
    SUPPORTED_EXTENSIONS,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Find candidate facilities within a radius of each government facility
#[derive(Parser, Debug)]
#[command(name = "geoprox")]
#[command(about = "Radius proximity analysis between two facility registries", long_about = None)]
struct Args {
    /// Government facility file (.csv, .tsv or .txt)
    #[arg(short, long)]
    government: PathBuf,

    /// Candidate facility file (.csv, .tsv or .txt)
    #[arg(short, long)]
    candidates: PathBuf,

    /// Search radius in kilometers
    #[arg(long)]
    radius_km: Option<f64>,

    /// Candidate source whose latitude and longitude are swapped (repeatable)
    #[arg(long = "swap-source")]
    swap_sources: Vec<String>,

    /// JSON file with match configuration; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the JSON and CSV reports
    #[arg(short, long, default_value = "./output")]
    output_dir: PathBuf,

    /// Report progress every N government records
    #[arg(long)]
    progress_interval: Option<usize>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn build_config(args: &Args) -> anyhow::Result<MatchConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            MatchConfig::from_json_str(&text)?
        }
        None => MatchConfig::default(),
    };

    if let Some(radius) = args.radius_km {
        config.radius_km = radius;
    }
    if let Some(interval) = args.progress_interval {
        config.progress_interval = interval;
    }
    config.swap_sources.extend(args.swap_sources.iter().cloned());
    config.validate()?;
    Ok(config)
}

fn check_input(path: &Path) -> anyhow::Result<()> {
    if !is_supported_file(path) {
        bail!(
            "{} is not a supported file type ({})",
            path.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting geoprox v{}", env!("CARGO_PKG_VERSION"));
    check_input(&args.government)?;
    check_input(&args.candidates)?;
    let config = build_config(&args)?;
    info!("Government file: {:?}", args.government);
    info!("Candidate file: {:?}", args.candidates);
    info!("Radius: {} km, swapped sources: {:?}", config.radius_km, config.swap_sources);

    let store = Arc::new(AnalysisStore::new());
    let (id, handle) = spawn_analysis(
        store.clone(),
        args.government.clone(),
        args.candidates.clone(),
        config,
    )?;
    info!("Session {} started", id);

    let worker = tokio::task::spawn_blocking(move || handle.join());
    tokio::pin!(worker);
    let mut ticker = tokio::time::interval(Duration::from_millis(500));

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                bail!("analysis {} interrupted", id);
            }
            joined = &mut worker => {
                joined?
                    .map_err(|_| anyhow!("analysis worker for session {} panicked", id))??;
                break;
            }
            _ = ticker.tick() => {
                if let Some(snapshot) = store.get(&id) {
                    info!(
                        "Session {}: {:?} {}/{}",
                        id, snapshot.status, snapshot.processed, snapshot.total
                    );
                }
            }
        }
    }

    let analysis = store
        .analysis(&id)
        .ok_or_else(|| anyhow!("session {} finished without a result", id))?;

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("failed to create {}", args.output_dir.display()))?;
    let json_path = args.output_dir.join(format!("results_{}.json", id));
    let rows_path = args.output_dir.join(format!("distance_analysis_{}.csv", id));
    let summary_path = args.output_dir.join(format!("summary_{}.csv", id));

    write_json(&json_path, &analysis.outcome.rows, &analysis.summary)?;
    write_rows_csv(&rows_path, &analysis.outcome.rows)?;
    write_summary_csv(&summary_path, &analysis.summary)?;

    let summary = &analysis.summary;
    info!(
        "{} rows for {} government records, mean distance {} km, {:.1} candidates per record",
        summary.total_rows, summary.total_gov_schools, summary.avg_distance, summary.avg_custom_schools_per_gov
    );
    info!("Wrote {:?}, {:?} and {:?}", json_path, rows_path, summary_path);
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}
