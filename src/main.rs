use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::debug;

use usage_report_merge::config::Config;
use usage_report_merge::display::DisplayManager;
use usage_report_merge::{loader, logging, ApplicationMfeCache, MergeError, MergeOptions, ReportMerger};

#[derive(Parser)]
#[command(name = "usage-merge")]
#[command(about = "Merge component usage reports from several applications into one")]
#[command(version)]
struct Cli {
    /// Usage report JSON files (glob patterns are expanded)
    #[arg(required = true, num_args = 1..)]
    files: Vec<String>,

    /// Where to write the merged report
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the merged report as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Write compact JSON
    #[arg(long)]
    compact: bool,

    /// Entries kept in each top-N ranking
    #[arg(long)]
    top: Option<usize>,

    /// Configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let json = cli.json;

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => handle_error(e, json),
    };
    let _guard = logging::init_logging(&config);

    match run(cli, config).await {
        Ok(()) => Ok(()),
        Err(e) => handle_error(e, json),
    }
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    let paths = loader::expand_input_paths(&cli.files)?;
    if paths.len() < config.merge.min_inputs {
        return Err(MergeError::InvalidInputCount {
            minimum: config.merge.min_inputs,
            actual: paths.len(),
        }
        .into());
    }
    debug!(inputs = paths.len(), "Loading usage reports");

    let reports = loader::load_reports(&paths).await?;

    let merger = ReportMerger::with_options(MergeOptions {
        top_n: cli.top.unwrap_or(config.merge.top_n),
    });
    let merged = merger.merge_reports(&reports)?;

    let pretty = config.output.json_pretty && !cli.compact;
    let output = cli.output.unwrap_or(config.output.default_path);
    loader::write_report(&output, &merged, pretty).await?;

    let display = DisplayManager::new();
    if cli.json {
        display.display_json(&merged, pretty)?;
    } else {
        let labels: Vec<String> = paths.iter().map(|p| loader::source_label(p)).collect();
        let applications = ApplicationMfeCache::from_reports(&labels, &reports);
        display.display_summary(&merged, reports.len(), &applications);
        println!("Merged report written to {}", output.display());
    }

    Ok(())
}

fn handle_error(e: anyhow::Error, json: bool) -> ! {
    if json {
        println!("{}", serde_json::json!({ "error": e.to_string() }));
    } else {
        eprintln!("Error: {:#}", e);
    }
    process::exit(1);
}
