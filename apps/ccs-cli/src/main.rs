use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use ccs_accounting::{CalculationMode, Phase};
use ccs_app::{
    AppResult, CancelToken, RunOptions, RunProgressEvent, RunRequest, RunStage, RunSummary,
    ensure_run_with_progress, extract_series, get_run_summary, load_run, series_csv,
    validate_inputs,
};
use ccs_boundary::ContainmentCategory;
use ccs_grid::{RegionLabel, ZoneLabel};
use tracing::Level;

#[derive(Parser)]
#[command(name = "ccs")]
#[command(about = "CO2 containment accounting for reservoir simulation output", long_about = None)]
struct Cli {
    /// Log run configuration and summary (INFO)
    #[arg(long, global = true)]
    verbose: bool,
    /// Log every timestep (DEBUG)
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the run configuration and all static inputs
    Validate {
        /// Path to the run configuration YAML file
        config_path: PathBuf,
    },
    /// Compute the containment table
    Run {
        /// Path to the run configuration YAML file
        config_path: PathBuf,
        /// Calculation mode, overriding the configuration
        #[arg(long)]
        mode: Option<CalculationMode>,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
        /// Also write the wide table
        #[arg(long)]
        readable_output: bool,
    },
    /// Show the end-state summary of a stored run
    Summary {
        /// Path to the run configuration YAML file
        config_path: PathBuf,
        /// Calculation mode of the stored run, if not the configured one
        #[arg(long)]
        mode: Option<CalculationMode>,
    },
    /// Export one group's time series from a stored run
    ExportSeries {
        /// Path to the run configuration YAML file
        config_path: PathBuf,
        /// Zone label (`all` when no zones were given)
        #[arg(long, default_value = "all")]
        zone: String,
        /// Region label (`all` when no regions were given)
        #[arg(long, default_value = "all")]
        region: RegionLabel,
        /// contained, hazardous or outside
        #[arg(long)]
        category: ContainmentCategory,
        /// total, gas, free_gas, trapped_gas or dissolved
        #[arg(long, default_value = "total")]
        phase: Phase,
        /// Calculation mode of the stored run, if not the configured one
        #[arg(long)]
        mode: Option<CalculationMode>,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Run {
            config_path,
            mode,
            no_cache,
            readable_output,
        } => cmd_run(
            &config_path,
            RunOptions {
                use_cache: !no_cache,
                mode,
                readable_output,
                ..RunOptions::default()
            },
        ),
        Commands::Summary { config_path, mode } => cmd_summary(&config_path, mode),
        Commands::ExportSeries {
            config_path,
            zone,
            region,
            category,
            phase,
            mode,
            output,
        } => cmd_export_series(
            &config_path,
            mode,
            &ZoneLabel::from(zone),
            &region,
            category,
            phase,
            output.as_deref(),
        ),
    }
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating configuration: {}", config_path.display());
    let report = validate_inputs(config_path)?;
    println!("✓ Configuration is valid");
    println!("  Name: {}", report.name);
    println!("  Calculation mode: {}", report.mode);
    println!(
        "  Active cells: {} ({} inactive)",
        report.active_cells, report.inactive_cells
    );
    println!(
        "  Contained: {}  Hazardous: {}  Outside: {}",
        report.counts.contained, report.counts.hazardous, report.counts.outside
    );
    let zones: Vec<String> = report.zones.iter().map(ToString::to_string).collect();
    let regions: Vec<String> = report.regions.iter().map(ToString::to_string).collect();
    println!("  Zones: {}", zones.join(", "));
    println!("  Regions: {}", regions.join(", "));
    println!("  Snapshots: {}", report.snapshots);
    for source in &report.unreadable_snapshots {
        println!("  ! unreadable, will be skipped: {}", source);
    }
    Ok(())
}

fn cmd_run(config_path: &Path, options: RunOptions) -> AppResult<()> {
    println!("Running containment accounting: {}", config_path.display());

    let request = RunRequest {
        config_path,
        options,
    };

    let mut last_emit = Instant::now();
    let mut last_stage = None;
    let response = ensure_run_with_progress(
        &request,
        &CancelToken::new(),
        Some(&mut |event| {
            let emit_now =
                last_stage != Some(event.stage) || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&event);
                last_stage = Some(event.stage);
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!("✓ Run completed: {}", response.run_id);
    }
    for path in &response.tables {
        println!("  Wrote {}", path.display());
    }
    for skipped in &response.manifest.skipped {
        println!("  ! skipped {}: {}", skipped.source, skipped.reason);
    }
    println!("  Total time: {:.3}s", response.total_time_s);
    println!();
    print_summary(&response.summary);

    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(100));
    let _ = io::stdout().flush();
}

fn stage_label(stage: RunStage) -> &'static str {
    match stage {
        RunStage::LoadingConfig => "loading config",
        RunStage::CheckingCache => "checking cache",
        RunStage::LoadingCachedResult => "loading cache",
        RunStage::BuildingCatalog => "building catalog",
        RunStage::ClassifyingCells => "classifying cells",
        RunStage::ProcessingTimesteps => "processing timesteps",
        RunStage::AssemblingTable => "assembling table",
        RunStage::SavingResults => "saving results",
        RunStage::Completed => "completed",
    }
}

fn render_cli_progress(event: &RunProgressEvent) {
    let spinner = ['|', '/', '-', '\\'];
    let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
    let mut line = format!(
        "\r{} {}  elapsed={:.2}s",
        spinner[spin_idx],
        stage_label(event.stage),
        event.elapsed_wall_s
    );
    if let Some(t) = &event.timesteps {
        line.push_str(&format!("  timesteps={}/{}", t.processed, t.total));
        if t.skipped > 0 {
            line.push_str(&format!("  skipped={}", t.skipped));
        }
    }
    if let Some(msg) = &event.message {
        line.push_str(&format!("  {}", msg));
    }
    print!("{}", line);
    let _ = io::stdout().flush();
}

fn print_summary(summary: &RunSummary) {
    print!("{}", summary.render());
}

fn stored_run_options(mode: Option<CalculationMode>) -> RunOptions {
    RunOptions {
        mode,
        ..RunOptions::default()
    }
}

fn cmd_summary(config_path: &Path, mode: Option<CalculationMode>) -> AppResult<()> {
    let (manifest, table) = load_run(config_path, &stored_run_options(mode))?;
    let summary = get_run_summary(&manifest, &table)?;
    println!("Run {} ({})", manifest.run_id, manifest.timestamp);
    print_summary(&summary);
    Ok(())
}

fn cmd_export_series(
    config_path: &Path,
    mode: Option<CalculationMode>,
    zone: &ZoneLabel,
    region: &RegionLabel,
    category: ContainmentCategory,
    phase: Phase,
    output: Option<&Path>,
) -> AppResult<()> {
    let (_manifest, table) = load_run(config_path, &stored_run_options(mode))?;
    let series = extract_series(&table, zone, region, category, phase)?;
    let csv = series_csv(&series);

    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!(
            "✓ Exported {} data points to {}",
            series.len(),
            path.display()
        );
    } else {
        print!("{}", csv);
    }

    Ok(())
}
