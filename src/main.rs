use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};

use bendpick::{init_logging, process_path, PickFileError, Settings, BUILD_DATE, VERSION};

#[derive(Parser)]
#[command(
    name = "bendpick",
    version,
    about = "Add laser reference picks where bend lines meet the cut contour of DXF flat patterns"
)]
struct Cli {
    /// DXF file or folder of DXF files
    input: PathBuf,

    /// Pick mark diameter in drawing units [default: 0.8]
    #[arg(short = 's', long)]
    pick_size: Option<f64>,

    /// Settings file (.json or .toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output folder name, created next to the input
    #[arg(short, long)]
    output_folder: Option<String>,

    /// Process the files of a folder in parallel
    #[arg(long)]
    parallel: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    if let Some(size) = cli.pick_size {
        settings.pick.set_pick_size(size);
    }
    if let Some(folder) = &cli.output_folder {
        settings.output.folder_name = folder.clone();
    }
    if cli.parallel {
        settings.output.parallel = true;
    }

    settings.validate().context("Invalid settings")?;
    Ok(settings)
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let settings = load_settings(cli)?;
    info!(
        "BendPick {} ({}), pick size {}",
        VERSION,
        BUILD_DATE,
        settings.pick.pick_size()
    );

    let report = match process_path(&cli.input, &settings) {
        Ok(report) => report,
        Err(PickFileError::NoDxfFiles(path)) => {
            error!("No DXF files found in {}", path.display());
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e).context("Batch failed"),
    };

    let succeeded = report.succeeded().count();
    info!(
        "Files processed: {}/{}, picks added: {}, output folder: {}",
        succeeded,
        report.files.len(),
        report.total_picks,
        report.output_dir.display()
    );

    let failed: Vec<_> = report.failed().collect();
    if failed.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }
    for (path, e) in &failed {
        warn!("  {}: {}", path.display(), e);
    }
    warn!("{} file(s) failed", failed.len());
    Ok(ExitCode::FAILURE)
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    run(&cli)
}
