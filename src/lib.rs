//! # BendPick
//!
//! Adds laser reference picks to flat-pattern sheet-metal drawings. A pick
//! is a small arc placed where a bend line meets the cut contour; the press
//! brake operator lines the bend up against it.
//!
//! ## Architecture
//!
//! BendPick is organized as a workspace with multiple crates:
//!
//! 1. **bendpick-core** - Geometry engine: classification, grouping, picks, trims
//! 2. **bendpick-settings** - JSON/TOML settings files
//! 3. **bendpick-dxf** - DXF drawing access and batch processing
//! 4. **bendpick** - Command-line binary that integrates all crates

pub use bendpick_core::{
    ClassificationRules, EngineError, EntityId, LineSegment, PickConfig, PickEngine, PickPlan,
    PickSummary, Point2D, Tolerances, DEFAULT_PICK_SIZE,
};
pub use bendpick_dxf::{
    find_dxf_files, output_dir, process_file, process_path, BatchReport, FileOutcome, FileReport,
    PickDrawing, PickFileError,
};
pub use bendpick_settings::{OutputSettings, Settings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Console output on stderr
/// - RUST_LOG environment variable support
/// - `info` level by default, `debug` when `verbose`
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_level(true)
        .with_thread_names(verbose)
        .with_line_number(verbose)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
