//! Error types for DXF drawing access and batch processing.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use bendpick_core::EngineError;
use bendpick_settings::SettingsError;

/// Errors that can occur while processing a drawing file.
#[derive(Error, Debug)]
pub enum PickFileError {
    /// The DXF reader or writer failed.
    #[error("DXF error: {0}")]
    Dxf(#[from] dxf::DxfError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// The pick engine rejected the drawing.
    #[error("Pick engine error: {0}")]
    Engine(#[from] EngineError),

    /// The run settings are invalid.
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Nothing to process at the given location.
    #[error("No DXF files found in {}", .0.display())]
    NoDxfFiles(PathBuf),

    /// The path has no usable file name.
    #[error("Invalid path: {}", .0.display())]
    InvalidPath(PathBuf),
}

/// Result type alias for drawing file operations.
pub type PickFileResult<T> = Result<T, PickFileError>;
