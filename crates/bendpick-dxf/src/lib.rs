//! # BendPick DXF
//!
//! Reads flat-pattern DXF drawings, runs the pick engine on their lines and
//! writes the marked drawings back, one file or a whole folder at a time.

pub mod batch;
pub mod drawing;
pub mod error;

pub use batch::{
    find_dxf_files, output_dir, process_file, process_path, BatchReport, FileOutcome, FileReport,
};
pub use drawing::{AppliedChanges, CollectedLines, PickDrawing};
pub use error::{PickFileError, PickFileResult};
