//! # BendPick Core
//!
//! Geometry engine that places pick marks (small reference arcs) where the
//! bend lines of a flat-pattern sheet-metal drawing meet its cut contour, and
//! trims the contour so each arc replaces a short notch of the cut line.
//!
//! ## Pipeline
//!
//! 1. **Classification** - [`classify`] sorts drawing lines into bends and contour
//! 2. **Grouping** - [`grouping`] merges colinear (dashed) bend segments
//! 3. **Intersections** - [`intersections`] finds crossings and fillet near-misses
//! 4. **Extremities** - [`extremity`] keeps only the two ends of each bend and
//!    points every pick toward the bend's middle
//! 5. **Picks** - [`pick`] builds the arc and rejects degenerate ones
//! 6. **Trims** - [`trim`] consolidates picks per contour and splits the contour
//!
//! [`pipeline::run`] drives all stages for one drawing and returns a
//! [`PickPlan`] for the drawing layer to apply. The engine does no I/O.

pub mod classify;
pub mod config;
pub mod error;
pub mod extremity;
pub mod geometry;
pub mod grouping;
pub mod intersections;
pub mod pick;
pub mod pipeline;
pub mod trim;
pub mod types;

pub use classify::ClassificationRules;
pub use config::{PickConfig, Tolerances, DEFAULT_PICK_SIZE};
pub use error::{EngineError, EngineResult};
pub use extremity::ExtremityBuckets;
pub use pick::PickRejection;
pub use pipeline::{run, GroupOutcome, PickEngine, PickPlan, PickSummary, PipelineStage};
pub use trim::ContourPicks;
pub use types::{
    BendGroup, CutPoint, EntityId, Extremity, IntersectionKind, LineInsertion, LineRole,
    LineSegment, Orientation, PickSpec, PicksForContour, Point2D, RawIntersection, TrimSpec,
};
