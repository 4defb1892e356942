//! Pick placement configuration
//!
//! All distances are in drawing units. The defaults are tuned for millimetre
//! flat patterns; inch drawings need the tolerances scaled down.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Default mark diameter in drawing units.
pub const DEFAULT_PICK_SIZE: f64 = 0.8;

/// Named tolerances used by the pipeline stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Maximum deviation for two segments to count as the same axis line
    pub colinearity: f64,
    /// Maximum distance from a group end for an intersection to count as an extremity
    pub extremity_match: f64,
    /// Maximum gap between a contour endpoint and a bend line (fillets, chamfers)
    pub fillet_proximity: f64,
    /// Smallest arc opening in degrees that is still a real pick
    pub min_arc_span: f64,
    /// Replacement lines shorter than this are dropped
    pub min_segment_length: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            colinearity: 0.01,
            extremity_match: 0.5,
            fillet_proximity: 3.0,
            min_arc_span: 1.0,
            min_segment_length: 1e-3,
        }
    }
}

impl Tolerances {
    /// Validate tolerances
    pub fn validate(&self) -> EngineResult<()> {
        let fields = [
            ("colinearity", self.colinearity),
            ("extremity_match", self.extremity_match),
            ("fillet_proximity", self.fillet_proximity),
            ("min_arc_span", self.min_arc_span),
            ("min_segment_length", self.min_segment_length),
        ];

        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::invalid_config(
                    name,
                    format!("must be a finite, non-negative number (got {})", value),
                ));
            }
        }

        if self.min_arc_span >= 180.0 {
            return Err(EngineError::invalid_config(
                "min_arc_span",
                "must be below 180 degrees",
            ));
        }

        Ok(())
    }
}

/// Pick size and tolerances for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickConfig {
    /// Radius of the inserted arc
    pub pick_radius: f64,
    pub tolerances: Tolerances,
}

impl Default for PickConfig {
    fn default() -> Self {
        Self::from_pick_size(DEFAULT_PICK_SIZE)
    }
}

impl PickConfig {
    /// Config for a mark of the given diameter with default tolerances.
    pub fn from_pick_size(diameter: f64) -> Self {
        Self {
            pick_radius: diameter / 2.0,
            tolerances: Tolerances::default(),
        }
    }

    /// Mark diameter.
    pub fn pick_size(&self) -> f64 {
        self.pick_radius * 2.0
    }

    /// Change the mark diameter, keeping the tolerances.
    pub fn set_pick_size(&mut self, diameter: f64) {
        self.pick_radius = diameter / 2.0;
    }

    /// Validate configuration
    pub fn validate(&self) -> EngineResult<()> {
        if !self.pick_radius.is_finite() || self.pick_radius <= 0.0 {
            return Err(EngineError::invalid_config(
                "pick_radius",
                format!("must be a finite, positive number (got {})", self.pick_radius),
            ));
        }

        self.tolerances.validate()
    }
}
