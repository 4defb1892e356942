//! Pick pipeline orchestration
//!
//! Runs the stages for one drawing:
//!
//! `Classified → Grouped → IntersectionsCollected → ExtremitiesFiltered →
//! PicksBuilt → TrimsConsolidated → Emitted`
//!
//! A group that yields nothing at some stage simply contributes nothing; only
//! malformed input aborts the run.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::config::PickConfig;
use crate::error::{EngineError, EngineResult};
use crate::extremity::{convergence_direction, filter_extremities};
use crate::grouping::group_colinear;
use crate::intersections::collect_intersections;
use crate::pick::{build_pick, PickRejection};
use crate::trim::{replacement_lines, ContourPicks};
use crate::types::{BendGroup, EntityId, LineInsertion, LineSegment, PickSpec, TrimSpec};

/// Stage of a pipeline run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineStage {
    Classified,
    Grouped,
    IntersectionsCollected,
    ExtremitiesFiltered,
    PicksBuilt,
    TrimsConsolidated,
    Emitted,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Classified => "classified",
            Self::Grouped => "grouped",
            Self::IntersectionsCollected => "intersections collected",
            Self::ExtremitiesFiltered => "extremities filtered",
            Self::PicksBuilt => "picks built",
            Self::TrimsConsolidated => "trims consolidated",
            Self::Emitted => "emitted",
        };
        write!(f, "{}", name)
    }
}

/// Counters reported for one drawing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickSummary {
    pub bend_lines: usize,
    pub contour_lines: usize,
    pub groups: usize,
    /// Intersections found before extremity filtering
    pub intersections: usize,
    /// Intersections kept at group ends
    pub extremity_intersections: usize,
    pub picks_added: usize,
    pub picks_rejected: usize,
    /// Contours trimmed (and deleted)
    pub trims_applied: usize,
}

/// Everything the drawing layer has to change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickPlan {
    pub arcs: Vec<PickSpec>,
    pub lines: Vec<LineInsertion>,
    /// Contours replaced by `lines`; the caller deletes them.
    pub deletions: Vec<EntityId>,
    pub summary: PickSummary,
}

impl PickPlan {
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty() && self.lines.is_empty() && self.deletions.is_empty()
    }
}

/// Picks produced by a single bend group.
#[derive(Debug, Clone, Default)]
pub struct GroupOutcome {
    pub intersections: usize,
    pub extremity_intersections: usize,
    pub picks: Vec<(PickSpec, TrimSpec)>,
    pub rejected: Vec<PickRejection>,
}

/// Runs the pick pipeline with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct PickEngine {
    config: PickConfig,
}

impl PickEngine {
    /// Create an engine, validating the configuration
    pub fn new(config: PickConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PickConfig {
        &self.config
    }

    /// Picks for one colinear bend group.
    pub fn process_group(
        &self,
        group: &BendGroup,
        bend_lines: &[LineSegment],
        contour_lines: &[LineSegment],
    ) -> GroupOutcome {
        let tol = &self.config.tolerances;
        let mut outcome = GroupOutcome::default();

        let found = collect_intersections(group, bend_lines, contour_lines, tol.fillet_proximity);
        outcome.intersections = found.len();

        let buckets = filter_extremities(group, found, tol.extremity_match);
        outcome.extremity_intersections = buckets.len();

        for (end, intersection) in buckets.iter() {
            let built = convergence_direction(group, intersection.point)
                .ok_or(PickRejection::NoDirection)
                .and_then(|direction| {
                    build_pick(
                        intersection.point,
                        self.config.pick_radius,
                        direction,
                        &intersection.contour,
                        tol.min_arc_span,
                    )
                });

            match built {
                Ok(pick) => outcome.picks.push(pick),
                Err(reason) => {
                    debug!(
                        "Pick at {} ({:?} end, contour {}) rejected: {}",
                        intersection.point, end, intersection.contour.id, reason
                    );
                    outcome.rejected.push(reason);
                }
            }
        }

        outcome
    }

    /// Runs every stage over one drawing's bend and contour lines.
    pub fn run(&self, bend_lines: &[LineSegment], contour_lines: &[LineSegment]) -> EngineResult<PickPlan> {
        validate_lines(bend_lines)?;
        validate_lines(contour_lines)?;
        let mut summary = PickSummary {
            bend_lines: bend_lines.len(),
            contour_lines: contour_lines.len(),
            ..PickSummary::default()
        };
        trace_stage(PipelineStage::Classified);

        let groups = group_colinear(bend_lines, self.config.tolerances.colinearity);
        summary.groups = groups.len();
        trace_stage(PipelineStage::Grouped);

        let mut consolidated = ContourPicks::new();
        for group in &groups {
            let outcome = self.process_group(group, bend_lines, contour_lines);
            debug!(
                "{} group at {:.3} [{:.3}, {:.3}]: {} intersections, {} at ends, {} picks",
                group.orientation,
                group.fixed_coord,
                group.coord_min,
                group.coord_max,
                outcome.intersections,
                outcome.extremity_intersections,
                outcome.picks.len()
            );

            summary.intersections += outcome.intersections;
            summary.extremity_intersections += outcome.extremity_intersections;
            summary.picks_rejected += outcome.rejected.len();
            consolidated.extend(outcome.picks);
        }
        trace_stage(PipelineStage::IntersectionsCollected);
        trace_stage(PipelineStage::ExtremitiesFiltered);
        trace_stage(PipelineStage::PicksBuilt);

        let lines = replacement_lines(&consolidated, self.config.tolerances.min_segment_length);
        trace_stage(PipelineStage::TrimsConsolidated);

        let mut arcs = Vec::with_capacity(consolidated.pick_count());
        let mut deletions = Vec::with_capacity(consolidated.len());
        for entry in consolidated.iter() {
            arcs.extend(entry.picks.iter().map(|(pick, _)| pick.clone()));
            deletions.push(entry.contour.id);
        }

        summary.picks_added = arcs.len();
        summary.trims_applied = deletions.len();
        trace_stage(PipelineStage::Emitted);

        info!(
            "Picks added: {}, trims applied: {} ({} groups, {} rejected)",
            summary.picks_added, summary.trims_applied, summary.groups, summary.picks_rejected
        );

        Ok(PickPlan {
            arcs,
            lines,
            deletions,
            summary,
        })
    }
}

fn trace_stage(stage: PipelineStage) {
    tracing::trace!("Pipeline stage: {}", stage);
}

/// Rejects segments the engine cannot reason about.
pub fn validate_lines(lines: &[LineSegment]) -> EngineResult<()> {
    for line in lines {
        if let Some(bad) = [line.start, line.end].into_iter().find(|p| !p.is_finite()) {
            return Err(EngineError::NonFiniteCoordinate {
                id: line.id,
                x: bad.x,
                y: bad.y,
            });
        }
        if line.layer.trim().is_empty() {
            return Err(EngineError::MissingLayer { id: line.id });
        }
    }
    Ok(())
}

/// Runs the pipeline with `config`; see [`PickEngine::run`].
pub fn run(
    bend_lines: &[LineSegment],
    contour_lines: &[LineSegment],
    config: &PickConfig,
) -> EngineResult<PickPlan> {
    PickEngine::new(config.clone())?.run(bend_lines, contour_lines)
}
