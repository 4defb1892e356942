//! DXF drawing access
//!
//! Reads the `LINE` entities of a drawing into engine segments and writes a
//! [`PickPlan`] back as `ARC`/`LINE` entities. An [`EntityId`] is the
//! position of the entity in the drawing's entity list.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use dxf::entities::{Arc, Entity, EntityType, Line};
use dxf::{Color, Drawing, Point};
use tracing::{debug, warn};

use bendpick_core::{
    run, ClassificationRules, EntityId, LineRole, LineSegment, PickConfig, PickPlan, PickSummary,
    Point2D,
};

use crate::error::PickFileResult;

/// Classified lines of one drawing.
#[derive(Debug, Clone, Default)]
pub struct CollectedLines {
    pub bend: Vec<LineSegment>,
    pub contour: Vec<LineSegment>,
}

/// What [`PickDrawing::apply`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppliedChanges {
    pub arcs_added: usize,
    pub lines_added: usize,
    pub entities_removed: usize,
}

/// A DXF drawing being given pick marks.
pub struct PickDrawing {
    drawing: Drawing,
}

fn to_point(p: Point2D) -> Point {
    Point::new(p.x, p.y, 0.0)
}

impl PickDrawing {
    /// Load a drawing from a DXF file
    pub fn load(path: &Path) -> PickFileResult<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let drawing = Drawing::load(&mut reader)?;
        debug!("Loaded {} ({} entities)", path.display(), drawing.entities().count());
        Ok(Self { drawing })
    }

    pub fn from_drawing(drawing: Drawing) -> Self {
        Self { drawing }
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    pub fn into_drawing(self) -> Drawing {
        self.drawing
    }

    /// Write the drawing to a DXF file
    pub fn save(&self, path: &Path) -> PickFileResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.drawing.save(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Model-space `LINE` entities sorted into bend and contour lines.
    ///
    /// Lines matching neither rule are left alone.
    pub fn collect_lines(&self, rules: &ClassificationRules) -> CollectedLines {
        let mut lines = CollectedLines::default();

        for (index, entity) in self.drawing.entities().enumerate() {
            if entity.common.is_in_paper_space {
                continue;
            }
            let EntityType::Line(line) = &entity.specific else {
                continue;
            };

            let layer = &entity.common.layer;
            let Some(role) = rules.classify(layer, entity.common.color.index()) else {
                continue;
            };

            let segment = LineSegment::new(
                Point2D::new(line.p1.x, line.p1.y),
                Point2D::new(line.p2.x, line.p2.y),
                layer.clone(),
                EntityId(index as u64),
            );
            match role {
                LineRole::Bend => lines.bend.push(segment),
                LineRole::Contour => lines.contour.push(segment),
            }
        }

        debug!(
            "Collected {} bend lines, {} contour lines",
            lines.bend.len(),
            lines.contour.len()
        );
        lines
    }

    /// Writes `plan` into the drawing.
    ///
    /// Arcs and replacement lines are appended first, then the replaced
    /// contours are removed from the highest position down so the positions
    /// recorded in the plan stay valid.
    pub fn apply(&mut self, plan: &PickPlan) -> AppliedChanges {
        let colors: HashMap<EntityId, Color> = self
            .drawing
            .entities()
            .enumerate()
            .map(|(index, entity)| (EntityId(index as u64), entity.common.color.clone()))
            .collect();

        let mut changes = AppliedChanges::default();

        for pick in &plan.arcs {
            let arc = Arc::new(to_point(pick.center), pick.radius, pick.start_angle, pick.end_angle);
            let mut entity = Entity::new(EntityType::Arc(arc));
            entity.common.layer = pick.layer.clone();
            self.drawing.add_entity(entity);
            changes.arcs_added += 1;
        }

        for insertion in &plan.lines {
            let line = Line::new(to_point(insertion.start), to_point(insertion.end));
            let mut entity = Entity::new(EntityType::Line(line));
            entity.common.layer = insertion.layer.clone();
            if let Some(color) = colors.get(&insertion.source) {
                entity.common.color = color.clone();
            }
            self.drawing.add_entity(entity);
            changes.lines_added += 1;
        }

        let mut deletions = plan.deletions.clone();
        deletions.sort_unstable_by(|a, b| b.cmp(a));
        deletions.dedup();
        for id in deletions {
            if self.drawing.remove_entity(id.0 as usize).is_some() {
                changes.entities_removed += 1;
            } else {
                warn!("Contour {} not found, left in place", id);
            }
        }

        changes
    }

    /// Collects lines, runs the pick pipeline and applies the result.
    pub fn add_picks(
        &mut self,
        rules: &ClassificationRules,
        config: &PickConfig,
    ) -> PickFileResult<PickSummary> {
        let lines = self.collect_lines(rules);
        let plan = run(&lines.bend, &lines.contour, config)?;
        let changes = self.apply(&plan);
        debug!(
            "Applied {} arcs, {} lines, removed {} contours",
            changes.arcs_added, changes.lines_added, changes.entities_removed
        );
        Ok(plan.summary)
    }
}
