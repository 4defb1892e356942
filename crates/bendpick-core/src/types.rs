//! Value types shared by every stage of the pick pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A point (or vector) in drawing coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(&self, other: &Point2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        (*self - *other).length()
    }

    /// Unit vector in the same direction, or `None` for a zero vector.
    pub fn normalize(&self) -> Option<Point2D> {
        let len = self.length();
        if len < 1e-12 || !len.is_finite() {
            return None;
        }
        Some(Point2D::new(self.x / len, self.y / len))
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point2D {
    type Output = Point2D;

    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2D {
    type Output = Point2D;

    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2D {
    type Output = Point2D;

    fn mul(self, rhs: f64) -> Point2D {
        Point2D::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for Point2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Opaque handle of a drawing entity.
///
/// The engine only carries it through to the emitted plan; the drawing layer
/// decides what the number means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Role of a line in the drawing, decided by classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineRole {
    /// Marks a fold of the part; drives pick placement.
    Bend,
    /// Part of the cut outline; candidate for trimming.
    Contour,
}

/// A straight drawing line together with its layer and entity handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Point2D,
    pub end: Point2D,
    pub layer: String,
    pub id: EntityId,
}

impl LineSegment {
    pub fn new(start: Point2D, end: Point2D, layer: impl Into<String>, id: EntityId) -> Self {
        Self {
            start,
            end,
            layer: layer.into(),
            id,
        }
    }

    pub fn direction(&self) -> Point2D {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.direction().length()
    }

    /// Point at parameter `t` (0 = start, 1 = end).
    pub fn point_at(&self, t: f64) -> Point2D {
        self.start + self.direction() * t
    }
}

/// Axis a colinear bend group runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The coordinate that varies along a line of this orientation.
    pub fn varying(&self, p: &Point2D) -> f64 {
        match self {
            Orientation::Horizontal => p.x,
            Orientation::Vertical => p.y,
        }
    }

    /// The coordinate that stays constant along a line of this orientation.
    pub fn fixed(&self, p: &Point2D) -> f64 {
        match self {
            Orientation::Horizontal => p.y,
            Orientation::Vertical => p.x,
        }
    }

    /// Builds a point from a varying and a fixed coordinate.
    pub fn compose(&self, varying: f64, fixed: f64) -> Point2D {
        match self {
            Orientation::Horizontal => Point2D::new(varying, fixed),
            Orientation::Vertical => Point2D::new(fixed, varying),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "horizontal"),
            Self::Vertical => write!(f, "vertical"),
        }
    }
}

/// Bend segments lying on one logical bend line.
#[derive(Debug, Clone, PartialEq)]
pub struct BendGroup {
    /// Indices into the bend-line slice the group was built from.
    pub member_indices: Vec<usize>,
    pub orientation: Orientation,
    /// Smallest varying coordinate over all member endpoints.
    pub coord_min: f64,
    /// Largest varying coordinate over all member endpoints.
    pub coord_max: f64,
    /// Shared fixed coordinate (Y for horizontal, X for vertical).
    pub fixed_coord: f64,
}

impl BendGroup {
    /// Midpoint of the group's span on its fixed coordinate.
    pub fn centroid(&self) -> Point2D {
        self.orientation
            .compose((self.coord_min + self.coord_max) / 2.0, self.fixed_coord)
    }

    pub fn span(&self) -> f64 {
        self.coord_max - self.coord_min
    }
}

/// How an intersection was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntersectionKind {
    /// The bend and contour segments cross.
    Crossing,
    /// A contour endpoint lies close to the bend (fillet or chamfer).
    Proximity,
}

/// A bend/contour meeting point before extremity filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct RawIntersection {
    pub point: Point2D,
    pub contour: LineSegment,
    /// Varying coordinate of `point` along the group axis.
    pub extremity_coord: f64,
    pub kind: IntersectionKind,
}

/// Which end of a bend group an intersection sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extremity {
    Min,
    Max,
}

/// Arc to insert as a pick mark. Angles are in degrees, counter-clockwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickSpec {
    pub center: Point2D,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub layer: String,
}

impl PickSpec {
    /// Opening of the arc folded into `[0, 180]`.
    pub fn span(&self) -> f64 {
        crate::geometry::angular_span(self.start_angle, self.end_angle)
    }
}

/// A point where a contour is cut, with its parameter along the contour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutPoint {
    pub point: Point2D,
    pub t: f64,
}

/// The stretch of a contour replaced by a pick arc.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimSpec {
    pub contour: LineSegment,
    /// Cut with the smaller parameter.
    pub cut1: CutPoint,
    /// Cut with the larger parameter.
    pub cut2: CutPoint,
}

/// Every pick touching one contour segment.
#[derive(Debug, Clone, PartialEq)]
pub struct PicksForContour {
    pub contour: LineSegment,
    pub picks: Vec<(PickSpec, TrimSpec)>,
}

impl PicksForContour {
    pub fn new(contour: LineSegment) -> Self {
        Self {
            contour,
            picks: Vec::new(),
        }
    }
}

/// A replacement line produced by trimming `source`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineInsertion {
    pub start: Point2D,
    pub end: Point2D,
    pub layer: String,
    /// The contour this line replaces; attributes other than the layer are
    /// copied from it by the caller.
    pub source: EntityId,
}
