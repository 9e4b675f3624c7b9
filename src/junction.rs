//! Junction variants: labeled collections of lanes belonging to the same
//! road element, plus the priority relation between lanes at composite
//! junctions (e.g. a T-junction's main road has unconditional right of way
//! over the turning lanes).
//!
//! Polymorphism here is a tagged union (`Junction`) rather than a trait
//! object: junctions compose by value (`Tee` owns a `Road` and two `Arc`s),
//! with no back-references or shared mutable state.

use std::f64::consts::PI;

use crate::geometry::{ArcLane, Curve, Lane, Point2, Sense, StraightLane};

/// A two-lane straight road: `a` runs forward from `origin`, `b` runs
/// backward, offset by `lane_separation`.
#[derive(Debug, Clone, PartialEq)]
pub struct Road {
    pub origin: Point2,
    pub bearing: f64,
    pub road_length: f64,
    pub lane_separation: f64,
    a: Lane,
    b: Lane,
}

impl Road {
    pub const LANE_LABELS: [&'static str; 2] = ["a", "b"];

    #[must_use]
    pub fn new(origin: Point2, bearing: f64, road_length: f64, lane_separation: f64) -> Self {
        let a = StraightLane::new(origin, bearing, road_length);
        let b_start = a.end() + crate::geometry::normal(bearing) * lane_separation;
        let b = StraightLane::new(b_start, bearing + PI, road_length);
        Self {
            origin,
            bearing,
            road_length,
            lane_separation,
            a: a.into(),
            b: b.into(),
        }
    }

    #[must_use]
    pub fn lane(&self, label: &str) -> Option<&Lane> {
        match label {
            "a" => Some(&self.a),
            "b" => Some(&self.b),
            _ => None,
        }
    }
}

/// Two concentric arcs running in opposite directions: `a` is the inner
/// lane (radius `arc_radius`), `b` the outer (radius `arc_radius +
/// lane_separation`).
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub origin: Point2,
    pub bearing: f64,
    pub arc_length: f64,
    pub arc_radius: f64,
    pub lane_separation: f64,
    a: Lane,
    b: Lane,
}

impl Arc {
    pub const LANE_LABELS: [&'static str; 2] = ["a", "b"];

    #[must_use]
    pub fn new(
        origin: Point2,
        bearing: f64,
        arc_length: f64,
        arc_radius: f64,
        lane_separation: f64,
    ) -> Self {
        let focus = origin - crate::geometry::normal(bearing) * arc_radius;
        let a = ArcLane::new(focus, arc_radius, bearing, arc_length, Sense::Clockwise);
        let b = ArcLane::new(
            focus,
            arc_radius + lane_separation,
            bearing + arc_length,
            arc_length,
            Sense::CounterClockwise,
        );
        Self {
            origin,
            bearing,
            arc_length,
            arc_radius,
            lane_separation,
            a: a.into(),
            b: b.into(),
        }
    }

    #[must_use]
    pub fn lane(&self, label: &str) -> Option<&Lane> {
        match label {
            "a" => Some(&self.a),
            "b" => Some(&self.b),
            _ => None,
        }
    }
}

/// A T-junction: a main road (`a`, `b`) with two right-angle turning arcs
/// (`c`..`f`) splicing in a side road. The main road has unconditional
/// right of way.
#[derive(Debug, Clone, PartialEq)]
pub struct Tee {
    pub origin: Point2,
    pub main_road_bearing: f64,
    pub main_road_length: f64,
    pub lane_separation: f64,
    main_road: Road,
    branch_a: Arc,
    branch_b: Arc,
}

impl Tee {
    pub const LANE_LABELS: [&'static str; 6] = ["a", "b", "c", "d", "e", "f"];

    #[must_use]
    pub fn new(
        origin: Point2,
        main_road_bearing: f64,
        main_road_length: f64,
        lane_separation: f64,
    ) -> Self {
        let main_road = Road::new(origin, main_road_bearing, main_road_length, lane_separation);
        let branch_radius = (main_road_length - lane_separation) / 2.0;
        let branch_a = Arc::new(
            origin,
            main_road_bearing,
            PI / 2.0,
            branch_radius,
            lane_separation,
        );
        let branch_b = Arc::new(
            branch_a.lane("b").expect("arc always has lane b").start(),
            main_road_bearing - PI / 2.0,
            PI / 2.0,
            branch_radius,
            lane_separation,
        );
        Self {
            origin,
            main_road_bearing,
            main_road_length,
            lane_separation,
            main_road,
            branch_a,
            branch_b,
        }
    }

    #[must_use]
    pub fn lane(&self, label: &str) -> Option<&Lane> {
        match label {
            "a" => self.main_road.lane("a"),
            "b" => self.main_road.lane("b"),
            "c" => self.branch_a.lane("a"),
            "d" => self.branch_a.lane("b"),
            "e" => self.branch_b.lane("a"),
            "f" => self.branch_b.lane("b"),
            _ => None,
        }
    }

    /// Lanes in the same junction that have right of way over `label`.
    /// The main road (`a`, `b`, `c`) never yields to anything within the
    /// junction.
    #[must_use]
    pub fn priority_over_lane(label: &str) -> &'static [&'static str] {
        match label {
            "d" => &["a", "b", "f"],
            "e" => &["a"],
            "f" => &["a", "c"],
            _ => &[],
        }
    }
}

/// A labeled collection of lanes belonging to the same road element.
#[derive(Debug, Clone, PartialEq)]
pub enum Junction {
    Road(Road),
    Arc(Arc),
    Tee(Tee),
}

impl Junction {
    /// Lowercased type name, used to synthesize default junction labels
    /// (`road1`, `arc1`, `tee1`, ...).
    #[must_use]
    pub fn type_prefix(&self) -> &'static str {
        match self {
            Self::Road(_) => "road",
            Self::Arc(_) => "arc",
            Self::Tee(_) => "tee",
        }
    }

    #[must_use]
    pub fn lane_labels(&self) -> &'static [&'static str] {
        match self {
            Self::Road(_) => &Road::LANE_LABELS,
            Self::Arc(_) => &Arc::LANE_LABELS,
            Self::Tee(_) => &Tee::LANE_LABELS,
        }
    }

    #[must_use]
    pub fn lane(&self, label: &str) -> Option<&Lane> {
        match self {
            Self::Road(j) => j.lane(label),
            Self::Arc(j) => j.lane(label),
            Self::Tee(j) => j.lane(label),
        }
    }

    /// Lanes in the same junction with right of way over `label`. Empty for
    /// `Road` and `Arc` junctions, which have no internal priorities.
    #[must_use]
    pub fn priority_over_lane(&self, label: &str) -> &'static [&'static str] {
        match self {
            Self::Road(_) | Self::Arc(_) => &[],
            Self::Tee(_) => Tee::priority_over_lane(label),
        }
    }
}

impl From<Road> for Junction {
    fn from(j: Road) -> Self {
        Self::Road(j)
    }
}

impl From<Arc> for Junction {
    fn from(j: Arc) -> Self {
        Self::Arc(j)
    }
}

impl From<Tee> for Junction {
    fn from(j: Tee) -> Self {
        Self::Tee(j)
    }
}
