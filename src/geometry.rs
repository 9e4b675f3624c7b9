//! Parametric curves used as lane geometry: straight segments and circular
//! arcs, plus the small vector type they are built from.
//!
//! Every curve is arc-length parameterized: `interpolate(s)` for
//! `s` in `[0, length]` returns the point and tangent bearing at that
//! distance along the curve, with `interpolate(0)` at `start` and
//! `interpolate(length)` at `end`.

use std::f64::consts::PI;
use std::ops::{Add, Mul, Sub};

/// A point (or free vector) in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self - other).norm()
    }

    #[must_use]
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[must_use]
    pub fn approx_eq(self, other: Self, epsilon: f64) -> bool {
        self.distance(other) <= epsilon
    }
}

impl Add for Point2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Point2 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

/// Unit vector for bearing `b`, where `b = 0` points along `+y` and
/// `b = PI/2` points along `+x` (bearing increases clockwise).
#[must_use]
pub fn forward(bearing: f64) -> Point2 {
    Point2::new(bearing.sin(), bearing.cos())
}

/// Unit vector 90 degrees clockwise of `forward(bearing)`. Doubles as the
/// outward radial direction for an arc whose tangent bearing is `bearing`
/// at the point in question.
#[must_use]
pub fn normal(bearing: f64) -> Point2 {
    Point2::new(-bearing.cos(), bearing.sin())
}

/// A curve that a vehicle can travel along: arc-length parameterized,
/// `length` non-negative, `interpolate` defined on `[0, length]`.
pub trait Curve {
    fn start(&self) -> Point2;
    fn end(&self) -> Point2;
    fn length(&self) -> f64;

    /// Point and tangent bearing at distance `s` along the curve.
    fn interpolate(&self, s: f64) -> (Point2, f64);
}

/// A straight segment starting at `start`, heading along `bearing`, for
/// `length` units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StraightLane {
    pub start: Point2,
    pub bearing: f64,
    pub length: f64,
}

impl StraightLane {
    #[must_use]
    pub const fn new(start: Point2, bearing: f64, length: f64) -> Self {
        Self {
            start,
            bearing,
            length,
        }
    }
}

impl Curve for StraightLane {
    fn start(&self) -> Point2 {
        self.start
    }

    fn end(&self) -> Point2 {
        self.interpolate(self.length).0
    }

    fn length(&self) -> f64 {
        self.length
    }

    fn interpolate(&self, s: f64) -> (Point2, f64) {
        (self.start + forward(self.bearing) * s, self.bearing)
    }
}

/// Rotation sense of an [`ArcLane`]: whether the tangent bearing increases
/// or decreases with arc length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Clockwise,
    CounterClockwise,
}

impl Sense {
    const fn sign(self) -> f64 {
        match self {
            Self::Clockwise => 1.0,
            Self::CounterClockwise => -1.0,
        }
    }
}

/// A circular arc of constant radius about `focus`.
///
/// `start_angle` is the angle (in the same convention as bearing) such that
/// `focus + radius * normal(start_angle)` is the arc's start point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcLane {
    pub focus: Point2,
    pub radius: f64,
    pub start_angle: f64,
    pub angular_length: f64,
    pub sense: Sense,
}

impl ArcLane {
    #[must_use]
    pub const fn new(
        focus: Point2,
        radius: f64,
        start_angle: f64,
        angular_length: f64,
        sense: Sense,
    ) -> Self {
        Self {
            focus,
            radius,
            start_angle,
            angular_length,
            sense,
        }
    }
}

impl Curve for ArcLane {
    fn start(&self) -> Point2 {
        self.interpolate(0.0).0
    }

    fn end(&self) -> Point2 {
        self.interpolate(self.length()).0
    }

    fn length(&self) -> f64 {
        self.radius * self.angular_length
    }

    fn interpolate(&self, s: f64) -> (Point2, f64) {
        let phi = s / self.radius;
        let theta = self.start_angle + self.sense.sign() * phi;
        let point = self.focus + normal(theta) * self.radius;
        let bearing = match self.sense {
            Sense::Clockwise => theta,
            Sense::CounterClockwise => theta + PI,
        };
        (point, bearing)
    }
}

/// A lane's geometry: either a straight segment or a circular arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lane {
    Straight(StraightLane),
    Arc(ArcLane),
}

impl Curve for Lane {
    fn start(&self) -> Point2 {
        match self {
            Self::Straight(l) => l.start(),
            Self::Arc(l) => l.start(),
        }
    }

    fn end(&self) -> Point2 {
        match self {
            Self::Straight(l) => l.end(),
            Self::Arc(l) => l.end(),
        }
    }

    fn length(&self) -> f64 {
        match self {
            Self::Straight(l) => l.length(),
            Self::Arc(l) => l.length(),
        }
    }

    fn interpolate(&self, s: f64) -> (Point2, f64) {
        match self {
            Self::Straight(l) => l.interpolate(s),
            Self::Arc(l) => l.interpolate(s),
        }
    }
}

impl From<StraightLane> for Lane {
    fn from(l: StraightLane) -> Self {
        Self::Straight(l)
    }
}

impl From<ArcLane> for Lane {
    fn from(l: ArcLane) -> Self {
        Self::Arc(l)
    }
}
