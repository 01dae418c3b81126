// Copyright 2025 the Curvedit Authors
// SPDX-License-Identifier: Apache-2.0

//! A single cubic segment between two adjacent anchors.

use crate::model::AnchorPoint;
use crate::settings::sampling;
use kurbo::{BezPath, CubicBez, ParamCurveNearest, Point};

/// Accuracy used when projecting a point onto a segment
const NEAREST_ACCURACY: f64 = 1e-3;

/// Start point, two absolute control points and end point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl Segment {
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// The segment from `start` to `end`, using the outgoing tangent of
    /// `start` and the incoming tangent of `end`.
    pub fn between(start: &AnchorPoint, end: &AnchorPoint) -> Self {
        Self {
            p0: start.position,
            p1: start.right_control(),
            p2: end.left_control(),
            p3: end.position,
        }
    }

    /// Evaluate the cubic Bernstein blend at `t`
    pub fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let b0 = mt * mt * mt;
        let b1 = 3.0 * mt * mt * t;
        let b2 = 3.0 * mt * t * t;
        let b3 = t * t * t;
        Point::new(
            b0 * self.p0.x + b1 * self.p1.x + b2 * self.p2.x + b3 * self.p3.x,
            b0 * self.p0.y + b1 * self.p1.y + b2 * self.p2.y + b3 * self.p3.y,
        )
    }

    /// `samples` points at `t = i / samples` for `i` in `0..samples`.
    ///
    /// The end point is not included, so consecutive segments of a curve
    /// can be chained without duplicating shared anchors.
    pub fn sample(&self, samples: usize) -> impl Iterator<Item = Point> + '_ {
        let n = samples.max(1);
        (0..n).map(move |i| self.eval(i as f64 / n as f64))
    }

    /// Approximate arc length with the default sample count
    pub fn arc_length(&self) -> f64 {
        self.arc_length_with(sampling::LENGTH)
    }

    /// Sum of chord lengths between `samples + 1` evenly spaced points
    pub fn arc_length_with(&self, samples: usize) -> f64 {
        let n = samples.max(1);
        let mut length = 0.0;
        let mut prev = self.p0;
        for i in 1..=n {
            let next = self.eval(i as f64 / n as f64);
            length += prev.distance(next);
            prev = next;
        }
        length
    }

    pub fn to_cubic(&self) -> CubicBez {
        CubicBez::new(self.p0, self.p1, self.p2, self.p3)
    }

    pub fn to_bezpath(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.p0);
        path.curve_to(self.p1, self.p2, self.p3);
        path
    }

    /// Distance from `pt` to the closest point on the curve, with that
    /// point's parameter
    pub fn nearest(&self, pt: Point) -> (f64, f64) {
        let hit = self.to_cubic().nearest(pt, NEAREST_ACCURACY);
        (hit.distance_sq.sqrt(), hit.t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use kurbo::ParamCurve;

    fn wavy() -> Segment {
        Segment::new(
            Point::new(10.0, 20.0),
            Point::new(-40.0, 300.0),
            Point::new(250.0, -90.0),
            Point::new(180.0, 60.0),
        )
    }

    #[test]
    fn endpoints_match_anchors() {
        let configs = [
            wavy(),
            Segment::new(Point::ZERO, Point::ZERO, Point::ZERO, Point::new(5.0, 5.0)),
            Segment::new(
                Point::new(-3.0, 7.5),
                Point::new(1e4, -1e4),
                Point::new(-1e4, 1e4),
                Point::new(2.0, 2.0),
            ),
        ];
        for seg in configs {
            assert_eq!(seg.eval(0.0), seg.p0);
            assert_abs_diff_eq!(seg.eval(1.0).x, seg.p3.x, epsilon = 1e-9);
            assert_abs_diff_eq!(seg.eval(1.0).y, seg.p3.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn eval_agrees_with_kurbo() {
        let seg = wavy();
        let cubic = seg.to_cubic();
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let ours = seg.eval(t);
            let theirs = cubic.eval(t);
            assert_abs_diff_eq!(ours.x, theirs.x, epsilon = 1e-9);
            assert_abs_diff_eq!(ours.y, theirs.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn straight_segment_length_is_chord() {
        let seg = Segment::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(200.0, 0.0),
            Point::new(300.0, 0.0),
        );
        assert_abs_diff_eq!(seg.arc_length(), 300.0, epsilon = 1e-9);
    }

    #[test]
    fn length_is_at_least_chord_and_converges() {
        let seg = wavy();
        let chord = seg.p0.distance(seg.p3);
        let coarse = seg.arc_length_with(10);
        let fine = seg.arc_length_with(100);
        let finer = seg.arc_length_with(1000);
        assert!(coarse >= chord);
        assert!(coarse <= fine && fine <= finer);
        assert!((finer - fine) < (fine - coarse));
    }

    #[test]
    fn sample_excludes_end() {
        let seg = wavy();
        let pts: Vec<Point> = seg.sample(4).collect();
        assert_eq!(pts.len(), 4);
        assert_eq!(pts[0], seg.p0);
        assert_eq!(pts[2], seg.eval(0.5));
    }

    #[test]
    fn nearest_on_straight_segment() {
        let seg = Segment::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(200.0, 0.0),
            Point::new(300.0, 0.0),
        );
        let (dist, t) = seg.nearest(Point::new(150.0, 12.0));
        assert_abs_diff_eq!(dist, 12.0, epsilon = 1e-3);
        assert_abs_diff_eq!(t, 0.5, epsilon = 1e-3);
    }

    #[test]
    fn bezpath_has_one_curve() {
        let path = wavy().to_bezpath();
        assert_eq!(path.elements().len(), 2);
    }
}
