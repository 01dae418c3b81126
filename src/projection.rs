// Copyright 2025 the Curvedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Render projections of the session.
//!
//! Nothing here is retained: a renderer asks for fresh views after every
//! change and draws them however it likes.

use crate::editing::{EditSession, ViewPort};
use crate::model::{AnchorPoint, CurveId, CurveModel, HandleKind, PointId};
use crate::path::Segment;
use kurbo::{BezPath, Point};

/// One drawable segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentView {
    pub curve: CurveId,
    pub start: PointId,
    pub end: PointId,
    /// Absolute design-space control points
    pub segment: Segment,
    /// Approximate arc length, for the segment label
    pub length: f64,
    /// Screen width of the invisible tap region
    pub hit_width: f64,
}

impl SegmentView {
    /// The segment in design space
    pub fn path(&self) -> BezPath {
        self.segment.to_bezpath()
    }

    /// The segment in screen space
    pub fn screen_path(&self, viewport: &ViewPort) -> BezPath {
        viewport.affine() * self.path()
    }

    /// Where to place the length label
    pub fn label_position(&self) -> Point {
        self.segment.eval(0.5)
    }
}

/// One drawable handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleView {
    pub point: PointId,
    pub kind: HandleKind,
    /// Absolute design-space position
    pub position: Point,
    /// The owning anchor, for tangent lines
    pub anchor: Point,
    /// Whether the owning point ends its curve
    pub is_last: bool,
}

/// Aggregates for a status display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusMetrics {
    pub curve_count: usize,
    pub point_count: usize,
    pub total_length: f64,
    pub delete_mode: bool,
}

/// Every segment of every curve, curves in id order
pub fn segments(model: &CurveModel, hit_width: f64) -> Vec<SegmentView> {
    model
        .segments()
        .map(|(a, b)| {
            let segment = Segment::between(a, b);
            SegmentView {
                curve: a.curve,
                start: a.id,
                end: b.id,
                segment,
                length: segment.arc_length(),
                hit_width,
            }
        })
        .collect()
}

/// Every handle to draw. Grow handles appear only on last points.
pub fn handles(model: &CurveModel) -> Vec<HandleView> {
    model
        .points()
        .iter()
        .flat_map(|point| point_handles(point, model.is_last(point.id)))
        .collect()
}

fn point_handles(point: &AnchorPoint, is_last: bool) -> impl Iterator<Item = HandleView> + '_ {
    HandleKind::ALL
        .into_iter()
        .filter(move |&kind| kind != HandleKind::Grow || is_last)
        .map(move |kind| HandleView {
            point: point.id,
            kind,
            position: point.handle_position(kind),
            anchor: point.position,
            is_last,
        })
}

pub fn status(session: &EditSession) -> StatusMetrics {
    StatusMetrics {
        curve_count: session.model.curve_count(),
        point_count: session.model.point_count(),
        total_length: session.model.total_length(),
        delete_mode: session.delete_mode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::segment_ops;
    use approx::assert_abs_diff_eq;

    const P1: PointId = PointId::new(1);

    #[test]
    fn single_point_has_no_segments() {
        let model = CurveModel::default();
        assert!(segments(&model, 30.0).is_empty());
        let kinds: Vec<HandleKind> = handles(&model).iter().map(|h| h.kind).collect();
        assert_eq!(kinds, HandleKind::ALL.to_vec());
    }

    #[test]
    fn segment_view_carries_controls_and_length() {
        let mut model = CurveModel::default();
        let second = segment_ops::grow_point(&mut model, P1).unwrap();
        let views = segments(&model, 30.0);
        assert_eq!(views.len(), 1);
        let view = views[0];
        assert_eq!((view.start, view.end), (P1, second));
        assert_eq!(view.segment.p0, Point::new(400.0, 400.0));
        assert_eq!(view.segment.p3, Point::new(400.0, 250.0));
        // Default growth gives a straight vertical segment
        assert_abs_diff_eq!(view.length, 150.0, epsilon = 1e-6);
        assert_abs_diff_eq!(view.label_position().y, 325.0, epsilon = 1e-9);
    }

    #[test]
    fn screen_path_applies_viewport() {
        let mut model = CurveModel::default();
        segment_ops::grow_point(&mut model, P1);
        let mut viewport = ViewPort::new();
        viewport.zoom_at(Point::ZERO, 2.0);
        let view = segments(&model, 30.0)[0];
        let bbox = kurbo::Shape::bounding_box(&view.screen_path(&viewport));
        assert_abs_diff_eq!(bbox.y0, 500.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bbox.y1, 800.0, epsilon = 1e-9);
    }

    #[test]
    fn only_last_points_show_grow_handles() {
        let mut model = CurveModel::default();
        segment_ops::grow_point(&mut model, P1);
        let views = handles(&model);
        assert_eq!(views.len(), 7);
        let grow: Vec<&HandleView> = views.iter().filter(|h| h.kind == HandleKind::Grow).collect();
        assert_eq!(grow.len(), 1);
        assert_eq!(grow[0].point, PointId::new(2));
        assert!(grow[0].is_last);
        assert!(views.iter().filter(|h| h.point == P1).all(|h| !h.is_last));
    }

    #[test]
    fn status_counts_curves_and_points() {
        let mut session = EditSession::default();
        segment_ops::grow_point(&mut session.model, P1);
        session.model.add_curve(Point::ZERO);
        session.toggle_delete_mode();
        let metrics = status(&session);
        assert_eq!(metrics.curve_count, 2);
        assert_eq!(metrics.point_count, 3);
        assert_abs_diff_eq!(metrics.total_length, 150.0, epsilon = 1e-6);
        assert!(metrics.delete_mode);
    }
}
