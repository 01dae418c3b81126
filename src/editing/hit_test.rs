// Copyright 2025 the Curvedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Hit testing for hosts without element identity.
//!
//! Handles are picked in screen space so the pick radius does not change
//! with zoom. Segments are measured in design space against the curve
//! itself, with the screen-space hit stroke converted through the zoom.

use super::pointer::PointerTarget;
use super::session::EditSession;
use crate::model::{HandleKind, PointId};
use crate::path::Segment;
use kurbo::Point;

/// Result of a hit test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTestResult<T> {
    pub entity: T,
    /// Distance from the query position, in the space that was searched
    pub distance: f64,
}

/// A segment under the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    pub start: PointId,
    pub end: PointId,
    /// Curve parameter of the nearest point
    pub t: f64,
    /// Design-space distance to the curve
    pub distance: f64,
}

/// Closest candidate within `max_dist` of `pos`.
///
/// On equal distances the earlier candidate wins.
pub fn find_closest<T>(
    pos: Point,
    candidates: impl Iterator<Item = (T, Point)>,
    max_dist: f64,
) -> Option<HitTestResult<T>> {
    let mut best: Option<HitTestResult<T>> = None;
    for (entity, candidate) in candidates {
        let distance = pos.distance(candidate);
        if distance > max_dist {
            continue;
        }
        if best.as_ref().is_none_or(|b| distance < b.distance) {
            best = Some(HitTestResult { entity, distance });
        }
    }
    best
}

impl EditSession {
    /// Every visible handle with its screen position.
    ///
    /// The grow handle is only offered on the last point of each curve.
    pub fn handle_candidates(&self) -> Vec<((PointId, HandleKind), Point)> {
        self.model
            .points()
            .iter()
            .flat_map(|point| {
                let is_last = self.model.is_last(point.id);
                HandleKind::ALL
                    .into_iter()
                    .filter(move |&kind| kind != HandleKind::Grow || is_last)
                    .map(move |kind| {
                        let screen = self.viewport.to_screen(point.handle_position(kind));
                        ((point.id, kind), screen)
                    })
            })
            .collect()
    }

    /// The handle closest to `screen_pos` within the pick radius
    pub fn hit_test_handle(
        &self,
        screen_pos: Point,
    ) -> Option<HitTestResult<(PointId, HandleKind)>> {
        let result = find_closest(
            screen_pos,
            self.handle_candidates().into_iter(),
            self.settings.handle_pick_radius,
        );
        if let Some(hit) = &result {
            tracing::debug!(
                "[hit_test_handle] {:?} of point {} at distance {:.2}",
                hit.entity.1,
                hit.entity.0,
                hit.distance
            );
        }
        result
    }

    /// The segment whose curve passes within half the hit stroke of
    /// `screen_pos`
    pub fn hit_test_segment(&self, screen_pos: Point) -> Option<SegmentHit> {
        let design_pos = self.viewport.screen_to_design(screen_pos);
        let max_dist = self.settings.hit_stroke_width / 2.0 / self.viewport.zoom;

        let mut closest: Option<SegmentHit> = None;
        for (a, b) in self.model.segments() {
            let (distance, t) = Segment::between(a, b).nearest(design_pos);
            if distance > max_dist {
                continue;
            }
            if closest.is_none_or(|c| distance < c.distance) {
                closest = Some(SegmentHit {
                    start: a.id,
                    end: b.id,
                    t,
                    distance,
                });
            }
        }
        closest
    }

    /// What a pointer at `screen_pos` is over.
    ///
    /// Handles sit above segments, so a handle hit wins.
    pub fn target_at(&self, screen_pos: Point) -> PointerTarget {
        if let Some(hit) = self.hit_test_handle(screen_pos) {
            let (point, kind) = hit.entity;
            return PointerTarget::Handle { point, kind };
        }
        match self.hit_test_segment(screen_pos) {
            Some(hit) => PointerTarget::Segment {
                start: hit.start,
                end: hit.end,
            },
            None => PointerTarget::Background,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::segment_ops;
    use approx::assert_abs_diff_eq;
    use kurbo::Vec2;

    const P1: PointId = PointId::new(1);

    /// Two points, (0,0) and (300,0), joined by a straight segment
    fn straight_session() -> EditSession {
        let mut session = EditSession::default();
        let second = segment_ops::grow_point(&mut session.model, P1).unwrap();
        session.model.mutate_point(P1, |p| p.position = Point::ZERO);
        session
            .model
            .mutate_point(second, |p| p.position = Point::new(300.0, 0.0));
        segment_ops::straighten_segment(&mut session.model, P1, second);
        session
    }

    #[test]
    fn find_closest_respects_max_dist() {
        let candidates = vec![(1, Point::new(10.0, 0.0)), (2, Point::new(3.0, 4.0))];
        let hit = find_closest(Point::ZERO, candidates.clone().into_iter(), 6.0).unwrap();
        assert_eq!(hit.entity, 2);
        assert_eq!(hit.distance, 5.0);
        assert!(find_closest(Point::ZERO, candidates.into_iter(), 4.0).is_none());
    }

    #[test]
    fn find_closest_prefers_first_on_tie() {
        let candidates = vec![('a', Point::new(1.0, 0.0)), ('b', Point::new(0.0, 1.0))];
        let hit = find_closest(Point::ZERO, candidates.into_iter(), 2.0).unwrap();
        assert_eq!(hit.entity, 'a');
    }

    #[test]
    fn grow_handle_only_on_last_point() {
        let session = straight_session();
        let kinds: Vec<(PointId, HandleKind)> = session
            .handle_candidates()
            .into_iter()
            .map(|(e, _)| e)
            .filter(|(_, kind)| *kind == HandleKind::Grow)
            .collect();
        assert_eq!(kinds, vec![(PointId::new(2), HandleKind::Grow)]);
    }

    #[test]
    fn handle_pick_uses_screen_radius() {
        let mut session = EditSession::default();
        session.viewport.zoom_at(Point::ZERO, 2.0);
        // Anchor at (400,400) is drawn at (800,800)
        let hit = session.hit_test_handle(Point::new(808.0, 800.0)).unwrap();
        assert_eq!(hit.entity, (P1, HandleKind::Main));
        assert!(session.hit_test_handle(Point::new(820.0, 800.0)).is_none());
    }

    #[test]
    fn segment_hit_within_half_stroke() {
        let session = straight_session();
        let hit = session.hit_test_segment(Point::new(150.0, 14.0)).unwrap();
        assert_eq!((hit.start, hit.end), (P1, PointId::new(2)));
        assert_abs_diff_eq!(hit.t, 0.5, epsilon = 1e-3);
        assert!(session.hit_test_segment(Point::new(150.0, 16.0)).is_none());
    }

    #[test]
    fn segment_hit_width_is_constant_on_screen() {
        let mut session = straight_session();
        session.viewport.zoom_at(Point::ZERO, 2.0);
        // The chord is now drawn from (0,0) to (600,0)
        assert!(session.hit_test_segment(Point::new(300.0, 14.0)).is_some());
        assert!(session.hit_test_segment(Point::new(300.0, 16.0)).is_none());
    }

    #[test]
    fn target_prefers_handles_over_segments() {
        let session = straight_session();
        assert_eq!(
            session.target_at(Point::new(2.0, 1.0)),
            PointerTarget::Handle {
                point: P1,
                kind: HandleKind::Main
            }
        );
        assert_eq!(
            session.target_at(Point::new(150.0, 5.0)),
            PointerTarget::Segment {
                start: P1,
                end: PointId::new(2)
            }
        );
        assert_eq!(
            session.target_at(Point::new(150.0, 200.0)),
            PointerTarget::Background
        );
    }

    #[test]
    fn handle_follows_its_offset() {
        let mut session = EditSession::default();
        session
            .model
            .mutate_point(P1, |p| p.left = Vec2::new(-40.0, 0.0));
        let hit = session.hit_test_handle(Point::new(361.0, 400.0)).unwrap();
        assert_eq!(hit.entity, (P1, HandleKind::Left));
    }
}
