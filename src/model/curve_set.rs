// Copyright 2025 the Curvedit Authors
// SPDX-License-Identifier: Apache-2.0

//! The curve model: every anchor point in the document and the curves they
//! form.
//!
//! Points live in one flat list ordered by id. A curve is not a stored
//! object; it is the id-ordered run of points sharing a `CurveId`, so facts
//! like "which point is last" or "how many curves exist" are always derived
//! from membership and never cached. All mutation goes through the methods
//! here, which keep two invariants:
//!
//! - the point list stays sorted by id (new points always get the largest
//!   id, and nothing reorders them);
//! - no live curve has fewer than one point, and a curve left with a single
//!   point by a split is removed.

use super::entity_id::{CurveId, IdAllocator, PointId};
use super::point::{AnchorPoint, HandleDefaults};
use crate::path::{Segment, measure};
use crate::settings::{Settings, sampling};
use kurbo::{Point, Vec2};
use std::collections::{BTreeMap, BTreeSet};

/// Id of the first point and first curve after construction or reset
const FIRST_ID: u64 = 1;

/// Offsets of a point being appended to a curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewPoint {
    pub position: Point,
    pub left: Vec2,
    pub right: Vec2,
    pub grow: Vec2,
}

/// All points and curves of the document
#[derive(Debug, Clone)]
pub struct CurveModel {
    points: Vec<AnchorPoint>,
    point_ids: IdAllocator<PointId>,
    curve_ids: IdAllocator<CurveId>,
    defaults: HandleDefaults,
    initial_position: Point,
}

impl CurveModel {
    /// Create a model holding the single default point
    pub fn new(defaults: HandleDefaults, initial_position: Point) -> Self {
        let mut model = Self {
            points: Vec::new(),
            point_ids: IdAllocator::starting_at(FIRST_ID),
            curve_ids: IdAllocator::starting_at(FIRST_ID),
            defaults,
            initial_position,
        };
        model.seed();
        model
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            HandleDefaults::from_settings(settings),
            settings.initial_position(),
        )
    }

    fn seed(&mut self) {
        let id = self.point_ids.allocate();
        let curve = self.curve_ids.allocate();
        self.points.push(AnchorPoint::new(
            id,
            curve,
            self.initial_position,
            &self.defaults,
        ));
    }

    // ===== Queries =====

    /// All points in id order
    pub fn points(&self) -> &[AnchorPoint] {
        &self.points
    }

    pub fn point(&self, id: PointId) -> Option<&AnchorPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn defaults(&self) -> &HandleDefaults {
        &self.defaults
    }

    /// Ids of all live curves, ascending
    pub fn curve_ids(&self) -> Vec<CurveId> {
        let ids: BTreeSet<CurveId> = self.points.iter().map(|p| p.curve).collect();
        ids.into_iter().collect()
    }

    pub fn curve_count(&self) -> usize {
        self.points
            .iter()
            .map(|p| p.curve)
            .collect::<BTreeSet<_>>()
            .len()
    }

    pub fn contains_curve(&self, curve: CurveId) -> bool {
        self.points.iter().any(|p| p.curve == curve)
    }

    /// Points of one curve in id order
    pub fn curve_points(&self, curve: CurveId) -> Vec<&AnchorPoint> {
        self.points.iter().filter(|p| p.curve == curve).collect()
    }

    /// Every curve with its points, curves ordered by id
    pub fn curves(&self) -> BTreeMap<CurveId, Vec<&AnchorPoint>> {
        let mut curves: BTreeMap<CurveId, Vec<&AnchorPoint>> = BTreeMap::new();
        for point in &self.points {
            curves.entry(point.curve).or_default().push(point);
        }
        curves
    }

    /// The point with the greatest id in a curve
    pub fn last_point(&self, curve: CurveId) -> Option<&AnchorPoint> {
        self.points.iter().rev().find(|p| p.curve == curve)
    }

    /// Whether `id` is the last point of its curve
    pub fn is_last(&self, id: PointId) -> bool {
        self.point(id)
            .and_then(|p| self.last_point(p.curve))
            .is_some_and(|last| last.id == id)
    }

    /// The point following `id` in its curve
    pub fn successor(&self, id: PointId) -> Option<&AnchorPoint> {
        let point = self.point(id)?;
        self.points
            .iter()
            .find(|p| p.curve == point.curve && p.id > id)
    }

    /// Every adjacent point pair, curve by curve
    pub fn segments(&self) -> impl Iterator<Item = (&AnchorPoint, &AnchorPoint)> + '_ {
        self.curves()
            .into_values()
            .flat_map(|points| points.windows(2).map(|w| (w[0], w[1])).collect::<Vec<_>>())
    }

    // ===== Measurements =====

    /// Sum of the approximate arc lengths of every segment
    pub fn total_length(&self) -> f64 {
        self.segments()
            .map(|(a, b)| Segment::between(a, b).arc_length_with(sampling::LENGTH))
            .sum()
    }

    /// Area enclosed by a curve closed back to its first point
    pub fn curve_area(&self, curve: CurveId) -> Option<f64> {
        let points = self.curve_points(curve);
        (points.len() >= 2).then(|| measure::enclosed_area(&points))
    }

    /// Volume of the solid swept by revolving the curve's profile
    pub fn curve_volume(&self, curve: CurveId) -> Option<f64> {
        let points = self.curve_points(curve);
        (points.len() >= 2).then(|| measure::revolved_volume(&points))
    }

    // ===== Mutation =====

    /// Start a new single-point curve at `position`
    pub fn add_curve(&mut self, position: Point) -> CurveId {
        let id = self.point_ids.allocate();
        let curve = self.curve_ids.allocate();
        self.points
            .push(AnchorPoint::new(id, curve, position, &self.defaults));
        tracing::info!("Added curve {} with point {} at {:?}", curve, id, position);
        curve
    }

    /// Append a point to the tail of `curve`.
    ///
    /// The new point gets an id larger than every existing one, which makes
    /// it the curve's last point. Nothing happens when the model is empty
    /// or the curve does not exist.
    pub fn add_point_to_curve(&mut self, curve: CurveId, point: NewPoint) -> Option<PointId> {
        if self.points.is_empty() || !self.contains_curve(curve) {
            tracing::debug!("add_point_to_curve: curve {} not found", curve);
            return None;
        }
        let id = self.point_ids.allocate();
        self.points.push(AnchorPoint {
            id,
            curve,
            position: point.position,
            left: point.left,
            right: point.right,
            grow: point.grow,
        });
        Some(id)
    }

    /// Apply an update to one point.
    ///
    /// The update may change position and offsets; id and curve membership
    /// are restored afterwards. Returns false when `id` is unknown.
    pub fn mutate_point(&mut self, id: PointId, update: impl FnOnce(&mut AnchorPoint)) -> bool {
        let Some(point) = self.points.iter_mut().find(|p| p.id == id) else {
            tracing::debug!("mutate_point: unknown point {}", id);
            return false;
        };
        let curve = point.curve;
        update(point);
        point.id = id;
        point.curve = curve;
        true
    }

    /// Cut `curve` after its `index`-th point.
    ///
    /// The prefix `[0..=index]` and the suffix `[index + 1..]` each become a
    /// new curve with a fresh id if they hold at least two points, and are
    /// dropped otherwise. The original curve id is retired. Returns the new
    /// curve ids, prefix first; `None` if the cut point is out of range.
    pub fn split_curve(&mut self, curve: CurveId, index: usize) -> Option<Vec<CurveId>> {
        let members: Vec<PointId> = self.curve_points(curve).iter().map(|p| p.id).collect();
        if index + 1 >= members.len() {
            return None;
        }
        let (before, after) = members.split_at(index + 1);

        let mut created = Vec::new();
        for part in [before, after] {
            if part.len() < 2 {
                self.points.retain(|p| !part.contains(&p.id));
                continue;
            }
            let fresh = self.curve_ids.allocate();
            for point in self.points.iter_mut().filter(|p| part.contains(&p.id)) {
                point.curve = fresh;
            }
            created.push(fresh);
        }
        Some(created)
    }

    /// Replace everything with the single default point and rewind the ids
    pub fn reset(&mut self) {
        self.points.clear();
        self.point_ids.reset();
        self.curve_ids.reset();
        self.seed();
        tracing::info!("Model reset");
    }
}

impl Default for CurveModel {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}
