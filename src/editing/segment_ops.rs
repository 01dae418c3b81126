// Copyright 2025 the Curvedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Curve editing operations built on the model primitives: growing a curve
//! from its grow handle, deleting (splitting at) a segment, and
//! straightening a segment.
//!
//! Invalid references are not errors. Each operation reports whether it
//! changed anything and otherwise leaves the model untouched.

use crate::model::{CurveId, CurveModel, NewPoint, PointId};

/// Commit the grow handle of `id` into a new point.
///
/// Only the last point of a curve can grow. Its grow offset `d` becomes a
/// real outgoing tangent `d / 3`, and a new point is appended at
/// `position + d` with the mirrored incoming tangent `-d / 3` so the curve
/// stays smooth through the joint. Returns the new point's id.
pub fn grow_point(model: &mut CurveModel, id: PointId) -> Option<PointId> {
    let Some(point) = model.point(id).copied() else {
        tracing::debug!("grow_point: unknown point {}", id);
        return None;
    };
    if !model.is_last(id) {
        tracing::debug!("grow_point: point {} is not last in curve {}", id, point.curve);
        return None;
    }

    let offset = point.grow;
    let defaults = *model.defaults();
    model.mutate_point(id, |p| p.right = offset / 3.0);
    let new_id = model.add_point_to_curve(
        point.curve,
        NewPoint {
            position: point.position + offset,
            left: offset * (2.0 / 3.0) - offset,
            right: defaults.right,
            grow: defaults.grow,
        },
    )?;
    tracing::info!("Grew curve {} with point {}", point.curve, new_id);
    Some(new_id)
}

/// Delete the segment `start -> end` by cutting its curve in two.
///
/// `end` must immediately follow `start` in the same curve. Each side that
/// keeps at least two points becomes a curve with a fresh id; shorter
/// sides are removed. Returns the ids of the surviving curves, or `None`
/// if the pair is not a segment.
pub fn delete_segment(
    model: &mut CurveModel,
    start: PointId,
    end: PointId,
) -> Option<Vec<CurveId>> {
    let (Some(a), Some(b)) = (model.point(start), model.point(end)) else {
        tracing::debug!("delete_segment: unknown point in {}-{}", start, end);
        return None;
    };
    if a.curve != b.curve {
        tracing::debug!("delete_segment: {} and {} are on different curves", start, end);
        return None;
    }
    let curve = a.curve;
    let members = model.curve_points(curve);
    let index = members.iter().position(|p| p.id == start)?;
    if members.get(index + 1).map(|p| p.id) != Some(end) {
        tracing::debug!("delete_segment: {} does not follow {}", end, start);
        return None;
    }

    let created = model.split_curve(curve, index)?;
    tracing::info!(
        "Deleted segment {}-{}; curve {} split into {:?}",
        start,
        end,
        curve,
        created
    );
    Some(created)
}

/// Put both control points of `start -> end` on the chord.
///
/// Sets the outgoing tangent of `start` to a third of the chord and the
/// incoming tangent of `end` to minus a third. No other tangent changes.
pub fn straighten_segment(model: &mut CurveModel, start: PointId, end: PointId) -> bool {
    let (Some(a), Some(b)) = (model.point(start), model.point(end)) else {
        tracing::debug!("straighten_segment: unknown point in {}-{}", start, end);
        return false;
    };
    let chord = b.position - a.position;
    model.mutate_point(start, |p| p.right = chord / 3.0);
    model.mutate_point(end, |p| p.left = -chord / 3.0);
    tracing::info!("Straightened segment {}-{}", start, end);
    true
}
