// Copyright 2025 the Curvedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Approximate whole-curve measurements: enclosed area and revolved volume.
//!
//! Both flatten the curve into a polyline by sampling each segment at a
//! fixed rate and then work on the polygon. Neither is exact; they
//! converge as the sample count grows.

use super::Segment;
use crate::model::AnchorPoint;
use crate::settings::sampling;
use kurbo::Point;
use std::f64::consts::PI;

/// Thickness of one horizontal slice in the volume sweep
const SLICE_THICKNESS: f64 = 1.0;

/// Upper bound on slices per sweep; taller profiles get thicker slices
const MAX_SLICES: usize = 100_000;

/// Flatten a curve: `per_segment` samples of every segment, followed by the
/// curve's final anchor.
pub fn polyline(points: &[&AnchorPoint], per_segment: usize) -> Vec<Point> {
    let mut out = Vec::with_capacity(points.len().saturating_sub(1) * per_segment + 1);
    for pair in points.windows(2) {
        out.extend(Segment::between(pair[0], pair[1]).sample(per_segment));
    }
    if let Some(last) = points.last() {
        out.push(last.position);
    }
    out
}

/// Shoelace area of a polygon; the last vertex is joined to the first
pub fn polygon_area(vertices: &[Point]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let n = vertices.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    (twice / 2.0).abs()
}

/// Area enclosed by the curve when it is closed back to its first point
pub fn enclosed_area(points: &[&AnchorPoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let mut vertices = polyline(points, sampling::AREA);
    vertices.push(vertices[0]);
    polygon_area(&vertices)
}

/// Volume of the solid obtained by revolving the curve's profile.
///
/// The profile is the open polyline of the curve. It is cut into
/// horizontal slices of unit thickness from its lowest to its highest y;
/// each slice is a disc whose diameter is the span between the leftmost
/// and rightmost edge crossing at that height. Interior gaps are ignored,
/// so concave or self-intersecting profiles are over-estimated.
pub fn revolved_volume(points: &[&AnchorPoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    profile_volume(&polyline(points, sampling::VOLUME))
}

/// Slice-sum volume of an open polyline profile.
///
/// Costs one pass over the edges per slice. The slice count is fixed
/// before the sweep and capped at [`MAX_SLICES`]; a profile taller than
/// that is cut into proportionally thicker slices.
pub fn profile_volume(profile: &[Point]) -> f64 {
    let Some((min_y, max_y)) = vertical_extent(profile) else {
        return 0.0;
    };
    let height = max_y - min_y;
    if !height.is_finite() || height <= 0.0 {
        return 0.0;
    }

    let (count, thickness) = match (height / SLICE_THICKNESS).ceil() as usize {
        n if n > MAX_SLICES => (MAX_SLICES, height / MAX_SLICES as f64),
        n => (n, SLICE_THICKNESS),
    };
    (0..count)
        .filter_map(|i| slice_span(profile, min_y + i as f64 * thickness))
        .map(|diameter| PI * diameter * diameter / 4.0 * thickness)
        .sum()
}

fn vertical_extent(profile: &[Point]) -> Option<(f64, f64)> {
    let first = profile.first()?;
    Some(profile.iter().fold((first.y, first.y), |(lo, hi), p| {
        (lo.min(p.y), hi.max(p.y))
    }))
}

/// Span between the outermost edge crossings at height `y`.
///
/// Edges are half-open in y so a vertex lying exactly on the slice is
/// counted once.
fn slice_span(profile: &[Point], y: f64) -> Option<f64> {
    let mut crossings: Vec<f64> = profile
        .windows(2)
        .filter_map(|edge| {
            let (a, b) = (edge[0], edge[1]);
            let spans = (a.y <= y && b.y > y) || (b.y <= y && a.y > y);
            spans.then(|| a.x + (y - a.y) / (b.y - a.y) * (b.x - a.x))
        })
        .collect();
    if crossings.len() < 2 {
        return None;
    }
    crossings.sort_by(f64::total_cmp);
    Some(crossings[crossings.len() - 1] - crossings[0])
}
