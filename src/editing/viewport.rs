// Copyright 2025 the Curvedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Viewport transformation between screen and design (world) space.
//!
//! `screen = design * zoom + offset`. The offset is in screen pixels. All
//! zoom changes go through [`ViewPort::zoom_at`], which keeps the design
//! point under an anchor fixed on screen, and every zoom value is clamped
//! to the configured range.

use crate::settings::{self, Settings};
use kurbo::{Affine, Point, Vec2};

/// Snapshot taken when a two-pointer pinch starts.
///
/// Every pinch update is computed from this frozen state rather than from
/// the live viewport, so rounding does not accumulate over the gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchBaseline {
    pub initial_distance: f64,
    pub initial_zoom: f64,
    pub start_offset: Vec2,
    /// Screen midpoint of the two pointers at gesture start
    pub midpoint: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewPort {
    /// Screen-space pan
    pub offset: Vec2,
    /// Scale factor
    pub zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    pinch: Option<PinchBaseline>,
}

impl ViewPort {
    pub fn new() -> Self {
        Self::with_limits(settings::editor::MIN_ZOOM, settings::editor::MAX_ZOOM)
    }

    pub fn with_limits(min_zoom: f64, max_zoom: f64) -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom,
            max_zoom,
            pinch: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_limits(settings.min_zoom, settings.max_zoom)
    }

    /// Convert a screen position to design space
    pub fn screen_to_design(&self, screen: Point) -> Point {
        ((screen.to_vec2() - self.offset) / self.zoom).to_point()
    }

    /// Convert a design-space position to screen space
    pub fn to_screen(&self, design: Point) -> Point {
        (design.to_vec2() * self.zoom + self.offset).to_point()
    }

    /// Design-to-screen transform, for renderers
    pub fn affine(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Pan by a screen-space delta
    pub fn pan_by(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Change the zoom so the design point under `anchor` stays under it
    pub fn zoom_at(&mut self, anchor: Point, new_zoom: f64) {
        let zoom = self.clamp_zoom(new_zoom);
        let design_anchor = self.screen_to_design(anchor);
        self.offset = anchor.to_vec2() - design_anchor.to_vec2() * zoom;
        self.zoom = zoom;
    }

    /// Exponential wheel zoom about the cursor.
    ///
    /// Scrolling by `-d` undoes scrolling by `d` as long as neither hits a
    /// zoom limit.
    pub fn wheel_zoom(&mut self, cursor: Point, delta_y: f64, sensitivity: f64) {
        let new_zoom = self.zoom * (-delta_y * sensitivity).exp();
        self.zoom_at(cursor, new_zoom);
        tracing::debug!(
            "Wheel zoom: delta_y={:.2}, new zoom={:.3}",
            delta_y,
            self.zoom
        );
    }

    // ===== Pinch =====

    pub fn is_pinching(&self) -> bool {
        self.pinch.is_some()
    }

    pub fn pinch_baseline(&self) -> Option<&PinchBaseline> {
        self.pinch.as_ref()
    }

    /// Freeze the pinch baseline for pointers at `a` and `b`
    pub fn begin_pinch(&mut self, a: Point, b: Point) {
        let baseline = PinchBaseline {
            initial_distance: non_zero_distance(a, b),
            initial_zoom: self.zoom,
            start_offset: self.offset,
            midpoint: a.midpoint(b),
        };
        tracing::debug!("Pinch baseline captured: {:?}", baseline);
        self.pinch = Some(baseline);
    }

    /// Re-derive zoom and offset from the baseline and the current pointer
    /// positions. Does nothing without a baseline.
    pub fn update_pinch(&mut self, a: Point, b: Point) {
        let Some(base) = self.pinch else {
            return;
        };
        let ratio = non_zero_distance(a, b) / base.initial_distance;
        let zoom = self.clamp_zoom(base.initial_zoom * ratio);
        let design_anchor = (base.midpoint.to_vec2() - base.start_offset) / base.initial_zoom;
        self.offset = base.midpoint.to_vec2() - design_anchor * zoom;
        self.zoom = zoom;
    }

    pub fn end_pinch(&mut self) {
        if self.pinch.take().is_some() {
            tracing::debug!("Pinch ended at zoom {:.3}", self.zoom);
        }
    }
}

impl Default for ViewPort {
    fn default() -> Self {
        Self::new()
    }
}

/// Distance between two pointers, with zero replaced by one
fn non_zero_distance(a: Point, b: Point) -> f64 {
    let d = a.distance(b);
    if d == 0.0 { 1.0 } else { d }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_point_eq(a: Point, b: Point) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-9);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-9);
    }

    #[test]
    fn screen_and_design_round_trip() {
        let mut vp = ViewPort::new();
        vp.offset = Vec2::new(30.0, -12.0);
        vp.zoom = 2.5;
        let design = Point::new(7.0, 11.0);
        assert_point_eq(vp.screen_to_design(vp.to_screen(design)), design);
        assert_point_eq(vp.to_screen(design), Point::new(47.5, 15.5));
        assert_point_eq(vp.affine() * design, vp.to_screen(design));
    }

    #[test]
    fn zoom_at_keeps_anchor_fixed() {
        let mut vp = ViewPort::new();
        vp.offset = Vec2::new(100.0, 50.0);
        let anchors = [
            (Point::new(320.0, 240.0), 2.0),
            (Point::new(10.0, 700.0), 0.5),
            (Point::new(-40.0, 5.0), 3.7),
            (Point::new(640.0, 0.0), 1.0),
        ];
        for (anchor, zoom) in anchors {
            let design = vp.screen_to_design(anchor);
            vp.zoom_at(anchor, zoom);
            assert_point_eq(vp.to_screen(design), anchor);
        }
    }

    #[test]
    fn zoom_is_clamped() {
        let mut vp = ViewPort::new();
        vp.zoom_at(Point::ZERO, 100.0);
        assert_eq!(vp.zoom, 4.0);
        vp.zoom_at(Point::ZERO, 0.001);
        assert_eq!(vp.zoom, 0.25);
    }

    #[test]
    fn clamped_zoom_still_keeps_anchor() {
        let mut vp = ViewPort::new();
        let anchor = Point::new(200.0, 100.0);
        let design = vp.screen_to_design(anchor);
        vp.zoom_at(anchor, 50.0);
        assert_point_eq(vp.to_screen(design), anchor);
    }

    #[test]
    fn wheel_zoom_is_symmetric() {
        let mut vp = ViewPort::new();
        let cursor = Point::new(300.0, 200.0);
        vp.wheel_zoom(cursor, -100.0, 0.0015);
        assert!(vp.zoom > 1.0);
        vp.wheel_zoom(cursor, 100.0, 0.0015);
        assert_abs_diff_eq!(vp.zoom, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(vp.offset.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(vp.offset.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn pinch_scales_by_distance_ratio() {
        let mut vp = ViewPort::new();
        vp.begin_pinch(Point::new(100.0, 100.0), Point::new(200.0, 100.0));
        vp.update_pinch(Point::new(50.0, 100.0), Point::new(250.0, 100.0));
        assert_abs_diff_eq!(vp.zoom, 2.0, epsilon = 1e-12);
        // The design point under the starting midpoint stays put
        assert_point_eq(vp.to_screen(Point::new(150.0, 100.0)), Point::new(150.0, 100.0));
    }

    #[test]
    fn pinch_does_not_drift() {
        let mut vp = ViewPort::new();
        vp.offset = Vec2::new(20.0, 20.0);
        let a = Point::new(100.0, 100.0);
        let b = Point::new(200.0, 100.0);
        vp.begin_pinch(a, b);
        for step in 0..50 {
            let spread = 50.0 * (step as f64 * 0.37).sin();
            vp.update_pinch(a - Vec2::new(spread, 0.0), b + Vec2::new(spread, 0.0));
        }
        vp.update_pinch(a, b);
        assert_abs_diff_eq!(vp.zoom, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(vp.offset.x, 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(vp.offset.y, 20.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_distance_pinch_stays_finite() {
        let mut vp = ViewPort::new();
        let p = Point::new(10.0, 10.0);
        vp.begin_pinch(p, p);
        vp.update_pinch(p, Point::new(13.0, 14.0));
        assert!(vp.zoom.is_finite());
        assert_eq!(vp.zoom, 4.0);
        vp.update_pinch(p, p);
        assert_eq!(vp.zoom, 1.0);
    }

    #[test]
    fn update_without_baseline_is_noop() {
        let mut vp = ViewPort::new();
        vp.update_pinch(Point::ZERO, Point::new(500.0, 0.0));
        assert_eq!(vp, ViewPort::new());
        vp.begin_pinch(Point::ZERO, Point::new(10.0, 0.0));
        vp.end_pinch();
        assert!(!vp.is_pinching());
    }
}
