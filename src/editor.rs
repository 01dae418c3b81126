// Copyright 2025 the Curvedit Authors
// SPDX-License-Identifier: Apache-2.0

//! The host-facing editor.
//!
//! An [`Editor`] owns the edit session and the interaction controller. A
//! host feeds it pointer, wheel and timer events, invokes menu actions on
//! it, and reads back render projections after each change.

use crate::editing::{
    EditSession, Gesture, InteractionController, PointerEvent, PointerTarget, SegmentHit,
    WheelEvent,
};
use crate::model::CurveId;
use crate::projection::{self, HandleView, SegmentView, StatusMetrics};
use crate::settings::Settings;
use kurbo::{Point, Size};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct Editor {
    pub session: EditSession,
    controller: InteractionController,
}

impl Editor {
    pub fn new(settings: Settings) -> Self {
        let controller = InteractionController::new(&settings);
        Self {
            session: EditSession::new(settings),
            controller,
        }
    }

    /// An editor whose initial point sits at the centre of the canvas
    pub fn with_canvas_size(settings: Settings, size: Size) -> Self {
        let mut editor = Self::new(settings);
        editor.set_canvas_size(size);
        editor
    }

    // ===== Input =====

    pub fn pointer(&mut self, event: PointerEvent) {
        self.controller.handle_pointer(&mut self.session, event);
    }

    pub fn wheel(&mut self, event: WheelEvent) {
        self.controller.handle_wheel(&mut self.session, event);
    }

    /// Let time pass; runs deferred tap actions due by `now`
    pub fn tick(&mut self, now: Instant) -> usize {
        self.controller.tick(&mut self.session, now)
    }

    /// When the host should call [`Editor::tick`] next
    pub fn next_deadline(&self) -> Option<Instant> {
        self.controller.next_due()
    }

    pub fn set_canvas_size(&mut self, size: Size) {
        self.session.set_canvas_size(size);
    }

    // ===== Menu actions =====

    /// Start a new curve at a design-space position
    pub fn add_curve(&mut self, position: Point) -> CurveId {
        self.session.model.add_curve(position)
    }

    /// Start a new curve under the centre of the canvas
    pub fn add_curve_at_center(&mut self) -> CurveId {
        self.session.add_curve_at_center()
    }

    /// Restore the initial document and drop any gesture in progress
    pub fn reset(&mut self) {
        self.controller.reset();
        self.session.reset();
    }

    pub fn toggle_delete_mode(&mut self) -> bool {
        self.session.toggle_delete_mode()
    }

    // ===== Queries =====

    /// What lies under a screen position
    pub fn target_at(&self, screen_pos: Point) -> PointerTarget {
        self.session.target_at(screen_pos)
    }

    pub fn segment_at(&self, screen_pos: Point) -> Option<SegmentHit> {
        self.session.hit_test_segment(screen_pos)
    }

    pub fn segment_views(&self) -> Vec<SegmentView> {
        projection::segments(&self.session.model, self.session.settings.hit_stroke_width)
    }

    pub fn handle_views(&self) -> Vec<HandleView> {
        projection::handles(&self.session.model)
    }

    pub fn status(&self) -> StatusMetrics {
        projection::status(&self.session)
    }

    pub fn gesture(&self) -> Gesture {
        self.controller.gesture()
    }

    pub fn pending_taps(&self) -> usize {
        self.controller.pending_taps()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
