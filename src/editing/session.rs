// Copyright 2025 the Curvedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Edit session: the state an editor canvas works on.
//!
//! The session bundles the curve model, the viewport, the delete-mode
//! toggle and the canvas size. It holds no gesture state; that lives in
//! the interaction controller, which borrows the session for each event.

use super::segment_ops;
use super::tap::TapAction;
use super::viewport::ViewPort;
use crate::model::{CurveId, CurveModel, PointId};
use crate::settings::Settings;
use kurbo::{Point, Size};

#[derive(Debug, Clone)]
pub struct EditSession {
    pub model: CurveModel,
    pub viewport: ViewPort,
    /// When set, tapping a segment deletes it instead of straightening
    pub delete_mode: bool,
    /// Host canvas size in screen pixels; zero until the host reports it
    pub canvas_size: Size,
    pub settings: Settings,
}

impl EditSession {
    pub fn new(settings: Settings) -> Self {
        Self {
            model: CurveModel::from_settings(&settings),
            viewport: ViewPort::from_settings(&settings),
            delete_mode: false,
            canvas_size: Size::ZERO,
            settings,
        }
    }

    /// Flip delete mode, returning the new state
    pub fn toggle_delete_mode(&mut self) -> bool {
        self.delete_mode = !self.delete_mode;
        tracing::info!("Delete mode {}", if self.delete_mode { "on" } else { "off" });
        self.delete_mode
    }

    /// Record the canvas size.
    ///
    /// The first report moves the initial point under the canvas centre,
    /// provided the document has not been edited yet.
    pub fn set_canvas_size(&mut self, size: Size) {
        let first_report = self.canvas_size.is_zero_area();
        self.canvas_size = size;
        if first_report {
            self.center_initial_point();
        }
    }

    /// Screen position of the canvas centre
    pub fn screen_center(&self) -> Point {
        Point::new(self.canvas_size.width / 2.0, self.canvas_size.height / 2.0)
    }

    /// Design position currently under the canvas centre
    pub fn design_center(&self) -> Point {
        self.viewport.screen_to_design(self.screen_center())
    }

    /// Start a new curve under the canvas centre
    pub fn add_curve_at_center(&mut self) -> CurveId {
        let center = self.design_center();
        self.model.add_curve(center)
    }

    /// Restore the initial document. The viewport and delete mode are kept.
    pub fn reset(&mut self) {
        self.model.reset();
    }

    /// Perform an edit produced by tap handling
    pub fn apply_tap(&mut self, action: TapAction) {
        match action {
            TapAction::Delete { start, end } => {
                segment_ops::delete_segment(&mut self.model, start, end);
            }
            TapAction::Straighten { start, end } => {
                segment_ops::straighten_segment(&mut self.model, start, end);
            }
        }
    }

    fn center_initial_point(&mut self) {
        if self.canvas_size.is_zero_area() || !self.is_pristine() {
            return;
        }
        let center = self.design_center();
        self.model
            .mutate_point(PointId::new(1), |p| p.position = center);
        tracing::debug!("Centred initial point at {:?}", center);
    }

    /// Whether the model still holds only the untouched initial point
    fn is_pristine(&self) -> bool {
        let defaults = self.model.defaults();
        match self.model.points() {
            [only] => {
                only.id == PointId::new(1)
                    && only.position == self.settings.initial_position()
                    && only.left == defaults.left
                    && only.right == defaults.right
                    && only.grow == defaults.grow
            }
            _ => false,
        }
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
