// Copyright 2025 the Curvedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Anchor points and their handles.

use super::{CurveId, PointId};
use crate::settings::Settings;
use kurbo::{Point, Vec2};

/// Which part of an anchor point a handle drags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// The anchor itself
    Main,
    /// Incoming tangent
    Left,
    /// Outgoing tangent
    Right,
    /// Growth preview, only shown on a curve's last point
    Grow,
}

impl HandleKind {
    pub const ALL: [HandleKind; 4] = [
        HandleKind::Main,
        HandleKind::Left,
        HandleKind::Right,
        HandleKind::Grow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HandleKind::Main => "main",
            HandleKind::Left => "left",
            HandleKind::Right => "right",
            HandleKind::Grow => "grow",
        }
    }

    /// Parse a handle name; `top` is accepted as an alias for `grow`
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "main" => Some(HandleKind::Main),
            "left" => Some(HandleKind::Left),
            "right" => Some(HandleKind::Right),
            "grow" | "top" => Some(HandleKind::Grow),
            _ => None,
        }
    }
}

/// Tangent and grow offsets given to newly created points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleDefaults {
    pub left: Vec2,
    pub right: Vec2,
    pub grow: Vec2,
}

impl HandleDefaults {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            left: settings.left(),
            right: settings.right(),
            grow: settings.grow(),
        }
    }
}

impl Default for HandleDefaults {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// An anchor on a curve.
///
/// Handle offsets are relative to `position`. Whether the point is the
/// last of its curve is not stored; ask the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPoint {
    pub id: PointId,
    pub curve: CurveId,
    /// Absolute world-space position
    pub position: Point,
    /// Incoming control point offset
    pub left: Vec2,
    /// Outgoing control point offset
    pub right: Vec2,
    /// Growth preview offset
    pub grow: Vec2,
}

impl AnchorPoint {
    pub fn new(id: PointId, curve: CurveId, position: Point, defaults: &HandleDefaults) -> Self {
        Self {
            id,
            curve,
            position,
            left: defaults.left,
            right: defaults.right,
            grow: defaults.grow,
        }
    }

    /// Absolute incoming control point
    pub fn left_control(&self) -> Point {
        self.position + self.left
    }

    /// Absolute outgoing control point
    pub fn right_control(&self) -> Point {
        self.position + self.right
    }

    /// Where the next point would land if the grow handle were released now
    pub fn grow_target(&self) -> Point {
        self.position + self.grow
    }

    /// Absolute position of a handle
    pub fn handle_position(&self, kind: HandleKind) -> Point {
        match kind {
            HandleKind::Main => self.position,
            HandleKind::Left => self.left_control(),
            HandleKind::Right => self.right_control(),
            HandleKind::Grow => self.grow_target(),
        }
    }

    /// Move one handle by a world-space delta.
    ///
    /// Moving the anchor carries its tangent handles along, since they
    /// are stored as offsets.
    pub fn nudge(&mut self, kind: HandleKind, delta: Vec2) {
        match kind {
            HandleKind::Main => self.position += delta,
            HandleKind::Left => self.left += delta,
            HandleKind::Right => self.right += delta,
            HandleKind::Grow => self.grow += delta,
        }
    }
}
