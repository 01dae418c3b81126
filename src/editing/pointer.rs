// Copyright 2025 the Curvedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Host input events.
//!
//! The host reports every pointer change together with what the pointer is
//! over. Target identity comes from the host (its own hit testing, or
//! `Editor::target_at` for hosts without element identity).

use crate::model::{HandleKind, PointId};
use kurbo::Point;
use std::time::Instant;

/// Host-assigned pointer identifier, stable for the life of a contact
pub type PointerId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
    Leave,
}

impl PointerPhase {
    /// Up, cancel and leave all end whatever the pointer was doing
    pub fn is_release(self) -> bool {
        matches!(
            self,
            PointerPhase::Up | PointerPhase::Cancel | PointerPhase::Leave
        )
    }
}

/// What a pointer event landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// An anchor, tangent or grow handle
    Handle { point: PointId, kind: HandleKind },
    /// The wide hit region of the segment from `start` to `end`
    Segment { start: PointId, end: PointId },
    /// Empty canvas
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer: PointerId,
    pub phase: PointerPhase,
    /// Screen position
    pub position: Point,
    pub target: PointerTarget,
    pub time: Instant,
}

impl PointerEvent {
    pub fn new(
        pointer: PointerId,
        phase: PointerPhase,
        position: Point,
        target: PointerTarget,
        time: Instant,
    ) -> Self {
        Self {
            pointer,
            phase,
            position,
            target,
            time,
        }
    }

    pub fn down(pointer: PointerId, position: Point, target: PointerTarget, time: Instant) -> Self {
        Self::new(pointer, PointerPhase::Down, position, target, time)
    }

    /// Moves are routed by pointer id, so their target does not matter
    pub fn moved(pointer: PointerId, position: Point, time: Instant) -> Self {
        Self::new(
            pointer,
            PointerPhase::Move,
            position,
            PointerTarget::Background,
            time,
        )
    }

    pub fn up(pointer: PointerId, position: Point, target: PointerTarget, time: Instant) -> Self {
        Self::new(pointer, PointerPhase::Up, position, target, time)
    }
}

/// Wheel input at a cursor position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub position: Point,
    /// Vertical scroll amount in pixels; negative scrolls up (zooms in)
    pub delta_y: f64,
    pub time: Instant,
}
