// Copyright 2025 the Curvedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Interaction controller: the pointer and wheel state machine.
//!
//! One event stream drives four mutually exclusive gestures: idle, handle
//! drag, background pan and two-pointer pinch. Segment taps are handled
//! alongside by the tap tracker. Every effect is applied as the event
//! arrives, so releasing, cancelling or leaving simply ends the gesture.

use super::pointer::{PointerEvent, PointerId, PointerPhase, PointerTarget, WheelEvent};
use super::segment_ops;
use super::session::EditSession;
use super::tap::TapTracker;
use crate::model::{HandleKind, PointId};
use crate::settings::Settings;
use kurbo::Point;
use std::collections::BTreeMap;
use std::time::Instant;

/// The gesture currently in progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Idle,
    /// A handle follows `pointer`; `last` is the previous screen position
    DraggingHandle {
        point: PointId,
        kind: HandleKind,
        pointer: PointerId,
        last: Point,
    },
    /// The canvas follows `pointer`
    Panning { pointer: PointerId, last: Point },
    /// Zoom follows the distance between two pointers
    Pinching { pointers: (PointerId, PointerId) },
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    gesture: Gesture,
    /// Live screen positions of background pointers
    pointers: BTreeMap<PointerId, Point>,
    taps: TapTracker,
}

impl InteractionController {
    pub fn new(settings: &Settings) -> Self {
        Self {
            gesture: Gesture::Idle,
            pointers: BTreeMap::new(),
            taps: TapTracker::new(settings.double_tap()),
        }
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Number of background pointers currently down
    pub fn active_pointers(&self) -> usize {
        self.pointers.len()
    }

    /// Number of segment taps waiting for their deferred action
    pub fn pending_taps(&self) -> usize {
        self.taps.pending()
    }

    /// When the next deferred tap action comes due
    pub fn next_due(&self) -> Option<Instant> {
        self.taps.next_due()
    }

    /// Drop all gesture, pointer and tap state
    pub fn reset(&mut self) {
        self.gesture = Gesture::Idle;
        self.pointers.clear();
        self.taps.clear();
    }

    /// Run deferred tap actions due by `now`, returning how many ran
    pub fn tick(&mut self, session: &mut EditSession, now: Instant) -> usize {
        let due = self.taps.poll(now);
        let count = due.len();
        for action in due {
            tracing::debug!("Deferred tap fired: {:?}", action);
            session.apply_tap(action);
        }
        count
    }

    pub fn handle_pointer(&mut self, session: &mut EditSession, event: PointerEvent) {
        self.tick(session, event.time);
        match event.phase {
            PointerPhase::Down => self.pointer_down(session, event),
            PointerPhase::Move => self.pointer_move(session, event),
            PointerPhase::Up | PointerPhase::Cancel | PointerPhase::Leave => {
                self.pointer_release(session, event)
            }
        }
    }

    pub fn handle_wheel(&mut self, session: &mut EditSession, event: WheelEvent) {
        self.tick(session, event.time);
        let sensitivity = session.settings.wheel_sensitivity;
        session
            .viewport
            .wheel_zoom(event.position, event.delta_y, sensitivity);
    }

    // ===== Transitions =====

    fn pointer_down(&mut self, session: &mut EditSession, event: PointerEvent) {
        match event.target {
            PointerTarget::Handle { point, kind } => {
                if session.model.point(point).is_none() {
                    tracing::debug!("Pointer down on unknown point {}", point);
                    return;
                }
                match self.gesture {
                    Gesture::DraggingHandle { .. } => self.end_drag(session),
                    Gesture::Pinching { .. } => session.viewport.end_pinch(),
                    Gesture::Panning { .. } | Gesture::Idle => {}
                }
                tracing::debug!("Drag {:?} handle of point {}", kind, point);
                self.gesture = Gesture::DraggingHandle {
                    point,
                    kind,
                    pointer: event.pointer,
                    last: event.position,
                };
            }
            PointerTarget::Background => {
                self.pointers.insert(event.pointer, event.position);
                match self.gesture {
                    Gesture::DraggingHandle { .. } | Gesture::Pinching { .. } => {}
                    Gesture::Panning { pointer, .. } => {
                        self.begin_pinch(session, pointer, event.pointer)
                    }
                    Gesture::Idle => {
                        let other = self.pointers.keys().copied().find(|&id| id != event.pointer);
                        match other {
                            Some(other) => self.begin_pinch(session, other, event.pointer),
                            None => {
                                tracing::debug!("Pan started by pointer {}", event.pointer);
                                self.gesture = Gesture::Panning {
                                    pointer: event.pointer,
                                    last: event.position,
                                };
                            }
                        }
                    }
                }
            }
            // Segments react on release
            PointerTarget::Segment { .. } => {}
        }
    }

    fn pointer_move(&mut self, session: &mut EditSession, event: PointerEvent) {
        if let Some(pos) = self.pointers.get_mut(&event.pointer) {
            *pos = event.position;
        }

        match &mut self.gesture {
            Gesture::DraggingHandle {
                point,
                kind,
                pointer,
                last,
            } if *pointer == event.pointer => {
                let delta = (event.position - *last) / session.viewport.zoom;
                *last = event.position;
                let kind = *kind;
                session.model.mutate_point(*point, |p| p.nudge(kind, delta));
            }
            Gesture::Panning { pointer, last } if *pointer == event.pointer => {
                session.viewport.pan_by(event.position - *last);
                *last = event.position;
            }
            Gesture::Pinching { pointers: (a, b) }
                if event.pointer == *a || event.pointer == *b =>
            {
                if let (Some(&pa), Some(&pb)) = (self.pointers.get(a), self.pointers.get(b)) {
                    session.viewport.update_pinch(pa, pb);
                }
            }
            _ => {}
        }
    }

    fn pointer_release(&mut self, session: &mut EditSession, event: PointerEvent) {
        self.pointers.remove(&event.pointer);

        match self.gesture {
            Gesture::DraggingHandle { pointer, .. } if pointer == event.pointer => {
                self.end_drag(session);
            }
            Gesture::Panning { pointer, .. } if pointer == event.pointer => {
                tracing::debug!("Pan ended by pointer {}", pointer);
                self.gesture = Gesture::Idle;
            }
            Gesture::Pinching { pointers: (a, b) } if event.pointer == a || event.pointer == b => {
                let mut remaining = self.pointers.keys().copied();
                match (remaining.next(), remaining.next()) {
                    (Some(first), Some(second)) => self.begin_pinch(session, first, second),
                    _ => {
                        session.viewport.end_pinch();
                        self.gesture = Gesture::Idle;
                    }
                }
            }
            _ => {}
        }

        if event.phase == PointerPhase::Up {
            if let PointerTarget::Segment { start, end } = event.target {
                if let Some(action) = self.taps.tap(start, end, event.time, session.delete_mode) {
                    session.apply_tap(action);
                }
            }
        }
    }

    /// End the current handle drag, committing a grow handle
    fn end_drag(&mut self, session: &mut EditSession) {
        if let Gesture::DraggingHandle { point, kind, .. } = self.gesture {
            tracing::debug!("Drag of point {} ended", point);
            if kind == HandleKind::Grow {
                segment_ops::grow_point(&mut session.model, point);
            }
        }
        self.gesture = Gesture::Idle;
    }

    /// Capture a pinch baseline for two tracked pointers, ending any pan
    fn begin_pinch(&mut self, session: &mut EditSession, a: PointerId, b: PointerId) {
        let (Some(&pa), Some(&pb)) = (self.pointers.get(&a), self.pointers.get(&b)) else {
            return;
        };
        session.viewport.begin_pinch(pa, pb);
        tracing::debug!("Pinch started by pointers {} and {}", a, b);
        self.gesture = Gesture::Pinching { pointers: (a, b) };
    }
}
