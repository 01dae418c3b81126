// Copyright 2025 the Curvedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Editing model and interaction

pub mod controller;
pub mod hit_test;
pub mod pointer;
pub mod scheduler;
pub mod segment_ops;
pub mod session;
pub mod tap;
pub mod viewport;

pub use controller::{Gesture, InteractionController};
pub use hit_test::{HitTestResult, SegmentHit};
pub use pointer::{PointerEvent, PointerId, PointerPhase, PointerTarget, WheelEvent};
pub use session::EditSession;
pub use tap::TapAction;
pub use viewport::ViewPort;
