// Copyright 2025 the Curvedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Curve data model

pub mod curve_set;
pub mod entity_id;
pub mod point;

pub use curve_set::{CurveModel, NewPoint};
pub use entity_id::{CurveId, PointId};
pub use point::{AnchorPoint, HandleDefaults, HandleKind};
