// Copyright 2025 the Curvedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Curve geometry: segment evaluation and approximate measurements.
//!
//! Every adjacent pair of points in a curve forms one cubic `Segment`
//! (start anchor, its outgoing control, the next anchor's incoming control,
//! next anchor). Segments convert to `kurbo::BezPath` for rendering; length,
//! area and volume are computed by sampling.

pub mod measure;
pub mod segment;

pub use segment::Segment;
