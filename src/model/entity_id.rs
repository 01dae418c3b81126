// Copyright 2025 the Curvedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Identifiers for anchor points and curves.
//!
//! Ids come from an [`IdAllocator`] owned by the curve model rather than a
//! global counter, so two models never share a sequence and a reset can
//! rewind it. Within one allocator lifetime ids increase monotonically and
//! are never handed out twice, which keeps deleted points and retired
//! curves from aliasing live ones.

use std::fmt;
use std::marker::PhantomData;

/// Integer-backed id types handed out by an [`IdAllocator`]
pub trait RawId: Copy {
    fn from_raw(raw: u64) -> Self;
    fn raw(self) -> u64;
}

/// Unique identifier of an anchor point. Point order inside a curve is
/// id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointId(u64);

/// Grouping key shared by all points of one curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CurveId(u64);

impl RawId for PointId {
    fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    fn raw(self) -> u64 {
        self.0
    }
}

impl RawId for CurveId {
    fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    fn raw(self) -> u64 {
        self.0
    }
}

impl PointId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl CurveId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic id counter
#[derive(Debug, Clone)]
pub struct IdAllocator<T> {
    first: u64,
    next: u64,
    _kind: PhantomData<T>,
}

impl<T: RawId> IdAllocator<T> {
    /// Create an allocator whose first id is `first`
    pub fn starting_at(first: u64) -> Self {
        Self {
            first,
            next: first,
            _kind: PhantomData,
        }
    }

    /// Hand out the next id
    pub fn allocate(&mut self) -> T {
        let id = T::from_raw(self.next);
        self.next += 1;
        id
    }

    /// The id the next call to `allocate` will return
    pub fn peek(&self) -> T {
        T::from_raw(self.next)
    }

    /// Rewind to the first id
    pub fn reset(&mut self) {
        self.next = self.first;
    }
}
