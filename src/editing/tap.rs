// Copyright 2025 the Curvedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Single/double tap disambiguation on segments.
//!
//! Each segment is tracked under its own key, so taps on different
//! segments never interfere. A first tap records its time and schedules a
//! deferred straighten; a second tap on the same segment within the
//! threshold cancels the deferred action and straightens immediately. In
//! delete mode a tap deletes at once and clears the segment's state.

use super::scheduler::Scheduler;
use crate::model::PointId;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Unordered pair of segment endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentKey {
    low: PointId,
    high: PointId,
}

impl SegmentKey {
    pub fn new(a: PointId, b: PointId) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }
}

/// An edit requested by tap handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapAction {
    Delete { start: PointId, end: PointId },
    Straighten { start: PointId, end: PointId },
}

#[derive(Debug, Clone)]
pub struct TapTracker {
    threshold: Duration,
    last_tap: HashMap<SegmentKey, Instant>,
    deferred: Scheduler<SegmentKey, (PointId, PointId)>,
}

impl TapTracker {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            last_tap: HashMap::new(),
            deferred: Scheduler::new(),
        }
    }

    /// Register a tap on the segment `start -> end` at `now`.
    ///
    /// Returns the action to perform right away, if any. Callers should
    /// `poll` up to `now` first so a deferred action that came due before
    /// this tap is not mistaken for a pending one.
    pub fn tap(
        &mut self,
        start: PointId,
        end: PointId,
        now: Instant,
        delete_mode: bool,
    ) -> Option<TapAction> {
        let key = SegmentKey::new(start, end);

        if delete_mode {
            self.forget(&key);
            return Some(TapAction::Delete { start, end });
        }

        let is_double = self
            .last_tap
            .get(&key)
            .is_some_and(|&prev| now.saturating_duration_since(prev) < self.threshold);
        if is_double {
            self.forget(&key);
            tracing::debug!("Double tap on segment {}-{}", start, end);
            return Some(TapAction::Straighten { start, end });
        }

        self.last_tap.insert(key, now);
        self.deferred.schedule(key, now + self.threshold, (start, end));
        None
    }

    /// Deferred actions that have come due by `now`
    pub fn poll(&mut self, now: Instant) -> Vec<TapAction> {
        self.deferred
            .take_due(now)
            .into_iter()
            .map(|(key, (start, end))| {
                self.last_tap.remove(&key);
                TapAction::Straighten { start, end }
            })
            .collect()
    }

    pub fn pending(&self) -> usize {
        self.deferred.len()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.deferred.next_due()
    }

    pub fn clear(&mut self) {
        self.last_tap.clear();
        self.deferred.clear();
    }

    fn forget(&mut self, key: &SegmentKey) {
        self.deferred.cancel(key);
        self.last_tap.remove(key);
    }
}
