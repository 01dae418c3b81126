// Copyright 2025 the Curvedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Keyed, cancellable deferred tasks.
//!
//! At most one task is pending per key; scheduling under a key that is
//! already pending replaces the old task. Nothing runs on its own: the
//! owner polls with the current time and receives every task whose due
//! time has passed.

use std::collections::BTreeMap;
use std::time::Instant;

#[derive(Debug, Clone)]
struct Scheduled<T> {
    due: Instant,
    task: T,
}

#[derive(Debug, Clone)]
pub struct Scheduler<K, T> {
    pending: BTreeMap<K, Scheduled<T>>,
}

impl<K: Ord + Clone, T> Scheduler<K, T> {
    pub fn new() -> Self {
        Self {
            pending: BTreeMap::new(),
        }
    }

    /// Schedule `task` to come due at `due`, returning any task it replaced
    pub fn schedule(&mut self, key: K, due: Instant, task: T) -> Option<T> {
        self.pending
            .insert(key, Scheduled { due, task })
            .map(|old| old.task)
    }

    /// Cancel the task pending under `key`
    pub fn cancel(&mut self, key: &K) -> Option<T> {
        self.pending.remove(key).map(|s| s.task)
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest due time among pending tasks
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.values().map(|s| s.due).min()
    }

    /// Remove and return every task due at or before `now`, earliest first
    pub fn take_due(&mut self, now: Instant) -> Vec<(K, T)> {
        let mut due_keys: Vec<(Instant, K)> = self
            .pending
            .iter()
            .filter(|(_, s)| s.due <= now)
            .map(|(k, s)| (s.due, k.clone()))
            .collect();
        due_keys.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

        due_keys
            .into_iter()
            .filter_map(|(_, key)| {
                let scheduled = self.pending.remove(&key)?;
                Some((key, scheduled.task))
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<K: Ord + Clone, T> Default for Scheduler<K, T> {
    fn default() -> Self {
        Self::new()
    }
}
