//! Timing layer - absolute start times and indices derived from content
//!
//! Results are memoized by content identity (`Arc::ptr_eq`). Content is never mutated
//! in place, so a pointer match means the cached flattening is still valid.

use std::cell::RefCell;
use std::sync::Arc;

use super::document::{Content, Item};

/// Tolerance for comparing times derived by repeated floating point summation
pub const EPSILON: f64 = 0.00001;

/// Approximate float equality within [`EPSILON`]
#[inline]
pub fn rough_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// An item placed on the document timeline
#[derive(Debug, Clone, PartialEq)]
pub struct TimedItem {
    pub item: Item,
    /// Seconds from document start
    pub absolute_start: f64,
    /// Position in the content sequence
    pub absolute_index: usize,
}

impl TimedItem {
    pub fn length(&self) -> f64 {
        self.item.length()
    }

    pub fn absolute_end(&self) -> f64 {
        self.absolute_start + self.length()
    }
}

/// Assign absolute start times and indices in one linear scan
pub fn flatten(content: &[Item]) -> Vec<TimedItem> {
    let mut clock = 0.0;
    content
        .iter()
        .enumerate()
        .map(|(absolute_index, item)| {
            let timed = TimedItem {
                item: item.clone(),
                absolute_start: clock,
                absolute_index,
            };
            clock += item.length();
            timed
        })
        .collect()
}

/// Greatest index whose start is `<= time`, or `None` if `time` precedes every item
pub fn index_at_time(timed: &[TimedItem], time: f64) -> Option<usize> {
    timed
        .partition_point(|item| item.absolute_start <= time)
        .checked_sub(1)
}

/// Memoized [`flatten`] keyed by content identity
#[derive(Debug, Default)]
pub struct TimingCache {
    entry: RefCell<Option<(Content, Arc<[TimedItem]>)>>,
}

impl Clone for TimingCache {
    fn clone(&self) -> Self {
        Self {
            entry: RefCell::new(self.entry.borrow().clone()),
        }
    }
}

impl TimingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timed items for `content`, recomputed only when the content pointer changes
    pub fn get(&self, content: &Content) -> Arc<[TimedItem]> {
        let mut entry = self.entry.borrow_mut();
        if let Some((cached, timed)) = entry.as_ref() {
            if Arc::ptr_eq(cached, content) {
                return Arc::clone(timed);
            }
        }

        tracing::debug!(target: "timing", items = content.len(), "flattening content");
        let timed: Arc<[TimedItem]> = flatten(content).into();
        *entry = Some((Arc::clone(content), Arc::clone(&timed)));
        timed
    }
}
