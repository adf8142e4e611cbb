//! Per-sample value histories of sample-accurate parameters.
//!
//! Three representations are recognised, one per container type:
//!
//! - linear: `Vec<Option<T>>`, one slot per sample of the current block;
//! - span: `Vec<TimedValue<T>>`, explicit `(frame, value)` records in frame order;
//! - dynamic: `BTreeMap<usize, T>`, keyed by sample index.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which per-sample history representation a parameter uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimedShape {
    Linear,
    Span,
    Dynamic,
}

/// A value tagged with the sample at which it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimedValue<T> {
    pub frame: usize,
    pub value: T,
}

impl<T> TimedValue<T> {
    pub fn new(frame: usize, value: T) -> Self {
        Self { frame, value }
    }
}

pub trait TimedValues {
    const SHAPE: TimedShape;

    type Item;

    /// All recorded changes in frame order.
    fn changes(&self) -> Vec<(usize, &Self::Item)>;

    /// Records `value` at `frame`, replacing any value already there.
    fn record(&mut self, frame: usize, value: Self::Item);

    /// Forgets every change. Linear histories keep their block size.
    fn clear(&mut self);

    /// The change with the highest frame.
    fn latest(&self) -> Option<&Self::Item> {
        self.changes().last().map(|(_, value)| *value)
    }

    fn has_changes(&self) -> bool {
        !self.changes().is_empty()
    }
}

/// An empty linear history sized for `block_size` samples.
pub fn linear_block<T>(block_size: usize) -> Vec<Option<T>> {
    std::iter::repeat_with(|| None).take(block_size).collect()
}

impl<T> TimedValues for Vec<Option<T>> {
    const SHAPE: TimedShape = TimedShape::Linear;

    type Item = T;

    fn changes(&self) -> Vec<(usize, &T)> {
        self.iter()
            .enumerate()
            .filter_map(|(frame, slot)| slot.as_ref().map(|value| (frame, value)))
            .collect()
    }

    fn record(&mut self, frame: usize, value: T) {
        if frame >= self.len() {
            self.resize_with(frame + 1, || None);
        }
        self[frame] = Some(value);
    }

    fn clear(&mut self) {
        self.iter_mut().for_each(|slot| *slot = None);
    }
}

impl<T> TimedValues for Vec<TimedValue<T>> {
    const SHAPE: TimedShape = TimedShape::Span;

    type Item = T;

    /// Sorted by frame even when records were pushed out of order. Records
    /// sharing a frame keep their push order.
    fn changes(&self) -> Vec<(usize, &T)> {
        let mut changes: Vec<_> = self.iter().map(|timed| (timed.frame, &timed.value)).collect();
        changes.sort_by_key(|(frame, _)| *frame);
        changes
    }

    fn record(&mut self, frame: usize, value: T) {
        match self.binary_search_by_key(&frame, |timed| timed.frame) {
            Ok(index) => self[index].value = value,
            Err(index) => self.insert(index, TimedValue::new(frame, value)),
        }
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }
}

impl<T> TimedValues for BTreeMap<usize, T> {
    const SHAPE: TimedShape = TimedShape::Dynamic;

    type Item = T;

    fn changes(&self) -> Vec<(usize, &T)> {
        self.iter().map(|(frame, value)| (*frame, value)).collect()
    }

    fn record(&mut self, frame: usize, value: T) {
        self.insert(frame, value);
    }

    fn clear(&mut self) {
        BTreeMap::clear(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_history_keeps_one_slot_per_sample() {
        let mut history: Vec<Option<f32>> = linear_block(8);
        history.record(5, 123.0);
        history.record(2, 1.0);

        assert_eq!(history.len(), 8);
        assert_eq!(history.changes(), vec![(2, &1.0), (5, &123.0)]);
        assert_eq!(history.latest(), Some(&123.0));

        TimedValues::clear(&mut history);
        assert_eq!(history.len(), 8);
        assert!(!history.has_changes());
    }

    #[test]
    fn linear_history_grows_past_the_block() {
        let mut history: Vec<Option<i32>> = linear_block(2);
        history.record(4, 9);
        assert_eq!(history.len(), 5);
        assert_eq!(history.latest(), Some(&9));
    }

    #[test]
    fn span_history_stays_in_frame_order() {
        let mut history: Vec<TimedValue<i32>> = Vec::new();
        history.record(10, 1);
        history.record(3, 2);
        history.record(10, 3);

        assert_eq!(history.changes(), vec![(3, &2), (10, &3)]);
        assert_eq!(history.latest(), Some(&3));
        assert_eq!(<Vec<TimedValue<i32>> as TimedValues>::SHAPE, TimedShape::Span);
    }

    #[test]
    fn pushed_spans_are_read_in_frame_order() {
        let history = vec![
            TimedValue::new(9, 0.9_f32),
            TimedValue::new(2, 0.2),
            TimedValue::new(5, 0.5),
        ];
        assert_eq!(history.changes(), vec![(2, &0.2), (5, &0.5), (9, &0.9)]);
        assert_eq!(history.latest(), Some(&0.9));
    }

    #[test]
    fn dynamic_history_is_keyed_by_frame() {
        let mut history: BTreeMap<usize, bool> = BTreeMap::new();
        history.record(7, true);
        history.record(1, false);

        assert_eq!(history.changes(), vec![(1, &false), (7, &true)]);
        history.clear();
        assert_eq!(history.latest(), None);
    }
}
