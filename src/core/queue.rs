use std::collections::VecDeque;
use std::fmt;

use rustc_hash::FxHashMap;

use super::state::ProcessKey;
use crate::scheduler::{Level, NUM_LEVELS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    Empty { level: Level },
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { level } => write!(f, "ready queue {level} is empty"),
        }
    }
}

impl std::error::Error for QueueError {}

/// The two FIFO ready queues.
#[derive(Debug, Default)]
pub struct QueueSet {
    levels: [VecDeque<ProcessKey>; NUM_LEVELS],
    // Which level each queued process sits on
    membership: FxHashMap<ProcessKey, Level>,
}

impl QueueSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, level: Level, process: ProcessKey) {
        if let Some(current) = self.membership.insert(process, level) {
            panic!("Process {process:?} already present in {current}");
        }
        self.levels[level.index()].push_back(process);
    }

    pub fn dequeue_head(&mut self, level: Level) -> Result<ProcessKey, QueueError> {
        let process = self.levels[level.index()]
            .pop_front()
            .ok_or(QueueError::Empty { level })?;

        let removed = self.membership.remove(&process);
        debug_assert_eq!(removed, Some(level), "Process {process:?} missing queue membership");

        Ok(process)
    }

    pub fn is_level_empty(&self, level: Level) -> bool {
        self.levels[level.index()].is_empty()
    }

    pub fn is_all_empty(&self) -> bool {
        self.membership.is_empty()
    }

    pub fn len(&self, level: Level) -> usize {
        self.levels[level.index()].len()
    }

    /// Members of `level`, head first.
    pub fn iter(&self, level: Level) -> impl Iterator<Item = ProcessKey> + '_ {
        self.levels[level.index()].iter().copied()
    }

    pub fn level_of(&self, process: ProcessKey) -> Option<Level> {
        self.membership.get(&process).copied()
    }

    pub(crate) fn membership(&self) -> impl Iterator<Item = (ProcessKey, Level)> + '_ {
        self.membership.iter().map(|(&k, &l)| (k, l))
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    fn keys(n: usize) -> Vec<ProcessKey> {
        let mut map = SlotMap::<ProcessKey, ()>::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn fifo_order_is_preserved() {
        let k = keys(3);
        let mut q = QueueSet::new();
        for &key in &k {
            q.enqueue(Level::Zero, key);
        }

        assert_eq!(q.dequeue_head(Level::Zero), Ok(k[0]));
        assert_eq!(q.iter(Level::Zero).collect::<Vec<_>>(), [k[1], k[2]]);
        assert_eq!(q.dequeue_head(Level::Zero), Ok(k[1]));
        assert_eq!(q.dequeue_head(Level::Zero), Ok(k[2]));
        assert!(q.is_all_empty());
    }

    #[test]
    fn empty_level_signals_empty() {
        let k = keys(1);
        let mut q = QueueSet::new();
        q.enqueue(Level::One, k[0]);

        assert!(q.is_level_empty(Level::Zero));
        assert!(!q.is_all_empty());
        assert_eq!(
            q.dequeue_head(Level::Zero),
            Err(QueueError::Empty { level: Level::Zero })
        );
        assert_eq!(q.level_of(k[0]), Some(Level::One));
    }

    #[test]
    fn process_can_move_between_levels() {
        let k = keys(1);
        let mut q = QueueSet::new();
        q.enqueue(Level::Zero, k[0]);
        let p = q.dequeue_head(Level::Zero).unwrap();
        q.enqueue(Level::One, p);

        assert_eq!(q.len(Level::Zero), 0);
        assert_eq!(q.len(Level::One), 1);
        assert_eq!(q.level_of(p), Some(Level::One));
    }

    #[test]
    #[should_panic(expected = "already present")]
    fn double_enqueue_panics() {
        let k = keys(1);
        let mut q = QueueSet::new();
        q.enqueue(Level::Zero, k[0]);
        q.enqueue(Level::One, k[0]);
    }
}
