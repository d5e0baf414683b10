use keyed_priority_queue::KeyedPriorityQueue;

use super::state::{ProcessKey, ProcessTable, Ticks};

/// Admission order: earliest arrival first, input order among equal arrivals.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub struct ArrivalOrder {
    pub arrival: Ticks,
    pub seq: usize,
}

// KeyedPriorityQueue is a max-heap, so the comparison is reversed
impl PartialOrd for ArrivalOrder {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ArrivalOrder {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (other.arrival, other.seq).cmp(&(self.arrival, self.seq))
    }
}

/// Processes that have not been admitted to a ready queue yet.
#[derive(Debug)]
pub struct ArrivalQueue {
    pending: KeyedPriorityQueue<ProcessKey, ArrivalOrder>,
}

impl ArrivalQueue {
    pub fn new(table: &ProcessTable) -> Self {
        let mut pending = KeyedPriorityQueue::with_capacity(table.len());
        for (seq, (key, process)) in table.iter().enumerate() {
            pending.push(
                key,
                ArrivalOrder {
                    arrival: process.arrival_time,
                    seq,
                },
            );
        }
        Self { pending }
    }

    /// Earliest arrival time still pending.
    pub fn next_arrival(&self) -> Option<Ticks> {
        self.pending.peek().map(|(_, order)| order.arrival)
    }

    /// Removes and returns the next process that has arrived by `now`.
    pub fn pop_arrived(&mut self, now: Ticks) -> Option<ProcessKey> {
        if self.next_arrival()? > now {
            return None;
        }
        self.pending.pop().map(|(key, _)| key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProcessRecord;

    #[test]
    fn arrivals_pop_by_time_then_input_order() {
        let table = ProcessTable::new(vec![
            ProcessRecord::new("late", 5, 1),
            ProcessRecord::new("first", 0, 1),
            ProcessRecord::new("second", 0, 1),
            ProcessRecord::new("mid", 3, 1),
        ])
        .unwrap();
        let mut arrivals = ArrivalQueue::new(&table);
        let name = |k| table.get(k).name.as_str();

        assert_eq!(arrivals.next_arrival(), Some(0));
        assert_eq!(arrivals.pop_arrived(0).map(name), Some("first"));
        assert_eq!(arrivals.pop_arrived(0).map(name), Some("second"));
        assert_eq!(arrivals.pop_arrived(0), None);

        // Both 3 and 5 are due by t=6
        assert_eq!(arrivals.pop_arrived(6).map(name), Some("mid"));
        assert_eq!(arrivals.pop_arrived(6).map(name), Some("late"));
        assert_eq!(arrivals.next_arrival(), None);
    }
}
