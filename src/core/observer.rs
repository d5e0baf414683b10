use super::{queue::QueueSet, state::ProcessTable};
use crate::scheduler::Level;

/// Checks queue/process consistency after every scheduling step.
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, table: &ProcessTable, queues: &QueueSet) {
        self.step += 1;

        for (key, process) in table.iter() {
            debug_assert!(
                process.remaining_time <= process.burst_time,
                "Process {} has remaining {} above burst {}",
                process.name,
                process.remaining_time,
                process.burst_time
            );
            if process.is_complete() {
                debug_assert!(
                    queues.level_of(key).is_none(),
                    "Completed process {} still present in a ready queue",
                    process.name
                );
                debug_assert!(
                    table.stats(key).completion.is_some(),
                    "Process {} has no work left but no completion time",
                    process.name
                );
            }
        }

        for (key, level) in queues.membership() {
            debug_assert!(
                !table.get(key).is_complete(),
                "Completed process {} present in {level}",
                table.get(key).name
            );
            debug_assert!(
                queues.iter(level).any(|k| k == key),
                "Membership claims {} in {level}, but queue does not contain it",
                table.get(key).name
            );
        }

        let queued: usize = Level::ALL.iter().map(|&l| queues.len(l)).sum();
        debug_assert_eq!(
            queued,
            queues.membership().count(),
            "Queue lengths disagree with membership map"
        );
    }
}
