use crate::core::{ProcessKey, Ticks};
use crate::scheduler::Level;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedEvent {
    Admitted {
        process: ProcessKey,
        at: Ticks,
    },
    Dispatched {
        process: ProcessKey,
        level: Level,
        at: Ticks,
        granted: Ticks,
    },
    // Quantum expired on level 0
    Demoted {
        process: ProcessKey,
        at: Ticks,
    },
    // Quantum expired on level 1
    Requeued {
        process: ProcessKey,
        at: Ticks,
    },
    Completed {
        process: ProcessKey,
        at: Ticks,
    },
    // Nothing runnable until the next arrival
    CpuIdle {
        from: Ticks,
        until: Ticks,
    },
}

impl SchedEvent {
    pub fn at(&self) -> Ticks {
        match *self {
            SchedEvent::Admitted { at, .. }
            | SchedEvent::Dispatched { at, .. }
            | SchedEvent::Demoted { at, .. }
            | SchedEvent::Requeued { at, .. }
            | SchedEvent::Completed { at, .. } => at,
            SchedEvent::CpuIdle { from, .. } => from,
        }
    }
}
