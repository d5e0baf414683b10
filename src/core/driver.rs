use log::{debug, info, trace};

use super::{
    arrivals::ArrivalQueue,
    event::SchedEvent,
    observer::Observer,
    queue::QueueSet,
    state::{ProcessKey, ProcessRecord, ProcessTable, Ticks},
    timeline::{SegmentOwner, Timeline, TimelineBuilder},
};
use crate::config::ConfigError;
use crate::scheduler::{Admission, Level, Quanta};

/// Everything a finished run produces.
#[derive(Debug, Clone)]
pub struct SimOutcome {
    pub timeline: Timeline,
    pub total_time: Ticks,
    pub events: Vec<SchedEvent>,
    pub processes: ProcessTable,
}

impl SimOutcome {
    pub fn name_of(&self, process: ProcessKey) -> &str {
        &self.processes.get(process).name
    }
}

/// Two-level MLFQ over simulated time. Time moves in service events: each
/// dispatch grants `min(quantum, remaining)` and the clock jumps by that much.
pub struct MlfqScheduler {
    table: ProcessTable,
    queues: QueueSet,
    arrivals: ArrivalQueue,
    timeline: TimelineBuilder,
    events: Vec<SchedEvent>,
    observer: Observer,
    quanta: Quanta,
    admission: Admission,
    now: Ticks,
}

impl MlfqScheduler {
    pub fn new(
        quanta: Quanta,
        admission: Admission,
        processes: Vec<ProcessRecord>,
    ) -> Result<Self, ConfigError> {
        let table = ProcessTable::new(processes)?;
        let arrivals = ArrivalQueue::new(&table);

        Ok(Self {
            table,
            queues: QueueSet::new(),
            arrivals,
            timeline: TimelineBuilder::new(),
            events: Vec::new(),
            observer: Observer::new(),
            quanta,
            admission,
            now: 0,
        })
    }

    pub fn run(mut self) -> SimOutcome {
        self.admit_arrivals();

        loop {
            if self.queues.is_all_empty() {
                match self.arrivals.next_arrival() {
                    Some(next) => {
                        self.idle_until(next);
                        self.admit_arrivals();
                    }
                    None => break,
                }
            }

            self.run_cycle();
            self.admit_arrivals();
        }

        debug_assert_eq!(
            self.table.total_remaining(),
            0,
            "Run ended with work left in the process table"
        );
        debug_assert_eq!(self.timeline.total(), self.now);

        info!(
            "simulated {} processes in {} ticks over {} slices ({})",
            self.table.len(),
            self.now,
            self.observer.steps(),
            self.admission
        );

        SimOutcome {
            timeline: self.timeline.finalize(),
            total_time: self.now,
            events: self.events,
            processes: self.table,
        }
    }

    // Level 0 to empty, then level 1 to empty
    fn run_cycle(&mut self) {
        self.drain(Level::Zero);
        self.drain(Level::One);
    }

    fn drain(&mut self, level: Level) {
        while !self.queues.is_level_empty(level) {
            self.service_head(level);

            if self.admission == Admission::EverySlice {
                self.admit_arrivals();
                if level == Level::One && !self.queues.is_level_empty(Level::Zero) {
                    debug!("t={} level 0 refilled, leaving level 1 drain", self.now);
                    return;
                }
            }
        }
    }

    fn service_head(&mut self, level: Level) {
        let key = self
            .queues
            .dequeue_head(level)
            .expect("Ready queue emptied between check and dequeue");
        let quantum = self.quanta.for_level(level);
        let start = self.now;

        let process = self.table.get_mut(key);
        let granted = process.remaining_time.min(quantum);
        process.remaining_time -= granted;
        let owner = SegmentOwner::Process(process.name.clone());
        let complete = process.is_complete();

        self.now += granted;
        self.table.stats_mut(key).first_run.get_or_insert(start);
        self.timeline.record(owner, granted);
        self.events.push(SchedEvent::Dispatched {
            process: key,
            level,
            at: start,
            granted,
        });
        trace!(
            "t={start} {level} runs {} for {granted}",
            self.table.get(key).name
        );

        if complete {
            self.table.stats_mut(key).completion = Some(self.now);
            self.events.push(SchedEvent::Completed {
                process: key,
                at: self.now,
            });
            debug!("t={} {} completed", self.now, self.table.get(key).name);
        } else {
            let next = level.demoted();
            self.queues.enqueue(next, key);
            self.events.push(match level {
                Level::Zero => SchedEvent::Demoted {
                    process: key,
                    at: self.now,
                },
                Level::One => SchedEvent::Requeued {
                    process: key,
                    at: self.now,
                },
            });
            debug!(
                "t={} {} used its {level} quantum, {} left, now on {next}",
                self.now,
                self.table.get(key).name,
                self.table.get(key).remaining_time
            );
        }

        self.observer.observe(&self.table, &self.queues);
    }

    fn admit_arrivals(&mut self) {
        while let Some(key) = self.arrivals.pop_arrived(self.now) {
            self.queues.enqueue(Level::Zero, key);
            self.table.stats_mut(key).admitted_at = Some(self.now);
            self.events.push(SchedEvent::Admitted {
                process: key,
                at: self.now,
            });
            debug!(
                "t={} admitted {} (arrived at {})",
                self.now,
                self.table.get(key).name,
                self.table.get(key).arrival_time
            );
        }
    }

    fn idle_until(&mut self, until: Ticks) {
        debug_assert!(until > self.now, "Idle jump must move time forward");
        debug!("t={} cpu idle until {until}", self.now);

        self.events.push(SchedEvent::CpuIdle {
            from: self.now,
            until,
        });
        self.timeline.record(SegmentOwner::Idle, until - self.now);
        self.now = until;
    }
}
