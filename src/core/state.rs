use rustc_hash::FxHashSet;
use slotmap::{SecondaryMap, SlotMap, new_key_type};

use crate::config::ConfigError;

pub type Ticks = u64;

new_key_type! {
    pub struct ProcessKey;
}

/// One schedulable unit. Identity is fixed at construction; only
/// `remaining_time` changes while the simulation runs. A table resets it to
/// `burst_time` on insertion, whatever the caller left in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub name: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub remaining_time: Ticks,
}

impl ProcessRecord {
    pub fn new(name: impl Into<String>, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            name: name.into(),
            arrival_time,
            burst_time,
            remaining_time: burst_time,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.remaining_time == 0
    }
}

/// Bookkeeping gathered while a process is simulated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub admitted_at: Option<Ticks>,
    pub first_run: Option<Ticks>,
    pub completion: Option<Ticks>,
}

/// Owns every record of a run. Queues refer to records through `ProcessKey`.
#[derive(Debug, Clone)]
pub struct ProcessTable {
    records: SlotMap<ProcessKey, ProcessRecord>,
    stats: SecondaryMap<ProcessKey, RunStats>,
    // Keys in input order; arrival ties are broken by position here
    order: Vec<ProcessKey>,
}

impl ProcessTable {
    pub fn new(processes: Vec<ProcessRecord>) -> Result<Self, ConfigError> {
        let mut records = SlotMap::with_capacity_and_key(processes.len());
        let mut stats = SecondaryMap::with_capacity(processes.len());
        let mut order = Vec::with_capacity(processes.len());
        let mut names = FxHashSet::default();
        let mut horizon = TimeHorizon::default();

        for mut process in processes {
            if process.name.is_empty() {
                return Err(ConfigError::EmptyName { line: None });
            }
            if process.burst_time == 0 {
                return Err(ConfigError::ZeroBurst {
                    process: process.name,
                    line: None,
                });
            }
            if !names.insert(process.name.clone()) {
                return Err(ConfigError::DuplicateName {
                    process: process.name,
                    line: None,
                });
            }
            if !horizon.extend(process.arrival_time, process.burst_time) {
                return Err(ConfigError::TimeOverflow {
                    process: process.name,
                    line: None,
                });
            }
            process.remaining_time = process.burst_time;

            let key = records.insert(process);
            stats.insert(key, RunStats::default());
            order.push(key);
        }

        Ok(Self {
            records,
            stats,
            order,
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProcessKey, &ProcessRecord)> + '_ {
        self.order.iter().map(|&key| (key, &self.records[key]))
    }

    pub fn get(&self, key: ProcessKey) -> &ProcessRecord {
        &self.records[key]
    }

    pub fn get_mut(&mut self, key: ProcessKey) -> &mut ProcessRecord {
        &mut self.records[key]
    }

    pub fn stats(&self, key: ProcessKey) -> RunStats {
        self.stats[key]
    }

    pub fn stats_mut(&mut self, key: ProcessKey) -> &mut RunStats {
        &mut self.stats[key]
    }

    pub fn find(&self, name: &str) -> Option<ProcessKey> {
        self.order
            .iter()
            .copied()
            .find(|&key| self.records[key].name == name)
    }

    pub fn total_remaining(&self) -> Ticks {
        self.records.values().map(|p| p.remaining_time).sum()
    }
}

/// Upper bound on the clock of a run: the last arrival plus every burst.
/// Idle time only ever fills gaps before an arrival, so no run outlasts it.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TimeHorizon {
    last_arrival: Ticks,
    total_burst: Ticks,
}

impl TimeHorizon {
    /// Adds a process. Returns `false` once the bound no longer fits in `Ticks`.
    pub(crate) fn extend(&mut self, arrival: Ticks, burst: Ticks) -> bool {
        let Some(total_burst) = self.total_burst.checked_add(burst) else {
            return false;
        };
        let last_arrival = self.last_arrival.max(arrival);
        if last_arrival.checked_add(total_burst).is_none() {
            return false;
        }
        self.last_arrival = last_arrival;
        self.total_burst = total_burst;
        true
    }
}
