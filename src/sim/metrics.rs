use average::{Estimate, Mean};

use crate::core::{SimOutcome, Ticks};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessMetrics {
    pub name: String,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub first_run: Ticks,
    pub completion: Ticks,
}

impl ProcessMetrics {
    pub fn turnaround(&self) -> Ticks {
        self.completion - self.arrival
    }

    // Time spent ready but not running
    pub fn waiting(&self) -> Ticks {
        self.turnaround() - self.burst
    }

    pub fn response(&self) -> Ticks {
        self.first_run - self.arrival
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub avg_turnaround: f64,
    pub avg_waiting: f64,
    pub avg_response: f64,
    pub max_waiting: Ticks,
    /// Share of the run the CPU was busy, in `[0, 1]`.
    pub utilization: f64,
}

/// Per-process figures in input order.
pub fn process_metrics(outcome: &SimOutcome) -> Vec<ProcessMetrics> {
    outcome
        .processes
        .iter()
        .map(|(key, process)| {
            let stats = outcome.processes.stats(key);
            ProcessMetrics {
                name: process.name.clone(),
                arrival: process.arrival_time,
                burst: process.burst_time,
                first_run: stats.first_run.expect("Finished process never dispatched"),
                completion: stats.completion.expect("Finished process has no completion time"),
            }
        })
        .collect()
}

pub fn summarize(outcome: &SimOutcome, metrics: &[ProcessMetrics]) -> Summary {
    let busy = outcome.total_time - outcome.timeline.idle_time();
    let utilization = if outcome.total_time == 0 {
        0.0
    } else {
        busy as f64 / outcome.total_time as f64
    };

    Summary {
        avg_turnaround: avg(metrics.iter().map(|m| m.turnaround() as f64)),
        avg_waiting: avg(metrics.iter().map(|m| m.waiting() as f64)),
        avg_response: avg(metrics.iter().map(|m| m.response() as f64)),
        max_waiting: metrics.iter().map(ProcessMetrics::waiting).max().unwrap_or(0),
        utilization,
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU64;

    use super::*;
    use crate::{
        core::{MlfqScheduler, ProcessRecord},
        scheduler::{Admission, Quanta},
    };

    fn outcome(procs: Vec<ProcessRecord>) -> SimOutcome {
        let quanta = Quanta::new(NonZeroU64::new(1).unwrap(), NonZeroU64::new(2).unwrap());
        MlfqScheduler::new(quanta, Admission::CycleBoundary, procs)
            .unwrap()
            .run()
    }

    #[test]
    fn interleaved_pair_metrics() {
        let out = outcome(vec![
            ProcessRecord::new("A", 0, 2),
            ProcessRecord::new("B", 0, 2),
        ]);
        let m = process_metrics(&out);

        assert_eq!((m[0].turnaround(), m[0].waiting(), m[0].response()), (3, 1, 0));
        assert_eq!((m[1].turnaround(), m[1].waiting(), m[1].response()), (4, 2, 1));

        let s = summarize(&out, &m);
        assert_eq!(s.avg_turnaround, 3.5);
        assert_eq!(s.avg_waiting, 1.5);
        assert_eq!(s.avg_response, 0.5);
        assert_eq!(s.max_waiting, 2);
        assert_eq!(s.utilization, 1.0);
    }

    #[test]
    fn idle_time_lowers_utilization() {
        let out = outcome(vec![ProcessRecord::new("A", 2, 2)]);
        let s = summarize(&out, &process_metrics(&out));
        assert_eq!(s.utilization, 0.5);
    }

    #[test]
    fn empty_run_summarizes_to_zero() {
        let out = outcome(Vec::new());
        let s = summarize(&out, &process_metrics(&out));
        assert_eq!(s.max_waiting, 0);
        assert_eq!(s.utilization, 0.0);
    }
}
