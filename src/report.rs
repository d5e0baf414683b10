//! Plain-text rendering of configurations and simulation results.

use std::fmt::Write;

use crate::{
    config::SimConfig,
    core::{SchedEvent, SimOutcome, Timeline},
    sim::{ProcessMetrics, Summary},
};

/// Echo of the parsed input: both quanta, then the process table.
pub fn render_parsed_values(config: &SimConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "tq0 = {}", config.quanta.tq0);
    let _ = writeln!(out, "tq1 = {}", config.quanta.tq1);
    let _ = writeln!(out, "process_table = ");
    let _ = writeln!(out, "Process\tArrival\tBurst");
    for p in &config.processes {
        let _ = writeln!(out, "{}\t{}\t{}", p.name, p.arrival_time, p.burst_time);
    }
    out
}

/// `Gantt Chart = 0 A 4 B 8 `: the start time, then each owner followed by
/// the time its segment ends.
pub fn render_gantt(timeline: &Timeline) -> String {
    let mut out = String::from("Gantt Chart = 0 ");
    for (_, end, owner) in timeline.boundaries() {
        let _ = write!(out, "{owner} {end} ");
    }
    out
}

pub fn render_stats(metrics: &[ProcessMetrics], summary: &Summary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Process\tArrival\tBurst\tStart\tFinish\tTurnaround\tWaiting\tResponse"
    );
    for m in metrics {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            m.name,
            m.arrival,
            m.burst,
            m.first_run,
            m.completion,
            m.turnaround(),
            m.waiting(),
            m.response()
        );
    }
    let _ = writeln!(out, "Average turnaround = {:.2}", summary.avg_turnaround);
    let _ = writeln!(out, "Average waiting = {:.2}", summary.avg_waiting);
    let _ = writeln!(out, "Average response = {:.2}", summary.avg_response);
    let _ = writeln!(out, "Longest wait = {}", summary.max_waiting);
    let _ = writeln!(out, "CPU utilization = {:.1}%", summary.utilization * 100.0);
    out
}

/// One line per scheduling decision.
pub fn render_events(outcome: &SimOutcome) -> String {
    let mut out = String::new();
    for event in &outcome.events {
        let t = event.at();
        let _ = match *event {
            SchedEvent::Admitted { process, .. } => {
                writeln!(out, "t={t} admit {}", outcome.name_of(process))
            }
            SchedEvent::Dispatched {
                process,
                level,
                granted,
                ..
            } => writeln!(out, "t={t} run {} on {level} for {granted}", outcome.name_of(process)),
            SchedEvent::Demoted { process, .. } => {
                writeln!(out, "t={t} demote {} to L1", outcome.name_of(process))
            }
            SchedEvent::Requeued { process, .. } => {
                writeln!(out, "t={t} requeue {} on L1", outcome.name_of(process))
            }
            SchedEvent::Completed { process, .. } => {
                writeln!(out, "t={t} complete {}", outcome.name_of(process))
            }
            SchedEvent::CpuIdle { until, .. } => writeln!(out, "t={t} idle until {until}"),
        };
    }
    out
}
