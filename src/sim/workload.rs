use rand::prelude::*;

use crate::core::{ProcessRecord, Ticks};

/// Shape of a randomly generated process table.
#[derive(Debug, Clone, Copy)]
pub struct BernoulliWorkload {
    /// Arrivals are drawn at every tick in `0..horizon`.
    pub horizon: Ticks,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_burst: Ticks,
    pub long_burst: Ticks,
}

impl Default for BernoulliWorkload {
    fn default() -> Self {
        Self {
            horizon: 40,
            p_arrival: 0.3,
            p_short: 0.3,
            short_burst: 2,
            long_burst: 6,
        }
    }
}

impl BernoulliWorkload {
    /// Each tick spawns a process with probability `p_arrival`; a spawned
    /// process is short with probability `p_short`. Same seed, same table.
    pub fn generate(&self, seed: u64) -> Vec<ProcessRecord> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut processes = Vec::new();

        for t in 0..self.horizon {
            if rng.random::<f64>() < self.p_arrival {
                let burst = if rng.random::<f64>() < self.p_short {
                    self.short_burst
                } else {
                    self.long_burst
                };

                processes.push(ProcessRecord::new(
                    format!("P{}", processes.len()),
                    t,
                    burst,
                ));
            }
        }

        processes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_table() {
        let w = BernoulliWorkload::default();
        assert_eq!(w.generate(7), w.generate(7));
    }

    #[test]
    fn arrivals_are_ordered_and_bursts_valid() {
        let w = BernoulliWorkload {
            horizon: 200,
            ..BernoulliWorkload::default()
        };
        let procs = w.generate(1);

        assert!(!procs.is_empty());
        assert!(procs.windows(2).all(|p| p[0].arrival_time < p[1].arrival_time));
        assert!(
            procs
                .iter()
                .all(|p| p.burst_time == w.short_burst || p.burst_time == w.long_burst)
        );
        assert!(procs.iter().all(|p| p.arrival_time < w.horizon));
    }

    #[test]
    fn certain_arrival_fills_every_tick() {
        let w = BernoulliWorkload {
            horizon: 5,
            p_arrival: 1.0,
            ..BernoulliWorkload::default()
        };
        assert_eq!(w.generate(3).len(), 5);
    }
}
