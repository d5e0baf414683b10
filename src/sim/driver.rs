use crate::{
    config::{ConfigError, SimConfig},
    core::{MlfqScheduler, SimOutcome},
};

/// A validated configuration, ready to be simulated any number of times.
/// Every call to [`Sim::run`] builds a fresh scheduler, so runs never share state.
#[derive(Debug, Clone)]
pub struct Sim {
    config: SimConfig,
}

impl Sim {
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn run(&self) -> Result<SimOutcome, ConfigError> {
        let scheduler = MlfqScheduler::new(
            self.config.quanta,
            self.config.admission,
            self.config.processes.clone(),
        )?;
        Ok(scheduler.run())
    }
}
