pub mod config;
pub mod core;
pub mod report;
pub mod scheduler;
pub mod sim;

pub use config::{ConfigError, SimConfig};
pub use core::{MlfqScheduler, ProcessRecord, SchedEvent, SimOutcome, Timeline};
pub use scheduler::{Admission, Level, Quanta};
pub use sim::Sim;
