//! Simulation input: quanta, admission policy and the process table.
//!
//! Two textual forms are accepted. The legacy form is line oriented:
//!
//! ```text
//! # comment lines and blank lines are skipped
//! tq0 = 2
//! tq1 = 4
//! process_table_size = 2
//! process_table =
//! A 0 5
//! B 1 3
//! ```
//!
//! The TOML form carries the same data:
//!
//! ```toml
//! tq0 = 2
//! tq1 = 4
//! admission = "cycle-boundary"
//!
//! [[process]]
//! name = "A"
//! arrival = 0
//! burst = 5
//! ```
//!
//! Both go through the same validation, so they reject the same inputs.

mod error;
mod legacy;
mod toml_format;

use std::fs;
use std::num::NonZeroU64;
use std::path::Path;

use rustc_hash::FxHashSet;

pub use error::ConfigError;
pub use legacy::parse_legacy;
pub use toml_format::parse_toml;

use crate::core::{ProcessRecord, Ticks, TimeHorizon};
use crate::scheduler::{Admission, Quanta};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub quanta: Quanta,
    pub admission: Admission,
    pub processes: Vec<ProcessRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Legacy,
    Toml,
}

impl ConfigFormat {
    /// `.toml` files are TOML; anything else is the legacy format.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Legacy,
        }
    }
}

impl SimConfig {
    pub fn parse(input: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Legacy => parse_legacy(input),
            ConfigFormat::Toml => parse_toml(input),
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let input = fs::read_to_string(path)?;
        Self::parse(&input, ConfigFormat::from_path(path))
    }
}

pub(crate) fn quantum(key: &'static str, value: i64) -> Result<NonZeroU64, ConfigError> {
    let value = non_negative(key, value, None)?;
    NonZeroU64::new(value).ok_or(ConfigError::ZeroQuantum { key })
}

pub(crate) fn quanta(tq0: i64, tq1: i64) -> Result<Quanta, ConfigError> {
    Ok(Quanta::new(quantum("tq0", tq0)?, quantum("tq1", tq1)?))
}

pub(crate) fn non_negative(key: &str, value: i64, line: Option<usize>) -> Result<Ticks, ConfigError> {
    Ticks::try_from(value).map_err(|_| ConfigError::NegativeValue {
        key: key.to_string(),
        value,
        line,
    })
}

/// Accumulates table rows, rejecting anything the scheduler would refuse.
#[derive(Debug, Default)]
pub(crate) struct ProcessRows {
    rows: Vec<ProcessRecord>,
    names: FxHashSet<String>,
    horizon: TimeHorizon,
}

impl ProcessRows {
    pub fn push(
        &mut self,
        name: &str,
        arrival: i64,
        burst: i64,
        line: Option<usize>,
    ) -> Result<(), ConfigError> {
        if name.is_empty() {
            return Err(ConfigError::EmptyName { line });
        }
        let arrival = non_negative(&format!("arrival time of {name}"), arrival, line)?;
        let burst = non_negative(&format!("burst time of {name}"), burst, line)?;
        if burst == 0 {
            return Err(ConfigError::ZeroBurst {
                process: name.to_string(),
                line,
            });
        }
        if !self.names.insert(name.to_string()) {
            return Err(ConfigError::DuplicateName {
                process: name.to_string(),
                line,
            });
        }
        if !self.horizon.extend(arrival, burst) {
            return Err(ConfigError::TimeOverflow {
                process: name.to_string(),
                line,
            });
        }

        self.rows.push(ProcessRecord::new(name, arrival, burst));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn into_records(self) -> Vec<ProcessRecord> {
        self.rows
    }
}
