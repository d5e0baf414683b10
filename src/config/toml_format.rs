use serde::Deserialize;

use super::{ConfigError, ProcessRows, SimConfig, quanta};
use crate::scheduler::Admission;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    tq0: i64,
    tq1: i64,
    #[serde(default)]
    admission: Admission,
    #[serde(default, rename = "process")]
    processes: Vec<RawProcess>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProcess {
    name: String,
    arrival: i64,
    burst: i64,
}

pub fn parse_toml(input: &str) -> Result<SimConfig, ConfigError> {
    let raw: RawConfig = toml::from_str(input)?;

    let mut rows = ProcessRows::default();
    for p in &raw.processes {
        rows.push(&p.name, p.arrival, p.burst, None)?;
    }

    Ok(SimConfig {
        quanta: quanta(raw.tq0, raw.tq1)?,
        admission: raw.admission,
        processes: rows.into_records(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProcessRecord;

    #[test]
    fn parses_processes_and_policy() {
        let cfg = parse_toml(
            r#"
tq0 = 3
tq1 = 6
admission = "every-slice"

[[process]]
name = "A"
arrival = 0
burst = 8

[[process]]
name = "B"
arrival = 2
burst = 1
"#,
        )
        .unwrap();

        assert_eq!(cfg.quanta.tq0.get(), 3);
        assert_eq!(cfg.quanta.tq1.get(), 6);
        assert_eq!(cfg.admission, Admission::EverySlice);
        assert_eq!(
            cfg.processes,
            [ProcessRecord::new("A", 0, 8), ProcessRecord::new("B", 2, 1)]
        );
    }

    #[test]
    fn admission_and_processes_are_optional() {
        let cfg = parse_toml("tq0 = 1\ntq1 = 2\n").unwrap();
        assert_eq!(cfg.admission, Admission::CycleBoundary);
        assert!(cfg.processes.is_empty());
    }

    #[test]
    fn schema_errors_surface_as_toml_errors() {
        assert!(matches!(parse_toml("tq0 = 1\n"), Err(ConfigError::Toml(_))));
        assert!(matches!(
            parse_toml("tq0 = 1\ntq1 = 1\nquantum = 4\n"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn rows_are_validated_like_legacy_rows() {
        let err = parse_toml(
            "tq0 = 1\ntq1 = 1\n[[process]]\nname = \"A\"\narrival = 0\nburst = 0\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroBurst { line: None, .. }));
    }
}
