use super::{ConfigError, ProcessRows, SimConfig, non_negative, quanta};
use crate::scheduler::Admission;

const KEY_TQ0: &str = "tq0";
const KEY_TQ1: &str = "tq1";
const KEY_TABLE_SIZE: &str = "process_table_size";
const KEY_TABLE: &str = "process_table";
const KEY_ADMISSION: &str = "admission";

// Blank lines and any line carrying a `#` are ignored
fn is_skip(line: &str) -> bool {
    line.trim().is_empty() || line.contains('#')
}

fn split_key_value(line: &str) -> Vec<&str> {
    line.split(['=', ' ', '\t'])
        .filter(|tok| !tok.is_empty())
        .collect()
}

fn parse_int(value: &str, line: usize) -> Result<i64, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidNumber {
        line: Some(line),
        value: value.to_string(),
    })
}

fn key_value<'a>(key: &str, text: &'a str, line: usize) -> Result<&'a str, ConfigError> {
    match split_key_value(text).as_slice() {
        [k, v] if *k == key => Ok(*v),
        _ => Err(ConfigError::MalformedKeyValue {
            line,
            text: text.to_string(),
        }),
    }
}

/// Parses the line-oriented `key = value` + process table format.
pub fn parse_legacy(input: &str) -> Result<SimConfig, ConfigError> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, text)| (i + 1, text))
        .filter(|(_, text)| !is_skip(text));

    let mut tq0 = None;
    let mut tq1 = None;
    let mut table_size = None;
    let mut admission = Admission::default();
    let mut rows = None;

    while let Some((line, text)) = lines.next() {
        if text.contains(KEY_TQ0) {
            tq0 = Some(parse_int(key_value(KEY_TQ0, text, line)?, line)?);
        } else if text.contains(KEY_TQ1) {
            tq1 = Some(parse_int(key_value(KEY_TQ1, text, line)?, line)?);
        } else if text.contains(KEY_TABLE_SIZE) {
            // Tested before its prefix `process_table`
            let size = parse_int(key_value(KEY_TABLE_SIZE, text, line)?, line)?;
            table_size = Some(non_negative(KEY_TABLE_SIZE, size, Some(line))? as usize);
        } else if text.contains(KEY_ADMISSION) {
            let value = key_value(KEY_ADMISSION, text, line)?;
            admission = match value {
                "cycle-boundary" => Admission::CycleBoundary,
                "every-slice" => Admission::EverySlice,
                _ => {
                    return Err(ConfigError::UnknownAdmission {
                        line,
                        value: value.to_string(),
                    });
                }
            };
        } else if text.contains(KEY_TABLE) {
            let expected = table_size.ok_or(ConfigError::TableBeforeSize { line })?;
            let mut table = ProcessRows::default();

            while table.len() < expected {
                let Some((line, text)) = lines.next() else {
                    return Err(ConfigError::TruncatedTable {
                        expected,
                        found: table.len(),
                    });
                };
                let fields: Vec<&str> = text.split_whitespace().collect();
                let [name, arrival, burst] = fields[..] else {
                    return Err(ConfigError::MalformedRow {
                        line,
                        text: text.to_string(),
                    });
                };
                table.push(
                    name,
                    parse_int(arrival, line)?,
                    parse_int(burst, line)?,
                    Some(line),
                )?;
            }

            rows = Some(table);
        } else {
            return Err(ConfigError::UnrecognizedLine {
                line,
                text: text.to_string(),
            });
        }
    }

    let tq0 = tq0.ok_or(ConfigError::MissingKey { key: KEY_TQ0 })?;
    let tq1 = tq1.ok_or(ConfigError::MissingKey { key: KEY_TQ1 })?;
    let table_size = table_size.ok_or(ConfigError::MissingKey {
        key: KEY_TABLE_SIZE,
    })?;
    let processes = match rows {
        Some(rows) => rows.into_records(),
        None if table_size == 0 => Vec::new(),
        None => return Err(ConfigError::MissingKey { key: KEY_TABLE }),
    };

    Ok(SimConfig {
        quanta: quanta(tq0, tq1)?,
        admission,
        processes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProcessRecord;

    const SAMPLE: &str = "\
# Quanta
tq0 = 2
tq1 =\t4

process_table_size = 3
process_table =
A 0 5
# second row
B\t0 2
C 6 1
";

    #[test]
    fn parses_sample_input() {
        let cfg = parse_legacy(SAMPLE).unwrap();
        assert_eq!(cfg.quanta.tq0.get(), 2);
        assert_eq!(cfg.quanta.tq1.get(), 4);
        assert_eq!(cfg.admission, Admission::CycleBoundary);
        assert_eq!(
            cfg.processes,
            [
                ProcessRecord::new("A", 0, 5),
                ProcessRecord::new("B", 0, 2),
                ProcessRecord::new("C", 6, 1),
            ]
        );
    }

    #[test]
    fn admission_key_selects_policy() {
        let cfg = parse_legacy(
            "tq0=1\ntq1=1\nadmission = every-slice\nprocess_table_size=0\n",
        )
        .unwrap();
        assert_eq!(cfg.admission, Admission::EverySlice);
        assert!(cfg.processes.is_empty());

        let err = parse_legacy("admission = sometimes\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownAdmission { line: 1, .. }));
    }

    #[test]
    fn missing_quantum_is_reported() {
        let err = parse_legacy("tq0 = 2\nprocess_table_size = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { key: "tq1" }));
    }

    #[test]
    fn table_before_size_is_rejected() {
        let err = parse_legacy("tq0 = 1\ntq1 = 1\nprocess_table =\nA 0 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::TableBeforeSize { line: 3 }));
    }

    #[test]
    fn short_table_is_truncated() {
        let err = parse_legacy("tq0=1\ntq1=1\nprocess_table_size=2\nprocess_table=\nA 0 1\n")
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::TruncatedTable {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn bad_rows_carry_line_numbers() {
        let err = parse_legacy("tq0=1\ntq1=1\nprocess_table_size=1\nprocess_table=\nA 0\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::MalformedRow { line: 5, .. }));

        let err = parse_legacy("tq0=1\ntq1=1\nprocess_table_size=1\nprocess_table=\nA x 1\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { line: Some(5), .. }));

        let err = parse_legacy("tq0=1\ntq1=1\nprocess_table_size=1\nprocess_table=\nA -2 1\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::NegativeValue { line: Some(5), .. }));
    }

    #[test]
    fn malformed_key_value_is_rejected() {
        let err = parse_legacy("tq0 = 1 2\n").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedKeyValue { line: 1, .. }));

        let err = parse_legacy("tq0 = many\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));
    }

    #[test]
    fn zero_quantum_is_rejected() {
        let err = parse_legacy("tq0 = 0\ntq1 = 1\nprocess_table_size = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroQuantum { key: "tq0" }));
    }

    #[test]
    fn stray_lines_are_rejected() {
        let err = parse_legacy("tq0 = 1\nquantum = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnrecognizedLine { line: 2, .. }));
    }

    #[test]
    fn declared_rows_need_a_table() {
        let err = parse_legacy("tq0 = 1\ntq1 = 1\nprocess_table_size = 2\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { key: "process_table" }));
    }
}
