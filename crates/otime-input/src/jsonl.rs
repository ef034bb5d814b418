//! JSON Lines punch records, one runner per line.
//!
//! ```json
//! {"name": "Anna Svensson", "club": "OK Ravinen", "finish": "10:42:05",
//!  "punches": [{"code": "101", "time": 34215},
//!              {"code": "102", "time": "09:35:12"},
//!              {"code": "103", "valid": false}]}
//! ```
//!
//! Time fields accept integer seconds or any clock form understood by
//! [`crate::clock::parse_clock`]. Punches flagged `valid: false` are
//! retained with their flag so the engine can exclude them from matching.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;

use otime_core::{ControlCode, Punch, PunchSequence};

use crate::InputError;
use crate::clock;

const fn default_valid() -> bool {
    true
}

/// A time value as it appears on the wire: seconds or a clock string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClockValue {
    Seconds(i64),
    Clock(String),
}

impl ClockValue {
    fn into_seconds(self) -> Result<i64, InputError> {
        match self {
            Self::Seconds(seconds) => Ok(seconds),
            Self::Clock(value) => clock::parse_clock(&value),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PunchRecord {
    code: String,
    #[serde(default)]
    time: Option<ClockValue>,
    #[serde(default = "default_valid")]
    valid: bool,
}

#[derive(Debug, Deserialize)]
struct RunnerRecord {
    name: String,
    #[serde(default)]
    club: Option<String>,
    #[serde(default)]
    start: Option<ClockValue>,
    #[serde(default)]
    finish: Option<ClockValue>,
    #[serde(default)]
    punches: Vec<PunchRecord>,
}

/// Reads punch records from a JSON Lines source.
///
/// Blank lines are skipped. Any malformed line fails the whole read with
/// its line number; data-quality issues inside a well-formed record (null
/// times, invalid punches) are represented in the output instead.
pub fn read_punch_records<R: BufRead>(reader: R) -> Result<Vec<PunchSequence>, InputError> {
    let mut sequences = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        let record: RunnerRecord = serde_json::from_str(&line).map_err(|source| {
            InputError::Record {
                line: line_number,
                source,
            }
        })?;
        sequences.push(convert(record, line_number)?);
    }
    Ok(sequences)
}

/// Reads punch records from a JSON Lines file.
pub fn read_punch_file(path: &Path) -> Result<Vec<PunchSequence>, InputError> {
    let file = File::open(path)?;
    read_punch_records(BufReader::new(file))
}

fn convert(record: RunnerRecord, line_number: usize) -> Result<PunchSequence, InputError> {
    let mut sequence = PunchSequence::new(record.name);
    sequence.club = record.club;
    sequence.official_start = record
        .start
        .map(ClockValue::into_seconds)
        .transpose()
        .map_err(|e| e.at_line(line_number))?;
    sequence.official_finish = record
        .finish
        .map(ClockValue::into_seconds)
        .transpose()
        .map_err(|e| e.at_line(line_number))?;

    for punch in record.punches {
        let code = ControlCode::new(punch.code)
            .map_err(|e| InputError::from(e).at_line(line_number))?;
        let time = punch
            .time
            .map(ClockValue::into_seconds)
            .transpose()
            .map_err(|e| e.at_line(line_number))?;
        sequence.punches.push(if punch.valid {
            Punch::new(code, time)
        } else {
            Punch::invalid(code, time)
        });
    }

    tracing::debug!(
        runner = %sequence.runner,
        punches = sequence.punches.len(),
        "parsed punch record"
    );
    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_a_full_record() {
        let input = concat!(
            r#"{"name": "Anna Svensson", "club": "OK Ravinen", "start": 0, "#,
            r#""finish": "10:42:05", "punches": [{"code": "101", "time": 34215}]}"#,
            "\n",
        );

        let sequences = read_punch_records(Cursor::new(input)).unwrap();
        assert_eq!(sequences.len(), 1);
        let sequence = &sequences[0];
        assert_eq!(sequence.runner, "Anna Svensson");
        assert_eq!(sequence.club.as_deref(), Some("OK Ravinen"));
        assert_eq!(sequence.official_start, Some(0));
        assert_eq!(sequence.official_finish, Some(10 * 3600 + 42 * 60 + 5));
        assert_eq!(sequence.punches.len(), 1);
        assert_eq!(sequence.punches[0].time, Some(34_215));
    }

    #[test]
    fn skips_blank_lines() {
        let input = "\n{\"name\": \"Bo\"}\n\n";
        let sequences = read_punch_records(Cursor::new(input)).unwrap();
        assert_eq!(sequences.len(), 1);
    }

    #[test]
    fn retains_invalid_punches_with_their_flag() {
        let input = r#"{"name": "Bo", "punches": [{"code": "101", "valid": false}]}"#;
        let sequences = read_punch_records(Cursor::new(input)).unwrap();
        assert!(!sequences[0].punches[0].valid);
        assert!(sequences[0].valid_punches().is_empty());
    }

    #[test]
    fn malformed_line_reports_its_number() {
        let input = "{\"name\": \"Bo\"}\nnot json\n";
        let err = read_punch_records(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, InputError::Record { line: 2, .. }));
    }

    #[test]
    fn bad_clock_value_reports_its_line() {
        let input = r#"{"name": "Bo", "finish": "later"}"#;
        let err = read_punch_records(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, InputError::Line { line: 1, .. }));
    }

    #[test]
    fn empty_control_code_is_rejected() {
        let input = r#"{"name": "Bo", "punches": [{"code": ""}]}"#;
        let err = read_punch_records(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, InputError::Line { line: 1, .. }));
    }

    #[test]
    fn reads_from_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("punches.jsonl");
        std::fs::write(&path, "{\"name\": \"Bo\"}\n").unwrap();

        let sequences = read_punch_file(&path).unwrap();
        assert_eq!(sequences.len(), 1);
    }
}
