//! Punch records as delivered by the timing system.

use serde::{Deserialize, Serialize};

use crate::types::ControlCode;

const fn default_valid() -> bool {
    true
}

/// A single timestamped visit to a control.
///
/// `time` is `None` when the source could not determine a timestamp; such a
/// punch can still match a control code but cannot anchor a segment
/// boundary. Punches flagged as extraneous or missing by the source carry
/// `valid = false` and are excluded from matching, but keep their sequence
/// position for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Punch {
    /// The control code that was punched.
    pub code: ControlCode,
    /// Seconds in the runner's time base, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    /// Whether the punch counts for matching.
    #[serde(default = "default_valid")]
    pub valid: bool,
}

impl Punch {
    /// Creates a valid punch.
    pub const fn new(code: ControlCode, time: Option<i64>) -> Self {
        Self {
            code,
            time,
            valid: true,
        }
    }

    /// Creates a punch flagged as not counting for matching.
    pub const fn invalid(code: ControlCode, time: Option<i64>) -> Self {
        Self {
            code,
            time,
            valid: false,
        }
    }
}

/// A runner's ordered punch sequence with identity and official times.
///
/// All punch times, `official_start`, and `official_finish` for one runner
/// must share a single integer-second time base (seconds-of-day or an
/// absolute counter); the engine compares them directly and performs no
/// time-base reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchSequence {
    /// The runner's full name.
    pub runner: String,
    /// The runner's club, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club: Option<String>,
    /// Official start time, used when no punch opens the first segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official_start: Option<i64>,
    /// Official finish time, used when no punch closes the last segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official_finish: Option<i64>,
    /// The punches in recorded order.
    #[serde(default)]
    pub punches: Vec<Punch>,
}

impl PunchSequence {
    /// Creates an empty sequence for the named runner.
    pub fn new(runner: impl Into<String>) -> Self {
        Self {
            runner: runner.into(),
            club: None,
            official_start: None,
            official_finish: None,
            punches: Vec::new(),
        }
    }

    /// Returns the punches that count for matching, in order.
    pub fn valid_punches(&self) -> Vec<&Punch> {
        self.punches.iter().filter(|p| p.valid).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> ControlCode {
        ControlCode::new(s).unwrap()
    }

    #[test]
    fn valid_punches_filters_flagged() {
        let mut sequence = PunchSequence::new("Anna Svensson");
        sequence.punches = vec![
            Punch::new(code("101"), Some(100)),
            Punch::invalid(code("102"), None),
            Punch::new(code("103"), Some(200)),
        ];

        let valid = sequence.valid_punches();
        assert_eq!(valid.len(), 2);
        assert_eq!(valid[0].code.as_str(), "101");
        assert_eq!(valid[1].code.as_str(), "103");
    }

    #[test]
    fn sequence_serde_roundtrip() {
        let mut sequence = PunchSequence::new("Bo Karlsson");
        sequence.club = Some("OK Ravinen".to_string());
        sequence.official_finish = Some(38_525);
        sequence.punches = vec![Punch::new(code("101"), Some(34_215))];

        let json = serde_json::to_string(&sequence).unwrap();
        let parsed: PunchSequence = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sequence);
    }

    #[test]
    fn punch_valid_defaults_to_true() {
        let json = r#"{"code": "101", "time": 34215}"#;
        let punch: Punch = serde_json::from_str(json).unwrap();
        assert!(punch.valid);
    }

    #[test]
    fn punch_time_defaults_to_none() {
        let json = r#"{"code": "101"}"#;
        let punch: Punch = serde_json::from_str(json).unwrap();
        assert_eq!(punch.time, None);
    }
}
