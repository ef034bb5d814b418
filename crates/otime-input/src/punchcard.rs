//! The inline punch-string format.
//!
//! One runner per line, semicolon-separated fields with dash-delimited
//! punches:
//!
//! ```text
//! Anna Svensson;OK Ravinen;;10:42:05;101-09:31:00;102-09:35:12;100-10:02:44
//! ```
//!
//! The first four fields are name, club, official start, and official
//! finish; any of the last three may be left empty. Every further field is
//! a `code-time` punch, where a trailing dash (`101-`) or a bare code marks
//! a punch without a usable timestamp. Blank lines and `#` comments are
//! skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use otime_core::{ControlCode, Punch, PunchSequence};

use crate::InputError;
use crate::clock;

/// Reads punch records from an inline punch-string source.
pub fn read_punchcard<R: BufRead>(reader: R) -> Result<Vec<PunchSequence>, InputError> {
    let mut sequences = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        sequences.push(parse_line(trimmed, line_number)?);
    }
    Ok(sequences)
}

/// Reads punch records from an inline punch-string file.
pub fn read_punchcard_file(path: &Path) -> Result<Vec<PunchSequence>, InputError> {
    let file = File::open(path)?;
    read_punchcard(BufReader::new(file))
}

fn parse_line(line: &str, line_number: usize) -> Result<PunchSequence, InputError> {
    let mut fields = line.split(';').map(str::trim);

    let name = fields.next().unwrap_or("");
    if name.is_empty() {
        return Err(InputError::Line {
            line: line_number,
            message: "runner name is missing".to_string(),
        });
    }

    let mut sequence = PunchSequence::new(name);
    sequence.club = fields.next().filter(|f| !f.is_empty()).map(String::from);
    sequence.official_start = parse_optional_clock(fields.next(), line_number)?;
    sequence.official_finish = parse_optional_clock(fields.next(), line_number)?;

    for field in fields.filter(|f| !f.is_empty()) {
        sequence.punches.push(parse_punch(field, line_number)?);
    }

    tracing::debug!(
        runner = %sequence.runner,
        punches = sequence.punches.len(),
        "parsed punchcard line"
    );
    Ok(sequence)
}

fn parse_optional_clock(field: Option<&str>, line_number: usize) -> Result<Option<i64>, InputError> {
    match field {
        None | Some("") => Ok(None),
        Some(value) => clock::parse_clock(value)
            .map(Some)
            .map_err(|e| e.at_line(line_number)),
    }
}

fn parse_punch(field: &str, line_number: usize) -> Result<Punch, InputError> {
    let (code, time) = match field.split_once('-') {
        Some((code, time)) => (code, time),
        None => (field, ""),
    };

    let code = ControlCode::new(code.trim())
        .map_err(|e| InputError::from(e).at_line(line_number))?;
    let time = if time.trim().is_empty() {
        None
    } else {
        Some(clock::parse_clock(time).map_err(|e| e.at_line(line_number))?)
    };
    Ok(Punch::new(code, time))
}
