//! Course-definition loading.
//!
//! Control lists arrive as comma- or semicolon-separated code strings,
//! either inline (configuration values) or as a standalone course file of
//! `NAME = codes` lines. Declaration order is preserved; it is the
//! matching priority order.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use otime_core::{ControlCode, CourseDefinition, CourseName, CourseSet};

use crate::InputError;

/// Parses a comma- or semicolon-separated control-code list.
///
/// Whitespace around codes is ignored; an all-separator string yields an
/// empty list, which callers skip rather than error on.
pub fn parse_control_list(list: &str) -> Result<Vec<ControlCode>, InputError> {
    list.split([',', ';'])
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(|code| ControlCode::new(code).map_err(InputError::from))
        .collect()
}

/// Builds a course from a name and an inline control list.
///
/// Returns `Ok(None)` for an empty control list: absent courses are
/// skipped, not errors.
pub fn parse_course(name: &str, controls: &str) -> Result<Option<CourseDefinition>, InputError> {
    let codes = parse_control_list(controls)?;
    if codes.is_empty() {
        tracing::debug!(course = name, "skipping course with no controls");
        return Ok(None);
    }
    let name = CourseName::new(name)?;
    Ok(Some(CourseDefinition::new(name, codes)?))
}

/// Reads a standalone course file of `NAME = codes` lines.
///
/// Blank lines and `#` comments are skipped, as are courses with an empty
/// control list.
pub fn read_course_file(path: &Path) -> Result<CourseSet, InputError> {
    let file = File::open(path)?;
    read_courses(BufReader::new(file))
}

/// Reads `NAME = codes` course lines from any buffered source.
pub fn read_courses<R: BufRead>(reader: R) -> Result<CourseSet, InputError> {
    let mut set = CourseSet::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((name, controls)) = trimmed.split_once('=') else {
            return Err(InputError::Line {
                line: line_number,
                message: format!("expected NAME = codes, got {trimmed:?}"),
            });
        };
        if let Some(course) =
            parse_course(name.trim(), controls).map_err(|e| e.at_line(line_number))?
        {
            set.push(course);
        }
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn splits_on_commas_and_semicolons() {
        let codes = parse_control_list("101, 102;103").unwrap();
        let as_str: Vec<_> = codes.iter().map(ControlCode::as_str).collect();
        assert_eq!(as_str, ["101", "102", "103"]);
    }

    #[test]
    fn empty_list_is_not_an_error() {
        assert!(parse_control_list("").unwrap().is_empty());
        assert!(parse_control_list(" ; , ").unwrap().is_empty());
    }

    #[test]
    fn empty_course_is_skipped() {
        assert!(parse_course("A", "").unwrap().is_none());
        assert!(parse_course("A", "101,100").unwrap().is_some());
    }

    #[test]
    fn reads_course_lines_in_declaration_order() {
        let input = "# round 3\nB = 108,109,100\nA = 101, 102, 100\n\nempty =\n";
        let set = read_courses(Cursor::new(input)).unwrap();

        let names: Vec<_> = set.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
        assert_eq!(set.get("A").unwrap().controls().len(), 3);
    }

    #[test]
    fn malformed_course_line_reports_its_number() {
        let input = "A = 101,100\njust words\n";
        let err = read_courses(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, InputError::Line { line: 2, .. }));
    }
}
