//! Shared helpers for command implementations.

use std::path::Path;

use anyhow::{Context, Result};

use otime_core::{ControlCode, CourseSet, EngineOptions, MatchPolicy, PunchSequence};
use otime_input::{courses, jsonl, punchcard};

use crate::cli::InputFormat;
use crate::config::Config;

/// Builds the course set from configuration, skipping empty entries.
pub fn build_course_set(config: &Config) -> Result<CourseSet> {
    let mut set = CourseSet::new();
    for entry in &config.courses {
        let course = courses::parse_course(&entry.name, &entry.controls)
            .with_context(|| format!("invalid course {:?}", entry.name))?;
        if let Some(course) = course {
            set.push(course);
        }
    }
    Ok(set)
}

/// Resolves engine options from configuration and command-line overrides.
pub fn engine_options(
    config: &Config,
    lap_override: Option<&str>,
    all_matches: bool,
) -> Result<EngineOptions> {
    let lap_control = lap_override
        .or(config.lap_control.as_deref())
        .map(ControlCode::new)
        .transpose()
        .context("invalid lap control")?;
    let policy = if all_matches || config.all_matches {
        MatchPolicy::AllMatches
    } else {
        MatchPolicy::FirstMatch
    };
    Ok(EngineOptions {
        lap_control,
        policy,
    })
}

/// Reads punch records, inferring the format from the extension unless
/// overridden.
pub fn read_punches(path: &Path, format: Option<InputFormat>) -> Result<Vec<PunchSequence>> {
    let format = format.unwrap_or_else(|| infer_format(path));
    let sequences = match format {
        InputFormat::Jsonl => jsonl::read_punch_file(path),
        InputFormat::Punchcard => punchcard::read_punchcard_file(path),
    }
    .with_context(|| format!("failed to read {}", path.display()))?;
    tracing::debug!(runners = sequences.len(), ?format, "read punch records");
    Ok(sequences)
}

fn infer_format(path: &Path) -> InputFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some("jsonl" | "json") => InputFormat::Jsonl,
        _ => InputFormat::Punchcard,
    }
}
