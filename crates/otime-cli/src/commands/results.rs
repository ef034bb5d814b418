//! Results command: compute, rank, and render elapsed times.
//!
//! The engine itself emits unordered results; ranking (the stable ascending
//! sort by elapsed seconds) and `HH:MM:SS` rendering happen here, on the
//! consumer side. Large runner batches are fanned out over worker chunks
//! and the per-chunk result sets merged by per-course concatenation.

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use rayon::prelude::*;
use serde::Serialize;

use otime_core::{CourseSet, EngineOptions, PunchSequence, ResultSet, compute_results};
use otime_input::name;

use crate::cli::InputFormat;
use crate::config::Config;

use super::util;

/// Runner count above which the computation fans out over worker chunks.
const PARALLEL_THRESHOLD: usize = 256;

/// Runners per worker chunk.
const PARALLEL_CHUNK: usize = 64;

/// Runs the results command.
pub fn run(
    config: &Config,
    input: &Path,
    format: Option<InputFormat>,
    courses_file: Option<&Path>,
    lap_control: Option<&str>,
    all_matches: bool,
    json: bool,
) -> Result<()> {
    let sequences = util::read_punches(input, format)?;
    let course_set = match courses_file {
        Some(path) => otime_input::courses::read_course_file(path)?,
        None => util::build_course_set(config)?,
    };
    let options = util::engine_options(config, lap_control, all_matches)?;

    let mut results = compute(&sequences, &course_set, &options)?;
    results.sort_by_elapsed();

    if json {
        println!("{}", format_results_json(&results)?);
    } else {
        print!("{}", format_results(&results));
    }
    Ok(())
}

/// Computes results, chunking the runner list across workers when large.
///
/// Chunks are disjoint runner subsets, so merging their result sets by
/// concatenation is exact; ordering is applied afterwards by the ranking
/// sort.
fn compute(
    sequences: &[PunchSequence],
    course_set: &CourseSet,
    options: &EngineOptions,
) -> Result<ResultSet> {
    if sequences.len() >= PARALLEL_THRESHOLD {
        let merged = sequences
            .par_chunks(PARALLEL_CHUNK)
            .map(|chunk| compute_results(chunk, course_set, options))
            .try_reduce_with(|mut left, right| {
                left.merge(right);
                Ok(left)
            })
            .unwrap_or_else(|| compute_results(&[], course_set, options))?;
        Ok(merged)
    } else {
        Ok(compute_results(sequences, course_set, options)?)
    }
}

// ========== Elapsed-Time Formatting ==========

/// Formats elapsed seconds as zero-padded `HH:MM:SS`.
pub fn format_elapsed(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

// ========== Report Rendering ==========

/// Formats the placed, human-readable results table.
pub fn format_results(results: &ResultSet) -> String {
    let mut output = String::new();
    for (index, (course, list)) in results.iter().enumerate() {
        if index > 0 {
            writeln!(output).unwrap();
        }
        let heading = format!("COURSE {course}");
        writeln!(output, "{heading}").unwrap();
        writeln!(output, "{}", "─".repeat(heading.chars().count())).unwrap();

        if list.is_empty() {
            writeln!(output, "(no finishers)").unwrap();
            continue;
        }
        for (place, result) in list.iter().enumerate() {
            let runner = name::normalize_name(&result.runner);
            let club = result.club.as_deref().unwrap_or("");
            writeln!(
                output,
                "{:>3}  {runner:<26}{club:<22}{}",
                place + 1,
                format_elapsed(result.elapsed_seconds)
            )
            .unwrap();
        }
    }
    output
}

// ========== JSON Output ==========

/// JSON report structure.
#[derive(Debug, Serialize)]
struct JsonReport {
    courses: Vec<JsonCourse>,
}

#[derive(Debug, Serialize)]
struct JsonCourse {
    course: String,
    results: Vec<JsonPlacedResult>,
}

#[derive(Debug, Serialize)]
struct JsonPlacedResult {
    place: usize,
    runner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    club: Option<String>,
    elapsed_seconds: i64,
    elapsed: String,
}

/// Formats the results as JSON.
pub fn format_results_json(results: &ResultSet) -> Result<String> {
    let report = JsonReport {
        courses: results
            .iter()
            .map(|(course, list)| JsonCourse {
                course: course.to_string(),
                results: list
                    .iter()
                    .enumerate()
                    .map(|(place, result)| JsonPlacedResult {
                        place: place + 1,
                        runner: name::normalize_name(&result.runner),
                        club: result.club.clone(),
                        elapsed_seconds: result.elapsed_seconds,
                        elapsed: format_elapsed(result.elapsed_seconds),
                    })
                    .collect(),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
