//! Lap segmentation and elapsed-time computation.
//!
//! One batch of runners and courses in, one [`ResultSet`] out. The engine
//! is pure and synchronous: callers that want parallelism may split the
//! runner list into disjoint chunks and merge the per-chunk result sets by
//! concatenation, since result order carries no meaning until the final
//! ranking sort.

use serde::Serialize;
use thiserror::Error;

use crate::course::{CourseDefinition, CourseSet};
use crate::matcher::{self, MatchMode};
use crate::punch::{Punch, PunchSequence};
use crate::types::{ControlCode, CourseName};

/// Fatal configuration errors.
///
/// These describe a setup mistake, not a data quality issue, and abort the
/// whole computation before any runner is processed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// In lap mode every course must finish at the lap control.
    #[error("course {course} must end at lap control {lap_control}, found {found}")]
    LapControlMismatch {
        course: CourseName,
        lap_control: ControlCode,
        found: ControlCode,
    },
}

/// Whether a runner may appear under more than one course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Stop at the first satisfying course, in declaration order.
    #[default]
    FirstMatch,
    /// Emit a result for every satisfying course.
    AllMatches,
}

/// Engine configuration.
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// The repeating lap boundary control; absent in single-pass races.
    pub lap_control: Option<ControlCode>,
    /// Course-matching policy.
    pub policy: MatchPolicy,
}

/// One timed course completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimedResult {
    /// The satisfied course.
    pub course: CourseName,
    /// The runner's full name.
    pub runner: String,
    /// The runner's club, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club: Option<String>,
    /// Elapsed seconds, always non-negative.
    pub elapsed_seconds: i64,
}

/// Results grouped by course, in course declaration order.
///
/// Within a course the list is in emission order until
/// [`ResultSet::sort_by_elapsed`] applies the ranking sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    courses: Vec<(CourseName, Vec<TimedResult>)>,
}

impl ResultSet {
    /// Creates a set pre-seeded with every course, so courses without
    /// finishers still appear in output.
    pub fn with_courses(courses: &CourseSet) -> Self {
        Self {
            courses: courses
                .iter()
                .map(|c| (c.name.clone(), Vec::new()))
                .collect(),
        }
    }

    /// Appends a result to its course, registering the course if needed.
    pub fn push(&mut self, result: TimedResult) {
        match self.courses.iter_mut().find(|(n, _)| *n == result.course) {
            Some((_, list)) => list.push(result),
            None => {
                let course = result.course.clone();
                self.courses.push((course, vec![result]));
            }
        }
    }

    /// Concatenates another set's per-course lists onto this one.
    pub fn merge(&mut self, other: Self) {
        for (name, results) in other.courses {
            match self.courses.iter_mut().find(|(n, _)| *n == name) {
                Some((_, list)) => list.extend(results),
                None => self.courses.push((name, results)),
            }
        }
    }

    /// Stable-sorts each course's results by elapsed seconds ascending.
    ///
    /// Stability makes the sort key reproducible: equal times keep their
    /// emission order.
    pub fn sort_by_elapsed(&mut self) {
        for (_, results) in &mut self.courses {
            results.sort_by_key(|r| r.elapsed_seconds);
        }
    }

    /// Iterates courses in declaration order with their result lists.
    pub fn iter(&self) -> impl Iterator<Item = (&CourseName, &[TimedResult])> {
        self.courses.iter().map(|(n, r)| (n, r.as_slice()))
    }

    /// Returns the results for one course.
    pub fn results_for(&self, course: &str) -> Option<&[TimedResult]> {
        self.courses
            .iter()
            .find(|(n, _)| n.as_str() == course)
            .map(|(_, r)| r.as_slice())
    }

    /// Total number of results across all courses.
    pub fn result_count(&self) -> usize {
        self.courses.iter().map(|(_, r)| r.len()).sum()
    }

    /// Returns true if no course holds any result.
    pub fn is_empty(&self) -> bool {
        self.courses.iter().all(|(_, r)| r.is_empty())
    }
}

/// A contiguous slice of a runner's punch sequence between lap boundaries.
///
/// `codes` excludes the boundary lap punches themselves. Either time may be
/// unresolved, in which case the segment cannot produce a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Opening boundary time: the opening lap punch, or the official start
    /// for the leading segment.
    pub start_time: Option<i64>,
    /// Closing boundary time: the closing lap punch, or the official finish
    /// for the trailing segment.
    pub end_time: Option<i64>,
    /// The scored codes inside the segment, in punch order.
    pub codes: Vec<&'a ControlCode>,
}

/// Partitions a runner's valid punches at every occurrence of the lap
/// control.
///
/// Boundary punches delimit segments and belong to none of them. The
/// leading segment opens at the official start, the trailing segment closes
/// at the official finish; a sequence without any boundary yields a single
/// segment bounded by the official times.
pub fn segment_by_lap_control<'a>(
    sequence: &'a PunchSequence,
    lap_control: &ControlCode,
) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let mut open_time = sequence.official_start;
    let mut codes: Vec<&ControlCode> = Vec::new();

    for punch in sequence.valid_punches() {
        if punch.code == *lap_control {
            segments.push(Segment {
                start_time: open_time,
                end_time: punch.time,
                codes: std::mem::take(&mut codes),
            });
            open_time = punch.time;
        } else {
            codes.push(&punch.code);
        }
    }

    segments.push(Segment {
        start_time: open_time,
        end_time: sequence.official_finish,
        codes,
    });
    segments
}

/// Computes elapsed-time results for every runner against every course.
///
/// With a lap control set, every course must finish at that control;
/// violating this aborts the whole computation with a [`ConfigError`].
/// Unresolvable boundary times and non-matching runners are absorbed
/// silently into fewer results.
pub fn compute_results(
    runners: &[PunchSequence],
    courses: &CourseSet,
    options: &EngineOptions,
) -> Result<ResultSet, ConfigError> {
    if let Some(lap_control) = &options.lap_control {
        for course in courses {
            let found = course.final_control();
            if found != lap_control {
                return Err(ConfigError::LapControlMismatch {
                    course: course.name.clone(),
                    lap_control: lap_control.clone(),
                    found: found.clone(),
                });
            }
        }
    }

    let mut results = ResultSet::with_courses(courses);
    for runner in runners {
        match &options.lap_control {
            Some(lap_control) => {
                lap_results(runner, courses, lap_control, options.policy, &mut results);
            }
            None => single_pass_results(runner, courses, options.policy, &mut results),
        }
    }
    Ok(results)
}

/// Single-pass matching: the full course against the whole sequence.
///
/// A full contiguous match takes its boundary times from the matched
/// punches; if either is unresolved the result is dropped without trying
/// the fallback. With no full match, a contiguous match of the course minus
/// its final control combined with the official finish tolerates a missing
/// final punch.
fn single_pass_results(
    sequence: &PunchSequence,
    courses: &CourseSet,
    policy: MatchPolicy,
    results: &mut ResultSet,
) {
    let punches = sequence.valid_punches();
    let codes: Vec<&ControlCode> = punches.iter().map(|p| &p.code).collect();

    for course in courses {
        let emitted = match_single_pass(sequence, &punches, &codes, course, results);
        if emitted && policy == MatchPolicy::FirstMatch {
            break;
        }
    }
}

fn match_single_pass(
    sequence: &PunchSequence,
    punches: &[&Punch],
    codes: &[&ControlCode],
    course: &CourseDefinition,
    results: &mut ResultSet,
) -> bool {
    let pattern: Vec<&ControlCode> = course.controls().iter().collect();
    if let Some(span) = matcher::find_match(codes, &pattern, MatchMode::Contiguous) {
        return match (punches[span.start].time, punches[span.end].time) {
            (Some(start), Some(end)) => emit(results, course, sequence, start, end),
            _ => false,
        };
    }

    let core: Vec<&ControlCode> = course.core_controls().iter().collect();
    if core.is_empty() {
        return false;
    }
    match (
        matcher::find_match(codes, &core, MatchMode::Contiguous),
        sequence.official_finish,
    ) {
        (Some(span), Some(finish)) => match punches[span.start].time {
            Some(start) => emit(results, course, sequence, start, finish),
            None => false,
        },
        _ => false,
    }
}

/// Lap matching: each segment's interior against the course minus its lap
/// control, gaps tolerated.
///
/// A runner may satisfy the same course in several segments and appear once
/// per satisfying lap. Segments with an unresolved boundary are skipped for
/// all courses. The match policy applies per segment.
fn lap_results(
    sequence: &PunchSequence,
    courses: &CourseSet,
    lap_control: &ControlCode,
    policy: MatchPolicy,
    results: &mut ResultSet,
) {
    for segment in segment_by_lap_control(sequence, lap_control) {
        let (Some(start), Some(end)) = (segment.start_time, segment.end_time) else {
            continue;
        };
        for course in courses {
            let core: Vec<&ControlCode> = course.core_controls().iter().collect();
            if core.is_empty() {
                continue;
            }
            if matcher::find_match(&segment.codes, &core, MatchMode::Subsequence).is_some() {
                let emitted = emit(results, course, sequence, start, end);
                if emitted && policy == MatchPolicy::FirstMatch {
                    break;
                }
            }
        }
    }
}

/// Emits one result unless the resolved times are out of order.
///
/// An end before its start means the time stream was inconsistent; the pair
/// is treated as an unresolvable boundary and dropped, keeping every
/// emitted elapsed time non-negative.
fn emit(
    results: &mut ResultSet,
    course: &CourseDefinition,
    sequence: &PunchSequence,
    start: i64,
    end: i64,
) -> bool {
    if end < start {
        return false;
    }
    results.push(TimedResult {
        course: course.name.clone(),
        runner: sequence.runner.clone(),
        club: sequence.club.clone(),
        elapsed_seconds: end - start,
    });
    true
}
