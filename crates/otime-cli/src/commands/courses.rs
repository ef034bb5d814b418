//! Courses command: list the configured courses.

use std::fmt::Write;

use anyhow::Result;
use serde::Serialize;

use otime_core::{ControlCode, CourseSet};

use crate::config::Config;

use super::util;

/// Runs the courses command.
pub fn run(config: &Config, json: bool) -> Result<()> {
    let set = util::build_course_set(config)?;
    if json {
        println!("{}", format_courses_json(&set, config.lap_control.as_deref())?);
    } else {
        print!("{}", format_courses(&set, config.lap_control.as_deref()));
    }
    Ok(())
}

fn join_controls(controls: &[ControlCode]) -> String {
    controls
        .iter()
        .map(ControlCode::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Formats the human-readable course listing.
fn format_courses(set: &CourseSet, lap_control: Option<&str>) -> String {
    let mut output = String::new();
    writeln!(output, "CONFIGURED COURSES").unwrap();
    writeln!(output, "──────────────────").unwrap();

    if set.is_empty() {
        writeln!(output, "(none)").unwrap();
    } else {
        for course in set {
            writeln!(output, "{:<12} {}", course.name.as_str(), join_controls(course.controls()))
                .unwrap();
        }
    }

    if let Some(lap_control) = lap_control {
        writeln!(output).unwrap();
        writeln!(output, "Lap control: {lap_control}").unwrap();
    }
    output
}

#[derive(Debug, Serialize)]
struct JsonCourseList {
    courses: Vec<JsonCourse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lap_control: Option<String>,
}

#[derive(Debug, Serialize)]
struct JsonCourse {
    name: String,
    controls: Vec<String>,
}

fn format_courses_json(set: &CourseSet, lap_control: Option<&str>) -> Result<String> {
    let listing = JsonCourseList {
        courses: set
            .iter()
            .map(|course| JsonCourse {
                name: course.name.to_string(),
                controls: course
                    .controls()
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            })
            .collect(),
        lap_control: lap_control.map(String::from),
    };
    Ok(serde_json::to_string_pretty(&listing)?)
}
