//! Core matching-and-timing engine for orienteering race results.
//!
//! Given runners' ordered checkpoint punches and course definitions, the
//! engine locates the punch sub-runs satisfying each course and emits timed
//! segments:
//! - Matching: contiguous and subsequence occurrence search over control
//!   codes, with non-overlapping repeated extraction
//! - Segmentation: partitioning a punch sequence at a designated lap
//!   control, with official start/finish fallback at the open ends
//! - Timing: elapsed seconds per satisfied course, one result per
//!   qualifying lap

mod course;
mod engine;
pub mod matcher;
mod punch;
mod types;

pub use course::{CourseDefinition, CourseSet};
pub use engine::{
    ConfigError, EngineOptions, MatchPolicy, ResultSet, Segment, TimedResult, compute_results,
    segment_by_lap_control,
};
pub use matcher::{MatchMode, MatchSpan, find_all, find_match};
pub use punch::{Punch, PunchSequence};
pub use types::{ControlCode, CourseName, ValidationError};
