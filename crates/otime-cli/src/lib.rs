//! Orienteering results CLI library.
//!
//! This crate provides the command-line interface around the results
//! engine: configuration, input readers, ranking, and report rendering.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, InputFormat};
pub use config::{Config, CourseEntry};
