//! Check command: validate the course configuration.

use anyhow::Result;

use otime_core::compute_results;

use crate::config::Config;

use super::util;

/// Runs the check command.
///
/// Builds the course set and engine options from configuration and runs
/// the engine over an empty runner batch, which exercises exactly the
/// validation that would abort a real computation. Configuration errors
/// surface verbatim.
pub fn run(config: &Config) -> Result<()> {
    let set = util::build_course_set(config)?;
    let options = util::engine_options(config, None, false)?;
    compute_results(&[], &set, &options)?;

    match &options.lap_control {
        Some(lap_control) => println!(
            "configuration ok: {} courses, lap control {lap_control}",
            set.len()
        ),
        None => println!("configuration ok: {} courses", set.len()),
    }
    Ok(())
}
