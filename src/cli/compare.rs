//! Compare command handler.

use super::input::load_document;
use super::output::{render_report, write_output, OutputTarget};
use super::{exit_codes, CompareJob};
use crate::config::Validatable;
use crate::error::StructDiffError;
use crate::CompareEngine;
use anyhow::{Context, Result};

/// Run the compare command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[allow(clippy::needless_pass_by_value)]
pub fn run_compare(job: CompareJob) -> Result<i32> {
    let errors = job.config.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        return Err(StructDiffError::validation(messages.join("; ")).into());
    }

    let left = load_document(&job.left)
        .with_context(|| format!("Failed to load left document {}", job.left.display()))?;
    let right = load_document(&job.right)
        .with_context(|| format!("Failed to load right document {}", job.right.display()))?;

    let engine = CompareEngine::with_config(job.config.compare);
    let report = engine.compare(&left, &right);

    let stats = engine.cache_stats();
    tracing::debug!(
        "Comparison finished: {} discrepancies, cache {}/{} hits",
        report.discrepancy_count(),
        stats.hits,
        stats.lookups
    );

    let exit_code = if report.is_equal() {
        exit_codes::SUCCESS
    } else {
        exit_codes::CHANGES_DETECTED
    };

    let content = render_report(&report, job.config.output.format)?;
    let target = OutputTarget::from_option(job.config.output.file.clone());
    write_output(&content, &target)?;

    Ok(exit_code)
}
