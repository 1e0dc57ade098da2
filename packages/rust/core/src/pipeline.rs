//! End-to-end estimate pipeline: document → phases → aggregate → summary → document.

use std::path::Path;

use tracing::{info, instrument};

use stima_markdown::{extract_phases, render_summary, splice_summary};
use stima_shared::{Aggregate, Phase, RateConfig, RenderMode, Result, StimaError};

use crate::estimate;

/// Options for a single estimate run.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimateOptions {
    /// Rates and weekly throughput.
    pub rates: RateConfig,
    /// Range estimate or final quote.
    pub mode: RenderMode,
}

/// Everything produced by one run over a document.
#[derive(Debug, Clone)]
pub struct Estimate {
    /// Phases in document order.
    pub phases: Vec<Phase>,
    /// Totals under the run's rates.
    pub aggregate: Aggregate,
    /// Rendered summary region.
    pub summary: String,
}

/// What happened to the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// An existing summary region was replaced.
    Replaced,
    /// No summary region existed; the summary was appended.
    Appended,
    /// In-place modification was disabled.
    Skipped,
}

/// Read the target document.
pub fn load_document(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(StimaError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    std::fs::read_to_string(path).map_err(|e| StimaError::unreadable(path, e))
}

/// Extract, calculate and render.
///
/// `source` is only used to label the `NoPhasesExtracted` error.
#[instrument(skip_all, fields(source = %source.display(), mode = ?opts.mode))]
pub fn estimate_document(
    document: &str,
    source: &Path,
    opts: &EstimateOptions,
) -> Result<Estimate> {
    let phases = extract_phases(document)?;
    if phases.is_empty() {
        return Err(StimaError::NoPhasesExtracted {
            path: source.to_path_buf(),
        });
    }

    let aggregate = estimate::calculate(&phases, &opts.rates)?;
    let summary = render_summary(&phases, &aggregate, &opts.rates, opts.mode);

    info!(
        phases = phases.len(),
        hours_min = aggregate.total_hours_min,
        hours_max = aggregate.total_hours_max,
        "estimate rendered"
    );

    Ok(Estimate {
        phases,
        aggregate,
        summary,
    })
}

/// Load `path` and run [`estimate_document`] over it.
pub fn estimate_file(path: &Path, opts: &EstimateOptions) -> Result<(String, Estimate)> {
    let document = load_document(path)?;
    let estimate = estimate_document(&document, path, opts)?;
    Ok((document, estimate))
}

/// Write `summary` into the document at `path`, replacing any previous
/// summary region. `original` is the text the summary was computed from.
///
/// With `no_op` set the file is left untouched.
#[instrument(skip(original, summary))]
pub fn update_document(
    path: &Path,
    original: &str,
    summary: &str,
    no_op: bool,
) -> Result<UpdateOutcome> {
    if no_op {
        info!("in-place update disabled");
        return Ok(UpdateOutcome::Skipped);
    }

    let splice = splice_summary(original, summary);
    std::fs::write(path, &splice.text).map_err(|e| StimaError::output_write(path, e))?;

    let outcome = if splice.replaced {
        UpdateOutcome::Replaced
    } else {
        UpdateOutcome::Appended
    };
    info!(?outcome, "document updated");
    Ok(outcome)
}

/// Write the bare summary to an explicit output file.
pub fn write_summary(path: &Path, summary: &str) -> Result<()> {
    std::fs::write(path, summary).map_err(|e| StimaError::output_write(path, e))?;
    info!(path = %path.display(), "summary written");
    Ok(())
}
