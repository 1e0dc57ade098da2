//! Phase extraction from a quote document.
//!
//! Recognizes only this convention:
//! - `### Phase name` opens a phase
//! - `**Stima ore**: 10-15 ore` or `**Stima ore**: 5 ore` closes it
//!
//! Everything else is ignored.

use std::num::IntErrorKind;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument, trace};

use stima_shared::{Phase, Result, StimaError};

/// Level-3 heading prefix.
const HEADING_PREFIX: &str = "### ";

/// Bold label introducing the hour estimate.
const ESTIMATE_LABEL: &str = "**Stima ore**:";

/// Headings written by the summary renderer; never treated as phases.
pub const RESERVED_HEADINGS: [&str; 4] = [
    "Riepilogo stime",
    "Stima economica",
    "Timeline stimata",
    "Preventivo finale",
];

// ---------------------------------------------------------------------------
// Regex patterns (compiled once)
// ---------------------------------------------------------------------------

/// `10-15 ore` or `10–15 ore`.
static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*[-–]\s*(\d+)\s+ore\b").expect("range regex")
});

/// `5 ore`.
static SINGLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+ore\b").expect("single regex"));

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Extract phases in document order.
///
/// A heading without a parseable estimate before the next heading is dropped
/// silently. An empty result is returned as-is; deciding whether that is an
/// error is up to the caller.
///
/// An hour count too large for `u32` is a `Validation` error rather than a
/// missing estimate.
#[instrument(skip_all, fields(bytes = document.len()))]
pub fn extract_phases(document: &str) -> Result<Vec<Phase>> {
    let mut phases = Vec::new();
    let mut current: Option<String> = None;

    for line in document.lines() {
        let line = line.trim();

        if let Some(title) = heading_text(line) {
            if !is_reserved(title) {
                if let Some(dropped) = current.replace(title.to_string()) {
                    trace!(phase = %dropped, "heading without estimate");
                }
            }
            continue;
        }

        if !line.starts_with(ESTIMATE_LABEL) {
            continue;
        }

        let Some(name) = current.as_deref() else {
            continue;
        };

        if let Some((min, max)) = parse_hours(name, line)? {
            let phase = Phase::new(name, min, max);
            if min > max {
                debug!(phase = %phase.name, min, max, "estimate range written high-low");
            }
            phases.push(phase);
            current = None;
        }
    }

    debug!(count = phases.len(), "phases extracted");
    Ok(phases)
}

/// Heading text of a `### ` line, or `None` for any other line.
fn heading_text(trimmed: &str) -> Option<&str> {
    trimmed
        .strip_prefix(HEADING_PREFIX)
        .map(str::trim)
        .filter(|title| !title.is_empty())
}

/// Whether a heading is one of the summary sections.
pub fn is_reserved(title: &str) -> bool {
    RESERVED_HEADINGS.contains(&title)
}

/// Parse the hours of an estimate line, range first.
fn parse_hours(phase: &str, line: &str) -> Result<Option<(u32, u32)>> {
    if let Some(caps) = RANGE_RE.captures(line) {
        let first = hour_count(phase, &caps[1])?;
        let second = hour_count(phase, &caps[2])?;
        if let (Some(a), Some(b)) = (first, second) {
            return Ok(Some((a, b)));
        }
    }

    let Some(caps) = SINGLE_RE.captures(line) else {
        return Ok(None);
    };
    Ok(hour_count(phase, &caps[1])?.map(|hours| (hours, hours)))
}

/// `None` for digits `u32` cannot read (non-ASCII digits), an error when the
/// value is out of range.
fn hour_count(phase: &str, digits: &str) -> Result<Option<u32>> {
    match digits.parse::<u32>() {
        Ok(hours) => Ok(Some(hours)),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Err(StimaError::validation(format!(
            "estimate for phase '{phase}' is too large: {digits} ore"
        ))),
        Err(_) => Ok(None),
    }
}
