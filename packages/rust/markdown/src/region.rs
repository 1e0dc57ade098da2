//! Locating and replacing the summary region of a document.

use tracing::debug;

/// Markers opening a rendered summary, range mode first.
pub const SUMMARY_MARKERS: [&str; 2] = [
    "---\n\n### Riepilogo stime",
    "---\n\n### Preventivo finale",
];

/// Result of splicing a summary into a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    /// The full new document text.
    pub text: String,
    /// `true` if an existing summary region was replaced, `false` if appended.
    pub replaced: bool,
}

/// Byte offset where the existing summary region starts, if any.
///
/// Only markers at the start of a line count. If both markers are present the
/// earliest one wins, so everything after it is treated as the region.
pub fn find_summary_region(document: &str) -> Option<usize> {
    SUMMARY_MARKERS
        .iter()
        .filter_map(|marker| {
            document
                .match_indices(marker)
                .map(|(pos, _)| pos)
                .find(|&pos| pos == 0 || document.as_bytes()[pos - 1] == b'\n')
        })
        .min()
}

/// Replace the summary region of `document` with `summary`, or append it.
///
/// Appending trims trailing whitespace and separates with one blank line.
/// Applying the same summary twice gives the same text as applying it once.
pub fn splice_summary(document: &str, summary: &str) -> Splice {
    if let Some(start) = find_summary_region(document) {
        debug!(start, "replacing existing summary region");
        let mut text = String::with_capacity(start + summary.len());
        text.push_str(&document[..start]);
        text.push_str(summary);
        return Splice {
            text,
            replaced: true,
        };
    }

    let existing = document.trim_end();
    let text = if existing.is_empty() {
        summary.to_string()
    } else {
        format!("{existing}\n\n{summary}")
    };

    debug!("no summary region found, appending");
    Splice {
        text,
        replaced: false,
    }
}
