//! Markdown side of stima: reading phases out of a quote document, rendering
//! the estimate summary, and splicing it back into the document.
//!
//! Only a narrow convention is understood: `### ` headings followed by a
//! `**Stima ore**:` line. No general markdown parsing happens here.

pub mod extract;
pub mod region;
pub mod render;

pub use extract::{RESERVED_HEADINGS, extract_phases, is_reserved};
pub use region::{SUMMARY_MARKERS, Splice, find_summary_region, splice_summary};
pub use render::render_summary;
