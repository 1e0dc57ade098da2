//! Estimate calculation and pipeline orchestration for stima.
//!
//! This crate ties the markdown extractor and renderer to the calculator and
//! to the target file (see [`pipeline::estimate_file`] and
//! [`pipeline::update_document`]).

pub mod estimate;
pub mod pipeline;

pub use estimate::calculate;
pub use pipeline::{
    Estimate, EstimateOptions, UpdateOutcome, estimate_document, estimate_file, load_document,
    update_document, write_summary,
};
