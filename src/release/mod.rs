//! Release assembly: boundary detection, classification and the generate
//! pipeline.

pub mod boundary;
pub mod classify;
pub mod pipeline;
pub mod version;

pub use boundary::{UnreleasedRange, resolve_unreleased_range};
pub use classify::{ReleaseClassification, classify, generate_summary};
pub use pipeline::{GenerateOutcome, GenerateRequest, RangeMode, generate};
