//! Data models for the classification labeler.

mod label;
mod sample;

pub use label::{Label, LabelEntry};
pub use sample::{Annotation, Sample};
