//! Context module: the estimate → shrink → solve pipeline.

pub mod pipeline;

pub use pipeline::{ShrunkCgContext, SpectrumStrategy};
