//! Core module: operator contract and vector operations.

pub mod traits;
pub mod wrappers;

pub use traits::{Indexing, InnerProduct, Operator};
pub use wrappers::FnOperator;
