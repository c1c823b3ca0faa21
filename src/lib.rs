pub mod error;
pub mod graph;
pub mod math;
pub mod operations;
pub mod topology;

pub use error::{Result, WaygraphError};
