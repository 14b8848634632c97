//! Core pipeline stages
//!
//! Business logic between parsing and output construction:
//!
//! - [`normalize`] - raw field maps into the canonical shape
//! - [`validate`] - domain invariants, collect-all per record
//! - [`enrich`] - clinical attributes derived from the measured value
//! - [`pipeline`] - the batch orchestrator tying it all together

pub mod enrich;
pub mod normalize;
pub mod pipeline;
pub mod validate;

pub use pipeline::{BatchResult, Pipeline};
