//! gems-core: shared foundation for the gems resolution layer.
//!
//! Contains:
//! - structure (time/scenario `IndexingStructure`)
//! - ids (qualified `library.model` references)
//! - numeric (Real + finiteness helpers)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod structure;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use ids::ModelRef;
pub use numeric::*;
pub use structure::IndexingStructure;
