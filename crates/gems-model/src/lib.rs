//! gems-model: reusable model definitions and library resolution.
//!
//! Provides:
//! - Model members (parameters, variables, constraints, ports)
//! - `Model` construction through `ModelBuilder`, with structural validation
//! - `Library` and the resolver merging inter-dependent library declarations
//! - Raw library declarations as read from YAML
//!
//! Expressions are owned by an external collaborator and consumed through the
//! [`Expression`] and [`ExpressionParser`] traits.
//!
//! # Example
//!
//! ```
//! use gems_core::IndexingStructure;
//! use gems_model::{Model, ModelPort, Parameter, PortType};
//! use std::sync::Arc;
//!
//! let balance = Arc::new(PortType::new("balance", ["flow"]));
//! let model = Model::builder("demand")
//!     .parameter(Parameter::float("demand", IndexingStructure::TIME_AND_SCENARIO))
//!     .port(ModelPort::new(balance, "balance_port"))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(model.parameters().len(), 1);
//! assert!(model.port("balance_port").is_some());
//! ```

pub mod common;
pub mod constraint;
pub mod error;
pub mod expression;
pub mod library;
pub mod model;
pub mod parameter;
pub mod port;
pub mod provider;
pub mod resolve;
pub mod schema;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub(crate) mod validate;
pub mod variable;

// Re-exports for ergonomics
pub use common::{ProblemContext, ValueType};
pub use constraint::Constraint;
pub use error::{LibraryError, LibraryResult, ModelError, ModelResult, ObjectiveKind};
pub use expression::{Degree, Expression, ExpressionParser, ExpressionRef};
pub use library::{Library, LibraryMap};
pub use model::{Model, ModelBuilder, ModelOverrides, ModelPort};
pub use parameter::Parameter;
pub use port::{PortFieldDefinition, PortFieldId, PortType};
pub use provider::{IndexingStructureProvider, ModelStructureProvider};
pub use resolve::resolve_libraries;
pub use schema::{InputLibrary, load_yaml_library, parse_yaml_library};
pub use variable::Variable;
