//! Interface to the external expression collaborator.
//!
//! Parsing, the expression AST and the degree/indexing computations live outside
//! this crate. Models only hold opaque [`ExpressionRef`]s and query them through
//! an [`IndexingStructureProvider`].

use core::fmt;
use std::sync::Arc;

use gems_core::IndexingStructure;

use crate::error::ModelResult;
use crate::provider::IndexingStructureProvider;

/// Polynomial degree of an expression in the decision variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Degree {
    /// No decision variable appears.
    Constant,
    Linear,
    NonLinear,
}

impl Degree {
    pub fn is_constant(self) -> bool {
        self == Degree::Constant
    }

    pub fn is_linear(self) -> bool {
        self <= Degree::Linear
    }
}

/// An expression as seen by the resolution layer.
pub trait Expression: fmt::Debug + Send + Sync {
    /// Degree of the expression, classifying names through `provider`.
    fn degree(&self, provider: &dyn IndexingStructureProvider) -> ModelResult<Degree>;

    /// Time/scenario dependence of the expression value.
    fn indexing_structure(
        &self,
        provider: &dyn IndexingStructureProvider,
    ) -> ModelResult<IndexingStructure>;
}

/// Shared handle to an external expression.
pub type ExpressionRef = Arc<dyn Expression>;

/// Turns declaration text (constraint bodies, bounds, objectives, port field
/// definitions) into expressions.
pub trait ExpressionParser {
    fn parse(&self, text: &str) -> Result<ExpressionRef, String>;
}
