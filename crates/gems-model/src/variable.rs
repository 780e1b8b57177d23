//! Decision variables.

use gems_core::IndexingStructure;

use crate::common::{ProblemContext, ValueType};
use crate::expression::ExpressionRef;

/// A decision variable of a model.
///
/// Bounds are expressions; the owning model checks that they contain no
/// variables.
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub value_type: ValueType,
    pub lower_bound: Option<ExpressionRef>,
    pub upper_bound: Option<ExpressionRef>,
    pub structure: IndexingStructure,
    pub context: ProblemContext,
}

impl Variable {
    pub fn new(name: impl Into<String>, value_type: ValueType, structure: IndexingStructure) -> Self {
        Self {
            name: name.into(),
            value_type,
            lower_bound: None,
            upper_bound: None,
            structure,
            context: ProblemContext::Operational,
        }
    }

    pub fn float(name: impl Into<String>, structure: IndexingStructure) -> Self {
        Self::new(name, ValueType::Continuous, structure)
    }

    pub fn int(name: impl Into<String>, structure: IndexingStructure) -> Self {
        Self::new(name, ValueType::Integer, structure)
    }

    pub fn with_lower_bound(mut self, bound: ExpressionRef) -> Self {
        self.lower_bound = Some(bound);
        self
    }

    pub fn with_upper_bound(mut self, bound: ExpressionRef) -> Self {
        self.upper_bound = Some(bound);
        self
    }

    pub fn with_context(mut self, context: ProblemContext) -> Self {
        self.context = context;
        self
    }

    pub(crate) fn bounds(&self) -> impl Iterator<Item = &ExpressionRef> {
        self.lower_bound.iter().chain(self.upper_bound.iter())
    }
}
