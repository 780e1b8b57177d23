//! Model constraints.

use crate::common::ProblemContext;
use crate::expression::ExpressionRef;

/// A constraint linking variables and parameters of a model together.
///
/// Missing bounds are unbounded. Bounds must not contain variables.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub name: String,
    pub expression: ExpressionRef,
    pub lower_bound: Option<ExpressionRef>,
    pub upper_bound: Option<ExpressionRef>,
    pub context: ProblemContext,
}

impl Constraint {
    pub fn new(name: impl Into<String>, expression: ExpressionRef) -> Self {
        Self {
            name: name.into(),
            expression,
            lower_bound: None,
            upper_bound: None,
            context: ProblemContext::Operational,
        }
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
