//! Enumerations shared by model members.

use core::fmt;

/// Value domain of a parameter or decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueType {
    #[default]
    Continuous,
    Integer,
    Boolean,
}

/// Which part of the optimisation problem a variable or constraint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProblemContext {
    #[default]
    Operational,
    Investment,
    Coupling,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Continuous => write!(f, "continuous"),
            ValueType::Integer => write!(f, "integer"),
            ValueType::Boolean => write!(f, "boolean"),
        }
    }
}

impl fmt::Display for ProblemContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemContext::Operational => write!(f, "operational"),
            ProblemContext::Investment => write!(f, "investment"),
            ProblemContext::Coupling => write!(f, "coupling"),
        }
    }
}
