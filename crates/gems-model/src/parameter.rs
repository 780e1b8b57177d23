//! Model parameters.

use gems_core::IndexingStructure;

use crate::common::ValueType;

/// A parameter of a model, mainly defined by a name and an expected structure.
///
/// When the model is instantiated as a component, a value must be bound to each
/// parameter, either constant or series-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub value_type: ValueType,
    pub structure: IndexingStructure,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value_type: ValueType, structure: IndexingStructure) -> Self {
        Self {
            name: name.into(),
            value_type,
            structure,
        }
    }

    pub fn float(name: impl Into<String>, structure: IndexingStructure) -> Self {
        Self::new(name, ValueType::Continuous, structure)
    }

    pub fn int(name: impl Into<String>, structure: IndexingStructure) -> Self {
        Self::new(name, ValueType::Integer, structure)
    }
}
