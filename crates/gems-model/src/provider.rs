//! Name → `IndexingStructure` lookups used by expression analysis.

use gems_core::IndexingStructure;
use indexmap::IndexMap;

use crate::error::{ModelError, ModelResult};
use crate::parameter::Parameter;
use crate::variable::Variable;

/// Resolves the declared structure of names referenced from an expression.
pub trait IndexingStructureProvider {
    fn parameter_structure(&self, name: &str) -> ModelResult<IndexingStructure>;

    fn variable_structure(&self, name: &str) -> ModelResult<IndexingStructure>;

    fn component_parameter_structure(
        &self,
        component_id: &str,
        name: &str,
    ) -> ModelResult<IndexingStructure>;

    fn component_variable_structure(
        &self,
        component_id: &str,
        name: &str,
    ) -> ModelResult<IndexingStructure>;
}

/// Provider backed by the members of a single model.
///
/// Component-scoped names do not exist at model-definition time, so those
/// lookups always fail.
#[derive(Debug, Clone, Copy)]
pub struct ModelStructureProvider<'a> {
    model_id: &'a str,
    parameters: &'a IndexMap<String, Parameter>,
    variables: &'a IndexMap<String, Variable>,
}

impl<'a> ModelStructureProvider<'a> {
    pub fn new(
        model_id: &'a str,
        parameters: &'a IndexMap<String, Parameter>,
        variables: &'a IndexMap<String, Variable>,
    ) -> Self {
        Self {
            model_id,
            parameters,
            variables,
        }
    }
}

impl IndexingStructureProvider for ModelStructureProvider<'_> {
    fn parameter_structure(&self, name: &str) -> ModelResult<IndexingStructure> {
        self.parameters
            .get(name)
            .map(|p| p.structure)
            .ok_or_else(|| ModelError::UnknownParameter {
                model: self.model_id.to_string(),
                name: name.to_string(),
            })
    }

    fn variable_structure(&self, name: &str) -> ModelResult<IndexingStructure> {
        self.variables
            .get(name)
            .map(|v| v.structure)
            .ok_or_else(|| ModelError::UnknownVariable {
                model: self.model_id.to_string(),
                name: name.to_string(),
            })
    }

    fn component_parameter_structure(
        &self,
        component_id: &str,
        name: &str,
    ) -> ModelResult<IndexingStructure> {
        Err(ModelError::ComponentScopedReference {
            component: component_id.to_string(),
            name: name.to_string(),
        })
    }

    fn component_variable_structure(
        &self,
        component_id: &str,
        name: &str,
    ) -> ModelResult<IndexingStructure> {
        Err(ModelError::ComponentScopedReference {
            component: component_id.to_string(),
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members() -> (IndexMap<String, Parameter>, IndexMap<String, Variable>) {
        let mut parameters = IndexMap::new();
        parameters.insert(
            "cost".to_string(),
            Parameter::float("cost", IndexingStructure::CONSTANT),
        );
        let mut variables = IndexMap::new();
        variables.insert(
            "generation".to_string(),
            Variable::float("generation", IndexingStructure::TIME_AND_SCENARIO),
        );
        (parameters, variables)
    }

    #[test]
    fn resolves_declared_members() {
        let (parameters, variables) = members();
        let provider = ModelStructureProvider::new("GEN", &parameters, &variables);

        assert_eq!(
            provider.parameter_structure("cost").unwrap(),
            IndexingStructure::CONSTANT
        );
        assert_eq!(
            provider.variable_structure("generation").unwrap(),
            IndexingStructure::TIME_AND_SCENARIO
        );
    }

    #[test]
    fn unknown_names_are_reported() {
        let (parameters, variables) = members();
        let provider = ModelStructureProvider::new("GEN", &parameters, &variables);

        assert_eq!(
            provider.parameter_structure("p_max").unwrap_err(),
            ModelError::UnknownParameter {
                model: "GEN".into(),
                name: "p_max".into()
            }
        );
        assert!(matches!(
            provider.variable_structure("cost"),
            Err(ModelError::UnknownVariable { .. })
        ));
    }

    #[test]
    fn component_scoped_lookups_are_refused() {
        let (parameters, variables) = members();
        let provider = ModelStructureProvider::new("GEN", &parameters, &variables);

        assert!(matches!(
            provider.component_parameter_structure("G", "cost"),
            Err(ModelError::ComponentScopedReference { .. })
        ));
        assert!(matches!(
            provider.component_variable_structure("G", "generation"),
            Err(ModelError::ComponentScopedReference { .. })
        ));
    }
}
