//! Raw library declarations, as written in library YAML files.
//!
//! ```yaml
//! library:
//!   id: basic
//!   dependencies: []
//!   port-types:
//!     - id: flow
//!       fields:
//!         - id: flow
//!   models:
//!     - id: generator
//!       parameters:
//!         - id: cost
//!       variables:
//!         - id: generation
//!           lower-bound: 0
//!       ports:
//!         - id: balance_port
//!           type: flow
//!       port-field-definitions:
//!         - port: balance_port
//!           field: flow
//!           definition: generation
//!       objective: expec(sum(cost * generation))
//! ```

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::common::ValueType;
use crate::error::LibraryResult;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LibraryFile {
    pub library: InputLibrary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct InputLibrary {
    pub id: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default, alias = "port_types")]
    pub port_types: Vec<InputPortType>,
    #[serde(default)]
    pub models: Vec<InputModel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputPortType {
    pub id: String,
    #[serde(default)]
    pub fields: Vec<InputField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputField {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct InputModel {
    pub id: String,
    #[serde(default)]
    pub parameters: Vec<InputParameter>,
    #[serde(default)]
    pub variables: Vec<InputVariable>,
    #[serde(default)]
    pub ports: Vec<InputModelPort>,
    #[serde(default, alias = "port_field_definitions")]
    pub port_field_definitions: Vec<InputPortFieldDefinition>,
    #[serde(default, alias = "binding_constraints")]
    pub binding_constraints: Vec<InputConstraint>,
    #[serde(default)]
    pub constraints: Vec<InputConstraint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    #[serde(
        default,
        alias = "investment_objective",
        skip_serializing_if = "Option::is_none"
    )]
    pub investment_objective: Option<String>,
    #[serde(default, alias = "inter_block_dyn")]
    pub inter_block_dyn: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct InputParameter {
    pub id: String,
    #[serde(default, alias = "time_dependent")]
    pub time_dependent: bool,
    #[serde(default, alias = "scenario_dependent")]
    pub scenario_dependent: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct InputVariable {
    pub id: String,
    #[serde(default = "default_true", alias = "time_dependent")]
    pub time_dependent: bool,
    #[serde(default = "default_true", alias = "scenario_dependent")]
    pub scenario_dependent: bool,
    #[serde(
        default,
        alias = "lower_bound",
        deserialize_with = "expression_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub lower_bound: Option<String>,
    #[serde(
        default,
        alias = "upper_bound",
        deserialize_with = "expression_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub upper_bound: Option<String>,
    #[serde(default, alias = "variable_type")]
    pub variable_type: VariableTypeDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VariableTypeDef {
    #[default]
    Continuous,
    Integer,
    #[serde(alias = "boolean")]
    Binary,
}

impl From<VariableTypeDef> for ValueType {
    fn from(def: VariableTypeDef) -> Self {
        match def {
            VariableTypeDef::Continuous => ValueType::Continuous,
            VariableTypeDef::Integer => ValueType::Integer,
            VariableTypeDef::Binary => ValueType::Boolean,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputModelPort {
    pub id: String,
    #[serde(rename = "type")]
    pub port_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputPortFieldDefinition {
    pub port: String,
    pub field: String,
    pub definition: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct InputConstraint {
    pub id: String,
    pub expression: String,
    #[serde(
        default,
        alias = "lower_bound",
        deserialize_with = "expression_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub lower_bound: Option<String>,
    #[serde(
        default,
        alias = "upper_bound",
        deserialize_with = "expression_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub upper_bound: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Bounds may be written as bare numbers; keep them as expression text.
fn expression_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    Ok(
        Option::<NumberOrText>::deserialize(deserializer)?.map(|v| match v {
            NumberOrText::Number(n) => n.to_string(),
            NumberOrText::Text(s) => s,
        }),
    )
}

/// Parse a library document (`library:` root key) from a reader.
pub fn parse_yaml_library(reader: impl Read) -> LibraryResult<InputLibrary> {
    let file: LibraryFile = serde_yaml::from_reader(reader)?;
    Ok(file.library)
}

/// Load a library document from disk.
pub fn load_yaml_library(path: &Path) -> LibraryResult<InputLibrary> {
    let content = std::fs::read_to_string(path)?;
    parse_yaml_library(content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIBRARY: &str = r#"
library:
  id: basic
  port-types:
    - id: flow
      fields:
        - id: flow
  models:
    - id: generator
      parameters:
        - id: cost
        - id: p_max
          time-dependent: true
      variables:
        - id: generation
          lower-bound: 0
          upper-bound: p_max
        - id: on
          variable-type: binary
          scenario_dependent: false
      ports:
        - id: balance_port
          type: flow
      port-field-definitions:
        - port: balance_port
          field: flow
          definition: generation
      constraints:
        - id: max
          expression: generation - p_max
          upper-bound: 0
      objective: expec(sum(cost * generation))
"#;

    #[test]
    fn parse_library_document() {
        let lib = parse_yaml_library(LIBRARY.as_bytes()).unwrap();
        assert_eq!(lib.id, "basic");
        assert!(lib.dependencies.is_empty());
        assert_eq!(lib.port_types[0].fields[0].id, "flow");

        let model = &lib.models[0];
        assert_eq!(model.parameters.len(), 2);
        assert!(!model.parameters[0].time_dependent);
        assert!(model.parameters[1].time_dependent);
        assert!(!model.parameters[1].scenario_dependent);

        let generation = &model.variables[0];
        assert!(generation.time_dependent && generation.scenario_dependent);
        assert_eq!(generation.lower_bound.as_deref(), Some("0"));
        assert_eq!(generation.upper_bound.as_deref(), Some("p_max"));
        assert_eq!(generation.variable_type, VariableTypeDef::Continuous);

        let on = &model.variables[1];
        assert_eq!(ValueType::from(on.variable_type), ValueType::Boolean);
        assert!(!on.scenario_dependent);

        assert_eq!(model.ports[0].port_type, "flow");
        assert_eq!(model.port_field_definitions[0].definition, "generation");
        assert_eq!(model.constraints[0].upper_bound.as_deref(), Some("0"));
        assert_eq!(
            model.objective.as_deref(),
            Some("expec(sum(cost * generation))")
        );
    }

    #[test]
    fn missing_root_key_is_an_error() {
        assert!(parse_yaml_library("id: basic".as_bytes()).is_err());
    }
}
