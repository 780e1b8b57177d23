//! Raw system declarations: components, nodes and their connections.
//!
//! ```yaml
//! system:
//!   nodes:
//!     - id: N
//!       model: basic.node
//!   components:
//!     - id: G
//!       model: basic.generator
//!       scenario-group: load
//!       parameters:
//!         - id: cost
//!           value: 30
//!         - id: p_max
//!           time-dependent: true
//!           value: p_max_series
//!   connections:
//!     - component1: N
//!       port1: balance_port
//!       component2: G
//!       port2: balance_port
//! ```

use std::io::Read;
use std::path::Path;

use gems_core::Real;
use serde::{Deserialize, Serialize};

use crate::error::StudyResult;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemFile {
    pub system: InputSystem,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct InputSystem {
    /// Informational; libraries are supplied to resolution explicitly.
    #[serde(
        default,
        alias = "model_libraries",
        skip_serializing_if = "Option::is_none"
    )]
    pub model_libraries: Option<String>,
    #[serde(default)]
    pub nodes: Vec<InputComponent>,
    #[serde(default)]
    pub components: Vec<InputComponent>,
    #[serde(default)]
    pub connections: Vec<InputPortConnection>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct InputComponent {
    pub id: String,
    /// `library-id.model-id`
    pub model: String,
    #[serde(
        default,
        alias = "scenario_group",
        skip_serializing_if = "Option::is_none"
    )]
    pub scenario_group: Option<String>,
    #[serde(default)]
    pub parameters: Vec<InputComponentParameter>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct InputComponentParameter {
    pub id: String,
    #[serde(default, alias = "time_dependent")]
    pub time_dependent: bool,
    #[serde(default, alias = "scenario_dependent")]
    pub scenario_dependent: bool,
    pub value: ParameterValue,
    #[serde(
        default,
        alias = "scenario_group",
        skip_serializing_if = "Option::is_none"
    )]
    pub scenario_group: Option<String>,
}

/// A literal number or the name of a series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ParameterValue {
    Number(Real),
    Series(String),
}

impl std::fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterValue::Number(v) => write!(f, "{v}"),
            ParameterValue::Series(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputPortConnection {
    pub component1: String,
    pub port1: String,
    pub component2: String,
    pub port2: String,
}

/// Parse a system document (`system:` root key) from a reader.
pub fn parse_yaml_system(reader: impl Read) -> StudyResult<InputSystem> {
    let file: SystemFile = serde_yaml::from_reader(reader)?;
    Ok(file.system)
}

pub fn load_yaml_system(path: &Path) -> StudyResult<InputSystem> {
    let content = std::fs::read_to_string(path)?;
    parse_yaml_system(content.as_bytes())
}

pub fn load_json_system(path: &Path) -> StudyResult<InputSystem> {
    let content = std::fs::read_to_string(path)?;
    let file: SystemFile = serde_json::from_str(&content)?;
    Ok(file.system)
}
