//! Model construction and library resolution errors.

use core::fmt;

use gems_core::IndexingStructure;
use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;
pub type LibraryResult<T> = Result<T, LibraryError>;

/// Which objective contribution of a model an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveKind {
    Operational,
    Investment,
}

impl fmt::Display for ObjectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectiveKind::Operational => write!(f, "operational"),
            ObjectiveKind::Investment => write!(f, "investment"),
        }
    }
}

/// Errors raised while constructing a `Model`. Never recovered.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Model '{model}': 2 ports have the same name '{port}'")]
    PortNameCollision { model: String, port: String },

    #[error("Model '{model}': invalid port in port field definition: {port}")]
    UnknownPort { model: String, port: String },

    #[error("Model '{model}': invalid port field in port field definition: {port}.{field}")]
    UnknownPortField {
        model: String,
        port: String,
        field: String,
    },

    #[error("Model '{model}': {objective} objective contribution must be a linear expression")]
    NonLinearObjective {
        model: String,
        objective: ObjectiveKind,
    },

    #[error(
        "Model '{model}': {objective} objective contribution should be a real-valued expression, got structure {structure}"
    )]
    NonScalarObjective {
        model: String,
        objective: ObjectiveKind,
        structure: IndexingStructure,
    },

    #[error("Model '{model}': bound of {owner} must not contain variables")]
    NonConstantBound { model: String, owner: String },

    #[error("Unknown parameter '{name}' in model '{model}'")]
    UnknownParameter { model: String, name: String },

    #[error("Unknown variable '{name}' in model '{model}'")]
    UnknownVariable { model: String, name: String },

    #[error("Cannot reference '{component}.{name}': models have no component-scoped parameters or variables")]
    ComponentScopedReference { component: String, name: String },
}

/// Errors raised while resolving library declarations.
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Circular import in libraries: {}", .cycle.join(" <-> "))]
    CircularLibraryImport { cycle: Vec<String> },

    #[error("Library '{library}': model {model} is defined twice")]
    ModelRedefinition { library: String, model: String },

    #[error("Library '{library}': port(s) {} is(are) defined twice", .ports.join(", "))]
    PortRedefinition { library: String, ports: Vec<String> },

    #[error("The library identifier '{library}' is defined twice")]
    DuplicateLibrary { library: String },

    #[error("Library '{library}' depends on unknown library '{dependency}'")]
    UnknownLibrary { library: String, dependency: String },

    #[error("Library '{library}': model '{model}' uses unknown port type '{port_type}'")]
    UnknownPortType {
        library: String,
        model: String,
        port_type: String,
    },

    #[error("Library '{library}': model '{model}': cannot parse expression '{text}': {message}")]
    Expression {
        library: String,
        model: String,
        text: String,
        message: String,
    },

    #[error("Library '{library}': {source}")]
    Model {
        library: String,
        #[source]
        source: ModelError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
