//! Network resolution and data binding errors.

use gems_core::{CoreError, IndexingStructure, ModelRef};
use gems_model::LibraryError;
use thiserror::Error;

pub type StudyResult<T> = Result<T, StudyError>;
pub type DataResult<T> = Result<T, DataError>;

/// Errors raised while resolving a system against libraries.
#[derive(Error, Debug)]
pub enum StudyError {
    #[error("Component '{component}' refers to unknown model '{reference}'")]
    UnknownModel {
        component: String,
        reference: ModelRef,
    },

    #[error("Connection refers to unknown component '{component}'")]
    UnknownComponent { component: String },

    #[error("Error: Component {component} has invalid model ID: {model}")]
    InconsistentModelReference { component: String, model: String },

    #[error("Component '{component}' has no port '{port}'")]
    UnknownComponentPort { component: String, port: String },

    #[error("Incompatible port types {first} != {second}")]
    IncompatiblePortTypes { first: String, second: String },

    #[error("No definition for port field {field} on {port}")]
    MissingPortFieldDefinition { port: String, field: String },

    #[error("Port field {field} on {port} has 2 definitions")]
    DuplicatePortFieldDefinition { port: String, field: String },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Library(#[from] LibraryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while binding data to parameters or reading it back.
#[derive(Error, Debug)]
pub enum DataError {
    #[error(
        "Component '{component}', parameter '{parameter}': value '{value}' does not match dependence {structure} (constant data takes a number, time or scenario dependent data a series name)"
    )]
    DependenceMismatch {
        component: String,
        parameter: String,
        structure: IndexingStructure,
        value: String,
    },

    #[error("the year {year} is already defined")]
    DuplicateScenarizationYear { year: usize },

    #[error("Unknown scenario group '{group}'")]
    UnknownScenarioGroup { group: String },

    #[error("Missing index: {what}")]
    MissingIndex { what: String },

    #[error(
        "Could not convert series '{name}' to {expected}: got shape ({rows}, {columns})"
    )]
    SeriesShape {
        name: String,
        expected: &'static str,
        rows: usize,
        columns: usize,
    },

    #[error(
        "Data inconsistency for component: {component}, parameter: {parameter}. Declared structure {declared} is not met"
    )]
    DataRequirementMismatch {
        component: String,
        parameter: String,
        declared: IndexingStructure,
    },

    #[error("No data bound to component: {component}, parameter: {parameter}")]
    Unbound { component: String, parameter: String },

    #[error("Cannot load series '{name}': {message}")]
    SeriesLoad { name: String, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    NonFinite(#[from] CoreError),
}
