//! gems-study: binding of components to models and of data to components.
//!
//! Provides:
//! - Raw system declarations (components, nodes, connections) read from YAML/JSON
//! - `Network` resolution against resolved libraries, with port connection checks
//! - The parameter `DataBase`: typed constant/time/scenario data and its
//!   consistency check against the declared parameter structures
//! - Series tables and scenario-builder loading

pub mod data;
pub mod database;
pub mod error;
pub mod layout;
pub mod network;
pub mod resolve;
pub mod scenario;
pub mod schema;
pub mod series;

// Re-exports for ergonomics
pub use data::{ComponentParameterIndex, DataStructure, Scenarization};
pub use database::{DataBase, build_data_base, build_scenarized_data_base};
pub use error::{DataError, DataResult, StudyError, StudyResult};
pub use layout::StudyLayout;
pub use network::{Component, Network, Node, PortRef, PortsConnection};
pub use resolve::{System, build_network, consistency_check, resolve_system};
pub use scenario::{
    ScenarioAssignment, load_scenario_builder, parse_scenario_builder, resolve_scenarizations,
};
pub use schema::{InputSystem, ParameterValue, load_json_system, load_yaml_system, parse_yaml_system};
pub use series::{SeriesLoader, SeriesTable, TxtSeriesLoader};
