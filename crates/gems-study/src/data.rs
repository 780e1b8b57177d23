//! Typed parameter data: constant, time, scenario and per-node structures.

use core::fmt;
use std::collections::BTreeMap;
use std::sync::Arc;

use gems_core::{IndexingStructure, Real};

use crate::error::{DataError, DataResult};
use crate::series::SeriesTable;

/// Mapping from simulated year to the scenario column used for that year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scenarization {
    years: BTreeMap<usize, usize>,
}

impl Scenarization {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `scenario` to `year`. A year may be assigned only once.
    pub fn add_year(&mut self, year: usize, scenario: usize) -> DataResult<()> {
        if self.years.contains_key(&year) {
            return Err(DataError::DuplicateScenarizationYear { year });
        }
        self.years.insert(year, scenario);
        Ok(())
    }

    pub fn get_scenario_for_year(&self, year: usize) -> DataResult<usize> {
        self.years
            .get(&year)
            .copied()
            .ok_or_else(|| DataError::MissingIndex {
                what: format!("no scenario assigned to year {year}"),
            })
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

impl FromIterator<(usize, usize)> for Scenarization {
    /// Later assignments of a repeated year win; use [`Scenarization::add_year`]
    /// to reject them.
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        Self {
            years: iter.into_iter().collect(),
        }
    }
}

/// Data bound to one component parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum DataStructure {
    Constant(Real),
    /// Indexed by timestep.
    TimeSeries(Vec<Real>),
    /// Indexed by scenario, after translation through the scenarization.
    ScenarioSeries {
        values: Vec<Real>,
        scenarization: Option<Arc<Scenarization>>,
    },
    TimeScenarioSeries {
        table: SeriesTable,
        scenarization: Option<Arc<Scenarization>>,
    },
    /// Per-node data.
    Tree(BTreeMap<String, DataStructure>),
}

impl DataStructure {
    /// Read the value at the given coordinates.
    ///
    /// Coordinates a variant does not depend on are ignored; a required one
    /// that is absent or out of range is a [`DataError::MissingIndex`].
    pub fn get_value(
        &self,
        timestep: Option<usize>,
        scenario: Option<usize>,
        node_id: Option<&str>,
    ) -> DataResult<Real> {
        match self {
            DataStructure::Constant(value) => Ok(*value),
            DataStructure::TimeSeries(values) => {
                let t = require(timestep, "time series data requires a time index")?;
                values.get(t).copied().ok_or_else(|| out_of_range("timestep", t, values.len()))
            }
            DataStructure::ScenarioSeries {
                values,
                scenarization,
            } => {
                let s = require(scenario, "scenario series data requires a scenario index")?;
                let s = translate(s, scenarization.as_deref())?;
                values.get(s).copied().ok_or_else(|| out_of_range("scenario", s, values.len()))
            }
            DataStructure::TimeScenarioSeries {
                table,
                scenarization,
            } => {
                let t = require(timestep, "time scenario data requires a time index")?;
                let s = require(scenario, "time scenario data requires a scenario index")?;
                let s = translate(s, scenarization.as_deref())?;
                if t >= table.rows() {
                    return Err(out_of_range("timestep", t, table.rows()));
                }
                table
                    .get(t, s)
                    .ok_or_else(|| out_of_range("scenario", s, table.columns()))
            }
            DataStructure::Tree(nodes) => {
                let id = require(node_id, "tree data requires a node id")?;
                nodes
                    .get(id)
                    .ok_or_else(|| DataError::MissingIndex {
                        what: format!("no data for node '{id}'"),
                    })?
                    .get_value(timestep, scenario, None)
            }
        }
    }

    /// Dimensions this data varies along. A tree varies along the union of
    /// its nodes' dimensions.
    pub fn structure(&self) -> IndexingStructure {
        match self {
            DataStructure::Constant(_) => IndexingStructure::CONSTANT,
            DataStructure::TimeSeries(_) => IndexingStructure::TIME,
            DataStructure::ScenarioSeries { .. } => IndexingStructure::SCENARIO,
            DataStructure::TimeScenarioSeries { .. } => IndexingStructure::TIME_AND_SCENARIO,
            DataStructure::Tree(nodes) => nodes
                .values()
                .fold(IndexingStructure::CONSTANT, |acc, d| acc | d.structure()),
        }
    }

    /// Whether this data can be read wherever a parameter declared with
    /// `declared` is read: it may not vary along a dimension the declaration
    /// does not.
    pub fn meets(&self, declared: IndexingStructure) -> bool {
        match self {
            DataStructure::Tree(nodes) => nodes.values().all(|d| d.meets(declared)),
            other => other.structure().is_within(declared),
        }
    }
}

fn require<T>(index: Option<T>, what: &str) -> DataResult<T> {
    index.ok_or_else(|| DataError::MissingIndex {
        what: what.to_string(),
    })
}

fn translate(scenario: usize, scenarization: Option<&Scenarization>) -> DataResult<usize> {
    match scenarization {
        Some(s) => s.get_scenario_for_year(scenario),
        None => Ok(scenario),
    }
}

fn out_of_range(dimension: &str, index: usize, len: usize) -> DataError {
    DataError::MissingIndex {
        what: format!("{dimension} {index} out of range ({len} available)"),
    }
}

/// Key of a bound parameter: component id and parameter name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentParameterIndex {
    pub component_id: String,
    pub parameter_name: String,
}

impl ComponentParameterIndex {
    pub fn new(component_id: impl Into<String>, parameter_name: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            parameter_name: parameter_name.into(),
        }
    }
}

impl fmt::Display for ComponentParameterIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component_id, self.parameter_name)
    }
}
