//! Scenario-builder tables: which scenario each group uses for each year.
//!
//! The table is a header-less CSV of `group-name, year, scenario` rows.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;

use crate::data::Scenarization;
use crate::error::DataResult;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ScenarioAssignment {
    pub name: String,
    pub year: usize,
    pub scenario: usize,
}

pub fn parse_scenario_builder(reader: impl Read) -> DataResult<Vec<ScenarioAssignment>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .from_reader(reader);
    let rows = reader
        .deserialize()
        .collect::<Result<Vec<ScenarioAssignment>, _>>()?;
    Ok(rows)
}

pub fn load_scenario_builder(path: &Path) -> DataResult<Vec<ScenarioAssignment>> {
    let content = std::fs::read_to_string(path)?;
    parse_scenario_builder(content.as_bytes())
}

/// Group assignments by name. A year assigned twice within a group fails.
pub fn resolve_scenarizations(
    rows: &[ScenarioAssignment],
) -> DataResult<BTreeMap<String, Arc<Scenarization>>> {
    let mut groups: BTreeMap<String, Scenarization> = BTreeMap::new();
    for row in rows {
        groups
            .entry(row.name.clone())
            .or_default()
            .add_year(row.year, row.scenario)?;
    }
    tracing::debug!(groups = groups.len(), "scenario groups resolved");
    Ok(groups
        .into_iter()
        .map(|(name, s)| (name, Arc::new(s)))
        .collect())
}
