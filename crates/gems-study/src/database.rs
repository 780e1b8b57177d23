//! Parameter database: data bound to each component parameter.

use std::collections::BTreeMap;
use std::sync::Arc;

use gems_core::{IndexingStructure, Real};
use indexmap::IndexMap;

use crate::data::{ComponentParameterIndex, DataStructure, Scenarization};
use crate::error::{DataError, DataResult};
use crate::network::Network;
use crate::schema::{InputComponent, InputComponentParameter, InputSystem, ParameterValue};
use crate::series::SeriesLoader;

/// Data for component parameters, keyed by (component, parameter).
#[derive(Debug, Clone, Default)]
pub struct DataBase {
    data: IndexMap<ComponentParameterIndex, DataStructure>,
}

impl DataBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind data to a parameter, replacing any previous binding.
    pub fn add_data(
        &mut self,
        component_id: impl Into<String>,
        parameter_name: impl Into<String>,
        data: DataStructure,
    ) {
        self.data.insert(
            ComponentParameterIndex::new(component_id, parameter_name),
            data,
        );
    }

    pub fn get_data(&self, component_id: &str, parameter_name: &str) -> DataResult<&DataStructure> {
        self.lookup(&ComponentParameterIndex::new(component_id, parameter_name))
    }

    pub fn get_value(
        &self,
        index: &ComponentParameterIndex,
        timestep: usize,
        scenario: usize,
    ) -> DataResult<Real> {
        self.lookup(index)?
            .get_value(Some(timestep), Some(scenario), None)
    }

    /// Like [`DataBase::get_value`], for per-node data.
    pub fn get_node_value(
        &self,
        index: &ComponentParameterIndex,
        timestep: usize,
        scenario: usize,
        node_id: &str,
    ) -> DataResult<Real> {
        self.lookup(index)?
            .get_value(Some(timestep), Some(scenario), Some(node_id))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check that every parameter of every node and component of `network`
    /// is bound to data meeting its declared structure.
    pub fn requirements_consistency(&self, network: &Network) -> DataResult<()> {
        for component in network.all_components() {
            for parameter in component.model.parameters().values() {
                let data = self.get_data(&component.id, &parameter.name)?;
                if !data.meets(parameter.structure) {
                    return Err(DataError::DataRequirementMismatch {
                        component: component.id.clone(),
                        parameter: parameter.name.clone(),
                        declared: parameter.structure,
                    });
                }
            }
        }
        tracing::debug!(bindings = self.data.len(), "data requirements met");
        Ok(())
    }

    fn lookup(&self, index: &ComponentParameterIndex) -> DataResult<&DataStructure> {
        self.data.get(index).ok_or_else(|| DataError::Unbound {
            component: index.component_id.clone(),
            parameter: index.parameter_name.clone(),
        })
    }
}

/// Bind the parameters of every component and node of `system`.
pub fn build_data_base(system: &InputSystem, loader: &dyn SeriesLoader) -> DataResult<DataBase> {
    let mut database = DataBase::new();
    for component in system.components.iter().chain(&system.nodes) {
        for parameter in &component.parameters {
            let data = build_data(component, parameter, loader, None)?;
            database.add_data(&component.id, &parameter.id, data);
        }
    }
    tracing::info!(bindings = database.len(), "data base built");
    Ok(database)
}

/// Like [`build_data_base`], translating scenario indices through the
/// scenarization of each parameter's scenario group. A parameter's own group
/// takes precedence over its component's group.
pub fn build_scenarized_data_base(
    system: &InputSystem,
    scenarizations: &BTreeMap<String, Arc<Scenarization>>,
    loader: &dyn SeriesLoader,
) -> DataResult<DataBase> {
    let lookup = |group: &str| {
        scenarizations
            .get(group)
            .cloned()
            .ok_or_else(|| DataError::UnknownScenarioGroup {
                group: group.to_string(),
            })
    };

    let mut database = DataBase::new();
    for component in system.components.iter().chain(&system.nodes) {
        for parameter in &component.parameters {
            let scenarization = parameter
                .scenario_group
                .as_deref()
                .or(component.scenario_group.as_deref())
                .map(lookup)
                .transpose()?;
            let data = build_data(component, parameter, loader, scenarization)?;
            database.add_data(&component.id, &parameter.id, data);
        }
    }
    tracing::info!(bindings = database.len(), "scenarized data base built");
    Ok(database)
}

fn build_data(
    component: &InputComponent,
    parameter: &InputComponentParameter,
    loader: &dyn SeriesLoader,
    scenarization: Option<Arc<Scenarization>>,
) -> DataResult<DataStructure> {
    let structure = IndexingStructure::new(parameter.time_dependent, parameter.scenario_dependent);
    let mismatch = || DataError::DependenceMismatch {
        component: component.id.clone(),
        parameter: parameter.id.clone(),
        structure,
        value: parameter.value.to_string(),
    };

    let data = match &parameter.value {
        ParameterValue::Number(value) if structure.is_constant() => {
            DataStructure::Constant(gems_core::ensure_finite(
                *value,
                format!("{}.{}", component.id, parameter.id),
            )?)
        }
        ParameterValue::Number(_) => return Err(mismatch()),
        ParameterValue::Series(_) if structure.is_constant() => return Err(mismatch()),
        ParameterValue::Series(name) => {
            let table = loader.load(name)?;
            match (structure.time, structure.scenario) {
                (true, true) => DataStructure::TimeScenarioSeries {
                    table,
                    scenarization,
                },
                (true, false) => DataStructure::TimeSeries(table.into_time_series(name)?),
                _ => DataStructure::ScenarioSeries {
                    values: table.into_scenario_series(name)?,
                    scenarization,
                },
            }
        }
    };

    tracing::debug!(
        component = %component.id,
        parameter = %parameter.id,
        structure = %data.structure(),
        "bound parameter"
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::SeriesTable;

    fn param(id: &str, time: bool, scenario: bool, value: ParameterValue) -> InputComponentParameter {
        InputComponentParameter {
            id: id.to_string(),
            time_dependent: time,
            scenario_dependent: scenario,
            value,
            scenario_group: None,
        }
    }

    fn system(parameters: Vec<InputComponentParameter>) -> InputSystem {
        InputSystem {
            components: vec![InputComponent {
                id: "G".to_string(),
                model: "basic.generator".to_string(),
                scenario_group: None,
                parameters,
            }],
            ..Default::default()
        }
    }

    fn series() -> BTreeMap<String, SeriesTable> {
        BTreeMap::from([
            (
                "column".to_string(),
                SeriesTable::from_rows("column", vec![vec![1.0], vec![2.0]]).unwrap(),
            ),
            (
                "row".to_string(),
                SeriesTable::from_rows("row", vec![vec![10.0, 20.0]]).unwrap(),
            ),
            (
                "grid".to_string(),
                SeriesTable::from_rows("grid", vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap(),
            ),
        ])
    }

    #[test]
    fn unbound_lookup() {
        let db = DataBase::new();
        let err = db.get_value(&ComponentParameterIndex::new("G", "cost"), 0, 0).unwrap_err();
        assert!(matches!(err, DataError::Unbound { component, .. } if component == "G"));
    }

    #[test]
    fn add_data_overwrites() {
        let mut db = DataBase::new();
        db.add_data("G", "cost", DataStructure::Constant(1.0));
        db.add_data("G", "cost", DataStructure::Constant(2.0));
        assert_eq!(db.len(), 1);
        let index = ComponentParameterIndex::new("G", "cost");
        assert_eq!(db.get_value(&index, 0, 0).unwrap(), 2.0);
    }

    #[test]
    fn builds_each_shape() {
        let system = system(vec![
            param("cost", false, false, ParameterValue::Number(30.0)),
            param("p_max", true, false, ParameterValue::Series("column".to_string())),
            param("avail", false, true, ParameterValue::Series("row".to_string())),
            param("load", true, true, ParameterValue::Series("grid".to_string())),
        ]);
        let db = build_data_base(&system, &series()).unwrap();

        let value = |p: &str, t, s| db.get_value(&ComponentParameterIndex::new("G", p), t, s).unwrap();
        assert_eq!(value("cost", 0, 0), 30.0);
        assert_eq!(value("p_max", 1, 0), 2.0);
        assert_eq!(value("avail", 0, 1), 20.0);
        assert_eq!(value("load", 1, 1), 4.0);
    }

    #[test]
    fn dependence_mismatch() {
        let number_for_series = system(vec![param("p_max", true, false, ParameterValue::Number(1.0))]);
        assert!(matches!(
            build_data_base(&number_for_series, &series()),
            Err(DataError::DependenceMismatch { .. })
        ));

        let series_for_constant = system(vec![param(
            "cost",
            false,
            false,
            ParameterValue::Series("column".to_string()),
        )]);
        assert!(matches!(
            build_data_base(&series_for_constant, &series()),
            Err(DataError::DependenceMismatch { .. })
        ));
    }

    #[test]
    fn wrong_series_shape() {
        let system = system(vec![param("p_max", true, false, ParameterValue::Series("grid".to_string()))]);
        assert!(matches!(
            build_data_base(&system, &series()),
            Err(DataError::SeriesShape { rows: 2, columns: 2, .. })
        ));
    }

    #[test]
    fn parameter_group_overrides_component_group() {
        let mut system = system(vec![
            param("avail", false, true, ParameterValue::Series("row".to_string())),
            param("load", true, true, ParameterValue::Series("grid".to_string())),
        ]);
        system.components[0].scenario_group = Some("swap".to_string());
        system.components[0].parameters[1].scenario_group = Some("identity".to_string());

        let scenarizations: BTreeMap<String, Arc<Scenarization>> = BTreeMap::from([
            ("swap".to_string(), Arc::new([(0, 1), (1, 0)].into_iter().collect())),
            ("identity".to_string(), Arc::new([(0, 0), (1, 1)].into_iter().collect())),
        ]);
        let db = build_scenarized_data_base(&system, &scenarizations, &series()).unwrap();

        let avail = ComponentParameterIndex::new("G", "avail");
        assert_eq!(db.get_value(&avail, 0, 0).unwrap(), 20.0);
        let load = ComponentParameterIndex::new("G", "load");
        assert_eq!(db.get_value(&load, 0, 0).unwrap(), 1.0);
    }

    #[test]
    fn unknown_scenario_group() {
        let mut system = system(vec![param("avail", false, true, ParameterValue::Series("row".to_string()))]);
        system.components[0].scenario_group = Some("missing".to_string());
        let err = build_scenarized_data_base(&system, &BTreeMap::new(), &series()).unwrap_err();
        assert!(matches!(err, DataError::UnknownScenarioGroup { group } if group == "missing"));
    }
}
