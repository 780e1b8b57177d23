mod common;

use std::collections::BTreeMap;

use gems_study::{
    ComponentParameterIndex, DataBase, DataStructure, InputSystem, ParameterValue,
    build_scenarized_data_base, load_scenario_builder, resolve_scenarizations,
};
use gems_study::schema::{InputComponent, InputComponentParameter};

fn scenarizations() -> BTreeMap<String, std::sync::Arc<gems_study::Scenarization>> {
    let rows = load_scenario_builder(&common::data_dir().join("scenario_builder.csv")).unwrap();
    resolve_scenarizations(&rows).unwrap()
}

#[test]
fn years_map_to_scenarios() {
    let groups = scenarizations();
    let load = &groups["load"];
    let scenarios: Vec<usize> = (0..4)
        .map(|year| load.get_scenario_for_year(year).unwrap())
        .collect();
    assert_eq!(scenarios, [0, 1, 0, 1]);
}

#[test]
fn scenarized_series_are_read_through_the_group() {
    let system = InputSystem {
        components: vec![InputComponent {
            id: "D".to_string(),
            model: "basic.demand".to_string(),
            scenario_group: Some("load".to_string()),
            parameters: vec![InputComponentParameter {
                id: "demand".to_string(),
                time_dependent: true,
                scenario_dependent: true,
                value: ParameterValue::Series("load_grid".to_string()),
                scenario_group: None,
            }],
        }],
        ..Default::default()
    };

    let loader = common::study().series_loader();
    let database: DataBase = build_scenarized_data_base(&system, &scenarizations(), &loader).unwrap();
    let demand = ComponentParameterIndex::new("D", "demand");

    assert_eq!(database.get_value(&demand, 0, 2).unwrap(), 100.0);
    assert_eq!(database.get_value(&demand, 1, 3).unwrap(), 210.0);
    assert!(database.get_value(&demand, 0, 4).is_err());
    assert!(matches!(
        database.get_data("D", "demand").unwrap(),
        DataStructure::TimeScenarioSeries { scenarization: Some(_), .. }
    ));
}
