//! Resolution of raw system declarations against resolved libraries.

use std::sync::Arc;

use gems_core::ModelRef;
use gems_model::{LibraryMap, Model};
use indexmap::IndexMap;

use crate::error::{StudyError, StudyResult};
use crate::network::{Component, Network, PortRef, PortsConnection};
use crate::schema::{InputComponent, InputPortConnection, InputSystem};

/// Resolved components, nodes and connections of a study.
#[derive(Debug, Clone, Default)]
pub struct System {
    pub components: IndexMap<String, Component>,
    pub nodes: IndexMap<String, Component>,
    pub connections: Vec<PortsConnection>,
}

/// Bind every component and node to its model and validate every connection.
pub fn resolve_system(input: &InputSystem, libraries: &LibraryMap) -> StudyResult<System> {
    let mut system = System::default();
    for c in &input.components {
        let component = resolve_component(c, libraries)?;
        system.components.insert(component.id.clone(), component);
    }
    for n in &input.nodes {
        let node = resolve_component(n, libraries)?;
        system.nodes.insert(node.id.clone(), node);
    }

    for cnx in &input.connections {
        let connection = resolve_connection(cnx, &system)?;
        system.connections.push(connection);
    }

    tracing::info!(
        components = system.components.len(),
        nodes = system.nodes.len(),
        connections = system.connections.len(),
        "system resolved"
    );
    Ok(system)
}

fn resolve_component(input: &InputComponent, libraries: &LibraryMap) -> StudyResult<Component> {
    let reference: ModelRef = input.model.parse()?;
    let model = libraries
        .get(&reference.library)
        .and_then(|lib| lib.model(&reference.model))
        .ok_or_else(|| StudyError::UnknownModel {
            component: input.id.clone(),
            reference: reference.clone(),
        })?;
    tracing::debug!(component = %input.id, model = %reference, "resolved component");
    Ok(Component::new(input.id.clone(), Arc::clone(model)))
}

fn resolve_connection(input: &InputPortConnection, system: &System) -> StudyResult<PortsConnection> {
    let lookup = |id: &str| {
        system
            .components
            .get(id)
            .or_else(|| system.nodes.get(id))
            .cloned()
            .ok_or_else(|| StudyError::UnknownComponent {
                component: id.to_string(),
            })
    };
    let component1 = lookup(&input.component1)?;
    let component2 = lookup(&input.component2)?;
    PortsConnection::new(
        PortRef::new(component1, input.port1.clone()),
        PortRef::new(component2, input.port2.clone()),
    )
}

/// Check that every component uses one of the given models.
pub fn consistency_check(
    components: &IndexMap<String, Component>,
    models: &IndexMap<String, Arc<Model>>,
) -> StudyResult<()> {
    for (id, component) in components {
        if !models.contains_key(component.model.id()) {
            return Err(StudyError::InconsistentModelReference {
                component: id.clone(),
                model: component.model.id().to_string(),
            });
        }
    }
    Ok(())
}

/// Assemble a network from a resolved system: nodes, then components, then
/// connections.
pub fn build_network(system: &System) -> Network {
    let mut network = Network::new("study");
    for node in system.nodes.values() {
        network.add_node(node.clone());
    }
    for component in system.components.values() {
        network.add_component(component.clone());
    }
    for connection in &system.connections {
        network.add_connection(connection.clone());
    }
    network
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{InputComponentParameter, ParameterValue};
    use gems_model::testing::TermParser;
    use gems_model::{parse_yaml_library, resolve_libraries};

    const BASIC: &str = r#"
library:
  id: basic
  port-types:
    - id: flow
      fields:
        - id: flow
  models:
    - id: node
      ports:
        - id: balance_port
          type: flow
    - id: generator
      parameters:
        - id: cost
      variables:
        - id: generation
          lower-bound: 0
      ports:
        - id: balance_port
          type: flow
      port-field-definitions:
        - port: balance_port
          field: flow
          definition: generation
      objective: expec(sum(cost * generation))
"#;

    fn libraries() -> LibraryMap {
        let basic = parse_yaml_library(BASIC.as_bytes()).unwrap();
        resolve_libraries(&[basic], &TermParser).unwrap()
    }

    fn component(id: &str, model: &str) -> InputComponent {
        InputComponent {
            id: id.to_string(),
            model: model.to_string(),
            scenario_group: None,
            parameters: vec![InputComponentParameter {
                id: "cost".to_string(),
                time_dependent: false,
                scenario_dependent: false,
                value: ParameterValue::Number(30.0),
                scenario_group: None,
            }],
        }
    }

    fn connection(c1: &str, c2: &str) -> InputPortConnection {
        InputPortConnection {
            component1: c1.to_string(),
            port1: "balance_port".to_string(),
            component2: c2.to_string(),
            port2: "balance_port".to_string(),
        }
    }

    fn input() -> InputSystem {
        InputSystem {
            nodes: vec![component("N", "basic.node")],
            components: vec![component("G", "basic.generator")],
            connections: vec![connection("N", "G")],
            ..Default::default()
        }
    }

    #[test]
    fn resolve_and_build_network() {
        let libs = libraries();
        let system = resolve_system(&input(), &libs).unwrap();
        assert!(Arc::ptr_eq(
            &system.components["G"].model,
            &libs["basic"].models["generator"]
        ));

        let network = build_network(&system);
        assert_eq!(network.nodes().count(), 1);
        assert_eq!(network.components().count(), 1);
        let cnx = network.get_connection(0).unwrap();
        assert_eq!(cnx.master_port("flow").unwrap().component.id, "G");
    }

    #[test]
    fn unknown_model() {
        let mut input = input();
        input.components[0].model = "basic.battery".to_string();
        let err = resolve_system(&input, &libraries()).unwrap_err();
        assert!(matches!(err, StudyError::UnknownModel { component, .. } if component == "G"));

        input.components[0].model = "other.generator".to_string();
        let err = resolve_system(&input, &libraries()).unwrap_err();
        assert!(matches!(err, StudyError::UnknownModel { .. }));
    }

    #[test]
    fn malformed_model_reference() {
        let mut input = input();
        input.components[0].model = "generator".to_string();
        let err = resolve_system(&input, &libraries()).unwrap_err();
        assert!(matches!(err, StudyError::Core(_)));
    }

    #[test]
    fn unknown_component_in_connection() {
        let mut input = input();
        input.connections.push(connection("N", "X"));
        let err = resolve_system(&input, &libraries()).unwrap_err();
        assert!(matches!(err, StudyError::UnknownComponent { component } if component == "X"));
    }

    #[test]
    fn consistency_against_library_models() {
        let libs = libraries();
        let system = resolve_system(&input(), &libs).unwrap();
        consistency_check(&system.components, &libs["basic"].models).unwrap();

        let mut only_node = libs["basic"].models.clone();
        only_node.shift_remove("generator");
        let err = consistency_check(&system.components, &only_node).unwrap_err();
        assert!(matches!(
            err,
            StudyError::InconsistentModelReference { model, .. } if model == "generator"
        ));
    }
}
