//! Network data model: components bound to models, wired port to port.

use std::sync::Arc;

use gems_model::{Model, ModelPort, PortFieldId, PortType};
use indexmap::IndexMap;

use crate::error::{StudyError, StudyResult};

/// An instance of a model.
#[derive(Debug, Clone)]
pub struct Component {
    pub id: String,
    pub model: Arc<Model>,
}

impl Component {
    pub fn new(id: impl Into<String>, model: Arc<Model>) -> Self {
        Self {
            id: id.into(),
            model,
        }
    }

    pub fn is_variable_in_model(&self, variable_id: &str) -> bool {
        self.model.has_variable(variable_id)
    }
}

/// A component used as a network vertex.
pub type Node = Component;

/// A port of a given component.
#[derive(Debug, Clone)]
pub struct PortRef {
    pub component: Component,
    pub port_id: String,
}

impl PortRef {
    pub fn new(component: Component, port_id: impl Into<String>) -> Self {
        Self {
            component,
            port_id: port_id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    First,
    Second,
}

/// Undirected connection between two ports of the same type.
///
/// Each field of the port type is defined by exactly one of the two ports,
/// its master port.
#[derive(Debug, Clone)]
pub struct PortsConnection {
    port1: PortRef,
    port2: PortRef,
    port_type: Arc<PortType>,
    masters: IndexMap<String, Side>,
}

impl PortsConnection {
    pub fn new(port1: PortRef, port2: PortRef) -> StudyResult<Self> {
        let first = model_port(&port1)?;
        let second = model_port(&port2)?;
        if first.port_type != second.port_type {
            return Err(StudyError::IncompatiblePortTypes {
                first: first.port_type.id.clone(),
                second: second.port_type.id.clone(),
            });
        }

        let mut masters = IndexMap::new();
        for field in first.port_type.fields() {
            let defines = |r: &PortRef| {
                r.component
                    .model
                    .port_field_definition(&PortFieldId::new(r.port_id.as_str(), field))
                    .is_some()
            };
            let side = match (defines(&port1), defines(&port2)) {
                (true, false) => Side::First,
                (false, true) => Side::Second,
                (false, false) => {
                    return Err(StudyError::MissingPortFieldDefinition {
                        port: first.port_name.clone(),
                        field: field.to_string(),
                    });
                }
                (true, true) => {
                    return Err(StudyError::DuplicatePortFieldDefinition {
                        port: first.port_name.clone(),
                        field: field.to_string(),
                    });
                }
            };
            masters.insert(field.to_string(), side);
        }

        let port_type = Arc::clone(&first.port_type);
        Ok(Self {
            port1,
            port2,
            port_type,
            masters,
        })
    }

    pub fn port1(&self) -> &PortRef {
        &self.port1
    }

    pub fn port2(&self) -> &PortRef {
        &self.port2
    }

    pub fn port_type(&self) -> &Arc<PortType> {
        &self.port_type
    }

    /// The port defining `field` on this connection.
    pub fn master_port(&self, field: &str) -> Option<&PortRef> {
        self.masters.get(field).map(|side| match side {
            Side::First => &self.port1,
            Side::Second => &self.port2,
        })
    }
}

fn model_port(r: &PortRef) -> StudyResult<&ModelPort> {
    r.component
        .model
        .port(&r.port_id)
        .ok_or_else(|| StudyError::UnknownComponentPort {
            component: r.component.id.clone(),
            port: r.port_id.clone(),
        })
}

/// Nodes, components and the connections between their ports.
#[derive(Debug, Clone)]
pub struct Network {
    pub id: String,
    nodes: IndexMap<String, Node>,
    components: IndexMap<String, Component>,
    connections: Vec<PortsConnection>,
}

impl Network {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            nodes: IndexMap::new(),
            components: IndexMap::new(),
            connections: Vec::new(),
        }
    }

    pub fn add_node(&mut self, node: Node) {
        self.nodes.insert(node.id.clone(), node);
    }

    pub fn add_component(&mut self, component: Component) {
        self.components.insert(component.id.clone(), component);
    }

    /// Validate and add a connection between two ports.
    pub fn connect(&mut self, port1: PortRef, port2: PortRef) -> StudyResult<()> {
        let connection = PortsConnection::new(port1, port2)?;
        self.connections.push(connection);
        Ok(())
    }

    pub fn add_connection(&mut self, connection: PortsConnection) {
        self.connections.push(connection);
    }

    /// The component, or else the node, with this id.
    pub fn get_component(&self, id: &str) -> Option<&Component> {
        self.components.get(id).or_else(|| self.nodes.get(id))
    }

    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// Nodes followed by components.
    pub fn all_components(&self) -> impl Iterator<Item = &Component> {
        self.nodes.values().chain(self.components.values())
    }

    pub fn connections(&self) -> &[PortsConnection] {
        &self.connections
    }

    pub fn get_connection(&self, idx: usize) -> Option<&PortsConnection> {
        self.connections.get(idx)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.components.is_empty() && self.connections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gems_core::IndexingStructure;
    use gems_model::testing::expr;
    use gems_model::{PortFieldDefinition, Variable};

    fn flow() -> Arc<PortType> {
        Arc::new(PortType::new("flow", ["flow"]))
    }

    fn defining(id: &str, port_type: &Arc<PortType>) -> Arc<Model> {
        Arc::new(
            Model::builder(id)
                .variable(Variable::float("generation", IndexingStructure::TIME_AND_SCENARIO))
                .port(ModelPort::new(Arc::clone(port_type), "balance_port"))
                .port_field_definition(PortFieldDefinition::new(
                    PortFieldId::new("balance_port", "flow"),
                    expr("generation"),
                ))
                .build()
                .unwrap(),
        )
    }

    fn passive(id: &str, port_type: &Arc<PortType>) -> Arc<Model> {
        Arc::new(
            Model::builder(id)
                .port(ModelPort::new(Arc::clone(port_type), "balance_port"))
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn master_port_is_the_defining_side() {
        let flow = flow();
        let node = Component::new("N", passive("node", &flow));
        let generator = Component::new("G", defining("generator", &flow));

        let cnx = PortsConnection::new(
            PortRef::new(node, "balance_port"),
            PortRef::new(generator, "balance_port"),
        )
        .unwrap();
        assert_eq!(cnx.master_port("flow").unwrap().component.id, "G");
        assert!(cnx.master_port("other").is_none());
        assert_eq!(cnx.port_type().id, "flow");
    }

    #[test]
    fn unknown_port() {
        let flow = flow();
        let node = Component::new("N", passive("node", &flow));
        let generator = Component::new("G", defining("generator", &flow));

        let err = PortsConnection::new(
            PortRef::new(node, "missing"),
            PortRef::new(generator, "balance_port"),
        )
        .unwrap_err();
        assert!(matches!(err, StudyError::UnknownComponentPort { port, .. } if port == "missing"));
    }

    #[test]
    fn incompatible_port_types() {
        let node = Component::new("N", passive("node", &flow()));
        let other = Arc::new(PortType::new("heat", ["flow"]));
        let generator = Component::new("G", defining("generator", &other));

        let err = PortsConnection::new(
            PortRef::new(node, "balance_port"),
            PortRef::new(generator, "balance_port"),
        )
        .unwrap_err();
        assert!(matches!(err, StudyError::IncompatiblePortTypes { .. }));
    }

    #[test]
    fn field_definitions_must_be_unique() {
        let flow = flow();
        let a = Component::new("A", passive("node", &flow));
        let b = Component::new("B", passive("node", &flow));
        let err = PortsConnection::new(
            PortRef::new(a, "balance_port"),
            PortRef::new(b, "balance_port"),
        )
        .unwrap_err();
        assert!(matches!(err, StudyError::MissingPortFieldDefinition { .. }));

        let g1 = Component::new("G1", defining("generator", &flow));
        let g2 = Component::new("G2", defining("generator", &flow));
        let err = PortsConnection::new(
            PortRef::new(g1, "balance_port"),
            PortRef::new(g2, "balance_port"),
        )
        .unwrap_err();
        assert!(matches!(err, StudyError::DuplicatePortFieldDefinition { .. }));
    }

    #[test]
    fn network_lookup() {
        let flow = flow();
        let mut network = Network::new("study");
        assert!(network.is_empty());

        let node = Component::new("N", passive("node", &flow));
        let generator = Component::new("G", defining("generator", &flow));
        network.add_node(node.clone());
        network.add_component(generator.clone());
        network
            .connect(
                PortRef::new(node, "balance_port"),
                PortRef::new(generator, "balance_port"),
            )
            .unwrap();

        assert!(!network.is_empty());
        assert_eq!(network.get_component("N").unwrap().id, "N");
        assert!(network.get_node("G").is_none());
        let ids: Vec<&str> = network.all_components().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["N", "G"]);
        assert_eq!(network.connections().len(), 1);
        assert!(network.get_component("G").unwrap().is_variable_in_model("generation"));
    }
}
