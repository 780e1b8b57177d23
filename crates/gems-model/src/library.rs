//! Resolved libraries.

use std::collections::BTreeMap;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::model::Model;
use crate::port::PortType;

/// Resolved libraries keyed by library id.
pub type LibraryMap = BTreeMap<String, Library>;

/// A named collection of models and port types.
///
/// `models` holds the models declared by this library only. `port_types` also
/// holds the port types visible through dependencies; those are shared with
/// (and still belong to) the library that declared them.
#[derive(Debug, Clone)]
pub struct Library {
    pub id: String,
    pub dependencies: Vec<String>,
    pub port_types: IndexMap<String, Arc<PortType>>,
    pub models: IndexMap<String, Arc<Model>>,
}

impl Library {
    pub fn new<P, M>(id: impl Into<String>, port_types: P, models: M) -> Self
    where
        P: IntoIterator<Item = PortType>,
        M: IntoIterator<Item = Model>,
    {
        Self {
            id: id.into(),
            dependencies: Vec::new(),
            port_types: port_types
                .into_iter()
                .map(|p| (p.id.clone(), Arc::new(p)))
                .collect(),
            models: models
                .into_iter()
                .map(|m| (m.id().to_string(), Arc::new(m)))
                .collect(),
        }
    }

    pub fn model(&self, id: &str) -> Option<&Arc<Model>> {
        self.models.get(id)
    }

    pub fn port_type(&self, id: &str) -> Option<&Arc<PortType>> {
        self.port_types.get(id)
    }
}
