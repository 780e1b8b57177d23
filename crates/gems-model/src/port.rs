//! Port types and port field definitions.

use indexmap::IndexSet;

use crate::expression::ExpressionRef;

/// Schema of a port: an id and an ordered set of field names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortType {
    pub id: String,
    fields: IndexSet<String>,
}

impl PortType {
    pub fn new<I, S>(id: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Field names in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains(name)
    }
}

/// Identifies one field of one port of a model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortFieldId {
    pub port_name: String,
    pub field_name: String,
}

impl PortFieldId {
    pub fn new(port_name: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            port_name: port_name.into(),
            field_name: field_name.into(),
        }
    }
}

/// Definition of a port field value as an expression of the model members.
#[derive(Debug, Clone)]
pub struct PortFieldDefinition {
    pub port_field: PortFieldId,
    pub definition: ExpressionRef,
}

impl PortFieldDefinition {
    pub fn new(port_field: PortFieldId, definition: ExpressionRef) -> Self {
        Self {
            port_field,
            definition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_keep_declaration_order() {
        let port = PortType::new("balance", ["flow", "price"]);
        assert_eq!(port.fields().collect::<Vec<_>>(), ["flow", "price"]);
        assert!(port.has_field("price"));
        assert!(!port.has_field("emission"));
    }

    #[test]
    fn duplicated_fields_collapse() {
        let port = PortType::new("balance", ["flow", "flow"]);
        assert_eq!(port.fields().count(), 1);
    }
}
