//! Model definitions.
//!
//! A model defines the behaviour of the components referencing it: parameters,
//! variables, constraints, ports and objective contributions. Models are
//! immutable once built; [`Model::replicate`] produces a modified copy that goes
//! through the same validation as the original.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::constraint::Constraint;
use crate::error::{ModelError, ModelResult};
use crate::expression::ExpressionRef;
use crate::parameter::Parameter;
use crate::port::{PortFieldDefinition, PortFieldId, PortType};
use crate::provider::ModelStructureProvider;
use crate::validate;
use crate::variable::Variable;

/// Instance of a port as a model member.
///
/// A model may carry several ports of the same type, for example the two
/// extremities of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPort {
    pub port_type: Arc<PortType>,
    pub port_name: String,
}

impl ModelPort {
    pub fn new(port_type: Arc<PortType>, port_name: impl Into<String>) -> Self {
        Self {
            port_type,
            port_name: port_name.into(),
        }
    }
}

/// A validated, immutable model that components can reference.
#[derive(Debug, Clone)]
pub struct Model {
    id: String,
    parameters: IndexMap<String, Parameter>,
    variables: IndexMap<String, Variable>,
    constraints: IndexMap<String, Constraint>,
    binding_constraints: IndexMap<String, Constraint>,
    objective_operational_contribution: Option<ExpressionRef>,
    objective_investment_contribution: Option<ExpressionRef>,
    ports: IndexMap<String, ModelPort>,
    port_fields_definitions: IndexMap<PortFieldId, PortFieldDefinition>,
    inter_block_dyn: bool,
}

impl Model {
    /// Start building a model with the given id.
    pub fn builder(id: impl Into<String>) -> ModelBuilder {
        ModelBuilder::new(id)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn parameters(&self) -> &IndexMap<String, Parameter> {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }

    pub fn variables(&self) -> &IndexMap<String, Variable> {
        &self.variables
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn constraints(&self) -> &IndexMap<String, Constraint> {
        &self.constraints
    }

    pub fn binding_constraints(&self) -> &IndexMap<String, Constraint> {
        &self.binding_constraints
    }

    /// Binding constraints followed by the model's own constraints.
    pub fn get_all_constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.binding_constraints
            .values()
            .chain(self.constraints.values())
    }

    pub fn objective_operational_contribution(&self) -> Option<&ExpressionRef> {
        self.objective_operational_contribution.as_ref()
    }

    pub fn objective_investment_contribution(&self) -> Option<&ExpressionRef> {
        self.objective_investment_contribution.as_ref()
    }

    pub fn ports(&self) -> &IndexMap<String, ModelPort> {
        &self.ports
    }

    pub fn port(&self, port_name: &str) -> Option<&ModelPort> {
        self.ports.get(port_name)
    }

    pub fn port_fields_definitions(&self) -> &IndexMap<PortFieldId, PortFieldDefinition> {
        &self.port_fields_definitions
    }

    pub fn port_field_definition(&self, id: &PortFieldId) -> Option<&PortFieldDefinition> {
        self.port_fields_definitions.get(id)
    }

    pub fn inter_block_dyn(&self) -> bool {
        self.inter_block_dyn
    }

    /// Structure provider over this model's parameters and variables.
    pub fn structure_provider(&self) -> ModelStructureProvider<'_> {
        ModelStructureProvider::new(&self.id, &self.parameters, &self.variables)
    }

    /// Return a copy of this model with the given fields replaced.
    ///
    /// The copy is rebuilt from scratch, so every construction check runs again.
    pub fn replicate(&self, overrides: ModelOverrides) -> ModelResult<Model> {
        let ModelOverrides {
            id,
            parameters,
            variables,
            constraints,
            binding_constraints,
            objective_operational_contribution,
            objective_investment_contribution,
            ports,
            port_fields_definitions,
            inter_block_dyn,
        } = overrides;

        ModelBuilder {
            id: id.unwrap_or_else(|| self.id.clone()),
            parameters: parameters.unwrap_or_else(|| self.parameters.values().cloned().collect()),
            variables: variables.unwrap_or_else(|| self.variables.values().cloned().collect()),
            constraints: constraints
                .unwrap_or_else(|| self.constraints.values().cloned().collect()),
            binding_constraints: binding_constraints
                .unwrap_or_else(|| self.binding_constraints.values().cloned().collect()),
            objective_operational_contribution: objective_operational_contribution
                .unwrap_or_else(|| self.objective_operational_contribution.clone()),
            objective_investment_contribution: objective_investment_contribution
                .unwrap_or_else(|| self.objective_investment_contribution.clone()),
            ports: ports.unwrap_or_else(|| self.ports.values().cloned().collect()),
            port_fields_definitions: port_fields_definitions
                .unwrap_or_else(|| self.port_fields_definitions.values().cloned().collect()),
            inter_block_dyn: inter_block_dyn.unwrap_or(self.inter_block_dyn),
        }
        .build()
    }
}

/// Fields to replace in [`Model::replicate`]. `None` keeps the original value.
///
/// Objective overrides are doubly optional: `Some(None)` removes the objective.
#[derive(Debug, Clone, Default)]
pub struct ModelOverrides {
    pub id: Option<String>,
    pub parameters: Option<Vec<Parameter>>,
    pub variables: Option<Vec<Variable>>,
    pub constraints: Option<Vec<Constraint>>,
    pub binding_constraints: Option<Vec<Constraint>>,
    pub objective_operational_contribution: Option<Option<ExpressionRef>>,
    pub objective_investment_contribution: Option<Option<ExpressionRef>>,
    pub ports: Option<Vec<ModelPort>>,
    pub port_fields_definitions: Option<Vec<PortFieldDefinition>>,
    pub inter_block_dyn: Option<bool>,
}

/// Builder accepting flat collections of model members.
///
/// Use the member methods to accumulate parameters, variables, constraints and
/// ports, then call `build()` to index and validate them into a `Model`.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    id: String,
    parameters: Vec<Parameter>,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    binding_constraints: Vec<Constraint>,
    objective_operational_contribution: Option<ExpressionRef>,
    objective_investment_contribution: Option<ExpressionRef>,
    ports: Vec<ModelPort>,
    port_fields_definitions: Vec<PortFieldDefinition>,
    inter_block_dyn: bool,
}

impl ModelBuilder {
    /// Create a new empty builder.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn parameters(mut self, parameters: impl IntoIterator<Item = Parameter>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    pub fn variable(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    pub fn variables(mut self, variables: impl IntoIterator<Item = Variable>) -> Self {
        self.variables.extend(variables);
        self
    }

    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn constraints(mut self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        self.constraints.extend(constraints);
        self
    }

    pub fn binding_constraint(mut self, constraint: Constraint) -> Self {
        self.binding_constraints.push(constraint);
        self
    }

    pub fn binding_constraints(mut self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        self.binding_constraints.extend(constraints);
        self
    }

    pub fn objective_operational_contribution(mut self, objective: ExpressionRef) -> Self {
        self.objective_operational_contribution = Some(objective);
        self
    }

    pub fn objective_investment_contribution(mut self, objective: ExpressionRef) -> Self {
        self.objective_investment_contribution = Some(objective);
        self
    }

    pub fn port(mut self, port: ModelPort) -> Self {
        self.ports.push(port);
        self
    }

    pub fn ports(mut self, ports: impl IntoIterator<Item = ModelPort>) -> Self {
        self.ports.extend(ports);
        self
    }

    pub fn port_field_definition(mut self, definition: PortFieldDefinition) -> Self {
        self.port_fields_definitions.push(definition);
        self
    }

    pub fn port_field_definitions(
        mut self,
        definitions: impl IntoIterator<Item = PortFieldDefinition>,
    ) -> Self {
        self.port_fields_definitions.extend(definitions);
        self
    }

    pub fn inter_block_dyn(mut self, inter_block_dyn: bool) -> Self {
        self.inter_block_dyn = inter_block_dyn;
        self
    }

    /// Index the collected members and validate the resulting model.
    pub fn build(self) -> ModelResult<Model> {
        let mut ports = IndexMap::with_capacity(self.ports.len());
        for port in self.ports {
            if ports.contains_key(&port.port_name) {
                return Err(ModelError::PortNameCollision {
                    model: self.id,
                    port: port.port_name,
                });
            }
            ports.insert(port.port_name.clone(), port);
        }

        let model = Model {
            parameters: self
                .parameters
                .into_iter()
                .map(|p| (p.name.clone(), p))
                .collect(),
            variables: self
                .variables
                .into_iter()
                .map(|v| (v.name.clone(), v))
                .collect(),
            constraints: self
                .constraints
                .into_iter()
                .map(|c| (c.name.clone(), c))
                .collect(),
            binding_constraints: self
                .binding_constraints
                .into_iter()
                .map(|c| (c.name.clone(), c))
                .collect(),
            objective_operational_contribution: self.objective_operational_contribution,
            objective_investment_contribution: self.objective_investment_contribution,
            ports,
            port_fields_definitions: self
                .port_fields_definitions
                .into_iter()
                .map(|d| (d.port_field.clone(), d))
                .collect(),
            inter_block_dyn: self.inter_block_dyn,
            id: self.id,
        };

        validate::validate_model(&model)?;
        tracing::trace!(model = model.id(), "model validated");
        Ok(model)
    }
}
