//! Model validation logic.

use gems_core::IndexingStructure;

use crate::error::{ModelError, ModelResult, ObjectiveKind};
use crate::expression::ExpressionRef;
use crate::model::Model;
use crate::provider::IndexingStructureProvider;

/// Validate every construction-time invariant of a model.
pub(crate) fn validate_model(model: &Model) -> ModelResult<()> {
    let provider = model.structure_provider();

    if let Some(objective) = model.objective_operational_contribution() {
        validate_objective(model.id(), ObjectiveKind::Operational, objective, &provider)?;
    }
    if let Some(objective) = model.objective_investment_contribution() {
        validate_objective(model.id(), ObjectiveKind::Investment, objective, &provider)?;
    }

    validate_port_fields_definitions(model)?;
    validate_bounds(model, &provider)?;

    Ok(())
}

/// Objective contributions must be linear and real-valued.
fn validate_objective(
    model_id: &str,
    objective: ObjectiveKind,
    expression: &ExpressionRef,
    provider: &dyn IndexingStructureProvider,
) -> ModelResult<()> {
    if !expression.degree(provider)?.is_linear() {
        return Err(ModelError::NonLinearObjective {
            model: model_id.to_string(),
            objective,
        });
    }

    let structure = expression.indexing_structure(provider)?;
    if structure != IndexingStructure::CONSTANT {
        return Err(ModelError::NonScalarObjective {
            model: model_id.to_string(),
            objective,
            structure,
        });
    }
    Ok(())
}

/// Each definition must target a declared port and a field of that port's type.
fn validate_port_fields_definitions(model: &Model) -> ModelResult<()> {
    for id in model.port_fields_definitions().keys() {
        let port = model
            .port(&id.port_name)
            .ok_or_else(|| ModelError::UnknownPort {
                model: model.id().to_string(),
                port: id.port_name.clone(),
            })?;
        if !port.port_type.has_field(&id.field_name) {
            return Err(ModelError::UnknownPortField {
                model: model.id().to_string(),
                port: id.port_name.clone(),
                field: id.field_name.clone(),
            });
        }
    }
    Ok(())
}

/// Variable and constraint bounds must not contain variables.
fn validate_bounds(model: &Model, provider: &dyn IndexingStructureProvider) -> ModelResult<()> {
    for variable in model.variables().values() {
        for bound in variable.bounds() {
            if !bound.degree(provider)?.is_constant() {
                return Err(ModelError::NonConstantBound {
                    model: model.id().to_string(),
                    owner: format!("variable '{}'", variable.name),
                });
            }
        }
    }

    for constraint in model.get_all_constraints() {
        for bound in constraint.bounds() {
            if !bound.degree(provider)?.is_constant() {
                return Err(ModelError::NonConstantBound {
                    model: model.id().to_string(),
                    owner: format!("constraint '{}'", constraint.name),
                });
            }
        }
    }
    Ok(())
}
