//! Library resolution: merge inter-dependent library declarations.
//!
//! Libraries form a directed graph where an edge goes from a dependency to the
//! library importing it. A topological sort of that graph gives an order in
//! which every library is resolved after all of its dependencies; a cycle is
//! reported as [`LibraryError::CircularLibraryImport`]. Libraries are inserted
//! into the graph sorted by id so that the declaration order of the input has
//! no influence on the result.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use gems_core::IndexingStructure;
use indexmap::IndexMap;
use indexmap::map::Entry;
use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};

use crate::common::ValueType;
use crate::constraint::Constraint;
use crate::error::{LibraryError, LibraryResult};
use crate::expression::{ExpressionParser, ExpressionRef};
use crate::library::{Library, LibraryMap};
use crate::model::{Model, ModelPort};
use crate::parameter::Parameter;
use crate::port::{PortFieldDefinition, PortFieldId, PortType};
use crate::schema::{InputConstraint, InputLibrary, InputModel};
use crate::variable::Variable;

/// Resolve raw library declarations into libraries keyed by id.
///
/// Fails on duplicate library ids, unknown dependencies, import cycles, model
/// or port type redefinitions, and any model that does not validate.
pub fn resolve_libraries(
    inputs: &[InputLibrary],
    parser: &dyn ExpressionParser,
) -> LibraryResult<LibraryMap> {
    let order = resolution_order(inputs)?;

    let mut resolved = LibraryMap::new();
    for input in order {
        let library = resolve_library(input, &resolved, parser)?;
        tracing::debug!(
            library = %library.id,
            models = library.models.len(),
            port_types = library.port_types.len(),
            "resolved library"
        );
        resolved.insert(library.id.clone(), library);
    }

    tracing::info!(libraries = resolved.len(), "library resolution complete");
    Ok(resolved)
}

/// Order declarations so that every library comes after its dependencies.
fn resolution_order(inputs: &[InputLibrary]) -> LibraryResult<Vec<&InputLibrary>> {
    let mut sorted: Vec<&InputLibrary> = inputs.iter().collect();
    sorted.sort_by(|a, b| a.id.cmp(&b.id));

    let mut graph: DiGraph<&InputLibrary, ()> = DiGraph::with_capacity(sorted.len(), 0);
    let mut index: HashMap<&str, NodeIndex> = HashMap::with_capacity(sorted.len());
    for lib in &sorted {
        if index.insert(lib.id.as_str(), graph.add_node(*lib)).is_some() {
            return Err(LibraryError::DuplicateLibrary {
                library: lib.id.clone(),
            });
        }
    }

    for lib in &sorted {
        let target = index[lib.id.as_str()];
        for dependency in &lib.dependencies {
            let source = *index.get(dependency.as_str()).ok_or_else(|| {
                LibraryError::UnknownLibrary {
                    library: lib.id.clone(),
                    dependency: dependency.clone(),
                }
            })?;
            graph.update_edge(source, target, ());
        }
    }

    match toposort(&graph, None) {
        Ok(order) => Ok(order.into_iter().map(|n| graph[n]).collect()),
        Err(cycle) => {
            let culprit = cycle.node_id();
            let mut members: Vec<String> = tarjan_scc(&graph)
                .into_iter()
                .find(|scc| scc.contains(&culprit))
                .unwrap_or_else(|| vec![culprit])
                .into_iter()
                .map(|n| graph[n].id.clone())
                .collect();
            members.sort();
            Err(LibraryError::CircularLibraryImport { cycle: members })
        }
    }
}

/// Resolve a single library whose dependencies are already in `resolved`.
fn resolve_library(
    input: &InputLibrary,
    resolved: &LibraryMap,
    parser: &dyn ExpressionParser,
) -> LibraryResult<Library> {
    let port_types = merge_port_types(input, resolved)?;

    let mut models: IndexMap<String, Arc<Model>> = IndexMap::with_capacity(input.models.len());
    for input_model in &input.models {
        if models.contains_key(&input_model.id) {
            return Err(LibraryError::ModelRedefinition {
                library: input.id.clone(),
                model: input_model.id.clone(),
            });
        }
        let model = resolve_model(&input.id, input_model, &port_types, parser)?;
        models.insert(input_model.id.clone(), Arc::new(model));
    }

    Ok(Library {
        id: input.id.clone(),
        dependencies: input.dependencies.clone(),
        port_types,
        models,
    })
}

/// Imported port types followed by the library's own declarations.
///
/// The same port type reached through several dependencies is imported once;
/// two distinct declarations sharing an id are a redefinition.
fn merge_port_types(
    input: &InputLibrary,
    resolved: &LibraryMap,
) -> LibraryResult<IndexMap<String, Arc<PortType>>> {
    let mut port_types: IndexMap<String, Arc<PortType>> = IndexMap::new();
    let mut redefined = BTreeSet::new();

    let mut dependencies: Vec<&String> = input.dependencies.iter().collect();
    dependencies.sort();
    dependencies.dedup();
    let imported = dependencies
        .into_iter()
        .filter_map(|dep| resolved.get(dep.as_str()))
        .flat_map(|lib| lib.port_types.values().cloned());
    let declared = input.port_types.iter().map(|p| {
        Arc::new(PortType::new(
            p.id.clone(),
            p.fields.iter().map(|f| f.id.clone()),
        ))
    });

    for port_type in imported.chain(declared) {
        match port_types.entry(port_type.id.clone()) {
            Entry::Occupied(existing) => {
                if !Arc::ptr_eq(existing.get(), &port_type) {
                    redefined.insert(port_type.id.clone());
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(port_type);
            }
        }
    }

    if !redefined.is_empty() {
        return Err(LibraryError::PortRedefinition {
            library: input.id.clone(),
            ports: redefined.into_iter().collect(),
        });
    }
    Ok(port_types)
}

fn resolve_model(
    library_id: &str,
    input: &InputModel,
    port_types: &IndexMap<String, Arc<PortType>>,
    parser: &dyn ExpressionParser,
) -> LibraryResult<Model> {
    let parse = |text: &str| -> LibraryResult<ExpressionRef> {
        parser.parse(text).map_err(|message| LibraryError::Expression {
            library: library_id.to_string(),
            model: input.id.clone(),
            text: text.to_string(),
            message,
        })
    };
    let parse_opt = |text: Option<&String>| text.map(|t| parse(t)).transpose();

    let parameters = input.parameters.iter().map(|p| {
        Parameter::float(
            p.id.clone(),
            IndexingStructure::new(p.time_dependent, p.scenario_dependent),
        )
    });

    let mut variables = Vec::with_capacity(input.variables.len());
    for v in &input.variables {
        let mut variable = Variable::new(
            v.id.clone(),
            ValueType::from(v.variable_type),
            IndexingStructure::new(v.time_dependent, v.scenario_dependent),
        );
        variable.lower_bound = parse_opt(v.lower_bound.as_ref())?;
        variable.upper_bound = parse_opt(v.upper_bound.as_ref())?;
        variables.push(variable);
    }

    let mut ports = Vec::with_capacity(input.ports.len());
    for p in &input.ports {
        let port_type = port_types
            .get(&p.port_type)
            .ok_or_else(|| LibraryError::UnknownPortType {
                library: library_id.to_string(),
                model: input.id.clone(),
                port_type: p.port_type.clone(),
            })?;
        ports.push(ModelPort::new(Arc::clone(port_type), p.id.clone()));
    }

    let mut definitions = Vec::with_capacity(input.port_field_definitions.len());
    for d in &input.port_field_definitions {
        definitions.push(PortFieldDefinition::new(
            PortFieldId::new(d.port.clone(), d.field.clone()),
            parse(&d.definition)?,
        ));
    }

    let convert_constraint = |c: &InputConstraint| -> LibraryResult<Constraint> {
        let mut constraint = Constraint::new(c.id.clone(), parse(&c.expression)?);
        constraint.lower_bound = parse_opt(c.lower_bound.as_ref())?;
        constraint.upper_bound = parse_opt(c.upper_bound.as_ref())?;
        Ok(constraint)
    };
    let constraints = input
        .constraints
        .iter()
        .map(convert_constraint)
        .collect::<LibraryResult<Vec<_>>>()?;
    let binding_constraints = input
        .binding_constraints
        .iter()
        .map(convert_constraint)
        .collect::<LibraryResult<Vec<_>>>()?;

    let mut builder = Model::builder(input.id.clone())
        .parameters(parameters)
        .variables(variables)
        .constraints(constraints)
        .binding_constraints(binding_constraints)
        .ports(ports)
        .port_field_definitions(definitions)
        .inter_block_dyn(input.inter_block_dyn);
    if let Some(objective) = &input.objective {
        builder = builder.objective_operational_contribution(parse(objective)?);
    }
    if let Some(objective) = &input.investment_objective {
        builder = builder.objective_investment_contribution(parse(objective)?);
    }

    builder.build().map_err(|source| LibraryError::Model {
        library: library_id.to_string(),
        source,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::testing::TermParser;
    use proptest::prelude::*;

    fn chain() -> Vec<InputLibrary> {
        (0..5)
            .map(|i| InputLibrary {
                id: format!("lib{i}"),
                dependencies: if i == 0 { vec![] } else { vec![format!("lib{}", i - 1)] },
                port_types: vec![],
                models: vec![],
                description: None,
            })
            .collect()
    }

    proptest! {
        #[test]
        fn declaration_order_does_not_matter(inputs in Just(chain()).prop_shuffle()) {
            let libs = resolve_libraries(&inputs, &TermParser).unwrap();
            let ids: Vec<&str> = libs.keys().map(String::as_str).collect();
            prop_assert_eq!(ids, vec!["lib0", "lib1", "lib2", "lib3", "lib4"]);
        }

        #[test]
        fn closing_the_chain_is_always_circular(inputs in Just(chain()).prop_shuffle()) {
            let mut inputs = inputs;
            for lib in inputs.iter_mut().filter(|l| l.id == "lib0") {
                lib.dependencies.push("lib4".to_string());
            }
            let err = resolve_libraries(&inputs, &TermParser).unwrap_err();
            let is_full_cycle = matches!(
                err,
                LibraryError::CircularLibraryImport { ref cycle } if cycle.len() == 5
            );
            prop_assert!(is_full_cycle);
        }
    }
}
