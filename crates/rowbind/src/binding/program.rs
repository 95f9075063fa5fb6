use crate::mapping::field_binding::{LoadExtendedFn, LoadFn, StoreFn};
use crate::mapping::MappingDefinition;
use crate::param::ParameterCache;

use indexmap::IndexMap;
use std::sync::Arc;
use uuid::Uuid;

/// The immutable compiled artifact generated from a mapping definition,
/// shared by every binding the definition produces.
///
/// All dispatch decisions (which read primitive, which absence policy,
/// which setter) were baked into the per-field closures at mapping time;
/// generation only assigns ordinal slots and snapshots the field table.
pub(crate) struct Program<T> {
    /// Distinct source columns, in slot order.
    pub(crate) columns: Vec<String>,
    pub(crate) fields: Vec<FieldOp<T>>,
    pub(crate) extended: Vec<ExtendedFieldOp<T>>,
    pub(crate) parameters: Vec<ParameterOp<T>>,
    pub(crate) derive_parameters: bool,
    pub(crate) parameter_cache: Arc<ParameterCache>,
    pub(crate) definition_id: Uuid,
    plan: String,
}

pub(crate) struct FieldOp<T> {
    pub(crate) slot: usize,
    pub(crate) load: LoadFn<T>,
}

pub(crate) struct ExtendedFieldOp<T> {
    pub(crate) slot: usize,
    pub(crate) load: LoadExtendedFn<T>,
}

pub(crate) struct ParameterOp<T> {
    pub(crate) column: String,
    pub(crate) store: StoreFn<T>,
}

impl<T> Program<T> {
    pub(crate) fn generate(definition: &MappingDefinition<T>) -> Self {
        // One slot per distinct source column, first reference wins the slot.
        let mut slots: IndexMap<&str, usize> = IndexMap::new();
        for binding in definition.bindings() {
            let next = slots.len();
            slots.entry(binding.source_column.as_str()).or_insert(next);
        }

        let columns: Vec<String> = slots.keys().map(|column| column.to_string()).collect();

        let mut fields = Vec::new();
        let mut extended = Vec::new();
        let mut parameters = Vec::new();
        let mut plan = format!("binding {}\n", definition.unique_id());

        for binding in definition.bindings() {
            let slot = slots[binding.source_column.as_str()];

            if let Some(load) = &binding.load {
                fields.push(FieldOp {
                    slot,
                    load: load.clone(),
                });
            }

            if let Some(load) = &binding.load_extended {
                extended.push(ExtendedFieldOp {
                    slot,
                    load: load.clone(),
                });
            }

            parameters.push(ParameterOp {
                column: binding.source_column.clone(),
                store: binding.store.clone(),
            });

            plan.push_str(&format!(
                "  {} <- [{}] slot {}{}{}{}\n",
                binding.field_name,
                binding.source_column,
                slot,
                if binding.allows_absent {
                    ", absence allowed"
                } else {
                    ""
                },
                match &binding.default {
                    Some(default) => format!(", default {default:?}"),
                    None => String::new(),
                },
                if binding.extended { ", extended" } else { "" },
            ));
        }

        Self {
            columns,
            fields,
            extended,
            parameters,
            derive_parameters: definition.derive_parameters(),
            parameter_cache: definition.parameter_cache().clone(),
            definition_id: definition.unique_id(),
            plan,
        }
    }

    pub(crate) fn explain(&self) -> &str {
        &self.plan
    }
}
