use super::ParameterSet;
use rowbind_core::source::Command;
use rowbind_core::Result;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Shared cache of discovered parameter shapes, keyed by command identity
/// (target endpoint plus command text).
///
/// The cache is an explicitly constructed service: a composition root
/// creates one and shares it across mapping definitions via
/// `MappingDefinition::with_parameter_cache`. Concurrent lookups and
/// inserts across distinct keys do not interfere; two callers racing to
/// derive the same new key both produce equivalent shapes and the last
/// write wins.
#[derive(Debug, Default)]
pub struct ParameterCache {
    shapes: RwLock<HashMap<String, Arc<ParameterSet>>>,
}

impl ParameterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached shape for `command`, deriving it on first sight.
    ///
    /// A miss invokes the command's native parameter discovery (a
    /// capability error for command types without one) and then snapshots
    /// the discovered parameters via [`add_parameters_to_cache`].
    ///
    /// [`add_parameters_to_cache`]: ParameterCache::add_parameters_to_cache
    pub fn derive_parameters(&self, command: &mut dyn Command) -> Result<Arc<ParameterSet>> {
        let key = shape_key(command);

        if let Some(shape) = self.shapes.read().unwrap().get(&key) {
            return Ok(shape.clone());
        }

        command.derive_parameters()?;

        Ok(self.insert(key, command))
    }

    /// Snapshots whatever parameters are currently attached to `command`,
    /// clearing its live parameter list as a side effect. The command is
    /// expected to be a throwaway template instance.
    pub fn add_parameters_to_cache(&self, command: &mut dyn Command) -> Arc<ParameterSet> {
        let key = shape_key(command);
        self.insert(key, command)
    }

    pub fn clear(&self) {
        self.shapes.write().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.shapes.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.read().unwrap().is_empty()
    }

    fn insert(&self, key: String, command: &mut dyn Command) -> Arc<ParameterSet> {
        let shape = Arc::new(ParameterSet::from_parameters(command.take_parameters()));
        self.shapes.write().unwrap().insert(key, shape.clone());
        shape
    }
}

fn shape_key(command: &dyn Command) -> String {
    format!("{}:{}", command.endpoint(), command.text())
}
