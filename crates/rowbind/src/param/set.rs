use rowbind_core::source::{Command, Parameter};
use rowbind_core::Value;

use std::collections::HashMap;

/// A snapshot of one command shape's parameter metadata: lower-cased
/// parameter name to an owned template parameter.
///
/// Templates are deep copies taken at snapshot time, and every
/// [`set_parameter`] hand-out is a fresh copy again, so no two commands
/// ever share a mutable parameter and the cached templates are never
/// observable through an attached parameter.
///
/// [`set_parameter`]: ParameterSet::set_parameter
#[derive(Debug, Clone, Default)]
pub struct ParameterSet {
    parameters: HashMap<String, Parameter>,
}

impl ParameterSet {
    pub fn from_parameters(parameters: Vec<Parameter>) -> Self {
        let parameters = parameters
            .into_iter()
            .map(|parameter| (parameter.name.to_lowercase(), parameter))
            .collect();
        Self { parameters }
    }

    /// Copies the named template, assigns `value`, and attaches the copy to
    /// `command`. Names are matched case-insensitively; a name with no
    /// template is skipped silently.
    pub fn set_parameter(&self, command: &mut dyn Command, name: &str, value: Value) {
        let Some(template) = self.parameters.get(&name.to_lowercase()) else {
            return;
        };

        let mut parameter = template.clone();
        parameter.value = value;
        command.attach_parameter(parameter);
    }

    /// The template for `name`, if one was captured.
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}
