use super::Parameter;
use crate::{Error, Result, Value};

/// A parameterized command owned by the data-access backend.
///
/// The binding core never executes a command; it only attaches parameters
/// and, for backends that support it, asks the command to discover its own
/// parameter shape. The endpoint identity plus the command text form the
/// parameter-shape cache key.
pub trait Command {
    /// Identity of the target endpoint (e.g. a connection string).
    fn endpoint(&self) -> &str;

    /// The executable command text.
    fn text(&self) -> &str;

    /// The escape marker prepended to synthesized parameter names.
    fn parameter_prefix(&self) -> char {
        '@'
    }

    fn create_parameter(&self, name: &str) -> Parameter {
        Parameter::new(name)
    }

    fn attach_parameter(&mut self, parameter: Parameter);

    /// The live parameter list, in attachment order.
    fn parameters(&self) -> &[Parameter];

    /// Snapshot-and-clear of the live parameter list.
    fn take_parameters(&mut self) -> Vec<Parameter>;

    /// Backend-native parameter discovery, populating the live parameter
    /// list from the command's own metadata.
    ///
    /// Command types without a discovery strategy must fail explicitly;
    /// the default implementation does exactly that.
    fn derive_parameters(&mut self) -> Result<()> {
        Err(Error::parameter_discovery_unsupported(self.text()))
    }
}

/// Synthesizes a parameter carrying `value` and attaches it to `command`.
pub fn attach_value(command: &mut dyn Command, name: &str, value: impl Into<Value>) {
    let mut parameter = command.create_parameter(name);
    parameter.value = value.into();
    command.attach_parameter(parameter);
}

/// As [`attach_value`], mapping a missing value to null.
pub fn attach_value_or_null(command: &mut dyn Command, name: &str, value: Option<Value>) {
    attach_value(command, name, value.unwrap_or(Value::Null));
}
