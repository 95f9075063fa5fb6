use crate::{Value, ValueType};

/// A command parameter, modeled as a plain owned value record.
///
/// Cloning is structural and deep: a clone never shares mutable state with
/// the original, which is what lets cached parameter shapes hand out
/// independent copies.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: Value,
    pub ty: Option<ValueType>,
    pub size: Option<u32>,
    pub direction: ParameterDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterDirection {
    #[default]
    Input,
    Output,
    InputOutput,
    ReturnValue,
}

impl Parameter {
    /// A fresh input parameter with a null value.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Value::Null,
            ty: None,
            size: None,
            direction: ParameterDirection::Input,
        }
    }

    pub fn with_value(name: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut parameter = Self::new(name);
        parameter.value = value.into();
        parameter
    }
}
