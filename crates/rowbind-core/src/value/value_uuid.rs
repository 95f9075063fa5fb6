use uuid::Uuid;

use super::Value;
use crate::Error;

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl TryFrom<Value> for Uuid {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Uuid(value) => Ok(value),
            _ => Err(Error::type_conversion(value, "Uuid")),
        }
    }
}
