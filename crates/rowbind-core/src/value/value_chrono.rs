use chrono::{DateTime, FixedOffset, NaiveDateTime};

use super::Value;
use crate::Error;

macro_rules! impl_chrono_conversions {
    ($chrono:ty, $variant:ident, $lit:literal) => {
        impl From<$chrono> for Value {
            fn from(value: $chrono) -> Self {
                Self::$variant(value)
            }
        }

        impl TryFrom<Value> for $chrono {
            type Error = Error;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                match value {
                    Value::$variant(value) => Ok(value),
                    _ => Err(Error::type_conversion(value, $lit)),
                }
            }
        }
    };
}

impl_chrono_conversions!(NaiveDateTime, DateTime, "NaiveDateTime");
impl_chrono_conversions!(DateTime<FixedOffset>, DateTimeOffset, "DateTime<FixedOffset>");
