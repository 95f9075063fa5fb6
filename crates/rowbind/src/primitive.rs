use rowbind_core::{Result, Value, ValueType};

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use rust_decimal::Decimal;
use uuid::Uuid;

/// A Rust type usable as a destination field value.
///
/// `TYPE` is the underlying (unwrapped) value type; `Option<T>` reports its
/// inner type and flips `NULLABLE`. `load` converts the dynamic value read
/// from a cursor, and `store` converts back for parameter loading.
pub trait Primitive: Sized + Send + Sync + 'static {
    const TYPE: ValueType;
    const NULLABLE: bool = false;

    fn load(value: Value) -> Result<Self>;

    fn store(&self) -> Value;
}

macro_rules! impl_primitive {
    ($ty:ty, $variant:ident) => {
        impl Primitive for $ty {
            const TYPE: ValueType = ValueType::$variant;

            fn load(value: Value) -> Result<Self> {
                value.try_into()
            }

            fn store(&self) -> Value {
                Value::$variant(self.clone())
            }
        }
    };
}

impl_primitive!(bool, Bool);
impl_primitive!(char, Char);
impl_primitive!(i8, I8);
impl_primitive!(i16, I16);
impl_primitive!(i32, I32);
impl_primitive!(i64, I64);
impl_primitive!(f32, F32);
impl_primitive!(f64, F64);
impl_primitive!(Decimal, Decimal);
impl_primitive!(NaiveDateTime, DateTime);
impl_primitive!(Uuid, Uuid);
impl_primitive!(String, String);

impl Primitive for DateTime<FixedOffset> {
    const TYPE: ValueType = ValueType::DateTimeOffset;

    fn load(value: Value) -> Result<Self> {
        value.try_into()
    }

    fn store(&self) -> Value {
        Value::DateTimeOffset(*self)
    }
}

impl<T: Primitive> Primitive for Option<T> {
    const TYPE: ValueType = T::TYPE;
    const NULLABLE: bool = true;

    fn load(value: Value) -> Result<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            T::load(value).map(Some)
        }
    }

    fn store(&self) -> Value {
        match self {
            Some(value) => value.store(),
            None => Value::Null,
        }
    }
}
