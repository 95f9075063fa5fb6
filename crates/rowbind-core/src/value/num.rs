use super::Value;
use crate::Error;

macro_rules! try_convert_range {
    ($val:expr, $target_ty:ty) => {
        <$target_ty>::try_from($val)
            .map_err(|_| Error::type_conversion($val.into(), stringify!($target_ty)))
    };
}

macro_rules! conversion_fallback {
    ($value:expr, $target_ty:ty) => {
        Err(Error::type_conversion($value, stringify!($target_ty)))
    };
}

impl TryFrom<Value> for i8 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::I8(val) => Ok(val),
            Value::I16(val) => try_convert_range!(val, i8),
            Value::I32(val) => try_convert_range!(val, i8),
            Value::I64(val) => try_convert_range!(val, i8),
            _ => conversion_fallback!(value, i8),
        }
    }
}

impl TryFrom<Value> for i16 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::I16(val) => Ok(val),
            Value::I8(val) => Ok(val.into()),
            Value::I32(val) => try_convert_range!(val, i16),
            Value::I64(val) => try_convert_range!(val, i16),
            _ => conversion_fallback!(value, i16),
        }
    }
}

impl TryFrom<Value> for i32 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::I32(val) => Ok(val),
            Value::I8(val) => Ok(val.into()),
            Value::I16(val) => Ok(val.into()),
            Value::I64(val) => try_convert_range!(val, i32),
            _ => conversion_fallback!(value, i32),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::I64(val) => Ok(val),
            Value::I8(val) => Ok(val.into()),
            Value::I16(val) => Ok(val.into()),
            Value::I32(val) => Ok(val.into()),
            _ => conversion_fallback!(value, i64),
        }
    }
}

impl TryFrom<Value> for f32 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::F32(val) => Ok(val),
            _ => conversion_fallback!(value, f32),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::F64(val) => Ok(val),
            Value::F32(val) => Ok(val.into()),
            _ => conversion_fallback!(value, f64),
        }
    }
}
