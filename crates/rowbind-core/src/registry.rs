//! The type-capability registry: which value types are bindable, and which
//! read primitive serves each combination of type, nullability, and
//! default-value handling.
//!
//! Primitive selection happens once, at binding-construction time, so a
//! type/mode combination with no entry fails fast instead of surfacing in
//! the middle of a row loop. Per-row work after selection is one typed
//! cursor call plus at most one absence check.

use crate::source::{ExtendedRowCursor, RowCursor};
use crate::{Error, Result, Value, ValueType};

type ReadValue = fn(&dyn RowCursor, usize) -> Result<Value>;
type ReadExtendedValue = fn(&dyn ExtendedRowCursor, usize) -> Result<Value>;

/// How a selected primitive treats an absent source value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AbsencePolicy {
    /// Direct read; absence surfaces the cursor's own error.
    Require,

    /// Absence yields `Value::Null`.
    Optional,

    /// Absence yields the supplied fallback value.
    Fallback,
}

/// A registry-selected read operation over a plain row cursor.
#[derive(Debug, Clone, Copy)]
pub struct ReadPrimitive {
    read: ReadValue,
    policy: AbsencePolicy,
}

impl ReadPrimitive {
    /// Reads the value at `ordinal`, applying the absence policy selected
    /// at registry-lookup time. `default` is only consulted under the
    /// fallback policy; a present value always wins over it.
    pub fn read(
        &self,
        cursor: &dyn RowCursor,
        ordinal: usize,
        default: Option<&Value>,
    ) -> Result<Value> {
        match self.policy {
            AbsencePolicy::Require => (self.read)(cursor, ordinal),
            AbsencePolicy::Optional => {
                if cursor.is_absent(ordinal) {
                    Ok(Value::Null)
                } else {
                    (self.read)(cursor, ordinal)
                }
            }
            AbsencePolicy::Fallback => {
                if cursor.is_absent(ordinal) {
                    Ok(default.cloned().unwrap_or(Value::Null))
                } else {
                    (self.read)(cursor, ordinal)
                }
            }
        }
    }
}

/// A registry-selected read operation requiring the extended cursor.
#[derive(Debug, Clone, Copy)]
pub struct ExtendedReadPrimitive {
    read: ReadExtendedValue,
    policy: AbsencePolicy,
}

impl ExtendedReadPrimitive {
    pub fn read(
        &self,
        cursor: &dyn ExtendedRowCursor,
        ordinal: usize,
        default: Option<&Value>,
    ) -> Result<Value> {
        match self.policy {
            AbsencePolicy::Require => (self.read)(cursor, ordinal),
            AbsencePolicy::Optional => {
                if cursor.is_absent(ordinal) {
                    Ok(Value::Null)
                } else {
                    (self.read)(cursor, ordinal)
                }
            }
            AbsencePolicy::Fallback => {
                if cursor.is_absent(ordinal) {
                    Ok(default.cloned().unwrap_or(Value::Null))
                } else {
                    (self.read)(cursor, ordinal)
                }
            }
        }
    }
}

/// True iff `ty` has plain and nullable read families on [`RowCursor`].
pub fn is_supported(ty: ValueType) -> bool {
    column_read(ty).is_some()
}

/// True for types readable only through the extended cursor.
pub fn requires_extended(ty: ValueType) -> bool {
    matches!(ty, ValueType::DateTimeOffset)
}

/// The subset of types embeddable as default-value literals.
///
/// Decimal, date-time, and unique-identifier types are intentionally
/// excluded; validation rejects defaults of these types outright.
pub fn supports_literal(ty: ValueType) -> bool {
    matches!(
        ty,
        ValueType::Bool
            | ValueType::Char
            | ValueType::I8
            | ValueType::I16
            | ValueType::I32
            | ValueType::I64
            | ValueType::F32
            | ValueType::F64
            | ValueType::String
    )
}

/// Selects the read primitive for `ty` under the given nullability and
/// default-handling mode. Fails with a capability error when `ty` has no
/// plain-cursor entry.
pub fn primitive_for(ty: ValueType, allows_absent: bool, has_default: bool) -> Result<ReadPrimitive> {
    if requires_extended(ty) {
        return Err(Error::extended_capability_required(format!(
            "type [{ty}] is only readable through an extended row cursor"
        )));
    }

    let read = column_read(ty).ok_or_else(|| Error::read_primitive_unavailable(ty))?;

    Ok(ReadPrimitive {
        read,
        policy: policy_for(allows_absent, has_default),
    })
}

/// As [`primitive_for`], for the extended read family.
pub fn extended_primitive_for(
    ty: ValueType,
    allows_absent: bool,
    has_default: bool,
) -> Result<ExtendedReadPrimitive> {
    let read: ReadExtendedValue = match ty {
        ValueType::DateTimeOffset => {
            |cursor, ordinal| cursor.get_date_time_offset(ordinal).map(Value::DateTimeOffset)
        }
        _ => return Err(Error::read_primitive_unavailable(ty)),
    };

    Ok(ExtendedReadPrimitive {
        read,
        policy: policy_for(allows_absent, has_default),
    })
}

fn policy_for(allows_absent: bool, has_default: bool) -> AbsencePolicy {
    if !allows_absent {
        AbsencePolicy::Require
    } else if has_default {
        AbsencePolicy::Fallback
    } else {
        AbsencePolicy::Optional
    }
}

fn column_read(ty: ValueType) -> Option<ReadValue> {
    let read: ReadValue = match ty {
        ValueType::Bool => |cursor, ordinal| cursor.get_bool(ordinal).map(Value::Bool),
        ValueType::Char => |cursor, ordinal| cursor.get_char(ordinal).map(Value::Char),
        ValueType::I8 => |cursor, ordinal| cursor.get_i8(ordinal).map(Value::I8),
        ValueType::I16 => |cursor, ordinal| cursor.get_i16(ordinal).map(Value::I16),
        ValueType::I32 => |cursor, ordinal| cursor.get_i32(ordinal).map(Value::I32),
        ValueType::I64 => |cursor, ordinal| cursor.get_i64(ordinal).map(Value::I64),
        ValueType::F32 => |cursor, ordinal| cursor.get_f32(ordinal).map(Value::F32),
        ValueType::F64 => |cursor, ordinal| cursor.get_f64(ordinal).map(Value::F64),
        ValueType::Decimal => |cursor, ordinal| cursor.get_decimal(ordinal).map(Value::Decimal),
        ValueType::DateTime => {
            |cursor, ordinal| cursor.get_date_time(ordinal).map(Value::DateTime)
        }
        ValueType::Uuid => |cursor, ordinal| cursor.get_uuid(ordinal).map(Value::Uuid),
        ValueType::String => |cursor, ordinal| cursor.get_string(ordinal).map(Value::String),
        ValueType::DateTimeOffset => return None,
    };
    Some(read)
}
