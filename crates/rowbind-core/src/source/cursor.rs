use crate::Result;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use rust_decimal::Decimal;
use uuid::Uuid;

/// A positioned accessor over one data record.
///
/// Gives name-to-position resolution, an absence check, and one typed read
/// per supported value type. Read failures (a value that cannot be coerced
/// to the requested type) surface as row-access errors and are propagated
/// unmodified by the binding core.
pub trait RowCursor {
    /// Resolves a column name to its position within this cursor's layout.
    fn ordinal(&self, column: &str) -> Result<usize>;

    /// Whether the value at `ordinal` is absent for the current row.
    fn is_absent(&self, ordinal: usize) -> bool;

    fn get_bool(&self, ordinal: usize) -> Result<bool>;

    fn get_char(&self, ordinal: usize) -> Result<char>;

    fn get_i8(&self, ordinal: usize) -> Result<i8>;

    fn get_i16(&self, ordinal: usize) -> Result<i16>;

    fn get_i32(&self, ordinal: usize) -> Result<i32>;

    fn get_i64(&self, ordinal: usize) -> Result<i64>;

    fn get_f32(&self, ordinal: usize) -> Result<f32>;

    fn get_f64(&self, ordinal: usize) -> Result<f64>;

    fn get_decimal(&self, ordinal: usize) -> Result<Decimal>;

    fn get_date_time(&self, ordinal: usize) -> Result<NaiveDateTime>;

    fn get_uuid(&self, ordinal: usize) -> Result<Uuid>;

    fn get_string(&self, ordinal: usize) -> Result<String>;
}

/// A row cursor with the extended capability: offset-aware temporal reads.
///
/// Only certain backend-specific cursor variants carry this; bindings with
/// offset-aware date-time fields can only be driven through it.
pub trait ExtendedRowCursor: RowCursor {
    fn get_date_time_offset(&self, ordinal: usize) -> Result<DateTime<FixedOffset>>;
}
