mod error;
pub use error::Error;

pub mod registry;

pub mod source;

pub mod value;
pub use value::{Value, ValueType};

/// A Result type alias that uses rowbind's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
