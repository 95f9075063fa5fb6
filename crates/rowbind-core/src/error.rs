mod adhoc;
mod capability;
mod row_access;
mod type_conversion;
mod validation;

use adhoc::AdhocError;
use capability::CapabilityError;
use row_access::RowAccessError;
use std::sync::Arc;
use type_conversion::TypeConversionError;
use validation::ValidationError;

use crate::{Value, ValueType};

/// Returns early with an error built from the given format arguments.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Creates an error from the given format arguments.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur in rowbind.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    Validation(ValidationError),
    Capability(CapabilityError),
    RowAccess(RowAccessError),
    TypeConversion(TypeConversionError),
    Unknown,
}

impl Error {
    #[doc(hidden)]
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Self {
        Self::from(ErrorKind::Adhoc(AdhocError {
            message: args.to_string(),
        }))
    }

    /// A field was mapped whose underlying type has no registry entry.
    pub fn unsupported_field_type(field: &str, ty: ValueType) -> Self {
        Self::from(ErrorKind::Validation(ValidationError::UnsupportedFieldType {
            field: field.to_string(),
            ty,
        }))
    }

    /// A default value was supplied for a binding that forbids absent values.
    pub fn default_requires_nulls(field: &str) -> Self {
        Self::from(ErrorKind::Validation(ValidationError::DefaultRequiresNulls {
            field: field.to_string(),
        }))
    }

    /// A default value's type does not match the field's underlying type.
    pub fn default_type_mismatch(field: &str, expected: ValueType, default: &Value) -> Self {
        Self::from(ErrorKind::Validation(ValidationError::DefaultTypeMismatch {
            field: field.to_string(),
            expected,
            actual: default.ty(),
        }))
    }

    /// The field's type cannot be embedded as a default-value literal.
    pub fn unsupported_default_type(field: &str, ty: ValueType) -> Self {
        Self::from(ErrorKind::Validation(ValidationError::UnsupportedDefaultType {
            field: field.to_string(),
            ty,
        }))
    }

    /// No read primitive is registered for the requested type/mode pair.
    pub fn read_primitive_unavailable(ty: ValueType) -> Self {
        Self::from(ErrorKind::Capability(
            CapabilityError::ReadPrimitiveUnavailable { ty },
        ))
    }

    /// The operation needs a row cursor with the extended capability.
    pub fn extended_capability_required(detail: impl Into<String>) -> Self {
        Self::from(ErrorKind::Capability(
            CapabilityError::ExtendedCapabilityRequired {
                detail: detail.into(),
            },
        ))
    }

    /// The command's concrete type has no parameter-discovery strategy.
    pub fn parameter_discovery_unsupported(command_text: &str) -> Self {
        Self::from(ErrorKind::Capability(
            CapabilityError::ParameterDiscoveryUnsupported {
                command_text: command_text.to_string(),
            },
        ))
    }

    /// A column name could not be resolved to an ordinal.
    pub fn column_not_found(column: &str) -> Self {
        Self::from(ErrorKind::RowAccess(RowAccessError::ColumnNotFound {
            column: column.to_string(),
        }))
    }

    /// A typed read failed for the value at the given ordinal.
    pub fn invalid_column_read(ordinal: usize, detail: impl Into<String>) -> Self {
        Self::from(ErrorKind::RowAccess(RowAccessError::InvalidRead {
            ordinal,
            detail: detail.into(),
        }))
    }

    /// A dynamic value could not be converted to the expected type.
    pub fn type_conversion(value: Value, to_type: &'static str) -> Self {
        Self::from(ErrorKind::TypeConversion(TypeConversionError {
            value,
            to_type,
        }))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), ErrorKind::Validation(_))
    }

    pub fn is_capability(&self) -> bool {
        matches!(self.kind(), ErrorKind::Capability(_))
    }

    pub fn is_row_access(&self) -> bool {
        matches!(self.kind(), ErrorKind::RowAccess(_))
    }

    pub fn is_type_conversion(&self) -> bool {
        matches!(self.kind(), ErrorKind::TypeConversion(_))
    }

    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context
    /// is shown first, ending with the root cause.
    pub fn context(self, consequent: Error) -> Error {
        let mut err = consequent;
        if err.inner.is_none() {
            err = Error::from(ErrorKind::Unknown);
        }
        let inner = err.inner.as_mut().unwrap();
        assert!(
            inner.cause.is_none(),
            "consequent error must not already have a cause"
        );
        Arc::get_mut(inner).unwrap().cause = Some(self);
        err
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            Validation(err) => core::fmt::Display::fmt(err, f),
            Capability(err) => core::fmt::Display::fmt(err, f),
            RowAccess(err) => core::fmt::Display::fmt(err, f),
            TypeConversion(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown rowbind error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}
