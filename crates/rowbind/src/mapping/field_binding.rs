use crate::field::Field;
use crate::primitive::Primitive;

use rowbind_core::source::{ExtendedRowCursor, RowCursor};
use rowbind_core::{registry, Result, Value};
use std::sync::Arc;

pub(crate) type LoadFn<T> = Arc<dyn Fn(&mut T, &dyn RowCursor, usize) -> Result<()> + Send + Sync>;
pub(crate) type LoadExtendedFn<T> =
    Arc<dyn Fn(&mut T, &dyn ExtendedRowCursor, usize) -> Result<()> + Send + Sync>;
pub(crate) type StoreFn<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;

/// One row-to-field binding: the declarative attributes plus the
/// registry-selected load/store closures, fixed at mapping time.
///
/// Selecting the read primitive here (rather than during row loading) is
/// what makes capability failures construction-time failures.
pub(crate) struct FieldBinding<T> {
    pub(crate) field_name: &'static str,
    pub(crate) source_column: String,
    pub(crate) allows_absent: bool,
    pub(crate) default: Option<Value>,
    pub(crate) extended: bool,
    pub(crate) load: Option<LoadFn<T>>,
    pub(crate) load_extended: Option<LoadExtendedFn<T>>,
    pub(crate) store: StoreFn<T>,
}

impl<T> FieldBinding<T> {
    pub(crate) fn build<V: Primitive>(
        field: Field<T, V>,
        source_column: Option<&str>,
        allows_absent: bool,
        default: Option<Value>,
    ) -> Result<Self>
    where
        T: 'static,
    {
        let field_name = field.name();
        let source_column = source_column.unwrap_or(field_name).to_string();
        let extended = registry::requires_extended(V::TYPE);

        let get = field.get;
        let set = field.set;
        let store: StoreFn<T> = Arc::new(move |model| get(model).store());

        let mut binding = Self {
            field_name,
            source_column,
            allows_absent,
            default,
            extended,
            load: None,
            load_extended: None,
            store,
        };

        if extended {
            let primitive = registry::extended_primitive_for(
                V::TYPE,
                allows_absent,
                binding.default.is_some(),
            )?;
            let fallback = binding.default.clone();
            binding.load_extended = Some(Arc::new(move |model, cursor, ordinal| {
                let value = primitive.read(cursor, ordinal, fallback.as_ref())?;
                set(model, V::load(value)?);
                Ok(())
            }));
        } else {
            let primitive =
                registry::primitive_for(V::TYPE, allows_absent, binding.default.is_some())?;
            let fallback = binding.default.clone();
            binding.load = Some(Arc::new(move |model, cursor, ordinal| {
                let value = primitive.read(cursor, ordinal, fallback.as_ref())?;
                set(model, V::load(value)?);
                Ok(())
            }));
        }

        Ok(binding)
    }

    /// Binding with a source-to-destination conversion function: the value
    /// is read through the source type's primitive, then converted. Absent
    /// values bypass the converter and go through the destination's own
    /// null handling.
    pub(crate) fn build_converted<S, V, F>(
        field: Field<T, V>,
        source_column: &str,
        allows_absent: bool,
        convert: F,
    ) -> Result<Self>
    where
        T: 'static,
        S: Primitive,
        V: Primitive,
        F: Fn(S) -> V + Send + Sync + 'static,
    {
        let field_name = field.name();

        let get = field.get;
        let set = field.set;
        let store: StoreFn<T> = Arc::new(move |model| get(model).store());

        let primitive = registry::primitive_for(S::TYPE, allows_absent, false)?;
        let load: LoadFn<T> = Arc::new(move |model, cursor, ordinal| {
            let value = primitive.read(cursor, ordinal, None)?;
            if value.is_null() {
                set(model, V::load(Value::Null)?);
            } else {
                set(model, convert(S::load(value)?));
            }
            Ok(())
        });

        Ok(Self {
            field_name,
            source_column: source_column.to_string(),
            allows_absent,
            default: None,
            extended: false,
            load: Some(load),
            load_extended: None,
            store,
        })
    }
}
