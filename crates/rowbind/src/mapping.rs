pub(crate) mod field_binding;
pub(crate) use field_binding::FieldBinding;

use crate::binding::{CompiledBinding, Program};
use crate::field::Field;
use crate::param::ParameterCache;
use crate::primitive::Primitive;

use indexmap::IndexMap;
use rowbind_core::{registry, Error, Result, Value};
use std::sync::{Arc, OnceLock};
use uuid::Uuid;

/// Implemented by types whose named fields can all be bound automatically;
/// usually generated with `#[derive(Bindable)]`.
pub trait Bindable: Sized {
    fn bind(definition: &mut MappingDefinition<Self>) -> Result<()>;
}

/// Declarative mapping spec for one destination type `T`.
///
/// Field-mapping calls accumulate bindings (keyed by destination field,
/// last write wins) until the first [`produce_binding`] call generates the
/// compiled program — exactly once per definition instance, including under
/// concurrent first access. Mapping calls made after that point mutate only
/// the declarative table; bindings already produced are never retroactively
/// changed.
///
/// [`produce_binding`]: MappingDefinition::produce_binding
pub struct MappingDefinition<T> {
    fields: IndexMap<&'static str, FieldBinding<T>>,
    derive_parameters: bool,
    parameter_cache: Arc<ParameterCache>,
    unique_id: Uuid,
    program: OnceLock<Arc<Program<T>>>,
}

impl<T> Default for MappingDefinition<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for MappingDefinition<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingDefinition")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("derive_parameters", &self.derive_parameters)
            .field("unique_id", &self.unique_id)
            .field("produced", &self.program.get().is_some())
            .finish()
    }
}

impl<T> MappingDefinition<T> {
    pub fn new() -> Self {
        Self::with_derive_parameters(true)
    }

    /// `derive_parameters` controls parameter loading: when set, parameter
    /// shapes are discovered from the target command and cached; when
    /// cleared, parameters are synthesized blindly.
    pub fn with_derive_parameters(derive_parameters: bool) -> Self {
        Self {
            fields: IndexMap::new(),
            derive_parameters,
            parameter_cache: Arc::new(ParameterCache::new()),
            unique_id: Uuid::new_v4(),
            program: OnceLock::new(),
        }
    }

    /// Shares a parameter-shape cache owned by the composition root.
    /// Without this, the definition owns a private cache.
    pub fn with_parameter_cache(mut self, cache: Arc<ParameterCache>) -> Self {
        self.parameter_cache = cache;
        self
    }

    /// Binds a field to the column of the same name. Absence is allowed by
    /// default only for string and `Option`-wrapped destinations.
    pub fn map<V: Primitive>(&mut self, field: Field<T, V>) -> Result<&mut Self>
    where
        T: 'static,
    {
        let allows_absent = V::NULLABLE || V::TYPE.is_string();
        self.insert_binding(field, None, allows_absent, None)?;
        Ok(self)
    }

    /// Binds with explicit nullability and an optional default value; the
    /// column name defaults to the field name.
    pub fn map_with<V: Primitive>(
        &mut self,
        field: Field<T, V>,
        allows_absent: bool,
        default: Option<Value>,
    ) -> Result<&mut Self>
    where
        T: 'static,
    {
        self.insert_binding(field, None, allows_absent, default)?;
        Ok(self)
    }

    /// Fully explicit binding.
    pub fn map_column<V: Primitive>(
        &mut self,
        field: Field<T, V>,
        source_column: &str,
        allows_absent: bool,
        default: Option<Value>,
    ) -> Result<&mut Self>
    where
        T: 'static,
    {
        self.insert_binding(field, Some(source_column), allows_absent, default)?;
        Ok(self)
    }

    /// Binds through a conversion function applied to present values: the
    /// column is read as `S`, converted, and assigned as `V`.
    pub fn map_converted<S, V, F>(
        &mut self,
        field: Field<T, V>,
        source_column: &str,
        allows_absent: bool,
        convert: F,
    ) -> Result<&mut Self>
    where
        T: 'static,
        S: Primitive,
        V: Primitive,
        F: Fn(S) -> V + Send + Sync + 'static,
    {
        let binding = FieldBinding::build_converted::<S, V, F>(
            field,
            source_column,
            allows_absent,
            convert,
        )?;
        self.fields.insert(binding.field_name, binding);
        Ok(self)
    }

    /// Auto-binds every named field of `T` with the same inference rule as
    /// [`map`](MappingDefinition::map).
    pub fn map_all(&mut self) -> Result<&mut Self>
    where
        T: Bindable,
    {
        T::bind(self)?;
        Ok(self)
    }

    /// Returns a binding over the memoized compiled program, generating the
    /// program on first call. Each returned binding carries its own ordinal
    /// slots over the shared program.
    pub fn produce_binding(&self) -> CompiledBinding<T> {
        let program = self
            .program
            .get_or_init(|| Arc::new(Program::generate(self)));
        CompiledBinding::new(program.clone())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn derive_parameters(&self) -> bool {
        self.derive_parameters
    }

    /// Process-lifetime-unique structural id distinguishing programs
    /// generated for the same `T`.
    pub fn unique_id(&self) -> Uuid {
        self.unique_id
    }

    pub fn has_extended_fields(&self) -> bool {
        self.fields.values().any(|binding| binding.extended)
    }

    pub fn parameter_cache(&self) -> &Arc<ParameterCache> {
        &self.parameter_cache
    }

    pub(crate) fn bindings(&self) -> impl Iterator<Item = &FieldBinding<T>> {
        self.fields.values()
    }

    fn insert_binding<V: Primitive>(
        &mut self,
        field: Field<T, V>,
        source_column: Option<&str>,
        allows_absent: bool,
        default: Option<Value>,
    ) -> Result<()>
    where
        T: 'static,
    {
        // An explicit null default means "no default".
        let default = default.filter(|value| !value.is_null());

        check_default_value_preconditions::<V>(field.name(), allows_absent, default.as_ref())?;
        check_valid_type::<V>(field.name())?;

        let binding = FieldBinding::build(field, source_column, allows_absent, default)?;
        self.fields.insert(binding.field_name, binding);
        Ok(())
    }
}

fn check_default_value_preconditions<V: Primitive>(
    field: &str,
    allows_absent: bool,
    default: Option<&Value>,
) -> Result<()> {
    let Some(default) = default else {
        return Ok(());
    };

    if !allows_absent {
        return Err(Error::default_requires_nulls(field));
    }

    if default.ty() != Some(V::TYPE) {
        return Err(Error::default_type_mismatch(field, V::TYPE, default));
    }

    if !registry::supports_literal(V::TYPE) {
        return Err(Error::unsupported_default_type(field, V::TYPE));
    }

    Ok(())
}

fn check_valid_type<V: Primitive>(field: &str) -> Result<()> {
    if registry::is_supported(V::TYPE) || registry::requires_extended(V::TYPE) {
        return Ok(());
    }

    Err(Error::unsupported_field_type(field, V::TYPE))
}
