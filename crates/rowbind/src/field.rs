/// A compile-time-checked accessor/mutator pair naming one destination
/// field of `T`.
///
/// Constructed with the [`field!`](crate::field) macro, which only accepts
/// a plain named field of `T` — anything else (a method call, a nested
/// path) fails to compile, so the "selector must be a simple field access"
/// rule is enforced before the program runs.
pub struct Field<T, V> {
    name: &'static str,
    pub(crate) get: fn(&T) -> &V,
    pub(crate) set: fn(&mut T, V),
}

impl<T, V> Field<T, V> {
    pub fn new(name: &'static str, get: fn(&T) -> &V, set: fn(&mut T, V)) -> Self {
        Self { name, get, set }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Builds a [`Field`] from a type and one of its named fields.
///
/// ```
/// struct User {
///     name: Option<String>,
/// }
///
/// let field = rowbind::field!(User, name);
/// assert_eq!(field.name(), "name");
/// ```
#[macro_export]
macro_rules! field {
    ($ty:ty, $field:ident) => {
        $crate::Field::new(
            stringify!($field),
            |model: &$ty| &model.$field,
            |model: &mut $ty, value| model.$field = value,
        )
    };
}
