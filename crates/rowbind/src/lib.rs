mod binding;
pub use binding::CompiledBinding;

mod field;
pub use field::Field;

pub mod load;
pub use load::{load_all, load_grouped, load_one};

mod mapping;
pub use mapping::{Bindable, MappingDefinition};

mod param;
pub use param::{ParameterCache, ParameterSet};

mod primitive;
pub use primitive::Primitive;

pub use rowbind_macros::Bindable;

pub use rowbind_core::{source, Error, Result, Value, ValueType};
