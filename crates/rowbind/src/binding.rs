mod program;
pub(crate) use program::Program;

use rowbind_core::source::{attach_value, Command, ExtendedRowCursor, RowCursor};
use rowbind_core::Result;

use std::sync::Arc;

/// The reusable binding produced for one mapping definition.
///
/// The compiled program is shared across every binding the definition
/// produces; each binding carries only its own ordinal slots. Usage follows
/// a two-step contract: resolve ordinals once per cursor column layout,
/// then load rows any number of times. Because `resolve_ordinals` takes
/// `&mut self`, one binding instance cannot be re-resolved while another
/// borrow is draining it; callers that iterate differently-shaped cursors
/// concurrently produce one binding per cursor.
pub struct CompiledBinding<T> {
    program: Arc<Program<T>>,
    ordinals: Vec<usize>,
    resolved: bool,
}

impl<T> CompiledBinding<T> {
    pub(crate) fn new(program: Arc<Program<T>>) -> Self {
        let ordinals = vec![usize::MAX; program.columns.len()];
        Self {
            program,
            ordinals,
            resolved: false,
        }
    }

    /// Resolves every distinct mapped column to its position in `cursor`'s
    /// layout. Must be called before [`load`](CompiledBinding::load);
    /// calling it again re-resolves against a new layout. The cost is paid
    /// once per layout, regardless of row count.
    pub fn resolve_ordinals(&mut self, cursor: &dyn RowCursor) -> Result<()> {
        for (slot, column) in self.program.columns.iter().enumerate() {
            self.ordinals[slot] = cursor.ordinal(column)?;
        }
        self.resolved = true;
        Ok(())
    }

    /// Populates all ordinary fields of `model` from the current row.
    pub fn load(&self, model: &mut T, cursor: &dyn RowCursor) -> Result<()> {
        debug_assert!(
            self.resolved,
            "resolve_ordinals must be called before loading rows"
        );

        for op in &self.program.fields {
            (op.load)(model, cursor, self.ordinals[op.slot])?;
        }
        Ok(())
    }

    /// Populates the extended-capability fields of `model` from the current
    /// row. Only meaningful when [`has_extended_fields`] is true.
    ///
    /// [`has_extended_fields`]: CompiledBinding::has_extended_fields
    pub fn load_extended(&self, model: &mut T, cursor: &dyn ExtendedRowCursor) -> Result<()> {
        debug_assert!(
            self.resolved,
            "resolve_ordinals must be called before loading rows"
        );

        for op in &self.program.extended {
            (op.load)(model, cursor, self.ordinals[op.slot])?;
        }
        Ok(())
    }

    /// Populates `command`'s parameters from `model`'s current field
    /// values; independent of ordinal state.
    ///
    /// With `derive_parameters` set on the definition, the command's
    /// parameter shape is obtained through the shared cache and each
    /// parameter is copied from its named template. Otherwise fresh
    /// parameters are synthesized, names prefixed with the command's escape
    /// marker when not already present.
    pub fn load_parameters(&self, command: &mut dyn Command, model: &T) -> Result<()> {
        if self.program.derive_parameters {
            let shape = self.program.parameter_cache.derive_parameters(command)?;
            for op in &self.program.parameters {
                let name = prefixed_name(command.parameter_prefix(), &op.column);
                shape.set_parameter(command, &name, (op.store)(model));
            }
        } else {
            for op in &self.program.parameters {
                let name = prefixed_name(command.parameter_prefix(), &op.column);
                let value = (op.store)(model);
                attach_value(command, &name, value);
            }
        }
        Ok(())
    }

    pub fn has_extended_fields(&self) -> bool {
        !self.program.extended.is_empty()
    }

    /// Whether `other` was produced from the same underlying compiled
    /// program (identity-stable memoization probe).
    pub fn shares_artifact(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.program, &other.program)
    }

    /// Diagnostic rendering of the binding plan: one line per field with
    /// its source column, slot, absence policy, and default.
    pub fn explain(&self) -> &str {
        self.program.explain()
    }
}

impl<T> core::fmt::Debug for CompiledBinding<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("CompiledBinding")
            .field("definition_id", &self.program.definition_id)
            .field("columns", &self.program.columns)
            .field("resolved", &self.resolved)
            .finish()
    }
}

fn prefixed_name(prefix: char, column: &str) -> String {
    if column.starts_with(prefix) {
        column.to_string()
    } else {
        format!("{prefix}{column}")
    }
}
