//! Collaborator capability traits consumed by the binding core.
//!
//! Nothing in this module is implemented by rowbind itself: a data-access
//! backend supplies row cursors, row streams, and commands, and the binding
//! core only drives them through these fixed operation sets.

mod command;
pub use command::{attach_value, attach_value_or_null, Command};

mod cursor;
pub use cursor::{ExtendedRowCursor, RowCursor};

mod parameter;
pub use parameter::{Parameter, ParameterDirection};

mod stream;
pub use stream::{ExtendedRowStream, RowStream};
