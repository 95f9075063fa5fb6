use super::{ExtendedRowCursor, RowCursor};
use crate::{async_trait, Result};

/// An iterator-like sequence of rows backed by a query result.
///
/// The stream is itself a [`RowCursor`] positioned at the current row;
/// `advance` suspends until the next row is available or the stream is
/// exhausted.
#[async_trait]
pub trait RowStream: RowCursor + Send {
    /// Whether the stream reported any rows up front.
    fn has_rows(&self) -> bool;

    /// Moves to the next row, returning `false` at exhaustion.
    async fn advance(&mut self) -> Result<bool>;
}

/// A row stream whose cursor carries the extended capability.
pub trait ExtendedRowStream: RowStream + ExtendedRowCursor {}

impl<S> ExtendedRowStream for S where S: RowStream + ExtendedRowCursor {}
