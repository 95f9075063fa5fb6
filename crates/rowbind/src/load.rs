//! Convenience operations that drive a row stream to completion with a
//! compiled binding.
//!
//! The `_extended` variants additionally run the extended-capability field
//! load per row and therefore require an [`ExtendedRowStream`]. The plain
//! variants fail with a capability error when the definition carries
//! extended fields.

use crate::mapping::MappingDefinition;
use crate::primitive::Primitive;

use indexmap::IndexMap;
use rowbind_core::source::{ExtendedRowStream, RowStream};
use rowbind_core::{registry, Error, Result};

use std::hash::Hash;

/// Advances once and maps the row; `None` when the stream has no rows.
pub async fn load_one<T, S>(stream: &mut S, definition: &MappingDefinition<T>) -> Result<Option<T>>
where
    T: Default,
    S: RowStream,
{
    ensure_plain(definition)?;

    if !stream.advance().await? {
        return Ok(None);
    }

    let mut binding = definition.produce_binding();
    binding.resolve_ordinals(&*stream)?;

    let mut item = T::default();
    binding.load(&mut item, &*stream)?;
    Ok(Some(item))
}

/// Drains the stream to an ordered list. A stream reporting no rows up
/// front returns an empty list without resolving ordinals.
pub async fn load_all<T, S>(stream: &mut S, definition: &MappingDefinition<T>) -> Result<Vec<T>>
where
    T: Default,
    S: RowStream,
{
    ensure_plain(definition)?;

    let mut items = Vec::new();
    if !stream.has_rows() {
        return Ok(items);
    }

    let mut binding = definition.produce_binding();
    binding.resolve_ordinals(&*stream)?;

    while stream.advance().await? {
        let mut item = T::default();
        binding.load(&mut item, &*stream)?;
        items.push(item);
    }

    Ok(items)
}

/// Drains the stream, grouping rows by the typed value in `key_column`.
/// Within-group row order is preserved; keys appear in first-seen order.
pub async fn load_grouped<T, K, S>(
    stream: &mut S,
    definition: &MappingDefinition<T>,
    key_column: &str,
) -> Result<IndexMap<K, Vec<T>>>
where
    T: Default,
    K: Primitive + Eq + Hash,
    S: RowStream,
{
    ensure_plain(definition)?;

    let mut groups = IndexMap::new();
    if !stream.has_rows() {
        return Ok(groups);
    }

    let key_ordinal = stream.ordinal(key_column)?;
    let key_read = registry::primitive_for(K::TYPE, false, false)?;

    let mut binding = definition.produce_binding();
    binding.resolve_ordinals(&*stream)?;

    while stream.advance().await? {
        let key = K::load(key_read.read(&*stream, key_ordinal, None)?)?;

        let mut item = T::default();
        binding.load(&mut item, &*stream)?;
        groups.entry(key).or_insert_with(Vec::new).push(item);
    }

    Ok(groups)
}

/// As [`load_one`], over a stream with the extended cursor capability.
pub async fn load_one_extended<T, S>(
    stream: &mut S,
    definition: &MappingDefinition<T>,
) -> Result<Option<T>>
where
    T: Default,
    S: ExtendedRowStream,
{
    if !stream.advance().await? {
        return Ok(None);
    }

    let mut binding = definition.produce_binding();
    binding.resolve_ordinals(&*stream)?;

    let mut item = T::default();
    binding.load(&mut item, &*stream)?;
    binding.load_extended(&mut item, &*stream)?;
    Ok(Some(item))
}

/// As [`load_all`], over a stream with the extended cursor capability.
pub async fn load_all_extended<T, S>(
    stream: &mut S,
    definition: &MappingDefinition<T>,
) -> Result<Vec<T>>
where
    T: Default,
    S: ExtendedRowStream,
{
    let mut items = Vec::new();
    if !stream.has_rows() {
        return Ok(items);
    }

    let mut binding = definition.produce_binding();
    binding.resolve_ordinals(&*stream)?;

    while stream.advance().await? {
        let mut item = T::default();
        binding.load(&mut item, &*stream)?;
        binding.load_extended(&mut item, &*stream)?;
        items.push(item);
    }

    Ok(items)
}

/// As [`load_grouped`], over a stream with the extended cursor capability.
pub async fn load_grouped_extended<T, K, S>(
    stream: &mut S,
    definition: &MappingDefinition<T>,
    key_column: &str,
) -> Result<IndexMap<K, Vec<T>>>
where
    T: Default,
    K: Primitive + Eq + Hash,
    S: ExtendedRowStream,
{
    let mut groups = IndexMap::new();
    if !stream.has_rows() {
        return Ok(groups);
    }

    let key_ordinal = stream.ordinal(key_column)?;
    let key_read = registry::primitive_for(K::TYPE, false, false)?;

    let mut binding = definition.produce_binding();
    binding.resolve_ordinals(&*stream)?;

    while stream.advance().await? {
        let key = K::load(key_read.read(&*stream, key_ordinal, None)?)?;

        let mut item = T::default();
        binding.load(&mut item, &*stream)?;
        binding.load_extended(&mut item, &*stream)?;
        groups.entry(key).or_insert_with(Vec::new).push(item);
    }

    Ok(groups)
}

fn ensure_plain<T>(definition: &MappingDefinition<T>) -> Result<()> {
    if definition.has_extended_fields() {
        return Err(Error::extended_capability_required(
            "definition has extended-capability fields; use the extended loading functions",
        ));
    }
    Ok(())
}
