//! Field projection engine
//!
//! Clients name the fields they want through a comma-separated list. This
//! module validates that list against the fixed whitelist of a resource kind
//! and copies exactly those fields into the kind's partial response type.
//!
//! Each kind supplies one static binding table of `(name, copy)` entries;
//! the whitelist is the set of names in that table. A [`FieldSchema`] indexes
//! the table once at startup and is shared read-only afterwards.

use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::models::ResourceKind;

/// A resource kind that can be projected into a partial response.
pub trait Projectable: DeserializeOwned + Send + Sync + 'static {
    /// Response type with every field optional and omitted when unset.
    type Partial: Serialize + Default + Send + 'static;

    const KIND: ResourceKind;

    /// Binding table, in the order fields are documented.
    fn bindings() -> &'static [FieldBinding<Self>];
}

/// One whitelisted field: its wire name and how to copy it from the stored
/// record into the partial response.
pub struct FieldBinding<R: Projectable> {
    pub name: &'static str,
    pub copy: fn(&R, &mut R::Partial),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("fields parameter is required")]
    Empty,

    #[error("invalid field specified: {0}")]
    Unknown(String),
}

impl From<FieldError> for crate::Error {
    fn from(err: FieldError) -> Self {
        crate::Error::InvalidField(err.to_string())
    }
}

/// Validated, trimmed and deduplicated field list. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelection {
    names: Vec<&'static str>,
    positions: Vec<usize>,
}

impl FieldSelection {
    /// Field names in first-occurrence order. Doubles as the projection
    /// handed to the document store.
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

pub struct FieldSchema<R: Projectable> {
    bindings: &'static [FieldBinding<R>],
    index: HashMap<&'static str, usize>,
}

impl<R: Projectable> FieldSchema<R> {
    pub fn new() -> Self {
        let bindings = R::bindings();
        let index = bindings
            .iter()
            .enumerate()
            .map(|(pos, binding)| (binding.name, pos))
            .collect();
        Self { bindings, index }
    }

    /// Whitelisted field names in binding order.
    pub fn whitelist(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.bindings.iter().map(|b| b.name)
    }

    /// Parse a client-supplied list such as `"fhirId, status"`.
    ///
    /// Matching is exact and case-sensitive after trimming each entry. The
    /// first entry outside the whitelist rejects the whole list.
    pub fn parse(&self, raw: &str) -> Result<FieldSelection, FieldError> {
        if raw.trim().is_empty() {
            return Err(FieldError::Empty);
        }

        let mut names = Vec::new();
        let mut positions = Vec::new();
        for entry in raw.split(',') {
            let entry = entry.trim();
            let Some((&name, &pos)) = self.index.get_key_value(entry) else {
                return Err(FieldError::Unknown(entry.to_string()));
            };
            if !positions.contains(&pos) {
                names.push(name);
                positions.push(pos);
            }
        }

        Ok(FieldSelection { names, positions })
    }

    /// Build the partial response holding exactly the selected fields.
    pub fn project(&self, record: &R, selection: &FieldSelection) -> R::Partial {
        let mut partial = R::Partial::default();
        for &pos in &selection.positions {
            (self.bindings[pos].copy)(record, &mut partial);
        }
        partial
    }
}

impl<R: Projectable> Default for FieldSchema<R> {
    fn default() -> Self {
        Self::new()
    }
}
