//! The external library of known groups.
//!
//! An order-indexed, read-only collection the isomorphism queries classify
//! against. The engine is agnostic to how it is populated: callers insert
//! constructed groups directly or load JSON definition records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::GroupError;
use crate::group::Group;

/// Serialized form of a known group: a name and its raw multiplication
/// table. Tables are validated on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupDefinition {
    pub name: String,
    pub table: Vec<Vec<usize>>,
}

#[derive(Debug)]
pub struct LibraryEntry {
    pub name: String,
    pub group: Group,
}

#[derive(Debug, Default)]
pub struct GroupLibrary {
    entries: Vec<LibraryEntry>,
    by_order: BTreeMap<usize, Vec<usize>>,
}

impl GroupLibrary {
    pub fn new() -> Self {
        GroupLibrary::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, group: Group) {
        let index = self.entries.len();
        self.by_order.entry(group.order()).or_default().push(index);
        self.entries.push(LibraryEntry {
            name: name.into(),
            group,
        });
    }

    /// Loads a JSON array of `GroupDefinition` records, validating each
    /// table.
    pub fn from_json(json: &str) -> Result<Self, GroupError> {
        let definitions: Vec<GroupDefinition> = serde_json::from_str(json)?;
        let mut library = GroupLibrary::new();
        for def in definitions {
            let group = Group::from_table(def.table)?;
            log::debug!("library: loaded '{}' of order {}", def.name, group.order());
            library.insert(def.name, group);
        }
        Ok(library)
    }

    /// Entries of the given order, in insertion order.
    pub fn of_order(&self, order: usize) -> impl Iterator<Item = &LibraryEntry> {
        self.by_order
            .get(&order)
            .into_iter()
            .flatten()
            .map(|&i| &self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &LibraryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
