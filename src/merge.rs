//! Merge routines, leaves first: columns, tables, relationships.

mod column;
mod relationship;
mod table;

pub(crate) use relationship::{merge_relationships, sync_foreign_keys};
pub(crate) use table::merge_tables;

use crate::model::Extra;

/// Unknown fields of both sides, proposed entries overwriting current ones.
pub(crate) fn overlay(current: &Extra, proposed: &Extra) -> Extra {
    let mut merged = current.clone();
    merged.extend(proposed.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}
