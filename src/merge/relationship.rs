use crate::key::RelationshipKey;
use crate::model::{ColumnReference, Relationship, Table};
use crate::report::ReconcileReport;
use std::collections::HashSet;

/// Result of matching relationships across both versions.
pub(crate) struct RelationshipMerge {
    /// Preserved relationships first, then additions.
    pub relationships: Vec<Relationship>,
    /// Number of preserved relationships at the front of `relationships`.
    pub kept: usize,
    pub dropped: Vec<Relationship>,
}

/// Keep shared relationships (current copy), drop stale ones, append new ones.
///
/// Preserved relationships come first in their original order, then the
/// additions in proposed order.
pub(crate) fn merge_relationships(
    current: &[Relationship],
    proposed: &[Relationship],
    report: &mut ReconcileReport,
) -> RelationshipMerge {
    let current_keys: HashSet<RelationshipKey> = current.iter().map(RelationshipKey::of).collect();
    let proposed_keys: HashSet<RelationshipKey> =
        proposed.iter().map(RelationshipKey::of).collect();

    let mut relationships = Vec::with_capacity(proposed.len());
    let mut dropped = Vec::new();

    for rel in current {
        let key = RelationshipKey::of(rel);
        if proposed_keys.contains(&key) {
            report.relationships_kept.push(key);
            relationships.push(rel.clone());
        } else {
            tracing::debug!(relationship = %key, "dropping relationship absent from proposal");
            report.relationships_dropped.push(key);
            dropped.push(rel.clone());
        }
    }
    let kept = relationships.len();

    let mut added = HashSet::new();
    for rel in proposed {
        let key = RelationshipKey::of(rel);
        if current_keys.contains(&key) || !added.insert(key.clone()) {
            continue;
        }
        if !rel.cardinality.is_known() {
            tracing::warn!(
                relationship = %key,
                cardinality = %rel.cardinality,
                "unknown cardinality"
            );
        }
        tracing::debug!(relationship = %key, "adding relationship");
        report.relationships_added.push(key);
        relationships.push(rel.clone());
    }

    RelationshipMerge {
        relationships,
        kept,
        dropped,
    }
}

/// Position of a column inside the table list, by names. Last definition wins.
fn locate(tables: &[Table], table: &str, column: &str) -> Option<(usize, usize)> {
    let t = tables.iter().rposition(|t| t.name == table)?;
    let c = tables[t].columns.iter().rposition(|c| c.name == column)?;
    Some((t, c))
}

/// Source column position and target reference of a relationship, if both ends exist.
fn resolve(tables: &[Table], rel: &Relationship) -> Option<((usize, usize), ColumnReference)> {
    let source = locate(tables, &rel.source_table, &rel.source_column)?;
    let (t, c) = locate(tables, &rel.target_table, &rel.target_column)?;
    let column = tables[t].columns[c].id.clone()?;
    let reference = ColumnReference {
        table: rel.target_table.clone(),
        column,
    };
    Some((source, reference))
}

/// Update foreign-key state for relationships that changed in this pass.
///
/// Columns behind preserved relationships keep whatever state they carried.
/// Added relationships mark their source column as a foreign key referencing
/// the target column id. Source columns of dropped relationships are cleared
/// unless a remaining relationship still starts there. Relationships with a
/// missing endpoint are reported and left in place.
pub(crate) fn sync_foreign_keys(
    tables: &mut [Table],
    merged: &RelationshipMerge,
    report: &mut ReconcileReport,
) {
    let mut backed = HashSet::new();
    let mut links = Vec::new();
    for (i, rel) in merged.relationships.iter().enumerate() {
        match resolve(tables, rel) {
            Some((source, reference)) => {
                backed.insert(source);
                if i >= merged.kept {
                    links.push((source, reference));
                }
            }
            None => {
                let key = RelationshipKey::of(rel);
                tracing::warn!(relationship = %key, "relationship endpoint not in merged tables");
                report.unresolved.push(key);
            }
        }
    }

    for rel in &merged.dropped {
        let Some((t, c)) = locate(tables, &rel.source_table, &rel.source_column) else {
            continue;
        };
        if backed.contains(&(t, c)) {
            continue;
        }
        let column = &mut tables[t].columns[c];
        column.is_foreign_key = false;
        column.references = None;
    }

    for ((t, c), reference) in links {
        let column = &mut tables[t].columns[c];
        column.is_foreign_key = true;
        column.references = Some(reference);
    }
}
