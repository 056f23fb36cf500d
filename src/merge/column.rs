use super::overlay;
use crate::id::{IdAllocator, IdGenerator};
use crate::key::index_columns;
use crate::model::Column;
use crate::report::ReconcileReport;
use std::collections::HashSet;

/// Update an existing column with the proposed attributes.
///
/// Identity and foreign-key state stay with the current column. Unknown
/// fields keep their current values unless the proposal sets them.
pub(crate) fn update_column(current: &Column, proposed: &Column) -> Column {
    Column {
        data_type: proposed.data_type.clone(),
        is_primary_key: proposed.is_primary_key,
        is_nullable: proposed.is_nullable,
        default_value: proposed.default_value.clone(),
        description: proposed.description.clone(),
        extra: overlay(&current.extra, &proposed.extra),
        ..current.clone()
    }
}

/// Materialize a column the current schema has never seen.
pub(crate) fn create_column<G: IdGenerator>(
    proposed: &Column,
    ids: &mut IdAllocator<G>,
) -> Column {
    Column {
        id: Some(ids.allocate()),
        is_foreign_key: false,
        references: None,
        ..proposed.clone()
    }
}

/// Merge the columns of a table present on both sides, in proposed order.
pub(crate) fn merge_columns<G: IdGenerator>(
    table: &str,
    current: &[Column],
    proposed: &[Column],
    ids: &mut IdAllocator<G>,
    report: &mut ReconcileReport,
) -> Vec<Column> {
    let by_name = index_columns(current);

    let merged: Vec<Column> = proposed
        .iter()
        .map(|col| match by_name.get(col.name.as_str()) {
            Some(existing) => {
                let mut updated = update_column(existing, col);
                if updated.id.is_none() {
                    tracing::warn!(
                        table,
                        column = %col.name,
                        "current column has no id, assigning one"
                    );
                    updated.id = Some(ids.allocate());
                }
                tracing::trace!(table, column = %col.name, "preserved column");
                report.columns_preserved.push(format!("{}.{}", table, col.name));
                updated
            }
            None => {
                let created = create_column(col, ids);
                tracing::trace!(table, column = %col.name, "created column");
                report.columns_created.push(format!("{}.{}", table, col.name));
                created
            }
        })
        .collect();

    let kept: HashSet<&str> = proposed.iter().map(|c| c.name.as_str()).collect();
    for col in current.iter().filter(|c| !kept.contains(c.name.as_str())) {
        report.columns_dropped.push(format!("{}.{}", table, col.name));
    }

    merged
}
