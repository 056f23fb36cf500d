use super::column::{create_column, merge_columns};
use super::overlay;
use crate::id::{IdAllocator, IdGenerator};
use crate::key::index_tables;
use crate::model::Table;
use crate::report::ReconcileReport;
use std::collections::HashSet;

/// Merge a table present on both sides.
///
/// Every field is listed so a new payload field has to pick a rule here.
pub(crate) fn merge_table<G: IdGenerator>(
    current: &Table,
    proposed: &Table,
    ids: &mut IdAllocator<G>,
    report: &mut ReconcileReport,
) -> Table {
    Table {
        name: proposed.name.clone(),
        columns: merge_columns(&proposed.name, &current.columns, &proposed.columns, ids, report),
        description: proposed.description.clone().or_else(|| current.description.clone()),
        indexes: proposed.indexes.clone().or_else(|| current.indexes.clone()),
        position: proposed.position.or(current.position),
        extra: overlay(&current.extra, &proposed.extra),
    }
}

/// Materialize a table the current schema has never seen.
pub(crate) fn create_table<G: IdGenerator>(
    proposed: &Table,
    ids: &mut IdAllocator<G>,
    report: &mut ReconcileReport,
) -> Table {
    let columns = proposed
        .columns
        .iter()
        .map(|col| {
            report.columns_created.push(format!("{}.{}", proposed.name, col.name));
            create_column(col, ids)
        })
        .collect();

    Table {
        columns,
        ..proposed.clone()
    }
}

/// Merge table lists. Proposed order wins; tables missing from `proposed` are dropped.
pub(crate) fn merge_tables<G: IdGenerator>(
    current: &[Table],
    proposed: &[Table],
    ids: &mut IdAllocator<G>,
    report: &mut ReconcileReport,
) -> Vec<Table> {
    let by_name = index_tables(current);

    let merged = proposed
        .iter()
        .map(|table| match by_name.get(table.name.as_str()) {
            Some(existing) => {
                report.tables_kept.push(table.name.clone());
                merge_table(existing, table, ids, report)
            }
            None => {
                tracing::debug!(table = %table.name, "adding table");
                report.tables_added.push(table.name.clone());
                create_table(table, ids, report)
            }
        })
        .collect();

    let kept: HashSet<&str> = proposed.iter().map(|t| t.name.as_str()).collect();
    for table in current.iter().filter(|t| !kept.contains(t.name.as_str())) {
        tracing::debug!(table = %table.name, "dropping table missing from proposed schema");
        report.tables_dropped.push(table.name.clone());
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SequentialIds;
    use crate::model::{Column, ColumnId, Index, Position};

    fn table(name: &str, columns: &[(&str, Option<&str>)]) -> Table {
        Table {
            name: name.to_string(),
            columns: columns
                .iter()
                .map(|(col, id)| Column {
                    id: id.map(ColumnId::from),
                    name: col.to_string(),
                    data_type: "INT".to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_payload_proposed_wins_when_present() {
        let mut current = table("users", &[("id", Some("c1"))]);
        current.description = Some("old".to_string());
        current.position = Some(Position { x: 10.0, y: 20.0 });
        current.indexes = Some(vec![Index {
            name: Some("users_pk".to_string()),
            columns: vec!["id".to_string()],
            unique: true,
        }]);

        current.extra.insert("color".to_string(), "red".into());
        current.extra.insert("collapsed".to_string(), true.into());

        let mut proposed = table("users", &[("id", None)]);
        proposed.description = Some("new".to_string());
        proposed.extra.insert("color".to_string(), "blue".into());

        let existing = current.columns.iter().filter_map(|c| c.id.as_ref());
        let mut ids = IdAllocator::new(SequentialIds::default(), existing);
        let mut report = ReconcileReport::default();
        let merged = merge_table(&current, &proposed, &mut ids, &mut report);

        assert_eq!(merged.description.as_deref(), Some("new"));
        assert_eq!(merged.position, current.position);
        assert_eq!(merged.indexes, current.indexes);
        assert_eq!(merged.extra["color"], "blue");
        assert_eq!(merged.extra["collapsed"], true);
        assert_eq!(merged.columns[0].id, Some(ColumnId::from("c1")));
    }

    #[test]
    fn test_create_table_assigns_ids() {
        let proposed = table("tags", &[("id", None), ("label", None)]);
        let mut ids = IdAllocator::new(SequentialIds::new("t"), []);
        let mut report = ReconcileReport::default();
        let created = create_table(&proposed, &mut ids, &mut report);

        let got: Vec<_> = created.columns.iter().map(|c| c.id.clone()).collect();
        assert_eq!(got, [Some(ColumnId::from("t1")), Some(ColumnId::from("t2"))]);
        assert_eq!(report.columns_created, ["tags.id", "tags.label"]);
    }

    #[test]
    fn test_merge_tables_order_and_drops() {
        let current = vec![table("a", &[("id", Some("1"))]), table("b", &[("id", Some("2"))])];
        let proposed = vec![table("c", &[("id", None)]), table("a", &[("id", None)])];

        let mut ids = IdAllocator::new(SequentialIds::default(), []);
        let mut report = ReconcileReport::default();
        let merged = merge_tables(&current, &proposed, &mut ids, &mut report);

        let names: Vec<&str> = merged.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["c", "a"]);
        assert_eq!(report.tables_added, ["c"]);
        assert_eq!(report.tables_kept, ["a"]);
        assert_eq!(report.tables_dropped, ["b"]);
        assert_eq!(merged[1].columns[0].id, Some(ColumnId::from("1")));
    }
}
