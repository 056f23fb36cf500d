//! What a reconciliation pass did, for logging and for the caller's UI.

use crate::key::RelationshipKey;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    /// No current tables: the proposed schema was taken as is.
    TookProposed,
    /// No proposed tables: the current schema was kept as is.
    KeptCurrent,
    #[default]
    Merged,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub outcome: Outcome,
    pub tables_kept: Vec<String>,
    pub tables_added: Vec<String>,
    pub tables_dropped: Vec<String>,
    /// `table.column` paths.
    pub columns_preserved: Vec<String>,
    pub columns_created: Vec<String>,
    pub columns_dropped: Vec<String>,
    pub relationships_kept: Vec<RelationshipKey>,
    pub relationships_added: Vec<RelationshipKey>,
    pub relationships_dropped: Vec<RelationshipKey>,
    /// Relationships kept in the output whose endpoints do not exist in the merged tables.
    pub unresolved: Vec<RelationshipKey>,
}

impl ReconcileReport {
    pub(crate) fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            ..Default::default()
        }
    }

    /// True when the pass neither added nor removed anything.
    pub fn is_noop(&self) -> bool {
        self.outcome != Outcome::TookProposed
            && self.tables_added.is_empty()
            && self.tables_dropped.is_empty()
            && self.columns_created.is_empty()
            && self.columns_dropped.is_empty()
            && self.relationships_added.is_empty()
            && self.relationships_dropped.is_empty()
    }
}

fn write_list<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    items: &[T],
) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    write!(f, "\n  {}:", label)?;
    for item in items {
        write!(f, " {}", item)?;
    }
    Ok(())
}

impl fmt::Display for ReconcileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Outcome::TookProposed => return f.write_str("no current schema, took proposed schema"),
            Outcome::KeptCurrent => return f.write_str("no proposed tables, kept current schema"),
            Outcome::Merged => {}
        }

        write!(
            f,
            "tables: {} kept, {} added, {} dropped; columns: {} preserved, {} created, {} dropped; \
             relationships: {} kept, {} added, {} dropped",
            self.tables_kept.len(),
            self.tables_added.len(),
            self.tables_dropped.len(),
            self.columns_preserved.len(),
            self.columns_created.len(),
            self.columns_dropped.len(),
            self.relationships_kept.len(),
            self.relationships_added.len(),
            self.relationships_dropped.len(),
        )?;

        write_list(f, "added tables", &self.tables_added)?;
        write_list(f, "dropped tables", &self.tables_dropped)?;
        write_list(f, "created columns", &self.columns_created)?;
        write_list(f, "dropped columns", &self.columns_dropped)?;
        write_list(f, "added relationships", &self.relationships_added)?;
        write_list(f, "dropped relationships", &self.relationships_dropped)?;
        write_list(f, "unresolved relationships", &self.unresolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_report_is_noop() {
        assert!(ReconcileReport::default().is_noop());
        assert!(ReconcileReport::with_outcome(Outcome::KeptCurrent).is_noop());
        assert!(!ReconcileReport::with_outcome(Outcome::TookProposed).is_noop());
    }

    #[test]
    fn test_display_lists_changes() {
        let report = ReconcileReport {
            tables_kept: vec!["users".to_string()],
            tables_dropped: vec!["legacy".to_string()],
            columns_created: vec!["users.nickname".to_string()],
            ..Default::default()
        };
        let text = report.to_string();
        assert!(text.starts_with("tables: 1 kept, 0 added, 1 dropped"));
        assert!(text.contains("dropped tables: legacy"));
        assert!(text.contains("created columns: users.nickname"));
        assert!(!text.contains("unresolved"));
    }

    #[test]
    fn test_display_short_circuit() {
        let report = ReconcileReport::with_outcome(Outcome::KeptCurrent);
        assert_eq!(report.to_string(), "no proposed tables, kept current schema");
    }
}
