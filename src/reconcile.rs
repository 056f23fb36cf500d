//! Non-destructive reconciliation of a proposed schema into the current one.
//!
//! The proposed schema decides which tables, columns and relationships
//! exist and in what order. The current schema contributes identity: column
//! ids, foreign-key links, and payload the proposal leaves blank.

use crate::id::{IdAllocator, IdGenerator};
use crate::merge::{merge_relationships, merge_tables, overlay, sync_foreign_keys};
use crate::model::Schema;
use crate::report::{Outcome, ReconcileReport};

#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub schema: Option<Schema>,
    pub report: ReconcileReport,
}

/// Reconciles schemas, minting new column ids from `G`.
pub struct Reconciler<G> {
    ids: G,
}

impl<G: IdGenerator> Reconciler<G> {
    pub fn new(ids: G) -> Self {
        Self { ids }
    }

    pub fn into_inner(self) -> G {
        self.ids
    }

    pub fn reconcile(
        &mut self,
        current: Option<&Schema>,
        proposed: Option<&Schema>,
    ) -> Reconciliation {
        let current = match current {
            Some(schema) if schema.has_tables() => schema,
            _ => {
                tracing::debug!("no current tables, taking proposed schema");
                return Reconciliation {
                    schema: proposed.cloned(),
                    report: ReconcileReport::with_outcome(Outcome::TookProposed),
                };
            }
        };
        let proposed = match proposed {
            Some(schema) if schema.has_tables() => schema,
            _ => {
                tracing::debug!("no proposed tables, keeping current schema");
                return Reconciliation {
                    schema: Some(current.clone()),
                    report: ReconcileReport::with_outcome(Outcome::KeptCurrent),
                };
            }
        };

        let mut report = ReconcileReport::with_outcome(Outcome::Merged);
        let mut ids = IdAllocator::new(&mut self.ids, current.column_ids());

        let mut tables = merge_tables(&current.tables, &proposed.tables, &mut ids, &mut report);
        let merged =
            merge_relationships(&current.relationships, &proposed.relationships, &mut report);
        sync_foreign_keys(&mut tables, &merged, &mut report);

        tracing::debug!(
            tables = tables.len(),
            relationships = merged.relationships.len(),
            unresolved = report.unresolved.len(),
            "reconciled schema"
        );

        Reconciliation {
            schema: Some(Schema {
                tables,
                relationships: merged.relationships,
                extra: overlay(&current.extra, &proposed.extra),
            }),
            report,
        }
    }
}

/// Merge `proposed` into `current`, returning the new current schema.
///
/// Returns `proposed` when there is no current table to merge against, and
/// `current` when the proposal has no tables. `None` only when both are
/// absent or `proposed` is absent with an empty `current`.
pub fn compute_final_schema_state<G: IdGenerator>(
    current: Option<&Schema>,
    proposed: Option<&Schema>,
    ids: &mut G,
) -> Option<Schema> {
    Reconciler::new(ids).reconcile(current, proposed).schema
}
