//! Bulk reconciliation of an edited product table.
//!
//! The caller hands over the snapshot it fetched (the baseline) and an edited
//! copy of it (the candidate). Each candidate row is paired with the baseline
//! row carrying the same id, so the candidate may be reordered freely. A row
//! whose id was edited falls back to the baseline row at its position, and the
//! identifier always comes from the baseline, so the edited id is ignored rather
//! than applied. Every changed row becomes one independent update, issued in
//! candidate order. A failing row is recorded and the remaining rows are still
//! attempted. Nothing is retried.

use crate::{
    core::{
        export::SheetRow,
        product::{ProductChanges, ProductRow},
        store::InventoryStore,
    },
    errors::ErrorKind,
};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument, warn};

/// Why a single row could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    /// Class of the error
    pub kind: ErrorKind,
    /// Human-readable error message
    pub message: String,
}

/// What happened to one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// Nothing differed, no update was sent
    Unchanged,
    /// The update succeeded
    Updated,
    /// The update failed
    Failed(RowFailure),
}

/// Aggregate result across all rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Every row was either unchanged or updated
    Success {
        /// Rows actually written
        updated: usize,
    },
    /// At least one row failed
    PartialFailure {
        /// Failed rows with their reasons
        failures: Vec<(i64, RowFailure)>,
    },
}

/// Per-row results of a reconciliation run, in candidate order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// `(product id, outcome)` for every processed row
    pub rows: Vec<(i64, RowOutcome)>,
}

impl ReconcileReport {
    /// True when no row failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !self
            .rows
            .iter()
            .any(|(_, outcome)| matches!(outcome, RowOutcome::Failed(_)))
    }

    /// Number of rows that were written.
    #[must_use]
    pub fn updated_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|(_, outcome)| *outcome == RowOutcome::Updated)
            .count()
    }

    /// Number of rows that needed no update.
    #[must_use]
    pub fn unchanged_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|(_, outcome)| *outcome == RowOutcome::Unchanged)
            .count()
    }

    /// Failed rows with their reasons.
    #[must_use]
    pub fn failures(&self) -> Vec<(i64, &RowFailure)> {
        self.rows
            .iter()
            .filter_map(|(id, outcome)| match outcome {
                RowOutcome::Failed(failure) => Some((*id, failure)),
                _ => None,
            })
            .collect()
    }

    /// Collapses the per-row results into an overall outcome.
    #[must_use]
    pub fn outcome(&self) -> ReconcileOutcome {
        let failures: Vec<(i64, RowFailure)> = self
            .failures()
            .into_iter()
            .map(|(id, failure)| (id, failure.clone()))
            .collect();
        if failures.is_empty() {
            ReconcileOutcome::Success {
                updated: self.updated_count(),
            }
        } else {
            ReconcileOutcome::PartialFailure { failures }
        }
    }
}

/// Field-level difference between a baseline row and its edited copy.
///
/// Only name, quantity and price are editable in bulk; category and id are
/// never part of the diff.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn diff(baseline: &ProductRow, candidate: &ProductRow) -> ProductChanges {
    ProductChanges {
        name: (candidate.name != baseline.name).then(|| candidate.name.clone()),
        quantity: (candidate.quantity != baseline.quantity).then_some(candidate.quantity),
        price: (candidate.price != baseline.price).then_some(candidate.price),
        category_id: None,
    }
}

/// Pairs each candidate row with its baseline row.
///
/// Rows match by id. A candidate whose id is not in the baseline falls back to
/// the baseline row at the same position, unless another candidate row already
/// claims that id. Each baseline row is paired at most once; candidates that
/// find no partner are dropped.
fn pair_rows<'a>(
    baseline: &'a [ProductRow],
    candidate: &'a [ProductRow],
) -> Vec<(&'a ProductRow, &'a ProductRow)> {
    let by_id: HashMap<i64, &ProductRow> = baseline.iter().map(|row| (row.id, row)).collect();
    let claimed: HashSet<i64> = candidate
        .iter()
        .map(|row| row.id)
        .filter(|id| by_id.contains_key(id))
        .collect();

    let mut paired: HashSet<i64> = HashSet::new();
    let mut pairs = Vec::with_capacity(candidate.len());
    for (position, edited) in candidate.iter().enumerate() {
        let base = match by_id.get(&edited.id) {
            Some(base) => Some(*base),
            None => baseline
                .get(position)
                .filter(|base| !claimed.contains(&base.id)),
        };
        let Some(base) = base else {
            warn!("Candidate row {} matches no baseline row; ignored", edited.id);
            continue;
        };
        if !paired.insert(base.id) {
            warn!("Product {} appears more than once; later rows ignored", base.id);
            continue;
        }
        if edited.id != base.id {
            debug!("Ignoring id edit {} -> {}", base.id, edited.id);
        }
        pairs.push((base, edited));
    }
    pairs
}

/// Applies every edited row back to the store.
///
/// Candidate rows are matched to baseline rows by id (see [`pair_rows`] for
/// edited ids). Unchanged rows issue no call. Updates are sequential, in
/// candidate order, and a failure on one row never stops the others.
#[instrument(skip_all, fields(rows = candidate.len()))]
pub async fn reconcile<S>(store: &S, baseline: &[ProductRow], candidate: &[ProductRow]) -> ReconcileReport
where
    S: InventoryStore + ?Sized,
{
    if baseline.len() != candidate.len() {
        warn!(
            "Baseline has {} rows but candidate has {}",
            baseline.len(),
            candidate.len()
        );
    }

    let mut report = ReconcileReport::default();
    for (base, edited) in pair_rows(baseline, candidate) {
        let changes = diff(base, edited);
        if changes.is_empty() {
            report.rows.push((base.id, RowOutcome::Unchanged));
            continue;
        }

        let outcome = match store.update_product(base.id, changes).await {
            Ok(_) => RowOutcome::Updated,
            Err(e) => {
                warn!("Bulk update of product {} failed: {}", base.id, e);
                RowOutcome::Failed(RowFailure {
                    kind: e.kind(),
                    message: e.to_string(),
                })
            }
        };
        report.rows.push((base.id, outcome));
    }

    info!(
        "Reconciled {} rows: {} updated, {} unchanged, {} failed",
        report.rows.len(),
        report.updated_count(),
        report.unchanged_count(),
        report.failures().len()
    );
    report
}

/// Builds a candidate snapshot from an uploaded edit sheet.
///
/// Each baseline row takes its name, quantity and price from the sheet row with
/// the same id; baseline rows missing from the sheet are left as they are.
/// Returns the candidate together with sheet ids that match no baseline row, in
/// sheet order. When an id appears more than once, the last occurrence wins.
#[must_use]
pub fn align_sheet(baseline: &[ProductRow], sheet: &[SheetRow]) -> (Vec<ProductRow>, Vec<i64>) {
    let known: HashSet<i64> = baseline.iter().map(|row| row.id).collect();
    let by_id: HashMap<i64, &SheetRow> = sheet.iter().map(|row| (row.id, row)).collect();

    let candidate = baseline
        .iter()
        .map(|base| {
            let mut edited = base.clone();
            if let Some(sheet_row) = by_id.get(&base.id) {
                edited.name.clone_from(&sheet_row.name);
                edited.quantity = sheet_row.quantity;
                edited.price = sheet_row.price;
            }
            edited
        })
        .collect();

    let mut ignored: Vec<i64> = Vec::new();
    for row in sheet {
        if !known.contains(&row.id) && !ignored.contains(&row.id) {
            ignored.push(row.id);
        }
    }

    (candidate, ignored)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{
        core::product::{NewProduct, get_product_by_id, get_products_joined},
        entities,
        errors::{Error, Result},
        test_utils::*,
    };
    use async_trait::async_trait;
    use sea_orm::{DatabaseConnection, DbErr};
    use std::sync::Mutex;

    /// Delegates to a real database but fails updates for selected ids and
    /// records every update call it receives.
    struct FlakyStore {
        db: DatabaseConnection,
        failing_ids: HashSet<i64>,
        update_calls: Mutex<Vec<(i64, ProductChanges)>>,
    }

    impl FlakyStore {
        fn new(db: DatabaseConnection, failing_ids: &[i64]) -> Self {
            Self {
                db,
                failing_ids: failing_ids.iter().copied().collect(),
                update_calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(i64, ProductChanges)> {
            self.update_calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl InventoryStore for FlakyStore {
        async fn list_categories(&self) -> Result<Vec<entities::category::Model>> {
            self.db.list_categories().await
        }

        async fn create_category(
            &self,
            name: String,
            description: Option<String>,
        ) -> Result<entities::category::Model> {
            self.db.create_category(name, description).await
        }

        async fn delete_category(&self, id: i64) -> Result<bool> {
            self.db.delete_category(id).await
        }

        async fn list_products_joined(&self) -> Result<Vec<ProductRow>> {
            self.db.list_products_joined().await
        }

        async fn create_product(&self, new: NewProduct) -> Result<entities::product::Model> {
            self.db.create_product(new).await
        }

        async fn update_product(
            &self,
            id: i64,
            changes: ProductChanges,
        ) -> Result<entities::product::Model> {
            self.update_calls.lock().unwrap().push((id, changes.clone()));
            if self.failing_ids.contains(&id) {
                return Err(Error::Database(DbErr::Custom(
                    "connection reset by peer".to_string(),
                )));
            }
            self.db.update_product(id, changes).await
        }

        async fn delete_product(&self, id: i64) -> Result<bool> {
            self.db.delete_product(id).await
        }
    }

    #[test]
    fn test_diff_reports_only_changed_fields() {
        let base = row(1, "Cola", 5);
        let mut edited = base.clone();
        edited.quantity = 10;

        let changes = diff(&base, &edited);
        assert_eq!(changes, ProductChanges::default().with_quantity(10));

        edited.name = "Cola Zero".to_string();
        edited.price = 2.0;
        let changes = diff(&base, &edited);
        assert_eq!(changes.name.as_deref(), Some("Cola Zero"));
        assert_eq!(changes.price, Some(2.0));
        assert!(diff(&base, &base).is_empty());
    }

    #[test]
    fn test_diff_ignores_category_edits() {
        let base = row(1, "Cola", 5);
        let mut edited = base.clone();
        edited.category_id = Some(77);
        edited.category_name = Some("Elsewhere".to_string());
        assert!(diff(&base, &edited).is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_is_reported_not_raised() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let product = create_custom_product(&db, "A", 5, category.id).await?;

        let baseline = get_products_joined(&db).await?;
        let mut candidate = baseline.clone();
        candidate[0].quantity = 10;

        let store = FlakyStore::new(db, &[product.id]);
        let report = reconcile(&store, &baseline, &candidate).await;

        assert!(!report.is_success());
        let failures = report.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, product.id);
        assert_eq!(failures[0].1.kind, ErrorKind::Backend);
        assert!(matches!(
            report.outcome(),
            ReconcileOutcome::PartialFailure { ref failures } if failures.len() == 1
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_remaining_rows() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let first = create_custom_product(&db, "First", 1, category.id).await?;
        let second = create_custom_product(&db, "Second", 2, category.id).await?;
        let third = create_custom_product(&db, "Third", 3, category.id).await?;

        let baseline = get_products_joined(&db).await?;
        let mut candidate = baseline.clone();
        for edited in &mut candidate {
            edited.quantity += 100;
        }

        let store = FlakyStore::new(db, &[second.id]);
        let report = reconcile(&store, &baseline, &candidate).await;

        let outcomes: Vec<(i64, Option<ErrorKind>)> = report
            .rows
            .iter()
            .map(|(id, outcome)| match outcome {
                RowOutcome::Failed(failure) => (*id, Some(failure.kind)),
                _ => (*id, None),
            })
            .collect();
        assert_eq!(
            outcomes,
            vec![
                (first.id, None),
                (second.id, Some(ErrorKind::Backend)),
                (third.id, None),
            ]
        );
        assert!(report.failures()[0].1.message.contains("connection reset"));
        assert_eq!(report.updated_count(), 2);

        let calls: Vec<i64> = store.calls().iter().map(|(id, _)| *id).collect();
        assert_eq!(calls, vec![first.id, second.id, third.id]);

        assert_eq!(
            get_product_by_id(&store.db, third.id).await?.unwrap().quantity,
            103
        );
        assert_eq!(
            get_product_by_id(&store.db, second.id).await?.unwrap().quantity,
            2
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_unchanged_rows_issue_no_calls() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        create_custom_product(&db, "A", 1, category.id).await?;
        let b = create_custom_product(&db, "B", 2, category.id).await?;

        let baseline = get_products_joined(&db).await?;
        let mut candidate = baseline.clone();
        candidate[1].price = 4.5;

        let store = FlakyStore::new(db, &[]);
        let report = reconcile(&store, &baseline, &candidate).await;

        assert!(report.is_success());
        assert_eq!(report.unchanged_count(), 1);
        assert_eq!(
            report.outcome(),
            ReconcileOutcome::Success { updated: 1 }
        );
        assert_eq!(
            store.calls(),
            vec![(b.id, ProductChanges::default().with_price(4.5))]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_edited_ids_are_ignored() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let product = create_custom_product(&db, "A", 1, category.id).await?;

        let baseline = get_products_joined(&db).await?;
        let mut candidate = baseline.clone();
        candidate[0].id = 4242;
        candidate[0].quantity = 9;

        let report = reconcile(&db, &baseline, &candidate).await;
        assert_eq!(report.rows, vec![(product.id, RowOutcome::Updated)]);
        assert_eq!(
            get_product_by_id(&db, product.id).await?.unwrap().quantity,
            9
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_reordered_candidate_pairs_by_id() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let a = create_custom_product(&db, "A", 5, category.id).await?;
        let b = create_custom_product(&db, "B", 25, category.id).await?;

        let baseline = get_products_joined(&db).await?;
        let mut candidate: Vec<ProductRow> = baseline.iter().rev().cloned().collect();

        let store = FlakyStore::new(db, &[]);
        let report = reconcile(&store, &baseline, &candidate).await;
        assert_eq!(
            report.rows,
            vec![(b.id, RowOutcome::Unchanged), (a.id, RowOutcome::Unchanged)]
        );
        assert!(store.calls().is_empty());

        // Sorted by quantity descending, with one edit on the second row
        candidate[1].quantity = 7;
        let report = reconcile(&store, &baseline, &candidate).await;
        assert_eq!(store.calls(), vec![(a.id, ProductChanges::default().with_quantity(7))]);
        assert_eq!(report.updated_count(), 1);

        let stored_a = get_product_by_id(&store.db, a.id).await?.unwrap();
        let stored_b = get_product_by_id(&store.db, b.id).await?.unwrap();
        assert_eq!((stored_a.name.as_str(), stored_a.quantity), ("A", 7));
        assert_eq!((stored_b.name.as_str(), stored_b.quantity), ("B", 25));
        Ok(())
    }

    #[test]
    fn test_pair_rows_drops_unmatched_and_duplicates() {
        let baseline = vec![row(1, "A", 5), row(2, "B", 25)];
        // Row 0 had its id edited, but row 1 already claims id 1
        let candidate = vec![row(50, "X", 1), row(1, "A", 5), row(2, "B", 25), row(2, "B2", 3)];

        let pairs: Vec<(i64, i64)> = pair_rows(&baseline, &candidate)
            .into_iter()
            .map(|(base, edited)| (base.id, edited.id))
            .collect();
        assert_eq!(pairs, vec![(1, 1), (2, 2)]);
    }

    #[tokio::test]
    async fn test_validation_and_not_found_failures() -> Result<()> {
        let (db, category) = setup_with_category().await?;
        let gone = create_custom_product(&db, "Gone", 1, category.id).await?;
        let bad = create_custom_product(&db, "Bad", 1, category.id).await?;

        let baseline = get_products_joined(&db).await?;
        let mut candidate = baseline.clone();
        candidate[0].quantity = 2;
        candidate[1].quantity = -3;

        crate::core::product::delete_product(&db, gone.id).await?;

        let report = reconcile(&db, &baseline, &candidate).await;
        let kinds: Vec<(i64, ErrorKind)> = report
            .failures()
            .into_iter()
            .map(|(id, failure)| (id, failure.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![(gone.id, ErrorKind::NotFound), (bad.id, ErrorKind::Validation)]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_snapshots_succeed() {
        let db = setup_test_db().await.unwrap();
        let report = reconcile(&db, &[], &[]).await;
        assert!(report.rows.is_empty());
        assert_eq!(report.outcome(), ReconcileOutcome::Success { updated: 0 });
    }

    #[test]
    fn test_align_sheet() {
        let baseline = vec![row(1, "A", 5), row(2, "B", 25), row(3, "C", 5)];
        let sheet = vec![
            SheetRow {
                id: 3,
                name: "C2".to_string(),
                quantity: 6,
                price: 1.0,
            },
            SheetRow {
                id: 99,
                name: "Ghost".to_string(),
                quantity: 1,
                price: 1.0,
            },
            SheetRow {
                id: 1,
                name: "A".to_string(),
                quantity: 5,
                price: baseline[0].price,
            },
        ];

        let (candidate, ignored) = align_sheet(&baseline, &sheet);
        assert_eq!(ignored, vec![99]);
        assert_eq!(candidate.len(), 3);
        assert_eq!(candidate[0], baseline[0]);
        assert_eq!(candidate[1], baseline[1]);
        assert_eq!(candidate[2].id, 3);
        assert_eq!(candidate[2].name, "C2");
        assert_eq!(candidate[2].quantity, 6);
        assert_eq!(candidate[2].price, 1.0);
    }
}
