//! Core ledger processing and business logic
//!
//! The `FeeLedger` store holds the already-fetched demand/transaction
//! slices plus the directory used for label enrichment. All ledger
//! computation (reconciliation, aggregation, masking) is pure and lives
//! in the submodules; the store supplies snapshots, enforces append-only
//! transaction writes, and applies the report fetch-boundary guards.

pub mod aggregate;
pub mod error;
pub mod mask;
pub mod models;
pub mod normalize;
pub mod reconcile;
pub mod reports;
pub mod time;

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::PathBuf;

use feeweb_config::Config;
use feeweb_ingest::SourceRef;
use feeweb_utils::{generate_receipt_no, generate_txn_id};

pub use aggregate::{aggregate, totals, GroupBy};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorSeverity};
pub use mask::apply_mask;
pub use models::{
    Demand, FeeHead, LedgerKey, LedgerLine, PayMode, ReceiptSetting, StudentInfo, Transaction,
    TxnType,
};
pub use normalize::{normalize, NormalizedBatch, RecordKind, RejectedRow};
pub use reconcile::{reconcile, LedgerScope};
pub use reports::{
    CollectionReport, DashboardSummary, DemandsResponse, FeeHeadBreakdown, LedgerResponse,
    PeriodSummary, RankEntry, ReportBucket, ReportTotals, StoreSummary, TransactionsResponse,
};
pub use time::{DateFilter, RangeKind, ReportRange};

// ==================== Transaction Filter ====================

/// Filter for transaction range/attribute queries
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub student_id: Option<String>,
    pub cashier_id: Option<String>,
    pub fee_head_id: Option<String>,
    pub college: Option<String>,
    pub start: Option<chrono::NaiveDate>,
    pub end: Option<chrono::NaiveDate>,
}

impl TransactionFilter {
    fn matches(&self, txn: &Transaction) -> bool {
        if let Some(ref student_id) = self.student_id {
            if txn.student_id != *student_id {
                return false;
            }
        }
        if let Some(ref cashier_id) = self.cashier_id {
            if txn.cashier_id != *cashier_id {
                return false;
            }
        }
        if let Some(ref fee_head_id) = self.fee_head_id {
            if txn.fee_head_id != *fee_head_id {
                return false;
            }
        }
        if let Some(ref college) = self.college {
            if txn.college != *college {
                return false;
            }
        }
        if let Some(start) = self.start {
            if txn.date() < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if txn.date() > end {
                return false;
            }
        }
        true
    }
}

// ==================== Fee Ledger Store ====================

/// In-memory fee ledger store.
///
/// Transactions are append-only: corrections are new offsetting rows,
/// never edits. Demands change only through `add_demands` and the
/// explicit `supersede_demand` write. The receipt setting is a singleton
/// with get-or-default reads and upsert writes.
pub struct FeeLedger {
    config: Config,
    source: SourceRef,
    entry: Option<PathBuf>,
    demands: Vec<Demand>,
    transactions: Vec<Transaction>,
    students: HashMap<String, StudentInfo>,
    fee_heads: HashMap<String, String>,
    receipt_setting: Option<ReceiptSetting>,
    receipt_counter: u64,
}

impl FeeLedger {
    /// Create an empty store with config and record source
    pub fn new(config: Config, source: SourceRef) -> Self {
        Self {
            config,
            source,
            entry: None,
            demands: Vec::new(),
            transactions: Vec::new(),
            students: HashMap::new(),
            fee_heads: HashMap::new(),
            receipt_setting: None,
            receipt_counter: 1,
        }
    }

    /// Get the store configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ==================== Seeding ====================

    /// Load the store from a seed file, replacing current contents.
    ///
    /// Rejected rows are logged and dropped; seeding is tolerant the same
    /// way bulk uploads are.
    pub async fn load(&mut self, entry: PathBuf) -> Result<(), CoreError> {
        let batch = self
            .source
            .read_file(entry.clone())
            .await
            .map_err(|e| CoreError::LoadError {
                message: e.to_string(),
            })?;

        let normalized = normalize::normalize(&batch);
        if !normalized.rejected.is_empty() {
            log::warn!(
                target: "feeweb::store",
                "seed load: {} row(s) rejected",
                normalized.rejected.len()
            );
            for row in &normalized.rejected {
                log::warn!(
                    target: "feeweb::store",
                    "  rejected {:?} row {}: {}",
                    row.kind,
                    row.index,
                    row.reason
                );
            }
        }

        self.entry = Some(entry);
        self.install(normalized);
        Ok(())
    }

    /// Reload the store from the last seed file
    pub async fn reload(&mut self) -> Result<(), CoreError> {
        match self.entry.clone() {
            Some(entry) if entry.exists() => self.load(entry).await,
            _ => Err(CoreError::NotLoaded),
        }
    }

    /// Replace store contents with a normalized batch
    pub fn install(&mut self, batch: NormalizedBatch) {
        self.demands = batch.demands;
        self.transactions = batch.transactions;
        self.students = batch
            .students
            .into_iter()
            .map(|s| (s.id.clone(), s))
            .collect();
        self.fee_heads = batch
            .fee_heads
            .into_iter()
            .map(|h| (h.id, h.name))
            .collect();
        log::info!(
            target: "feeweb::store",
            "installed {} demand(s), {} transaction(s), {} student(s), {} fee head(s)",
            self.demands.len(),
            self.transactions.len(),
            self.students.len(),
            self.fee_heads.len()
        );
    }

    // ==================== Demands ====================

    /// Append demands (bulk upload path; duplicates were summed upstream)
    pub fn add_demands(&mut self, demands: Vec<Demand>) {
        self.demands.extend(demands);
    }

    /// Replace every demand row matching the new demand's key.
    ///
    /// This is the explicit superseding write; reconciled demands are
    /// otherwise immutable.
    pub fn supersede_demand(&mut self, demand: Demand) {
        let key = demand.ledger_key();
        self.demands
            .retain(|d| d.student_id != demand.student_id || d.ledger_key() != key);
        self.demands.push(demand);
    }

    /// Append already-normalized transactions (bulk upload path)
    pub fn add_transactions(&mut self, transactions: Vec<Transaction>) {
        self.transactions.extend(transactions);
    }

    /// Merge directory rows into the lookup maps (last writer wins per id)
    pub fn merge_directory(&mut self, students: Vec<StudentInfo>, fee_heads: Vec<FeeHead>) {
        for student in students {
            self.students.insert(student.id.clone(), student);
        }
        for head in fee_heads {
            self.fee_heads.insert(head.id, head.name);
        }
    }

    /// Demands for one student
    pub fn demands_for(&self, student_id: &str) -> Vec<Demand> {
        self.demands
            .iter()
            .filter(|d| d.student_id == student_id)
            .cloned()
            .collect()
    }

    /// Total demand row count
    pub fn demand_count(&self) -> usize {
        self.demands.len()
    }

    // ==================== Transactions ====================

    /// Validate and append one transaction (atomic per-row insert).
    ///
    /// Missing id/receipt number are filled from the store's counter.
    /// Returns the stored row.
    pub fn record_transaction(&mut self, mut txn: Transaction) -> CoreResult<Transaction> {
        if txn.student_id.trim().is_empty() {
            return Err(CoreError::InvalidRecord {
                message: "studentId must be provided".to_string(),
            });
        }
        if txn.fee_head_id.trim().is_empty() {
            return Err(CoreError::InvalidRecord {
                message: "feeHeadId must be provided".to_string(),
            });
        }
        if txn.amount < Decimal::ZERO {
            return Err(CoreError::InvalidRecord {
                message: "amount must not be negative".to_string(),
            });
        }
        if txn.student_year == 0 {
            return Err(CoreError::InvalidRecord {
                message: "studentYear must be 1 or greater".to_string(),
            });
        }
        if let Some(semester) = txn.semester {
            if semester != 1 && semester != 2 {
                return Err(CoreError::InvalidRecord {
                    message: format!("semester must be 1 or 2, got {}", semester),
                });
            }
        }

        txn.amount = txn.amount.round_dp(2);
        if txn.receipt_no.trim().is_empty() {
            txn.receipt_no = generate_receipt_no(self.receipt_counter);
            self.receipt_counter += 1;
        }
        if txn.id.trim().is_empty() {
            let content = format!(
                "{} {} {} {}",
                txn.student_id, txn.fee_head_id, txn.amount, txn.timestamp
            );
            txn.id = generate_txn_id(&txn.student_id, &txn.receipt_no, &content);
        }

        self.transactions.push(txn.clone());
        Ok(txn)
    }

    /// Look up one transaction by id
    pub fn transaction(&self, id: &str) -> Option<Transaction> {
        self.transactions.iter().find(|t| t.id == id).cloned()
    }

    /// Transactions matching a filter
    pub fn filter_transactions(&self, filter: &TransactionFilter) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect()
    }

    /// Total transaction count
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Most recent transactions, newest first
    pub fn recent_transactions(&self, count: usize) -> Vec<Transaction> {
        let mut sorted: Vec<Transaction> = self.transactions.clone();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sorted.truncate(count);
        sorted
    }

    // ==================== Ledger Views ====================

    /// Reconciled ledger for a scope, with directory-enriched names
    pub fn ledger_for(&self, scope: &LedgerScope) -> CoreResult<LedgerResponse> {
        let mut lines = reconcile(&self.demands, &self.transactions, scope)?;
        for line in &mut lines {
            if let Some(ref id) = line.fee_head_id {
                if let Some(name) = self.fee_heads.get(id) {
                    line.name = name.clone();
                }
            }
        }
        Ok(self.ledger_response(scope, lines, false))
    }

    /// Reconciled ledger with the receipt mask applied.
    ///
    /// This is the view handed to receipt printing; the mask never
    /// changes the stored ledger.
    pub fn masked_ledger_for(&self, scope: &LedgerScope) -> CoreResult<LedgerResponse> {
        let setting = self.receipt_setting();
        let unmasked = self.ledger_for(scope)?;
        let lines = apply_mask(unmasked.lines, &setting);
        Ok(self.ledger_response(scope, lines, true))
    }

    fn ledger_response(
        &self,
        scope: &LedgerScope,
        lines: Vec<LedgerLine>,
        masked: bool,
    ) -> LedgerResponse {
        let total_demand: Decimal = lines.iter().map(|l| l.demand_amount).sum();
        let total_paid: Decimal = lines.iter().map(|l| l.paid_amount).sum();
        let total_due: Decimal = lines.iter().map(|l| l.due_amount).sum();
        LedgerResponse {
            student_id: scope.student_id.clone(),
            student: self.students.get(&scope.student_id).cloned(),
            lines,
            total_demand,
            total_paid,
            total_due,
            masked,
        }
    }

    // ==================== Reports ====================

    /// Collection report over a range and grouping dimension.
    ///
    /// The range/row ceilings from `ReportsConfig` are enforced here, at
    /// the fetch boundary, before the pure aggregation runs.
    pub fn collection_report(
        &self,
        range: &ReportRange,
        group_by: GroupBy,
    ) -> CoreResult<CollectionReport> {
        if let Some(days) = range.span_days() {
            if days > self.config.reports.max_range_days {
                return Err(CoreError::RangeTooLarge {
                    reason: format!(
                        "range covers {} days, ceiling is {}",
                        days, self.config.reports.max_range_days
                    ),
                });
            }
        }

        let scanned = self
            .transactions
            .iter()
            .filter(|t| range.contains(&t.date()))
            .count();
        if scanned > self.config.reports.max_scan_rows {
            return Err(CoreError::RangeTooLarge {
                reason: format!(
                    "range matches {} rows, ceiling is {}",
                    scanned, self.config.reports.max_scan_rows
                ),
            });
        }

        let mut buckets = aggregate(&self.transactions, range, group_by);
        self.enrich_buckets(&mut buckets, group_by);
        let report_totals = totals(&buckets);

        Ok(CollectionReport {
            group_by: group_by.to_string(),
            start_date: range.start_date().map(|d| d.to_string()),
            end_date: range.end_date().map(|d| d.to_string()),
            buckets,
            totals: report_totals,
        })
    }

    fn enrich_buckets(&self, buckets: &mut [ReportBucket], group_by: GroupBy) {
        for bucket in buckets.iter_mut() {
            if group_by == GroupBy::FeeHead {
                bucket.label = self.fee_heads.get(&bucket.group_key).cloned();
            }
            for head in &mut bucket.fee_heads {
                head.name = self.fee_heads.get(&head.fee_head_id).cloned();
            }
        }
    }

    /// Dashboard summary: fixed-range totals, recent transactions, and
    /// top collections by college and course
    pub fn dashboard_summary(&self) -> DashboardSummary {
        let today = self.period_summary(ReportRange::new(RangeKind::Today));
        let month = self.period_summary(ReportRange::new(RangeKind::Month));
        let overall = self.period_summary(ReportRange::new(RangeKind::All));

        let recent = self.recent_transactions(self.config.reports.recent_count);

        let mut by_college: HashMap<String, (Decimal, usize)> = HashMap::new();
        let mut by_course: HashMap<String, (Decimal, usize)> = HashMap::new();
        for txn in &self.transactions {
            let college = by_college.entry(txn.college.clone()).or_default();
            college.0 += txn.signed_amount();
            college.1 += 1;

            let course = self
                .students
                .get(&txn.student_id)
                .map(|s| s.course.clone())
                .unwrap_or_else(|| "unknown".to_string());
            let course_entry = by_course.entry(course).or_default();
            course_entry.0 += txn.signed_amount();
            course_entry.1 += 1;
        }

        DashboardSummary {
            today,
            month,
            overall,
            recent_transactions: recent,
            top_colleges: Self::rank(by_college, self.config.reports.top_items_count),
            top_courses: Self::rank(by_course, self.config.reports.top_items_count),
        }
    }

    fn period_summary(&self, range: ReportRange) -> PeriodSummary {
        let buckets = aggregate(&self.transactions, &range, GroupBy::Mode);
        PeriodSummary {
            label: range.description(),
            totals: totals(&buckets),
        }
    }

    fn rank(map: HashMap<String, (Decimal, usize)>, top: usize) -> Vec<RankEntry> {
        let mut entries: Vec<RankEntry> = map
            .into_iter()
            .map(|(name, (amount, count))| RankEntry {
                name,
                amount,
                count,
            })
            .collect();
        entries.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.name.cmp(&b.name)));
        entries.truncate(top);
        entries
    }

    // ==================== Receipt Setting ====================

    /// Get the receipt setting, or defaults if none was stored
    pub fn receipt_setting(&self) -> ReceiptSetting {
        self.receipt_setting.clone().unwrap_or_default()
    }

    /// Upsert the receipt setting (last writer wins) and return it
    pub fn update_receipt_setting(&mut self, setting: ReceiptSetting) -> ReceiptSetting {
        self.receipt_setting = Some(setting);
        self.receipt_setting()
    }

    // ==================== Summary ====================

    /// Store-level counts
    pub fn summary(&self) -> StoreSummary {
        StoreSummary {
            demand_count: self.demands.len(),
            transaction_count: self.transactions.len(),
            student_count: self.students.len(),
            fee_head_count: self.fee_heads.len(),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use feeweb_ingest::JsonRecordSource;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn store() -> FeeLedger {
        FeeLedger::new(Config::default(), Arc::new(JsonRecordSource))
    }

    fn txn(student: &str, fee_head: &str, amount: i64, txn_type: TxnType) -> Transaction {
        Transaction {
            id: String::new(),
            student_id: student.to_string(),
            fee_head_id: fee_head.to_string(),
            student_year: 1,
            semester: None,
            amount: Decimal::from(amount),
            txn_type,
            mode: PayMode::Cash,
            cashier_id: "c1".to_string(),
            college: "ENG".to_string(),
            timestamp: NaiveDate::from_ymd_opt(2026, 7, 10)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            receipt_no: String::new(),
        }
    }

    fn demand(student: &str, fee_head: &str, amount: i64) -> Demand {
        Demand {
            student_id: student.to_string(),
            fee_head_id: fee_head.to_string(),
            academic_year: None,
            student_year: 1,
            semester: None,
            amount: Decimal::from(amount),
            category: None,
            scholarship_eligible: false,
        }
    }

    #[test]
    fn test_record_transaction_fills_ids() {
        let mut store = store();
        let stored = store
            .record_transaction(txn("s1", "TUITION", 1000, TxnType::Debit))
            .unwrap();
        assert!(stored.id.starts_with("txn-"));
        assert_eq!(stored.receipt_no, "RCP-00000001");
        assert_eq!(store.transaction_count(), 1);
        assert_eq!(store.transaction(&stored.id).unwrap().id, stored.id);

        let second = store
            .record_transaction(txn("s2", "TUITION", 500, TxnType::Debit))
            .unwrap();
        assert_eq!(second.receipt_no, "RCP-00000002");
    }

    #[test]
    fn test_record_transaction_validates() {
        let mut store = store();

        let mut bad = txn("", "TUITION", 1000, TxnType::Debit);
        bad.student_id = String::new();
        assert!(store.record_transaction(bad).is_err());

        let mut bad = txn("s1", "TUITION", 1000, TxnType::Debit);
        bad.amount = Decimal::from(-1);
        assert!(store.record_transaction(bad).is_err());

        let mut bad = txn("s1", "TUITION", 1000, TxnType::Debit);
        bad.semester = Some(3);
        assert!(store.record_transaction(bad).is_err());

        assert_eq!(store.transaction_count(), 0);
    }

    #[test]
    fn test_supersede_demand_replaces_key() {
        let mut store = store();
        store.add_demands(vec![demand("s1", "TUITION", 50000), demand("s1", "HOSTEL", 20000)]);

        store.supersede_demand(demand("s1", "TUITION", 45000));
        let demands = store.demands_for("s1");
        assert_eq!(demands.len(), 2);
        let tuition = demands.iter().find(|d| d.fee_head_id == "TUITION").unwrap();
        assert_eq!(tuition.amount, Decimal::from(45000));
    }

    #[test]
    fn test_ledger_for_enriches_names() {
        let mut store = store();
        store.install(NormalizedBatch {
            demands: vec![demand("s1", "TUITION", 50000)],
            fee_heads: vec![FeeHead {
                id: "TUITION".to_string(),
                name: "Tuition Fee".to_string(),
            }],
            ..Default::default()
        });

        let response = store.ledger_for(&LedgerScope::student("s1")).unwrap();
        assert_eq!(response.lines[0].name, "Tuition Fee");
        assert_eq!(response.total_demand, Decimal::from(50000));
        assert_eq!(response.total_due, Decimal::from(50000));
        assert!(!response.masked);
    }

    #[test]
    fn test_masked_ledger_composes_mask() {
        let mut store = store();
        store.add_demands(vec![demand("s1", "TUITION", 50000), demand("s1", "DEV", 800)]);
        store.update_receipt_setting(ReceiptSetting {
            show_college_header: true,
            masked_fee_head_ids: ["DEV".to_string()].into_iter().collect::<HashSet<_>>(),
            mask_name: "Processing Fee".to_string(),
        });

        let response = store.masked_ledger_for(&LedgerScope::student("s1")).unwrap();
        assert!(response.masked);
        assert_eq!(response.lines.len(), 2);
        let synthetic = response.lines.last().unwrap();
        assert_eq!(synthetic.fee_head_id, None);
        assert_eq!(synthetic.name, "Processing Fee");
        assert_eq!(synthetic.demand_amount, Decimal::from(800));
        // Totals are unchanged by the mask
        assert_eq!(response.total_demand, Decimal::from(50800));
    }

    #[test]
    fn test_receipt_setting_get_or_default_and_upsert() {
        let mut store = store();
        assert_eq!(store.receipt_setting(), ReceiptSetting::default());

        let updated = store.update_receipt_setting(ReceiptSetting {
            show_college_header: false,
            masked_fee_head_ids: HashSet::new(),
            mask_name: "Misc Fee".to_string(),
        });
        assert_eq!(updated.mask_name, "Misc Fee");
        assert!(!store.receipt_setting().show_college_header);
    }

    #[test]
    fn test_collection_report_range_guard() {
        let mut store = FeeLedger::new(
            {
                let mut config = Config::default();
                config.reports.max_range_days = 31;
                config
            },
            Arc::new(JsonRecordSource),
        );
        store.record_transaction(txn("s1", "TUITION", 1000, TxnType::Debit)).unwrap();

        let wide = ReportRange::custom(
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        );
        let err = store.collection_report(&wide, GroupBy::Day).unwrap_err();
        assert!(matches!(err, CoreError::RangeTooLarge { .. }));

        let narrow = ReportRange::custom(
            NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 7, 31).unwrap(),
        );
        let report = store.collection_report(&narrow, GroupBy::Day).unwrap();
        assert_eq!(report.totals.total_amount, Decimal::from(1000));
    }

    #[test]
    fn test_collection_report_row_guard() {
        let mut store = FeeLedger::new(
            {
                let mut config = Config::default();
                config.reports.max_scan_rows = 1;
                config
            },
            Arc::new(JsonRecordSource),
        );
        store.record_transaction(txn("s1", "TUITION", 1000, TxnType::Debit)).unwrap();
        store.record_transaction(txn("s2", "TUITION", 500, TxnType::Debit)).unwrap();

        let err = store
            .collection_report(&ReportRange::default(), GroupBy::Cashier)
            .unwrap_err();
        assert!(matches!(err, CoreError::RangeTooLarge { .. }));
    }

    #[test]
    fn test_filter_transactions() {
        let mut store = store();
        store.record_transaction(txn("s1", "TUITION", 1000, TxnType::Debit)).unwrap();
        store.record_transaction(txn("s2", "HOSTEL", 500, TxnType::Debit)).unwrap();

        let filter = TransactionFilter {
            student_id: Some("s1".to_string()),
            ..Default::default()
        };
        assert_eq!(store.filter_transactions(&filter).len(), 1);

        let filter = TransactionFilter {
            fee_head_id: Some("HOSTEL".to_string()),
            ..Default::default()
        };
        assert_eq!(store.filter_transactions(&filter).len(), 1);

        let filter = TransactionFilter {
            end: Some(NaiveDate::from_ymd_opt(2026, 7, 9).unwrap()),
            ..Default::default()
        };
        assert!(store.filter_transactions(&filter).is_empty());
    }

    #[test]
    fn test_recent_transactions_newest_first() {
        let mut store = store();
        let mut old = txn("s1", "TUITION", 100, TxnType::Debit);
        old.timestamp = NaiveDate::from_ymd_opt(2026, 7, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        store.record_transaction(old).unwrap();
        store.record_transaction(txn("s2", "TUITION", 200, TxnType::Debit)).unwrap();

        let recent = store.recent_transactions(1);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].student_id, "s2");
    }

    #[test]
    fn test_dashboard_summary_totals() {
        let mut store = store();
        store.install(NormalizedBatch {
            students: vec![StudentInfo {
                id: "s1".to_string(),
                name: "A. Kumar".to_string(),
                college: "ENG".to_string(),
                course: "B.Tech".to_string(),
                branch: "CSE".to_string(),
                student_year: 1,
                category: None,
            }],
            ..Default::default()
        });
        store.record_transaction(txn("s1", "TUITION", 1000, TxnType::Debit)).unwrap();
        store.record_transaction(txn("s1", "TUITION", 200, TxnType::Credit)).unwrap();

        let dashboard = store.dashboard_summary();
        assert_eq!(dashboard.overall.totals.total_amount, Decimal::from(800));
        assert_eq!(dashboard.overall.totals.count, 2);
        assert_eq!(dashboard.top_colleges[0].name, "ENG");
        assert_eq!(dashboard.top_courses[0].name, "B.Tech");
        assert_eq!(dashboard.recent_transactions.len(), 2);
    }

    #[tokio::test]
    async fn test_load_and_reload_from_seed_file() {
        let path = std::env::temp_dir().join("feeweb-core-seed-test.json");
        std::fs::write(
            &path,
            r#"{
                "demands": [{"studentId": "s1", "feeHeadId": "TUITION", "amount": "50000"}],
                "transactions": [],
                "students": [],
                "feeHeads": [{"id": "TUITION", "name": "Tuition Fee"}]
            }"#,
        )
        .unwrap();

        let mut store = store();
        store.load(path.clone()).await.unwrap();
        assert_eq!(store.demand_count(), 1);
        assert_eq!(store.summary().fee_head_count, 1);

        store.reload().await.unwrap();
        assert_eq!(store.demand_count(), 1);

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_reload_without_seed_fails() {
        let mut store = store();
        let err = store.reload().await.unwrap_err();
        assert!(matches!(err, CoreError::NotLoaded));
    }

    #[test]
    fn test_summary_counts() {
        let mut store = store();
        store.add_demands(vec![demand("s1", "TUITION", 50000)]);
        store.record_transaction(txn("s1", "TUITION", 1000, TxnType::Debit)).unwrap();

        let summary = store.summary();
        assert_eq!(summary.demand_count, 1);
        assert_eq!(summary.transaction_count, 1);
        assert_eq!(summary.student_count, 0);
    }
}
