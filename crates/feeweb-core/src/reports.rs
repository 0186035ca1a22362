//! Report structures for API responses

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::models::{LedgerLine, StudentInfo, Transaction};

/// Mode/type totals shared by buckets and report footers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub count: usize,
    pub cash_amount: Decimal,
    pub bank_amount: Decimal,
    pub debit_amount: Decimal,
    pub credit_amount: Decimal,
    pub total_amount: Decimal,
}

/// Per-fee-head split inside a cashier bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeHeadBreakdown {
    pub fee_head_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub count: usize,
    pub cash_amount: Decimal,
    pub bank_amount: Decimal,
    pub debit_amount: Decimal,
    pub credit_amount: Decimal,
    pub total_amount: Decimal,
    /// Net collection per college for this fee head
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub colleges: BTreeMap<String, Decimal>,
}

/// Aggregated collection totals for one grouping key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportBucket {
    /// Grouping key: a date, cashier id, fee head id, or mode name
    pub group_key: String,
    /// Enriched display label, when the directory can resolve one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub count: usize,
    pub cash_amount: Decimal,
    pub bank_amount: Decimal,
    pub debit_amount: Decimal,
    pub credit_amount: Decimal,
    pub total_amount: Decimal,
    /// Fee-head split (cashier grouping only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fee_heads: Vec<FeeHeadBreakdown>,
    /// Net collection per college (fee-head grouping only)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub colleges: BTreeMap<String, Decimal>,
}

/// Collection report response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionReport {
    pub group_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub buckets: Vec<ReportBucket>,
    pub totals: ReportTotals,
}

/// Fixed-range totals for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub label: String,
    pub totals: ReportTotals,
}

/// Ranked dashboard entry (college or course)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankEntry {
    pub name: String,
    pub amount: Decimal,
    pub count: usize,
}

/// Dashboard summary response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub today: PeriodSummary,
    pub month: PeriodSummary,
    pub overall: PeriodSummary,
    pub recent_transactions: Vec<Transaction>,
    pub top_colleges: Vec<RankEntry>,
    pub top_courses: Vec<RankEntry>,
}

/// Reconciled ledger response for one student
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerResponse {
    pub student_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<StudentInfo>,
    pub lines: Vec<LedgerLine>,
    pub total_demand: Decimal,
    pub total_paid: Decimal,
    pub total_due: Decimal,
    /// Whether the receipt mask was applied to these lines
    pub masked: bool,
}

/// Transactions list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
    pub total_count: usize,
    pub page: usize,
    pub per_page: usize,
}

/// Demands list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandsResponse {
    pub demands: Vec<super::models::Demand>,
    pub total_count: usize,
}

/// Store summary counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSummary {
    pub demand_count: usize,
    pub transaction_count: usize,
    pub student_count: usize,
    pub fee_head_count: usize,
}
