//! Core data models for the fee ledger

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ==================== Enumerations ====================

/// Transaction type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnType {
    /// Fee collected (increases paid amount)
    Debit,
    /// Concession/waiver applied (decreases net paid amount)
    Credit,
}

impl std::str::FromStr for TxnType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debit" => Ok(TxnType::Debit),
            "credit" => Ok(TxnType::Credit),
            _ => Err(format!("Invalid transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TxnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TxnType::Debit => write!(f, "debit"),
            TxnType::Credit => write!(f, "credit"),
        }
    }
}

/// Payment mode enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayMode {
    /// Cash collection at the counter
    Cash,
    /// Bank transfer, DD, or gateway settlement
    Bank,
}

impl std::str::FromStr for PayMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cash" => Ok(PayMode::Cash),
            "bank" => Ok(PayMode::Bank),
            _ => Err(format!("Invalid payment mode: {}", s)),
        }
    }
}

impl std::fmt::Display for PayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayMode::Cash => write!(f, "cash"),
            PayMode::Bank => write!(f, "bank"),
        }
    }
}

// ==================== Ledger Key ====================

/// Composite reconciliation key: one ledger line per distinct key.
///
/// A transaction with `semester = None` settles only yearly demands
/// (`semester = None`); a concrete semester settles only the same semester.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LedgerKey {
    /// Fee head identifier
    pub fee_head_id: String,
    /// Student year of study (1-based)
    pub student_year: u8,
    /// Semester (1 or 2), or None for yearly fees
    pub semester: Option<u8>,
}

// ==================== Demand ====================

/// A standing fee obligation for one student, fee head, year, and semester
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Demand {
    /// Student identifier
    pub student_id: String,
    /// Fee head identifier
    pub fee_head_id: String,
    /// Academic year label (e.g., "2025-26"), if recorded
    pub academic_year: Option<String>,
    /// Student year of study (1-based)
    pub student_year: u8,
    /// Semester (1 or 2), or None for yearly fees
    pub semester: Option<u8>,
    /// Demanded amount (non-negative)
    pub amount: Decimal,
    /// Fee category (e.g., "regular", "management")
    pub category: Option<String>,
    /// Whether a scholarship may offset this demand
    pub scholarship_eligible: bool,
}

impl Demand {
    /// Get the reconciliation key for this demand
    pub fn ledger_key(&self) -> LedgerKey {
        LedgerKey {
            fee_head_id: self.fee_head_id.clone(),
            student_year: self.student_year,
            semester: self.semester,
        }
    }
}

// ==================== Transaction ====================

/// A single recorded money movement against a student's account.
///
/// Append-only: corrections are new offsetting transactions, never edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier
    pub id: String,
    /// Student identifier
    pub student_id: String,
    /// Fee head identifier
    pub fee_head_id: String,
    /// Student year of study (1-based)
    pub student_year: u8,
    /// Semester (1 or 2), or None for yearly fees
    pub semester: Option<u8>,
    /// Amount magnitude (non-negative; direction comes from `txn_type`)
    pub amount: Decimal,
    /// Debit (collection) or Credit (concession)
    pub txn_type: TxnType,
    /// Cash or Bank
    pub mode: PayMode,
    /// Cashier who recorded the transaction
    pub cashier_id: String,
    /// College the student belongs to
    pub college: String,
    /// Collection timestamp (institution-local)
    pub timestamp: NaiveDateTime,
    /// Printed receipt number
    pub receipt_no: String,
}

impl Transaction {
    /// Get the reconciliation key for this transaction
    pub fn ledger_key(&self) -> LedgerKey {
        LedgerKey {
            fee_head_id: self.fee_head_id.clone(),
            student_year: self.student_year,
            semester: self.semester,
        }
    }

    /// Get the calendar date of the transaction
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Signed amount: positive for Debit, negative for Credit
    pub fn signed_amount(&self) -> Decimal {
        match self.txn_type {
            TxnType::Debit => self.amount,
            TxnType::Credit => -self.amount,
        }
    }

    /// Check whether this is a cash collection (Debit in Cash mode)
    pub fn is_cash_collection(&self) -> bool {
        self.txn_type == TxnType::Debit && self.mode == PayMode::Cash
    }
}

// ==================== Ledger Line ====================

/// The reconciled demand-vs-paid position for one ledger key.
///
/// Derived, never stored. `fee_head_id` is None only on the synthetic
/// masked line produced by the receipt mask transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerLine {
    /// Fee head identifier (None on the synthetic masked line)
    pub fee_head_id: Option<String>,
    /// Display name (fee head name, or the mask name)
    pub name: String,
    /// Student year of study (None on the synthetic masked line)
    pub student_year: Option<u8>,
    /// Semester, or None for yearly fees
    pub semester: Option<u8>,
    /// Total demanded amount for the key
    pub demand_amount: Decimal,
    /// Paid amount floored at zero for display
    pub paid_amount: Decimal,
    /// Unclamped signed paid total (Debit − Credit), kept for diagnostics
    pub net_paid: Decimal,
    /// Outstanding amount, floored at zero
    pub due_amount: Decimal,
    /// Whether more was paid than demanded
    pub is_overpaid: bool,
    /// Debit amount collected in cash
    pub cash_amount: Decimal,
    /// Debit amount collected through bank
    pub bank_amount: Decimal,
}

// ==================== Receipt Setting ====================

/// Receipt display configuration (singleton, admin-managed).
///
/// Absence of a stored setting is equivalent to the defaults; updates use
/// upsert semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptSetting {
    /// Print the college header block on receipts
    #[serde(default = "default_show_college_header")]
    pub show_college_header: bool,
    /// Fee heads collapsed into the mask line on printed receipts
    #[serde(default)]
    pub masked_fee_head_ids: HashSet<String>,
    /// Display name of the collapsed mask line
    #[serde(default = "default_mask_name")]
    pub mask_name: String,
}

fn default_show_college_header() -> bool {
    true
}

fn default_mask_name() -> String {
    "Processing Fee".to_string()
}

impl Default for ReceiptSetting {
    fn default() -> Self {
        Self {
            show_college_header: default_show_college_header(),
            masked_fee_head_ids: HashSet::new(),
            mask_name: default_mask_name(),
        }
    }
}

impl ReceiptSetting {
    /// Check whether a ledger line's fee head falls under the mask
    pub fn is_masked(&self, fee_head_id: Option<&str>) -> bool {
        match fee_head_id {
            Some(id) => self.masked_fee_head_ids.contains(id),
            None => false,
        }
    }
}

// ==================== Directory Records ====================

/// Student directory record, used only to enrich report labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentInfo {
    /// Student identifier
    pub id: String,
    /// Student name
    pub name: String,
    /// College
    pub college: String,
    /// Course (e.g., "B.Tech")
    pub course: String,
    /// Branch (e.g., "CSE")
    pub branch: String,
    /// Student year of study
    pub student_year: u8,
    /// Admission category
    pub category: Option<String>,
}

/// Fee head directory record (name resolution only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeHead {
    /// Fee head identifier
    pub id: String,
    /// Display name
    pub name: String,
}

// ==================== Tests ====================
