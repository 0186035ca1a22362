//! Record normalization: converting wire-shape upload rows into
//! canonical domain records.
//!
//! Normalization is row-wise tolerant: a malformed row is rejected
//! individually with its index and reason, and the batch continues. The
//! caller receives the valid records together with the rejected-rows
//! report and decides whether to block the upload or proceed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use feeweb_ingest::{RawBatch, RawDemandRow, RawTransactionRow};
use feeweb_utils::{generate_txn_id, short_hash};

use super::models::{Demand, FeeHead, LedgerKey, PayMode, StudentInfo, Transaction, TxnType};

/// Which record family a rejected row belonged to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Demand,
    Transaction,
}

/// One rejected upload row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedRow {
    /// Zero-based index of the row in its upload section
    pub index: usize,
    /// Record family the row belonged to
    pub kind: RecordKind,
    /// Why the row was rejected
    pub reason: String,
}

/// Normalization result: valid records plus the rejected-rows report
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub demands: Vec<Demand>,
    pub transactions: Vec<Transaction>,
    pub students: Vec<StudentInfo>,
    pub fee_heads: Vec<FeeHead>,
    pub rejected: Vec<RejectedRow>,
}

fn required_id(value: Option<&String>, field: &str) -> Result<String, String> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(format!("missing required field '{}'", field)),
    }
}

fn parse_amount(value: Option<Decimal>, present: bool) -> Result<Decimal, String> {
    if !present {
        return Err("missing required field 'amount'".to_string());
    }
    let amount = value.ok_or_else(|| "amount is not a number".to_string())?;
    if amount < Decimal::ZERO {
        return Err("amount must not be negative".to_string());
    }
    Ok(amount.round_dp(2))
}

fn parse_semester(value: Option<u8>, present: bool) -> Result<Option<u8>, String> {
    if !present {
        return Ok(None);
    }
    match value {
        Some(1) => Ok(Some(1)),
        Some(2) => Ok(Some(2)),
        Some(other) => Err(format!("semester must be 1 or 2, got {}", other)),
        None => Err("semester is not a number".to_string()),
    }
}

fn parse_student_year(value: Option<u8>, present: bool) -> Result<u8, String> {
    if !present {
        // Legacy uploads omit the year for single-year courses
        return Ok(1);
    }
    match value {
        Some(0) => Err("studentYear must be 1 or greater".to_string()),
        Some(year) => Ok(year),
        None => Err("studentYear is not a number".to_string()),
    }
}

/// Normalize one demand row
fn normalize_demand(row: &RawDemandRow) -> Result<Demand, String> {
    let student_id = required_id(row.student_id.as_ref(), "studentId")?;
    let fee_head_id = required_id(row.fee_head_id.as_ref(), "feeHeadId")?;
    let amount = parse_amount(row.amount_decimal(), row.amount.is_some())?;
    let student_year = parse_student_year(row.student_year_u8(), row.has_student_year())?;
    let semester = parse_semester(row.semester_u8(), row.has_semester())?;

    Ok(Demand {
        student_id,
        fee_head_id,
        academic_year: row.academic_year.clone(),
        student_year,
        semester,
        amount,
        category: row.category.clone(),
        scholarship_eligible: row.scholarship_eligible.unwrap_or(false),
    })
}

/// Normalize one transaction row
fn normalize_transaction(row: &RawTransactionRow) -> Result<Transaction, String> {
    let student_id = required_id(row.student_id.as_ref(), "studentId")?;
    let fee_head_id = required_id(row.fee_head_id.as_ref(), "feeHeadId")?;
    let amount = parse_amount(row.amount_decimal(), row.amount.is_some())?;
    let student_year = parse_student_year(row.student_year_u8(), row.has_student_year())?;
    let semester = parse_semester(row.semester_u8(), row.has_semester())?;

    let txn_type = match row.txn_type.as_deref() {
        None | Some("") => TxnType::Debit,
        Some(s) => s.parse::<TxnType>()?,
    };
    let mode = match row.mode.as_deref() {
        None | Some("") => PayMode::Cash,
        Some(s) => s.parse::<PayMode>()?,
    };

    let timestamp = match row.timestamp.as_deref() {
        Some(s) if !s.trim().is_empty() => row
            .timestamp_parsed()
            .ok_or_else(|| format!("unparsable timestamp '{}'", s))?,
        _ => return Err("missing required field 'timestamp'".to_string()),
    };

    let content = format!(
        "{} {} {} {} {} {}",
        student_id, fee_head_id, student_year, amount, txn_type, timestamp
    );
    let receipt_no = match row.receipt_no.as_deref() {
        Some(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => format!("RCP-{}", short_hash(&content)),
    };
    let id = match row.id.as_deref() {
        Some(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => generate_txn_id(&student_id, &receipt_no, &content),
    };

    Ok(Transaction {
        id,
        student_id,
        fee_head_id,
        student_year,
        semester,
        amount,
        txn_type,
        mode,
        cashier_id: row
            .cashier_id
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "unknown".to_string()),
        college: row
            .college
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "unknown".to_string()),
        timestamp,
        receipt_no,
    })
}

/// Normalize a raw batch into domain records.
///
/// Duplicate demand keys within a batch are summed, not overwritten —
/// multiple demand rows for the same head/year are legitimate partial
/// charges. The first-seen row supplies the descriptive fields and the
/// output position.
pub fn normalize(batch: &RawBatch) -> NormalizedBatch {
    let mut out = NormalizedBatch::default();

    let mut demand_slots: HashMap<(String, LedgerKey), usize> = HashMap::new();
    for (index, row) in batch.demands.iter().enumerate() {
        match normalize_demand(row) {
            Ok(demand) => {
                let slot_key = (demand.student_id.clone(), demand.ledger_key());
                match demand_slots.get(&slot_key) {
                    Some(&slot) => out.demands[slot].amount += demand.amount,
                    None => {
                        demand_slots.insert(slot_key, out.demands.len());
                        out.demands.push(demand);
                    }
                }
            }
            Err(reason) => out.rejected.push(RejectedRow {
                index,
                kind: RecordKind::Demand,
                reason,
            }),
        }
    }

    for (index, row) in batch.transactions.iter().enumerate() {
        match normalize_transaction(row) {
            Ok(txn) => out.transactions.push(txn),
            Err(reason) => out.rejected.push(RejectedRow {
                index,
                kind: RecordKind::Transaction,
                reason,
            }),
        }
    }

    for row in &batch.students {
        match row.id.as_deref() {
            Some(id) if !id.trim().is_empty() => out.students.push(StudentInfo {
                id: id.trim().to_string(),
                name: row.name.clone().unwrap_or_default(),
                college: row.college.clone().unwrap_or_default(),
                course: row.course.clone().unwrap_or_default(),
                branch: row.branch.clone().unwrap_or_default(),
                student_year: row.student_year_u8().unwrap_or(1),
                category: row.category.clone(),
            }),
            _ => log::warn!(target: "feeweb::normalize", "skipping student row without id"),
        }
    }

    for row in &batch.fee_heads {
        match row.id.as_deref() {
            Some(id) if !id.trim().is_empty() => out.fee_heads.push(FeeHead {
                id: id.trim().to_string(),
                name: row.name.clone().unwrap_or_else(|| id.trim().to_string()),
            }),
            _ => log::warn!(target: "feeweb::normalize", "skipping fee head row without id"),
        }
    }

    out
}

// ==================== Tests ====================
