//! Ledger reconciliation: merging demand and transaction sets into
//! per-key ledger lines.
//!
//! Reconciliation is a pure two-pass fold: demands are indexed by
//! `LedgerKey`, transactions are folded into a parallel index, and one
//! line is emitted for every key in the union of the two key sets. Over-
//! and under-payment are reported states, never errors.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::error::CoreError;
use super::models::{Demand, LedgerKey, LedgerLine, PayMode, Transaction, TxnType};

/// Scope narrowing for a reconciliation call.
///
/// `student_id` is required; the remaining fields narrow the emitted key
/// set. `semester` selects concrete semesters only — yearly lines are a
/// presentation-side filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerScope {
    /// Student whose ledger is being reconciled
    pub student_id: String,
    /// Restrict to one fee head
    #[serde(default)]
    pub fee_head_id: Option<String>,
    /// Restrict to one student year
    #[serde(default)]
    pub student_year: Option<u8>,
    /// Restrict to one semester
    #[serde(default)]
    pub semester: Option<u8>,
}

impl LedgerScope {
    /// Scope covering a student's full ledger
    pub fn student(student_id: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            ..Default::default()
        }
    }

    fn admits_key(&self, student_id: &str, key: &LedgerKey) -> bool {
        if student_id != self.student_id {
            return false;
        }
        if let Some(ref fee_head_id) = self.fee_head_id {
            if key.fee_head_id != *fee_head_id {
                return false;
            }
        }
        if let Some(student_year) = self.student_year {
            if key.student_year != student_year {
                return false;
            }
        }
        if let Some(semester) = self.semester {
            if key.semester != Some(semester) {
                return false;
            }
        }
        true
    }
}

/// Per-key paid accumulator
#[derive(Debug, Default, Clone, Copy)]
struct PaidAccum {
    net: Decimal,
    cash: Decimal,
    bank: Decimal,
}

/// Reconcile demand and transaction sets into ledger lines.
///
/// For every key in the union of the demand key set and the transaction
/// key set, one `LedgerLine` is emitted in key order. Demand keys with no
/// transactions appear with `paid = 0`; transaction keys with no demand
/// appear with `demand = 0` (ad hoc collections are never dropped).
///
/// The only error is a structurally invalid scope; mismatched amounts are
/// valid ledger states surfaced through `due_amount`, `is_overpaid`, and
/// the unclamped `net_paid`.
pub fn reconcile(
    demands: &[Demand],
    transactions: &[Transaction],
    scope: &LedgerScope,
) -> Result<Vec<LedgerLine>, CoreError> {
    if scope.student_id.trim().is_empty() {
        return Err(CoreError::InvalidScope {
            message: "studentId must be provided".to_string(),
        });
    }

    // First pass: index demands, summing amounts per key
    let mut demand_index: BTreeMap<LedgerKey, Decimal> = BTreeMap::new();
    for demand in demands {
        let key = demand.ledger_key();
        if scope.admits_key(&demand.student_id, &key) {
            *demand_index.entry(key).or_default() += demand.amount;
        }
    }

    // Second pass: fold transactions into a parallel index
    let mut paid_index: BTreeMap<LedgerKey, PaidAccum> = BTreeMap::new();
    for txn in transactions {
        let key = txn.ledger_key();
        if !scope.admits_key(&txn.student_id, &key) {
            continue;
        }
        let accum = paid_index.entry(key).or_default();
        accum.net += txn.signed_amount();
        if txn.txn_type == TxnType::Debit {
            match txn.mode {
                PayMode::Cash => accum.cash += txn.amount,
                PayMode::Bank => accum.bank += txn.amount,
            }
        }
    }

    // Emit one line per key in the union, in key order
    let mut keys: BTreeSet<LedgerKey> = demand_index.keys().cloned().collect();
    keys.extend(paid_index.keys().cloned());

    let zero = Decimal::ZERO;
    let lines = keys
        .into_iter()
        .map(|key| {
            let demand_amount = demand_index.get(&key).copied().unwrap_or(zero);
            let accum = paid_index.get(&key).copied().unwrap_or_default();
            let net_paid = accum.net;
            let due_amount = (demand_amount - net_paid).max(zero);
            LedgerLine {
                fee_head_id: Some(key.fee_head_id.clone()),
                name: key.fee_head_id.clone(),
                student_year: Some(key.student_year),
                semester: key.semester,
                demand_amount,
                paid_amount: net_paid.max(zero),
                net_paid,
                due_amount,
                is_overpaid: net_paid > demand_amount,
                cash_amount: accum.cash,
                bank_amount: accum.bank,
            }
        })
        .collect();

    Ok(lines)
}

// ==================== Tests ====================
