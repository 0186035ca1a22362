//! Wire-shape types for the ingestion boundary.
//!
//! Upload rows arrive from upstream tooling in camelCase JSON with
//! inconsistent numeric encoding (string vs number) and optional fields.
//! The loose typing is confined to this module: rows expose typed
//! accessors, and everything past normalization is strictly typed.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A JSON value that may encode a number as a number or a string
fn value_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.trim().to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Coerce a loose JSON value into a decimal amount
pub fn value_to_decimal(value: &serde_json::Value) -> Option<Decimal> {
    let s = value_to_string(value)?;
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(&s).ok()
}

/// Coerce a loose JSON value into a small integer (year/semester)
pub fn value_to_u8(value: &serde_json::Value) -> Option<u8> {
    let s = value_to_string(value)?;
    if s.is_empty() {
        return None;
    }
    s.parse::<u8>().ok()
}

/// Parse an upload timestamp.
///
/// Accepted formats: "YYYY-MM-DD HH:MM:SS", "YYYY-MM-DDTHH:MM:SS", and a
/// bare "YYYY-MM-DD" (midnight).
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    None
}

/// Raw demand upload row
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawDemandRow {
    pub student_id: Option<String>,
    pub fee_head_id: Option<String>,
    pub academic_year: Option<String>,
    pub student_year: Option<serde_json::Value>,
    pub semester: Option<serde_json::Value>,
    pub amount: Option<serde_json::Value>,
    pub category: Option<String>,
    pub scholarship_eligible: Option<bool>,
}

impl RawDemandRow {
    /// Amount as a decimal, if present and parsable
    pub fn amount_decimal(&self) -> Option<Decimal> {
        self.amount.as_ref().and_then(value_to_decimal)
    }

    /// Student year, if present and parsable
    pub fn student_year_u8(&self) -> Option<u8> {
        self.student_year.as_ref().and_then(value_to_u8)
    }

    /// Semester, if present and parsable
    pub fn semester_u8(&self) -> Option<u8> {
        self.semester.as_ref().and_then(value_to_u8)
    }

    /// Whether the semester field was supplied at all (null counts as absent)
    pub fn has_semester(&self) -> bool {
        matches!(
            self.semester,
            Some(ref v) if !v.is_null()
        )
    }

    /// Whether the student year field was supplied at all
    pub fn has_student_year(&self) -> bool {
        matches!(
            self.student_year,
            Some(ref v) if !v.is_null()
        )
    }
}

/// Raw transaction upload row
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTransactionRow {
    pub id: Option<String>,
    pub student_id: Option<String>,
    pub fee_head_id: Option<String>,
    pub student_year: Option<serde_json::Value>,
    pub semester: Option<serde_json::Value>,
    pub amount: Option<serde_json::Value>,
    #[serde(rename = "type")]
    pub txn_type: Option<String>,
    pub mode: Option<String>,
    pub cashier_id: Option<String>,
    pub college: Option<String>,
    pub timestamp: Option<String>,
    pub receipt_no: Option<String>,
}

impl RawTransactionRow {
    /// Amount as a decimal, if present and parsable
    pub fn amount_decimal(&self) -> Option<Decimal> {
        self.amount.as_ref().and_then(value_to_decimal)
    }

    /// Student year, if present and parsable
    pub fn student_year_u8(&self) -> Option<u8> {
        self.student_year.as_ref().and_then(value_to_u8)
    }

    /// Semester, if present and parsable
    pub fn semester_u8(&self) -> Option<u8> {
        self.semester.as_ref().and_then(value_to_u8)
    }

    /// Whether the semester field was supplied at all (null counts as absent)
    pub fn has_semester(&self) -> bool {
        matches!(
            self.semester,
            Some(ref v) if !v.is_null()
        )
    }

    /// Whether the student year field was supplied at all
    pub fn has_student_year(&self) -> bool {
        matches!(
            self.student_year,
            Some(ref v) if !v.is_null()
        )
    }

    /// Timestamp parsed into a datetime
    pub fn timestamp_parsed(&self) -> Option<NaiveDateTime> {
        self.timestamp.as_deref().and_then(parse_timestamp)
    }
}

/// Raw student directory row (already typed collaborator data)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawStudentRow {
    pub id: Option<String>,
    pub name: Option<String>,
    pub college: Option<String>,
    pub course: Option<String>,
    pub branch: Option<String>,
    pub student_year: Option<serde_json::Value>,
    pub category: Option<String>,
}

impl RawStudentRow {
    /// Student year, if present and parsable
    pub fn student_year_u8(&self) -> Option<u8> {
        self.student_year.as_ref().and_then(value_to_u8)
    }
}

/// Raw fee head directory row
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFeeHeadRow {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// One seed/upload payload: record rows plus directory rows
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawBatch {
    pub demands: Vec<RawDemandRow>,
    pub transactions: Vec<RawTransactionRow>,
    pub students: Vec<RawStudentRow>,
    pub fee_heads: Vec<RawFeeHeadRow>,
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_to_decimal_number_or_string() {
        assert_eq!(
            value_to_decimal(&serde_json::json!(50000)),
            Some(Decimal::from(50000))
        );
        assert_eq!(
            value_to_decimal(&serde_json::json!("1250.50")),
            Some(Decimal::new(125050, 2))
        );
        assert_eq!(value_to_decimal(&serde_json::json!("abc")), None);
        assert_eq!(value_to_decimal(&serde_json::json!(null)), None);
    }

    #[test]
    fn test_value_to_u8() {
        assert_eq!(value_to_u8(&serde_json::json!(2)), Some(2));
        assert_eq!(value_to_u8(&serde_json::json!("1")), Some(1));
        assert_eq!(value_to_u8(&serde_json::json!("x")), None);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2026-07-10 14:30:00").is_some());
        assert!(parse_timestamp("2026-07-10T14:30:00").is_some());
        let midnight = parse_timestamp("2026-07-10").unwrap();
        assert_eq!(midnight.time(), chrono::NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        assert!(parse_timestamp("10/07/2026").is_none());
    }

    #[test]
    fn test_raw_demand_row_camel_case() {
        let row: RawDemandRow = serde_json::from_str(
            r#"{"studentId": "s1", "feeHeadId": "TUITION", "amount": "50000", "studentYear": 1}"#,
        )
        .unwrap();
        assert_eq!(row.student_id.as_deref(), Some("s1"));
        assert_eq!(row.amount_decimal(), Some(Decimal::from(50000)));
        assert_eq!(row.student_year_u8(), Some(1));
        assert!(!row.has_semester());
    }

    #[test]
    fn test_raw_transaction_row_type_field() {
        let row: RawTransactionRow = serde_json::from_str(
            r#"{"studentId": "s1", "feeHeadId": "X", "amount": 100, "type": "DEBIT", "mode": "cash", "timestamp": "2026-07-10 09:00:00"}"#,
        )
        .unwrap();
        assert_eq!(row.txn_type.as_deref(), Some("DEBIT"));
        assert!(row.timestamp_parsed().is_some());
    }
}
