//! Date range control for report filtering

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Report range kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeKind {
    /// Current calendar day
    Today,
    /// First of the current month through today
    Month,
    /// All time
    All,
    /// Explicit start/end dates
    Custom,
}

impl std::str::FromStr for RangeKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "today" => Ok(RangeKind::Today),
            "month" => Ok(RangeKind::Month),
            "all" => Ok(RangeKind::All),
            "custom" => Ok(RangeKind::Custom),
            _ => Err(format!("Invalid range kind: {}", s)),
        }
    }
}

impl std::fmt::Display for RangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeKind::Today => write!(f, "today"),
            RangeKind::Month => write!(f, "month"),
            RangeKind::All => write!(f, "all"),
            RangeKind::Custom => write!(f, "custom"),
        }
    }
}

/// Inclusive date range used by report aggregation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportRange {
    /// Range kind
    pub kind: RangeKind,
    /// Custom start date (when kind is Custom)
    pub custom_start: Option<NaiveDate>,
    /// Custom end date (when kind is Custom)
    pub custom_end: Option<NaiveDate>,
}

impl Default for ReportRange {
    fn default() -> Self {
        Self {
            kind: RangeKind::All,
            custom_start: None,
            custom_end: None,
        }
    }
}

impl ReportRange {
    /// Create a new range of the given kind
    pub fn new(kind: RangeKind) -> Self {
        Self {
            kind,
            custom_start: None,
            custom_end: None,
        }
    }

    /// Create with custom date range
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            kind: RangeKind::Custom,
            custom_start: Some(start),
            custom_end: Some(end),
        }
    }

    /// Get the effective start date
    pub fn start_date(&self) -> Option<NaiveDate> {
        let today = Utc::now().date_naive();
        match self.kind {
            RangeKind::Today => Some(today),
            RangeKind::Month => Some(today.with_day(1).unwrap_or(today)),
            RangeKind::All => None,
            RangeKind::Custom => self.custom_start,
        }
    }

    /// Get the effective end date
    pub fn end_date(&self) -> Option<NaiveDate> {
        let today = Utc::now().date_naive();
        match self.kind {
            RangeKind::Today => Some(today),
            RangeKind::Month => Some(today),
            RangeKind::All => None,
            RangeKind::Custom => self.custom_end,
        }
    }

    /// Check if a date falls inside the range (inclusive)
    pub fn contains(&self, date: &NaiveDate) -> bool {
        let start = self.start_date();
        let end = self.end_date();

        match (start, end) {
            (None, None) => true,
            (Some(s), None) => *date >= s,
            (None, Some(e)) => *date <= e,
            (Some(s), Some(e)) => *date >= s && *date <= e,
        }
    }

    /// Number of calendar days the range spans, if bounded on both sides
    pub fn span_days(&self) -> Option<i64> {
        match (self.start_date(), self.end_date()) {
            (Some(s), Some(e)) => Some((e - s).num_days() + 1),
            _ => None,
        }
    }

    /// Get a human-readable description of the range
    pub fn description(&self) -> String {
        match self.kind {
            RangeKind::Today => "Today".to_string(),
            RangeKind::Month => "Month to Date".to_string(),
            RangeKind::All => "All Time".to_string(),
            RangeKind::Custom => {
                if let (Some(start), Some(end)) = (self.custom_start, self.custom_end) {
                    format!("{} to {}", start, end)
                } else {
                    "Custom Range".to_string()
                }
            }
        }
    }
}

/// Date filtering trait
pub trait DateFilter {
    /// Filter items by the given report range
    fn filter_by_range(&self, range: &ReportRange) -> bool;
}

impl DateFilter for super::Transaction {
    fn filter_by_range(&self, range: &ReportRange) -> bool {
        range.contains(&self.date())
    }
}

// ==================== Tests ====================
