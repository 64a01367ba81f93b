//! Derived customer intelligence models.
//!
//! Everything here is ephemeral analyzer output; nothing is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse recency classification of a recurring issue.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IssuePattern {
    Monthly,
    Quarterly,
    Biannual,
}

impl IssuePattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssuePattern::Monthly => "monthly",
            IssuePattern::Quarterly => "quarterly",
            IssuePattern::Biannual => "biannual",
        }
    }
}

/// A fault category seen on two or more of a customer's jobs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringIssue {
    pub category: String,
    pub occurrences: usize,
    pub last_occurrence_date: DateTime<Utc>,
    pub days_ago: i64,
    pub pattern: IssuePattern,
}

/// A problem description (truncated for grouping) and how often it appears.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommonProblem {
    pub description: String,
    pub frequency: usize,
}

/// The analyzer's sole output: a full intelligence picture for one customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerIntelligence {
    pub customer_phone: String,
    pub customer_name: String,
    pub total_jobs: usize,
    pub recurring_issues: Vec<RecurringIssue>,
    pub average_service_interval: i64,
    pub last_service_date: DateTime<Utc>,
    pub common_problems: Vec<CommonProblem>,
}
