pub mod analyzer;
pub mod config;
pub mod types;

pub use analyzer::{analyze, analyze_at};
pub use config::IntelligenceConfig;
pub use types::{CommonProblem, CustomerIntelligence, IssuePattern, RecurringIssue};
