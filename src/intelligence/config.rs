/// Configuration for customer history analysis with tunable thresholds.
#[derive(Debug, Clone)]
pub struct IntelligenceConfig {
    /// A fault category must appear in at least this many jobs to count
    /// as recurring.
    pub min_occurrences: usize,

    /// Last seen strictly fewer than this many days ago → monthly.
    pub monthly_within_days: i64,

    /// Last seen strictly fewer than this many days ago (and not monthly)
    /// → quarterly. Anything beyond is biannual.
    pub quarterly_within_days: i64,

    /// Problem descriptions are truncated to this many characters before
    /// being tallied.
    pub description_truncate_chars: usize,

    /// Keep at most this many common problems.
    pub max_common_problems: usize,

    /// Reported interval when the customer has a single job and no interval
    /// can be measured. A placeholder for "insufficient data", not a value
    /// derived from anything.
    pub default_interval_days: i64,
}

impl Default for IntelligenceConfig {
    fn default() -> Self {
        Self {
            min_occurrences: 2,
            monthly_within_days: 60,
            quarterly_within_days: 120,
            description_truncate_chars: 50,
            max_common_problems: 5,
            default_interval_days: 90,
        }
    }
}
