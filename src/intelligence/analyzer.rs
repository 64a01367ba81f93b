use chrono::{DateTime, Utc};

use crate::db::models::Job;
use crate::intelligence::config::IntelligenceConfig;
use crate::intelligence::types::{
    CommonProblem, CustomerIntelligence, IssuePattern, RecurringIssue,
};

/// One fault category and its occurrence dates, most-recent-first.
struct CategoryTally {
    category: String,
    occurrence_dates: Vec<DateTime<Utc>>,
}

/// Analyze a customer's full job history against the current wall clock.
pub fn analyze(
    all_jobs: &[Job],
    customer_phone: &str,
    config: &IntelligenceConfig,
) -> Option<CustomerIntelligence> {
    analyze_at(all_jobs, customer_phone, Utc::now(), config)
}

/// Main analysis function: transforms a customer's job history into a
/// `CustomerIntelligence` snapshot. Pure — reads the jobs, mutates nothing,
/// and depends only on its arguments (`now` drives the recency buckets).
///
/// Returns `None` when no job matches the phone number: an expected outcome,
/// not an error.
pub fn analyze_at(
    all_jobs: &[Job],
    customer_phone: &str,
    now: DateTime<Utc>,
    config: &IntelligenceConfig,
) -> Option<CustomerIntelligence> {
    let mut jobs: Vec<&Job> = all_jobs
        .iter()
        .filter(|job| job.customer_phone == customer_phone)
        .collect();

    if jobs.is_empty() {
        return None;
    }

    // Most recent first; the head supplies customer_name and last_service_date.
    jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let most_recent = jobs[0];

    Some(CustomerIntelligence {
        customer_phone: customer_phone.to_string(),
        customer_name: most_recent.customer_name.clone(),
        total_jobs: jobs.len(),
        recurring_issues: recurring_issues(&jobs, now, config),
        average_service_interval: average_service_interval(&jobs, config),
        last_service_date: most_recent.created_at,
        common_problems: common_problems(&jobs, config),
    })
}

/// Tally fault categories across the (descending-sorted) jobs.
///
/// Tallies keep encounter order so that later stable sorts leave tied
/// categories in the order they were first seen.
fn tally_categories(jobs: &[&Job]) -> Vec<CategoryTally> {
    let mut tallies: Vec<CategoryTally> = Vec::new();

    for job in jobs {
        let Some(raw) = &job.fault_category else {
            continue;
        };

        for token in raw.split(',') {
            let category = token.trim();
            if category.is_empty() {
                continue;
            }

            match tallies.iter_mut().find(|t| t.category == category) {
                Some(tally) => tally.occurrence_dates.push(job.created_at),
                None => tallies.push(CategoryTally {
                    category: category.to_string(),
                    occurrence_dates: vec![job.created_at],
                }),
            }
        }
    }

    tallies
}

fn recurring_issues(
    jobs: &[&Job],
    now: DateTime<Utc>,
    config: &IntelligenceConfig,
) -> Vec<RecurringIssue> {
    let mut issues: Vec<RecurringIssue> = tally_categories(jobs)
        .into_iter()
        .filter(|tally| tally.occurrence_dates.len() >= config.min_occurrences)
        .map(|tally| {
            // Jobs arrive sorted descending, so the first date is the latest.
            let last_occurrence_date = tally.occurrence_dates[0];
            let days_ago = (now - last_occurrence_date).num_days().max(0);

            RecurringIssue {
                category: tally.category,
                occurrences: tally.occurrence_dates.len(),
                last_occurrence_date,
                days_ago,
                pattern: classify_pattern(days_ago, config),
            }
        })
        .collect();

    // Stable sort: ties keep first-seen order.
    issues.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));
    issues
}

/// Classify recency: `< 60` days → monthly, `< 120` → quarterly, else
/// biannual (thresholds inclusive-exclusive; exactly 60 is quarterly).
/// Biannual is the unconditional final branch, so any value that fails both
/// comparisons lands there.
fn classify_pattern(days_ago: i64, config: &IntelligenceConfig) -> IssuePattern {
    if days_ago < config.monthly_within_days {
        IssuePattern::Monthly
    } else if days_ago < config.quarterly_within_days {
        IssuePattern::Quarterly
    } else {
        IssuePattern::Biannual
    }
}

/// Average whole days between consecutive jobs, computed from the span
/// between the first-ever and most recent job. A single job has no interval
/// to measure and reports the configured placeholder instead.
fn average_service_interval(jobs: &[&Job], config: &IntelligenceConfig) -> i64 {
    if jobs.len() < 2 {
        return config.default_interval_days;
    }

    let newest = jobs[0].created_at;
    let oldest = jobs[jobs.len() - 1].created_at;
    let span_days = (newest - oldest).num_days();

    (span_days as f64 / (jobs.len() - 1) as f64).round() as i64
}

fn common_problems(jobs: &[&Job], config: &IntelligenceConfig) -> Vec<CommonProblem> {
    let mut problems: Vec<CommonProblem> = Vec::new();

    for job in jobs {
        let description = truncate_chars(&job.problem_description, config.description_truncate_chars);

        match problems.iter_mut().find(|p| p.description == description) {
            Some(problem) => problem.frequency += 1,
            None => problems.push(CommonProblem {
                description,
                frequency: 1,
            }),
        }
    }

    problems.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    problems.truncate(config.max_common_problems);
    problems
}

/// Character-boundary-safe prefix, since descriptions are free text.
fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::db::models::{Job, JobStatus};

    const PHONE: &str = "555-0100";

    fn job(
        phone: &str,
        name: &str,
        created_at: DateTime<Utc>,
        fault_category: Option<&str>,
        problem: &str,
    ) -> Job {
        Job {
            id: Uuid::new_v4().to_string(),
            customer_phone: phone.to_string(),
            customer_name: name.to_string(),
            vehicle: None,
            fault_category: fault_category.map(str::to_string),
            problem_description: problem.to_string(),
            status: JobStatus::Completed,
            created_at,
            updated_at: created_at,
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn no_matching_jobs_returns_none() {
        let now = fixed_now();
        let jobs = vec![job("555-9999", "Someone Else", now, Some("brakes"), "squeal")];

        assert!(analyze_at(&jobs, PHONE, now, &IntelligenceConfig::default()).is_none());
        assert!(analyze_at(&[], PHONE, now, &IntelligenceConfig::default()).is_none());
    }

    #[test]
    fn total_jobs_counts_only_matching_phone() {
        let now = fixed_now();
        let jobs = vec![
            job(PHONE, "Sam", now - Duration::days(10), Some("oil"), "leak"),
            job("555-9999", "Other", now - Duration::days(5), Some("oil"), "leak"),
            job(PHONE, "Sam", now - Duration::days(1), None, "noise"),
        ];

        let intel = analyze_at(&jobs, PHONE, now, &IntelligenceConfig::default()).unwrap();
        assert_eq!(intel.total_jobs, 2);
    }

    #[test]
    fn name_and_last_service_date_come_from_most_recent_job() {
        let now = fixed_now();
        let recent = now - Duration::days(3);
        let jobs = vec![
            job(PHONE, "Old Name", now - Duration::days(200), None, "a"),
            job(PHONE, "New Name", recent, None, "b"),
        ];

        let intel = analyze_at(&jobs, PHONE, now, &IntelligenceConfig::default()).unwrap();
        assert_eq!(intel.customer_name, "New Name");
        assert_eq!(intel.last_service_date, recent);
    }

    #[test]
    fn single_occurrence_categories_are_not_recurring() {
        let now = fixed_now();
        let jobs = vec![
            job(PHONE, "Sam", now - Duration::days(20), Some("brakes"), "a"),
            job(PHONE, "Sam", now - Duration::days(10), Some("electrical"), "b"),
        ];

        let intel = analyze_at(&jobs, PHONE, now, &IntelligenceConfig::default()).unwrap();
        assert!(intel.recurring_issues.is_empty());
    }

    #[test]
    fn comma_separated_categories_split_and_recur() {
        let now = fixed_now();
        let jobs = vec![
            job(PHONE, "Sam", now - Duration::days(30), Some("brakes"), "pads worn"),
            job(PHONE, "Sam", now - Duration::days(20), Some("brakes, oil"), "pads and leak"),
            job(PHONE, "Sam", now - Duration::days(10), Some("oil"), "leak again"),
        ];

        let intel = analyze_at(&jobs, PHONE, now, &IntelligenceConfig::default()).unwrap();

        assert_eq!(intel.recurring_issues.len(), 2);
        for issue in &intel.recurring_issues {
            assert_eq!(issue.occurrences, 2);
            assert!(issue.category == "brakes" || issue.category == "oil");
        }
        assert_eq!(intel.common_problems.len(), 3);
    }

    #[test]
    fn recurring_issues_sorted_descending_by_occurrences() {
        let now = fixed_now();
        let mut jobs = Vec::new();
        for i in 0..3 {
            jobs.push(job(PHONE, "Sam", now - Duration::days(10 + i), Some("oil"), "leak"));
        }
        for i in 0..2 {
            jobs.push(job(PHONE, "Sam", now - Duration::days(40 + i), Some("brakes"), "squeal"));
        }

        let intel = analyze_at(&jobs, PHONE, now, &IntelligenceConfig::default()).unwrap();
        let occurrences: Vec<usize> =
            intel.recurring_issues.iter().map(|i| i.occurrences).collect();
        assert_eq!(occurrences, vec![3, 2]);
        for pair in occurrences.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
        assert_eq!(intel.recurring_issues[0].category, "oil");
    }

    #[test]
    fn pattern_thresholds_are_inclusive_exclusive() {
        let now = fixed_now();
        let config = IntelligenceConfig::default();

        let cases = [
            (59, IssuePattern::Monthly),
            (60, IssuePattern::Quarterly),
            (119, IssuePattern::Quarterly),
            (120, IssuePattern::Biannual),
        ];

        for (days, expected) in cases {
            let jobs = vec![
                job(PHONE, "Sam", now - Duration::days(days), Some("brakes"), "a"),
                job(PHONE, "Sam", now - Duration::days(days + 30), Some("brakes"), "b"),
            ];

            let intel = analyze_at(&jobs, PHONE, now, &config).unwrap();
            assert_eq!(intel.recurring_issues.len(), 1);
            assert_eq!(intel.recurring_issues[0].days_ago, days);
            assert_eq!(
                intel.recurring_issues[0].pattern, expected,
                "days_ago {days} should be {}",
                expected.as_str()
            );
        }
    }

    #[test]
    fn single_job_reports_placeholder_interval() {
        let now = fixed_now();
        let jobs = vec![job(PHONE, "Sam", now - Duration::days(7), None, "noise")];

        let intel = analyze_at(&jobs, PHONE, now, &IntelligenceConfig::default()).unwrap();
        assert_eq!(intel.average_service_interval, 90);
    }

    #[test]
    fn interval_is_span_over_gap_count() {
        let now = fixed_now();
        // Three jobs across 90 days: 90 / 2 gaps = 45.
        let jobs = vec![
            job(PHONE, "Sam", now - Duration::days(100), None, "a"),
            job(PHONE, "Sam", now - Duration::days(55), None, "b"),
            job(PHONE, "Sam", now - Duration::days(10), None, "c"),
        ];

        let intel = analyze_at(&jobs, PHONE, now, &IntelligenceConfig::default()).unwrap();
        assert_eq!(intel.average_service_interval, 45);
    }

    #[test]
    fn interval_rounds_to_nearest_day() {
        let now = fixed_now();
        // 91 days across 2 gaps = 45.5, rounds to 46.
        let jobs = vec![
            job(PHONE, "Sam", now - Duration::days(101), None, "a"),
            job(PHONE, "Sam", now - Duration::days(55), None, "b"),
            job(PHONE, "Sam", now - Duration::days(10), None, "c"),
        ];

        let intel = analyze_at(&jobs, PHONE, now, &IntelligenceConfig::default()).unwrap();
        assert_eq!(intel.average_service_interval, 46);
    }

    #[test]
    fn common_problems_capped_at_five_and_sorted() {
        let now = fixed_now();
        let mut jobs = Vec::new();
        // Seven distinct descriptions, one appearing three times.
        for i in 0..7 {
            jobs.push(job(
                PHONE,
                "Sam",
                now - Duration::days(50 + i),
                None,
                &format!("problem number {i}"),
            ));
        }
        for i in 0..2 {
            jobs.push(job(PHONE, "Sam", now - Duration::days(10 + i), None, "problem number 0"));
        }

        let intel = analyze_at(&jobs, PHONE, now, &IntelligenceConfig::default()).unwrap();
        assert_eq!(intel.common_problems.len(), 5);
        assert_eq!(intel.common_problems[0].description, "problem number 0");
        assert_eq!(intel.common_problems[0].frequency, 3);
        for pair in intel.common_problems.windows(2) {
            assert!(pair[0].frequency >= pair[1].frequency);
        }
    }

    #[test]
    fn descriptions_are_truncated_before_grouping() {
        let now = fixed_now();
        let prefix = "x".repeat(50);
        let long_a = format!("{prefix} tail one");
        let long_b = format!("{prefix} tail two");
        let jobs = vec![
            job(PHONE, "Sam", now - Duration::days(2), None, &long_a),
            job(PHONE, "Sam", now - Duration::days(1), None, &long_b),
        ];

        let intel = analyze_at(&jobs, PHONE, now, &IntelligenceConfig::default()).unwrap();
        // Both collapse onto the same 50-char prefix.
        assert_eq!(intel.common_problems.len(), 1);
        assert_eq!(intel.common_problems[0].description, prefix);
        assert_eq!(intel.common_problems[0].frequency, 2);
    }

    #[test]
    fn analysis_is_deterministic_for_fixed_input() {
        let now = fixed_now();
        let jobs = vec![
            job(PHONE, "Sam", now - Duration::days(70), Some("brakes, oil"), "pads"),
            job(PHONE, "Sam", now - Duration::days(30), Some("brakes"), "pads"),
            job(PHONE, "Sam", now - Duration::days(5), Some("oil"), "leak"),
        ];

        let config = IntelligenceConfig::default();
        let first = analyze_at(&jobs, PHONE, now, &config).unwrap();
        let second = analyze_at(&jobs, PHONE, now, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn category_tokens_are_trimmed_and_empties_dropped() {
        let now = fixed_now();
        let jobs = vec![
            job(PHONE, "Sam", now - Duration::days(20), Some("  brakes , "), "a"),
            job(PHONE, "Sam", now - Duration::days(10), Some("brakes"), "b"),
        ];

        let intel = analyze_at(&jobs, PHONE, now, &IntelligenceConfig::default()).unwrap();
        assert_eq!(intel.recurring_issues.len(), 1);
        assert_eq!(intel.recurring_issues[0].category, "brakes");
        assert_eq!(intel.recurring_issues[0].occurrences, 2);
    }
}
