//! Aggregate statistics over decoded issue records
//!
//! [`Statistics`] is single-owner state: every mutation takes `&mut self`.
//! Concurrent producers reach it through [`crate::stats::aggregator`], which
//! owns the one instance for a run.

use crate::report::Record;
use serde::Serialize;
use std::collections::HashMap;

/// Category whose records feed the status and duration statistics
pub const DEFAULT_BUG_CATEGORY: &str = "Bug";

/// Running aggregates over recorded bug durations, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DurationSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

impl DurationSummary {
    fn first(seconds: f64) -> Self {
        Self {
            count: 1,
            min: seconds,
            max: seconds,
            average: seconds,
        }
    }

    fn fold(&mut self, seconds: f64) {
        self.min = self.min.min(seconds);
        self.max = self.max.max(seconds);
        // Online mean; adequate for batch sizes this tool sees
        self.average = (self.average * self.count as f64 + seconds) / (self.count + 1) as f64;
        self.count += 1;
    }
}

#[derive(Debug, Clone)]
pub struct Statistics {
    bug_category: String,
    known_types: Vec<String>,
    known_statuses: Vec<String>,
    category_totals: HashMap<String, usize>,
    total_records: usize,
    bug_total: usize,
    bug_status_totals: HashMap<String, usize>,
    bug_durations: Vec<f64>,
    summary: Option<DurationSummary>,
    median: Option<f64>,
    finalized: bool,
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new(DEFAULT_BUG_CATEGORY)
    }
}

impl Statistics {
    pub fn new(bug_category: impl Into<String>) -> Self {
        Self {
            bug_category: bug_category.into(),
            known_types: Vec::new(),
            known_statuses: Vec::new(),
            category_totals: HashMap::new(),
            total_records: 0,
            bug_total: 0,
            bug_status_totals: HashMap::new(),
            bug_durations: Vec::new(),
            summary: None,
            median: None,
            finalized: false,
        }
    }

    /// Count one record under its category
    pub fn record_category(&mut self, issue_type: &str) {
        remember(&mut self.known_types, issue_type);
        *self
            .category_totals
            .entry(issue_type.to_string())
            .or_insert(0) += 1;
        self.total_records += 1;
    }

    /// Note a status name; every record contributes, not only bugs
    pub fn record_status(&mut self, status: &str) {
        remember(&mut self.known_statuses, status);
    }

    /// Count one bug under its status and fold in its duration, if it has one
    pub fn record_bug(&mut self, status: &str, duration_secs: Option<f64>) {
        *self
            .bug_status_totals
            .entry(status.to_string())
            .or_insert(0) += 1;
        self.bug_total += 1;

        if let Some(seconds) = duration_secs {
            match self.summary.as_mut() {
                Some(summary) => summary.fold(seconds),
                None => self.summary = Some(DurationSummary::first(seconds)),
            }
            self.bug_durations.push(seconds);
        }
    }

    /// Apply one decoded record
    pub fn merge(&mut self, record: &Record, duration_secs: Option<f64>) {
        self.record_status(&record.status);
        if self.is_bug(record) {
            self.record_bug(&record.status, duration_secs);
        }
        self.record_category(&record.issue_type);
    }

    pub fn is_bug(&self, record: &Record) -> bool {
        record.issue_type == self.bug_category
    }

    /// Sort the samples and fix the median.
    ///
    /// The median is the element at `count / 2`, so an even count yields the
    /// upper of the two middle samples.
    pub fn finalize(mut self) -> Self {
        self.bug_durations.sort_by(|a, b| a.total_cmp(b));
        self.median = self
            .bug_durations
            .get(self.bug_durations.len() / 2)
            .copied();
        self.finalized = true;
        self
    }

    pub fn bug_category(&self) -> &str {
        &self.bug_category
    }

    pub fn known_types(&self) -> &[String] {
        &self.known_types
    }

    pub fn known_statuses(&self) -> &[String] {
        &self.known_statuses
    }

    pub fn category_total(&self, issue_type: &str) -> usize {
        self.category_totals.get(issue_type).copied().unwrap_or(0)
    }

    pub fn category_totals(&self) -> &HashMap<String, usize> {
        &self.category_totals
    }

    pub fn total_records(&self) -> usize {
        self.total_records
    }

    pub fn bug_total(&self) -> usize {
        self.bug_total
    }

    pub fn bug_status_total(&self, status: &str) -> usize {
        self.bug_status_totals.get(status).copied().unwrap_or(0)
    }

    pub fn bug_status_totals(&self) -> &HashMap<String, usize> {
        &self.bug_status_totals
    }

    /// Samples in completion order, or ascending once finalized
    pub fn bug_durations(&self) -> &[f64] {
        &self.bug_durations
    }

    pub fn summary(&self) -> Option<&DurationSummary> {
        self.summary.as_ref()
    }

    pub fn bug_duration_count(&self) -> usize {
        self.summary.map(|s| s.count).unwrap_or(0)
    }

    pub fn bug_min(&self) -> Option<f64> {
        self.summary.map(|s| s.min)
    }

    pub fn bug_max(&self) -> Option<f64> {
        self.summary.map(|s| s.max)
    }

    pub fn bug_average(&self) -> Option<f64> {
        self.summary.map(|s| s.average)
    }

    /// Defined only after [`Statistics::finalize`] with at least one sample
    pub fn bug_median(&self) -> Option<f64> {
        self.median
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
}

fn remember(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|known| known == name) {
        names.push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(issue_type: &str, status: &str) -> Record {
        Record {
            status: status.to_string(),
            created: "Mon, 2 Jan 2006 15:04:05 -0700".to_string(),
            resolved: None,
            issue_type: issue_type.to_string(),
        }
    }

    #[test]
    fn test_empty_statistics() {
        let stats = Statistics::default().finalize();
        assert_eq!(stats.total_records(), 0);
        assert_eq!(stats.bug_duration_count(), 0);
        assert!(stats.summary().is_none());
        assert!(stats.bug_median().is_none());
        assert!(stats.is_finalized());
    }

    #[test]
    fn test_record_category_first_seen_order() {
        let mut stats = Statistics::default();
        for t in ["Task", "Bug", "Task", "Improvement", "Bug"] {
            stats.record_category(t);
        }
        assert_eq!(stats.known_types(), ["Task", "Bug", "Improvement"]);
        assert_eq!(stats.category_total("Task"), 2);
        assert_eq!(stats.category_total("Bug"), 2);
        assert_eq!(stats.category_total("Improvement"), 1);
        assert_eq!(stats.category_total("Epic"), 0);
        assert_eq!(stats.total_records(), 5);
    }

    #[test]
    fn test_statuses_include_non_bugs() {
        let mut stats = Statistics::default();
        stats.merge(&record("Task", "Open"), None);
        stats.merge(&record("Bug", "Resolved"), Some(10.0));

        assert_eq!(stats.known_statuses(), ["Open", "Resolved"]);
        assert_eq!(stats.bug_status_total("Open"), 0);
        assert_eq!(stats.bug_status_total("Resolved"), 1);
        assert_eq!(stats.bug_total(), 1);
    }

    #[test]
    fn test_first_sample_sets_min_and_max() {
        let mut stats = Statistics::default();
        stats.record_bug("Closed", Some(-5.0));
        assert_eq!(stats.bug_min(), Some(-5.0));
        assert_eq!(stats.bug_max(), Some(-5.0));
        assert_eq!(stats.bug_average(), Some(-5.0));
    }

    #[test]
    fn test_bug_without_duration_counts_status_only() {
        let mut stats = Statistics::default();
        stats.record_bug("Open", None);
        assert_eq!(stats.bug_status_total("Open"), 1);
        assert_eq!(stats.bug_duration_count(), 0);
        assert!(stats.bug_durations().is_empty());
    }

    #[test]
    fn test_running_aggregates() {
        let mut stats = Statistics::default();
        for d in [300.0, 100.0, 200.0] {
            stats.record_bug("Resolved", Some(d));
        }
        assert_eq!(stats.bug_duration_count(), stats.bug_durations().len());
        assert_eq!(stats.bug_min(), Some(100.0));
        assert_eq!(stats.bug_max(), Some(300.0));
        assert!((stats.bug_average().unwrap() - 200.0).abs() < 1e-9);
        // completion order until finalize
        assert_eq!(stats.bug_durations(), [300.0, 100.0, 200.0]);
    }

    #[test]
    fn test_even_count_median_takes_upper_middle() {
        let mut stats = Statistics::default();
        for d in [40.0, 10.0, 30.0, 20.0] {
            stats.record_bug("Closed", Some(d));
        }
        let stats = stats.finalize();
        assert_eq!(stats.bug_durations(), [10.0, 20.0, 30.0, 40.0]);
        assert_eq!(stats.bug_median(), Some(30.0));
    }

    #[test]
    fn test_odd_count_median() {
        let mut stats = Statistics::default();
        for d in [5.0, 1.0, 3.0] {
            stats.record_bug("Closed", Some(d));
        }
        assert_eq!(stats.finalize().bug_median(), Some(3.0));
    }

    #[test]
    fn test_median_undefined_before_finalize() {
        let mut stats = Statistics::default();
        stats.record_bug("Closed", Some(1.0));
        assert!(stats.bug_median().is_none());
        assert!(!stats.is_finalized());
    }

    #[test]
    fn test_custom_bug_category() {
        let mut stats = Statistics::new("Defect");
        stats.merge(&record("Defect", "Closed"), Some(1.0));
        stats.merge(&record("Bug", "Closed"), Some(2.0));
        assert_eq!(stats.bug_total(), 1);
        assert_eq!(stats.bug_duration_count(), 1);
        assert_eq!(stats.total_records(), 2);
    }

    #[test]
    fn test_sums_match_totals() {
        let mut stats = Statistics::default();
        let records = [
            ("Bug", "Open"),
            ("Bug", "Closed"),
            ("Task", "Open"),
            ("Bug", "Resolved"),
            ("Sub-task", "Closed"),
        ];
        for (t, s) in records {
            stats.merge(&record(t, s), None);
        }
        let category_sum: usize = stats.category_totals().values().sum();
        let status_sum: usize = stats.bug_status_totals().values().sum();
        assert_eq!(category_sum, stats.total_records());
        assert_eq!(status_sum, stats.bug_total());
        assert_eq!(stats.bug_total(), 3);
    }
}
