use std::collections::BTreeMap;

use super::model::{Dataset, Outcome, SiteFilter};

// ---------------------------------------------------------------------------
// Outcome counts
// ---------------------------------------------------------------------------

/// Success / failure counts over the rows matching a site filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutcomeSummary {
    pub success_count: usize,
    pub failure_count: usize,
}

impl OutcomeSummary {
    pub fn total(&self) -> usize {
        self.success_count + self.failure_count
    }

    /// `None` when no launches matched.
    pub fn success_rate(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            n => Some(self.success_count as f64 / n as f64),
        }
    }
}

/// Count outcomes for `site` (or for every row when `site` is `All`).
///
/// A site absent from the dataset yields `0 / 0`.
pub fn aggregate(dataset: &Dataset, site: &SiteFilter) -> OutcomeSummary {
    dataset
        .records()
        .iter()
        .filter(|r| site.matches(r))
        .fold(OutcomeSummary::default(), |mut acc, r| {
            match r.outcome {
                Outcome::Success => acc.success_count += 1,
                Outcome::Failure => acc.failure_count += 1,
            }
            acc
        })
}

/// Successful launches per site, in site order.  Sites without a success
/// are listed with 0.
pub fn success_by_site(dataset: &Dataset) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = dataset
        .sites()
        .iter()
        .map(|s| (s.as_str(), 0))
        .collect();
    for r in dataset.records() {
        if r.outcome == Outcome::Success {
            *counts.entry(r.launch_site.as_str()).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .map(|(site, n)| (site.to_string(), n))
        .collect()
}

// ---------------------------------------------------------------------------
// Chart payload for the pie
// ---------------------------------------------------------------------------

pub const SUCCESS_LABEL: &str = "Success";
pub const FAILED_LABEL: &str = "Failed";

/// Everything the pie chart needs: a title and two labelled slices.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeChart {
    pub title: String,
    pub slices: [(&'static str, usize); 2],
    pub summary: OutcomeSummary,
}

impl OutcomeChart {
    /// True when both slices are zero; the pie renders as an empty disc.
    pub fn is_empty(&self) -> bool {
        self.summary.total() == 0
    }
}

pub fn outcome_chart(dataset: &Dataset, site: &SiteFilter) -> OutcomeChart {
    let summary = aggregate(dataset, site);
    let title = match site {
        SiteFilter::All => "Total Successful Launches".to_string(),
        SiteFilter::Site(s) => format!("Success vs. Failed Launches for {s}"),
    };
    OutcomeChart {
        title,
        slices: [
            (SUCCESS_LABEL, summary.success_count),
            (FAILED_LABEL, summary.failure_count),
        ],
        summary,
    }
}
