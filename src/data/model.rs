use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Outcome – the binary mission result flag
// ---------------------------------------------------------------------------

/// Mission outcome, stored in the source data as the `class` column (1 / 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Numeric value used on the scatter y axis.
    pub fn as_f64(self) -> f64 {
        match self {
            Outcome::Failure => 0.0,
            Outcome::Success => 1.0,
        }
    }

    /// Parse a textual cell such as `"1"`, `"0"` or `"1.0"`.
    pub fn parse(s: &str) -> Option<Self> {
        let v: f64 = s.trim().parse().ok()?;
        Outcome::try_from(v).ok()
    }
}

impl TryFrom<f64> for Outcome {
    type Error = String;

    fn try_from(v: f64) -> Result<Self, Self::Error> {
        if v == 1.0 {
            Ok(Outcome::Success)
        } else if v == 0.0 {
            Ok(Outcome::Failure)
        } else {
            Err(format!("outcome must be 0 or 1, got {v}"))
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "Success"),
            Outcome::Failure => write!(f, "Failed"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub launch_site: String,
    /// Always finite and non-negative; enforced by the loader.
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version_category: String,
}

// ---------------------------------------------------------------------------
// Dataset – immutable, shared handle over all rows
// ---------------------------------------------------------------------------

/// Observed payload extremes, used to bound the range selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadBounds {
    pub min: f64,
    pub max: f64,
}

/// The full loaded dataset.  Cloning copies the handle, never the rows.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[LaunchRecord]>,
    sites: Arc<[String]>,
    booster_categories: Arc<[String]>,
    bounds: PayloadBounds,
}

impl Dataset {
    /// Build the dataset and its column indices from validated rows.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let sites: BTreeSet<&str> = records.iter().map(|r| r.launch_site.as_str()).collect();
        let boosters: BTreeSet<&str> = records
            .iter()
            .map(|r| r.booster_version_category.as_str())
            .collect();

        let bounds = if records.is_empty() {
            PayloadBounds { min: 0.0, max: 0.0 }
        } else {
            records.iter().fold(
                PayloadBounds {
                    min: f64::INFINITY,
                    max: f64::NEG_INFINITY,
                },
                |b, r| PayloadBounds {
                    min: b.min.min(r.payload_mass_kg),
                    max: b.max.max(r.payload_mass_kg),
                },
            )
        };

        let sites: Arc<[String]> = sites.into_iter().map(str::to_string).collect();
        let booster_categories: Arc<[String]> = boosters.into_iter().map(str::to_string).collect();

        Dataset {
            records: records.into(),
            sites,
            booster_categories,
            bounds,
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Sorted, de-duplicated launch site identifiers.
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Sorted, de-duplicated booster version categories.
    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    pub fn payload_bounds(&self) -> PayloadBounds {
        self.bounds
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Control values
// ---------------------------------------------------------------------------

/// The site selector's value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteFilter {
    #[default]
    All,
    Site(String),
}

impl SiteFilter {
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteFilter::All => true,
            SiteFilter::Site(s) => record.launch_site == *s,
        }
    }
}

impl fmt::Display for SiteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteFilter::All => write!(f, "All Sites"),
            SiteFilter::Site(s) => write!(f, "{s}"),
        }
    }
}

/// Closed payload interval `[low, high]` in kilograms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    /// The full observed range.
    pub fn full(bounds: PayloadBounds) -> Self {
        PayloadRange {
            low: bounds.min,
            high: bounds.max,
        }
    }

    /// Both ends finite and `low <= high`.
    pub fn is_valid(&self) -> bool {
        self.low.is_finite() && self.high.is_finite() && self.low <= self.high
    }

    /// Inclusive on both ends.
    pub fn contains(&self, mass: f64) -> bool {
        mass >= self.low && mass <= self.high
    }

    /// Clamp both ends into `bounds`, swapping them if the controls crossed.
    pub fn clamped_to(self, bounds: PayloadBounds) -> Self {
        let (a, b) = if self.low <= self.high {
            (self.low, self.high)
        } else {
            (self.high, self.low)
        };
        PayloadRange {
            low: a.clamp(bounds.min, bounds.max),
            high: b.clamp(bounds.min, bounds.max),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(site: &str, mass: f64, outcome: Outcome, booster: &str) -> LaunchRecord {
        LaunchRecord {
            launch_site: site.to_string(),
            payload_mass_kg: mass,
            outcome,
            booster_version_category: booster.to_string(),
        }
    }

    /// Ten launches: six successes at site A, four failures split over B and C.
    pub(crate) fn sample_dataset() -> Dataset {
        use Outcome::*;
        Dataset::from_records(vec![
            record("A", 500.0, Success, "FT"),
            record("B", 9600.0, Failure, "v1.1"),
            record("A", 2500.0, Success, "FT"),
            record("C", 4000.0, Failure, "v1.0"),
            record("A", 5000.0, Success, "B4"),
            record("A", 5300.0, Success, "B5"),
            record("B", 3100.0, Failure, "v1.1"),
            record("A", 0.0, Success, "FT"),
            record("C", 7000.0, Failure, "B4"),
            record("A", 9000.0, Success, "B5"),
        ])
    }

    #[test]
    fn test_dataset_indices() {
        let ds = sample_dataset();
        assert_eq!(ds.len(), 10);
        assert_eq!(ds.sites(), ["A", "B", "C"]);
        assert_eq!(ds.booster_categories(), ["B4", "B5", "FT", "v1.0", "v1.1"]);
        assert_eq!(ds.payload_bounds(), PayloadBounds { min: 0.0, max: 9600.0 });
    }

    #[test]
    fn test_empty_dataset_bounds() {
        let ds = Dataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.payload_bounds(), PayloadBounds { min: 0.0, max: 0.0 });
    }

    #[test]
    fn test_outcome_parse() {
        assert_eq!(Outcome::parse("1"), Some(Outcome::Success));
        assert_eq!(Outcome::parse(" 0 "), Some(Outcome::Failure));
        assert_eq!(Outcome::parse("1.0"), Some(Outcome::Success));
        assert_eq!(Outcome::parse("2"), None);
        assert_eq!(Outcome::parse("yes"), None);
    }

    #[test]
    fn test_site_filter_matches() {
        let r = record("KSC LC-39A", 100.0, Outcome::Success, "FT");
        assert!(SiteFilter::All.matches(&r));
        assert!(SiteFilter::Site("KSC LC-39A".into()).matches(&r));
        assert!(!SiteFilter::Site("VAFB SLC-4E".into()).matches(&r));
        assert_eq!(SiteFilter::All.to_string(), "All Sites");
    }

    #[test]
    fn test_payload_range_inclusive() {
        let r = PayloadRange::new(1000.0, 2000.0);
        assert!(r.contains(1000.0));
        assert!(r.contains(2000.0));
        assert!(!r.contains(2000.1));
        assert!(!PayloadRange::new(5.0, 1.0).is_valid());
        assert!(!PayloadRange::new(f64::NAN, 1.0).is_valid());
    }

    #[test]
    fn test_payload_range_clamp_swaps_and_bounds() {
        let bounds = PayloadBounds { min: 0.0, max: 9600.0 };
        let r = PayloadRange::new(12000.0, -5.0).clamped_to(bounds);
        assert_eq!(r, PayloadRange::new(0.0, 9600.0));
    }
}
