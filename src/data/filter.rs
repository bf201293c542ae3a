use std::collections::BTreeMap;

use super::model::{Dataset, LaunchRecord, PayloadRange, SiteFilter};

// ---------------------------------------------------------------------------
// Filtered view over the dataset
// ---------------------------------------------------------------------------

/// Rows passing the active site + payload predicate, in dataset order.
///
/// Holds a handle to the dataset and the indices of the passing rows, so it
/// can be kept by the UI state without borrowing.
#[derive(Debug, Clone)]
pub struct FilteredSubset {
    dataset: Dataset,
    indices: Vec<usize>,
}

impl FilteredSubset {
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn rows(&self) -> impl Iterator<Item = &LaunchRecord> + '_ {
        let records = self.dataset.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Group rows by booster version category for per-colour series.
    /// Row order inside each group follows dataset order.
    pub fn by_booster(&self) -> BTreeMap<&str, Vec<&LaunchRecord>> {
        let mut groups: BTreeMap<&str, Vec<&LaunchRecord>> = BTreeMap::new();
        for r in self.rows() {
            groups
                .entry(r.booster_version_category.as_str())
                .or_default()
                .push(r);
        }
        groups
    }
}

/// Return the rows at `site` whose payload lies in `range` (inclusive).
///
/// An inverted or non-finite range is treated as an empty selection rather
/// than an error, as is a site the dataset does not contain.
pub fn filter(dataset: &Dataset, site: &SiteFilter, range: &PayloadRange) -> FilteredSubset {
    let indices = if range.is_valid() {
        dataset
            .records()
            .iter()
            .enumerate()
            .filter(|(_, r)| site.matches(r) && range.contains(r.payload_mass_kg))
            .map(|(i, _)| i)
            .collect()
    } else {
        log::debug!("Ignoring invalid payload range {range:?}");
        Vec::new()
    };

    FilteredSubset {
        dataset: dataset.clone(),
        indices,
    }
}

// ---------------------------------------------------------------------------
// Chart labels for the scatter
// ---------------------------------------------------------------------------

pub const SCATTER_TITLE: &str = "Payload Mass vs. Success";
pub const SCATTER_X_LABEL: &str = "Payload Mass (kg)";
pub const SCATTER_Y_LABEL: &str = "Success (1) / Failure (0)";
