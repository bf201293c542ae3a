use crate::color::ColorMap;
use crate::data::aggregate::{outcome_chart, success_by_site, OutcomeChart};
use crate::data::filter::{filter, FilteredSubset};
use crate::data::model::{Dataset, PayloadBounds, PayloadRange, SiteFilter};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Control values plus the charts derived from them, independent of rendering.
///
/// The derived fields are replaced wholesale by the `on_*` handlers; nothing
/// from a previous selection survives an event.
pub struct AppState {
    dataset: Dataset,

    /// Current site selector value.
    pub site: SiteFilter,

    /// Current payload slider values, kept within the observed bounds.
    pub range: PayloadRange,

    /// Pie chart for the current site.
    pub outcome: OutcomeChart,

    /// Scatter rows for the current site and range.
    pub scatter: FilteredSubset,

    /// Successful launches per site, shown beside the "All Sites" pie.
    pub site_breakdown: Vec<(String, usize)>,

    /// Booster category colours for the scatter.
    pub color_map: ColorMap,
}

impl AppState {
    /// Start with every site and the full observed payload range.
    pub fn new(dataset: Dataset) -> Self {
        let site = SiteFilter::All;
        let range = PayloadRange::full(dataset.payload_bounds());
        Self {
            outcome: outcome_chart(&dataset, &site),
            scatter: filter(&dataset, &site, &range),
            site_breakdown: success_by_site(&dataset),
            color_map: ColorMap::new(dataset.booster_categories()),
            dataset,
            site,
            range,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn bounds(&self) -> PayloadBounds {
        self.dataset.payload_bounds()
    }

    /// Site selector changed: both charts depend on the site.
    pub fn on_site_changed(&mut self, site: SiteFilter) -> &OutcomeChart {
        if let SiteFilter::Site(s) = &site {
            if !self.dataset.sites().contains(s) {
                log::debug!("Site '{s}' is not in the dataset; charts will be empty");
            }
        }
        log::debug!("Site changed to {site}");
        self.site = site;
        self.outcome = outcome_chart(&self.dataset, &self.site);
        self.scatter = filter(&self.dataset, &self.site, &self.range);
        &self.outcome
    }

    /// Payload sliders changed: only the scatter depends on the range.
    pub fn on_range_changed(&mut self, range: PayloadRange) -> &FilteredSubset {
        self.range = range.clamped_to(self.bounds());
        log::debug!("Payload range changed to {:?}", self.range);
        self.scatter = filter(&self.dataset, &self.site, &self.range);
        &self.scatter
    }

    /// Restore the full observed payload range.
    pub fn reset_range(&mut self) {
        self.on_range_changed(PayloadRange::full(self.bounds()));
    }
}
