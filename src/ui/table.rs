use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::{FAILURE_COLOR, SUCCESS_COLOR};
use crate::data::filter::FilteredSubset;
use crate::data::loader::{COL_BOOSTER, COL_PAYLOAD, COL_SITE};
use crate::data::model::{LaunchRecord, Outcome};

// ---------------------------------------------------------------------------
// Filtered rows table
// ---------------------------------------------------------------------------

/// List the rows currently plotted in the scatter.
pub fn filtered_table(ui: &mut Ui, subset: &FilteredSubset) {
    let rows: Vec<(usize, &LaunchRecord)> = subset.indices().iter().copied().zip(subset.rows()).collect();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(240.0)
        .column(Column::auto().at_least(40.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Row", COL_SITE, COL_PAYLOAD, "Outcome", COL_BOOSTER] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let (idx, r) = rows[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label((idx + 1).to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&r.launch_site);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.1}", r.payload_mass_kg));
                });
                row.col(|ui: &mut Ui| {
                    let color = match r.outcome {
                        Outcome::Success => SUCCESS_COLOR,
                        Outcome::Failure => FAILURE_COLOR,
                    };
                    ui.label(RichText::new(r.outcome.to_string()).color(color));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&r.booster_version_category);
                });
            });
        });
}
