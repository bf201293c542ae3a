use eframe::egui::{self, RichText, Slider, Ui};

use crate::config::DashboardConfig;
use crate::data::model::{PayloadRange, SiteFilter};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – controls
// ---------------------------------------------------------------------------

/// Render the site selector and the payload range controls.
pub fn side_panel(ui: &mut Ui, state: &mut AppState, config: &DashboardConfig) {
    ui.heading("Launch Site");
    ui.separator();

    let mut selected = state.site.clone();
    egui::ComboBox::from_id_salt("site_selector")
        .selected_text(selected.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut selected, SiteFilter::All, "All Sites");
            for site in state.dataset().sites() {
                ui.selectable_value(&mut selected, SiteFilter::Site(site.clone()), site);
            }
        });
    if selected != state.site {
        state.on_site_changed(selected);
    }

    ui.add_space(12.0);
    ui.strong("Payload range (Kg):");

    let bounds = state.bounds();
    let mut low = state.range.low;
    let mut high = state.range.high;
    let low_changed = ui
        .add(Slider::new(&mut low, bounds.min..=bounds.max).text("min"))
        .changed();
    let high_changed = ui
        .add(Slider::new(&mut high, bounds.min..=bounds.max).text("max"))
        .changed();
    if low_changed || high_changed {
        state.on_range_changed(PayloadRange::new(low, high));
    }

    tick_marks(ui, &config.payload_ticks);

    if ui.small_button("Reset range").clicked() {
        state.reset_range();
    }

    if state.site == SiteFilter::All {
        ui.add_space(12.0);
        ui.separator();
        ui.strong("Successful launches by site");
        for (site, n) in &state.site_breakdown {
            ui.horizontal(|ui: &mut Ui| {
                ui.label(site);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
                    ui.label(n.to_string());
                });
            });
        }
    }
}

fn tick_marks(ui: &mut Ui, ticks: &[f64]) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for t in ticks {
            ui.label(RichText::new(format!("{t:.0}")).small().weak());
        }
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title and the row counts.
pub fn top_bar(ui: &mut Ui, state: &AppState, config: &DashboardConfig) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new(&config.window_title).size(28.0).strong());
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!(
            "{} launches loaded from {}, {} in payload view",
            state.dataset().len(),
            config.data_path.display(),
            state.scatter.len()
        ));
    });
}
