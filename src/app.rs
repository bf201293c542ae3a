use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
    pub config: DashboardConfig,
}

impl LaunchDashApp {
    pub fn new(state: AppState, config: DashboardConfig) -> Self {
        Self { state, config }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state, &self.config);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state, &self.config);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    charts::outcome_pie(ui, &self.state.outcome);
                    ui.separator();
                    charts::payload_scatter(
                        ui,
                        &self.state.scatter,
                        &self.state.color_map,
                        self.state.bounds(),
                    );
                    ui.separator();
                    egui::CollapsingHeader::new("Launches in payload view")
                        .default_open(false)
                        .show(ui, |ui| {
                            table::filtered_table(ui, &self.state.scatter);
                        });
                });
        });
    }
}
