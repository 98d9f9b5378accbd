use eframe::egui;

use crate::color::GradientPalette;
use crate::state::AppState;
use crate::ui::{panels, plot, summary};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters (filtered variant only) ----
        if self.state.config.variant.has_filters() {
            egui::SidePanel::left("filter_panel")
                .default_width(240.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::side_panel(ui, &mut self.state);
                });
        }

        // ---- Central panel: header, charts, insight ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    panels::header(ui, &mut self.state);
                    ui.separator();

                    let Some(view) = &self.state.view else {
                        ui.centered_and_justified(|ui| {
                            ui.heading("Open a survey file to begin  (File → Open…)");
                        });
                        return;
                    };

                    plot::genre_bar_chart(ui, &view.anxiety, GradientPalette::CoolWarm);
                    ui.add_space(12.0);
                    plot::genre_bar_chart(ui, &view.depression, GradientPalette::Mako);
                    ui.add_space(12.0);

                    summary::insight(ui, &view.summary);
                    ui.add_space(12.0);
                    summary::genre_table(ui, &view.table);
                    ui.add_space(12.0);
                    summary::footer(ui);
                });
        });
    }
}
