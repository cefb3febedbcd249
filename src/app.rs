use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, summary};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HappinessApp {
    pub state: AppState,
}

impl HappinessApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for HappinessApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: region / country / metric ----
        egui::SidePanel::left("selection_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: average + values ----
        egui::TopBottomPanel::bottom("summary_panel")
            .resizable(true)
            .show(ctx, |ui| {
                summary::summary_panel(ui, &self.state);
            });

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::series_plot(ui, &self.state);
        });
    }
}
