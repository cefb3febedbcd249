use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Bottom panel – average sentence and the plotted values
// ---------------------------------------------------------------------------

pub fn summary_panel(ui: &mut Ui, state: &AppState) {
    ui.add_space(4.0);
    ui.label(egui::RichText::new(state.average_text()).size(16.0));
    ui.add_space(4.0);

    let Some(view) = state.series.as_ref().filter(|v| !v.is_empty()) else {
        return;
    };

    egui::CollapsingHeader::new("Values")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .column(Column::auto().at_least(60.0))
                .column(Column::remainder())
                .header(20.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("Year");
                    });
                    header.col(|ui| {
                        ui.strong(view.label());
                    });
                })
                .body(|mut body| {
                    for &(year, value) in &view.points {
                        body.row(18.0, |mut row| {
                            row.col(|ui| {
                                ui.label(year.to_string());
                            });
                            row.col(|ui| {
                                ui.label(value.to_string());
                            });
                        });
                    }
                });
        });
}
