use eframe::egui::Ui;
use egui_plot::{Line, MarkerShape, Plot, PlotPoints, Points};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Time-series chart (central panel)
// ---------------------------------------------------------------------------

/// Render the yearly chart for the selected country and metric.
pub fn series_plot(ui: &mut Ui, state: &AppState) {
    let view = match &state.series {
        Some(view) if !view.is_empty() => view,
        _ => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("No data for the current selection");
            });
            return;
        }
    };

    let color = state
        .region
        .as_deref()
        .map(|r| state.region_colors.color_for(r))
        .unwrap_or(eframe::egui::Color32::LIGHT_BLUE);
    let label = view.label();

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(view.title());
    });

    let xy: Vec<[f64; 2]> = view
        .points
        .iter()
        .map(|&(year, value)| [year as f64, value])
        .collect();

    Plot::new("happiness_plot")
        .x_axis_label("Year")
        .y_axis_label(&label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let line = Line::new(PlotPoints::from(xy.clone()))
                .name(&label)
                .color(color)
                .width(2.0);
            let markers = Points::new(PlotPoints::from(xy))
                .name(&label)
                .color(color)
                .shape(MarkerShape::Circle)
                .radius(4.0);

            plot_ui.line(line);
            plot_ui.points(markers);
        });
}
