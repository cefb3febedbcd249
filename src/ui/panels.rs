use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Metric;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left selection panel: region → country → metric.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("World Happiness");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            region_selector(ui, state);
            ui.separator();
            country_selector(ui, state);
            ui.separator();
            metric_selector(ui, state);
        });
}

fn region_selector(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Select Region:");

    // Clone so the loop can mutate state.
    let regions = state.dataset.regions.clone();
    for region in &regions {
        let selected = state.region.as_deref() == Some(region.as_str());
        let text = RichText::new(region).color(state.region_colors.color_for(region));
        if ui.radio(selected, text).clicked() && !selected {
            state.select_region(region);
        }
    }
}

fn country_selector(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Select Country:");

    let options = state.country_options.countries.clone();
    let current = state.country.clone().unwrap_or_default();

    ui.add_enabled_ui(!options.is_empty(), |ui: &mut Ui| {
        egui::ComboBox::from_id_salt("country")
            .selected_text(&current)
            .show_ui(ui, |ui: &mut Ui| {
                for country in &options {
                    if ui
                        .selectable_label(current == *country, country)
                        .clicked()
                        && current != *country
                    {
                        state.select_country(Some(country.clone()));
                    }
                }
            });
    });
}

fn metric_selector(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Score or Rank?");

    let mut metric = state.metric;
    for m in Metric::ALL {
        ui.radio_value(&mut metric, m, m.label());
    }
    if metric != state.metric {
        state.set_metric(metric);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                // Errors are already surfaced through `status_message`.
                let _ = state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} records, {} regions",
            state.dataset.len(),
            state.dataset.regions.len()
        ));

        if state.debug {
            ui.separator();
            ui.monospace(format!(
                "region={:?} country={:?} metric={}",
                state.region, state.country, state.metric
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open happiness data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        let _ = state.open(&path);
    }
}
