use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::StatusSelection;
use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.catalog.is_none() {
        ui.label("No catalog loaded.");
        return;
    }

    // Clone what we need so we can mutate state inside the loops.
    let genres = state.universe.genres.clone();
    let statuses = state.universe.statuses.clone();
    let years = state.universe.years.clone();
    let buckets = state.config.episode_buckets.clone();

    if ui
        .add_enabled(state.filters.is_active(), egui::Button::new("Reset filters"))
        .clicked()
    {
        state.reset_filters();
    }
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Status ----
            ui.strong("Status");
            let current = state.filters.status.clone();
            egui::ComboBox::from_id_salt("status")
                .selected_text(current.label())
                .show_ui(ui, |ui: &mut Ui| {
                    // Entry 0 is the "no filter" option; the rest are literal statuses.
                    for (i, status) in statuses.iter().enumerate() {
                        let option = if i == 0 {
                            StatusSelection::All
                        } else {
                            StatusSelection::Only(status.clone())
                        };
                        if ui.selectable_label(current == option, status).clicked() {
                            state.set_status(option);
                        }
                    }
                });

            // ---- Year ----
            ui.strong("Aired in");
            let current = state
                .filters
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "any year".to_string());
            egui::ComboBox::from_id_salt("year")
                .selected_text(current)
                .show_ui(ui, |ui: &mut Ui| {
                    if ui
                        .selectable_label(state.filters.year.is_none(), "any year")
                        .clicked()
                    {
                        state.set_year(None);
                    }
                    let Some(span) = years else { return };
                    for year in span.rev() {
                        let selected = state.filters.year == Some(year);
                        if ui.selectable_label(selected, year.to_string()).clicked() {
                            state.set_year(Some(year));
                        }
                    }
                });
            ui.separator();

            // ---- Episode buckets (any of) ----
            let n_selected = state.filters.episode_buckets.len();
            egui::CollapsingHeader::new(
                RichText::new(format!("Episodes  ({n_selected}/{})", buckets.len())).strong(),
            )
            .id_salt("episodes")
            .default_open(true)
            .show(ui, |ui: &mut Ui| {
                for bucket in &buckets {
                    let mut checked = state.filters.episode_buckets.contains(bucket);
                    if ui.checkbox(&mut checked, bucket).changed() {
                        state.toggle_bucket(bucket);
                    }
                }
            });

            // ---- Genres (all of) ----
            let n_selected = state.filters.genres.len();
            egui::CollapsingHeader::new(
                RichText::new(format!("Genres  ({n_selected}/{})", genres.len())).strong(),
            )
            .id_salt("genres")
            .default_open(true)
            .show(ui, |ui: &mut Ui| {
                ui.small("Entries must have every checked genre.");
                for genre in &genres {
                    let mut checked = state.filters.genres.contains(genre);
                    if ui.checkbox(&mut checked, genre).changed() {
                        state.toggle_genre(genre);
                    }
                }
            });
        });
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
        });

        ui.separator();

        for (view, label) in [
            (View::Scatter, "Scatter"),
            (View::Heatmap, "Heatmap"),
            (View::Records, "Records"),
        ] {
            if ui.selectable_label(state.view == view, label).clicked() {
                state.view = view;
            }
        }

        ui.separator();

        if let Some(catalog) = &state.catalog {
            ui.label(format!(
                "{} records loaded, {} visible",
                catalog.len(),
                state.visible.len()
            ))
            .on_hover_text(catalog.report.to_string());
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open catalog")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
