use eframe::egui::{Label, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 20.0;

/// Render the filtered records as a list.
pub fn record_table(ui: &mut Ui, state: &AppState) {
    if state.catalog.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to explore the catalog  (File → Open…)");
        });
        return;
    }
    if state.catalog.as_ref().is_some_and(|c| c.is_empty()) {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("The file contained no usable records");
        });
        return;
    }
    if state.visible.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No matching records");
        });
        return;
    }

    let records = &state.visible;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::initial(220.0).at_least(80.0))
        .column(Column::auto())
        .column(Column::initial(180.0))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(ROW_HEIGHT, |mut header| {
            for title in ["Name", "Rating", "Genres", "Status", "Episodes", "Aired", "Synopsis"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, records.len(), |mut row| {
                let rec = &records[row.index()];
                row.col(|ui| {
                    ui.add(Label::new(&rec.name).truncate());
                });
                row.col(|ui| {
                    ui.label(format!("{:.2}", rec.rating));
                });
                row.col(|ui| {
                    ui.add(Label::new(rec.genres.join(", ")).truncate());
                });
                row.col(|ui| {
                    ui.label(&rec.status);
                });
                row.col(|ui| {
                    ui.label(rec.episodes.to_string());
                });
                row.col(|ui| {
                    let aired = rec.aired.map(|r| r.to_string()).unwrap_or_else(|| "?".into());
                    ui.label(aired);
                });
                row.col(|ui| {
                    ui.add(Label::new(&rec.synopsis).truncate())
                        .on_hover_text(&rec.synopsis);
                });
            });
        });
}
