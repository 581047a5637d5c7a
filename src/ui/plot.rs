use std::collections::{BTreeMap, HashMap};

use eframe::egui::{pos2, vec2, Align2, Color32, FontId, Rect, Sense, Ui};
use egui_plot::{Plot, PlotPoints, Points};

use crate::color::{heat_color, NO_DATA};
use crate::data::projection::{nearest_point, series_label, ScatterPoint};
use crate::state::AppState;

const GENRE_LABEL_WIDTH: f32 = 130.0;
const YEAR_AXIS_HEIGHT: f32 = 24.0;
const MIN_YEAR_LABEL_SPACING: f32 = 36.0;

fn placeholder(ui: &mut Ui, text: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading(text);
    });
}

// ---------------------------------------------------------------------------
// Scatter plot: release year vs rating
// ---------------------------------------------------------------------------

/// Render the rating / release-year scatter of the filtered records.
pub fn scatter_plot(ui: &mut Ui, state: &AppState) {
    if state.catalog.is_none() {
        placeholder(ui, "Open a file to explore the catalog  (File → Open…)");
        return;
    }
    if state.catalog.as_ref().is_some_and(|c| c.is_empty()) {
        placeholder(ui, "The file contained no usable records");
        return;
    }
    if state.points.is_empty() {
        placeholder(ui, "No matching records");
        return;
    }

    ui.strong(series_label(&state.filters.genres));

    // One series per status so the legend doubles as a colour key.
    let mut by_status: BTreeMap<&str, Vec<&ScatterPoint>> = BTreeMap::new();
    for p in &state.points {
        by_status.entry(p.status.as_str()).or_default().push(p);
    }

    let (y_min, y_max) = state.config.rating_bounds;

    Plot::new("scatter_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label("Year released")
        .y_axis_label("Rating")
        .include_y(y_min)
        .include_y(y_max)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(|name, value| {
            // `name` is empty when the pointer is not over a series.
            match nearest_point(&state.points, name, value.x, value.y) {
                Some(p) if !name.is_empty() => p.describe(),
                _ => format!("Year: {:.0}\nRating: {:.2}", value.x, value.y),
            }
        })
        .show(ui, |plot_ui| {
            for (status, points) in by_status {
                let color = state
                    .status_colors
                    .as_ref()
                    .map(|cm| cm.color_for(status))
                    .unwrap_or(Color32::LIGHT_BLUE);

                let series: PlotPoints = points.iter().map(|p| [p.x as f64, p.y]).collect();

                plot_ui.points(
                    Points::new(series)
                        .name(status)
                        .color(color)
                        .radius(3.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Heatmap: genre × year average rating
// ---------------------------------------------------------------------------

/// Render the genre/year matrix. Cells without data are grey, distinct from
/// any rating colour.
pub fn heatmap(ui: &mut Ui, state: &AppState) {
    if state.catalog.is_none() {
        placeholder(ui, "Open a file to explore the catalog  (File → Open…)");
        return;
    }

    if state.catalog.as_ref().is_some_and(|c| c.is_empty()) {
        placeholder(ui, "The file contained no usable records");
        return;
    }

    let matrix = &state.matrix;
    let genres = matrix.genres();
    let year_span = match matrix.year_domain() {
        Some(span) if !matrix.is_empty() => span,
        _ => {
            placeholder(ui, "No matching records with air dates");
            return;
        }
    };
    let years: Vec<i32> = year_span.collect();

    ui.strong("Average rating per genre and year");

    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
    let rect = response.rect;
    let grid = Rect::from_min_max(
        pos2(rect.left() + GENRE_LABEL_WIDTH, rect.top()),
        pos2(rect.right(), rect.bottom() - YEAR_AXIS_HEIGHT),
    );
    let cell_w = grid.width() / years.len() as f32;
    let cell_h = grid.height() / genres.len().max(1) as f32;
    let font = FontId::proportional(11.0);
    let text_color = ui.visuals().text_color();

    let cell_rect = |row: usize, col: usize| {
        Rect::from_min_size(
            pos2(grid.left() + col as f32 * cell_w, grid.top() + row as f32 * cell_h),
            vec2(cell_w, cell_h),
        )
        .shrink(0.5)
    };

    // Every slot starts as "no data"; populated cells are painted over it.
    let mut rows: HashMap<&str, usize> = HashMap::new();
    for (row, genre) in genres.iter().enumerate() {
        rows.insert(genre, row);
        painter.text(
            pos2(grid.left() - 6.0, grid.top() + (row as f32 + 0.5) * cell_h),
            Align2::RIGHT_CENTER,
            genre,
            font.clone(),
            text_color,
        );
        for col in 0..years.len() {
            painter.rect_filled(cell_rect(row, col), 0.0, NO_DATA);
        }
    }
    for cell in matrix.cells() {
        let Some(&row) = rows.get(cell.genre) else {
            continue;
        };
        let col = (cell.year - years[0]) as usize;
        let fill = heat_color(Some(cell.value), state.config.rating_bounds);
        painter.rect_filled(cell_rect(row, col), 0.0, fill);
    }

    let step = (MIN_YEAR_LABEL_SPACING / cell_w).ceil().max(1.0) as usize;
    for (col, year) in years.iter().enumerate().step_by(step) {
        painter.text(
            pos2(grid.left() + (col as f32 + 0.5) * cell_w, grid.bottom() + 4.0),
            Align2::CENTER_TOP,
            year,
            font.clone(),
            text_color,
        );
    }

    let Some(pos) = response.hover_pos().filter(|p| grid.contains(*p)) else {
        return;
    };
    let col = ((pos.x - grid.left()) / cell_w) as usize;
    let row = ((pos.y - grid.top()) / cell_h) as usize;
    if let (Some(year), Some(genre)) = (years.get(col), genres.get(row)) {
        let text = match matrix.get(*year, genre) {
            Some(v) => format!("{genre}, {year}: {v:.2}"),
            None => format!("{genre}, {year}: no data"),
        };
        response.on_hover_text_at_pointer(text);
    }
}
