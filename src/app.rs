use eframe::egui;

use crate::config::ViewerConfig;
use crate::state::{AppState, View};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AnimeLensApp {
    pub state: AppState,
}

impl AnimeLensApp {
    pub fn new(config: ViewerConfig) -> Self {
        let initial = config.initial_path.clone();
        let mut state = AppState::new(config);
        if let Some(path) = initial {
            state.open(&path);
        }
        Self { state }
    }
}

impl eframe::App for AnimeLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: selected view ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.view {
            View::Scatter => plot::scatter_plot(ui, &self.state),
            View::Heatmap => plot::heatmap(ui, &self.state),
            View::Records => table::record_table(ui, &self.state),
        });
    }
}
