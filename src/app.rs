use std::path::Path;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    /// Start with the given dataset loaded if it exists; otherwise open empty.
    pub fn with_dataset(path: &Path) -> Self {
        let mut app = Self::default();
        if path.exists() {
            app.state.load_path(path);
        } else {
            log::info!("{} not found; waiting for File → Open…", path.display());
        }
        app
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let state = &self.state;
            match &state.dashboard {
                Some(d) => {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        plot::dashboard_view(ui, d, &state.slice_colors, &state.booster_colors);
                    });
                }
                None => plot::empty_view(ui),
            }
        });
    }
}
