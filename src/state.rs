use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::binder::{Dashboard, Recomputed};
use crate::color::ColorMap;
use crate::data::filter::SiteSelection;
use crate::data::loader::load_file;
use crate::data::model::{LaunchTable, PayloadRange};
use crate::view::{ProportionFigure, ScatterFigure};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dashboard (None until a table is loaded).
    pub dashboard: Option<Dashboard>,

    /// Colours for booster categories (scatter).
    pub booster_colors: ColorMap,

    /// Colours for pie slices, keyed by site name or outcome flag.
    pub slice_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded table, build the dashboard and colour maps.
    pub fn set_table(&mut self, table: LaunchTable) {
        let dashboard = Dashboard::new(table);

        self.booster_colors = ColorMap::new(dashboard.table().booster_categories());
        let mut slice_labels: Vec<String> = dashboard
            .site_options()
            .iter()
            .skip(1)
            .map(|o| o.value.clone())
            .collect();
        slice_labels.extend(["1".to_string(), "0".to_string()]);
        self.slice_colors = ColorMap::new(slice_labels.as_slice());

        self.dashboard = Some(dashboard);
        self.status_message = None;
    }

    /// Load a file and replace the dashboard. On failure the current
    /// dashboard stays and the error is shown in the status bar.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(table) => self.set_table(table),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    pub fn select_site(&mut self, site: SiteSelection) -> Recomputed {
        match &mut self.dashboard {
            Some(d) => d.set_selected_site(site),
            None => Recomputed::default(),
        }
    }

    pub fn set_payload_range(&mut self, range: PayloadRange) -> Recomputed {
        match &mut self.dashboard {
            Some(d) => d.set_payload_range(range),
            None => Recomputed::default(),
        }
    }

    /// Write both current figure descriptions as pretty JSON.
    pub fn export_figures(&self, path: &Path) -> Result<()> {
        let dashboard = self
            .dashboard
            .as_ref()
            .context("no dataset loaded, nothing to export")?;
        let json = figures_json(dashboard)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported figures to {}", path.display());
        Ok(())
    }
}

#[derive(Serialize)]
struct FigureExport<'a> {
    selected_site: &'a str,
    payload_range: PayloadRange,
    proportion: &'a ProportionFigure,
    scatter: &'a ScatterFigure,
}

fn figures_json(dashboard: &Dashboard) -> Result<String> {
    let export = FigureExport {
        selected_site: dashboard.selected_site().value(),
        payload_range: dashboard.payload_range(),
        proportion: dashboard.proportion_figure(),
        scatter: dashboard.scatter_figure(),
    };
    serde_json::to_string_pretty(&export).context("serializing figures")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;
    use tempfile::TempDir;

    fn loaded_state() -> AppState {
        let mut state = AppState::default();
        state.set_table(LaunchTable::from_records(vec![
            record("A", 1000.0, 1, "v1.0"),
            record("B", 2000.0, 0, "FT"),
        ]));
        state
    }

    #[test]
    fn set_table_builds_dashboard_and_colours() {
        let state = loaded_state();
        assert!(state.dashboard.is_some());
        assert_ne!(state.booster_colors.color_for("FT"), eframe::egui::Color32::GRAY);
        assert_ne!(state.slice_colors.color_for("A"), eframe::egui::Color32::GRAY);
        assert_ne!(state.slice_colors.color_for("1"), eframe::egui::Color32::GRAY);
    }

    #[test]
    fn failed_load_keeps_current_dashboard() {
        let mut state = loaded_state();
        state.load_path(Path::new("does/not/exist.csv"));
        assert!(state.dashboard.is_some());
        assert!(state.status_message.as_deref().unwrap_or_default().starts_with("Error"));
    }

    #[test]
    fn controls_without_dashboard_do_nothing() {
        let mut state = AppState::default();
        assert_eq!(state.select_site(SiteSelection::All), Recomputed::default());
        assert!(state.export_figures(Path::new("unused.json")).is_err());
    }

    #[test]
    fn export_writes_both_figures() {
        let mut state = loaded_state();
        state.select_site(SiteSelection::Site("A".into()));
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("figures.json");
        state.export_figures(&path).expect("export");

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).expect("read export")).expect("json");
        assert_eq!(value["selected_site"], "A");
        assert_eq!(value["proportion"]["slices"][0]["count"], 1);
        assert_eq!(value["scatter"]["points"][0]["x"], 1000.0);
        assert!(value["scatter"].get("error").is_none());
    }
}
