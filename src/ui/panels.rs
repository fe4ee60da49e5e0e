use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::SiteSelection;
use crate::data::model::PayloadRange;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selector widgets
// ---------------------------------------------------------------------------

/// Render the left control panel: site selector and payload range.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("SpaceX Launch Records Dashboard");
    ui.separator();

    let Some(dashboard) = &state.dashboard else {
        ui.label("No dataset loaded.");
        return;
    };
    if dashboard.table().is_empty() {
        ui.label(RichText::new("The loaded file has no launches.").color(Color32::YELLOW));
    }

    // Copy what we need so we can mutate state after the widgets.
    let options = dashboard.site_options().to_vec();
    let current = dashboard.selected_site().clone();
    let bounds = dashboard.payload_bounds();
    let mut range = dashboard.payload_range();

    // ---- Site selector ----
    ui.strong("Launch site");
    let mut picked: Option<SiteSelection> = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for opt in &options {
                if ui
                    .selectable_label(current.value() == opt.value, &opt.label)
                    .clicked()
                {
                    picked = Some(SiteSelection::from_value(&opt.value));
                }
            }
        });
    if let Some(site) = picked {
        log::debug!("site selector -> {site}");
        state.select_site(site);
    }

    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload range (Kg):");
    let span = bounds.low..=bounds.high;
    let mut changed = ui
        .add(egui::Slider::new(&mut range.low, span.clone()).text("min"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut range.high, span).text("max"))
        .changed();
    if ui.small_button("Full range").clicked() {
        range = bounds;
        changed = true;
    }
    if range.is_empty() {
        ui.label(RichText::new("min is above max: nothing selected").color(Color32::YELLOW));
    }
    if changed {
        set_range(state, range);
    }
}

fn set_range(state: &mut AppState, range: PayloadRange) {
    log::debug!("payload slider -> {range}");
    state.set_payload_range(range);
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
            let can_export = state.dashboard.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export figures…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(d) = &state.dashboard {
            ui.label(format!(
                "{} launches loaded, {} in scatter",
                d.table().len(),
                d.scatter_figure().points.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export figures")
        .set_file_name("figures.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_figures(&path) {
            log::error!("Failed to export figures: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
