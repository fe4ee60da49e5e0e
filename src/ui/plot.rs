use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Shape, Stroke, Ui, Vec2};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::binder::Dashboard;
use crate::color::ColorMap;
use crate::view::{ProportionFigure, ScatterFigure};

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render both charts and the row table in the central panel.
pub fn dashboard_view(ui: &mut Ui, dashboard: &Dashboard, slice_colors: &ColorMap, booster_colors: &ColorMap) {
    let chart_height = (ui.available_height() * 0.45).max(160.0);

    proportion_chart(ui, dashboard.proportion_figure(), slice_colors, chart_height);
    ui.separator();
    scatter_chart(ui, dashboard.scatter_figure(), booster_colors, chart_height);
    ui.separator();

    egui::CollapsingHeader::new("Launches in scatter view")
        .default_open(false)
        .show(ui, |ui: &mut Ui| launch_table(ui, dashboard));
}

pub fn empty_view(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Open a launch records file  (File → Open…)");
    });
}

// ---------------------------------------------------------------------------
// Pie chart (egui painter)
// ---------------------------------------------------------------------------

/// Maximum arc covered by one triangle of a wedge, in radians.
const WEDGE_STEP: f32 = TAU / 90.0;

pub fn proportion_chart(ui: &mut Ui, figure: &ProportionFigure, colors: &ColorMap, height: f32) {
    ui.vertical_centered(|ui: &mut Ui| ui.strong(&figure.title));

    let total = figure.total();
    if total == 0 {
        ui.label("No launches match the current selection.");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        let (response, painter) = ui.allocate_painter(Vec2::splat(height), Sense::hover());
        let rect = response.rect;
        let center = rect.center();
        let radius = rect.width().min(rect.height()) * 0.45;

        let mut start = -FRAC_PI_2;
        for slice in &figure.slices {
            let frac = slice.count as f32 / total as f32;
            let sweep = frac * TAU;
            let color = colors.color_for(&slice.label);

            // Fan of thin triangles keeps every shape convex, whatever the sweep.
            let steps = (sweep / WEDGE_STEP).ceil().max(1.0) as usize;
            for i in 0..steps {
                let a0 = start + sweep * i as f32 / steps as f32;
                let a1 = start + sweep * (i + 1) as f32 / steps as f32;
                painter.add(Shape::convex_polygon(
                    vec![
                        center,
                        center + radius * Vec2::angled(a0),
                        center + radius * Vec2::angled(a1),
                    ],
                    color,
                    Stroke::NONE,
                ));
            }

            let mid = start + sweep / 2.0;
            painter.text(
                center + 0.65 * radius * Vec2::angled(mid),
                Align2::CENTER_CENTER,
                format!("{:.1}%", frac * 100.0),
                FontId::proportional(12.0),
                Color32::WHITE,
            );
            start += sweep;
        }

        ui.vertical(|ui: &mut Ui| {
            for slice in &figure.slices {
                ui.horizontal(|ui: &mut Ui| {
                    ui.label(RichText::new("■").color(colors.color_for(&slice.label)));
                    ui.label(format!("{}  ({})", slice.label, slice.count));
                });
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Scatter chart (egui_plot)
// ---------------------------------------------------------------------------

/// Group points by colour key, first-seen order, so each key gets one legend entry.
fn group_points(figure: &ScatterFigure) -> Vec<(&str, Vec<[f64; 2]>)> {
    let mut groups: Vec<(&str, Vec<[f64; 2]>)> = Vec::new();
    for p in &figure.points {
        match groups.iter_mut().find(|(k, _)| *k == p.color_key) {
            Some((_, pts)) => pts.push([p.x, p.y]),
            None => groups.push((&p.color_key, vec![[p.x, p.y]])),
        }
    }
    groups
}

pub fn scatter_chart(ui: &mut Ui, figure: &ScatterFigure, colors: &ColorMap, height: f32) {
    ui.vertical_centered(|ui: &mut Ui| ui.strong(&figure.title));

    if let Some(err) = &figure.error {
        ui.label(RichText::new(err).color(Color32::RED));
    }

    let groups = group_points(figure);

    Plot::new("scatter_plot")
        .legend(Legend::default())
        .height(height)
        .x_axis_label(figure.x_label.as_str())
        .y_axis_label(figure.y_label.as_str())
        .include_x(0.0)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (key, pts) in groups {
                let points: PlotPoints = pts.into_iter().collect();
                plot_ui.points(
                    Points::new(points)
                        .name(key)
                        .color(colors.color_for(key))
                        .radius(4.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Row table (egui_extras)
// ---------------------------------------------------------------------------

fn launch_table(ui: &mut Ui, dashboard: &Dashboard) {
    let rows = dashboard.scatter_rows();
    let table = dashboard.table();

    TableBuilder::new(ui)
        .striped(true)
        .max_scroll_height(240.0)
        .column(Column::auto())
        .column(Column::auto().at_least(120.0))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["#", "Launch Site", "Payload Mass (kg)", "class", "Booster Version Category"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let idx = rows[row.index()];
                let Some(rec) = table.get(idx) else {
                    return;
                };
                row.col(|ui: &mut Ui| {
                    ui.label(idx.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.site);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.1}", rec.payload_mass));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.outcome.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.booster_version_category);
                });
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter, SiteSelection};
    use crate::data::model::{record, LaunchTable, PayloadRange};
    use crate::view::reduce_scatter;

    #[test]
    fn points_group_by_booster_in_first_seen_order() {
        let table = LaunchTable::from_records(vec![
            record("A", 100.0, 1, "FT"),
            record("A", 200.0, 0, "v1.1"),
            record("B", 300.0, 1, "FT"),
        ]);
        let subset = filter(&table, &SiteSelection::All, PayloadRange::unbounded());
        let fig = reduce_scatter(&subset, &SiteSelection::All);
        let groups = group_points(&fig);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], ("FT", vec![[100.0, 1.0], [300.0, 1.0]]));
        assert_eq!(groups[1], ("v1.1", vec![[200.0, 0.0]]));
    }
}
