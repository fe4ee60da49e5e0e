use crate::data::filter::{build_site_options, filter, SiteOption, SiteSelection};
use crate::data::model::{LaunchTable, PayloadRange, SelectionError};
use crate::view::{reduce_proportion, reduce_scatter, ProportionFigure, ScatterFigure};

// ---------------------------------------------------------------------------
// Control events
// ---------------------------------------------------------------------------

/// A change delivered by one of the two controls.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    SiteChanged(SiteSelection),
    PayloadRangeChanged(PayloadRange),
}

/// Which output slots an event recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Recomputed {
    pub proportion: bool,
    pub scatter: bool,
}

// ---------------------------------------------------------------------------
// Dashboard – table, selector state, and derived figures
// ---------------------------------------------------------------------------

/// Owns the table and keeps both figures in sync with the controls.
///
/// * Site change → proportion (site only) and scatter (site + payload).
/// * Payload change → scatter only.
pub struct Dashboard {
    table: LaunchTable,
    site_options: Vec<SiteOption>,
    payload_bounds: PayloadRange,
    selected_site: SiteSelection,
    payload_range: PayloadRange,
    proportion_figure: ProportionFigure,
    scatter_figure: ScatterFigure,
}

impl Dashboard {
    /// Build the dashboard with `All` sites and the full observed payload range.
    pub fn new(table: LaunchTable) -> Self {
        let site_options = build_site_options(&table);
        let payload_bounds = table
            .payload_bounds()
            .unwrap_or_else(|| PayloadRange::new(0.0, 0.0));
        let selected_site = SiteSelection::All;

        let proportion_figure = compute_proportion(&table, &selected_site);
        let scatter_figure = compute_scatter(&table, &selected_site, payload_bounds);

        log::debug!(
            "dashboard ready: {} launches, {} site options, payload {}",
            table.len(),
            site_options.len(),
            payload_bounds
        );

        Self {
            table,
            site_options,
            payload_bounds,
            selected_site,
            payload_range: payload_bounds,
            proportion_figure,
            scatter_figure,
        }
    }

    /// Apply one control change and recompute the slots that depend on it.
    /// Re-delivering the current value recomputes nothing.
    pub fn apply(&mut self, event: ControlEvent) -> Recomputed {
        match event {
            ControlEvent::SiteChanged(site) => {
                if site == self.selected_site {
                    return Recomputed::default();
                }
                self.selected_site = site;
                self.proportion_figure = compute_proportion(&self.table, &self.selected_site);
                self.scatter_figure =
                    compute_scatter(&self.table, &self.selected_site, self.payload_range);
                Recomputed {
                    proportion: true,
                    scatter: true,
                }
            }
            ControlEvent::PayloadRangeChanged(range) => {
                // Bitwise comparison so a repeated NaN still counts as "unchanged".
                if range.low.to_bits() == self.payload_range.low.to_bits()
                    && range.high.to_bits() == self.payload_range.high.to_bits()
                {
                    return Recomputed::default();
                }
                self.payload_range = range;
                self.scatter_figure =
                    compute_scatter(&self.table, &self.selected_site, self.payload_range);
                Recomputed {
                    proportion: false,
                    scatter: true,
                }
            }
        }
    }

    pub fn set_selected_site(&mut self, site: SiteSelection) -> Recomputed {
        self.apply(ControlEvent::SiteChanged(site))
    }

    pub fn set_payload_range(&mut self, range: PayloadRange) -> Recomputed {
        self.apply(ControlEvent::PayloadRangeChanged(range))
    }

    pub fn table(&self) -> &LaunchTable {
        &self.table
    }

    pub fn site_options(&self) -> &[SiteOption] {
        &self.site_options
    }

    /// Observed payload `[min, max]`; the slider bounds.
    pub fn payload_bounds(&self) -> PayloadRange {
        self.payload_bounds
    }

    pub fn selected_site(&self) -> &SiteSelection {
        &self.selected_site
    }

    pub fn payload_range(&self) -> PayloadRange {
        self.payload_range
    }

    pub fn proportion_figure(&self) -> &ProportionFigure {
        &self.proportion_figure
    }

    pub fn scatter_figure(&self) -> &ScatterFigure {
        &self.scatter_figure
    }

    /// Row indices currently behind the scatter view.
    pub fn scatter_rows(&self) -> Vec<usize> {
        if self.payload_range.validate().is_err() {
            return Vec::new();
        }
        filter(&self.table, &self.selected_site, self.payload_range)
            .indices()
            .to_vec()
    }
}

// ---------------------------------------------------------------------------
// Slot computations
// ---------------------------------------------------------------------------

// Rule A: the pie ignores the payload range.
fn compute_proportion(table: &LaunchTable, site: &SiteSelection) -> ProportionFigure {
    let subset = filter(table, site, PayloadRange::unbounded());
    if subset.is_empty() {
        log::debug!("no launches for {site}; proportion view is empty");
    }
    reduce_proportion(&subset, site)
}

// Rule B
fn compute_scatter(table: &LaunchTable, site: &SiteSelection, range: PayloadRange) -> ScatterFigure {
    match try_compute_scatter(table, site, range) {
        Ok(fig) => fig,
        Err(e) => {
            log::warn!("scatter view not updated for {site}: {e}");
            ScatterFigure::error(e.to_string())
        }
    }
}

fn try_compute_scatter(
    table: &LaunchTable,
    site: &SiteSelection,
    range: PayloadRange,
) -> Result<ScatterFigure, SelectionError> {
    range.validate()?;
    let subset = filter(table, site, range);
    log::debug!("scatter: {} of {} launches for {site} in {range}", subset.len(), table.len());
    Ok(reduce_scatter(&subset, site))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn table() -> LaunchTable {
        LaunchTable::from_records(vec![
            record("A", 1000.0, 1, "v1.0"),
            record("B", 2000.0, 1, "FT"),
            record("A", 3000.0, 1, "FT"),
            record("A", 8000.0, 0, "B4"),
            record("B", 5000.0, 0, "B5"),
        ])
    }

    #[test]
    fn starts_with_all_sites_and_full_range() {
        let dash = Dashboard::new(table());
        assert_eq!(dash.selected_site(), &SiteSelection::All);
        assert_eq!(dash.payload_range(), PayloadRange::new(1000.0, 8000.0));
        assert_eq!(dash.site_options().len(), 3);
        assert_eq!(dash.proportion_figure().total(), 5);
        assert_eq!(dash.scatter_figure().points.len(), 5);
    }

    #[test]
    fn site_change_recomputes_both_views() {
        let mut dash = Dashboard::new(table());
        let fired = dash.set_selected_site(SiteSelection::Site("B".into()));
        assert_eq!(
            fired,
            Recomputed {
                proportion: true,
                scatter: true
            }
        );
        assert_eq!(dash.proportion_figure().title, "Total Success Launches for site B");
        assert_eq!(dash.scatter_figure().points.len(), 2);
    }

    #[test]
    fn payload_change_leaves_proportion_untouched() {
        let mut dash = Dashboard::new(table());
        dash.set_selected_site(SiteSelection::Site("A".into()));
        let pie_before = dash.proportion_figure().clone();

        let fired = dash.set_payload_range(PayloadRange::new(0.0, 2500.0));
        assert_eq!(
            fired,
            Recomputed {
                proportion: false,
                scatter: true
            }
        );
        assert_eq!(dash.proportion_figure(), &pie_before);
        assert_eq!(dash.proportion_figure().total(), 3);
        assert_eq!(dash.scatter_figure().points.len(), 1);
    }

    #[test]
    fn repeated_values_do_not_recompute() {
        let mut dash = Dashboard::new(table());
        assert_eq!(dash.set_selected_site(SiteSelection::All), Recomputed::default());
        let range = dash.payload_range();
        assert_eq!(dash.set_payload_range(range), Recomputed::default());
    }

    #[test]
    fn scatter_uses_current_range_after_site_change() {
        let mut dash = Dashboard::new(table());
        dash.set_payload_range(PayloadRange::new(0.0, 4000.0));
        dash.set_selected_site(SiteSelection::Site("A".into()));
        let xs: Vec<f64> = dash.scatter_figure().points.iter().map(|p| p.x).collect();
        assert_eq!(xs, [1000.0, 3000.0]);
        assert_eq!(dash.scatter_rows(), [0, 2]);
    }

    #[test]
    fn nan_range_replaces_scatter_with_error_figure() {
        let mut dash = Dashboard::new(table());
        let fired = dash.set_payload_range(PayloadRange::new(f64::NAN, 5000.0));
        assert!(fired.scatter);
        let fig = dash.scatter_figure();
        assert!(fig.points.is_empty());
        assert!(fig.error.as_deref().unwrap_or_default().contains("finite"));
        assert!(dash.scatter_rows().is_empty());

        dash.set_payload_range(PayloadRange::new(0.0, 10000.0));
        assert!(dash.scatter_figure().error.is_none());
        assert_eq!(dash.scatter_figure().points.len(), 5);
    }

    #[test]
    fn inverted_range_is_empty_not_an_error() {
        let mut dash = Dashboard::new(table());
        dash.set_payload_range(PayloadRange::new(6000.0, 2000.0));
        assert!(dash.scatter_figure().points.is_empty());
        assert!(dash.scatter_figure().error.is_none());
    }

    #[test]
    fn empty_table_still_builds() {
        let dash = Dashboard::new(LaunchTable::default());
        assert_eq!(dash.payload_bounds(), PayloadRange::new(0.0, 0.0));
        assert!(dash.proportion_figure().slices.is_empty());
        assert!(dash.scatter_figure().points.is_empty());
    }
}
