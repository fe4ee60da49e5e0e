use serde::Serialize;

use crate::data::filter::{SiteSelection, Subset};
use crate::data::model::Outcome;

// ---------------------------------------------------------------------------
// Figure descriptions (renderer-agnostic)
// ---------------------------------------------------------------------------

/// What a proportion slice is keyed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceKey {
    Site(String),
    Outcome(Outcome),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProportionSlice {
    pub key: SliceKey,
    pub label: String,
    pub count: usize,
}

/// Grouped counts for the pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProportionFigure {
    pub title: String,
    pub slices: Vec<ProportionSlice>,
}

impl ProportionFigure {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub color_key: String,
}

/// Point list for the payload vs. outcome scatter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterFigure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
    /// Set when the figure could not be computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScatterFigure {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Payload vs. outcome unavailable".to_string(),
            x_label: PAYLOAD_AXIS.to_string(),
            y_label: OUTCOME_AXIS.to_string(),
            points: Vec::new(),
            error: Some(message.into()),
        }
    }
}

const PAYLOAD_AXIS: &str = "Payload Mass (kg)";
const OUTCOME_AXIS: &str = "class";

// ---------------------------------------------------------------------------
// Reducers
// ---------------------------------------------------------------------------

/// Group a subset into pie slices.
///
/// All sites: one slice per site. A single site: one slice per outcome.
/// Slice counts always sum to `subset.len()`.
pub fn reduce_proportion(subset: &Subset<'_>, site: &SiteSelection) -> ProportionFigure {
    let mut slices: Vec<ProportionSlice> = Vec::new();

    for rec in subset.records() {
        let key = match site {
            SiteSelection::All => SliceKey::Site(rec.site.clone()),
            SiteSelection::Site(_) => SliceKey::Outcome(rec.outcome),
        };
        match slices.iter_mut().find(|s| s.key == key) {
            Some(slice) => slice.count += 1,
            None => {
                let label = match &key {
                    SliceKey::Site(s) => s.clone(),
                    SliceKey::Outcome(o) => o.to_string(),
                };
                slices.push(ProportionSlice { key, label, count: 1 });
            }
        }
    }

    let title = match site {
        SiteSelection::All => "Total Success Launches by Site".to_string(),
        SiteSelection::Site(s) => format!("Total Success Launches for site {s}"),
    };

    ProportionFigure { title, slices }
}

/// Project every row of the subset to a scatter point, in order.
pub fn reduce_scatter(subset: &Subset<'_>, site: &SiteSelection) -> ScatterFigure {
    let points = subset
        .records()
        .map(|rec| ScatterPoint {
            x: rec.payload_mass,
            y: f64::from(rec.outcome.flag()),
            color_key: rec.booster_version_category.clone(),
        })
        .collect();

    ScatterFigure {
        title: format!("Correlation between Payload and Success for {site}"),
        x_label: PAYLOAD_AXIS.to_string(),
        y_label: OUTCOME_AXIS.to_string(),
        points,
        error: None,
    }
}
