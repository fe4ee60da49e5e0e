use std::fmt;

use super::model::{LaunchRecord, LaunchTable, PayloadRange};

/// Selector value meaning "no site filter".
pub const ALL_SENTINEL: &str = "ALL";

/// Label shown for [`ALL_SENTINEL`] in the site selector.
pub const ALL_SITES_LABEL: &str = "All Sites";

// ---------------------------------------------------------------------------
// Site selection
// ---------------------------------------------------------------------------

/// Current value of the site selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Map a selector option value back to a selection.
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SENTINEL {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    /// The option value this selection corresponds to.
    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SENTINEL,
            SiteSelection::Site(s) => s,
        }
    }

    pub fn accepts(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => record.site == *s,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "{ALL_SITES_LABEL}"),
            SiteSelection::Site(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Option builder
// ---------------------------------------------------------------------------

/// One entry of the site selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOption {
    pub label: String,
    pub value: String,
}

/// The "all" sentinel followed by every distinct site, first-seen order.
pub fn build_site_options(table: &LaunchTable) -> Vec<SiteOption> {
    let mut options = vec![SiteOption {
        label: ALL_SITES_LABEL.to_string(),
        value: ALL_SENTINEL.to_string(),
    }];
    for rec in table.records() {
        if !options[1..].iter().any(|o| o.value == rec.site) {
            options.push(SiteOption {
                label: rec.site.clone(),
                value: rec.site.clone(),
            });
        }
    }
    options
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Rows of a table selected by a filter, identified by their row index.
#[derive(Debug, Clone)]
pub struct Subset<'a> {
    table: &'a LaunchTable,
    indices: Vec<usize>,
}

impl<'a> Subset<'a> {
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Selected records in table order.
    pub fn records(&self) -> impl Iterator<Item = &'a LaunchRecord> + '_ {
        let table = self.table;
        self.indices.iter().filter_map(move |&i| table.get(i))
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Return the rows that pass both the site and the payload predicate.
///
/// * `SiteSelection::All` accepts every site; an unknown site matches nothing.
/// * The payload bounds are inclusive; an inverted range matches nothing.
pub fn filter<'a>(table: &'a LaunchTable, site: &SiteSelection, range: PayloadRange) -> Subset<'a> {
    let indices = if range.is_empty() {
        Vec::new()
    } else {
        table
            .records()
            .iter()
            .enumerate()
            .filter(|(_, rec)| site.accepts(rec) && range.contains(rec.payload_mass))
            .map(|(i, _)| i)
            .collect()
    };
    Subset { table, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn sample_table() -> LaunchTable {
        LaunchTable::from_records(vec![
            record("CCAFS LC-40", 0.0, 0, "v1.0"),
            record("VAFB SLC-4E", 500.0, 0, "v1.1"),
            record("KSC LC-39A", 5300.0, 1, "FT"),
            record("CCAFS LC-40", 2296.0, 1, "FT"),
            record("KSC LC-39A", 9600.0, 1, "B4"),
            record("CCAFS SLC-40", 3669.0, 1, "B5"),
            record("VAFB SLC-4E", 9600.0, 1, "FT"),
        ])
    }

    #[test]
    fn options_start_with_sentinel_then_sites_in_first_seen_order() {
        let table = LaunchTable::from_records(vec![
            record("A", 1.0, 1, "v1"),
            record("B", 2.0, 0, "v1"),
            record("A", 3.0, 1, "v1"),
        ]);
        let opts = build_site_options(&table);
        let pairs: Vec<(&str, &str)> = opts
            .iter()
            .map(|o| (o.label.as_str(), o.value.as_str()))
            .collect();
        assert_eq!(pairs, [("All Sites", "ALL"), ("A", "A"), ("B", "B")]);
    }

    #[test]
    fn empty_table_yields_only_sentinel() {
        let opts = build_site_options(&LaunchTable::default());
        assert_eq!(opts.len(), 1);
        assert_eq!(opts[0].value, ALL_SENTINEL);
    }

    #[test]
    fn selection_round_trips_through_option_values() {
        assert_eq!(SiteSelection::from_value("ALL"), SiteSelection::All);
        let site = SiteSelection::from_value("KSC LC-39A");
        assert_eq!(site, SiteSelection::Site("KSC LC-39A".into()));
        assert_eq!(site.value(), "KSC LC-39A");
    }

    #[test]
    fn filter_is_sound_and_complete() {
        let table = sample_table();
        let ranges = [
            PayloadRange::new(0.0, 10000.0),
            PayloadRange::new(500.0, 5300.0),
            PayloadRange::new(2300.0, 2300.0),
        ];
        let mut selections = vec![SiteSelection::All];
        selections.extend(
            build_site_options(&table)[1..]
                .iter()
                .map(|o| SiteSelection::from_value(&o.value)),
        );

        for site in &selections {
            for &range in &ranges {
                let subset = filter(&table, site, range);
                for rec in subset.records() {
                    assert!(site.accepts(rec) && range.contains(rec.payload_mass));
                }
                let expected: Vec<usize> = table
                    .records()
                    .iter()
                    .enumerate()
                    .filter(|(_, r)| site.accepts(r) && range.contains(r.payload_mass))
                    .map(|(i, _)| i)
                    .collect();
                assert_eq!(subset.indices(), expected.as_slice());
            }
        }
    }

    #[test]
    fn single_row_is_selected_by_site_and_range() {
        let table = LaunchTable::from_records(vec![record("A", 5000.0, 1, "v1")]);
        let subset = filter(
            &table,
            &SiteSelection::Site("A".into()),
            PayloadRange::new(0.0, 10000.0),
        );
        assert_eq!(subset.indices(), [0]);
    }

    #[test]
    fn zero_range_excludes_positive_payloads() {
        let table = sample_table();
        let subset = filter(&table, &SiteSelection::All, PayloadRange::new(0.0, 0.0));
        assert!(subset.records().all(|r| r.payload_mass == 0.0));
        assert_eq!(subset.len(), 1);
    }

    #[test]
    fn inverted_range_and_unknown_site_are_empty() {
        let table = sample_table();
        assert!(filter(&table, &SiteSelection::All, PayloadRange::new(6000.0, 100.0)).is_empty());
        assert!(filter(
            &table,
            &SiteSelection::Site("Boca Chica".into()),
            PayloadRange::unbounded()
        )
        .is_empty());
    }

    #[test]
    fn filtering_twice_gives_identical_rows() {
        let table = sample_table();
        let site = SiteSelection::Site("KSC LC-39A".into());
        let range = PayloadRange::new(1000.0, 9600.0);
        let a = filter(&table, &site, range);
        let b = filter(&table, &site, range);
        assert_eq!(a.indices(), b.indices());
    }
}
