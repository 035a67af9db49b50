//! Filter and query engine over an extracted publication list.
//!
//! Pure functions: the source list is only borrowed, and every call recomputes
//! the whole view from the given [`QueryState`].

use std::collections::HashSet;

use crate::models::{PublicationRecord, QueryState};

/// Records of a source list that satisfy a query, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredView<'a> {
    records: Vec<&'a PublicationRecord>,
}

impl<'a> FilteredView<'a> {
    /// Matching records.
    #[must_use]
    pub fn records(&self) -> &[&'a PublicationRecord] {
        &self.records
    }

    /// Iterate over matching records.
    pub fn iter(&self) -> impl Iterator<Item = &'a PublicationRecord> + '_ {
        self.records.iter().copied()
    }

    /// Number of matching records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Clone the matching records out of the source list.
    #[must_use]
    pub fn to_records(&self) -> Vec<PublicationRecord> {
        self.records.iter().map(|r| (*r).clone()).collect()
    }
}

impl<'s, 'a> IntoIterator for &'s FilteredView<'a> {
    type Item = &'a PublicationRecord;
    type IntoIter = std::iter::Copied<std::slice::Iter<'s, &'a PublicationRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter().copied()
    }
}

/// Apply a query to a publication list.
///
/// A record is kept when the lowercased search term occurs in the lowercased
/// title, the lowercased authors, or the raw publication date, and, if a year
/// is selected, the record's parsed year equals it. An unparseable date never
/// matches a selected year.
#[must_use]
pub fn filter<'a>(records: &'a [PublicationRecord], state: &QueryState) -> FilteredView<'a> {
    let term = state.search_term.to_lowercase();
    let records = records
        .iter()
        .filter(|record| matches_term(record, &term) && matches_year(record, state.selected_year))
        .collect();
    FilteredView { records }
}

/// Check a single record against a query.
#[must_use]
pub fn matches(record: &PublicationRecord, state: &QueryState) -> bool {
    matches_term(record, &state.search_term.to_lowercase())
        && matches_year(record, state.selected_year)
}

fn matches_term(record: &PublicationRecord, lowered_term: &str) -> bool {
    lowered_term.is_empty()
        || record.title.to_lowercase().contains(lowered_term)
        || record.authors.to_lowercase().contains(lowered_term)
        || record.publication_date.contains(lowered_term)
}

fn matches_year(record: &PublicationRecord, selected: Option<i32>) -> bool {
    match selected {
        Some(year) => record.year() == Some(year),
        None => true,
    }
}

/// Distinct publication years in order of first occurrence.
///
/// Computed over the full, unfiltered list. Dates without a parseable year
/// contribute nothing.
#[must_use]
pub fn year_options(records: &[PublicationRecord]) -> Vec<i32> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(PublicationRecord::year)
        .filter(|year| seen.insert(*year))
        .collect()
}

/// Distinct publication years, newest first.
#[must_use]
pub fn year_options_sorted(records: &[PublicationRecord]) -> Vec<i32> {
    let mut years = year_options(records);
    years.sort_unstable_by(|a, b| b.cmp(a));
    years
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, authors: &str, date: &str) -> PublicationRecord {
        PublicationRecord {
            title: title.to_string(),
            authors: authors.to_string(),
            publication_date: date.to_string(),
            ..Default::default()
        }
    }

    fn sample() -> Vec<PublicationRecord> {
        vec![
            record("Graph Neural Networks", "A Smith, B Jones", "2021-05"),
            record("Sparse Attention", "C Lee", "2022-01"),
            record("Untitled Draft", "", ""),
        ]
    }

    #[test]
    fn test_empty_state_keeps_everything() {
        let records = sample();
        assert_eq!(filter(&records, &QueryState::default()).len(), 3);
    }

    #[test]
    fn test_year_selection() {
        let records = sample();
        let view = filter(&records, &QueryState::new("", Some(2021)));
        assert_eq!(view.to_records(), vec![records[0].clone()]);
    }

    #[test]
    fn test_term_is_case_insensitive_on_title_and_authors() {
        let records = sample();
        assert_eq!(filter(&records, &QueryState::new("GRAPH", None)).len(), 1);
        assert_eq!(filter(&records, &QueryState::new("c lee", None)).len(), 1);
    }

    #[test]
    fn test_term_matches_date_substring() {
        let records = sample();
        let view = filter(&records, &QueryState::new("2022", None));
        assert_eq!(view.records()[0].title, "Sparse Attention");
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn test_predicates_compose() {
        let records = sample();
        assert!(filter(&records, &QueryState::new("sparse", Some(2021))).is_empty());
        assert_eq!(filter(&records, &QueryState::new("sparse", Some(2022))).len(), 1);
    }

    #[test]
    fn test_unparseable_date_never_matches_year() {
        let records = sample();
        let view = filter(&records, &QueryState::new("draft", Some(0)));
        assert!(view.is_empty());
    }

    #[test]
    fn test_year_options_first_occurrence() {
        let records = vec![
            record("a", "", "2020"),
            record("b", "", "2022-03"),
            record("c", "", "2020-11"),
            record("d", "", "bogus"),
            record("e", "", "2021"),
        ];
        assert_eq!(year_options(&records), vec![2020, 2022, 2021]);
        assert_eq!(year_options_sorted(&records), vec![2022, 2021, 2020]);
    }

    #[test]
    fn test_matches_single() {
        let r = record("Graph", "X", "2019");
        assert!(matches(&r, &QueryState::new("gr", Some(2019))));
        assert!(!matches(&r, &QueryState::new("zz", None)));
    }

    #[test]
    fn test_view_iterates_by_reference() {
        let records = sample();
        let view = filter(&records, &QueryState::new("s", None));

        let mut titles = Vec::new();
        for record in &view {
            titles.push(record.title.as_str());
        }
        assert_eq!(titles, vec!["Graph Neural Networks", "Sparse Attention"]);
        assert_eq!(view.iter().count(), view.len());
    }
}
