use std::collections::HashSet;

use crate::data::model::{Dataset, Value};

/// How a bicluster's row identifiers are matched against the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMatch {
    /// Identifiers are row positions (`"0"`, `"1"`, ...).
    Positional,
    /// Identifiers are values of the dataset's first column.
    FirstColumn,
}

/// Pick the matching rule from how unique the first column is.
///
/// With `d` distinct first-column values over `n` rows, identifiers are
/// positional when `d < n * threshold`. A threshold of `1.0` therefore
/// only accepts a fully unique first column as an identifier column.
pub fn row_match(dataset: &Dataset, threshold: f64) -> RowMatch {
    let distinct = dataset.first_column_distinct() as f64;
    if distinct < dataset.len() as f64 * threshold {
        RowMatch::Positional
    } else {
        RowMatch::FirstColumn
    }
}

/// One `0`/`1` flag per dataset row: `1` when the row belongs to the
/// bicluster.
pub fn membership(dataset: &Dataset, rows: &[String], threshold: f64) -> Vec<u8> {
    let wanted: HashSet<&str> = rows.iter().map(String::as_str).collect();
    match row_match(dataset, threshold) {
        RowMatch::Positional => (0..dataset.len())
            .map(|i| u8::from(wanted.contains(i.to_string().as_str())))
            .collect(),
        RowMatch::FirstColumn => dataset
            .column_values(0)
            .map(|v| match v {
                Value::Text(s) => u8::from(wanted.contains(s.as_str())),
                Value::Missing => 0,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ChartKind;

    fn dataset(first: &[&str]) -> Dataset {
        Dataset::from_rows(
            vec!["id".into(), "v".into()],
            first.iter().map(|&id| vec![Value::from(id), Value::from("x")]).collect(),
        )
        .unwrap()
    }

    fn ids(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unique_first_column_matches_values_in_both_modes() {
        let ds = dataset(&["a", "b", "c", "d"]);
        for kind in [ChartKind::ParallelCategories, ChartKind::ParallelCoordinates] {
            assert_eq!(row_match(&ds, kind.membership_threshold()), RowMatch::FirstColumn);
        }
        assert_eq!(membership(&ds, &ids(&["b", "d"]), 1.0), vec![0, 1, 0, 1]);
    }

    #[test]
    fn modes_diverge_on_partly_unique_first_column() {
        // 3 distinct values over 4 rows: ratio 0.75.
        let ds = dataset(&["1", "2", "3", "3"]);
        let rows = ids(&["0", "3"]);

        let categorical = ChartKind::ParallelCategories.membership_threshold();
        assert_eq!(row_match(&ds, categorical), RowMatch::FirstColumn);
        assert_eq!(membership(&ds, &rows, categorical), vec![0, 0, 1, 1]);

        let numeric = ChartKind::ParallelCoordinates.membership_threshold();
        assert_eq!(row_match(&ds, numeric), RowMatch::Positional);
        assert_eq!(membership(&ds, &rows, numeric), vec![1, 0, 0, 1]);
    }

    #[test]
    fn low_cardinality_first_column_is_positional() {
        let ds = dataset(&["A", "A", "A", "A", "B"]);
        assert_eq!(row_match(&ds, 0.5), RowMatch::Positional);
        assert_eq!(membership(&ds, &ids(&["2"]), 0.5), vec![0, 0, 1, 0, 0]);
    }

    #[test]
    fn empty_dataset() {
        let ds = Dataset::default();
        assert!(membership(&ds, &ids(&["0"]), 0.5).is_empty());
    }
}
