use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Value – a single cell of the dataset
// ---------------------------------------------------------------------------

/// A raw dataset cell. Source files are text, so cells stay text until a
/// renderer asks for numbers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    Text(String),
    /// Position absent from a short source row.
    Missing,
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Missing => None,
        }
    }

    /// `true` for cells that carry no data at all.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Text(s) => s.is_empty(),
            Value::Missing => true,
        }
    }

    /// Coerce to `f64`. `?`, empty and missing cells become NaN.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Value::Missing => Some(f64::NAN),
            Value::Text(s) => {
                let s = s.trim();
                if s.is_empty() || s == "?" {
                    Some(f64::NAN)
                } else {
                    s.parse::<f64>().ok()
                }
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Missing => write!(f, "<missing>"),
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnMeta – declared attribute information (ARFF only)
// ---------------------------------------------------------------------------

/// One declared attribute: its name and the categorical values listed in
/// its `{...}` domain (empty when none were declared).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMeta {
    pub name: String,
    pub values: Vec<String>,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// A rectangular table of named columns. Every row holds exactly
/// `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Build from a header and raw rows. Short rows are padded with
    /// [`Value::Missing`], rows with nothing but blank cells are dropped.
    ///
    /// Rows longer than the header are rejected; the returned error holds
    /// the offending row's index within `rows`.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, usize> {
        let width = columns.len();
        let mut kept = Vec::with_capacity(rows.len());
        for (i, mut row) in rows.into_iter().enumerate() {
            if row.len() > width {
                return Err(i);
            }
            row.resize(width, Value::Missing);
            if row.iter().all(Value::is_blank) {
                log::debug!("Dropping empty row {i}");
                continue;
            }
            kept.push(row);
        }
        Ok(Dataset {
            columns,
            rows: kept,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Positional index of a column by name (first match).
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of the column at `idx`, top to bottom.
    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().map(move |row| &row[idx])
    }

    /// Number of distinct values in the first column.
    pub fn first_column_distinct(&self) -> usize {
        if self.columns.is_empty() {
            return 0;
        }
        self.column_values(0).collect::<BTreeSet<_>>().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_row(cells: &[&str]) -> Vec<Value> {
        cells.iter().map(|&c| Value::from(c)).collect()
    }

    #[test]
    fn short_rows_are_padded_and_blank_rows_dropped() {
        let ds = Dataset::from_rows(
            vec!["a".into(), "b".into()],
            vec![text_row(&["1"]), text_row(&["", ""]), vec![], text_row(&["3", "4"])],
        )
        .unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows()[0], vec![Value::from("1"), Value::Missing]);
    }

    #[test]
    fn long_rows_are_rejected() {
        let err = Dataset::from_rows(vec!["a".into()], vec![text_row(&["1"]), text_row(&["1", "2"])])
            .unwrap_err();
        assert_eq!(err, 1);
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(Value::from(" 2.5 ").to_f64(), Some(2.5));
        assert!(Value::from("?").to_f64().unwrap().is_nan());
        assert!(Value::Missing.to_f64().unwrap().is_nan());
        assert!(Value::from("  ").to_f64().unwrap().is_nan());
        assert_eq!(Value::from("abc").to_f64(), None);
    }

    #[test]
    fn distinct_first_column() {
        let ds = Dataset::from_rows(
            vec!["id".into()],
            vec![text_row(&["x"]), text_row(&["y"]), text_row(&["x"])],
        )
        .unwrap();
        assert_eq!(ds.first_column_distinct(), 2);
    }
}
