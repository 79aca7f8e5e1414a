//! Rendering: one bicluster in, one HTML chart out.
//!
//! ```text
//!   BiclusterRecord + Dataset
//!        │
//!        ▼
//!   ┌────────────┐
//!   │ membership │  0/1 flag per dataset row
//!   └────────────┘
//!        │
//!        ▼
//!   ┌────────────┐
//!   │   chart    │  project columns → plotly figure
//!   └────────────┘
//!        │
//!        ▼
//!   ┌────────────┐
//!   │    html    │  results/<Kind> (<folder>)/pc_<n>.html
//!   └────────────┘
//! ```

pub mod chart;
pub mod html;
pub mod membership;

use std::path::PathBuf;

use crate::bicluster::BiclusterRecord;
use crate::data::model::{ColumnMeta, Dataset, Value};
use crate::error::RenderError;
use crate::session::RenderSession;

use chart::{Cells, Dimension, Figure};

// ---------------------------------------------------------------------------
// Chart kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Categorical data: ribbons between category boxes.
    ParallelCategories,
    /// Numeric data: one polyline per row across vertical axes.
    ParallelCoordinates,
}

impl ChartKind {
    /// Directory label under the output root.
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::ParallelCategories => "ParallelCategories",
            ChartKind::ParallelCoordinates => "ParallelCoordinates",
        }
    }

    /// Uniqueness ratio of the first column below which row identifiers
    /// are read as positions. The two kinds differ on purpose.
    pub fn membership_threshold(self) -> f64 {
        match self {
            ChartKind::ParallelCategories => 0.5,
            ChartKind::ParallelCoordinates => 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Render `record` as a parallel-categories chart.
pub fn render_categorical(
    session: &mut RenderSession,
    record: &BiclusterRecord,
    dataset: &Dataset,
    meta: &[ColumnMeta],
) -> Result<PathBuf, RenderError> {
    render(ChartKind::ParallelCategories, session, record, dataset, meta)
}

/// Render `record` as a parallel-coordinates chart. Every projected cell
/// must be numeric, empty or `?`.
pub fn render_numeric(
    session: &mut RenderSession,
    record: &BiclusterRecord,
    dataset: &Dataset,
    meta: &[ColumnMeta],
) -> Result<PathBuf, RenderError> {
    render(ChartKind::ParallelCoordinates, session, record, dataset, meta)
}

/// Render one bicluster and return the path written.
///
/// Column lookup and numeric coercion happen before any directory or file
/// is created. The session counter only advances after a successful write.
pub fn render(
    kind: ChartKind,
    session: &mut RenderSession,
    record: &BiclusterRecord,
    dataset: &Dataset,
    meta: &[ColumnMeta],
) -> Result<PathBuf, RenderError> {
    let dimensions = project(kind, dataset, &record.columns)?;
    let color = membership::membership(dataset, &record.rows, kind.membership_threshold());
    let annotation = record
        .pvalue
        .map(|p| chart::annotation_text(p, meta, record.lifts.as_deref()));
    let figure = Figure::new(kind, dimensions, color, annotation);

    let path = session.next_path(kind);
    let title = format!(
        "{} ({}) #{}",
        kind.label(),
        session.folder_name(),
        session.counter()
    );
    html::write_html(&figure, &title, &path)?;
    session.advance();

    log::info!(
        "Wrote {} ({} columns, {} rows in bicluster)",
        path.display(),
        record.columns.len(),
        record.rows.len()
    );
    Ok(path)
}

/// One dimension per bicluster column, in the bicluster's order.
fn project(
    kind: ChartKind,
    dataset: &Dataset,
    columns: &[String],
) -> Result<Vec<Dimension>, RenderError> {
    if columns.is_empty() {
        return Err(RenderError::EmptyBicluster);
    }

    columns
        .iter()
        .map(|name| {
            let idx = dataset
                .column_index(name)
                .ok_or_else(|| RenderError::UnknownColumn(name.clone()))?;
            let values = match kind {
                ChartKind::ParallelCategories => Cells::Text(
                    dataset
                        .column_values(idx)
                        .map(|v| v.as_str().map(str::to_string))
                        .collect(),
                ),
                ChartKind::ParallelCoordinates => Cells::Numeric(numeric_column(dataset, idx, name)?),
            };
            Ok(Dimension {
                label: name.clone(),
                values,
                categoryorder: None,
            })
        })
        .collect()
}

fn numeric_column(dataset: &Dataset, idx: usize, name: &str) -> Result<Vec<f64>, RenderError> {
    dataset
        .column_values(idx)
        .enumerate()
        .map(|(row, v)| {
            v.to_f64().ok_or_else(|| RenderError::NotNumeric {
                column: name.to_string(),
                row,
                value: match v {
                    Value::Text(s) => s.clone(),
                    Value::Missing => String::new(),
                },
            })
        })
        .collect()
}
