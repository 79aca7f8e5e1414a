use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::{ColumnMeta, Dataset, Value};

/// Characters stripped from both ends of an ARFF attribute name.
const ARFF_NAME_TRIM: &[char] = &['[', ' ', ',', '\'', '}', '"', ']', '\t'];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.arff` – Weka ARFF; also yields per-attribute metadata
/// * `.csv`  – header line + comma-separated rows, no quoting
/// * `.txt`  – title line, `name: [a, b, ...]` header line, `|`-separated rows
///
/// Column metadata is only produced for ARFF input; other formats return an
/// empty list.
pub fn load_file(path: &Path) -> Result<(Dataset, Vec<ColumnMeta>)> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let file = || File::open(path).with_context(|| format!("opening {}", path.display()));

    let (dataset, meta) = match ext.as_str() {
        "arff" => read_arff(BufReader::new(file()?)),
        "csv" => read_csv(file()?).map(|ds| (ds, Vec::new())),
        "txt" => read_txt(BufReader::new(file()?)).map(|ds| (ds, Vec::new())),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} rows x {} columns from {}",
        dataset.len(),
        dataset.columns().len(),
        path.display()
    );
    Ok((dataset, meta))
}

// ---------------------------------------------------------------------------
// ARFF loader
// ---------------------------------------------------------------------------

/// ARFF layout:
///
/// ```text
/// @RELATION name
/// @ATTRIBUTE id      NUMERIC
/// @ATTRIBUTE class   {A,B}
/// @DATA
/// 1,A
/// 2,B
/// ```
///
/// Every `@ATTRIBUTE` becomes a column; a repeated name keeps only its first
/// position.
pub fn read_arff<R: BufRead>(reader: R) -> Result<(Dataset, Vec<ColumnMeta>)> {
    let mut meta: Vec<ColumnMeta> = Vec::new();
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    let mut in_data = false;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", line_no + 1))?;
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() || line.starts_with('%') {
            continue;
        }

        if in_data {
            raw_rows.push(line.split(',').map(str::to_string).collect());
        } else if starts_with_keyword(line, "@ATTRIBUTE") {
            meta.push(parse_attribute(line, meta.is_empty()));
        } else if starts_with_keyword(line, "@DATA") {
            in_data = true;
        }
    }

    // First occurrence of each name, paired with its raw position.
    let mut kept: Vec<(String, usize)> = Vec::new();
    for (pos, attr) in meta.iter().enumerate() {
        if !kept.iter().any(|(name, _)| *name == attr.name) {
            kept.push((attr.name.clone(), pos));
        }
    }
    if kept.len() < meta.len() {
        log::debug!("Collapsed {} duplicate attribute(s)", meta.len() - kept.len());
    }

    let rows: Vec<Vec<Value>> = raw_rows
        .iter()
        .map(|raw| {
            kept.iter()
                .map(|&(_, pos)| match raw.get(pos) {
                    Some(cell) => Value::from(cell.as_str()),
                    None => Value::Missing,
                })
                .collect()
        })
        .collect();

    let columns = kept.into_iter().map(|(name, _)| name).collect();
    let dataset = Dataset::from_rows(columns, rows)
        .map_err(|i| anyhow::anyhow!("ARFF data row {i} is wider than the header"))?;
    Ok((dataset, meta))
}

fn starts_with_keyword(line: &str, keyword: &str) -> bool {
    line.get(..keyword.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(keyword))
}

fn parse_attribute(line: &str, first: bool) -> ColumnMeta {
    let name = line
        .split_whitespace()
        .nth(1)
        .unwrap_or("")
        .trim_matches(ARFF_NAME_TRIM)
        .to_string();

    // The first attribute is the row identifier; its domain is never used.
    let values = match line.find('{') {
        Some(open) if !first => {
            let inner = &line[open + 1..];
            let inner = inner.rfind('}').map_or(inner, |close| &inner[..close]);
            if inner.trim().is_empty() {
                Vec::new()
            } else {
                // Positions matter: lifts are paired with values by index.
                inner
                    .split(',')
                    .map(|v| v.trim().trim_matches(['\'', '"']).to_string())
                    .collect()
            }
        }
        _ => Vec::new(),
    };

    ColumnMeta { name, values }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per line.
///
/// Fields are split on every comma; quotes are ordinary characters, so a
/// quoted field containing a comma spans two columns.
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .quoting(false)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    let mut lines = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        lines.push(record.position().map_or(row_no + 2, |p| p.line() as usize));
        rows.push(record.iter().map(Value::from).collect::<Vec<_>>());
    }

    Dataset::from_rows(headers, rows).map_err(|i| {
        anyhow::anyhow!("CSV line {}: more fields than header columns", lines[i])
    })
}

// ---------------------------------------------------------------------------
// TXT loader
// ---------------------------------------------------------------------------

/// TXT layout:
///
/// ```text
/// <title, ignored>
/// Attributes: [a, b, c]
/// 0|x|y|z|
/// 1|x|y|z|
/// ```
///
/// A leading `lines` column holds the first field of every row.
pub fn read_txt<R: BufRead>(reader: R) -> Result<Dataset> {
    let mut columns: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    let mut lines = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", line_no + 1))?;
        let line = line.trim_end_matches(['\r', '\n']);
        match line_no {
            0 => continue,
            1 => {
                let Some((_, names)) = line.split_once(": [") else {
                    bail!("TXT line 2: expected `: [` before the column list");
                };
                let mut cols = vec!["lines".to_string()];
                cols.extend(names.trim_end_matches(']').split(", ").map(str::to_string));
                columns = Some(cols);
            }
            _ => {
                if line.trim().is_empty() {
                    continue;
                }
                lines.push(line_no + 1);
                rows.push(
                    line.trim_end_matches('|')
                        .split('|')
                        .map(Value::from)
                        .collect::<Vec<_>>(),
                );
            }
        }
    }

    let columns = columns.context("TXT file has no column header line")?;
    Dataset::from_rows(columns, rows)
        .map_err(|i| anyhow::anyhow!("TXT line {}: more fields than header columns", lines[i]))
}
