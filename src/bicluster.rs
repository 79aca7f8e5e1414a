//! Reader for biclustering result files.
//!
//! A results file is a sequence of blocks. A block opens with a line that
//! starts with `FOUND`, holds one indented line per bicluster and closes on
//! a blank line:
//!
//! ```text
//! FOUND 2 biclusters
//!  I=[1,2] Y=[colA,colB] X=[0,1] pvalue=0.01
//!  I=[3] Y=[colC] X=[4,5] pvalue=2.3E-5 Lifts=[1.2,0.8]
//!
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Context;

use crate::error::ParseError;

/// Characters stripped from both ends of a list-valued field.
const LIST_TRIM: &[char] = &['[', ']', '\'', '"', ',', ' ', '\r', '\n'];

/// One bicluster: the rows and columns it spans plus the statistics the
/// miner attached to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BiclusterRecord {
    pub pattern: Vec<String>,
    /// Column names in file order; this is the chart's axis order.
    pub columns: Vec<String>,
    /// Row identifiers, either positional indices or first-column values.
    pub rows: Vec<String>,
    pub pvalue: Option<f64>,
    pub lifts: Option<Vec<f64>>,
}

/// Biclusters grouped by zero-based block index.
pub type ResultSet = BTreeMap<usize, Vec<BiclusterRecord>>;

/// Load and parse a results file.
pub fn load_biclusters(path: &Path) -> anyhow::Result<ResultSet> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let results = read_biclusters(BufReader::new(file))
        .with_context(|| format!("reading biclusters from {}", path.display()))?;
    log::info!(
        "Read {} bicluster(s) in {} block(s) from {}",
        results.values().map(Vec::len).sum::<usize>(),
        results.len(),
        path.display()
    );
    Ok(results)
}

/// Parse a results stream.
pub fn read_biclusters<R: BufRead>(reader: R) -> Result<ResultSet, ParseError> {
    let mut blocks = BlockReader::default();
    for (line_no, line) in reader.lines().enumerate() {
        blocks.feed(line_no + 1, &line?)?;
    }
    Ok(blocks.finish())
}

// ---------------------------------------------------------------------------
// Block state machine
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
enum ReaderState {
    #[default]
    Idle,
    InBlock {
        index: usize,
        pending: Vec<BiclusterRecord>,
    },
}

#[derive(Debug, Default)]
struct BlockReader {
    state: ReaderState,
    opened: usize,
    results: ResultSet,
}

impl BlockReader {
    fn feed(&mut self, line_no: usize, line: &str) -> Result<(), ParseError> {
        if line.trim().is_empty() {
            if let ReaderState::InBlock { index, pending } = std::mem::take(&mut self.state) {
                if !pending.is_empty() {
                    self.results.insert(index, pending);
                }
            }
            return Ok(());
        }

        if line.starts_with("FOUND") {
            if let ReaderState::InBlock { index, pending } = &self.state {
                if !pending.is_empty() {
                    log::warn!(
                        "line {line_no}: block {index} was not closed by a blank line, dropping {} bicluster(s)",
                        pending.len()
                    );
                }
            }
            self.state = ReaderState::InBlock {
                index: self.opened,
                pending: Vec::new(),
            };
            self.opened += 1;
            return Ok(());
        }

        if let ReaderState::InBlock { pending, .. } = &mut self.state {
            if line.starts_with(' ') {
                pending.push(parse_record(line_no, line)?);
            }
        }
        Ok(())
    }

    /// An unclosed trailing block is not committed.
    fn finish(self) -> ResultSet {
        if let ReaderState::InBlock { index, pending } = &self.state {
            if !pending.is_empty() {
                log::warn!(
                    "block {index} has no closing blank line, dropping {} bicluster(s)",
                    pending.len()
                );
            }
        }
        self.results
    }
}

// ---------------------------------------------------------------------------
// Record lines
// ---------------------------------------------------------------------------

fn parse_record(line_no: usize, line: &str) -> Result<BiclusterRecord, ParseError> {
    let mut record = BiclusterRecord::default();

    for token in line.split(' ') {
        if token.starts_with("I=") {
            record.pattern = list_field(token);
        } else if token.starts_with("Y=") {
            record.columns = list_field(token);
        } else if token.starts_with("X=") {
            record.rows = list_field(token);
        } else if token.starts_with("pvalue=") {
            let value = field_value(token).trim();
            let pvalue = value
                .parse::<f64>()
                .map_err(|_| ParseError::number(line_no, "pvalue", value))?;
            record.pvalue = Some(pvalue);
        } else if token.starts_with("Lifts=") {
            // Lifts runs to the end of the line; nothing after it is read.
            record.lifts = Some(parse_lifts(line_no, line)?);
            break;
        }
    }

    Ok(record)
}

/// Text between the first and second `=` of a token.
fn field_value(token: &str) -> &str {
    token.split('=').nth(1).unwrap_or("")
}

fn list_field(token: &str) -> Vec<String> {
    field_value(token)
        .trim_matches(LIST_TRIM)
        .split(',')
        .map(|s| s.trim_matches(LIST_TRIM))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_lifts(line_no: usize, line: &str) -> Result<Vec<f64>, ParseError> {
    let rest = line.split_once("Lifts=").map_or("", |(_, rest)| rest);
    rest.trim_start_matches('[')
        .split(']')
        .next()
        .unwrap_or("")
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<f64>()
                .map_err(|_| ParseError::number(line_no, "Lifts", part))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(src: &str) -> ResultSet {
        read_biclusters(Cursor::new(src)).unwrap()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_block() {
        let rs = read("FOUND 1 bicluster\n I=[1,2] Y=[colA,colB] X=[0,1] pvalue=0.01\n\n");
        assert_eq!(rs.len(), 1);
        assert_eq!(
            rs[&0],
            vec![BiclusterRecord {
                pattern: strings(&["1", "2"]),
                columns: strings(&["colA", "colB"]),
                rows: strings(&["0", "1"]),
                pvalue: Some(0.01),
                lifts: None,
            }]
        );
    }

    #[test]
    fn unclosed_trailing_block_is_dropped() {
        let rs = read("FOUND 1 bicluster\n I=[1] Y=[a] X=[0] pvalue=0.5\n");
        assert!(rs.is_empty());
    }

    #[test]
    fn no_found_line_gives_empty_set() {
        let rs = read(" I=[1] Y=[a] X=[0]\n\nsome header\n\n");
        assert!(rs.is_empty());
    }

    #[test]
    fn empty_block_is_not_committed() {
        let rs = read("FOUND 0 biclusters\n\nFOUND 1\n Y=[a] X=[1]\n\n");
        assert_eq!(rs.keys().copied().collect::<Vec<_>>(), vec![1]);
        assert_eq!(rs[&1][0].columns, strings(&["a"]));
    }

    #[test]
    fn lifts_consume_rest_of_line() {
        let rs = read("FOUND\n Y=[a] X=[0] Lifts=[1.5,0.25] pvalue=0.3\n\n");
        let rec = &rs[&0][0];
        assert_eq!(rec.lifts, Some(vec![1.5, 0.25]));
        assert_eq!(rec.pvalue, None);
    }

    #[test]
    fn lifts_ignore_trailing_garbage() {
        let rs = read("FOUND\n Y=[a] X=[0] pvalue=0.2 Lifts=[2, 0.5] extra=[x] 7\n\n");
        let rec = &rs[&0][0];
        assert_eq!(rec.lifts, Some(vec![2.0, 0.5]));
        assert_eq!(rec.pvalue, Some(0.2));
    }

    #[test]
    fn found_inside_open_block_discards_pending() {
        let rs = read("FOUND\n Y=[a] X=[0]\nFOUND\n Y=[b] X=[1]\n\n");
        assert_eq!(rs.len(), 1);
        assert_eq!(rs[&1][0].columns, strings(&["b"]));
    }

    #[test]
    fn unindented_lines_are_ignored() {
        let rs = read("FOUND\nY=[a] X=[0]\n Y=[b] X=[2]\n\n");
        assert_eq!(rs[&0].len(), 1);
        assert_eq!(rs[&0][0].columns, strings(&["b"]));
    }

    #[test]
    fn bad_pvalue_reports_line() {
        let err = read_biclusters(Cursor::new("FOUND\n Y=[a] pvalue=abc\n\n")).unwrap_err();
        match err {
            ParseError::Number { line, key, .. } => {
                assert_eq!(line, 2);
                assert_eq!(key, "pvalue");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn quoted_entries_are_stripped() {
        let rs = read("FOUND\n Y=['a','b'] X=[\"r1\",\"r2\"]\n\n");
        assert_eq!(rs[&0][0].columns, strings(&["a", "b"]));
        assert_eq!(rs[&0][0].rows, strings(&["r1", "r2"]));
    }
}
