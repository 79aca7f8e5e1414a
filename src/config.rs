use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use bicviz::ChartKind;

/// Command-line options.
#[derive(Parser, Debug)]
#[command(
    name = "bicviz",
    version,
    about = "Render biclusters as parallel categories / coordinates charts.",
    long_about = None
)]
pub struct Config {
    /// Dataset file (.arff, .csv or .txt).
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Bicluster results file.
    #[arg(value_name = "RESULTS")]
    pub results: PathBuf,

    /// Chart type: categories for nominal data, coordinates for numeric data.
    #[arg(short, long, value_enum, default_value_t = Mode::Categories)]
    pub mode: Mode,

    /// Output folder label (defaults to the data file stem).
    #[arg(short, long)]
    pub label: Option<String>,

    /// Root directory for the generated charts.
    #[arg(short, long = "out-dir", value_name = "DIR", default_value = "results")]
    pub out_dir: PathBuf,

    /// Only render this block of the results file.
    #[arg(short, long, value_name = "N")]
    pub block: Option<usize>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Categories,
    Coordinates,
}

impl From<Mode> for ChartKind {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Categories => ChartKind::ParallelCategories,
            Mode::Coordinates => ChartKind::ParallelCoordinates,
        }
    }
}

impl Config {
    pub fn folder_label(&self) -> String {
        self.label.clone().unwrap_or_else(|| stem(&self.data))
    }
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("data")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::parse_from(["bicviz", "dir/iris.arff", "result.txt"]);
        assert_eq!(cfg.mode, Mode::Categories);
        assert_eq!(cfg.out_dir, PathBuf::from("results"));
        assert_eq!(cfg.folder_label(), "iris");
        assert_eq!(cfg.block, None);
    }

    #[test]
    fn explicit_options() {
        let cfg = Config::parse_from([
            "bicviz", "d.csv", "r.txt", "--mode", "coordinates", "--label", "run1", "-b", "2",
        ]);
        assert_eq!(ChartKind::from(cfg.mode), ChartKind::ParallelCoordinates);
        assert_eq!(cfg.folder_label(), "run1");
        assert_eq!(cfg.block, Some(2));
    }
}
