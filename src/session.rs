use std::path::PathBuf;

use crate::render::ChartKind;

// ---------------------------------------------------------------------------
// Render session
// ---------------------------------------------------------------------------

/// Output location and file numbering shared by a run of render calls.
///
/// Every successful render writes `pc_<counter>.html` and bumps the counter,
/// so indices are never reused within a session. Not synchronised: give each
/// thread its own session (and its own folder name).
#[derive(Debug, Clone)]
pub struct RenderSession {
    output_root: PathBuf,
    folder_name: String,
    counter: usize,
}

impl RenderSession {
    pub fn new(output_root: impl Into<PathBuf>, folder_name: impl Into<String>) -> Self {
        Self {
            output_root: output_root.into(),
            folder_name: folder_name.into(),
            counter: 0,
        }
    }

    pub fn folder_name(&self) -> &str {
        &self.folder_name
    }

    /// Index the next written file will get.
    pub fn counter(&self) -> usize {
        self.counter
    }

    /// `<root>/<Kind> (<folder>)`
    pub fn output_dir(&self, kind: ChartKind) -> PathBuf {
        self.output_root
            .join(format!("{} ({})", kind.label(), self.folder_name))
    }

    /// Target of the next render of `kind`, without consuming the index.
    pub fn next_path(&self, kind: ChartKind) -> PathBuf {
        self.output_dir(kind).join(format!("pc_{}.html", self.counter))
    }

    pub(crate) fn advance(&mut self) {
        self.counter += 1;
    }
}
