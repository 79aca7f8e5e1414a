//! Parallel-coordinates and parallel-categories charts for biclustering
//! results.
//!
//! Load a dataset with [`data::loader::load_file`], the miner's result file
//! with [`bicluster::load_biclusters`], then render each record through a
//! [`session::RenderSession`] with [`render::render`].

pub mod bicluster;
pub mod color;
pub mod data;
pub mod error;
pub mod render;
pub mod session;

pub use bicluster::{BiclusterRecord, ResultSet};
pub use data::model::{ColumnMeta, Dataset, Value};
pub use error::{ParseError, RenderError};
pub use render::ChartKind;
pub use session::RenderSession;
