//! Schema types describing the expected shape of an upload.

mod table;
mod types;

pub use table::{columns, ExpectedColumn, TableSchema};
pub use types::{LengthBound, SemanticType};
