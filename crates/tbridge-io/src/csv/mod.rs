//! CSV reading and writing.

mod reader;
mod writer;

pub use reader::{parse_csv, read_csv};
pub use writer::{WEIGHT_HEADER, write_vector_csv};
