//! Dataset reading and writing for tbridge.
//!
//! # Features
//!
//! - **ARFF**: read dense ARFF files into attribute datasets and write them back
//! - **CSV**: read CSV files with kind inference; export vector datasets
//! - **Class selection**: pick the target attribute by keyword, position, or name
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tbridge_io::{ClassIndex, read_arff};
//!
//! let dataset = read_arff(Path::new("data/weather.arff"), &ClassIndex::Last)?;
//! println!("{}", dataset.schema().name());
//! ```

mod arff;
mod class;
mod csv;
mod error;

use std::path::Path;

use tbridge_model::AttributeDataset;

// === Error Types ===
pub use error::{IoError, Result};

// === Class Selection ===
pub use class::ClassIndex;

// === ARFF ===
pub use arff::{parse_arff, read_arff, write_arff};

// === CSV ===
pub use self::csv::{WEIGHT_HEADER, parse_csv, read_csv, write_vector_csv};

/// Read an attribute dataset, choosing the format by file extension.
///
/// `.csv` files are read as CSV; anything else as ARFF.
pub fn read_dataset(path: &Path, class: &ClassIndex) -> Result<AttributeDataset> {
    let is_csv = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("csv"));
    if is_csv {
        read_csv(path, class)
    } else {
        read_arff(path, class)
    }
}
