//! Tabular dataset models for the attribute-oriented and vector-oriented
//! representations.
//!
//! # Representations
//!
//! - **Attribute-oriented**: a [`Schema`] of named attributes and
//!   [`Instance`]s holding one [`Value`] per attribute. Categorical values are
//!   labels; missing values are the symbolic [`Value::Missing`].
//! - **Vector-oriented**: a [`VectorLayout`] and [`DataPoint`]s split into a
//!   numeric vector and a categorical code vector. The target column is stored
//!   on the [`VectorDataset`]. Missing values are `NaN` or [`MISSING_CODE`].
//!
//! # Example
//!
//! ```
//! use tbridge_model::{Attribute, AttributeDataset, Instance, Schema, Value};
//!
//! let schema = Schema::new(
//!     "weather",
//!     vec![
//!         Attribute::numeric("temperature"),
//!         Attribute::categorical("play", ["yes", "no"]),
//!     ],
//!     Some(1),
//! )
//! .unwrap();
//! let mut dataset = AttributeDataset::new(schema);
//! dataset
//!     .push(Instance::new(vec![Value::numeric(21.5), Value::label("yes")]))
//!     .unwrap();
//! assert_eq!(dataset.len(), 1);
//! ```

mod attribute;
mod error;
mod instance;
mod render;
mod vector;

#[cfg(feature = "polars")]
mod polars_ext;

pub use attribute::{Attribute, AttributeKind, Schema};
pub use error::{ModelError, Result, check_weight};
pub use instance::{AttributeDataset, Instance, Value};
pub use render::quote;
pub use vector::{
    CategoricalInfo, DataPoint, MISSING_CODE, TargetDescriptor, TargetValue, VectorDataset,
    VectorLayout, is_missing_code,
};

#[cfg(feature = "polars")]
pub use polars_ext::WEIGHT_COLUMN;
