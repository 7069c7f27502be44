//! Conversion between attribute-oriented and vector-oriented datasets.
//!
//! # Features
//!
//! - **Classification**: partition a schema into numeric features,
//!   categorical features, skipped attributes, and the target
//! - **Canonical ordering**: numeric, then categorical, then target
//! - **Label coding**: labels map to dense codes in declared order
//! - **Missing values**: `Missing` ↔ `NaN` / [`MISSING_CODE`](tbridge_model::MISSING_CODE)
//! - **Learner bridge**: train vector-oriented learners on attribute-oriented data
//!
//! # Example
//!
//! ```
//! use tbridge_convert::{ConversionOptions, to_attribute_dataset, to_vector_dataset};
//! use tbridge_model::{Attribute, AttributeDataset, Instance, Schema, Value};
//!
//! let schema = Schema::new(
//!     "demo",
//!     vec![
//!         Attribute::categorical("color", ["red", "green"]),
//!         Attribute::numeric("size"),
//!     ],
//!     None,
//! )?;
//! let mut dataset = AttributeDataset::new(schema);
//! dataset.push(Instance::new(vec![Value::label("green"), Value::numeric(2.0)]))?;
//!
//! let vectors = to_vector_dataset(&dataset)?;
//! assert_eq!(vectors.points()[0].numeric, vec![2.0]);
//! assert_eq!(vectors.points()[0].categorical, vec![1]);
//!
//! let back = to_attribute_dataset(&vectors, &ConversionOptions::new())?;
//! assert_eq!(back.schema().attributes()[0].name, "size");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod assemble;
mod classify;
mod codec;
mod context;
mod convert;
mod error;
pub mod learner;
mod options;
mod row;

pub use assemble::DatasetAssembler;
pub use classify::{Partition, SkipReason, SkippedAttribute, TargetAttribute, TargetRole, classify};
pub use codec::CodeMap;
pub use context::{ConversionContext, TargetCodec};
pub use convert::{AttributeToVector, VectorToAttribute, to_attribute_dataset, to_vector_dataset};
pub use error::{ConvertError, Result};
pub use learner::{BridgedLearner, LearnError, Learner, LearnerRegistry, Model, Prediction, Task};
pub use options::{AttributeNaming, ConversionOptions, DEFAULT_RELATION_NAME, GENERIC_TARGET_NAME};
pub use row::{RowConverter, VectorRecord};
