//! Polars DataFrame export for attribute datasets.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};

use crate::attribute::AttributeKind;
use crate::instance::{AttributeDataset, Value};

/// Column name used for instance weights.
pub const WEIGHT_COLUMN: &str = "__weight";

impl AttributeDataset {
    /// Build a DataFrame with one column per attribute plus a weight column.
    ///
    /// Numeric attributes become nullable `Float64` columns; categorical and
    /// unsupported attributes become nullable `String` columns. Missing values
    /// become nulls.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(self.schema().len() + 1);
        for (index, attribute) in self.schema().attributes().iter().enumerate() {
            let column = match attribute.kind {
                AttributeKind::Numeric => {
                    let values: Vec<Option<f64>> = self
                        .instances()
                        .iter()
                        .map(|instance| instance.values[index].as_numeric())
                        .collect();
                    Series::new(attribute.name.as_str().into(), values)
                }
                _ => {
                    let values: Vec<Option<&str>> = self
                        .instances()
                        .iter()
                        .map(|instance| match &instance.values[index] {
                            Value::Label(text) | Value::Text(text) => Some(text.as_str()),
                            _ => None,
                        })
                        .collect();
                    Series::new(attribute.name.as_str().into(), values)
                }
            };
            columns.push(column.into_column());
        }
        let weights: Vec<f64> = self
            .instances()
            .iter()
            .map(|instance| instance.weight)
            .collect();
        columns.push(Series::new(WEIGHT_COLUMN.into(), weights).into_column());
        DataFrame::new(columns)
    }
}
