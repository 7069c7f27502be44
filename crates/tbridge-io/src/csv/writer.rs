//! CSV export of vector datasets.

use std::io::Write;

use ::csv::WriterBuilder;
use tbridge_model::{TargetValue, VectorDataset, is_missing_code};

use crate::error::Result;

/// Header of the weight column.
pub const WEIGHT_HEADER: &str = "weight";

fn real_field(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

fn code_field(code: i32) -> String {
    if is_missing_code(code) {
        String::new()
    } else {
        code.to_string()
    }
}

/// Write a vector dataset as CSV.
///
/// Columns are the numeric variables, the categorical variables as codes,
/// the target if any, then the weight. Missing values are empty fields.
pub fn write_vector_csv<W: Write>(dataset: &VectorDataset, output: W) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(output);
    let layout = dataset.layout();

    let mut header: Vec<&str> = layout.numeric_names().iter().map(String::as_str).collect();
    header.extend(layout.categories().iter().map(|info| info.name()));
    if let Some(target) = layout.target() {
        header.push(target.name());
    }
    header.push(WEIGHT_HEADER);
    writer.write_record(&header)?;

    for (index, point) in dataset.points().iter().enumerate() {
        let mut record: Vec<String> = point.numeric.iter().map(|&value| real_field(value)).collect();
        record.extend(point.categorical.iter().map(|&code| code_field(code)));
        match dataset.target_value(index) {
            Some(TargetValue::Real(value)) => record.push(real_field(value)),
            Some(TargetValue::Code(code)) => record.push(code_field(code)),
            None => {}
        }
        record.push(point.weight.to_string());
        writer.write_record(&record)?;
    }
    writer.flush().map_err(::csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tbridge_model::{CategoricalInfo, DataPoint, TargetDescriptor, VectorLayout};

    #[test]
    fn writes_codes_and_empty_missing_fields() {
        let layout = VectorLayout::new(
            vec!["x".to_string()],
            vec![CategoricalInfo::new("c", ["a", "b"]).unwrap()],
            Some(TargetDescriptor::Regression {
                name: "y".to_string(),
            }),
        );
        let mut dataset = VectorDataset::new(layout);
        dataset
            .push(DataPoint::new(vec![0.5], vec![1]), Some(TargetValue::Real(2.0)))
            .unwrap();
        dataset
            .push(DataPoint::new(vec![f64::NAN], vec![-1]).with_weight(2.0), None)
            .unwrap();

        let mut buffer = Vec::new();
        write_vector_csv(&dataset, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "x,c,y,weight\n0.5,1,2,1\n,,,2\n"
        );
    }
}
