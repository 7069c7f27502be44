//! File-level reading and writing tests.

use std::io::Write;

use tbridge_io::{ClassIndex, IoError, read_arff, read_dataset, write_arff};
use tbridge_model::Value;
use tempfile::{NamedTempFile, TempDir};

const IRIS: &str = "\
% Iris sample
@RELATION iris

@ATTRIBUTE 'sepal length' REAL
@ATTRIBUTE 'sepal width' REAL
@ATTRIBUTE class {Iris-setosa,Iris-versicolor}

@DATA
5.1,3.5,Iris-setosa
7.0,?,Iris-versicolor,{2}
";

fn create_temp_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    write!(file, "{content}").unwrap();
    file
}

#[test]
fn reads_arff_file_with_class() {
    let file = create_temp_file(".arff", IRIS);
    let dataset = read_arff(file.path(), &ClassIndex::Last).unwrap();

    assert_eq!(dataset.schema().name(), "iris");
    assert_eq!(dataset.schema().attributes()[0].name, "sepal length");
    assert_eq!(dataset.schema().target_index(), Some(2));
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.instances()[1].values[1], Value::Missing);
    assert_eq!(dataset.instances()[1].weight, 2.0);
}

#[test]
fn written_arff_reads_back_identically() {
    let file = create_temp_file(".arff", IRIS);
    let dataset = read_arff(file.path(), &ClassIndex::Last).unwrap();

    let dir = TempDir::new().unwrap();
    let copy = dir.path().join("copy.arff");
    write_arff(&copy, &dataset).unwrap();
    let reread = read_arff(&copy, &ClassIndex::Last).unwrap();

    assert_eq!(reread, dataset);
}

#[test]
fn dispatches_on_extension() {
    let file = create_temp_file(".csv", "height,kind\n1.5,tall\n0.5,short\n");
    let dataset = read_dataset(file.path(), &ClassIndex::Last).unwrap();

    assert!(dataset.schema().attributes()[0].kind.is_numeric());
    assert_eq!(
        dataset.schema().attributes()[1].kind.labels().unwrap(),
        ["tall", "short"]
    );
    assert_eq!(dataset.schema().target_index(), Some(1));
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let result = read_arff(&dir.path().join("absent.arff"), &ClassIndex::None);
    assert!(matches!(result, Err(IoError::FileNotFound { .. })));
}

#[test]
fn class_position_out_of_range_is_rejected() {
    let file = create_temp_file(".arff", IRIS);
    let err = read_arff(file.path(), &"9".parse().unwrap()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid class selection '9': file has 3 attribute(s)"
    );
}
