//! Learner bridge tests.

use tbridge_convert::{
    BridgedLearner, LearnError, Learner, LearnerRegistry, Model, Prediction, Task,
};
use tbridge_model::{
    Attribute, AttributeDataset, DataPoint, Instance, Schema, TargetValue, Value, VectorDataset,
};

/// Predicts the weighted label frequencies seen in training.
struct Majority;

struct Frequencies(Vec<f64>);

impl Model for Frequencies {
    fn predict(&self, _point: &DataPoint) -> Prediction {
        Prediction::Distribution(self.0.clone())
    }
}

impl Learner for Majority {
    fn name(&self) -> &str {
        "majority"
    }

    fn task(&self) -> Task {
        Task::Classification
    }

    fn fit(&self, dataset: &VectorDataset) -> Result<Box<dyn Model>, LearnError> {
        let Some(tbridge_model::TargetDescriptor::Classification { info }) =
            dataset.layout().target()
        else {
            return Err(LearnError::Fit {
                learner: self.name().to_string(),
                message: "classification target required".to_string(),
            });
        };
        let mut counts = vec![0.0; info.label_count()];
        for (point, target) in dataset.points().iter().zip(dataset.targets()) {
            if let TargetValue::Code(code) = target
                && let Ok(index) = usize::try_from(*code)
            {
                counts[index] += point.weight;
            }
        }
        let total: f64 = counts.iter().sum();
        if total > 0.0 {
            counts.iter_mut().for_each(|count| *count /= total);
        }
        Ok(Box::new(Frequencies(counts)))
    }
}

/// Predicts the first numeric feature.
struct Echo;

struct EchoModel;

impl Model for EchoModel {
    fn predict(&self, point: &DataPoint) -> Prediction {
        Prediction::Value(point.numeric.first().copied().unwrap_or(f64::NAN))
    }
}

impl Learner for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    fn task(&self) -> Task {
        Task::Regression
    }

    fn fit(&self, _dataset: &VectorDataset) -> Result<Box<dyn Model>, LearnError> {
        Ok(Box::new(EchoModel))
    }
}

fn weather() -> AttributeDataset {
    let schema = Schema::new(
        "weather",
        vec![
            Attribute::categorical("outlook", ["sunny", "rainy"]),
            Attribute::numeric("temperature"),
            Attribute::categorical("play", ["yes", "no"]),
        ],
        Some(2),
    )
    .unwrap();
    let mut dataset = AttributeDataset::new(schema);
    for (outlook, temperature, play) in [
        ("sunny", 30.0, Some("yes")),
        ("rainy", 12.0, Some("no")),
        ("sunny", 25.0, Some("yes")),
        ("rainy", 18.0, None),
    ] {
        dataset
            .push(Instance::new(vec![
                Value::label(outlook),
                Value::numeric(temperature),
                play.map_or(Value::Missing, Value::label),
            ]))
            .unwrap();
    }
    dataset
}

fn registry() -> LearnerRegistry {
    let mut registry = LearnerRegistry::new();
    registry.register(|| Box::new(Majority));
    registry.register(|| Box::new(Echo));
    registry
}

#[test]
fn classifier_trains_on_attribute_data() {
    let mut learner = registry().bridged("majority").unwrap();
    learner.train(&weather()).unwrap();
    assert!(learner.is_trained());

    let query = Instance::new(vec![Value::label("rainy"), Value::numeric(20.0), Value::Missing]);
    let prediction = learner.predict(&query).unwrap();
    let Prediction::Distribution(probabilities) = &prediction else {
        panic!("expected a distribution, got {prediction:?}");
    };
    // the instance with a missing class is dropped before training
    assert!((probabilities[0] - 2.0 / 3.0).abs() < 1e-9);
    assert!((probabilities[1] - 1.0 / 3.0).abs() < 1e-9);
    assert_eq!(learner.classify(&query).unwrap(), Some("yes".to_string()));
}

#[test]
fn classifier_rejects_numeric_target() {
    let dataset = weather();
    let schema = dataset.schema().with_target(Some(1)).unwrap();
    let (_, instances) = dataset.into_parts();
    let mut regression = AttributeDataset::new(schema);
    for instance in instances {
        regression.push(instance).unwrap();
    }

    let mut learner = BridgedLearner::new(Box::new(Majority));
    let err = learner.train(&regression).unwrap_err();
    assert_eq!(
        err.to_string(),
        "learner 'majority' handles classification but the dataset target is numeric"
    );
    assert!(!learner.is_trained());
}

#[test]
fn regressor_predicts_through_the_same_context() {
    let dataset = weather();
    let schema = dataset.schema().with_target(Some(1)).unwrap();
    let (_, instances) = dataset.into_parts();
    let mut regression = AttributeDataset::new(schema);
    for instance in instances {
        regression.push(instance).unwrap();
    }

    let mut learner = registry().bridged("echo").unwrap();
    learner.train(&regression).unwrap();
    // temperature is the target, so the data point has no numeric features
    let prediction = learner
        .predict(&Instance::new(vec![
            Value::label("sunny"),
            Value::Missing,
            Value::label("yes"),
        ]))
        .unwrap();
    let Prediction::Value(value) = prediction else {
        panic!("expected a value, got {prediction:?}");
    };
    assert!(value.is_nan());
}

#[test]
fn registry_lists_learners_by_task() {
    let registry = registry();
    assert_eq!(registry.names(), vec!["echo", "majority"]);
    assert_eq!(registry.names_for(Task::Classification), vec!["majority"]);
    assert_eq!(registry.len(), 2);
    assert!(matches!(
        registry.bridged("forest"),
        Err(LearnError::UnknownLearner(name)) if name == "forest"
    ));
}
