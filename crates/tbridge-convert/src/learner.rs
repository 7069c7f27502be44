//! Learners over vector-oriented datasets, exposed to attribute-oriented
//! callers.
//!
//! A [`Learner`] trains on a [`VectorDataset`]. A [`BridgedLearner`] accepts
//! attribute-oriented datasets instead: it converts the training data once,
//! keeps the conversion context, and converts every instance it is asked to
//! predict with the same context.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tbridge_model::{AttributeDataset, AttributeKind, DataPoint, Instance, VectorDataset};
use thiserror::Error;
use tracing::{debug, info};

use crate::convert::AttributeToVector;
use crate::error::ConvertError;

/// What a learner predicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    Classification,
    Regression,
    Clustering,
}

impl Task {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classification => "classification",
            Self::Regression => "regression",
            Self::Clustering => "clustering",
        }
    }

    /// Whether a dataset whose target attribute has `kind` (or no target)
    /// fits this task.
    fn accepts(self, target: Option<&AttributeKind>) -> bool {
        match self {
            Self::Classification => target.is_some_and(AttributeKind::is_categorical),
            Self::Regression => target.is_some_and(AttributeKind::is_numeric),
            Self::Clustering => target.is_none(),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of a trained model for one data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Prediction {
    /// One probability per target label, in label order.
    Distribution(Vec<f64>),
    Value(f64),
    Cluster(usize),
}

impl Prediction {
    /// Index of the most probable label for a distribution.
    pub fn most_likely(&self) -> Option<usize> {
        match self {
            Self::Distribution(probabilities) => probabilities
                .iter()
                .enumerate()
                .max_by(|(_, left), (_, right)| left.total_cmp(right))
                .map(|(index, _)| index),
            _ => None,
        }
    }
}

/// Errors from training and prediction.
#[derive(Debug, Error)]
pub enum LearnError {
    #[error("learner '{learner}' handles {task} but the dataset target is {found}")]
    Capability {
        learner: String,
        task: Task,
        found: String,
    },

    #[error("model used before training")]
    NotTrained,

    #[error("no learner registered under '{0}'")]
    UnknownLearner(String),

    #[error("learner '{learner}' failed: {message}")]
    Fit { learner: String, message: String },

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// A trained model.
pub trait Model: Send + Sync {
    fn predict(&self, point: &DataPoint) -> Prediction;
}

/// A learning algorithm over vector-oriented datasets.
pub trait Learner: Send + Sync {
    fn name(&self) -> &str;

    fn task(&self) -> Task;

    fn fit(&self, dataset: &VectorDataset) -> Result<Box<dyn Model>, LearnError>;
}

/// A [`Learner`] driven with attribute-oriented datasets.
pub struct BridgedLearner {
    learner: Box<dyn Learner>,
    converter: AttributeToVector,
    model: Option<Box<dyn Model>>,
}

impl fmt::Debug for BridgedLearner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgedLearner")
            .field("learner", &self.learner.name())
            .field("task", &self.learner.task())
            .field("trained", &self.model.is_some())
            .finish()
    }
}

impl BridgedLearner {
    pub fn new(learner: Box<dyn Learner>) -> Self {
        Self {
            learner,
            converter: AttributeToVector::new(),
            model: None,
        }
    }

    pub fn learner(&self) -> &dyn Learner {
        self.learner.as_ref()
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Converter holding the context captured by the last training run.
    pub fn converter(&self) -> &AttributeToVector {
        &self.converter
    }

    /// Train on `dataset`.
    ///
    /// Supervised tasks drop instances with a missing target before
    /// conversion. The dataset target must suit the learner's task.
    pub fn train(&mut self, dataset: &AttributeDataset) -> Result<(), LearnError> {
        let task = self.learner.task();
        let target = dataset.schema().target_attribute().map(|attribute| &attribute.kind);
        if !task.accepts(target) {
            return Err(LearnError::Capability {
                learner: self.learner.name().to_string(),
                task,
                found: target.map_or_else(|| "absent".to_string(), ToString::to_string),
            });
        }

        let training = match task {
            Task::Clustering => dataset.clone(),
            Task::Classification | Task::Regression => dataset.without_missing_target(),
        };
        debug!(
            learner = self.learner.name(),
            dropped = dataset.len() - training.len(),
            "prepared training data"
        );

        self.model = None;
        self.converter.initialize(training.schema())?;
        let vectors = self.converter.convert_dataset(&training)?;
        let model = self.learner.fit(&vectors)?;
        self.model = Some(model);
        info!(
            learner = self.learner.name(),
            records = vectors.len(),
            "model trained"
        );
        Ok(())
    }

    /// Predict one instance of the training schema.
    pub fn predict(&self, instance: &Instance) -> Result<Prediction, LearnError> {
        let model = self.model.as_ref().ok_or(LearnError::NotTrained)?;
        let record = self.converter.convert_record(instance)?;
        Ok(model.predict(&record.point))
    }

    /// Label with the highest predicted probability, for classifiers.
    pub fn classify(&self, instance: &Instance) -> Result<Option<String>, LearnError> {
        let prediction = self.predict(instance)?;
        let context = self.converter.context()?;
        let labels = context
            .partition()
            .target
            .as_ref()
            .and_then(|target| {
                context
                    .schema()
                    .attribute(target.index)
                    .and_then(|attribute| attribute.kind.labels())
            })
            .unwrap_or_default();
        Ok(prediction
            .most_likely()
            .and_then(|index| labels.get(index))
            .cloned())
    }
}

type LearnerFactory = Box<dyn Fn() -> Box<dyn Learner> + Send + Sync>;

struct RegistryEntry {
    task: Task,
    factory: LearnerFactory,
}

/// Learners available by name.
#[derive(Default)]
pub struct LearnerRegistry {
    entries: BTreeMap<String, RegistryEntry>,
}

impl fmt::Debug for LearnerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(name, entry)| (name, entry.task)))
            .finish()
    }
}

impl LearnerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a learner factory under the learner's own name.
    ///
    /// Returns `true` when an earlier registration was replaced.
    pub fn register<F>(&mut self, factory: F) -> bool
    where
        F: Fn() -> Box<dyn Learner> + Send + Sync + 'static,
    {
        let sample = factory();
        let name = sample.name().to_string();
        let entry = RegistryEntry {
            task: sample.task(),
            factory: Box::new(factory),
        };
        self.entries.insert(name, entry).is_some()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Registered names for `task` in sorted order.
    pub fn names_for(&self, task: Task) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.task == task)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn Learner>, LearnError> {
        self.entries
            .get(name)
            .map(|entry| (entry.factory)())
            .ok_or_else(|| LearnError::UnknownLearner(name.to_string()))
    }

    /// Create the learner registered under `name`, wrapped for
    /// attribute-oriented datasets.
    pub fn bridged(&self, name: &str) -> Result<BridgedLearner, LearnError> {
        self.create(name).map(BridgedLearner::new)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant;

    impl Model for Constant {
        fn predict(&self, _point: &DataPoint) -> Prediction {
            Prediction::Value(1.0)
        }
    }

    struct ConstantRegressor;

    impl Learner for ConstantRegressor {
        fn name(&self) -> &str {
            "constant"
        }

        fn task(&self) -> Task {
            Task::Regression
        }

        fn fit(&self, _dataset: &VectorDataset) -> Result<Box<dyn Model>, LearnError> {
            Ok(Box::new(Constant))
        }
    }

    #[test]
    fn registry_creates_by_name() {
        let mut registry = LearnerRegistry::new();
        assert!(!registry.register(|| Box::new(ConstantRegressor)));
        assert!(registry.register(|| Box::new(ConstantRegressor)));
        assert_eq!(registry.names(), vec!["constant"]);
        assert_eq!(registry.names_for(Task::Regression), vec!["constant"]);
        assert!(registry.names_for(Task::Clustering).is_empty());
        assert_eq!(registry.create("constant").unwrap().task(), Task::Regression);
        assert!(matches!(
            registry.create("missing"),
            Err(LearnError::UnknownLearner(_))
        ));
    }

    #[test]
    fn most_likely_picks_highest_probability() {
        assert_eq!(
            Prediction::Distribution(vec![0.2, 0.7, 0.1]).most_likely(),
            Some(1)
        );
        assert_eq!(Prediction::Value(3.0).most_likely(), None);
    }

    #[test]
    fn untrained_model_cannot_predict() {
        let learner = BridgedLearner::new(Box::new(ConstantRegressor));
        assert!(matches!(
            learner.predict(&Instance::new(vec![])),
            Err(LearnError::NotTrained)
        ));
    }
}
