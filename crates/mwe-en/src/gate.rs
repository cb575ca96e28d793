// Classifier capability and candidate acceptance
//
// The classifier itself (training, persistence) lives outside this crate and
// is reached only through `Classifier::evaluate`.

use hashbrown::HashMap;
use mwe_core::candidate::MweType;
use serde::{Deserialize, Serialize};

use crate::options::Thresholds;
use crate::sparse::SparseVector;

/// Probability pair returned for a model id with no loaded model.
///
/// Class 1 gets all the mass, so an absent model accepts every candidate.
pub const NEUTRAL_PROBABILITIES: [f64; 2] = [0.0, 1.0];

/// Scores feature vectors against a named model.
pub trait Classifier {
    /// Per-class probabilities `[P(class 0), P(class 1)]`, where class 1 means
    /// "is a genuine MWE".
    fn evaluate(&self, vector: &str, model_id: &str) -> [f64; 2];
}

/// A single binary model.
pub trait Model {
    fn predict_probability(&self, vector: &SparseVector) -> [f64; 2];
}

/// Logistic model over sparse binary features.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearModel {
    pub bias: f64,
    pub weights: HashMap<u32, f64>,
}

impl Model for LinearModel {
    fn predict_probability(&self, vector: &SparseVector) -> [f64; 2] {
        let score = vector
            .features
            .iter()
            .map(|(index, value)| self.weights.get(index).copied().unwrap_or(0.0) * value)
            .sum::<f64>()
            + self.bias;
        let p1 = 1.0 / (1.0 + (-score).exp());
        [1.0 - p1, p1]
    }
}

/// Models keyed by id (`npcModel`, `lvcModel`, `vpcModel`).
#[derive(Default)]
pub struct ModelRegistry {
    models: HashMap<String, Box<dyn Model>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, model_id: impl Into<String>, model: Box<dyn Model>) {
        self.models.insert(model_id.into(), model);
    }

    pub fn remove(&mut self, model_id: &str) -> bool {
        self.models.remove(model_id).is_some()
    }

    pub fn contains(&self, model_id: &str) -> bool {
        self.models.contains_key(model_id)
    }

    /// Ids of the loaded models, sorted.
    pub fn model_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.models.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("models", &self.model_ids())
            .finish()
    }
}

impl Classifier for ModelRegistry {
    fn evaluate(&self, vector: &str, model_id: &str) -> [f64; 2] {
        let Some(model) = self.models.get(model_id) else {
            return NEUTRAL_PROBABILITIES;
        };
        match vector.parse::<SparseVector>() {
            Ok(vector) => model.predict_probability(&vector),
            Err(err) => {
                tracing::warn!(model_id, %err, "unreadable feature vector");
                NEUTRAL_PROBABILITIES
            }
        }
    }
}

/// Outcome of gating one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub accepted: bool,
    /// Positive-class probability, when a classifier was consulted.
    pub score: Option<f64>,
}

/// Accepts or rejects candidates by classifier score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateGate {
    pub learning: bool,
    pub thresholds: Thresholds,
}

impl CandidateGate {
    pub fn new(learning: bool, thresholds: Thresholds) -> Self {
        Self {
            learning,
            thresholds,
        }
    }

    /// Outside learning mode every candidate is accepted without consulting
    /// the classifier. Otherwise accept iff `P(class 1) > threshold`.
    pub fn decide(&self, classifier: &dyn Classifier, mwe_type: MweType, vector: &str) -> Decision {
        if !self.learning {
            return Decision {
                accepted: true,
                score: None,
            };
        }
        let [_, p1] = classifier.evaluate(vector, mwe_type.model_id());
        Decision {
            accepted: p1 > self.thresholds.of_type(mwe_type),
            score: Some(p1),
        }
    }

    pub fn accept(&self, classifier: &dyn Classifier, mwe_type: MweType, vector: &str) -> bool {
        self.decide(classifier, mwe_type, vector).accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl Classifier for Fixed {
        fn evaluate(&self, _vector: &str, _model_id: &str) -> [f64; 2] {
            [1.0 - self.0, self.0]
        }
    }

    struct Panicking;

    impl Classifier for Panicking {
        fn evaluate(&self, _vector: &str, _model_id: &str) -> [f64; 2] {
            panic!("classifier must not be consulted");
        }
    }

    #[test]
    fn non_learning_accepts_without_classifier() {
        let gate = CandidateGate::new(false, Thresholds::default());
        let d = gate.decide(&Panicking, MweType::Vpc, "1:1");
        assert!(d.accepted);
        assert_eq!(d.score, None);
    }

    #[test]
    fn learning_compares_positive_class() {
        let gate = CandidateGate::new(true, Thresholds::default());
        assert!(gate.accept(&Fixed(0.8), MweType::Lvc, "1:1"));
        assert!(!gate.accept(&Fixed(0.2), MweType::Lvc, "1:1"));
    }

    #[test]
    fn threshold_is_strict() {
        let gate = CandidateGate::new(true, Thresholds::default());
        assert!(!gate.accept(&Fixed(0.5), MweType::NounCompound, "1:1"));
    }

    #[test]
    fn thresholds_are_per_type() {
        let thresholds = Thresholds {
            vpc: 0.9,
            ..Thresholds::default()
        };
        let gate = CandidateGate::new(true, thresholds);
        assert!(!gate.accept(&Fixed(0.8), MweType::Vpc, "1:1"));
        assert!(gate.accept(&Fixed(0.8), MweType::Lvc, "1:1"));
    }

    #[test]
    fn missing_model_fails_open() {
        let registry = ModelRegistry::new();
        assert_eq!(registry.evaluate("1:1", "vpcModel"), NEUTRAL_PROBABILITIES);
        let gate = CandidateGate::new(true, Thresholds::default());
        assert!(gate.accept(&registry, MweType::Vpc, "1:1"));
    }

    #[test]
    fn registry_routes_by_model_id() {
        let mut registry = ModelRegistry::new();
        registry.insert(
            "lvcModel",
            Box::new(LinearModel {
                bias: -5.0,
                weights: HashMap::new(),
            }),
        );
        assert_eq!(registry.model_ids(), vec!["lvcModel"]);
        let [_, p1] = registry.evaluate("1:1", "lvcModel");
        assert!(p1 < 0.01);
        assert_eq!(registry.evaluate("1:1", "npcModel"), NEUTRAL_PROBABILITIES);
        assert!(registry.remove("lvcModel"));
        assert!(!registry.contains("lvcModel"));
    }

    #[test]
    fn linear_model_uses_weights() {
        let mut weights = HashMap::new();
        weights.insert(7, 4.0);
        let model = LinearModel { bias: -2.0, weights };
        let [p0, p1] = model.predict_probability(&SparseVector::from_indices([7]));
        assert!(p1 > 0.85);
        assert!((p0 + p1 - 1.0).abs() < 1e-12);
        let [_, p1] = model.predict_probability(&SparseVector::from_indices([8]));
        assert!(p1 < 0.15);
    }

    #[test]
    fn linear_model_from_json() {
        let model: LinearModel =
            serde_json::from_str(r#"{"bias": 0.5, "weights": {"3": 1.5}}"#).unwrap();
        assert_eq!(model.weights.get(&3), Some(&1.5));
    }
}
