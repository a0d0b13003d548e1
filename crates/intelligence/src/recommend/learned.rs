//! Optional learned scorer: a small dense network over the feature vector.
//!
//! The network has ReLU hidden layers and one sigmoid output per game id.
//! Weights come from a JSON document or from a seeded variance-scaling
//! initialization. Any failure surfaces as [`HubError::ModelUnavailable`]
//! so the ranker can fall back to the heuristic scorer.

use super::scorer::Scorer;
use super::ScoringStrategy;
use crate::features::{normalize, FeatureVector, FEATURE_LEN};
use crate::types::Confidence;
use learnhub_core::{Catalog, Game, HubError, Profile, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// One fully connected layer. `weights[out][in]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    /// Weight matrix, one row per output unit.
    pub weights: Vec<Vec<f64>>,
    /// Bias per output unit.
    pub biases: Vec<f64>,
}

impl DenseLayer {
    fn inputs(&self) -> usize {
        self.weights.first().map(Vec::len).unwrap_or(0)
    }

    fn outputs(&self) -> usize {
        self.biases.len()
    }

    fn forward(&self, input: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.biases)
            .map(|(row, bias)| bias + row.iter().zip(input).map(|(w, x)| w * x).sum::<f64>())
            .collect()
    }
}

/// Network weights plus the game id of each output unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnedModel {
    /// Layers from input to output.
    pub layers: Vec<DenseLayer>,
    /// Game id for each output unit.
    pub outputs: Vec<String>,
}

impl LearnedModel {
    /// Build an untrained network with variance-scaling weights from `seed`.
    pub fn seeded(hidden: &[usize], outputs: Vec<String>, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut widths = Vec::with_capacity(hidden.len() + 2);
        widths.push(FEATURE_LEN);
        widths.extend_from_slice(hidden);
        widths.push(outputs.len());

        let layers = widths
            .windows(2)
            .map(|pair| {
                let (fan_in, fan_out) = (pair[0], pair[1]);
                let limit = (3.0 / fan_in.max(1) as f64).sqrt();
                DenseLayer {
                    weights: (0..fan_out)
                        .map(|_| (0..fan_in).map(|_| rng.gen_range(-limit..limit)).collect())
                        .collect(),
                    biases: vec![0.0; fan_out],
                }
            })
            .collect();

        Self { layers, outputs }
    }

    /// Build an untrained network sized for `catalog`.
    pub fn seeded_for_catalog(catalog: &Catalog, seed: u64) -> Self {
        let outputs = catalog.iter().map(|g| g.id.clone()).collect();
        Self::seeded(&[24, 16, 12], outputs, seed)
    }

    /// Check that layer shapes chain from the feature vector to the outputs.
    pub fn validate(&self) -> Result<()> {
        let Some(first) = self.layers.first() else {
            return Err(HubError::ModelUnavailable("model has no layers".into()));
        };
        if first.inputs() != FEATURE_LEN {
            return Err(HubError::ModelUnavailable(format!(
                "model expects {} inputs, profile features have {FEATURE_LEN}",
                first.inputs()
            )));
        }
        let mut width = FEATURE_LEN;
        for (idx, layer) in self.layers.iter().enumerate() {
            if layer.weights.len() != layer.outputs()
                || layer.weights.iter().any(|row| row.len() != width)
            {
                return Err(HubError::ModelUnavailable(format!(
                    "layer {idx} has inconsistent shape"
                )));
            }
            if layer
                .weights
                .iter()
                .flatten()
                .chain(&layer.biases)
                .any(|v| !v.is_finite())
            {
                return Err(HubError::ModelUnavailable(format!(
                    "layer {idx} contains non-finite weights"
                )));
            }
            width = layer.outputs();
        }
        if width != self.outputs.len() {
            return Err(HubError::ModelUnavailable(format!(
                "model produces {width} outputs for {} game ids",
                self.outputs.len()
            )));
        }
        Ok(())
    }

    /// Forward pass: ReLU on hidden layers, sigmoid on the output layer.
    pub fn predict(&self, features: &FeatureVector) -> Vec<Confidence> {
        let last = self.layers.len().saturating_sub(1);
        let mut activations = features.as_slice().to_vec();
        for (idx, layer) in self.layers.iter().enumerate() {
            let raw = layer.forward(&activations);
            activations = if idx == last {
                raw.into_iter().map(sigmoid).collect()
            } else {
                raw.into_iter().map(|v| v.max(0.0)).collect()
            };
        }
        activations.into_iter().map(Confidence::new).collect()
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Scorer backed by a validated [`LearnedModel`]. Scores are in [0, 1].
#[derive(Debug, Clone)]
pub struct LearnedScorer {
    model: LearnedModel,
}

impl LearnedScorer {
    /// Wrap a model after validating its shape.
    pub fn new(model: LearnedModel) -> Result<Self> {
        model.validate()?;
        Ok(Self { model })
    }

    /// The wrapped model.
    pub fn model(&self) -> &LearnedModel {
        &self.model
    }

    fn output_index(&self, game: &Game) -> Result<usize> {
        self.model
            .outputs
            .iter()
            .position(|id| *id == game.id)
            .ok_or_else(|| {
                HubError::ModelUnavailable(format!("model has no output for game `{}`", game.id))
            })
    }
}

impl Scorer for LearnedScorer {
    fn strategy(&self) -> ScoringStrategy {
        ScoringStrategy::Learned
    }

    fn score(&self, profile: &Profile, game: &Game) -> Result<f64> {
        let idx = self.output_index(game)?;
        let predictions = self.model.predict(&normalize(profile));
        predictions
            .get(idx)
            .map(Confidence::value)
            .ok_or_else(|| HubError::ModelUnavailable("model returned no data".into()))
    }

    fn score_all(&self, profile: &Profile, catalog: &Catalog) -> Result<Vec<f64>> {
        let predictions = self.model.predict(&normalize(profile));
        if predictions.is_empty() {
            return Err(HubError::ModelUnavailable("model returned no data".into()));
        }
        let scores = catalog
            .iter()
            .map(|game| {
                let idx = self.output_index(game)?;
                predictions
                    .get(idx)
                    .map(Confidence::value)
                    .ok_or_else(|| HubError::ModelUnavailable("model returned no data".into()))
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(games = scores.len(), "learned scorer pass");
        Ok(scores)
    }
}

/// Load and validate a model document, waiting at most `wait`.
///
/// This is the only asynchronous boundary of the core; callers await it once
/// before the first scoring pass.
pub async fn load_model(path: impl AsRef<Path>, wait: Duration) -> Result<LearnedScorer> {
    let path = path.as_ref();
    let text = tokio::time::timeout(wait, tokio::fs::read_to_string(path))
        .await
        .map_err(|_| {
            HubError::ModelUnavailable(format!(
                "timed out after {}ms loading {}",
                wait.as_millis(),
                path.display()
            ))
        })?
        .map_err(|e| HubError::ModelUnavailable(format!("cannot read {}: {e}", path.display())))?;
    let model: LearnedModel = serde_json::from_str(&text).map_err(|e| {
        HubError::ModelUnavailable(format!("invalid model document {}: {e}", path.display()))
    })?;
    let scorer = LearnedScorer::new(model)?;
    info!(
        path = %path.display(),
        outputs = scorer.model.outputs.len(),
        "learned scorer loaded"
    );
    Ok(scorer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnhub_core::{default_catalog, AgeRange, Category};

    #[test]
    fn test_seeded_model_is_valid_and_reproducible() {
        let catalog = default_catalog();
        let a = LearnedModel::seeded_for_catalog(&catalog, 7);
        let b = LearnedModel::seeded_for_catalog(&catalog, 7);
        assert!(a.validate().is_ok());
        assert_eq!(a, b);
        assert_ne!(a, LearnedModel::seeded_for_catalog(&catalog, 8));
    }

    #[test]
    fn test_scores_are_in_unit_range() {
        let catalog = default_catalog();
        let scorer = LearnedScorer::new(LearnedModel::seeded_for_catalog(&catalog, 1)).unwrap();
        let scores = scorer.score_all(&Profile::default(), &catalog).unwrap();
        assert_eq!(scores.len(), catalog.len());
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
    }

    #[test]
    fn test_score_matches_score_all() {
        let catalog = default_catalog();
        let scorer = LearnedScorer::new(LearnedModel::seeded_for_catalog(&catalog, 3)).unwrap();
        let profile = Profile::default();
        let all = scorer.score_all(&profile, &catalog).unwrap();
        let game = &catalog.games()[4];
        assert_eq!(scorer.score(&profile, game).unwrap(), all[4]);
    }

    #[test]
    fn test_unknown_game_is_model_unavailable() {
        let catalog = default_catalog();
        let scorer = LearnedScorer::new(LearnedModel::seeded_for_catalog(&catalog, 3)).unwrap();
        let stranger = Game::new("stranger", "Stranger", Category::Math, AgeRange::new(4, 9));
        let err = scorer.score(&Profile::default(), &stranger).unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_validate_rejects_bad_shapes() {
        let empty = LearnedModel {
            layers: vec![],
            outputs: vec![],
        };
        assert!(empty.validate().is_err());

        let narrow = LearnedModel {
            layers: vec![DenseLayer {
                weights: vec![vec![0.0; 3]],
                biases: vec![0.0],
            }],
            outputs: vec!["a".into()],
        };
        assert!(LearnedScorer::new(narrow).is_err());

        let mut wrong_outputs = LearnedModel::seeded(&[4], vec!["a".into(), "b".into()], 1);
        wrong_outputs.outputs.pop();
        assert!(wrong_outputs.validate().is_err());

        let mut nan = LearnedModel::seeded(&[4], vec!["a".into()], 1);
        nan.layers[0].biases[0] = f64::NAN;
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_zero_weights_give_one_half() {
        let model = LearnedModel {
            layers: vec![DenseLayer {
                weights: vec![vec![0.0; FEATURE_LEN]],
                biases: vec![0.0],
            }],
            outputs: vec!["only".into()],
        };
        let out = model.predict(&normalize(&Profile::default()));
        assert_eq!(out, vec![Confidence::new(0.5)]);
    }

    #[tokio::test]
    async fn test_load_model_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let model = LearnedModel::seeded_for_catalog(&default_catalog(), 11);
        std::fs::write(&path, serde_json::to_string(&model).unwrap()).unwrap();

        let scorer = load_model(&path, Duration::from_secs(2)).await.unwrap();
        assert_eq!(scorer.model(), &model);
    }

    #[tokio::test]
    async fn test_load_model_missing_file_is_recoverable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_model(dir.path().join("absent.json"), Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, HubError::ModelUnavailable(_)));
    }

    #[tokio::test]
    async fn test_load_model_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = load_model(&path, Duration::from_secs(1)).await.unwrap_err();
        assert!(err.to_string().contains("invalid model document"));
    }
}
