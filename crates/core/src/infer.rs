//! Inference: forward pass, softmax, argmax.

use crate::error::InferenceError;
use crate::features::Features;
use crate::labels::label_for;
use crate::network::Network;

/// Outcome of a single forward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub class_index: usize,
    pub label: &'static str,
    /// Probability of the winning class, post-softmax. Always in [0, 1].
    pub confidence: f32,
}

/// Numerically stable softmax: shift by the max score before exponentiating.
pub fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Index of the maximum value; exact ties resolve to the lowest index.
fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for (index, value) in values.iter().enumerate().skip(1) {
        if *value > values[best] {
            best = index;
        }
    }
    best
}

/// Run a scaled feature vector through `network` and pick the winning class.
///
/// The caller is responsible for scaling; this function never mutates the
/// network and is deterministic for a given (network, features) pair.
pub fn predict(network: &Network, features: &Features) -> Result<Prediction, InferenceError> {
    if features.len() != network.input_dim() {
        return Err(InferenceError::InputShape(features.len()));
    }

    let scores = network.forward(features);
    for (index, score) in scores.iter().enumerate() {
        if !score.is_finite() {
            return Err(InferenceError::NonFiniteOutput(index));
        }
    }

    let probabilities = softmax(&scores);
    let class_index = argmax(&probabilities);

    Ok(Prediction {
        class_index,
        label: label_for(class_index),
        confidence: probabilities[class_index],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FEATURE_COUNT;
    use crate::fixtures;
    use crate::labels::NUM_CLASSES;
    use crate::registry::ModelKind;

    #[test]
    fn softmax_is_a_distribution() {
        let probs = softmax(&[1.0, 2.0, 3.0, -4.0]);
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(probs.iter().all(|p| (0.0..=1.0).contains(p)));
        // Largest score wins the most mass.
        assert_eq!(probs.iter().cloned().fold(f32::MIN, f32::max), probs[2]);
    }

    #[test]
    fn softmax_survives_large_scores() {
        let probs = softmax(&[1000.0, 999.0]);
        assert!(probs.iter().all(|p| p.is_finite()));
        assert!((probs.iter().sum::<f32>() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn argmax_breaks_ties_toward_lowest_index() {
        assert_eq!(argmax(&[0.25, 0.25, 0.25, 0.25]), 0);
        assert_eq!(argmax(&[0.1, 0.4, 0.4, 0.1]), 1);
    }

    #[test]
    fn prediction_is_deterministic_and_bounded() {
        let net = fixtures::fixture_network(ModelKind::Standard);
        let features = [0.5; FEATURE_COUNT];

        let first = predict(&net, &features).unwrap();
        let second = predict(&net, &features).unwrap();

        assert_eq!(first, second);
        assert!(first.class_index < NUM_CLASSES);
        assert!((0.0..=1.0).contains(&first.confidence));
        assert_ne!(first.label, crate::labels::UNKNOWN_LABEL);
    }

    #[test]
    fn prediction_probabilities_sum_to_one() {
        let net = fixtures::fixture_network(ModelKind::Simple);
        let scores = net.forward(&[0.25; FEATURE_COUNT]);
        let sum: f32 = softmax(&scores).iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }

    #[test]
    fn wrong_input_width_is_reported() {
        // A 1-input network cannot accept the 7-wide feature vector.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("narrow.json");
        std::fs::write(
            &path,
            serde_json::json!({
                "layers": [{"weight": [[1.0], [2.0]], "bias": [0.0, 0.0]}]
            })
            .to_string(),
        )
        .unwrap();
        let narrow = Network::load(&path, "narrow", &[1, 2]).unwrap();

        let err = predict(&narrow, &[0.0; FEATURE_COUNT]).unwrap_err();
        assert_eq!(err, InferenceError::InputShape(FEATURE_COUNT));
    }
}
