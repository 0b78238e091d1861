//! Model registry: the four classifier variants and their artifacts.
//!
//! All variants and the scaler load eagerly at startup and are shared
//! read-only across requests. Re-instantiating a model per request would be
//! correctness-neutral but pays the artifact load on every call.

use std::collections::HashMap;
use std::path::Path;

use crate::error::ArtifactError;
use crate::features::FEATURE_COUNT;
use crate::labels::NUM_CLASSES;
use crate::network::Network;
use crate::scaler::FeatureScaler;

/// The closed set of classifier variants. Wire tokens are case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// Two hidden layers of 64, dropout 0.2 at training time.
    Standard,
    /// One hidden layer of 128, no dropout.
    Simple,
    /// Hidden layers 128 and 64, dropout 0.3.
    Deep,
    /// Hidden layers 256, 128, 64, 32, dropout 0.3.
    SuperDeep,
}

impl ModelKind {
    pub const ALL: [ModelKind; 4] = [
        ModelKind::Standard,
        ModelKind::Simple,
        ModelKind::Deep,
        ModelKind::SuperDeep,
    ];

    /// Parse a wire token. Unrecognized or differently-cased tokens do not
    /// resolve.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "StandardModel" => Some(ModelKind::Standard),
            "SimpleModel" => Some(ModelKind::Simple),
            "DeepModel" => Some(ModelKind::Deep),
            "SuperDeepModel" => Some(ModelKind::SuperDeep),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Standard => "StandardModel",
            ModelKind::Simple => "SimpleModel",
            ModelKind::Deep => "DeepModel",
            ModelKind::SuperDeep => "SuperDeepModel",
        }
    }

    /// Hidden-layer widths, input and output excluded.
    pub fn hidden_layers(&self) -> &'static [usize] {
        match self {
            ModelKind::Standard => &[64, 64],
            ModelKind::Simple => &[128],
            ModelKind::Deep => &[128, 64],
            ModelKind::SuperDeep => &[256, 128, 64, 32],
        }
    }

    /// Training-time dropout rate. Inert at inference; recorded for
    /// artifact provenance.
    pub fn dropout(&self) -> Option<f32> {
        match self {
            ModelKind::Standard => Some(0.2),
            ModelKind::Simple => None,
            ModelKind::Deep | ModelKind::SuperDeep => Some(0.3),
        }
    }

    /// Full layer dimensions from input width to class count.
    pub fn layer_dims(&self) -> Vec<usize> {
        let mut dims = Vec::with_capacity(self.hidden_layers().len() + 2);
        dims.push(FEATURE_COUNT);
        dims.extend_from_slice(self.hidden_layers());
        dims.push(NUM_CLASSES);
        dims
    }

    /// Artifact file name inside the model directory.
    pub fn artifact_file(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

/// Owns every loaded variant plus the scaler. Immutable after `load`, so it
/// can be shared across request tasks without synchronization.
#[derive(Debug)]
pub struct ModelRegistry {
    models: HashMap<ModelKind, Network>,
    scaler: FeatureScaler,
}

impl ModelRegistry {
    /// Eagerly load the scaler and all four variants from `dir`, verifying
    /// every artifact against its declared architecture. Any failure here
    /// must keep the service from serving traffic.
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        let scaler = FeatureScaler::load(&dir.join(FeatureScaler::ARTIFACT_FILE))?;

        let mut models = HashMap::new();
        for kind in ModelKind::ALL {
            let network = Network::load(
                &dir.join(kind.artifact_file()),
                kind.as_str(),
                &kind.layer_dims(),
            )?;
            models.insert(kind, network);
        }

        Ok(Self { models, scaler })
    }

    /// Look up a loaded variant. `None` only if the registry was built
    /// without the variant, which `load` never does.
    pub fn resolve(&self, kind: ModelKind) -> Option<&Network> {
        self.models.get(&kind)
    }

    pub fn scaler(&self) -> &FeatureScaler {
        &self.scaler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn tokens_round_trip() {
        for kind in ModelKind::ALL {
            assert_eq!(ModelKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn unknown_tokens_do_not_parse() {
        assert_eq!(ModelKind::parse("NotAModel"), None);
        assert_eq!(ModelKind::parse(""), None);
        // Case-sensitive by contract.
        assert_eq!(ModelKind::parse("standardmodel"), None);
        assert_eq!(ModelKind::parse("STANDARDMODEL"), None);
    }

    #[test]
    fn layer_dims_bracket_the_hidden_stack() {
        for kind in ModelKind::ALL {
            let dims = kind.layer_dims();
            assert_eq!(dims[0], FEATURE_COUNT);
            assert_eq!(*dims.last().unwrap(), NUM_CLASSES);
            assert_eq!(dims.len(), kind.hidden_layers().len() + 2);
        }
        assert_eq!(
            ModelKind::SuperDeep.layer_dims(),
            vec![7, 256, 128, 64, 32, 22]
        );
    }

    #[test]
    fn load_resolves_every_variant() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_fixture_artifacts(dir.path()).unwrap();

        let registry = ModelRegistry::load(dir.path()).unwrap();
        for kind in ModelKind::ALL {
            let network = registry.resolve(kind).unwrap();
            assert_eq!(network.input_dim(), FEATURE_COUNT);
            assert_eq!(network.output_dim(), NUM_CLASSES);
        }
    }

    #[test]
    fn load_fails_without_scaler() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_fixture_artifacts(dir.path()).unwrap();
        std::fs::remove_file(dir.path().join(FeatureScaler::ARTIFACT_FILE)).unwrap();

        let err = ModelRegistry::load(dir.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::Unreadable { .. }));
    }

    #[test]
    fn load_fails_on_missing_variant() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_fixture_artifacts(dir.path()).unwrap();
        std::fs::remove_file(dir.path().join(ModelKind::Deep.artifact_file())).unwrap();

        assert!(ModelRegistry::load(dir.path()).is_err());
    }

    #[test]
    fn load_fails_on_wrong_architecture() {
        let dir = tempfile::tempdir().unwrap();
        fixtures::write_fixture_artifacts(dir.path()).unwrap();

        // Swap the Simple artifact in under the SuperDeep name.
        let simple = std::fs::read(dir.path().join(ModelKind::Simple.artifact_file())).unwrap();
        std::fs::write(dir.path().join(ModelKind::SuperDeep.artifact_file()), simple).unwrap();

        let err = ModelRegistry::load(dir.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::ShapeMismatch { .. }));
    }
}
