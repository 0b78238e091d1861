//! Deterministic artifact fixtures for tests.
//!
//! Weights are synthesized from a golden-ratio sequence so every test run
//! (and every platform) sees the same artifacts without shipping binary
//! blobs in the repository.

use std::io;
use std::path::Path;

use serde_json::json;

use crate::features::FEATURE_COUNT;
use crate::network::Network;
use crate::registry::ModelKind;

/// Scaler parameters in the rough range of real soil/climate measurements.
pub const FIXTURE_MEAN: [f32; FEATURE_COUNT] = [50.55, 53.36, 48.15, 25.62, 71.48, 6.47, 103.46];
pub const FIXTURE_STD: [f32; FEATURE_COUNT] = [36.92, 32.99, 50.65, 5.06, 22.26, 0.77, 54.96];

/// Write `scaler.json` plus all four model artifacts into `dir`.
pub fn write_fixture_artifacts(dir: &Path) -> io::Result<()> {
    write_fixture_scaler(dir)?;
    for kind in ModelKind::ALL {
        write_fixture_network(dir, kind)?;
    }
    Ok(())
}

/// Write only the scaler artifact.
pub fn write_fixture_scaler(dir: &Path) -> io::Result<()> {
    let artifact = json!({
        "mean": FIXTURE_MEAN,
        "std": FIXTURE_STD,
    });
    std::fs::write(
        dir.join(crate::scaler::FeatureScaler::ARTIFACT_FILE),
        artifact.to_string(),
    )
}

/// Write one variant's artifact with deterministic synthetic weights.
pub fn write_fixture_network(dir: &Path, kind: ModelKind) -> io::Result<()> {
    let dims = kind.layer_dims();
    let mut seed = kind as usize * 7919;

    let mut layers = Vec::with_capacity(dims.len() - 1);
    for window in dims.windows(2) {
        let (in_dim, out_dim) = (window[0], window[1]);
        let weight: Vec<Vec<f32>> = (0..out_dim)
            .map(|_| (0..in_dim).map(|_| synth(&mut seed)).collect())
            .collect();
        let bias: Vec<f32> = (0..out_dim).map(|_| synth(&mut seed)).collect();
        layers.push(json!({ "weight": weight, "bias": bias }));
    }

    std::fs::write(
        dir.join(kind.artifact_file()),
        json!({ "layers": layers }).to_string(),
    )
}

/// Load one fixture network without touching the filesystem of the caller.
pub fn fixture_network(kind: ModelKind) -> Network {
    let dir = tempfile::tempdir().expect("fixture tempdir");
    write_fixture_network(dir.path(), kind).expect("fixture artifact");
    Network::load(
        &dir.path().join(kind.artifact_file()),
        kind.as_str(),
        &kind.layer_dims(),
    )
    .expect("fixture network")
}

/// Golden-ratio low-discrepancy sequence mapped to [-0.5, 0.5).
fn synth(seed: &mut usize) -> f32 {
    *seed += 1;
    ((*seed as f64 * 0.618_033_988_749_894_9) % 1.0 - 0.5) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_are_deterministic() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        write_fixture_artifacts(a.path()).unwrap();
        write_fixture_artifacts(b.path()).unwrap();

        for kind in ModelKind::ALL {
            let left = std::fs::read(a.path().join(kind.artifact_file())).unwrap();
            let right = std::fs::read(b.path().join(kind.artifact_file())).unwrap();
            assert_eq!(left, right);
        }
    }

    #[test]
    fn variants_get_distinct_weights() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_artifacts(dir.path()).unwrap();

        let standard = std::fs::read(dir.path().join(ModelKind::Standard.artifact_file())).unwrap();
        let deep = std::fs::read(dir.path().join(ModelKind::Deep.artifact_file())).unwrap();
        assert_ne!(standard, deep);
    }
}
