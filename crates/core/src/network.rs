//! Feed-forward network evaluation.
//!
//! Dense layers stored as flat row-major weights, ReLU between hidden
//! layers, linear output. Weights are immutable after load; the forward
//! pass is read-only and allocates only per-layer output buffers. Dropout
//! exists only at training time, so evaluation never applies it.

use std::path::Path;

use serde::Deserialize;

use crate::error::ArtifactError;

/// On-disk shape of a model artifact: `{"layers": [{"weight": [[..]; out],
/// "bias": [..]}, ..]}` with weight rows ordered by output unit.
#[derive(Debug, Deserialize)]
struct RawNetwork {
    layers: Vec<RawLayer>,
}

#[derive(Debug, Deserialize)]
struct RawLayer {
    weight: Vec<Vec<f32>>,
    bias: Vec<f32>,
}

/// One dense layer: `out[j] = bias[j] + sum_i input[i] * weight[j*in + i]`.
#[derive(Debug, Clone)]
struct Linear {
    in_dim: usize,
    out_dim: usize,
    weight: Vec<f32>,
    bias: Vec<f32>,
}

impl Linear {
    fn apply(&self, input: &[f32], activate: bool) -> Vec<f32> {
        let mut out = self.bias.clone();
        for (j, slot) in out.iter_mut().enumerate() {
            let row = &self.weight[j * self.in_dim..(j + 1) * self.in_dim];
            for (value, w) in input.iter().zip(row) {
                *slot += value * w;
            }
        }
        if activate {
            for value in out.iter_mut() {
                *value = value.max(0.0);
            }
        }
        out
    }
}

/// A loaded, shape-checked classifier variant.
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Linear>,
}

impl Network {
    /// Load a network artifact and verify it against the expected layer
    /// dimensions (`dims[0]` = input width .. `dims[last]` = class count).
    pub fn load(path: &Path, model: &str, dims: &[usize]) -> Result<Self, ArtifactError> {
        let display = path.display().to_string();

        let contents = std::fs::read_to_string(path).map_err(|e| ArtifactError::Unreadable {
            path: display.clone(),
            reason: e.to_string(),
        })?;
        let raw: RawNetwork =
            serde_json::from_str(&contents).map_err(|e| ArtifactError::Malformed {
                path: display.clone(),
                reason: e.to_string(),
            })?;

        Self::from_raw(raw, model, dims, &display)
    }

    fn from_raw(
        raw: RawNetwork,
        model: &str,
        dims: &[usize],
        path: &str,
    ) -> Result<Self, ArtifactError> {
        let mismatch = |reason: String| ArtifactError::ShapeMismatch {
            path: path.to_string(),
            model: model.to_string(),
            reason,
        };

        if raw.layers.len() != dims.len() - 1 {
            return Err(mismatch(format!(
                "{} layers, expected {}",
                raw.layers.len(),
                dims.len() - 1
            )));
        }

        let mut layers = Vec::with_capacity(raw.layers.len());
        for (index, layer) in raw.layers.into_iter().enumerate() {
            let (in_dim, out_dim) = (dims[index], dims[index + 1]);

            if layer.weight.len() != out_dim || layer.bias.len() != out_dim {
                return Err(mismatch(format!(
                    "layer {index} has {} rows and {} biases, expected {out_dim}",
                    layer.weight.len(),
                    layer.bias.len()
                )));
            }

            let mut weight = Vec::with_capacity(in_dim * out_dim);
            for (row_index, row) in layer.weight.iter().enumerate() {
                if row.len() != in_dim {
                    return Err(mismatch(format!(
                        "layer {index} row {row_index} has {} columns, expected {in_dim}",
                        row.len()
                    )));
                }
                weight.extend_from_slice(row);
            }

            layers.push(Linear {
                in_dim,
                out_dim,
                weight,
                bias: layer.bias,
            });
        }

        Ok(Self { layers })
    }

    /// Width of the input layer.
    pub fn input_dim(&self) -> usize {
        self.layers.first().map(|l| l.in_dim).unwrap_or(0)
    }

    /// Width of the output layer (one score per class).
    pub fn output_dim(&self) -> usize {
        self.layers.last().map(|l| l.out_dim).unwrap_or(0)
    }

    /// Run the forward pass: ReLU after every layer except the last.
    pub fn forward(&self, input: &[f32]) -> Vec<f32> {
        let last = self.layers.len().saturating_sub(1);
        let mut activation = input.to_vec();
        for (index, layer) in self.layers.iter().enumerate() {
            activation = layer.apply(&activation, index < last);
        }
        activation
    }
}
