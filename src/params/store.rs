use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;

use crate::math::matrix::Matrix;

/// Everything that can go wrong while reading a parameter file. All of these
/// are fatal at startup: serving must not begin with a bad parameter set.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read parameter file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parameter file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("parameter file contains no layer arrays")]
    Empty,
    #[error("unexpected key \"{0}\" (expected \"W1\", \"b1\", \"W2\", \"b2\", ...)")]
    UnexpectedKey(String),
    #[error("missing entry \"{0}\"")]
    MissingEntry(String),
    #[error("array \"{0}\" is empty")]
    EmptyArray(String),
    #[error("array \"{key}\": row {row} has {got} values, rows above have {expected}")]
    RaggedArray { key: String, row: usize, expected: usize, got: usize },
    #[error("bias \"b{layer}\" must be {rows}×1 to match \"W{layer}\", got {got_rows}×{got_cols}")]
    BiasShape { layer: usize, rows: usize, got_rows: usize, got_cols: usize },
    #[error("\"W{layer}\" has {got} columns but the previous layer produces {expected} values")]
    ShapeChain { layer: usize, expected: usize, got: usize },
}

/// Weight matrix and bias vector of one transform layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerParams {
    /// Shape: (layer output width) × (layer input width).
    pub weights: Matrix,
    /// Shape: (layer output width) × 1.
    pub biases: Matrix,
}

/// The ordered, immutable parameter set of a trained network.
///
/// Loaded once at process start and shared read-only for the life of the
/// process; every shape invariant is checked here so the forward pass can
/// rely on them.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    layers: Vec<LayerParams>,
}

impl Params {
    /// Builds a parameter set from per-layer weights and biases, validating
    /// the bias shapes and the layer-to-layer shape chain.
    pub fn new(layers: Vec<LayerParams>) -> Result<Params, LoadError> {
        if layers.is_empty() {
            return Err(LoadError::Empty);
        }
        for (i, layer) in layers.iter().enumerate() {
            let l = i + 1;
            if !layer.biases.is_column() || layer.biases.rows != layer.weights.rows {
                return Err(LoadError::BiasShape {
                    layer: l,
                    rows: layer.weights.rows,
                    got_rows: layer.biases.rows,
                    got_cols: layer.biases.cols,
                });
            }
            if i > 0 {
                let produced = layers[i - 1].weights.rows;
                if layer.weights.cols != produced {
                    return Err(LoadError::ShapeChain {
                        layer: l,
                        expected: produced,
                        got: layer.weights.cols,
                    });
                }
            }
        }
        Ok(Params { layers })
    }

    /// Reads a parameter file previously produced by training: a JSON object
    /// mapping `"W1"`, `"b1"`, ..., `"W{L-1}"`, `"b{L-1}"` to nested arrays.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Params, LoadError> {
        let json = std::fs::read_to_string(path)?;
        Params::from_json_str(&json)
    }

    /// Same parse-and-validate path as `load_json`, on an in-memory string.
    pub fn from_json_str(json: &str) -> Result<Params, LoadError> {
        let entries: BTreeMap<String, Vec<Vec<f64>>> = serde_json::from_str(json)?;
        Params::from_entries(entries)
    }

    fn from_entries(entries: BTreeMap<String, Vec<Vec<f64>>>) -> Result<Params, LoadError> {
        if entries.is_empty() {
            return Err(LoadError::Empty);
        }

        let mut last = 0;
        for key in entries.keys() {
            match parse_key(key) {
                Some((_, index)) => last = last.max(index),
                None => return Err(LoadError::UnexpectedKey(key.clone())),
            }
        }

        // Each layer contributes exactly one weight array and one bias array,
        // so the transform-layer count is the entry count divided by two.
        let mut layers = Vec::with_capacity(last);
        for l in 1..=last {
            let weights = to_matrix(&format!("W{}", l), &entries)?;
            let biases = to_matrix(&format!("b{}", l), &entries)?;
            layers.push(LayerParams { weights, biases });
        }
        debug_assert_eq!(2 * layers.len(), entries.len());

        Params::new(layers)
    }

    /// Number of transform layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layers(&self) -> &[LayerParams] {
        &self.layers
    }

    /// Width of the input vector the first layer expects.
    pub fn input_size(&self) -> usize {
        self.layers[0].weights.cols
    }

    /// Width of the final layer's output.
    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].weights.rows
    }
}

/// Splits `"W3"` into `('W', 3)`. Layer indices start at 1.
fn parse_key(key: &str) -> Option<(char, usize)> {
    let mut chars = key.chars();
    let kind = chars.next()?;
    if kind != 'W' && kind != 'b' {
        return None;
    }
    let rest = chars.as_str();
    if !rest.bytes().all(|b| b.is_ascii_digit()) || rest.starts_with('0') {
        return None;
    }
    let index: usize = rest.parse().ok()?;
    Some((kind, index))
}

/// Looks up one named array and checks it is rectangular and non-empty.
fn to_matrix(key: &str, entries: &BTreeMap<String, Vec<Vec<f64>>>) -> Result<Matrix, LoadError> {
    let raw = entries
        .get(key)
        .ok_or_else(|| LoadError::MissingEntry(key.to_owned()))?;
    if raw.is_empty() || raw[0].is_empty() {
        return Err(LoadError::EmptyArray(key.to_owned()));
    }
    let width = raw[0].len();
    for (row, values) in raw.iter().enumerate() {
        if values.len() != width {
            return Err(LoadError::RaggedArray {
                key: key.to_owned(),
                row,
                expected: width,
                got: values.len(),
            });
        }
    }
    Ok(Matrix::from_data(raw.clone()))
}
