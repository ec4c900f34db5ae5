use thiserror::Error;

use crate::activation::activation::ActivationFunction;
use crate::math::matrix::Matrix;
use crate::params::store::Params;

/// Shape violations in the pure-math path. Parameter loading already rules
/// these out for any loaded set, so hitting one means a caller bug; it is
/// propagated rather than recovered since continuing would produce garbage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForwardError {
    #[error("input must be a column vector, got {rows}×{cols}")]
    InputNotColumn { rows: usize, cols: usize },
    #[error("weight matrix expects {expected} input values, got {got}")]
    ShapeMismatch { expected: usize, got: usize },
}

/// Values recorded during one forward pass, indexed by layer.
///
/// Entry 0 echoes the raw input unchanged; entry `l` for `l >= 1` is the
/// pre-activation `z = W·x + b` of transform layer `l`. Built fresh per pass
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationCache {
    entries: Vec<Matrix>,
}

impl ActivationCache {
    fn new(input: Matrix) -> ActivationCache {
        ActivationCache { entries: vec![input] }
    }

    fn push(&mut self, z: Matrix) {
        self.entries.push(z);
    }

    /// The input vector the pass started from.
    pub fn input(&self) -> &Matrix {
        &self.entries[0]
    }

    /// Pre-activation of transform layer `layer` (1-based). `None` for
    /// index 0 (the input slot) or past the last layer.
    pub fn pre_activation(&self, layer: usize) -> Option<&Matrix> {
        if layer == 0 {
            None
        } else {
            self.entries.get(layer)
        }
    }

    /// Number of entries: transform layers plus the input slot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One layer of the forward pass: `z = W·x + b`, then the activation applied
/// element-wise. Pure; returns the activated vector and the pre-activation
/// `z` as an independent snapshot. The output always has the shape of `z`.
pub fn apply_layer(
    weights: &Matrix,
    input: &Matrix,
    biases: &Matrix,
    activation: ActivationFunction,
) -> Result<(Matrix, Matrix), ForwardError> {
    if !input.is_column() {
        return Err(ForwardError::InputNotColumn { rows: input.rows, cols: input.cols });
    }
    if weights.cols != input.rows {
        return Err(ForwardError::ShapeMismatch { expected: weights.cols, got: input.rows });
    }

    let z = weights.clone() * input.clone() + biases.clone();
    let a = z.map(|x| activation.function(x));

    assert_eq!((a.rows, a.cols), (z.rows, z.cols));

    Ok((a, z))
}

/// Activation used for transform layer `index` (0-based) in a network of
/// `count` layers: ReLU on every hidden layer, sigmoid on the final one.
pub fn activation_for(index: usize, count: usize) -> ActivationFunction {
    if index + 1 == count {
        ActivationFunction::Sigmoid
    } else {
        ActivationFunction::ReLU
    }
}

/// Full forward pass: ReLU on every hidden layer, sigmoid on the final one.
///
/// Returns the output vector and the per-layer cache. Deterministic and
/// side-effect free: the same input and parameter set always produce
/// bit-identical results, so the parameter set can be shared across any
/// number of concurrent calls.
pub fn forward(input: &Matrix, params: &Params) -> Result<(Matrix, ActivationCache), ForwardError> {
    if !input.is_column() {
        return Err(ForwardError::InputNotColumn { rows: input.rows, cols: input.cols });
    }

    let mut cache = ActivationCache::new(input.clone());
    let mut current = input.clone();

    for (i, layer) in params.layers().iter().enumerate() {
        let kind = activation_for(i, params.layer_count());
        let (a, z) = apply_layer(&layer.weights, &current, &layer.biases, kind)?;
        cache.push(z);
        current = a;
    }

    Ok((current, cache))
}

/// Thresholds a sigmoid activation into its binary class. Strictly greater
/// than 0.5 is class 1 (dark text); exactly 0.5 stays class 0.
pub fn classify(activation: f64) -> u8 {
    if activation > 0.5 { 1 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::store::LayerParams;

    fn params_from(layers: Vec<(Vec<Vec<f64>>, Vec<f64>)>) -> Params {
        let layers = layers
            .into_iter()
            .map(|(w, b)| LayerParams {
                weights: Matrix::from_data(w),
                biases: Matrix::column(b),
            })
            .collect();
        Params::new(layers).unwrap()
    }

    #[test]
    fn zero_parameters_give_half_everywhere() {
        let params = params_from(vec![
            (vec![vec![0.0; 3]; 2], vec![0.0, 0.0]),
            (vec![vec![0.0; 2]; 2], vec![0.0, 0.0]),
        ]);
        let x = Matrix::column(vec![10.0, 20.0, 30.0]);
        let (out, _) = forward(&x, &params).unwrap();
        assert_eq!(out.column_values(), vec![0.5, 0.5]);
    }

    #[test]
    fn relu_layer_output_is_never_negative() {
        let w = Matrix::from_data(vec![vec![-1.0, -2.0], vec![1.0, -1.0]]);
        let b = Matrix::column(vec![-3.0, 0.0]);
        let x = Matrix::column(vec![5.0, 7.0]);
        let (a, z) = apply_layer(&w, &x, &b, ActivationFunction::ReLU).unwrap();
        assert!(a.column_values().iter().all(|&v| v >= 0.0));
        // The pre-activation keeps its sign.
        assert_eq!(z.column_values(), vec![-22.0, -2.0]);
    }

    #[test]
    fn sigmoid_layer_output_stays_in_open_unit_interval() {
        let w = Matrix::from_data(vec![vec![10.0], vec![-10.0]]);
        let b = Matrix::column(vec![0.0, 0.0]);
        let x = Matrix::column(vec![3.0]);
        let (a, _) = apply_layer(&w, &x, &b, ActivationFunction::Sigmoid).unwrap();
        assert!(a.column_values().iter().all(|&v| v > 0.0 && v < 1.0));
    }

    #[test]
    fn output_shape_matches_pre_activation_shape() {
        let w = Matrix::from_data(vec![vec![1.0, 2.0, 3.0]; 4]);
        let b = Matrix::column(vec![0.0; 4]);
        let x = Matrix::column(vec![1.0, 1.0, 1.0]);
        let (a, z) = apply_layer(&w, &x, &b, ActivationFunction::Sigmoid).unwrap();
        assert_eq!((a.rows, a.cols), (z.rows, z.cols));
    }

    #[test]
    fn forward_is_deterministic() {
        let params = params_from(vec![
            (vec![vec![0.3, -0.7, 0.1], vec![0.9, 0.2, -0.4]], vec![0.1, -0.2]),
            (vec![vec![1.5, -2.5]], vec![0.25]),
        ]);
        let x = Matrix::column(vec![12.0, 34.0, 56.0]);
        let first = forward(&x, &params).unwrap();
        let second = forward(&x, &params).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn cache_starts_with_the_raw_input() {
        let params = params_from(vec![(vec![vec![0.0, 0.0]], vec![0.0])]);
        let x = Matrix::column(vec![4.0, 2.0]);
        let (_, cache) = forward(&x, &params).unwrap();
        assert_eq!(cache.input(), &x);
        assert_eq!(cache.len(), params.layer_count() + 1);
        assert_eq!(cache.pre_activation(0), None);
    }

    #[test]
    fn cache_holds_pre_activations_per_layer() {
        let params = params_from(vec![
            (vec![vec![1.0, 0.0], vec![0.0, 1.0]], vec![0.0, -10.0]),
            (vec![vec![1.0, 1.0]], vec![0.0]),
        ]);
        let x = Matrix::column(vec![2.0, 3.0]);
        let (_, cache) = forward(&x, &params).unwrap();
        // Layer 1: z = [2, 3 - 10] = [2, -7]; ReLU carries [2, 0] forward.
        assert_eq!(cache.pre_activation(1).unwrap().column_values(), vec![2.0, -7.0]);
        assert_eq!(cache.pre_activation(2).unwrap().column_values(), vec![2.0]);
        assert_eq!(cache.pre_activation(3), None);
    }

    #[test]
    fn hidden_layers_use_relu_and_the_final_layer_sigmoid() {
        // z1 = 1*1 - 2 = -1; ReLU clamps to 0, so z2 = 0 and the output is
        // exactly sigmoid(0) = 0.5. A sigmoid hidden layer would give ~0.57.
        let params = params_from(vec![
            (vec![vec![1.0]], vec![-2.0]),
            (vec![vec![1.0]], vec![0.0]),
        ]);
        let x = Matrix::column(vec![1.0]);
        let (out, _) = forward(&x, &params).unwrap();
        assert_eq!(out.data[0][0], 0.5);
    }

    #[test]
    fn rejects_input_of_the_wrong_width() {
        let params = params_from(vec![(vec![vec![0.0, 0.0, 0.0]], vec![0.0])]);
        let x = Matrix::column(vec![1.0, 2.0]);
        let err = forward(&x, &params).unwrap_err();
        assert_eq!(err, ForwardError::ShapeMismatch { expected: 3, got: 2 });
    }

    #[test]
    fn rejects_non_column_input() {
        let params = params_from(vec![(vec![vec![0.0, 0.0]], vec![0.0])]);
        let x = Matrix::from_data(vec![vec![1.0, 2.0]]);
        let err = forward(&x, &params).unwrap_err();
        assert_eq!(err, ForwardError::InputNotColumn { rows: 1, cols: 2 });
    }

    #[test]
    fn classify_uses_a_strict_threshold() {
        assert_eq!(classify(0.5), 0);
        assert_eq!(classify(0.5 + 1e-12), 1);
        assert_eq!(classify(0.49), 0);
        assert_eq!(classify(0.99995), 1);
    }
}
