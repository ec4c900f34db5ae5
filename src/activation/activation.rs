use serde::{Serialize, Deserialize};
use std::f64::consts::E;

/// The two nonlinearities the classifier's networks use: ReLU on hidden
/// layers, Sigmoid on the output layer. A closed enum, so every dispatch
/// site is checked exhaustively at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationFunction {
    Sigmoid,
    ReLU,
}

impl ActivationFunction {
    /// Element-wise activation.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_of_zero_is_half() {
        assert_eq!(ActivationFunction::Sigmoid.function(0.0), 0.5);
    }

    #[test]
    fn sigmoid_stays_in_open_unit_interval() {
        // Above x ≈ 37 the result rounds to exactly 1.0 in f64.
        for &x in &[-30.0, -3.5, -1.0, 0.0, 0.25, 8.0, 30.0] {
            let y = ActivationFunction::Sigmoid.function(x);
            assert!(y > 0.0 && y < 1.0, "sigmoid({}) = {}", x, y);
        }
    }

    #[test]
    fn sigmoid_of_ten_is_nearly_one() {
        let y = ActivationFunction::Sigmoid.function(10.0);
        assert!((y - 0.9999546021312976).abs() < 1e-12);
    }

    #[test]
    fn relu_is_never_negative() {
        for &x in &[-100.0, -0.001, 0.0, 0.001, 42.0] {
            assert!(ActivationFunction::ReLU.function(x) >= 0.0);
        }
    }

    #[test]
    fn relu_passes_positive_values_through() {
        assert_eq!(ActivationFunction::ReLU.function(3.25), 3.25);
        assert_eq!(ActivationFunction::ReLU.function(-3.25), 0.0);
    }
}
