pub mod math;
pub mod activation;
pub mod params;
pub mod forward;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use params::store::{LayerParams, LoadError, Params};
pub use forward::propagate::{activation_for, apply_layer, classify, forward, ActivationCache, ForwardError};
