pub mod propagate;

pub use propagate::{activation_for, apply_layer, classify, forward, ActivationCache, ForwardError};
