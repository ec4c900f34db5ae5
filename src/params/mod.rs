pub mod store;

pub use store::{LayerParams, LoadError, Params};
