use std::sync::Arc;

use darklight::Params;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Runtime knobs, read once at startup. Two environment variables with
/// sensible defaults; no config file.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address (`DARKLIGHT_ADDR`).
    pub addr: String,
    /// Path of the parameter file (`DARKLIGHT_PARAMS`).
    pub params_path: String,
}

impl ServerConfig {
    pub fn from_env() -> ServerConfig {
        ServerConfig {
            addr: std::env::var("DARKLIGHT_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:8000".to_owned()),
            params_path: std::env::var("DARKLIGHT_PARAMS")
                .unwrap_or_else(|_| "params.json".to_owned()),
        }
    }
}

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// State shared by every request thread.
///
/// The parameter set is loaded once before the server binds and never
/// mutated afterwards, so it is shared through a plain `Arc` — concurrent
/// inference calls read it without locking.
pub struct ServerState {
    pub params: Params,
    /// Where the parameters came from; shown on the page and served by the
    /// download route.
    pub params_path: String,
}

pub type SharedState = Arc<ServerState>;
