use std::io::Cursor;

use serde::Serialize;
use serde_json::json;
use tiny_http::Response;

use darklight::{activation_for, ActivationFunction};

use crate::routes::{json_download_response, json_response, not_found};
use crate::state::SharedState;

/// One row of the `/model` topology summary.
#[derive(Serialize)]
struct LayerInfo {
    inputs: usize,
    outputs: usize,
    activation: ActivationFunction,
}

/// `GET /model`
///
/// Describes the loaded network: per-layer widths and activations, derived
/// from the parameter set rather than stored anywhere.
pub fn handle_info(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let count = state.params.layer_count();
    let layers: Vec<LayerInfo> = state
        .params
        .layers()
        .iter()
        .enumerate()
        .map(|(i, layer)| LayerInfo {
            inputs: layer.weights.cols,
            outputs: layer.weights.rows,
            activation: activation_for(i, count),
        })
        .collect();

    json_response(
        200,
        &json!({
            "layer_count": count,
            "input_size": state.params.input_size(),
            "output_size": state.params.output_size(),
            "layers": layers,
        }),
    )
}

/// `GET /params/download`
///
/// Serves the parameter file the server was started with as a downloadable
/// attachment.
pub fn handle_download(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    match std::fs::read_to_string(&state.params_path) {
        Ok(json) => {
            let filename = std::path::Path::new(&state.params_path)
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("params.json");
            json_download_response(json, filename)
        }
        Err(_) => not_found(),
    }
}
