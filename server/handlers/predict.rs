use std::io::Cursor;

use serde_json::json;
use tiny_http::Response;

use darklight::{classify, forward, Matrix};

use crate::routes::json_response;
use crate::state::SharedState;
use crate::util::query::{parse_query, query_get};

/// `GET /prediction?red=R&green=G&blue=B`
///
/// Builds the 3×1 input vector from the channel values, runs the forward
/// pass, and thresholds the output at a strict 0.5: `{"val": 1}` means dark
/// text over that background, `{"val": 0}` light text. Missing or
/// non-numeric channels get a 400 before the propagator is ever reached.
pub fn handle(query: &str, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let pairs = parse_query(query);

    let channels = match parse_channels(&pairs) {
        Ok(c) => c,
        Err(msg) => return json_response(400, &json!({ "error": msg })),
    };

    let input = Matrix::column(channels);
    match forward(&input, &state.params) {
        Ok((output, _cache)) => {
            let val = classify(output.data[0][0]);
            json_response(200, &json!({ "val": val }))
        }
        // Startup validation makes this unreachable for the loaded set.
        Err(e) => json_response(500, &json!({ "error": e.to_string() })),
    }
}

/// Pulls `red`, `green`, `blue` out of the query pairs as non-negative
/// integers, in input-vector order.
fn parse_channels(pairs: &[(String, String)]) -> Result<Vec<f64>, String> {
    ["red", "green", "blue"]
        .into_iter()
        .map(|name| {
            let raw = query_get(pairs, name)
                .ok_or_else(|| format!("missing channel \"{}\"", name))?;
            let value: u32 = raw.trim().parse().map_err(|_| {
                format!("channel \"{}\" must be a non-negative integer, got \"{}\"", name, raw)
            })?;
            Ok(value as f64)
        })
        .collect()
}
