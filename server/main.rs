/// darklight server
///
/// Serves the dark-or-light text classifier: an HTML page with three RGB
/// sliders and a JSON prediction endpoint backed by a small feedforward
/// network whose parameters are loaded once at startup.
///
/// Run with:
///   cargo run --bin server
/// Then open http://127.0.0.1:8000
///
/// Routes:
///   GET /                 — slider page
///   GET /prediction       — {"val": 0|1} for ?red=&green=&blue=
///   GET /model            — topology of the loaded network
///   GET /params/download  — the parameter file itself

mod state;
mod render;
mod routes;
mod handlers;
mod util;

use std::sync::Arc;
use tiny_http::Server;

use darklight::Params;

use state::{ServerConfig, ServerState};

fn main() {
    let config = ServerConfig::from_env();

    // The parameter set loads before the socket binds: a missing or
    // shape-inconsistent file must keep the server from serving at all.
    let params = match Params::load_json(&config.params_path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {}: {}", config.params_path, e);
            std::process::exit(1);
        }
    };

    // The prediction route feeds three channels in and thresholds one
    // scalar out; any other topology is a configuration mistake.
    if params.input_size() != 3 || params.output_size() != 1 {
        eprintln!(
            "error: {}: the prediction route needs a 3-input, 1-output network, got {} in / {} out",
            config.params_path,
            params.input_size(),
            params.output_size()
        );
        std::process::exit(1);
    }

    let server = match Server::http(&config.addr) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: could not bind {}: {}", config.addr, e);
            std::process::exit(1);
        }
    };

    println!("╔══════════════════════════════════════════════╗");
    println!("║          darklight                           ║");
    println!("╠══════════════════════════════════════════════╣");
    println!("║  Open in your browser:                       ║");
    println!("║  http://{}                 ║", config.addr);
    println!("╠══════════════════════════════════════════════╣");
    println!("║  Slide the RGB channels; the sample text     ║");
    println!("║  flips dark or light as the net predicts.    ║");
    println!("╚══════════════════════════════════════════════╝");
    println!(
        "loaded {} transform layers from {}",
        params.layer_count(),
        config.params_path
    );

    let shared = Arc::new(ServerState {
        params,
        params_path: config.params_path,
    });

    // One thread per request. Each inference is a short, bounded computation
    // over the shared read-only parameter set, so threads never coordinate.
    for request in server.incoming_requests() {
        let state = shared.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state);
        });
    }
}
