use std::io::Cursor;
use tiny_http::Response;

use crate::render::render_page;
use crate::routes::html_response;
use crate::state::SharedState;

/// `GET /` — the RGB slider page.
pub fn handle(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let page = render_page(
        state.params.layer_count(),
        state.params.input_size(),
        &state.params_path,
    );
    html_response(page)
}
