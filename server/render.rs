/// Page renderer for the darklight front end.
///
/// The server ships a single HTML page (`server/assets/darklight.html`) with
/// placeholder tokens like `{{TOKEN}}`, compiled in with `include_str!`.
/// The tokens describe the loaded model; everything else on the page is
/// static. Unreplaced tokens are blanked so a missed one produces a clean
/// page instead of leaking `{{TOKEN}}` text to the browser.

const TEMPLATE: &str = include_str!("assets/darklight.html");

/// Renders the slider page.
///
/// # Arguments
/// - `layer_count`   — transform layers in the loaded network
/// - `input_size`    — input width the network expects
/// - `params_source` — file the parameters were loaded from
pub fn render_page(layer_count: usize, input_size: usize, params_source: &str) -> String {
    let mut html = TEMPLATE.to_owned();

    html = html.replace("{{LAYER_COUNT}}", &layer_count.to_string());
    html = html.replace("{{INPUT_SIZE}}", &input_size.to_string());
    html = html.replace("{{PARAMS_SOURCE}}", &html_escape(params_source));

    blank_remaining(html)
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
     .replace('<', "&lt;")
     .replace('>', "&gt;")
     .replace('"', "&quot;")
}

/// Replaces any `{{UPPERCASE_TOKEN}}` that wasn't already substituted with an
/// empty string.
fn blank_remaining(mut html: String) -> String {
    while let Some(start) = html.find("{{") {
        if let Some(end) = html[start..].find("}}") {
            let abs_end = start + end + 2;
            html.replace_range(start..abs_end, "");
        } else {
            break;
        }
    }
    html
}
