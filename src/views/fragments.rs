//! Partials swapped in by htmx and fragments merged by Datastar.

use crate::stream::CellUpdate;

/// Renders one hex cell. The element id is `<grid>-cell-<index>` so that a
/// merge-fragments event replaces the placeholder rendered by
/// [`cell_grid`].
#[must_use]
pub fn hex_cell(grid: &str, update: &CellUpdate) -> String {
    let class = if update.highlight {
        "hex-cell hex-cell--lit"
    } else {
        "hex-cell"
    };
    format!(
        r#"<span id="{grid}-cell-{index}" class="{class}">{value}</span>"#,
        index = update.index,
        value = update.value,
    )
}

/// Renders `cells` dim placeholders. With a `stream_path` the grid
/// subscribes to that cell stream on load; without one it stays static.
#[must_use]
pub fn cell_grid(grid: &str, cells: usize, stream_path: Option<&str>) -> String {
    let subscribe = stream_path
        .map(|path| format!(r#" data-on-load="@get('{path}')""#))
        .unwrap_or_default();
    let mut markup =
        format!(r#"<div class="hex-grid hex-grid--{grid}" aria-hidden="true"{subscribe}>"#);
    for index in 0..cells {
        markup.push_str(&format!(
            r#"<span id="{grid}-cell-{index}" class="hex-cell">00</span>"#
        ));
    }
    markup.push_str("</div>");
    markup
}

/// The partial returned after a contact form submission.
#[must_use]
pub fn contact_success() -> String {
    r#"<div id="contact-result" class="contact-result" role="status">
  <h3>Transmission Received</h3>
  <p>Thanks for getting in touch. We reply to every inquiry within one working day.</p>
</div>"#
        .to_string()
}
