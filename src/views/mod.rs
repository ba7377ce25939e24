//! HTML rendering: full pages, htmx partials and SSE fragments.
//!
//! Every function here is pure and returns markup as a `String`. Response
//! headers are applied by [`crate::api::handlers::pages::HtmlPage`].

pub mod fragments;
pub mod pages;

pub use fragments::{contact_success, hex_cell};
pub use pages::{home, not_found, privacy};

/// Escapes the five HTML-significant characters.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
