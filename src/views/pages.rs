//! Full-page documents sharing one layout.

use super::escape_html;
use super::fragments::cell_grid;
use crate::middleware::SessionId;
use crate::stream::{CellStream, HERO_GRID, MATRIX_RAIN, WIDE_GRID};

const SITE_NAME: &str = "StackFoundry";

fn layout(title: &str, description: &str, session: &SessionId, main: &str) -> String {
    let title = escape_html(title);
    let description = escape_html(description);
    let session = escape_html(session.as_str());
    format!(
        r#"<!DOCTYPE html>
<html lang="en-GB">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} | {SITE_NAME}</title>
  <meta name="description" content="{description}">
  <link rel="stylesheet" href="/css/site.css">
  <link rel="icon" href="/img/favicon.svg" type="image/svg+xml">
  <script src="https://unpkg.com/htmx.org@2.0.4" defer></script>
  <script type="module" src="https://cdn.jsdelivr.net/gh/starfederation/datastar@v1.0.0-beta.11/bundles/datastar.js"></script>
  <script src="/js/site.js" defer></script>
</head>
<body hx-headers='{{"X-Session-ID": "{session}"}}'>
  <header class="site-header">
    <a class="brand" href="/">{SITE_NAME}</a>
    <nav><a href="/#services">Services</a> <a href="/#contact">Contact</a> <a href="/privacy">Privacy</a></nav>
  </header>
  <main>
{main}
  </main>
  <footer class="site-footer">
    <p>&copy; {SITE_NAME} Ltd. Registered in England and Wales.</p>
  </footer>
</body>
</html>"#
    )
}

fn grid(stream: &CellStream, live: bool) -> String {
    cell_grid(stream.grid, stream.settings.cells, live.then_some(stream.path))
}

/// The landing page. With `live` unset the grids render static.
#[must_use]
pub fn home(session: &SessionId, live: bool) -> String {
    let hero = grid(&HERO_GRID, live);
    let wide = grid(&WIDE_GRID, live);
    let main = format!(
        r##"<section class="hero">
  {hero}
  <h1>{SITE_NAME}: cloud platforms that stay up and stay cheap</h1>
  <p>Serverless architecture, infrastructure-as-code and cost guardrails for small teams.</p>
  <a class="cta" href="#contact">Start a project</a>
</section>
<section id="services" class="services">
  <h2>Services</h2>
  <ul>
    <li><h3>Serverless builds</h3><p>APIs and sites on Lambda with zero idle cost.</p></li>
    <li><h3>Infrastructure-as-code</h3><p>Reproducible environments, DNS and TLS included.</p></li>
    <li><h3>Billing guardrails</h3><p>Budgets and alarms before the invoice surprises you.</p></li>
  </ul>
</section>
<section id="contact" class="contact">
  <h2>Contact</h2>
  <form hx-post="/api/contact" hx-target="this" hx-swap="outerHTML">
    <label>Email <input type="email" name="email" required></label>
    <label>Subject <input type="text" name="subject"></label>
    <label>Message <textarea name="message" rows="5"></textarea></label>
    <button type="submit">Send</button>
  </form>
</section>
<section class="backdrop">
  {wide}
</section>"##
    );
    layout(
        "Home",
        "StackFoundry builds serverless platforms with cost guardrails.",
        session,
        &main,
    )
}

/// The privacy policy.
#[must_use]
pub fn privacy(session: &SessionId) -> String {
    let main = r#"<article class="prose">
  <h1>Privacy Policy</h1>
  <p>We do not use cookies or third-party analytics.</p>
  <p>Each visit is assigned a short random session identifier so that we can count page views. It is not linked to your identity and is discarded when you close the tab.</p>
  <p>If you use the contact form, your email address, subject and message are sent to our inbox so that we can reply. We keep correspondence for no longer than two years.</p>
  <p>To request deletion of your data, email joe@stackfoundry.co.uk.</p>
</article>"#;
    layout(
        "Privacy Policy",
        "How StackFoundry handles visitor data.",
        session,
        main,
    )
}

/// The 404 page.
#[must_use]
pub fn not_found(session: &SessionId, live: bool) -> String {
    let rain = grid(&MATRIX_RAIN, live);
    let main = format!(
        r#"<section class="not-found">
  {rain}
  <h1>404</h1>
  <p>That page drifted out of the grid.</p>
  <a class="cta" href="/">Back to the homepage</a>
</section>"#
    );
    layout("Not Found", "Page not found.", session, &main)
}
