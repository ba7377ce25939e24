//! # stackfoundry-site
//!
//! The StackFoundry marketing site: server-rendered pages, a contact form
//! relayed through Amazon SES, and Datastar-driven hex-cell animations fed
//! by per-connection server-sent event streams.
//!
//! The same router runs as a local HTTP server or inside AWS Lambda.
//!
//! ## Architecture
//!
//! ```text
//! Browser (htmx, Datastar)
//!     │
//!     ├── Trace / security headers / session / visitor log / gzip (middleware/)
//!     │
//!     ├── Page, contact, SEO, health handlers (api/)
//!     │       ├── HTML views (views/)
//!     │       └── Mailer ── Amazon SES (mail/)
//!     │
//!     └── SSE handlers (api/) ── run_broadcast task per connection (stream/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod mail;
pub mod middleware;
pub mod stream;
pub mod views;
