//! stackfoundry-site entry point.
//!
//! Runs the Axum router on a local TCP listener, or under the Lambda
//! runtime when `AWS_LAMBDA_FUNCTION_NAME` is set.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use stackfoundry_site::api;
use stackfoundry_site::app_state::AppState;
use stackfoundry_site::config::{LogFormat, SiteConfig};
use stackfoundry_site::mail::{Mailer, SesMailer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (also reads .env, which may set RUST_LOG)
    let config = SiteConfig::from_env()?;
    init_tracing(config.log_format);

    // Build the contact relay
    let mailer = if config.mail_enabled {
        let ses = SesMailer::from_env(&config.aws_region, &config.contact_inbox).await;
        tracing::info!(region = %config.aws_region, "mail relay ready");
        Some(Arc::new(ses) as Arc<dyn Mailer>)
    } else {
        tracing::warn!("mail relay disabled; contact submissions will only be logged");
        None
    };

    // API Gateway buffers Lambda responses, so cell streams stay off there
    let state = AppState {
        mailer,
        live_streams: !config.lambda_mode,
    };
    let app = api::build_app(state, &config.public_dir);

    if config.lambda_mode {
        tracing::info!(mode = "lambda", "server_starting");
        lambda_http::run(app)
            .await
            .map_err(|err| anyhow::anyhow!(err))?;
    } else {
        tracing::info!(mode = "local", addr = %config.listen_addr, "server_starting");
        let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
    }

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "could not listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
