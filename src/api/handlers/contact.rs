//! Contact form relay endpoint.

use std::time::Duration;

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::Router;
use axum::routing::post;
use serde::Deserialize;
use utoipa::ToSchema;

use super::pages::{HtmlPage, PageContext};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, SiteError};
use crate::mail::{ContactMessage, Mailer};
use crate::views;

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Fields posted by the contact form. Missing fields are empty.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ContactForm {
    /// Visitor email address.
    pub email: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
}

impl From<ContactForm> for ContactMessage {
    fn from(form: ContactForm) -> Self {
        Self {
            reply_to: form.email,
            subject: form.subject,
            body: form.message,
        }
    }
}

/// `POST /api/contact` — Relay an inquiry to the site inbox.
///
/// Relay failures are logged and never surface to the visitor: the success
/// partial is rendered whenever the form parses.
///
/// # Errors
///
/// Returns [`SiteError::InvalidForm`] if the body is not a urlencoded form.
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "Contact",
    summary = "Submit the contact form",
    description = "Relays the inquiry by email when the relay is configured and an email address was given, then renders the confirmation partial.",
    request_body(content = ContactForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Confirmation partial", body = String, content_type = "text/html"),
        (status = 400, description = "Unparsable form body", body = ErrorResponse),
    )
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    ctx: PageContext,
    form: Result<Form<ContactForm>, FormRejection>,
) -> Result<HtmlPage, SiteError> {
    let Form(form) = form.map_err(|rejection| {
        tracing::warn!(session = %ctx.session, error = %rejection, "contact_rejected");
        SiteError::InvalidForm("Failed to parse form".to_string())
    })?;

    tracing::info!(session = %ctx.session, email = %form.email, "contact_attempt");

    if let Some(mailer) = state.mailer.as_deref()
        && !form.email.is_empty()
    {
        relay(mailer, form.into()).await;
    }

    Ok(ctx.page(StatusCode::OK, views::contact_success()))
}

async fn relay(mailer: &dyn Mailer, message: ContactMessage) {
    match tokio::time::timeout(SEND_TIMEOUT, mailer.send(&message)).await {
        Ok(Ok(())) => tracing::info!(recipient = %message.reply_to, "mail_sent"),
        Ok(Err(err)) => tracing::error!(error = %err, "mail_failed"),
        Err(_) => tracing::error!(timeout_secs = SEND_TIMEOUT.as_secs(), "mail_failed"),
    }
}

/// Contact routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/contact", post(submit_contact))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use axum::http::header::CONTENT_TYPE;
    use tower::ServiceExt;

    use super::*;
    use crate::error::MailError;

    #[derive(Debug, Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<ContactMessage>>,
        fail: bool,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, message: &ContactMessage) -> Result<(), MailError> {
            if let Ok(mut sent) = self.sent.lock() {
                sent.push(message.clone());
            }
            if self.fail {
                Err(MailError::Send("rejected".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn post_form(body: &'static str) -> Request<Body> {
        let Ok(request) = Request::post("/api/contact")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
        else {
            panic!("valid request");
        };
        request
    }

    fn sent_count(mailer: &RecordingMailer) -> usize {
        mailer.sent.lock().map(|sent| sent.len()).unwrap_or_default()
    }

    #[tokio::test]
    async fn relays_message_when_mailer_present() {
        let mailer = Arc::new(RecordingMailer::default());
        let state = AppState::with_mailer(Arc::clone(&mailer) as Arc<dyn Mailer>);
        let app = routes().with_state(state);

        let Ok(response) = app
            .oneshot(post_form("email=a%40b.com&subject=Hi&message=Build+it"))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let Ok(sent) = mailer.sent.lock() else {
            panic!("mailer lock poisoned");
        };
        assert_eq!(
            *sent,
            vec![ContactMessage {
                reply_to: "a@b.com".to_string(),
                subject: "Hi".to_string(),
                body: "Build it".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn empty_email_skips_relay() {
        let mailer = Arc::new(RecordingMailer::default());
        let state = AppState::with_mailer(Arc::clone(&mailer) as Arc<dyn Mailer>);
        let app = routes().with_state(state);

        let Ok(response) = app.oneshot(post_form("subject=Hi&message=Hello")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(sent_count(&mailer), 0);
    }

    #[tokio::test]
    async fn relay_failure_still_renders_success() {
        let mailer = Arc::new(RecordingMailer {
            fail: true,
            ..RecordingMailer::default()
        });
        let state = AppState::with_mailer(Arc::clone(&mailer) as Arc<dyn Mailer>);
        let app = routes().with_state(state);

        let Ok(response) = app.oneshot(post_form("email=a%40b.com")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(sent_count(&mailer), 1);
    }

    #[tokio::test]
    async fn wrong_content_type_is_bad_request() {
        let app = routes().with_state(AppState::default());
        let Ok(request) = Request::post("/api/contact")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
        else {
            panic!("valid request");
        };

        let Ok(response) = app.oneshot(request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
