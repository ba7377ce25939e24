//! Contact form relay.
//!
//! Handlers hold an `Option<Arc<dyn Mailer>>`: `None` means the relay is
//! switched off and sending is skipped, not failed.

pub mod ses;

use async_trait::async_trait;

pub use ses::SesMailer;

use crate::error::MailError;
use crate::views::escape_html;

/// One inquiry submitted through the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    /// Visitor address, used as reply-to.
    pub reply_to: String,
    /// Free-text subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
}

impl ContactMessage {
    /// Subject line as it lands in the inbox.
    #[must_use]
    pub fn inbox_subject(&self) -> String {
        format!("[StackFoundry] {}", self.subject)
    }

    /// Plain-text rendition.
    #[must_use]
    pub fn text_body(&self) -> String {
        format!("From: {}\n\nMessage:\n{}", self.reply_to, self.body)
    }

    /// HTML rendition with every visitor-supplied field escaped.
    #[must_use]
    pub fn html_body(&self) -> String {
        format!(
            "<h3>New Inquiry from StackFoundry</h3>\n\
             <p><strong>From:</strong> {}</p>\n\
             <p><strong>Subject:</strong> {}</p>\n\
             <hr/>\n\
             <p>{}</p>",
            escape_html(&self.reply_to),
            escape_html(&self.subject),
            escape_html(&self.body),
        )
    }
}

/// Delivers contact messages to the site inbox.
#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug {
    /// Sends one message.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] if the message cannot be built or the provider
    /// rejects it.
    async fn send(&self, message: &ContactMessage) -> Result<(), MailError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> ContactMessage {
        ContactMessage {
            reply_to: "visitor@example.com".to_string(),
            subject: "Quote <urgent>".to_string(),
            body: "Hello & welcome".to_string(),
        }
    }

    #[test]
    fn subject_is_prefixed() {
        assert_eq!(message().inbox_subject(), "[StackFoundry] Quote <urgent>");
    }

    #[test]
    fn text_body_names_sender() {
        assert_eq!(
            message().text_body(),
            "From: visitor@example.com\n\nMessage:\nHello & welcome"
        );
    }

    #[test]
    fn html_body_escapes_visitor_input() {
        let html = message().html_body();
        assert!(html.contains("Quote &lt;urgent&gt;"));
        assert!(html.contains("Hello &amp; welcome"));
        assert!(!html.contains("<urgent>"));
    }
}
