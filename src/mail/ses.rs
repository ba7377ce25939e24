//! Amazon SES implementation of [`Mailer`].

use async_trait::async_trait;
use aws_sdk_ses::Client;
use aws_sdk_ses::error::DisplayErrorContext;
use aws_sdk_ses::types::{Body, Content, Destination, Message};

use super::{ContactMessage, Mailer};
use crate::error::MailError;

/// Sends inquiries from and to a single verified SES identity.
#[derive(Debug, Clone)]
pub struct SesMailer {
    client: Client,
    inbox: String,
}

impl SesMailer {
    /// Wraps an existing SES client.
    #[must_use]
    pub fn new(client: Client, inbox: impl Into<String>) -> Self {
        Self {
            client,
            inbox: inbox.into(),
        }
    }

    /// Loads AWS credentials from the default provider chain and builds a
    /// client for `region`.
    pub async fn from_env(region: &str, inbox: impl Into<String>) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;
        Self::new(Client::new(&config), inbox)
    }
}

fn content(data: String) -> Result<Content, MailError> {
    Ok(Content::builder().data(data).charset("UTF-8").build()?)
}

/// Assembles the SES message: UTF-8 subject, text and HTML parts.
fn email(message: &ContactMessage) -> Result<Message, MailError> {
    let body = Body::builder()
        .text(content(message.text_body())?)
        .html(content(message.html_body())?)
        .build();
    Ok(Message::builder()
        .subject(content(message.inbox_subject())?)
        .body(body)
        .build())
}

#[async_trait]
impl Mailer for SesMailer {
    async fn send(&self, message: &ContactMessage) -> Result<(), MailError> {
        self.client
            .send_email()
            .source(&self.inbox)
            .destination(Destination::builder().to_addresses(&self.inbox).build())
            .reply_to_addresses(&message.reply_to)
            .message(email(message)?)
            .send()
            .await
            .map_err(|err| MailError::Send(DisplayErrorContext(err).to_string()))?;
        Ok(())
    }
}
