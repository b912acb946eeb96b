//! Slack webhook delivery.
//!
//! Posts a [`SlackMessage`] as JSON to a configured webhook URL. The
//! contract is strict: anything other than HTTP 200 is a hard failure
//! carrying the status code and response body.

use crate::message::SlackMessage;

/// Errors that can occur during alert delivery.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// Transport-level failure (connection refused, DNS, TLS, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The webhook answered with a status other than 200.
    #[error("webhook returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Delivers Slack alerts as JSON over HTTP to a configured webhook URL.
#[derive(Debug)]
pub struct SlackNotifier {
    /// Target webhook URL.
    url: String,
    /// Shared HTTP client (connection pooling).
    client: reqwest::Client,
}

impl SlackNotifier {
    /// Create a new notifier for the given webhook URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Deliver a message to the configured webhook.
    ///
    /// Success is exactly HTTP 200. Any other status is surfaced as
    /// [`NotifyError::Status`] with the response body attached.
    pub async fn send(&self, message: &SlackMessage) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(
                url = %self.url,
                %status,
                body = %body,
                "slack webhook returned non-200 status"
            );
            return Err(NotifyError::Status { status, body });
        }

        tracing::debug!(
            url = %self.url,
            channel = %message.channel,
            "slack alert delivered"
        );

        Ok(())
    }

    /// The configured webhook URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}
