//! Slack webhook alerting for CI pipelines.
//!
//! This crate provides:
//! - Serde types for the Slack incoming-webhook payload (attachments + fields)
//! - An [`Alert`] builder for the standard CI vulnerability alert layout
//! - A [`SlackNotifier`] that posts the payload and fails hard on non-200

pub mod message;
pub mod webhook;

pub use message::{Alert, Attachment, Field, SlackMessage};
pub use webhook::{NotifyError, SlackNotifier};
