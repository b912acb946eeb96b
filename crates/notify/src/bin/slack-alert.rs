//! slack-alert — posts a formatted vulnerability alert to a Slack webhook.
//!
//! Used by CI workflows to report scan findings. Exits non-zero when the
//! webhook answers with anything other than HTTP 200, so a lost alert
//! fails the pipeline step instead of vanishing silently.

use anyhow::Context;
use clap::Parser;
use tracing::info;

use ci_notify::{Alert, SlackMessage, SlackNotifier};

/// Send a Slack alert from a CI pipeline.
#[derive(Parser, Debug)]
#[command(name = "slack-alert", version, about)]
struct Cli {
    /// Slack webhook URL.
    #[arg(long, env = "SLACK_WEBHOOK_URL")]
    url: String,

    /// The title of the alert.
    #[arg(long, default_value = "Github Actions Vulnerability Alert")]
    title: String,

    /// The alert message.
    #[arg(long, default_value = "")]
    message: String,

    /// The username of the alert to display.
    #[arg(long, default_value = "Github Actions Bot")]
    username: String,

    /// Emoji to send in the alert.
    #[arg(long, default_value = ":sos:")]
    icon_emoji: String,

    /// To which channel send the alert.
    #[arg(long, default_value = "#alert-test")]
    channel: String,

    /// The color of the message.
    #[arg(long, default_value = "danger")]
    color: String,

    /// The link to the github action run.
    #[arg(long, default_value = "")]
    action_link: String,

    /// The branch name.
    #[arg(long, default_value = "")]
    branch: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let message = SlackMessage::from(Alert {
        title: cli.title,
        message: cli.message,
        username: cli.username,
        icon_emoji: cli.icon_emoji,
        channel: cli.channel,
        color: cli.color,
        action_link: cli.action_link,
        branch: cli.branch,
    });

    let notifier = SlackNotifier::new(cli.url);
    notifier
        .send(&message)
        .await
        .context("failed to deliver slack alert")?;

    info!(channel = %message.channel, "slack alert delivered");
    Ok(())
}
