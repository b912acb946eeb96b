//! config-combiner — merges the YAML rule files in a directory into one
//! combined rule file for the scanner step of the pipeline.
//!
//! Exits non-zero on the first malformed input. When `--slack-url` is set,
//! a failure is also posted to the webhook before exiting.

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, warn};

use ci_combiner::{Combiner, CombinerConfig};
use ci_notify::{Alert, SlackMessage, SlackNotifier};

/// Combine YAML rule files into a single document.
#[derive(Parser, Debug)]
#[command(name = "config-combiner", version, about)]
struct Cli {
    /// Directory containing the rule files to merge.
    #[arg(long, env = "RULES_DIR", default_value = "semgrep_rules")]
    rules_dir: PathBuf,

    /// Filename of the combined document, written into the rules directory.
    #[arg(long, env = "RULES_OUTPUT", default_value = "combined_rules.yml")]
    output: String,

    /// Slack webhook URL for failure alerts (alerts disabled when unset).
    #[arg(long, env = "SLACK_WEBHOOK_URL")]
    slack_url: Option<String>,

    /// Link to the CI run, included in failure alerts.
    #[arg(long)]
    action_link: Option<String>,

    /// Branch name, included in failure alerts.
    #[arg(long)]
    branch: Option<String>,
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
    info!(rules_dir = %cli.rules_dir.display(), output = %cli.output, "config combiner started");

    let combiner = Combiner::new(CombinerConfig {
        rules_dir: cli.rules_dir,
        output_filename: cli.output,
    });

    match combiner.combine() {
        Ok(report) => {
            info!(
                inputs = report.inputs.len(),
                rule_count = report.rule_count,
                output = %report.output_path.display(),
                "config combiner finished"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "rule combine failed");

            if let Some(url) = cli.slack_url {
                let message = SlackMessage::from(Alert {
                    message: e.to_string(),
                    action_link: cli.action_link.unwrap_or_default(),
                    branch: cli.branch.unwrap_or_default(),
                    ..Alert::default()
                });
                if let Err(notify_err) = SlackNotifier::new(url).send(&message).await {
                    warn!(error = %notify_err, "failed to deliver failure alert");
                }
            }

            Err(e.into())
        }
    }
}
