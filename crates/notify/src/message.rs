//! Slack incoming-webhook payload types.

use serde::{Deserialize, Serialize};

/// Top-level Slack webhook payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlackMessage {
    /// Display username for the alert.
    pub username: String,
    /// Emoji code shown next to the username (e.g. `:sos:`).
    pub icon_emoji: String,
    /// Target channel (e.g. `#alert-test`).
    pub channel: String,
    /// Exactly one attachment carrying the alert fields.
    pub attachments: Vec<Attachment>,
}

/// A colored attachment block holding an ordered list of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Slack color code or keyword (e.g. `danger`).
    pub color: String,
    pub fields: Vec<Field>,
}

/// A single `{title, value, short}` triple inside an attachment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub title: String,
    pub value: String,
    /// Whether Slack may render this field side-by-side with another.
    pub short: bool,
}

/// Inputs for the standard CI vulnerability alert.
///
/// [`Default`] carries the conventional values used by the pipeline;
/// callers override whichever fields the invocation provides.
#[derive(Debug, Clone)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub username: String,
    pub icon_emoji: String,
    pub channel: String,
    pub color: String,
    /// Link to the CI run that triggered the alert.
    pub action_link: String,
    pub branch: String,
}

impl Default for Alert {
    fn default() -> Self {
        Self {
            title: "Github Actions Vulnerability Alert".to_string(),
            message: String::new(),
            username: "Github Actions Bot".to_string(),
            icon_emoji: ":sos:".to_string(),
            channel: "#alert-test".to_string(),
            color: "danger".to_string(),
            action_link: String::new(),
            branch: String::new(),
        }
    }
}

impl From<Alert> for SlackMessage {
    /// Assemble the three-field alert layout: title+message, run link, branch.
    fn from(alert: Alert) -> Self {
        SlackMessage {
            username: alert.username,
            icon_emoji: alert.icon_emoji,
            channel: alert.channel,
            attachments: vec![Attachment {
                color: alert.color,
                fields: vec![
                    Field {
                        title: alert.title,
                        value: alert.message,
                        short: true,
                    },
                    Field {
                        title: "Action URL".to_string(),
                        value: alert.action_link,
                        short: false,
                    },
                    Field {
                        title: "Branch".to_string(),
                        value: alert.branch,
                        short: false,
                    },
                ],
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn alert_defaults() {
        let alert = Alert::default();
        assert_eq!(alert.title, "Github Actions Vulnerability Alert");
        assert_eq!(alert.username, "Github Actions Bot");
        assert_eq!(alert.icon_emoji, ":sos:");
        assert_eq!(alert.channel, "#alert-test");
        assert_eq!(alert.color, "danger");
        assert!(alert.message.is_empty());
    }

    #[test]
    fn alert_wire_format() {
        let message = SlackMessage::from(Alert {
            message: "found 3 findings".to_string(),
            action_link: "https://github.com/acme/repo/actions/runs/42".to_string(),
            branch: "main".to_string(),
            ..Alert::default()
        });

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "username": "Github Actions Bot",
                "icon_emoji": ":sos:",
                "channel": "#alert-test",
                "attachments": [{
                    "color": "danger",
                    "fields": [
                        {
                            "title": "Github Actions Vulnerability Alert",
                            "value": "found 3 findings",
                            "short": true
                        },
                        {
                            "title": "Action URL",
                            "value": "https://github.com/acme/repo/actions/runs/42",
                            "short": false
                        },
                        {
                            "title": "Branch",
                            "value": "main",
                            "short": false
                        }
                    ]
                }]
            })
        );
    }

    #[test]
    fn alert_field_order_is_stable() {
        let message = SlackMessage::from(Alert::default());
        let titles: Vec<&str> = message.attachments[0]
            .fields
            .iter()
            .map(|f| f.title.as_str())
            .collect();
        assert_eq!(
            titles,
            vec!["Github Actions Vulnerability Alert", "Action URL", "Branch"]
        );
    }
}
