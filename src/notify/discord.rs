//! Discord webhook notifier
//!
//! Posts notifications as webhook embeds. Delivery happens on a detached
//! task; failures are logged and otherwise ignored.

use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::notify::{Notifier, NotifyKind};

// == Discord Notifier ==
pub struct DiscordNotifier {
    client: reqwest::Client,
    webhook_url: String,
}

impl DiscordNotifier {
    pub fn new(client: reqwest::Client, webhook_url: String) -> Self {
        Self {
            client,
            webhook_url,
        }
    }

    /// Builds the webhook body: one embed with the kind-prefixed title, the
    /// detail text, the kind's color, and the contact address in the footer.
    fn build_payload(
        kind: NotifyKind,
        title: &str,
        detail: &str,
        contact: Option<&str>,
    ) -> Value {
        json!({
            "embeds": [{
                "title": format!("{}: {}", kind.label(), title),
                "description": detail,
                "color": kind.color(),
                "timestamp": Utc::now().to_rfc3339(),
                "footer": {
                    "text": format!("Email: {}", contact.unwrap_or("-")),
                },
            }]
        })
    }
}

impl Notifier for DiscordNotifier {
    fn notify_with_contact(
        &self,
        kind: NotifyKind,
        title: &str,
        detail: &str,
        contact: Option<&str>,
    ) {
        let payload = Self::build_payload(kind, title, detail, contact);
        let client = self.client.clone();
        let url = self.webhook_url.clone();

        tokio::spawn(async move {
            match client.post(&url).json(&payload).send().await {
                Ok(response) if !response.status().is_success() => {
                    warn!(status = %response.status(), "notification rejected by webhook");
                }
                Ok(_) => debug!("notification delivered"),
                Err(err) => warn!(error = %err, "notification delivery failed"),
            }
        });
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let payload = DiscordNotifier::build_payload(
            NotifyKind::Error,
            "searchBooks failed",
            "catalog returned status 503",
            None,
        );

        let embed = &payload["embeds"][0];
        assert_eq!(embed["title"], "Error: searchBooks failed");
        assert_eq!(embed["description"], "catalog returned status 503");
        assert_eq!(embed["color"], 16_711_680);
        assert!(embed["timestamp"].is_string());
        assert_eq!(embed["footer"]["text"], "Email: -");
    }

    #[test]
    fn test_payload_includes_contact() {
        let payload = DiscordNotifier::build_payload(
            NotifyKind::Feedback,
            "search is slow",
            "searching by author takes seconds",
            Some("reader@example.com"),
        );

        let embed = &payload["embeds"][0];
        assert_eq!(embed["title"], "Feedback: search is slow");
        assert_eq!(embed["color"], 255);
        assert_eq!(embed["footer"]["text"], "Email: reader@example.com");
    }
}
