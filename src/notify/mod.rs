//! Notification Module
//!
//! Out-of-band notifications for upstream failures and user feedback.
//! Deliveries are strictly fire-and-forget: no gateway operation ever waits
//! on, or fails because of, a notification.

mod discord;

pub use discord::DiscordNotifier;

// == Notify Kind ==
/// Category of a notification, controlling its embed color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Error,
    Feedback,
    Alert,
}

impl NotifyKind {
    /// Decimal RGB color for the embed.
    pub fn color(&self) -> u32 {
        match self {
            NotifyKind::Error => 16_711_680,   // red
            NotifyKind::Feedback => 255,       // blue
            NotifyKind::Alert => 16_776_960,   // yellow
        }
    }

    /// Label prefixed to the notification title.
    pub fn label(&self) -> &'static str {
        match self {
            NotifyKind::Error => "Error",
            NotifyKind::Feedback => "Feedback",
            NotifyKind::Alert => "Alert",
        }
    }
}

// == Notifier Trait ==
/// Capability to send a notification without blocking the caller.
pub trait Notifier: Send + Sync {
    /// Sends a notification with no contact address attached.
    fn notify(&self, kind: NotifyKind, title: &str, detail: &str) {
        self.notify_with_contact(kind, title, detail, None);
    }

    /// Sends a notification, attaching a contact address when present
    /// (used by the feedback path).
    fn notify_with_contact(
        &self,
        kind: NotifyKind,
        title: &str,
        detail: &str,
        contact: Option<&str>,
    );
}

// == Noop Notifier ==
/// Notifier that drops everything; used when no webhook is configured and
/// in tests.
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify_with_contact(&self, _: NotifyKind, _: &str, _: &str, _: Option<&str>) {}
}
