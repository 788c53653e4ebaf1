//! Delivery of the human-readable notification text. Grounded on
//! `internal/infrastructure/notifier/logger_notifier.go`: the reference
//! implementation just logs and never fails — there is no external channel
//! in scope (§ Non-goals excludes email/push/webhook delivery), but the
//! seam stays a trait so a real channel can be added without touching the
//! router.

pub trait Notifier: Send + Sync {
    fn notify(&self, text: &str);
}

pub struct LoggingNotifier;

impl Notifier for LoggingNotifier {
    fn notify(&self, text: &str) {
        tracing::info!(%text, "notification");
    }
}
