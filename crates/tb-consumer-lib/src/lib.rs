//! Notification-consumer application logic (C9/C10): decode, dispatch,
//! record, notify, dead-letter on failure. The transport half (`BusConsumer`,
//! `Producer`) lives in `tb-bus`; this crate only supplies the
//! `MessageHandler` that transport hands messages to.

pub mod dlq;
pub mod notifier;
pub mod router;
pub mod text;

pub use notifier::{LoggingNotifier, Notifier};
pub use router::NotificationRouter;
