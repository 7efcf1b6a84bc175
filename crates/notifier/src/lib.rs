// In crates/notifier/src/lib.rs

use async_trait::async_trait;

pub mod error;
pub mod events;
pub mod telegram;

pub use error::{Error, Result};
pub use events::BotEvent;
pub use telegram::TelegramNotifier;

/// Best-effort delivery of human readable messages.
///
/// `notify` never fails: implementations log delivery problems and return.
/// Nothing on the decision path may depend on a notification arriving.
#[async_trait]
pub trait Notifier {
    fn name(&self) -> &'static str;

    async fn notify(&self, text: &str);
}

/// A notifier that only writes to the log.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &'static str {
        "LogNotifier"
    }

    async fn notify(&self, text: &str) {
        tracing::info!(target: "notifier", "{}", text);
    }
}
