//! Outbound operator notifications.

use tracing::info;

use crate::error::NotifyError;

/// Best-effort message delivery. Callers log failures and move on.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<(), NotifyError>;
}

/// Writes notifications to the log only; used when no transport is configured.
pub struct LogNotifier;

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        info!(message = %message, "Notification (log only)");
        Ok(())
    }
}
