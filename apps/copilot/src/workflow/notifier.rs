use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::debug;

/// How long a success message stays visible unless configured otherwise.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Default)]
struct NoticeSlot {
    message: Option<String>,
    generation: u64,
}

/// Holds at most one auto-expiring success message.
///
/// Each `show` or `clear` bumps a generation counter; an expiry timer only
/// clears the slot if its generation is still current.
#[derive(Debug, Clone)]
pub struct TransientNotifier {
    slot: Arc<Mutex<NoticeSlot>>,
    ttl: Duration,
}

impl TransientNotifier {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(NoticeSlot::default())),
            ttl,
        }
    }

    pub async fn show(&self, message: impl Into<String>) {
        let message = message.into();
        if message.is_empty() {
            self.clear().await;
            return;
        }

        let generation = {
            let mut slot = self.slot.lock().await;
            slot.generation += 1;
            slot.message = Some(message);
            slot.generation
        };

        let slot = Arc::clone(&self.slot);
        let ttl = self.ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            let mut slot = slot.lock().await;
            if slot.generation == generation {
                debug!("Notice {generation} expired");
                slot.message = None;
            }
        });
    }

    pub async fn clear(&self) {
        let mut slot = self.slot.lock().await;
        slot.generation += 1;
        slot.message = None;
    }

    pub async fn current(&self) -> Option<String> {
        self.slot.lock().await.message.clone()
    }
}

impl Default for TransientNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_message_expires_after_ttl() {
        let notifier = TransientNotifier::default();
        notifier.show("Successfully appointed meeting!").await;

        sleep(Duration::from_secs(4)).await;
        assert_eq!(
            notifier.current().await.as_deref(),
            Some("Successfully appointed meeting!")
        );

        sleep(Duration::from_secs(2)).await;
        assert_eq!(notifier.current().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_message_supersedes_pending_expiry() {
        let notifier = TransientNotifier::new(Duration::from_secs(5));
        notifier.show("first").await;
        sleep(Duration::from_secs(3)).await;
        notifier.show("second").await;

        // The first timer fires at t=5s but must not clear "second".
        sleep(Duration::from_secs(3)).await;
        assert_eq!(notifier.current().await.as_deref(), Some("second"));

        sleep(Duration::from_secs(3)).await;
        assert_eq!(notifier.current().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_is_immediate() {
        let notifier = TransientNotifier::default();
        notifier.show("done").await;
        notifier.clear().await;
        assert_eq!(notifier.current().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_message_clears() {
        let notifier = TransientNotifier::default();
        notifier.show("done").await;
        notifier.show("").await;
        assert_eq!(notifier.current().await, None);
    }
}
