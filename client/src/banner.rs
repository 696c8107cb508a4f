//! Transient message banner
//!
//! `show` replaces the current message and schedules its removal on the
//! tokio runtime. Showing a new message aborts the pending removal of the
//! previous one, and a removal only ever clears the message it was
//! scheduled for, so a quick second message stays up for its full delay.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use nutrilog_shared::BannerMessage;
use tokio::task::JoinHandle;

#[derive(Default)]
struct Slot {
    message: Option<BannerMessage>,
    generation: u64,
}

/// Banner with a cancellable scheduled clear
pub struct Banner {
    slot: Arc<Mutex<Slot>>,
    dismiss_after: Option<Duration>,
    pending_clear: Option<JoinHandle<()>>,
}

impl Banner {
    /// `None` keeps each message until it is replaced or dismissed
    pub fn new(dismiss_after: Option<Duration>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            dismiss_after,
            pending_clear: None,
        }
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.show(BannerMessage::success(text));
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.show(BannerMessage::error(text));
    }

    /// Replace the message and reschedule the clear
    pub fn show(&mut self, message: BannerMessage) {
        self.cancel_pending();

        let generation = {
            let mut slot = lock(&self.slot);
            slot.generation += 1;
            slot.message = Some(message);
            slot.generation
        };

        if let Some(delay) = self.dismiss_after {
            let slot = Arc::clone(&self.slot);
            self.pending_clear = Some(tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let mut slot = lock(&slot);
                if slot.generation == generation {
                    slot.message = None;
                }
            }));
        }
    }

    /// Current message, if any
    pub fn current(&self) -> Option<BannerMessage> {
        lock(&self.slot).message.clone()
    }

    /// Remove the message now
    pub fn dismiss(&mut self) {
        self.cancel_pending();
        let mut slot = lock(&self.slot);
        slot.generation += 1;
        slot.message = None;
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending_clear.take() {
            handle.abort();
        }
    }
}

impl Drop for Banner {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(|e| e.into_inner())
}
