use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use hub_core::{NoticeKind, NoticeMessage, Notifier};
use hub_logging::{hub_info, hub_warn};

const TOAST_TTL: Duration = Duration::from_secs(4);
const TOAST_CAPACITY: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: NoticeKind,
    pub message: NoticeMessage,
    pub shown_at: Instant,
}

/// Terminal toast area: a short queue of recent notices that expire.
pub struct ToastBoard {
    toasts: Mutex<VecDeque<Toast>>,
    ttl: Duration,
    capacity: usize,
}

impl Default for ToastBoard {
    fn default() -> Self {
        Self::new(TOAST_TTL, TOAST_CAPACITY)
    }
}

impl ToastBoard {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            toasts: Mutex::new(VecDeque::with_capacity(capacity)),
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// Toasts still visible at `now`, oldest first. Expired ones are dropped.
    pub fn visible(&self, now: Instant) -> Vec<Toast> {
        let mut toasts = self.lock();
        toasts.retain(|toast| now.saturating_duration_since(toast.shown_at) < self.ttl);
        toasts.iter().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Toast>> {
        self.toasts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Notifier for ToastBoard {
    fn notify(&self, kind: NoticeKind, message: &NoticeMessage) {
        match kind {
            NoticeKind::Success => hub_info!("Notice: {}: {}", message.title, message.description),
            NoticeKind::Failure => hub_warn!("Notice: {}: {}", message.title, message.description),
        }
        let mut toasts = self.lock();
        toasts.push_back(Toast {
            kind,
            message: message.clone(),
            shown_at: Instant::now(),
        });
        while toasts.len() > self.capacity {
            toasts.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(title: &str) -> NoticeMessage {
        NoticeMessage::new(title, "details")
    }

    #[test]
    fn keeps_only_the_most_recent_toasts() {
        let board = ToastBoard::new(Duration::from_secs(60), 2);
        board.notify(NoticeKind::Success, &message("one"));
        board.notify(NoticeKind::Failure, &message("two"));
        board.notify(NoticeKind::Success, &message("three"));

        let titles: Vec<_> = board
            .visible(Instant::now())
            .into_iter()
            .map(|toast| toast.message.title)
            .collect();
        assert_eq!(titles, vec!["two", "three"]);
    }

    #[test]
    fn toasts_expire_after_ttl() {
        let board = ToastBoard::new(Duration::from_millis(100), 3);
        board.notify(NoticeKind::Failure, &message("gone soon"));
        assert_eq!(board.visible(Instant::now()).len(), 1);
        assert!(board
            .visible(Instant::now() + Duration::from_secs(1))
            .is_empty());
    }
}
