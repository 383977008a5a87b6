//! Transient success and error notices.
//!
//! Notices expire [`NOTICE_TIMEOUT`] after they are raised. Time comes from
//! `tokio::time`, so paused-clock tests can step through expiry.

use std::time::Duration;

use tokio::time::Instant;

/// How long a notice stays visible.
pub const NOTICE_TIMEOUT: Duration = Duration::from_millis(3000);

/// Whether a notice reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Completed action.
    Success,
    /// Failed action.
    Error,
}

/// A single message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Success or error.
    pub kind: NoticeKind,
    /// Text shown to the user.
    pub message: String,
    expires_at: Instant,
}

impl Notice {
    /// Whether the notice should no longer be shown at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Notices raised by a view, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Notices {
    items: Vec<Notice>,
}

impl Notices {
    /// Empty notice list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Raise a success notice.
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeKind::Success, message.into());
    }

    /// Raise an error notice.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeKind::Error, message.into());
    }

    fn push(&mut self, kind: NoticeKind, message: String) {
        self.items.push(Notice {
            kind,
            message,
            expires_at: Instant::now() + NOTICE_TIMEOUT,
        });
    }

    /// Notices still visible, after dropping expired ones.
    pub fn active(&mut self) -> &[Notice] {
        let now = Instant::now();
        self.items.retain(|notice| !notice.is_expired(now));
        &self.items
    }

    /// Remove and return every notice, expired or not.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.items)
    }

    /// Most recent notice, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&Notice> {
        self.items.last()
    }
}
