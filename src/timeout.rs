// Copyright 2019-2021 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use std::time::Duration;
use tokio::time::Instant;

/// Describes the timeout of a toast
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Timeout {
    /// Expires after the manager's configured duration.
    ///
    /// Whether it expires at all still follows the `auto-close` setting.
    #[default]
    Default,

    /// Do not expire, user will have to close this manually.
    Never,

    /// Expire after n milliseconds.
    Milliseconds(u32),
}

impl Timeout {
    /// Resolves the timeout against the configured duration and auto close flag.
    ///
    /// Returns the countdown length and whether the toast closes on its own.
    pub(crate) fn resolve(self, configured: Duration, auto_close: bool) -> (Duration, bool) {
        match self {
            Timeout::Default => (configured, auto_close),
            Timeout::Never => (configured, false),
            Timeout::Milliseconds(ms) => (Duration::from_millis(ms.into()), true),
        }
    }
}

/// Pause aware auto-close bookkeeping.
///
/// `started_at` is the instant of the last (re)start and `remaining` the
/// countdown length from that instant. Pausing folds the elapsed time into
/// `remaining`, resuming only moves `started_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Countdown {
    started_at: Instant,
    remaining: Duration,
    paused: bool,
}

impl Countdown {
    pub(crate) fn start(now: Instant, duration: Duration) -> Self {
        Self {
            started_at: now,
            remaining: duration,
            paused: false,
        }
    }

    /// Freezes the countdown and returns the time left.
    ///
    /// Pausing twice does not subtract the elapsed time twice.
    pub(crate) fn pause(&mut self, now: Instant) -> Duration {
        if !self.paused {
            let elapsed = now.saturating_duration_since(self.started_at);
            self.remaining = self.remaining.saturating_sub(elapsed);
            self.paused = true;
        }
        self.remaining
    }

    /// Restarts the countdown from `now` with whatever was left at pause time.
    pub(crate) fn resume(&mut self, now: Instant) -> Duration {
        if self.paused {
            self.started_at = now;
            self.paused = false;
        }
        self.remaining
    }

    /// Time left as of `now`.
    pub(crate) fn remaining_at(&self, now: Instant) -> Duration {
        if self.paused {
            self.remaining
        } else {
            self.remaining
                .saturating_sub(now.saturating_duration_since(self.started_at))
        }
    }

    pub(crate) fn started_at(&self) -> Instant {
        self.started_at
    }

    pub(crate) fn is_paused(&self) -> bool {
        self.paused
    }
}
