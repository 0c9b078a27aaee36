use std::time::Duration;

use foundation::time::Time;
use runtime::timers::{TimerId, TimerQueue};
use serde::{Deserialize, Serialize};

/// Identifies one `show` call. Expiry is keyed to the token, never to a shared
/// "visible" flag, so a stale timer cannot clear a newer message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationToken(u64);

impl NotificationToken {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Returned by [`NotificationTimer::show`] so an external clock can arm its own timer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Shown {
    pub token: NotificationToken,
    pub expires_at: Time,
}

#[derive(Debug)]
struct Active {
    token: NotificationToken,
    message: String,
    timer: TimerId,
}

/// Single-slot transient message with automatic expiry.
///
/// Expiry can be driven two ways:
/// - [`advance`](Self::advance) with a deterministic clock, or
/// - [`expire`](Self::expire) from an external timer holding the token.
#[derive(Debug)]
pub struct NotificationTimer {
    ttl: Duration,
    next_token: u64,
    active: Option<Active>,
    timers: TimerQueue<NotificationToken>,
}

impl NotificationTimer {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            next_token: 0,
            active: None,
            timers: TimerQueue::new(),
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.message.as_str())
    }

    pub fn token(&self) -> Option<NotificationToken> {
        self.active.as_ref().map(|a| a.token)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn next_deadline(&self) -> Option<Time> {
        self.timers.next_deadline()
    }

    /// Replaces any visible message and schedules its clearing at `now + ttl`.
    pub fn show(&mut self, message: impl Into<String>, now: Time) -> Shown {
        if let Some(previous) = self.active.take() {
            self.timers.cancel(previous.timer);
        }

        let token = NotificationToken(self.next_token);
        self.next_token += 1;
        let expires_at = now.after(self.ttl);
        let timer = self.timers.schedule(expires_at, token);
        self.active = Some(Active {
            token,
            message: message.into(),
            timer,
        });

        Shown { token, expires_at }
    }

    /// Clears the message if `token` is still the current one.
    pub fn expire(&mut self, token: NotificationToken) -> bool {
        match &self.active {
            Some(active) if active.token == token => {
                self.timers.cancel(active.timer);
                self.active = None;
                true
            }
            _ => false,
        }
    }

    /// Fires every timer due at `now`. Returns `true` if the message was cleared.
    pub fn advance(&mut self, now: Time) -> bool {
        let mut cleared = false;
        for (_id, token) in self.timers.pop_due(now) {
            if self.token() == Some(token) {
                self.active = None;
                cleared = true;
            }
        }
        cleared
    }
}

impl Default for NotificationTimer {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_NOTIFICATION_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::NotificationTimer;
    use foundation::time::Time;

    #[test]
    fn message_clears_after_ttl() {
        let mut n = NotificationTimer::default();
        let shown = n.show("Dragging Mode", Time::ZERO);
        assert_eq!(shown.expires_at, Time(3.0));

        assert!(!n.advance(Time(2.999)));
        assert_eq!(n.message(), Some("Dragging Mode"));

        assert!(n.advance(Time(3.0)));
        assert_eq!(n.message(), None);
    }

    #[test]
    fn overlapping_show_keeps_newer_message_until_its_own_deadline() {
        let mut n = NotificationTimer::default();
        n.show("Dragging Mode", Time(0.0));
        n.show("Placing Mode", Time(1.0));

        assert!(!n.advance(Time(3.0)));
        assert_eq!(n.message(), Some("Placing Mode"));

        assert!(!n.advance(Time(3.9)));
        assert!(n.advance(Time(4.0)));
        assert!(!n.is_active());
    }

    #[test]
    fn message_clears_exactly_ttl_after_any_show_time() {
        let mut n = NotificationTimer::default();
        for ms in 0..100_000u64 {
            n.show("x", Time::from_millis(ms));
            assert!(!n.advance(Time::from_millis(ms + 2999)), "shown at {ms} ms");
            assert!(n.advance(Time::from_millis(ms + 3000)), "shown at {ms} ms");
            assert_eq!(n.message(), None);
        }
    }

    #[test]
    fn stale_token_cannot_clear_newer_message() {
        let mut n = NotificationTimer::default();
        let first = n.show("Dragging Mode", Time(0.0));
        let second = n.show("Placing Mode", Time(1.0));

        assert!(!n.expire(first.token));
        assert_eq!(n.message(), Some("Placing Mode"));

        assert!(n.expire(second.token));
        assert!(!n.expire(second.token));
        assert_eq!(n.next_deadline(), None);
    }

    #[test]
    fn tokens_are_unique_per_show() {
        let mut n = NotificationTimer::default();
        let a = n.show("a", Time::ZERO).token;
        let b = n.show("a", Time::ZERO).token;
        assert_ne!(a, b);
        assert_eq!(n.token(), Some(b));
    }
}
