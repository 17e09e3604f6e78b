//! Newest-first notification log.
//!
//! # Invariants
//! - Index 0 is always the most recent event.
//! - No cap and no message dedup; the feed lives as long as its session.
//! - Welcome seeding is keyed on "currently empty", not on "first login".

use crate::model::notification::NotificationEvent;
use chrono::NaiveDateTime;
use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct NotificationFeed {
    events: VecDeque<NotificationEvent>,
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `event` at the front.
    pub fn push(&mut self, event: NotificationEvent) {
        self.events.push_front(event);
    }

    /// Pushes one welcome event naming `user_name` when the feed is empty.
    ///
    /// Returns whether an event was added.
    pub fn seed_welcome_if_empty(&mut self, user_name: &str, now: NaiveDateTime) -> bool {
        if !self.events.is_empty() {
            return false;
        }
        self.push(NotificationEvent::new(welcome_message(user_name), now));
        true
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &NotificationEvent> {
        self.events.iter()
    }

    pub fn latest(&self) -> Option<&NotificationEvent> {
        self.events.front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

pub fn welcome_message(user_name: &str) -> String {
    format!("Welcome to Phil Reminder, {user_name}! Your reminders are ready.")
}

#[cfg(test)]
mod tests {
    use super::NotificationFeed;
    use crate::model::notification::NotificationEvent;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn push_keeps_newest_first() {
        let mut feed = NotificationFeed::new();
        feed.push(NotificationEvent::new("first", at(8, 0)));
        feed.push(NotificationEvent::new("second", at(8, 1)));

        let messages: Vec<&str> = feed.iter().map(|event| event.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "first"]);
    }

    #[test]
    fn welcome_seed_only_fires_on_empty_feed() {
        let mut feed = NotificationFeed::new();
        assert!(feed.seed_welcome_if_empty("Zevanya", at(8, 0)));
        assert!(!feed.seed_welcome_if_empty("Zevanya", at(8, 1)));
        assert_eq!(feed.len(), 1);

        feed.clear();
        assert!(feed.seed_welcome_if_empty("Zevanya", at(8, 2)));
        assert_eq!(feed.len(), 1);
    }
}
