//! Preference flags with single-key toggling.

use crate::model::settings::{AppSettings, SettingKey};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsStore {
    settings: AppSettings,
}

impl SettingsStore {
    pub fn new(settings: AppSettings) -> Self {
        Self { settings }
    }

    /// Flips `key` and returns the new value. No other key changes.
    pub fn toggle(&mut self, key: SettingKey) -> bool {
        self.settings.toggle(key)
    }

    pub fn get(&self, key: SettingKey) -> bool {
        self.settings.get(key)
    }

    /// Whether the reminder evaluator may fire.
    pub fn notifications_enabled(&self) -> bool {
        self.settings.notifications
    }

    pub fn snapshot(&self) -> AppSettings {
        self.settings
    }
}
