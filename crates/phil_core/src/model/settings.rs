//! User preference flags.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Persisted preference flags stored under the `phil_settings` blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// Gates the reminder evaluator.
    pub notifications: bool,
    pub dark_mode: bool,
    pub calendar_sync: bool,
    pub sound_effects: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            notifications: true,
            dark_mode: false,
            calendar_sync: true,
            sound_effects: true,
        }
    }
}

impl AppSettings {
    pub fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::Notifications => self.notifications,
            SettingKey::DarkMode => self.dark_mode,
            SettingKey::CalendarSync => self.calendar_sync,
            SettingKey::SoundEffects => self.sound_effects,
        }
    }

    /// Flips exactly one flag and returns its new value.
    pub fn toggle(&mut self, key: SettingKey) -> bool {
        let slot = match key {
            SettingKey::Notifications => &mut self.notifications,
            SettingKey::DarkMode => &mut self.dark_mode,
            SettingKey::CalendarSync => &mut self.calendar_sync,
            SettingKey::SoundEffects => &mut self.sound_effects,
        };
        *slot = !*slot;
        *slot
    }
}

/// Closed set of toggleable preference keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    Notifications,
    DarkMode,
    CalendarSync,
    SoundEffects,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        Self::Notifications,
        Self::DarkMode,
        Self::CalendarSync,
        Self::SoundEffects,
    ];

    /// Blob field name of this key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Notifications => "notifications",
            Self::DarkMode => "darkMode",
            Self::CalendarSync => "calendarSync",
            Self::SoundEffects => "soundEffects",
        }
    }
}

impl FromStr for SettingKey {
    type Err = UnknownSettingKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| UnknownSettingKey(normalized.to_string()))
    }
}

/// Returned when text does not name one of the known setting keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSettingKey(pub String);

impl Display for UnknownSettingKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown setting key: `{}`", self.0)
    }
}

impl Error for UnknownSettingKey {}
