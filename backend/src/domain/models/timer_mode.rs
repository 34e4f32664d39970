use serde::{Deserialize, Serialize};

/// The category of a focus/break session.
///
/// `Idle` is the resting state between sessions and carries no duration
/// semantics; every other variant maps to a countdown length configured in
/// `TimerConfig`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimerMode {
    Work,
    ShortBreak,
    LongBreak,
    Custom,
    Idle,
}

impl TimerMode {
    /// Human-readable name for display surfaces
    pub fn display_name(&self) -> &'static str {
        match self {
            TimerMode::Work => "Work",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
            TimerMode::Custom => "Custom",
            TimerMode::Idle => "Idle",
        }
    }

    /// Convert to string for CSV storage
    pub fn to_string(&self) -> String {
        match self {
            TimerMode::Work => "work".to_string(),
            TimerMode::ShortBreak => "short_break".to_string(),
            TimerMode::LongBreak => "long_break".to_string(),
            TimerMode::Custom => "custom".to_string(),
            TimerMode::Idle => "idle".to_string(),
        }
    }

    /// Parse from string for CSV loading
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "work" => Ok(TimerMode::Work),
            "short_break" => Ok(TimerMode::ShortBreak),
            "long_break" => Ok(TimerMode::LongBreak),
            "custom" => Ok(TimerMode::Custom),
            "idle" => Ok(TimerMode::Idle),
            _ => Err(format!("Invalid timer mode: {}", s)),
        }
    }
}
