//! # Session State Machine
//!
//! The in-memory machine behind one active focus/break countdown.
//!
//! A `Session` is transient: it is created when the user picks a goal to
//! work against and thrown away afterwards. It never persists anything
//! itself. When a run ends, `end_session` hands back a [`SessionSummary`]
//! and the caller decides whether to turn that into a durable time log
//! (see `GoalService::record_session`).
//!
//! ## Transition Rules
//!
//! - `set_timer` wins from any state and reconfigures mode and duration
//! - `start` only moves `Configured`, `Paused`, and `Completed` sessions
//!   into `Running`; calling it while already running, or while the mode
//!   is `Idle`, does nothing
//! - `tick` fires once per elapsed second while `Running`; at zero the
//!   machine parks itself in `Completed` and what happens next (switch to
//!   a break, record history) is the caller's decision
//! - no transition returns an error: invalid and redundant calls are
//!   no-ops

use chrono::{DateTime, Utc};

use crate::display::{format_mmss, TimerDisplay};
use crate::domain::models::timer_mode::TimerMode;

/// Smallest accepted custom duration, in seconds.
pub const MIN_CUSTOM_DURATION: u32 = 60;
/// Largest accepted custom duration, in seconds.
pub const MAX_CUSTOM_DURATION: u32 = 5400;
/// Custom durations are picked in whole-minute steps.
pub const CUSTOM_DURATION_STEP: u32 = 60;

#[derive(Debug, thiserror::Error)]
pub enum TimerConfigError {
    #[error("Custom duration must be between 60 and 5400 seconds in 60 second steps")]
    CustomDurationOutOfRange,
}

/// Per-mode countdown lengths, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    pub work_duration: u32,
    pub short_break_duration: u32,
    pub long_break_duration: u32,
    custom_duration: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_duration: 25 * 60,
            short_break_duration: 5 * 60,
            long_break_duration: 15 * 60,
            custom_duration: 10 * 60,
        }
    }
}

impl TimerConfig {
    pub fn custom_duration(&self) -> u32 {
        self.custom_duration
    }

    /// Set the user-chosen custom duration, validating range and step.
    pub fn set_custom_duration(&mut self, secs: u32) -> Result<(), TimerConfigError> {
        if !(MIN_CUSTOM_DURATION..=MAX_CUSTOM_DURATION).contains(&secs)
            || secs % CUSTOM_DURATION_STEP != 0
        {
            return Err(TimerConfigError::CustomDurationOutOfRange);
        }
        self.custom_duration = secs;
        Ok(())
    }

    /// The configured full countdown for a mode. `Idle` has none.
    pub fn duration_for(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Work => self.work_duration,
            TimerMode::ShortBreak => self.short_break_duration,
            TimerMode::LongBreak => self.long_break_duration,
            TimerMode::Custom => self.custom_duration,
            TimerMode::Idle => 0,
        }
    }
}

/// Where a session currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No timer configured; nothing can run until `set_timer`.
    Idle,
    /// A mode and duration are chosen but the countdown has not started.
    Configured { mode: TimerMode, total: u32 },
    /// Counting down, one tick per second.
    Running { mode: TimerMode, remaining: u32 },
    /// Countdown suspended, remaining time held.
    Paused { mode: TimerMode, remaining: u32 },
    /// The countdown reached zero on its own.
    Completed { mode: TimerMode },
}

/// What a finished run looked like, handed to the caller by `end_session`.
///
/// `duration` counts ticked seconds, not the wall-clock window, so a
/// session that spent time paused reports only the time it actually ran.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSummary {
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration: u32,
    pub mode: TimerMode,
}

/// One active countdown against a chosen goal.
pub struct Session {
    state: SessionState,
    config: TimerConfig,
    started_at: Option<DateTime<Utc>>,
    elapsed: u32,
    display: Option<Box<dyn TimerDisplay>>,
}

impl Session {
    /// Create a session ready to run a work countdown, mirroring the
    /// default mode a user lands on.
    pub fn new(config: TimerConfig) -> Self {
        let work_duration = config.work_duration;
        let mut session = Self {
            state: SessionState::Idle,
            config,
            started_at: None,
            elapsed: 0,
            display: None,
        };
        session.set_timer(work_duration, TimerMode::Work);
        session
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, SessionState::Running { .. })
    }

    /// The mode the session is in; the `Idle` state reads as `TimerMode::Idle`.
    pub fn mode(&self) -> TimerMode {
        match self.state {
            SessionState::Idle => TimerMode::Idle,
            SessionState::Configured { mode, .. }
            | SessionState::Running { mode, .. }
            | SessionState::Paused { mode, .. }
            | SessionState::Completed { mode } => mode,
        }
    }

    /// Seconds left on the countdown, zero when idle or completed.
    pub fn remaining(&self) -> u32 {
        match self.state {
            SessionState::Configured { total, .. } => total,
            SessionState::Running { remaining, .. } | SessionState::Paused { remaining, .. } => {
                remaining
            }
            SessionState::Idle | SessionState::Completed { .. } => 0,
        }
    }

    /// Ticked seconds since the timer was last configured.
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut TimerConfig {
        &mut self.config
    }

    /// Attach a display sink; it immediately receives the current time.
    pub fn attach_display(&mut self, display: Box<dyn TimerDisplay>) {
        self.display = Some(display);
        let remaining = self.remaining();
        self.push_display(remaining);
    }

    /// Configure mode and duration. Wins from any state and cancels an
    /// in-flight countdown without recording history.
    pub fn set_timer(&mut self, duration: u32, mode: TimerMode) {
        self.state = SessionState::Configured {
            mode,
            total: duration,
        };
        self.started_at = None;
        self.elapsed = 0;
        self.push_display(duration);
    }

    /// Begin or resume the countdown.
    ///
    /// No-op while already running and no-op for `Idle` (idle sessions
    /// cannot run). A zero remaining time is refilled from the mode's
    /// configured duration before running; restarting a completed session
    /// starts a full fresh countdown.
    pub fn start(&mut self) {
        let (mode, remaining) = match self.state {
            SessionState::Running { .. } | SessionState::Idle => return,
            SessionState::Configured {
                mode: TimerMode::Idle,
                ..
            } => return,
            SessionState::Configured { mode, total } => {
                let remaining = if total == 0 {
                    self.config.duration_for(mode)
                } else {
                    total
                };
                (mode, remaining)
            }
            SessionState::Paused { mode, remaining } => {
                let remaining = if remaining == 0 {
                    self.config.duration_for(mode)
                } else {
                    remaining
                };
                (mode, remaining)
            }
            SessionState::Completed { mode } => (mode, self.config.duration_for(mode)),
        };
        self.started_at = Some(Utc::now());
        self.state = SessionState::Running { mode, remaining };
        self.push_display(remaining);
    }

    /// Advance the countdown by one second of wall-clock time.
    ///
    /// Only meaningful while `Running`; at zero the session parks itself
    /// in `Completed` and stops consuming ticks.
    pub fn tick(&mut self) {
        if let SessionState::Running { mode, remaining } = self.state {
            let remaining = remaining.saturating_sub(1);
            self.elapsed += 1;
            self.push_display(remaining);
            self.state = if remaining == 0 {
                SessionState::Completed { mode }
            } else {
                SessionState::Running { mode, remaining }
            };
        }
    }

    /// Suspend a running countdown, holding the remaining time.
    pub fn pause(&mut self) {
        if let SessionState::Running { mode, remaining } = self.state {
            self.state = SessionState::Paused { mode, remaining };
        }
    }

    /// Put the session back at the current mode's full duration.
    pub fn reset(&mut self) {
        let mode = self.mode();
        let total = self.config.duration_for(mode);
        self.state = SessionState::Configured { mode, total };
        self.started_at = None;
        self.elapsed = 0;
        self.push_display(total);
    }

    /// Finish the session and drop to `Idle`.
    ///
    /// Returns a summary of the run if one was ever started, with
    /// `duration` equal to the ticked seconds. Persisting it against a
    /// goal is the caller's job; the machine itself never writes history.
    pub fn end_session(&mut self) -> Option<SessionSummary> {
        let mode = self.mode();
        let summary = self.started_at.take().map(|started_at| SessionSummary {
            started_at,
            ended_at: Utc::now(),
            duration: self.elapsed,
            mode,
        });
        self.state = SessionState::Idle;
        self.elapsed = 0;
        self.push_display(0);
        summary
    }

    fn push_display(&mut self, secs: u32) {
        if let Some(display) = self.display.as_mut() {
            display.show(&format_mmss(secs));
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}
