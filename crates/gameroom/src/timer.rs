use cardroom_core::DECISION_TIMEOUT;
use std::time::Duration;
use tokio::time::Instant;

/// Per-room timeout settings.
#[derive(Debug, Clone, Copy)]
pub struct TimerConfig {
    pub decision: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            decision: Duration::from_secs(DECISION_TIMEOUT),
        }
    }
}

/// Tracks the deadline for the decision currently pending, if any.
///
/// The room re-arms the timer every time the turn passes and clears it
/// whenever no seat is on the clock, so `deadline()` doubles as the
/// room's "is anyone thinking" flag.
#[derive(Debug)]
pub struct Timer {
    config: TimerConfig,
    deadline: Option<Instant>,
}

impl Timer {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            deadline: None,
        }
    }
    pub fn arm(&mut self) {
        self.deadline = Some(Instant::now() + self.config.decision);
    }
    pub fn clear(&mut self) {
        self.deadline = None;
    }
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
    pub fn expired(&self) -> bool {
        self.deadline.map(|d| Instant::now() >= d).unwrap_or(false)
    }
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}
