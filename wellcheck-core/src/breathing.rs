use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Resting scale of the breathing circle.
pub const REST_SCALE: f32 = 0.75;
pub const FULL_SCALE: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreathPhase {
    #[default]
    Idle,
    Inspire,
    Hold,
    Expire,
}

impl BreathPhase {
    pub fn label(self) -> &'static str {
        match self {
            BreathPhase::Idle => "Ready to begin?",
            BreathPhase::Inspire => "Breathe in",
            BreathPhase::Hold => "Hold",
            BreathPhase::Expire => "Breathe out",
        }
    }

    /// The phase that follows this one in a running cycle.
    pub fn next(self) -> BreathPhase {
        match self {
            BreathPhase::Idle | BreathPhase::Expire => BreathPhase::Inspire,
            BreathPhase::Inspire => BreathPhase::Hold,
            BreathPhase::Hold => BreathPhase::Expire,
        }
    }
}

/// What the breathing view should show: the phase plus the scale the
/// circle animates towards and over how long.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseFrame {
    pub phase: BreathPhase,
    pub label: &'static str,
    pub target_scale: f32,
    pub transition_ms: u64,
}

/// 4-7-8 breathing by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathingSchedule {
    pub inspire_ms: u64,
    pub hold_ms: u64,
    pub expire_ms: u64,

    // Time for the circle to settle back after a stop.
    pub reset_ms: u64,
}

impl Default for BreathingSchedule {
    fn default() -> Self {
        Self {
            inspire_ms: 4_000,
            hold_ms: 7_000,
            expire_ms: 8_000,
            reset_ms: 500,
        }
    }
}

impl BreathingSchedule {
    pub fn phase_duration(&self, phase: BreathPhase) -> Duration {
        let ms = match phase {
            BreathPhase::Idle => 0,
            BreathPhase::Inspire => self.inspire_ms,
            BreathPhase::Hold => self.hold_ms,
            BreathPhase::Expire => self.expire_ms,
        };
        Duration::from_millis(ms)
    }

    pub fn cycle_duration(&self) -> Duration {
        Duration::from_millis(self.inspire_ms + self.hold_ms + self.expire_ms)
    }

    pub fn frame(&self, phase: BreathPhase) -> PhaseFrame {
        let (target_scale, transition_ms) = match phase {
            BreathPhase::Idle => (REST_SCALE, self.reset_ms),
            BreathPhase::Inspire => (FULL_SCALE, self.inspire_ms),
            BreathPhase::Hold => (FULL_SCALE, 0),
            BreathPhase::Expire => (REST_SCALE, self.expire_ms),
        };
        PhaseFrame {
            phase,
            label: phase.label(),
            target_scale,
            transition_ms,
        }
    }
}
