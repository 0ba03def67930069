//! Push engagement state machine and its range thresholds
//!
//! Engagement uses squared-distance hysteresis: the hand has to come within
//! half the active range to start pushing, and only leaves the pushing state
//! once it is beyond the full range (or the button is released).

use serde::{Deserialize, Serialize};

/// Fraction of the active range inside which a push can start
pub const START_RADIUS_FRACTION: f32 = 0.5;

/// Squared stick magnitude below which the direction counts as centered
pub const DIRECTION_DEADZONE_SQR: f32 = 0.01;

/// Lock-to-box mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LockMode {
    #[default]
    Unlocked,
    Locked,
}

impl LockMode {
    pub fn is_locked(self) -> bool {
        self == LockMode::Locked
    }

    pub fn toggled(self) -> Self {
        match self {
            LockMode::Unlocked => LockMode::Locked,
            LockMode::Locked => LockMode::Unlocked,
        }
    }

    /// Bare on/off value
    pub fn as_str(self) -> &'static str {
        match self {
            LockMode::Unlocked => "OFF",
            LockMode::Locked => "ON",
        }
    }

    /// Text for the lock-state label
    pub fn label_text(self) -> &'static str {
        match self {
            LockMode::Unlocked => "LOCK OFF",
            LockMode::Locked => "LOCK ON",
        }
    }
}

impl From<bool> for LockMode {
    fn from(locked: bool) -> Self {
        if locked {
            LockMode::Locked
        } else {
            LockMode::Unlocked
        }
    }
}

/// Squared engage/disengage distances for the active lock mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Push may start when distance² is below this
    pub start_sqr: f32,
    /// Push stops (unlocked only) when distance² is above this
    pub stop_sqr: f32,
}

impl Thresholds {
    /// Thresholds for a given active range
    pub fn from_range(active_max: f32) -> Self {
        let start = active_max * START_RADIUS_FRACTION;
        Self {
            start_sqr: start * start,
            stop_sqr: active_max * active_max,
        }
    }

    /// Thresholds for a lock mode: `lock_radius` when locked, `max_distance` otherwise
    pub fn for_mode(lock: LockMode, max_distance: f32, lock_radius: f32) -> Self {
        let active_max = if lock.is_locked() {
            lock_radius
        } else {
            max_distance
        };
        Self::from_range(active_max)
    }
}

/// Whether the user is currently pushing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Engagement {
    #[default]
    Idle,
    Pushing,
}

impl Engagement {
    pub fn is_pushing(self) -> bool {
        self == Engagement::Pushing
    }

    /// Hysteresis transition
    ///
    /// * `Idle -> Pushing` when pressed, the stick is deflected and the body
    ///   is inside the start range.
    /// * `Pushing -> Idle` when released, or when unlocked and the body is
    ///   outside the stop range. Distance never ends a locked push.
    pub fn next(
        self,
        press: bool,
        direction_sqr: f32,
        distance_sqr: f32,
        thresholds: Thresholds,
        lock: LockMode,
    ) -> Self {
        match self {
            Engagement::Idle => {
                if press
                    && direction_sqr > DIRECTION_DEADZONE_SQR
                    && distance_sqr < thresholds.start_sqr
                {
                    Engagement::Pushing
                } else {
                    Engagement::Idle
                }
            }
            Engagement::Pushing => {
                if !press || (!lock.is_locked() && distance_sqr > thresholds.stop_sqr) {
                    Engagement::Idle
                } else {
                    Engagement::Pushing
                }
            }
        }
    }
}
