//! Scripted manipulator for headless runs
//!
//! Stands in for a tracked XR hand: a list of keyframes, each held until the
//! next one starts. A keyframe can also press the lock toggle.

use devices::{ManipulatorSource, ManipulatorState, Pose};
use glam::{Quat, Vec2, Vec3};
use serde::Deserialize;

/// One step of the script, active from `at` seconds until the next keyframe
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Keyframe {
    pub at: f32,
    /// Hand position in world space
    #[serde(default)]
    pub position: [f32; 3],
    /// Hand yaw about +Y in degrees
    #[serde(default)]
    pub yaw_degrees: f32,
    #[serde(default = "default_tracked")]
    pub tracked: bool,
    #[serde(default)]
    pub press: bool,
    #[serde(default)]
    pub direction: [f32; 2],
    /// Press the lock toggle once when this keyframe starts
    #[serde(default)]
    pub toggle_lock: bool,
}

fn default_tracked() -> bool {
    true
}

impl Keyframe {
    pub fn new(at: f32, position: Vec3) -> Self {
        Self {
            at,
            position: position.to_array(),
            yaw_degrees: 0.0,
            tracked: true,
            press: false,
            direction: [0.0, 0.0],
            toggle_lock: false,
        }
    }

    pub fn pressing(mut self, direction: Vec2) -> Self {
        self.press = true;
        self.direction = direction.to_array();
        self
    }

    pub fn toggling_lock(mut self) -> Self {
        self.toggle_lock = true;
        self
    }

    fn state(&self) -> ManipulatorState {
        let pose = Pose::new(
            Vec3::from_array(self.position),
            Quat::from_rotation_y(self.yaw_degrees.to_radians()),
        );
        let mut state =
            ManipulatorState::tracked(pose, self.press, Vec2::from_array(self.direction));
        if !self.tracked {
            state.set_pose(None);
        }
        state
    }
}

/// Push from behind, let go, then lock and nudge
pub fn default_script() -> Vec<Keyframe> {
    let behind = Vec3::new(-1.0, 1.0, 0.0);
    vec![
        Keyframe::new(0.0, behind),
        Keyframe::new(0.5, behind).pressing(Vec2::X),
        Keyframe::new(2.0, behind),
        Keyframe::new(3.0, Vec3::new(2.0, 1.0, 0.0)).toggling_lock(),
        Keyframe::new(3.5, Vec3::new(2.0, 1.0, 0.0)).pressing(Vec2::new(0.0, 1.0)),
        Keyframe::new(4.5, Vec3::new(2.0, 1.0, 0.0)),
    ]
}

/// Replays keyframes as a [`ManipulatorSource`]
#[derive(Debug, Clone)]
pub struct ScriptedManipulator {
    keyframes: Vec<Keyframe>,
    // Index of the next keyframe to start
    next: usize,
    state: ManipulatorState,
}

impl ScriptedManipulator {
    /// Keyframes are sorted by start time
    pub fn new(mut keyframes: Vec<Keyframe>) -> Self {
        keyframes.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self {
            keyframes,
            next: 0,
            state: ManipulatorState::new(),
        }
    }

    /// Move the script to `time`, returning how many lock toggles fired
    pub fn advance(&mut self, time: f32) -> usize {
        let mut toggles = 0;
        while let Some(keyframe) = self.keyframes.get(self.next) {
            if keyframe.at > time {
                break;
            }
            self.state = keyframe.state();
            if keyframe.toggle_lock {
                toggles += 1;
            }
            tracing::debug!(at = keyframe.at, press = keyframe.press, "script keyframe");
            self.next += 1;
        }
        toggles
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.keyframes.len()
    }
}

impl ManipulatorSource for ScriptedManipulator {
    fn current_pose(&self) -> Option<Pose> {
        self.state.pose
    }

    fn press_signal(&self) -> bool {
        self.state.press
    }

    fn direction_signal(&self) -> Vec2 {
        self.state.direction()
    }
}
