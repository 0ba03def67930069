//! Manipulator source trait for platform-specific implementations
//!
//! This module defines the port through which the push controller samples
//! the user's hand: an XR runtime, a gamepad, a replay script, or nothing
//! at all.

use glam::Vec2;

use crate::pose::{ManipulatorState, Pose};

/// Trait for manipulator input sources (e.g., OpenXR hand, gilrs, scripted replay)
///
/// All readings are best-effort. A source that has lost tracking returns
/// `None` from [`current_pose`](Self::current_pose); a source with no
/// button or stick reports `false` / `Vec2::ZERO`.
///
/// # Example
///
/// ```ignore
/// let mut source = GamepadManipulator::new();
///
/// // In your frame loop:
/// source.poll();
/// source.set_pose(tracked_hand_pose);
/// controller.update(&source, body_position);
/// ```
pub trait ManipulatorSource {
    /// Poll the underlying device and update state
    ///
    /// Called once per frame before the signals are sampled. Sources that
    /// are pushed into by the host keep the default no-op.
    fn poll(&mut self) {}

    /// World pose of the manipulator, or `None` when tracking is unavailable
    fn current_pose(&self) -> Option<Pose>;

    /// Whether the push button is held
    fn press_signal(&self) -> bool;

    /// 2D analog direction, each axis in `[-1, 1]`
    fn direction_signal(&self) -> Vec2;

    /// Sample all three signals into a snapshot
    fn snapshot(&self) -> ManipulatorState {
        let mut state = ManipulatorState::new();
        state.set_pose(self.current_pose());
        state.set_press(self.press_signal());
        state.set_direction(self.direction_signal());
        state
    }
}

impl ManipulatorSource for ManipulatorState {
    fn current_pose(&self) -> Option<Pose> {
        self.pose
    }

    fn press_signal(&self) -> bool {
        self.press
    }

    fn direction_signal(&self) -> Vec2 {
        self.direction()
    }
}

impl<S: ManipulatorSource + ?Sized> ManipulatorSource for &S {
    fn current_pose(&self) -> Option<Pose> {
        (**self).current_pose()
    }

    fn press_signal(&self) -> bool {
        (**self).press_signal()
    }

    fn direction_signal(&self) -> Vec2 {
        (**self).direction_signal()
    }
}

/// A no-op source for platforms without tracked input
///
/// Never tracked, never pressed, stick centered. Lets hosts run the
/// controller headless without conditional compilation everywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSource;

impl NullSource {
    pub fn new() -> Self {
        Self
    }
}

impl ManipulatorSource for NullSource {
    fn current_pose(&self) -> Option<Pose> {
        None
    }

    fn press_signal(&self) -> bool {
        false
    }

    fn direction_signal(&self) -> Vec2 {
        Vec2::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_null_source() {
        let source = NullSource::new();

        assert!(source.current_pose().is_none());
        assert!(!source.press_signal());
        assert_eq!(source.direction_signal(), Vec2::ZERO);
        assert_eq!(source.snapshot(), ManipulatorState::default());
    }

    #[test]
    fn test_state_is_a_source() {
        let pose = Pose::from_position(Vec3::new(0.0, 1.0, 0.0));
        let state = ManipulatorState::tracked(pose, true, Vec2::new(0.0, 1.0));

        assert_eq!(state.current_pose(), Some(pose));
        assert!(state.press_signal());
        assert_eq!(state.direction_signal(), Vec2::Y);
        assert_eq!(state.snapshot(), state);
    }

    #[test]
    fn test_reference_forwards() {
        fn sample<S: ManipulatorSource>(source: S) -> (bool, Vec2) {
            (source.press_signal(), source.direction_signal())
        }

        let state = ManipulatorState::tracked(Pose::IDENTITY, true, Vec2::X);
        let by_ref: &dyn ManipulatorSource = &state;
        assert_eq!(sample(by_ref), (true, Vec2::X));
        assert_eq!(sample(&state), (true, Vec2::X));
    }
}
