//! gilrs-backed manipulator for desktop controllers

use gilrs::{Axis, Button, Event, EventType, Gilrs};
use glam::Vec2;

use crate::backend::ManipulatorSource;
use crate::gamepad::GamepadManipulator;
use crate::pose::Pose;

/// Reads the first gamepad gilrs reports into a [`GamepadManipulator`]
pub struct GilrsManipulator {
    gilrs: Gilrs,
    inner: GamepadManipulator,
}

impl GilrsManipulator {
    pub fn new() -> Result<Self, gilrs::Error> {
        let gilrs = Gilrs::new()?;
        let mut inner = GamepadManipulator::new();
        if gilrs.gamepads().next().is_some() {
            inner.connect();
        }
        Ok(Self { gilrs, inner })
    }

    pub fn set_pose(&mut self, pose: Option<Pose>) {
        self.inner.set_pose(pose);
    }
}

impl ManipulatorSource for GilrsManipulator {
    /// Drain pending gilrs events
    fn poll(&mut self) {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            let pad = &mut self.inner.gamepad;
            match event {
                EventType::Connected => {
                    tracing::info!(gamepad = %id, "gamepad connected");
                    pad.connected = true;
                }
                EventType::Disconnected => {
                    tracing::info!(gamepad = %id, "gamepad disconnected");
                    pad.connected = false;
                    pad.reset();
                }
                EventType::AxisChanged(Axis::LeftStickX, value, _) => pad.set_stick_x(value),
                EventType::AxisChanged(Axis::LeftStickY, value, _) => pad.set_stick_y(value),
                EventType::ButtonChanged(Button::RightTrigger2, value, _) => {
                    pad.set_trigger(value)
                }
                EventType::ButtonPressed(Button::South, _) => pad.set_primary_button(true),
                EventType::ButtonReleased(Button::South, _) => pad.set_primary_button(false),
                _ => {}
            }
        }
    }

    fn current_pose(&self) -> Option<Pose> {
        self.inner.current_pose()
    }

    fn press_signal(&self) -> bool {
        self.inner.press_signal()
    }

    fn direction_signal(&self) -> Vec2 {
        self.inner.direction_signal()
    }
}
