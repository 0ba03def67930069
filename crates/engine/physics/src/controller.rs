use devices::{ManipulatorSource, Pose};
use glam::{Vec2, Vec3};

use crate::config::PushConfig;
use crate::engagement::{Engagement, LockMode, Thresholds, DIRECTION_DEADZONE_SQR};
use crate::error::Result;
use crate::label::LockLabel;
use crate::sink::ForceSink;

/// Squared speed below which the body counts as at rest
pub const REST_SPEED_SQR: f32 = 1e-4;

/// What kinetic friction did during a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrictionRegime {
    /// Body was moving; this deceleration was applied against its velocity
    Sliding { deceleration: Vec3 },
    /// Body was (nearly) still; velocity was snapped to zero
    Snapped,
}

/// What the push stage did during a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PushOutcome {
    /// Not pushing
    NotEngaged,
    /// Pushing, but the stick was centered at step time
    NoDirection,
    /// Body at rest and the push force does not exceed static friction
    HeldByStaticFriction,
    /// This acceleration was applied
    Applied(Vec3),
}

/// Summary of one fixed step, in application order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub friction: FrictionRegime,
    /// Lock-mode containment force, when applied
    pub damping: Option<Vec3>,
    pub push: PushOutcome,
}

/// Push controller for a single dynamic body
///
/// Two entry points run at different cadences:
/// - [`update`](Self::update) once per rendered frame: samples the
///   manipulator and advances the engagement state machine.
/// - [`fixed_step`](Self::fixed_step) once per physics tick: simulates
///   surface friction, lock containment and the push itself.
///
/// Both must run on the same thread so every physics tick sees the latest
/// frame's engagement.
#[derive(Debug, Clone)]
pub struct PushController {
    config: PushConfig,
    lock: LockMode,
    engagement: Engagement,
    thresholds: Thresholds,
    // Last tracked pose; kept when tracking drops out
    manipulator: Pose,
}

impl PushController {
    /// Create a controller in `Idle`, unlocked
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration)
    /// if `config` fails [`PushConfig::validate`].
    pub fn new(config: PushConfig) -> Result<Self> {
        config.validate()?;

        let lock = LockMode::default();
        Ok(Self {
            config,
            lock,
            engagement: Engagement::Idle,
            thresholds: Thresholds::for_mode(lock, config.max_distance, config.lock_radius),
            manipulator: Pose::IDENTITY,
        })
    }

    /// Create a controller and show its initial lock state on `label`
    pub fn with_label(config: PushConfig, label: &mut impl LockLabel) -> Result<Self> {
        let controller = Self::new(config)?;
        label.show(controller.lock.label_text());
        Ok(controller)
    }

    pub fn config(&self) -> &PushConfig {
        &self.config
    }

    pub fn lock_mode(&self) -> LockMode {
        self.lock
    }

    pub fn engagement(&self) -> Engagement {
        self.engagement
    }

    pub fn is_pushing(&self) -> bool {
        self.engagement.is_pushing()
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Last known manipulator pose
    pub fn manipulator_pose(&self) -> Pose {
        self.manipulator
    }

    // Sole writer of `lock`; keeps thresholds in step with it
    fn set_lock(&mut self, lock: LockMode) {
        self.lock = lock;
        self.thresholds =
            Thresholds::for_mode(lock, self.config.max_distance, self.config.lock_radius);
    }

    /// Flip lock-to-box mode and refresh `label`
    ///
    /// Returns the new mode.
    pub fn toggle_lock_mode(&mut self, label: &mut impl LockLabel) -> LockMode {
        self.set_lock(self.lock.toggled());
        label.show(self.lock.label_text());
        tracing::debug!(lock = self.lock.as_str(), "lock mode toggled");
        self.lock
    }

    /// Drop back to `Idle`; lock mode is kept
    pub fn reset(&mut self) {
        self.engagement = Engagement::Idle;
        self.set_lock(self.lock);
    }

    /// Advance the engagement state machine from one frame of input
    pub fn update_engagement(
        &mut self,
        pose: Option<Pose>,
        press: bool,
        direction: Vec2,
        body_position: Vec3,
    ) -> Engagement {
        if let Some(pose) = pose {
            self.manipulator = pose;
        }

        let distance_sqr = (body_position - self.manipulator.position).length_squared();
        let next = self.engagement.next(
            press,
            direction.length_squared(),
            distance_sqr,
            self.thresholds,
            self.lock,
        );

        if next != self.engagement {
            tracing::debug!(
                from = ?self.engagement,
                to = ?next,
                distance = distance_sqr.sqrt(),
                lock = self.lock.as_str(),
                "push engagement changed"
            );
            self.engagement = next;
        }
        self.engagement
    }

    /// Per-frame update from a manipulator source
    pub fn update<S: ManipulatorSource + ?Sized>(
        &mut self,
        source: &S,
        body_position: Vec3,
    ) -> Engagement {
        self.update_engagement(
            source.current_pose(),
            source.press_signal(),
            source.direction_signal(),
            body_position,
        )
    }

    /// Apply one physics step's worth of friction, containment and push
    ///
    /// `direction` is the stick as sampled now, which may differ from the
    /// frame that set the engagement state.
    pub fn apply_forces<F: ForceSink + ?Sized>(
        &mut self,
        sink: &mut F,
        direction: Vec2,
        pose: Option<Pose>,
    ) -> StepReport {
        if let Some(pose) = pose {
            self.manipulator = pose;
        }

        // 1. kinetic friction every step
        let velocity = sink.current_velocity();
        let friction = if velocity.length_squared() > REST_SPEED_SQR {
            let deceleration = -velocity.normalize() * self.config.kinetic_deceleration();
            sink.apply_acceleration(deceleration);
            FrictionRegime::Sliding { deceleration }
        } else {
            sink.set_velocity(Vec3::ZERO);
            FrictionRegime::Snapped
        };

        // 2. containment drag for an unpushed locked body
        let damping = if self.lock.is_locked() && !self.engagement.is_pushing() {
            let force = -velocity * self.config.runaway_damping;
            sink.apply_force(force);
            Some(force)
        } else {
            None
        };

        // 3. push
        let push = self.push(sink, direction);

        let report = StepReport {
            friction,
            damping,
            push,
        };
        tracing::trace!(?report, "push step");
        report
    }

    fn push<F: ForceSink + ?Sized>(&self, sink: &mut F, direction: Vec2) -> PushOutcome {
        if !self.engagement.is_pushing() {
            return PushOutcome::NotEngaged;
        }
        if direction.length_squared() < DIRECTION_DEADZONE_SQR {
            return PushOutcome::NoDirection;
        }

        let local = Vec3::new(direction.x, 0.0, direction.y).normalize_or_zero();
        let world = self.manipulator.transform_direction(local);

        if sink.current_velocity().length_squared() < REST_SPEED_SQR
            && self.config.push_force <= self.config.static_friction_limit()
        {
            return PushOutcome::HeldByStaticFriction;
        }

        let acceleration = world * self.config.push_acceleration();
        sink.apply_acceleration(acceleration);
        PushOutcome::Applied(acceleration)
    }

    /// Per-physics-tick update from a manipulator source
    pub fn fixed_step<F, S>(&mut self, sink: &mut F, source: &S) -> StepReport
    where
        F: ForceSink + ?Sized,
        S: ManipulatorSource + ?Sized,
    {
        self.apply_forces(sink, source.direction_signal(), source.current_pose())
    }
}
