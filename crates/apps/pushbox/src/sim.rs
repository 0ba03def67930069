//! Frame loop with a fixed-timestep physics accumulator

use devices::ManipulatorSource;
use glam::Vec3;
use pushbox_physics::{
    BoxBody, LockLabel, LockMode, PhysicsWorld, PushController, PushOutcome, StepReport,
};

use crate::config::PushboxConfig;
use crate::script::{default_script, ScriptedManipulator};

/// Lock label that reports through tracing and remembers its text
#[derive(Debug, Clone, Default)]
pub struct TracingLabel {
    text: String,
}

impl TracingLabel {
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl LockLabel for TracingLabel {
    fn show(&mut self, text: &str) {
        tracing::info!(label = text, "lock label");
        self.text.clear();
        self.text.push_str(text);
    }
}

/// Counters gathered over a run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub physics_steps: u64,
    pub pushes_applied: u64,
    pub pushes_held: u64,
    pub final_position: Vec3,
    pub final_velocity: Vec3,
    pub lock: LockMode,
}

/// A box on a floor, a push controller and a scripted hand
pub struct Simulation {
    world: PhysicsWorld,
    body: BoxBody,
    controller: PushController,
    hand: ScriptedManipulator,
    // Live device; when set it replaces the script's pose and signals
    live: Option<Box<dyn ManipulatorSource>>,
    label: TracingLabel,
    physics_accumulator: f32,
    time: f32,
    summary: RunSummary,
}

impl Simulation {
    pub fn new(config: &PushboxConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let push = config.push;
        let sim = &config.simulation;

        let mut world = PhysicsWorld::new(Vec3::new(0.0, -push.gravity, 0.0), sim.timestep);
        world.add_floor(0.0, sim.floor_half_extent);
        let half = sim.box_half_extent;
        let start = Vec3::new(0.0, half, 0.0);
        let body = BoxBody::new(&mut world, start, Vec3::splat(half), push.box_mass);

        let mut label = TracingLabel::default();
        let controller = PushController::with_label(push, &mut label)?;

        let script = if config.script.is_empty() {
            default_script()
        } else {
            config.script.clone()
        };

        Ok(Self {
            world,
            body,
            controller,
            hand: ScriptedManipulator::new(script),
            live: None,
            label,
            physics_accumulator: 0.0,
            time: 0.0,
            summary: RunSummary::default(),
        })
    }

    /// Drive the hand from a live device instead of the script
    ///
    /// Script lock toggles still fire.
    pub fn with_live_source(mut self, source: Box<dyn ManipulatorSource>) -> Self {
        self.live = Some(source);
        self
    }

    /// Toggle lock mode, as the UI button would
    pub fn toggle_lock(&mut self) -> LockMode {
        self.controller.toggle_lock_mode(&mut self.label)
    }

    pub fn controller(&self) -> &PushController {
        &self.controller
    }

    pub fn label(&self) -> &TracingLabel {
        &self.label
    }

    pub fn box_position(&self) -> Vec3 {
        self.body.position(&self.world)
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Run one rendered frame of length `delta`
    ///
    /// Input and engagement update first, then as many fixed physics steps
    /// as the accumulator allows, so each step sees this frame's state.
    pub fn frame(&mut self, delta: f32) {
        self.time += delta;
        self.summary.frames += 1;

        for _ in 0..self.hand.advance(self.time) {
            self.toggle_lock();
        }
        let hand: &dyn ManipulatorSource = match &mut self.live {
            Some(live) => {
                live.poll();
                &**live
            }
            None => &self.hand,
        };
        let body_position = self.body.position(&self.world);
        self.controller.update(hand, body_position);

        self.physics_accumulator += delta;
        let timestep = self.world.timestep();
        while self.physics_accumulator >= timestep {
            let report = self.controller.fixed_step(&mut self.body.sink(&mut self.world), hand);
            Self::record(&mut self.summary, &report);
            self.world.step();
            self.physics_accumulator -= timestep;
        }
    }

    fn record(summary: &mut RunSummary, report: &StepReport) {
        summary.physics_steps += 1;
        match report.push {
            PushOutcome::Applied(_) => summary.pushes_applied += 1,
            PushOutcome::HeldByStaticFriction => summary.pushes_held += 1,
            PushOutcome::NotEngaged | PushOutcome::NoDirection => {}
        }
    }

    /// Run frames of `1 / frame_rate` until `duration` has elapsed
    pub fn run(&mut self, duration: f32, frame_rate: f32) -> RunSummary {
        let frame = 1.0 / frame_rate;
        let mut next_report = 0.0;

        while self.time < duration {
            self.frame(frame);

            if self.time >= next_report {
                let pos = self.body.position(&self.world);
                let vel = self.body.velocity(&self.world);
                tracing::info!(
                    time = self.time,
                    state = ?self.controller.engagement(),
                    lock = self.controller.lock_mode().as_str(),
                    x = pos.x,
                    y = pos.y,
                    z = pos.z,
                    speed = vel.length(),
                    "box"
                );
                next_report += 0.5;
            }
        }

        self.summary()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            final_position: self.body.position(&self.world),
            final_velocity: self.body.velocity(&self.world),
            lock: self.controller.lock_mode(),
            ..self.summary
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Keyframe;
    use glam::Vec2;

    fn config_with(script: Vec<Keyframe>) -> PushboxConfig {
        PushboxConfig {
            script,
            ..PushboxConfig::default()
        }
    }

    #[test]
    fn test_label_starts_off() {
        let sim = Simulation::new(&PushboxConfig::default()).unwrap();
        assert_eq!(sim.label().text(), "LOCK OFF");
    }

    #[test]
    fn test_accumulator_runs_fixed_steps() {
        let idle = vec![Keyframe::new(0.0, Vec3::new(-1.0, 1.0, 0.0))];
        let mut sim = Simulation::new(&config_with(idle)).unwrap();

        // 0.02s physics under 0.05s frames: two steps per frame with carry-over
        for _ in 0..10 {
            sim.frame(0.05);
        }
        let summary = sim.summary();
        assert_eq!(summary.frames, 10);
        assert!((24..=25).contains(&summary.physics_steps), "{}", summary.physics_steps);
    }

    #[test]
    fn test_scripted_push_moves_box() {
        let behind = Vec3::new(-1.0, 1.0, 0.0);
        let mut sim = Simulation::new(&config_with(vec![
            Keyframe::new(0.0, behind).pressing(Vec2::X),
        ]))
        .unwrap();

        let summary = sim.run(1.0, 60.0);

        assert!(summary.pushes_applied > 0);
        assert!(summary.final_position.x > 0.5, "{:?}", summary.final_position);
    }

    #[test]
    fn test_script_toggles_lock() {
        let mut sim = Simulation::new(&config_with(vec![
            Keyframe::new(0.1, Vec3::ZERO).toggling_lock(),
        ]))
        .unwrap();

        let summary = sim.run(0.5, 60.0);

        assert_eq!(summary.lock, LockMode::Locked);
        assert_eq!(sim.label().text(), "LOCK ON");
    }

    #[test]
    fn test_live_source_replaces_script() {
        use devices::{ManipulatorState, NullSource, Pose};

        // Script would push, but the live device is idle
        let behind = Vec3::new(-1.0, 1.0, 0.0);
        let mut sim = Simulation::new(&config_with(vec![
            Keyframe::new(0.0, behind).pressing(Vec2::X),
        ]))
        .unwrap()
        .with_live_source(Box::new(NullSource::new()));
        let summary = sim.run(0.5, 60.0);
        assert_eq!(summary.pushes_applied, 0);

        let live = ManipulatorState::tracked(Pose::from_position(behind), true, Vec2::X);
        let mut sim = Simulation::new(&PushboxConfig::default())
            .unwrap()
            .with_live_source(Box::new(live));
        let summary = sim.run(0.5, 60.0);
        assert!(summary.pushes_applied > 0);
    }

    #[test]
    fn test_weak_push_is_held() {
        let mut config = config_with(vec![
            Keyframe::new(0.0, Vec3::new(-1.0, 1.0, 0.0)).pressing(Vec2::X),
        ]);
        config.push.push_force = 20.0;
        let mut sim = Simulation::new(&config).unwrap();

        let summary = sim.run(0.5, 60.0);

        assert!(summary.pushes_held > 0);
        assert!(summary.final_position.x.abs() < 0.01, "{:?}", summary.final_position);
    }
}
