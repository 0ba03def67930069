use glam::Vec3;
use rapier3d::prelude::*;

/// Rapier scene that hosts the pushed box
///
/// The world is built with the fixed physics timestep and keeps it, so every
/// [`RapierSink`](crate::RapierSink) converts forces over exactly the interval
/// [`step`](Self::step) integrates. The push controller never touches this
/// directly.
pub struct PhysicsWorld {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    ccd: CCDSolver,
    gravity: Vector<Real>,
    steps: u64,
}

impl PhysicsWorld {
    /// Empty world advancing `timestep` seconds per [`step`](Self::step)
    pub fn new(gravity: Vec3, timestep: f32) -> Self {
        let mut params = IntegrationParameters::default();
        params.dt = timestep;

        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            params,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd: CCDSolver::new(),
            gravity: vector![gravity.x, gravity.y, gravity.z],
            steps: 0,
        }
    }

    /// Seconds integrated by one step
    pub fn timestep(&self) -> f32 {
        self.params.dt
    }

    /// Number of steps taken so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Simulated time so far
    pub fn elapsed(&self) -> f32 {
        self.steps as f32 * self.params.dt
    }

    pub fn gravity(&self) -> Vec3 {
        Vec3::new(self.gravity.x, self.gravity.y, self.gravity.z)
    }

    /// Integrate one fixed timestep
    ///
    /// Impulses queued through a sink since the last step take effect here.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            None,
            &(),
            &(),
        );
        self.steps += 1;
    }

    /// Add the fixed, frictionless slab the box rests on
    ///
    /// Its top face sits at `top_y` and spans `half_extent` in X and Z.
    /// Surface friction is the controller's job, so the slab only stops the
    /// box from falling.
    pub fn add_floor(&mut self, top_y: f32, half_extent: f32) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(vector![0.0, top_y - 0.5, 0.0])
            .build();
        let collider = ColliderBuilder::cuboid(half_extent, 0.5, half_extent)
            .friction(0.0)
            .restitution(0.0)
            .build();
        self.insert(body, collider).0
    }

    pub(crate) fn insert(
        &mut self,
        body: RigidBody,
        collider: Collider,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let body = self.bodies.insert(body);
        let collider = self.colliders.insert_with_parent(collider, body, &mut self.bodies);
        (body, collider)
    }

    pub fn body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    pub fn body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }
}
