use glam::Vec3;
use rapier3d::prelude::*;

use crate::sink::ForceSink;
use crate::world::PhysicsWorld;

/// The pushable box: a dynamic rigid body with one cuboid collider
///
/// The collider is frictionless. Surface friction is simulated by the push
/// controller, so Rapier only supplies integration and contact response.
#[derive(Debug, Clone, Copy)]
pub struct BoxBody {
    pub(crate) body_handle: RigidBodyHandle,
    pub(crate) collider_handle: ColliderHandle,
    mass: f32,
}

impl BoxBody {
    /// Create a new dynamic box
    ///
    /// # Arguments
    /// * `world` - The physics world to add the box to
    /// * `position` - Initial center position
    /// * `half_extents` - Half size along each axis
    /// * `mass` - Total mass of the box
    pub fn new(world: &mut PhysicsWorld, position: Vec3, half_extents: Vec3, mass: f32) -> Self {
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![position.x, position.y, position.z])
            .ccd_enabled(true)
            .build();
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .mass(mass)
            .friction(0.0)
            .restitution(0.0)
            .build();
        let (body_handle, collider_handle) = world.insert(body, collider);

        Self {
            body_handle,
            collider_handle,
            mass,
        }
    }

    /// Mass the box was created with
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Get the current position of the box
    pub fn position(&self, world: &PhysicsWorld) -> Vec3 {
        if let Some(body) = world.body(self.body_handle) {
            let pos = body.translation();
            Vec3::new(pos.x, pos.y, pos.z)
        } else {
            Vec3::ZERO
        }
    }

    /// Get the linear velocity of the box
    pub fn velocity(&self, world: &PhysicsWorld) -> Vec3 {
        if let Some(body) = world.body(self.body_handle) {
            let vel = body.linvel();
            Vec3::new(vel.x, vel.y, vel.z)
        } else {
            Vec3::ZERO
        }
    }

    /// Set the linear velocity of the box
    pub fn set_velocity(&self, world: &mut PhysicsWorld, velocity: Vec3) {
        if let Some(body) = world.body_mut(self.body_handle) {
            body.set_linvel(vector![velocity.x, velocity.y, velocity.z], true);
        }
    }

    /// Apply an impulse to the box
    ///
    /// Impulses cause an immediate change in velocity.
    pub fn apply_impulse(&self, world: &mut PhysicsWorld, impulse: Vec3) {
        if let Some(body) = world.body_mut(self.body_handle) {
            body.apply_impulse(vector![impulse.x, impulse.y, impulse.z], true);
        }
    }

    /// Get the body handle
    pub fn body_handle(&self) -> RigidBodyHandle {
        self.body_handle
    }

    /// Get the collider handle
    pub fn collider_handle(&self) -> ColliderHandle {
        self.collider_handle
    }

    /// Borrow the box as a force sink for the world's next step
    pub fn sink<'w>(&self, world: &'w mut PhysicsWorld) -> RapierSink<'w> {
        RapierSink { world, body: *self }
    }
}

/// [`ForceSink`] over a [`BoxBody`] for a single physics step
///
/// Rapier keeps user forces until they are reset, so contributions are
/// turned into impulses for exactly one world timestep `dt`: an
/// acceleration `a` becomes `a * mass * dt`, a force `f` becomes `f * dt`.
/// Impulses add up with anything else applied to the body that step.
pub struct RapierSink<'w> {
    world: &'w mut PhysicsWorld,
    body: BoxBody,
}

impl ForceSink for RapierSink<'_> {
    fn current_velocity(&self) -> Vec3 {
        self.body.velocity(&*self.world)
    }

    fn current_position(&self) -> Vec3 {
        self.body.position(&*self.world)
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.body.set_velocity(&mut *self.world, velocity);
    }

    fn apply_acceleration(&mut self, acceleration: Vec3) {
        let impulse = acceleration * self.body.mass * self.world.timestep();
        self.body.apply_impulse(&mut *self.world, impulse);
    }

    fn apply_force(&mut self, force: Vec3) {
        let impulse = force * self.world.timestep();
        self.body.apply_impulse(&mut *self.world, impulse);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_creation() {
        let mut world = PhysicsWorld::new(Vec3::ZERO, 1.0 / 60.0);
        let body = BoxBody::new(&mut world, Vec3::new(0.0, 0.5, 0.0), Vec3::splat(0.5), 10.0);

        assert_eq!(body.position(&world), Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(body.mass(), 10.0);
        assert!(world.body(body.body_handle()).is_some());
    }

    #[test]
    fn test_velocity_setting() {
        let mut world = PhysicsWorld::new(Vec3::ZERO, 1.0 / 60.0);
        let body = BoxBody::new(&mut world, Vec3::ZERO, Vec3::splat(0.5), 10.0);

        body.set_velocity(&mut world, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(body.velocity(&world), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_sink_acceleration_moves_box() {
        let mut world = PhysicsWorld::new(Vec3::ZERO, 1.0 / 60.0);
        let body = BoxBody::new(&mut world, Vec3::ZERO, Vec3::splat(0.5), 10.0);
        world.step();

        for _ in 0..30 {
            body.sink(&mut world).apply_acceleration(Vec3::new(2.0, 0.0, 0.0));
            world.step();
        }

        let velocity = body.velocity(&world);
        assert!(velocity.x > 0.5, "velocity {velocity:?}");
        assert!(body.position(&world).x > 0.0);
    }

    #[test]
    fn test_sink_snap_stops_box() {
        let mut world = PhysicsWorld::new(Vec3::ZERO, 1.0 / 60.0);
        let body = BoxBody::new(&mut world, Vec3::ZERO, Vec3::splat(0.5), 10.0);
        body.set_velocity(&mut world, Vec3::new(3.0, 0.0, 0.0));

        let mut sink = body.sink(&mut world);
        sink.set_velocity(Vec3::ZERO);
        assert_eq!(sink.current_velocity(), Vec3::ZERO);
    }
}
