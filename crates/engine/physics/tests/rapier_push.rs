//! End-to-end pushes against a real Rapier world

use pushbox_physics::devices::{ManipulatorState, Pose};
use pushbox_physics::glam::{Vec2, Vec3};
use pushbox_physics::{BoxBody, Engagement, NullLabel, PhysicsWorld, PushConfig, PushController};

const DT: f32 = 1.0 / 60.0;

/// Floating box with no gravity, so only the controller moves it
fn setup(config: PushConfig) -> (PhysicsWorld, BoxBody, PushController) {
    let mut world = PhysicsWorld::new(Vec3::ZERO, DT);
    let body = BoxBody::new(&mut world, Vec3::ZERO, Vec3::splat(0.5), config.box_mass);
    world.step();
    let controller = PushController::new(config).unwrap();
    (world, body, controller)
}

fn run(
    world: &mut PhysicsWorld,
    body: &BoxBody,
    controller: &mut PushController,
    input: &ManipulatorState,
    steps: usize,
) {
    for _ in 0..steps {
        controller.update(input, body.position(world));
        controller.fixed_step(&mut body.sink(world), input);
        world.step();
    }
}

#[test]
fn pushed_box_moves_along_stick() {
    let (mut world, body, mut controller) = setup(PushConfig::default());
    let hand = Pose::from_position(Vec3::new(-1.0, 0.0, 0.0));
    let input = ManipulatorState::tracked(hand, true, Vec2::new(1.0, 0.0));

    run(&mut world, &body, &mut controller, &input, 60);

    let position = body.position(&world);
    assert!(position.x > 0.5, "box at {position:?}");
    assert!(position.z.abs() < 1e-3, "box drifted sideways: {position:?}");
}

#[test]
fn weak_push_cannot_break_static_friction() {
    let config = PushConfig {
        push_force: 40.0,
        ..PushConfig::default()
    };
    let (mut world, body, mut controller) = setup(config);
    let hand = Pose::from_position(Vec3::new(-1.0, 0.0, 0.0));
    let input = ManipulatorState::tracked(hand, true, Vec2::new(1.0, 0.0));

    run(&mut world, &body, &mut controller, &input, 60);

    assert_eq!(controller.engagement(), Engagement::Pushing);
    assert!(body.position(&world).length() < 1e-5);
    assert_eq!(body.velocity(&world), Vec3::ZERO);
}

#[test]
fn friction_brings_released_box_to_rest() {
    let config = PushConfig::default();
    let (mut world, body, mut controller) = setup(config);
    body.set_velocity(&mut world, Vec3::new(2.0, 0.0, 0.0));
    let idle = ManipulatorState::new();

    // 2 m/s against 2.943 m/s² stops well inside two seconds
    run(&mut world, &body, &mut controller, &idle, 120);

    // Discrete friction can leave the box one step's worth of decel from rest
    let residual = body.velocity(&world).length();
    assert!(residual <= config.kinetic_deceleration() * DT + 1e-4, "still moving at {residual}");
    let x = body.position(&world).x;
    assert!(x > 0.4 && x < 1.0, "stopped at {x}");
}

#[test]
fn hand_walking_away_ends_the_push() {
    let (mut world, body, mut controller) = setup(PushConfig::default());
    let mut input =
        ManipulatorState::tracked(Pose::from_position(Vec3::new(-1.0, 0.0, 0.0)), true, Vec2::X);
    run(&mut world, &body, &mut controller, &input, 5);
    assert!(controller.is_pushing());

    input.set_pose(Some(Pose::from_position(Vec3::new(-20.0, 0.0, 0.0))));
    run(&mut world, &body, &mut controller, &input, 1);
    assert!(!controller.is_pushing());
}

#[test]
fn locked_box_drifts_less_than_unlocked() {
    let config = PushConfig::default();
    let idle = ManipulatorState::new();

    let (mut free_world, free_body, mut free) = setup(config);
    let (mut locked_world, locked_body, mut locked) = setup(config);
    locked.toggle_lock_mode(&mut NullLabel);

    free_body.set_velocity(&mut free_world, Vec3::new(3.0, 0.0, 0.0));
    locked_body.set_velocity(&mut locked_world, Vec3::new(3.0, 0.0, 0.0));

    run(&mut free_world, &free_body, &mut free, &idle, 30);
    run(&mut locked_world, &locked_body, &mut locked, &idle, 30);

    let free_x = free_body.position(&free_world).x;
    let locked_x = locked_body.position(&locked_world).x;
    assert!(locked_x < free_x, "locked {locked_x} vs free {free_x}");
}
