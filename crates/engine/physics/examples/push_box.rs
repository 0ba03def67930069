use pushbox_physics::{
    devices::{ManipulatorState, Pose},
    glam::{Vec2, Vec3},
    BoxBody, PhysicsWorld, PushConfig, PushController,
};

fn main() {
    println!("=== Push Box ===\n");

    let config = PushConfig::default();
    let dt = 1.0 / 60.0;
    let mut world = PhysicsWorld::new(Vec3::new(0.0, -config.gravity, 0.0), dt);
    world.add_floor(0.0, 50.0);
    let start = Vec3::new(0.0, 0.5, 0.0);
    let body = BoxBody::new(&mut world, start, Vec3::splat(0.5), config.box_mass);
    let mut controller = PushController::new(config).expect("default config is valid");

    // Hand one meter behind the box, stick pushed forward-right
    let hand = Pose::from_position(Vec3::new(-1.0, 1.0, 0.0));
    let mut input = ManipulatorState::tracked(hand, true, Vec2::new(1.0, 0.0));

    let steps = (3.0 / dt) as usize;

    for i in 0..steps {
        // Let go after one second and watch friction stop the box
        if i == 60 {
            input.release();
            println!("-- released --");
        }

        controller.update(&input, body.position(&world));
        let report = controller.fixed_step(&mut body.sink(&mut world), &input);
        world.step();

        if i % 30 == 0 {
            let pos = body.position(&world);
            let vel = body.velocity(&world);
            println!(
                "Time: {:.2}s | {:?} | Position: ({:.3}, {:.3}, {:.3}) | Speed: {:.3} | {:?}",
                world.elapsed(),
                controller.engagement(),
                pos.x,
                pos.y,
                pos.z,
                vel.length(),
                report.push
            );
        }
    }

    let final_pos = body.position(&world);
    println!("\nFinal position: ({:.3}, {:.3}, {:.3})", final_pos.x, final_pos.y, final_pos.z);
}
