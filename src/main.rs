use glam::Vec3;

use scene_motion::config::DemoConfig;
use scene_motion::demo::DemoRoute;

const CONFIG_PATH: &str = "config/demo.json";

/// Headless demo runner: pick a page, build its scene and tick it with a
/// fixed timestep, logging where everything ends up.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let route_name = std::env::args().nth(1).unwrap_or_else(|| "survey".into());
    let route = DemoRoute::from_name(&route_name)?;

    let config = DemoConfig::load_or_default(CONFIG_PATH);
    let mut demo = route.build(&config)?;
    log::info!(
        "running '{}' with {} elements",
        route.name(),
        demo.scene.len()
    );

    let dt = config.world.timestep;
    for frame in 0..240u32 {
        // The follow-cursor page gets a synthetic cursor sweep.
        if route == DemoRoute::FollowCursor && frame % 30 == 0 {
            let t = frame as f32 / 30.0;
            demo.set_cursor_target(Vec3::new(t.cos() * 3.0, 1.0, t.sin() * 3.0));
        }

        demo.scene.update(dt, &mut demo.physics);
        demo.physics.step(dt);
        demo.scene.sync_bodies(&demo.physics);

        if frame % 60 == 0 {
            for element in demo.scene.elements_sorted() {
                log::info!(
                    "frame {:3} {:<10} at {:?}",
                    frame,
                    element.name,
                    element.kind.position()
                );
            }
        }
    }

    for element in demo.scene.elements_sorted() {
        println!("{:<10} settled at {:?}", element.name, element.kind.position());
    }

    Ok(())
}
