//! # Headless Session Example
//!
//! Drives a placement session without a renderer or camera: a scripted observer,
//! scripted taps, and an OBJ model written to a scratch directory. Run with
//! `RUST_LOG=perch=debug` to watch loads, placement and deletion.

use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use perch::prelude::*;

const CHAIR: &str = "\
o chair
v -0.3 0.0 -0.3
v 0.3 0.0 -0.3
v 0.3 0.9 -0.3
v -0.3 0.9 -0.3
v -0.3 0.0 0.3
v 0.3 0.0 0.3
v 0.3 0.9 0.3
v -0.3 0.9 0.3
f 1 2 3 4
f 5 6 7 8
f 1 2 6 5
f 4 3 7 8
";

fn main() -> anyhow::Result<()> {
    let config = SessionConfig::default();
    perch::logging::init(&config.log_filter);

    let assets = std::env::temp_dir().join("perch-headless-demo");
    std::fs::create_dir_all(&assets).context("creating asset directory")?;
    std::fs::write(assets.join(config.model.asset.as_str()), CHAIR)
        .context("writing demo model")?;

    let tracking = StaticTracking::new(Vector3::new(0.0, 1.6, 0.5));
    let mut session = ArSession::new(config, ObjModelLoader::new(&assets), tracking)
        .with_spawner(WorkerSpawner::new("demo-loader"));

    // Double-tap the floor in front of the observer
    let first = Instant::now();
    let floor = Vector3::new(0.0, 0.0, -1.5);
    for at in [first, first + Duration::from_millis(180)] {
        session.handle_input(InputEvent::SurfaceTap(SurfaceHit::new(
            floor,
            Quaternion::one(),
            at,
        )));
    }

    // Render frames until the load lands
    let deadline = Instant::now() + Duration::from_secs(5);
    while session.graph().is_empty() {
        if Instant::now() > deadline {
            bail!("model did not load within 5s");
        }
        session.on_frame();
        std::thread::sleep(Duration::from_millis(16));
    }

    let id = session.controller().placements()[0];
    let model_node = session
        .graph()
        .record(id)
        .context("placement vanished")?
        .model_node();
    println!("Placed {} after {} frames", id, session.frame_count());

    // Show the delete control and walk the observer around it
    session.handle_input(InputEvent::NodeTap(model_node));
    let mut draws = Vec::new();
    for step in 0..4 {
        let angle = step as f32 * std::f32::consts::FRAC_PI_2;
        session
            .tracking_mut()
            .set_observer(Vector3::new(1.5 * angle.sin(), 1.6, -1.5 + 1.5 * angle.cos()));

        let stats = session.on_frame();
        session.collect_draws(&mut draws);
        println!(
            "frame {}: {} overlays reoriented, {} draws",
            stats.frame,
            stats.billboard.reoriented,
            draws.len()
        );
    }

    // Tap the control to remove the object
    session.handle_input(InputEvent::OverlayActivated(id));
    let stats = session.on_frame();
    println!(
        "After delete: {} nodes, {} tracked overlays, {:?}",
        session.graph().node_count(),
        session.graph().tracked_overlays().len(),
        stats.billboard
    );

    Ok(())
}
