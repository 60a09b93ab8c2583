//! Folio binary: loads config, composes the demo level and runs the
//! simulation for a fixed number of ticks.

use std::error::Error;

use clap::Parser;
use folio_app::app_dirs::AppDirs;
use folio_app::demo;
use folio_app::frame_loop::FrameLoop;
use folio_config::{CliArgs, Config};
use folio_materials::{PARAMETER_SPECS, ParameterKind};
use folio_physics::PhysicsWorld;
use folio_world::World;
use glam::Vec3;
use tracing::{info, warn};

fn main() -> Result<(), Box<dyn Error>> {
    let args = CliArgs::parse();

    let dirs = match &args.config {
        Some(dir) => AppDirs::with_config_dir(dir.clone()),
        None => AppDirs::resolve()?,
    };
    dirs.create_dirs()?;

    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(&args);

    folio_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!("Config loaded from {}", dirs.config_dir.display());

    let resources = demo::resources(&config.assets);
    let mut world = World::new(&config.assets, &resources)?;

    let physics_config = &config.physics;
    let mut physics = PhysicsWorld::with_settings(
        Vec3::from_array(physics_config.gravity),
        physics_config.fixed_dt,
    );
    let dummy = physics.spawn_dummy(
        physics_config.dummy_radius,
        Vec3::from_array(physics_config.dummy_start),
    );
    world.attach_dummy(dummy, physics_config.dummy_radius);

    world.add_object(demo::intro_level(), &mut physics)?;

    if config.debug.inspector {
        for spec in PARAMETER_SPECS {
            match spec.kind {
                ParameterKind::Number { min, max, step } => {
                    info!("inspector: {} [{min}, {max}] step {step}", spec.name)
                }
                ParameterKind::Color => info!("inspector: {} (color)", spec.name),
            }
        }
    }

    let mut frame_loop = FrameLoop::new(f64::from(physics_config.fixed_dt))?;
    let frame_time = frame_loop.fixed_dt();
    while frame_loop.step_count() < args.ticks {
        frame_loop.advance(
            frame_time,
            |_, _| {
                physics.step();
                if world.sync_frame(&physics) == 0 {
                    warn!("No tracked bodies synchronized this tick");
                }
            },
            |_| {},
        );
    }

    if let Some(node) = world.dummy_node() {
        info!(
            "Ran {} ticks ({:.2}s simulated); dummy at {}",
            frame_loop.step_count(),
            frame_loop.total_sim_time(),
            node.position()
        );
    }
    info!(
        "{} objects, {} materials",
        world.registry().len(),
        world.catalog().len()
    );
    Ok(())
}
