//! Kinematic2D - Headless Demo
//!
//! Runs the character controller through a small level with scripted input
//! and logs what happens. Set `RUST_LOG=debug` (or `trace`) for per-step
//! collision details.

use anyhow::Context;
use glam::Vec2;
use kinematic2d_physics::{
    CharacterController2D, CollisionLayers, CollisionWorld, ControllerConfig, JumpProfile,
    JumpTrigger,
};

const TICK_RATE: f32 = 60.0;
const TICKS: u32 = 900;

/// Input for one tick.
struct ScriptedInput {
    move_x: f32,
    jump_held: bool,
}

/// Walk right up the ramp, hop across the plateau, run into the steep
/// slope, then come back and jump against the left wall.
fn scripted_input(tick: u32) -> ScriptedInput {
    let move_x = match tick {
        0..=29 => 0.0,
        30..=419 => 1.0,
        420..=479 => 0.0,
        _ => -1.0,
    };
    let jump_held = matches!(tick, 240..=250 | 300..=305 | 820..=830);

    ScriptedInput { move_x, jump_held }
}

fn build_level() -> anyhow::Result<CollisionWorld> {
    let mut world = CollisionWorld::new();

    // Floor, top at y=0
    world.add_box(
        Vec2::new(10.0, -0.5),
        Vec2::new(30.0, 0.5),
        CollisionLayers::GROUND,
    );

    // Wall on the left
    world.add_box(
        Vec2::new(-6.0, 5.0),
        Vec2::new(1.0, 5.0),
        CollisionLayers::GROUND,
    );

    // 30 degree ramp up to a plateau
    let ramp_height = 6.0 * 30.0_f32.to_radians().tan();
    world
        .add_ramp(Vec2::new(4.0, 0.0), 6.0, ramp_height, CollisionLayers::GROUND)
        .context("ramp has no area")?;
    world.add_box(
        Vec2::new(13.0, ramp_height * 0.5),
        Vec2::new(3.0, ramp_height * 0.5),
        CollisionLayers::PLATFORM,
    );

    // 60 degree slope: too steep to climb
    world
        .add_ramp(Vec2::new(22.0, 0.0), 2.0, 2.0 * 60.0_f32.to_radians().tan(), CollisionLayers::GROUND)
        .context("steep slope has no area")?;

    Ok(world)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let world = build_level()?;
    log::info!("level built with {} brushes", world.brush_count());

    let config = ControllerConfig::default()
        .with_jump_profile(JumpProfile::new(2.5, 0.45))
        .context("jump profile rejected")?;
    let mut controller = CharacterController2D::new(config)?;
    let mut body = Vec2::ZERO;
    let spawned = controller.spawn_at(Vec2::new(0.0, 1.5), &world, &mut body);
    log::info!("spawned at {:?} grounded={}", body, spawned.is_grounded());

    let delta_time = 1.0 / TICK_RATE;
    let mut jump_trigger = JumpTrigger::new();
    let mut was_grounded = spawned.is_grounded();
    let mut jumps = 0;

    for tick in 0..TICKS {
        let input = scripted_input(tick);
        controller.set_velocity_input(Vec2::new(input.move_x, 0.0));

        if jump_trigger.update(input.jump_held) && controller.collision_state().is_grounded() {
            controller.jump();
            jumps += 1;
        }

        let outcome = controller.fixed_step(delta_time, &world, &mut body)?;
        let collisions = outcome.collisions;

        let grounded = collisions.is_grounded();
        if grounded != was_grounded {
            log::info!(
                "tick {}: {} at {:?}",
                tick,
                if grounded { "landed" } else { "airborne" },
                outcome.position
            );
            was_grounded = grounded;
        }

        if collisions.touching_wall() && outcome.displacement.x == 0.0 {
            log::debug!("tick {}: pressed against a wall", tick);
        }

        if collisions.sliding_down_slope {
            log::debug!("tick {}: sliding on {:.1} degree slope", tick, collisions.slope_angle);
        }

        if tick % TICK_RATE as u32 == 0 {
            log::info!(
                "tick {}: pos=({:.2}, {:.2}) vel=({:.2}, {:.2}) below={} left={} right={} slope={:.1}",
                tick,
                outcome.position.x,
                outcome.position.y,
                controller.velocity().x,
                controller.velocity().y,
                collisions.below,
                collisions.left,
                collisions.right,
                collisions.slope_angle,
            );
        }
    }

    log::info!(
        "finished {} ticks: final position {:?}, {} jumps",
        TICKS,
        body,
        jumps
    );

    Ok(())
}
