mod script;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use leap::{
    CharacterBody, CollisionQuery, Controller, ControllerConfig, ControllerState, LateralAxes,
    LookRig, PhysicsWorld, RawInput, RunWalkToggle, SimulationLoop, TestLevel,
};

const PLAYER_RADIUS: f32 = 0.3;
const PLAYER_HEIGHT: f32 = 1.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Platformer,
    FirstPerson,
}

#[derive(Parser)]
#[command(name = "leap-demo")]
#[command(about = "Drives a movement controller through a scripted run on the test level")]
struct Args {
    #[arg(short, long, value_enum, default_value_t = Mode::Platformer)]
    mode: Mode,

    #[arg(short, long, default_value_t = 360)]
    frames: u32,

    #[arg(short, long, default_value_t = 60)]
    tick_rate: u32,

    #[arg(short, long, help = "JSON controller config; missing fields use defaults")]
    config: Option<PathBuf>,

    #[arg(long, help = "Allow one extra jump per airborne cycle")]
    air_jump: bool,

    #[arg(long, help = "Allow clinging to walls")]
    wall_hug: bool,

    #[arg(long, help = "Log state changes from the controller (debug builds only)")]
    debug_logs: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = library_log_level(&args) {
        logger.filter_module("leap", level);
    }
    logger.init();

    let config = load_config(&args)?;
    let level = TestLevel::new();
    let mut physics = PhysicsWorld::new();
    level.build(&mut physics);
    log::info!("Level built with {} blocks", level.blocks().len());

    let body = CharacterBody::spawn(physics, level.spawn_point(), PLAYER_RADIUS, PLAYER_HEIGHT);

    match args.mode {
        Mode::Platformer => {
            let mut controller = leap::PlatformerController::new(config, body)?;
            run(&mut controller, &args, |_, tick| script::platformer_input(tick));
        }
        Mode::FirstPerson => {
            let mut controller = leap::FirstPersonController::new(config, body)?;
            let mut look = LookRig::default();
            let toggle = RunWalkToggle::default();

            run(&mut controller, &args, |controller, tick| {
                look.update(&script::first_person_look(tick));
                controller.set_orientation(look.orientation());
                toggle.update(script::run_toggle(tick), controller);
                script::first_person_input(tick)
            });
        }
    }

    Ok(())
}

/// Controller transition messages are `debug` records; `--debug-logs`
/// raises the library's filter so they show up without `RUST_LOG`.
fn library_log_level(args: &Args) -> Option<LevelFilter> {
    args.debug_logs.then_some(LevelFilter::Debug)
}

fn load_config(args: &Args) -> Result<ControllerConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => ControllerConfig::default(),
    };

    config.can_air_jump |= args.air_jump;
    config.can_wall_hug |= args.wall_hug;
    config.print_debug_logs |= args.debug_logs;
    config.validate()?;

    Ok(config)
}

fn run<L, F>(controller: &mut Controller<L, CharacterBody>, args: &Args, mut input_for: F)
where
    L: LateralAxes,
    F: FnMut(&mut Controller<L, CharacterBody>, u64) -> RawInput,
{
    let mut sim = SimulationLoop::new(args.tick_rate);
    let frame_time = 1.0 / args.tick_rate as f32;
    let mut last_state = controller.state();

    for _ in 0..args.frames {
        sim.update(frame_time, |tick| {
            let input = input_for(controller, tick.index);
            let state = controller.advance(&input, tick.dt);

            if state != last_state {
                let position = controller.body().position();
                log::info!(
                    "tick {:>4}: {} -> {} at ({:.2}, {:.2}, {:.2})",
                    tick.index,
                    last_state,
                    state,
                    position.x,
                    position.y,
                    position.z
                );
                last_state = state;
            }
        });
    }

    let position = controller.body().position();
    let velocity = controller.velocity();
    log::info!(
        "Finished after {} ticks in {} at ({:.2}, {:.2}, {:.2})",
        sim.ticks(),
        controller.state(),
        position.x,
        position.y,
        position.z
    );
    log::info!(
        "Final velocity ({:.2}, {:.2}, {:.2}), speed setting {:.1}",
        velocity.x,
        velocity.y,
        velocity.z,
        controller.movement_speed()
    );

    if controller.state() == ControllerState::InAir && controller.air_time() > 5.0 {
        log::warn!("Character never found the floor");
    }
}
