use glam::Vec2;
use leap::{LookInput, RawInput};

/// Side-scroller run: land, run into the shaft wall, jump onto it, wall
/// jump off, then idle until the end.
pub fn platformer_input(tick: u64) -> RawInput {
    match tick {
        0..60 => RawInput::idle(),
        60..120 => RawInput::axes(1.0, 0.0),
        120 => RawInput::axes(1.0, 0.0).with_jump_down(),
        121..160 => RawInput::axes(1.0, 0.0),
        160 => RawInput::axes(1.0, 0.0).with_jump_up(),
        161..200 => RawInput::axes(1.0, 0.0),
        200 => RawInput::axes(1.0, 0.0).with_jump_down(),
        201..215 => RawInput::idle(),
        215 => RawInput::idle().with_jump_up(),
        _ => RawInput::idle(),
    }
}

/// First-person walk: forward, a hop with an early release, a slow turn.
pub fn first_person_input(tick: u64) -> RawInput {
    match tick {
        0..60 => RawInput::idle(),
        60..90 => RawInput::axes(0.0, 1.0),
        90 => RawInput::axes(0.0, 1.0).with_jump_down(),
        91..96 => RawInput::axes(0.0, 1.0),
        96 => RawInput::axes(0.0, 1.0).with_jump_up(),
        97..240 => RawInput::axes(0.5, 1.0),
        _ => RawInput::idle(),
    }
}

pub fn first_person_look(tick: u64) -> LookInput {
    let stick = if (120..180).contains(&tick) {
        Vec2::new(0.5, 0.0)
    } else {
        Vec2::ZERO
    };

    LookInput {
        stick,
        ..Default::default()
    }
}

pub fn run_toggle(tick: u64) -> bool {
    tick == 70 || tick == 150
}
