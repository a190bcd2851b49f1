use glam::Vec3;
use leap::{
    CharacterBody, CollisionFlags, CollisionQuery, ControllerConfig, ControllerState,
    FirstPersonController, PhysicsWorld, PlatformerController, RawInput, TestLevel,
};

const DT: f32 = 1.0 / 60.0;
const RADIUS: f32 = 0.3;
const HEIGHT: f32 = 1.8;

fn level_body(position: Vec3) -> CharacterBody {
    let level = TestLevel::new();
    let mut physics = PhysicsWorld::new();
    level.build(&mut physics);
    CharacterBody::spawn(physics, position, RADIUS, HEIGHT)
}

#[test]
fn falling_character_lands_on_the_floor() {
    let body = level_body(TestLevel::new().spawn_point());
    let mut controller = PlatformerController::new(ControllerConfig::default(), body).unwrap();

    let mut landed = false;
    for _ in 0..120 {
        if controller.advance(&RawInput::idle(), DT) == ControllerState::Grounded {
            landed = true;
            break;
        }
    }

    assert!(landed, "never touched the floor");
    let feet = controller.body().position().y - HEIGHT / 2.0;
    assert!(feet > 0.0 && feet < 0.5, "feet at {feet}");
}

#[test]
fn floor_stops_downward_moves() {
    let mut body = level_body(Vec3::new(0.0, 1.5, 0.0));

    let flags = body.move_by(Vec3::new(0.0, -2.0, 0.0), DT);

    assert!(flags.contains(CollisionFlags::BELOW));
    assert!(body.position().y > 0.9);
}

#[test]
fn shaft_wall_reports_side_contact() {
    // left shaft wall spans x in [5.75, 6.25]
    let mut body = level_body(Vec3::new(4.5, 4.0, 0.0));

    let flags = body.move_by(Vec3::new(2.0, 0.0, 0.0), DT);

    assert!(flags.contains(CollisionFlags::SIDES));
    assert!(body.position().x < 5.75);
}

#[test]
fn resting_body_ignores_diagonal_push_into_floor() {
    let mut body = level_body(Vec3::new(0.0, 1.5, 0.0));
    body.move_by(Vec3::new(0.0, -2.0, 0.0), DT);
    assert!(body.is_grounded());
    let rest = body.position().y;

    for _ in 0..200 {
        let flags = body.move_by(Vec3::new(0.0011, -0.011, 0.0011), DT);
        assert!(flags.contains(CollisionFlags::BELOW));
        assert!(body.position().y > rest - 0.01, "sank to {}", body.position().y);
    }
}

#[test]
fn idle_first_person_controller_stays_grounded() {
    let body = level_body(TestLevel::new().spawn_point());
    let mut controller = FirstPersonController::new(ControllerConfig::default(), body).unwrap();

    let mut frames = 0;
    while controller.advance(&RawInput::idle(), DT) != ControllerState::Grounded {
        frames += 1;
        assert!(frames < 120, "never touched the floor");
    }
    for _ in 0..10 {
        controller.advance(&RawInput::idle(), DT);
    }
    let rest = controller.body().position().y;

    for frame in 0..90 {
        let state = controller.advance(&RawInput::idle(), DT);
        let y = controller.body().position().y;

        assert_eq!(state, ControllerState::Grounded, "left the floor on frame {frame}");
        assert!((y - rest).abs() < 0.02, "frame {frame}: y {y}, rest {rest}");
    }
}
