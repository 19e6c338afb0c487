//! Integration tests for the ControlLoop → PestLocator → ActuatorController
//! pipeline, wired together exactly as the binary does it but with mock
//! servos, camera, inference server and delays.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use pestlaser::app::controller::{ActuatorController, ControllerState};
use pestlaser::app::events::AppEvent;
use pestlaser::app::locator::PestLocator;
use pestlaser::app::service::ControlLoop;
use pestlaser::config::SystemConfig;
use pestlaser::error::{Error, HardwareError, ProtocolErrorKind};
use pestlaser::plane::{Coordinate, PlanDimensions};

use crate::mock_hw::{
    Axis, Call, Journal, MockCamera, MockDelay, MockServo, RecordingSink, ScriptedDetector,
    SleepSource,
};

type Controller = ActuatorController<MockServo, MockServo, MockDelay>;
type Locator = PestLocator<MockCamera, ScriptedDetector, MockDelay>;

struct Rig {
    journal: Journal,
    running: Arc<AtomicBool>,
    controller: Controller,
    locator: Locator,
    cooldown: MockDelay,
    sink: RecordingSink,
}

fn rig(bodies: &[&'static str]) -> Rig {
    let config = SystemConfig::default();
    let journal = Journal::new();
    let running = Arc::new(AtomicBool::new(true));

    let controller = ActuatorController::new(
        MockServo::new(Axis::Horizontal, &journal),
        MockServo::new(Axis::Vertical, &journal),
        MockDelay::new(SleepSource::Settle, &journal),
        &config,
    );
    let locator = PestLocator::new(
        MockCamera::default(),
        ScriptedDetector::new(bodies, &running),
        MockDelay::new(SleepSource::Retry, &journal),
        &config,
    );

    Rig {
        cooldown: MockDelay::new(SleepSource::Cooldown, &journal),
        journal,
        running,
        controller,
        locator,
        sink: RecordingSink::default(),
    }
}

fn run(rig: &mut Rig) -> (ControlLoop, Result<(), Error>) {
    let mut control = ControlLoop::new(&SystemConfig::default()).unwrap();
    let result = control.run(
        &mut rig.locator,
        &mut rig.controller,
        &mut rig.cooldown,
        &rig.running,
        &mut rig.sink,
    );
    (control, result)
}

// ── Nominal tracking session ──────────────────────────────────

#[test]
fn tracks_pest_and_ignores_small_shifts() {
    let mut rig = rig(&["", "100,100", "105,200", "120,200"]);

    let (control, result) = run(&mut rig);
    assert_eq!(result, Ok(()), "script exhaustion stops the loop cleanly");

    // Home, first sighting, third sighting.  (105,200) moved only 5 px
    // horizontally and is ignored.
    assert_eq!(
        rig.journal.moves(),
        vec![(9.4, 5.9), (8.8, 6.4), (8.7, 7.0)]
    );
    assert_eq!(
        rig.sink.aimed(),
        vec![Coordinate::new(100.0, 100.0), Coordinate::new(120.0, 200.0)]
    );
    assert_eq!(rig.sink.ignored(), vec![Coordinate::new(105.0, 200.0)]);

    assert_eq!(rig.journal.sleeps(SleepSource::Settle), vec![1000; 3]);
    assert_eq!(rig.journal.sleeps(SleepSource::Cooldown), vec![5000; 2]);
    // One empty answer up front, one when the script ran dry.
    assert_eq!(rig.journal.sleeps(SleepSource::Retry), vec![5000; 2]);
    assert_eq!(rig.locator.misses(), 2);

    assert_eq!(control.stats().iterations, 3);
    assert_eq!(control.stats().moves, 2);
    assert_eq!(control.tracked().last(), Coordinate::new(120.0, 200.0));
    assert_eq!(rig.controller.state(), ControllerState::ShutDown);
}

#[test]
fn hardware_sequence_is_claim_move_release() {
    let mut rig = rig(&["320,240"]);
    let (_, result) = run(&mut rig);
    assert!(result.is_ok());

    let calls = rig.journal.calls();
    assert_eq!(calls[0], Call::Acquire(Axis::Horizontal, 50.0));
    assert_eq!(calls[1], Call::Acquire(Axis::Vertical, 50.0));
    assert_eq!(
        &calls[calls.len() - 2..],
        &[Call::Release(Axis::Horizontal), Call::Release(Axis::Vertical)]
    );
    assert_eq!(rig.journal.moves().last(), Some(&(7.5, 7.2)));
}

#[test]
fn events_bracket_the_session() {
    let mut rig = rig(&["50,75"]);
    let (_, result) = run(&mut rig);
    assert!(result.is_ok());

    assert!(matches!(
        rig.sink.events.first(),
        Some(AppEvent::Started { home, .. }) if *home == Coordinate::new(0.0, 0.0)
    ));
    assert!(matches!(
        rig.sink.events.last(),
        Some(AppEvent::Stopped { iterations: 1, moves: 1 })
    ));
    assert!(rig.sink.events.contains(&AppEvent::PestLocated(Coordinate::new(50.0, 75.0))));
}

// ── Failure paths ─────────────────────────────────────────────

#[test]
fn malformed_answer_is_fatal_and_releases_servos() {
    let mut rig = rig(&["100,100", "100;100"]);

    let (control, result) = run(&mut rig);
    match result {
        Err(Error::Protocol(e)) => {
            assert_eq!(e.kind, ProtocolErrorKind::WrongFieldCount);
            assert_eq!(e.body, "100;100");
        }
        other => panic!("expected protocol error, got {:?}", other),
    }

    assert_eq!(control.stats().moves, 1);
    assert_eq!(rig.journal.releases(), 2);
    assert!(matches!(rig.sink.events.last(), Some(AppEvent::Stopped { .. })));
}

#[test]
fn init_failure_releases_claimed_axis() {
    let mut rig = rig(&["100,100"]);
    let config = SystemConfig::default();
    rig.controller = ActuatorController::new(
        MockServo::new(Axis::Horizontal, &rig.journal),
        MockServo::new(Axis::Vertical, &rig.journal)
            .refusing(HardwareError::ChannelUnavailable { gpio: 18 }),
        MockDelay::new(SleepSource::Settle, &rig.journal),
        &config,
    );

    let (_, result) = run(&mut rig);
    assert_eq!(
        result,
        Err(Error::Hardware(HardwareError::ChannelUnavailable { gpio: 18 }))
    );
    assert!(rig.journal.moves().is_empty(), "no duty written without both axes");
    assert_eq!(
        rig.journal.calls(),
        vec![
            Call::Acquire(Axis::Horizontal, 50.0),
            Call::Release(Axis::Horizontal),
        ]
    );
}

#[test]
fn stop_before_first_detection_still_homes_and_releases() {
    let mut rig = rig(&["100,100"]);
    rig.running.store(false, std::sync::atomic::Ordering::SeqCst);

    let (control, result) = run(&mut rig);
    assert!(result.is_ok());
    assert_eq!(rig.journal.moves(), vec![(9.4, 5.9)]);
    assert_eq!(control.stats().iterations, 0);
    assert_eq!(rig.journal.releases(), 2);
}

// ── Controller used directly ──────────────────────────────────

#[test]
fn controller_center_and_reuse_after_cleanup() {
    let mut rig = rig(&[]);
    let plan = PlanDimensions::new(640, 480).unwrap();

    rig.controller.initialize(plan).unwrap();
    let cmd = rig.controller.center().unwrap();
    assert_eq!((cmd.horizontal, cmd.vertical), (7.5, 7.2));

    rig.controller.cleanup().unwrap();
    rig.controller.cleanup().unwrap();
    assert_eq!(rig.journal.releases(), 2, "second cleanup is a no-op");

    assert!(rig.controller.move_to(Coordinate::new(1.0, 1.0)).is_err());
    assert!(rig.controller.initialize(plan).is_err());
}
