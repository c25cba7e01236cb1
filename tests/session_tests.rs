//! End-to-end flows through `Session::tick`, driven the way the terminal loop
//! drives it: a batch of input events and a sound sink per tick.

use flappy_term::audio::{Cue, CueLog};
use flappy_term::config::*;
use flappy_term::entity::Entity;
use flappy_term::geom::Point;
use flappy_term::{Flow, InputEvent, Session, State};

const FLAP: &[InputEvent] = &[InputEvent::FLAP];

/// Tick with no input until `done` holds. Returns the number of ticks taken.
fn run_until(
    session: &mut Session,
    audio: &mut CueLog,
    max: usize,
    done: impl Fn(&Session) -> bool,
) -> usize {
    for n in 1..=max {
        session.tick(&[], audio);
        if done(session) {
            return n;
        }
    }
    panic!("condition not reached in {max} ticks");
}

/// Start a game, then let the bird drop onto the ground.
fn crashed_session(audio: &mut CueLog) -> Session {
    let mut session = Session::new(42);
    session.tick(FLAP, audio);
    run_until(&mut session, audio, 200, |s| s.state() != State::Playing);
    session
}

#[test]
fn waits_for_the_first_press() {
    let mut audio = CueLog::default();
    let mut session = Session::new(7);
    let top = session.bird().rect().top();

    for _ in 0..10 {
        assert_eq!(session.tick(&[], &mut audio), Flow::Continue);
    }

    assert_eq!(session.state(), State::NotStarted);
    let xs: Vec<i32> = session.pipes().iter().map(|p| p.x()).collect();
    assert_eq!(xs, PIPE_SPAWN_X);
    assert!(session.pipes().iter().all(|p| p.velocity() == 0));
    assert_eq!(session.ground().x(), 10 * GROUND_SPEED);
    assert_eq!(session.bird().rect().top(), top);
    assert_eq!(session.instructions().alpha(), 255);
    assert!(audio.cues.is_empty());
}

#[test]
fn first_press_starts_pipes_and_fades_instructions() {
    let mut audio = CueLog::default();
    let mut session = Session::new(7);

    session.tick(FLAP, &mut audio);

    assert_eq!(session.state(), State::Playing);
    assert_eq!(audio.cues, vec![Cue::Flap]);
    for (pipe, x) in session.pipes().iter().zip(PIPE_SPAWN_X) {
        assert_eq!(pipe.velocity(), PIPE_SPEED);
        assert_eq!(pipe.x(), x + PIPE_SPEED);
    }
    assert_eq!(session.instructions().alpha(), 255 - INSTRUCTIONS_FADE_STEP as u8);

    run_until(&mut session, &mut audio, 100, |s| !s.instructions().is_active());
}

#[test]
fn jump_lifts_then_gravity_takes_over() {
    let mut audio = CueLog::default();
    let mut session = Session::new(7);
    session.tick(FLAP, &mut audio);
    assert_eq!(session.bird().velocity(), JUMP_IMPULSE);

    let mut last = session.bird().rect().center().y;
    while session.bird().distance() < JUMP_HEIGHT {
        session.tick(&[], &mut audio);
        let y = session.bird().rect().center().y;
        assert!(y < last, "bird must rise during the impulse");
        last = y;
    }

    let mut gravity = session.bird().gravity();
    let ticks = run_until(&mut session, &mut audio, 50, |s| s.bird().is_falling());
    assert!(ticks <= 16);
    assert!(session.bird().angle() < FALLING_ANGLE);
    assert!(session.bird().rect().center().y > last);

    loop {
        session.tick(&[], &mut audio);
        if session.state() != State::Playing {
            break;
        }
        let g = session.bird().gravity();
        assert!(g >= gravity && g <= MAX_GRAVITY);
        gravity = g;
    }
}

#[test]
fn rotation_stays_clamped_while_flying() {
    let mut audio = CueLog::default();
    let mut session = Session::new(11);
    for n in 0..120 {
        let events = if n % 7 == 0 { FLAP } else { &[] };
        session.tick(events, &mut audio);
        if session.bird().is_dead() {
            break;
        }
        let angle = session.bird().angle();
        assert!((MIN_ANGLE..=MAX_ANGLE).contains(&angle), "angle {angle}");
    }
}

#[test]
fn ground_crash_freezes_the_world() {
    let mut audio = CueLog::default();
    let mut session = crashed_session(&mut audio);

    assert_eq!(session.state(), State::Dying);
    assert!(session.bird().is_dead());
    assert_eq!(session.ground().velocity(), 0);
    assert!(session.pipes().iter().all(|p| p.velocity() == 0));
    assert_eq!(session.score(), 0);
    assert_eq!(audio.count(Cue::Hit), 1);
    assert_eq!(audio.count(Cue::Die), 0);

    let pipes: Vec<i32> = session.pipes().iter().map(|p| p.x()).collect();
    let ground = session.ground().x();
    let center = session.bird().rect().center();

    session.tick(&[], &mut audio);
    assert_eq!(session.state(), State::GameOver);
    assert!(session.end_message().is_active());

    for _ in 0..20 {
        session.tick(FLAP, &mut audio);
    }
    let after: Vec<i32> = session.pipes().iter().map(|p| p.x()).collect();
    assert_eq!(after, pipes);
    assert_eq!(session.ground().x(), ground);
    let now = session.bird().rect().center();
    assert!((now.y - center.y).abs() < 1e-6, "a grounded bird stays put");
    assert_eq!(session.end_message().alpha(), 255);
    assert_eq!(audio.count(Cue::Flap), 1, "dead birds do not flap");
    assert_eq!(session.score(), 0);
}

#[test]
fn flying_off_the_top_counts_as_a_pipe_hit() {
    let mut audio = CueLog::default();
    let mut session = Session::new(5);
    let mut ticks = 0;
    while session.state() == State::Playing || session.state() == State::NotStarted {
        session.tick(FLAP, &mut audio);
        ticks += 1;
        assert!(ticks < 200, "bird never reached the ceiling");
    }

    assert_eq!(session.state(), State::Dying);
    assert_eq!(audio.count(Cue::Hit), 1);
    assert_eq!(audio.count(Cue::Die), 1);

    // The bird then drops to the ground without a second hit cue.
    run_until(&mut session, &mut audio, 200, |s| s.ground().rect().intersects(&s.bird().rect()));
    for _ in 0..5 {
        session.tick(&[], &mut audio);
    }
    assert_eq!(session.state(), State::GameOver);
    assert_eq!(audio.count(Cue::Hit), 1);
}

#[test]
fn ok_button_restarts_from_scratch() {
    let mut audio = CueLog::default();
    let mut session = crashed_session(&mut audio);
    session.tick(&[], &mut audio);
    assert_eq!(session.state(), State::GameOver);

    // Presses elsewhere are ignored.
    let miss = InputEvent::Press(Point::new(100.0, 100.0));
    session.tick(&[miss], &mut audio);
    assert_eq!(session.state(), State::GameOver);

    let hit = InputEvent::Press(Point::new(300.0, 320.0));
    assert_eq!(session.tick(&[hit], &mut audio), Flow::Continue);

    assert_eq!(session.state(), State::NotStarted);
    assert_eq!(session.score(), 0);
    assert_eq!(session.ticks(), 0);
    let xs: Vec<i32> = session.pipes().iter().map(|p| p.x()).collect();
    assert_eq!(xs, PIPE_SPAWN_X);
    assert!(!session.bird().is_dead());
    assert_eq!(session.instructions().alpha(), 255);
    assert!(!session.end_message().is_active());

    // And the new game plays normally.
    session.tick(FLAP, &mut audio);
    assert_eq!(session.state(), State::Playing);
}

#[test]
fn enter_key_press_hits_ok() {
    let mut audio = CueLog::default();
    let mut session = crashed_session(&mut audio);
    session.tick(&[], &mut audio);
    session.tick(&[InputEvent::ok_button()], &mut audio);
    assert_eq!(session.state(), State::NotStarted);
}

#[test]
fn ok_button_does_nothing_mid_game() {
    let mut audio = CueLog::default();
    let mut session = Session::new(8);
    session.tick(&[InputEvent::ok_button()], &mut audio);
    assert_eq!(session.state(), State::Playing);
    assert_eq!(session.ticks(), 1);
}

#[test]
fn quit_ends_the_loop() {
    let mut audio = CueLog::default();
    let mut session = Session::new(1);
    assert_eq!(session.tick(&[InputEvent::Quit], &mut audio), Flow::Quit);
    assert_eq!(session.tick(&[FLAP[0], InputEvent::Quit], &mut audio), Flow::Quit);
}

#[test]
fn same_seed_same_pipes() {
    let a = Session::new(1234);
    let b = Session::new(1234);
    let offsets = |s: &Session| s.pipes().iter().map(|p| p.offset()).collect::<Vec<_>>();
    assert_eq!(offsets(&a), offsets(&b));
    for pipe in a.pipes() {
        assert!((PIPE_OFFSET_MIN..=PIPE_OFFSET_MAX).contains(&pipe.offset()));
        assert_eq!(pipe.bottom_y(), pipe.pixel_height() + PIPE_SPACING);
    }
}

#[test]
fn ground_band_wraps_through_a_session() {
    let mut audio = CueLog::default();
    let mut session = Session::new(2);
    for _ in 0..1000 {
        session.tick(&[], &mut audio);
        let x = session.ground().x();
        assert!((-SCREEN_WIDTH..=0).contains(&x));
    }
    let mut out = Vec::new();
    session.ground().visuals(&mut out);
    assert_eq!(out.len(), 1);
}
