//! Fixed tuning of the game world.
//!
//! Everything is measured in world pixels (a 640×480 playfield, y growing
//! downward) and in ticks of the fixed-rate loop.

use std::time::Duration;

// ── World ───────────────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: i32 = 640;
pub const SCREEN_HEIGHT: i32 = 480;
pub const TICKS_PER_SECOND: u32 = 30;

pub const fn tick_duration() -> Duration {
    Duration::from_nanos(1_000_000_000 / TICKS_PER_SECOND as u64)
}

// ── Bird ────────────────────────────────────────────────────────────────────

pub const BIRD_START: (f64, f64) = (250.0, 300.0);
pub const BIRD_WIDTH: f64 = 34.0;
pub const BIRD_HEIGHT: f64 = 24.0;
/// Horizontal shrink applied to the hitbox every time the sprite is rotated.
pub const BIRD_INFLATE_X: f64 = -5.0;

pub const JUMP_IMPULSE: f64 = -6.1;
/// Ticks of upward motion a single jump buys.
pub const JUMP_HEIGHT: u32 = 9;

pub const BASE_GRAVITY: f64 = 2.0;
pub const GRAVITY_RAMP: f64 = 1.15;
pub const MAX_GRAVITY: f64 = 15.0;

pub const MAX_ANGLE: f64 = 30.0;
pub const MIN_ANGLE: f64 = -90.0;
pub const TILT_UP_STEP: f64 = 22.0;
pub const TILT_DOWN_STEP: f64 = 5.0;
pub const DEAD_TILT_STEP: f64 = 12.0;
/// Below this angle the bird stops flapping its wings.
pub const FALLING_ANGLE: f64 = -40.0;
/// Ticks each wing frame is held.
pub const FLAP_FRAME_TICKS: u32 = 3;

/// A bird whose top edge rises to this height has flown off the screen.
pub const CEILING: f64 = -20.0;

// ── Pipes ───────────────────────────────────────────────────────────────────

pub const PIPE_SPEED: i32 = -5;
pub const PIPE_SPAWN_X: [i32; 3] = [840, 1065, 1290];
pub const PIPE_OFFSET_MIN: i32 = -350;
pub const PIPE_OFFSET_MAX: i32 = -90;
pub const PIPE_WIDTH: i32 = 47;
pub const TOP_PIPE_HEIGHT: i32 = 400;
pub const BOTTOM_PIPE_HEIGHT: i32 = 390;
/// Vertical opening between the two pieces of a pair.
pub const PIPE_SPACING: i32 = 100;
pub const PIPE_RECYCLE_X: i32 = -45;
pub const PIPE_RESPAWN_X: i32 = SCREEN_WIDTH;
pub const SCORE_TRIGGER_X: i32 = 250;

// ── Ground ──────────────────────────────────────────────────────────────────

pub const GROUND_TOP: i32 = 440;
pub const GROUND_WIDTH: i32 = SCREEN_WIDTH * 2;
pub const GROUND_HEIGHT: i32 = SCREEN_HEIGHT - GROUND_TOP;
pub const GROUND_SPEED: i32 = -5;

// ── Overlays ────────────────────────────────────────────────────────────────

pub const INSTRUCTIONS_FADE_STEP: i32 = 5;
pub const END_MESSAGE_FADE_STEP: i32 = 20;
pub const INSTRUCTIONS_CENTER: (i32, i32) = (320, 220);
pub const INSTRUCTIONS_SIZE: (i32, i32) = (184, 267);
pub const END_MESSAGE_TOPLEFT: (i32, i32) = (220, 100);
pub const END_MESSAGE_SIZE: (i32, i32) = (200, 250);
pub const SCORE_CENTER: (i32, i32) = (320, 30);

/// Open interval `(left, right, top, bottom)` of the game-over "OK" button.
pub const OK_BUTTON: (i32, i32, i32, i32) = (279, 354, 310, 332);
