//! Gameplay tuning, fixed at compile time.
//!
//! Keep this separate from runtime settings (frame rate, log output, etc.),
//! which live in `config`.

use crate::entities::AnimState;

// ── World ─────────────────────────────────────────────────────────────────────

pub const WORLD_WIDTH: f64 = 800.0;
pub const WORLD_HEIGHT: f64 = 600.0;

/// The hero's bottom edge never goes below this line.
pub const GROUND_LINE: f64 = WORLD_HEIGHT - 60.0;

// ── Hero ──────────────────────────────────────────────────────────────────────

pub const HERO_PREFIX: &str = "hero";
pub const HERO_SPAWN: (f64, f64) = (150.0, WORLD_HEIGHT - 100.0);

/// Added to the vertical velocity every tick.
pub const GRAVITY: f64 = 0.7;
pub const JUMP_IMPULSE: f64 = -22.0;

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const ENEMY_PREFIX: &str = "enemy";
pub const ENEMY_SCALE: f64 = 0.6;
pub const ENEMY_SPAWN_X: f64 = WORLD_WIDTH + 100.0;
pub const GROUND_LANE_Y: f64 = WORLD_HEIGHT - 92.0;
pub const ELEVATED_LANE_Y: f64 = WORLD_HEIGHT - 200.0;

/// Spawn roll is drawn from `0..SPAWN_ROLL_RANGE`; rolls below
/// `SPAWN_ROLL_THRESHOLD` spawn (0 and 1, i.e. 2% per tick).
pub const SPAWN_ROLL_RANGE: u32 = 100;
pub const SPAWN_ROLL_THRESHOLD: u32 = 2;
pub const SPAWN_CAP: usize = 2;

// ── Scoring & difficulty ──────────────────────────────────────────────────────

pub const SCORE_PER_SECOND: f64 = 10.0;
pub const BASE_SPEED: f64 = 4.5;
/// Every this many points adds one unit of enemy speed.
pub const SCORE_PER_SPEED_STEP: f64 = 1000.0;

// ── Collision ─────────────────────────────────────────────────────────────────

pub const HITBOX_WIDTH_FACTOR: f64 = 0.5;
pub const HITBOX_HEIGHT_FACTOR: f64 = 0.8;
/// The hero's feet must be above `enemy.center_y + STOMP_TOLERANCE`.
pub const STOMP_TOLERANCE: f64 = 10.0;
pub const STOMP_BONUS: f64 = 150.0;
pub const STOMP_BOUNCE: f64 = -15.0;

// ── Animation ─────────────────────────────────────────────────────────────────

/// Seconds each animation frame stays on screen.
pub const ANIMATION_SPEED: f64 = 0.12;

/// Frame count per animation state.
pub fn max_frames(state: AnimState) -> u8 {
    match state {
        AnimState::Run => 3,
        AnimState::Idle => 2,
        AnimState::Walk => 2,
    }
}

/// Unscaled sprite size `(width, height)` of a frame.
///
/// Every frame of a given sprite set and state shares one size.
pub fn frame_size(prefix: &str, state: AnimState) -> (f64, f64) {
    match (prefix, state) {
        (HERO_PREFIX, AnimState::Idle) => (64.0, 80.0),
        (HERO_PREFIX, _) => (60.0, 80.0),
        _ => (80.0, 105.0),
    }
}
