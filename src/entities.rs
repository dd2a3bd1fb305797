//! All game entity types: pure data, no logic.

use std::fmt;

use crate::tuning::{frame_size, max_frames};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimState {
    Run,
    Idle,
    Walk,
}

impl AnimState {
    pub fn name(self) -> &'static str {
        match self {
            AnimState::Run => "run",
            AnimState::Idle => "idle",
            AnimState::Walk => "walk",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    GameOver,
}

/// Input sampled by the caller once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Input {
    /// Jump key is currently held (level-triggered, not edge-triggered).
    pub jump: bool,
}

// ── Animation ─────────────────────────────────────────────────────────────────

/// Frame-cycling state shared by every animated entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    /// Sprite-set prefix, e.g. `"hero"`.
    pub prefix: &'static str,
    /// State that drives the next frame step.
    pub state: AnimState,
    /// 1-based, always within `1..=max_frames(state)`.
    pub frame_index: u8,
    /// Seconds accumulated since the last frame step.
    pub timer: f64,
    /// State and index of the frame currently shown.  Lags `state` until the
    /// next frame step.
    pub shown: (AnimState, u8),
}

impl Animation {
    pub fn new(prefix: &'static str, state: AnimState) -> Self {
        Animation {
            prefix,
            state,
            frame_index: 1,
            timer: 0.0,
            shown: (state, 1),
        }
    }

    /// Switch state without touching the timer.  The index is kept unless it
    /// no longer fits the new state, in which case it wraps to 1.
    pub fn set_state(&mut self, state: AnimState) {
        self.state = state;
        if self.frame_index > max_frames(state) {
            self.frame_index = 1;
        }
    }

    /// Identifier of the frame currently shown, e.g. `hero_run2`.
    pub fn frame_name(&self) -> String {
        self.to_string()
    }

    /// Unscaled size of the frame currently shown.
    pub fn frame_size(&self) -> (f64, f64) {
        frame_size(self.prefix, self.shown.0)
    }
}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}{}", self.prefix, self.shown.0.name(), self.shown.1)
    }
}

// ── Hitbox ────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle, top-left anchored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hitbox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Hitbox {
    /// Rectangle of size `w × h` centered on `(cx, cy)`.
    pub fn centered(cx: f64, cy: f64, w: f64, h: f64) -> Self {
        Hitbox {
            x: cx - w / 2.0,
            y: cy - h / 2.0,
            w,
            h,
        }
    }

    /// Strict overlap: touching edges do not count.
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    /// Left/top inclusive, right/bottom exclusive.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }
}

// ── Hero & enemy ──────────────────────────────────────────────────────────────

/// Positions are sprite centers; edges derive from the shown frame's size.
#[derive(Clone, Debug)]
pub struct Hero {
    pub x: f64,
    pub y: f64,
    pub anim: Animation,
    pub vel_y: f64,
    pub grounded: bool,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: f64,
    pub y: f64,
    pub anim: Animation,
    /// Leftward speed per tick, fixed at spawn.
    pub speed: f64,
    pub scale: f64,
}

/// Geometry shared by hero and enemy for collision and rendering.
pub trait Sprite {
    fn center(&self) -> (f64, f64);
    fn size(&self) -> (f64, f64);
    fn animation(&self) -> &Animation;

    fn width(&self) -> f64 {
        self.size().0
    }

    fn height(&self) -> f64 {
        self.size().1
    }

    fn left(&self) -> f64 {
        self.center().0 - self.width() / 2.0
    }

    fn right(&self) -> f64 {
        self.center().0 + self.width() / 2.0
    }

    fn top(&self) -> f64 {
        self.center().1 - self.height() / 2.0
    }

    fn bottom(&self) -> f64 {
        self.center().1 + self.height() / 2.0
    }
}

impl Sprite for Hero {
    fn center(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    fn size(&self) -> (f64, f64) {
        self.anim.frame_size()
    }

    fn animation(&self) -> &Animation {
        &self.anim
    }
}

impl Sprite for Enemy {
    fn center(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    fn size(&self) -> (f64, f64) {
        let (w, h) = self.anim.frame_size();
        (w * self.scale, h * self.scale)
    }

    fn animation(&self) -> &Animation {
        &self.anim
    }
}

/// What the renderer needs to draw one entity.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteView {
    pub frame: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SpriteView {
    pub fn of<S: Sprite>(sprite: &S) -> Self {
        SpriteView {
            frame: sprite.animation().frame_name(),
            left: sprite.left(),
            top: sprite.top(),
            width: sprite.width(),
            height: sprite.height(),
        }
    }
}
