//! Per-entity game logic.
//!
//! These functions mutate one entity (or return a fresh one) and never touch
//! the session.  Randomness comes through an injected `Rng`, so callers
//! control determinism (tests use a seeded `StdRng`).

use rand::Rng;

use crate::entities::{AnimState, Animation, Enemy, Hero, Hitbox, Input, Sprite};
use crate::tuning::{
    max_frames, ANIMATION_SPEED, BASE_SPEED, ELEVATED_LANE_Y, ENEMY_PREFIX, ENEMY_SCALE,
    ENEMY_SPAWN_X, GRAVITY, GROUND_LANE_Y, GROUND_LINE, HERO_PREFIX, HERO_SPAWN,
    HITBOX_HEIGHT_FACTOR, HITBOX_WIDTH_FACTOR, JUMP_IMPULSE, SCORE_PER_SPEED_STEP, SPAWN_CAP,
    SPAWN_ROLL_RANGE, SPAWN_ROLL_THRESHOLD, STOMP_TOLERANCE,
};

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn spawn_hero() -> Hero {
    Hero {
        x: HERO_SPAWN.0,
        y: HERO_SPAWN.1,
        anim: Animation::new(HERO_PREFIX, AnimState::Run),
        vel_y: 0.0,
        grounded: false,
    }
}

pub fn spawn_enemy(y: f64, speed: f64) -> Enemy {
    Enemy {
        x: ENEMY_SPAWN_X,
        y,
        anim: Animation::new(ENEMY_PREFIX, AnimState::Walk),
        speed,
        scale: ENEMY_SCALE,
    }
}

// ── Animation ────────────────────────────────────────────────────────────────

/// Accumulate `dt`; once the timer reaches `ANIMATION_SPEED`, reset it and
/// step to the next frame (1 → max → 1).
pub fn advance_animation(anim: &mut Animation, dt: f64) {
    anim.timer += dt;
    if anim.timer >= ANIMATION_SPEED {
        anim.timer = 0.0;
        anim.frame_index = anim.frame_index % max_frames(anim.state) + 1;
        anim.shown = (anim.state, anim.frame_index);
    }
}

// ── Hero ─────────────────────────────────────────────────────────────────────

/// What happened to the hero this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeroEvent {
    None,
    Jumped,
}

/// Integrate one tick of vertical motion, clamp to the ground and apply the
/// jump.  The jump is level-triggered: holding it bounces on every grounded
/// tick.
pub fn apply_physics(hero: &mut Hero, input: Input) -> HeroEvent {
    hero.vel_y += GRAVITY;
    hero.y += hero.vel_y;

    if hero.bottom() > GROUND_LINE {
        hero.y = GROUND_LINE - hero.height() / 2.0;
        hero.vel_y = 0.0;
        hero.grounded = true;
        hero.anim.set_state(AnimState::Run);
    } else {
        hero.grounded = false;
        hero.anim.set_state(AnimState::Idle);
    }

    if input.jump && hero.grounded {
        hero.vel_y = JUMP_IMPULSE;
        HeroEvent::Jumped
    } else {
        HeroEvent::None
    }
}

// ── Enemy ────────────────────────────────────────────────────────────────────

pub fn advance_enemy(enemy: &mut Enemy) {
    enemy.x -= enemy.speed;
}

/// Fully past the left edge of the screen.
pub fn is_off_screen(enemy: &Enemy) -> bool {
    enemy.right() < 0.0
}

// ── Spawning ─────────────────────────────────────────────────────────────────

/// A roll from `0..SPAWN_ROLL_RANGE` that triggers a spawn.
pub fn spawn_roll_hits(roll: u32) -> bool {
    roll < SPAWN_ROLL_THRESHOLD
}

/// Roll for a new enemy.  Returns `None` when the roll misses or the roster
/// is already at `SPAWN_CAP`.
pub fn roll_spawn(rng: &mut impl Rng, live: usize, speed: f64) -> Option<Enemy> {
    if !spawn_roll_hits(rng.gen_range(0..SPAWN_ROLL_RANGE)) || live >= SPAWN_CAP {
        return None;
    }
    let y = if rng.gen_bool(0.5) {
        GROUND_LANE_Y
    } else {
        ELEVATED_LANE_Y
    };
    Some(spawn_enemy(y, speed))
}

// ── Difficulty ───────────────────────────────────────────────────────────────

/// Enemy speed for a given score: a step function rising by one every
/// `SCORE_PER_SPEED_STEP` points.
pub fn difficulty_speed(score: f64) -> f64 {
    BASE_SPEED + (score / SCORE_PER_SPEED_STEP).floor()
}

// ── Collision ────────────────────────────────────────────────────────────────

/// Collision rectangle: half the sprite's width, 80% of its height, centered
/// on the sprite.
pub fn hitbox<S: Sprite>(sprite: &S) -> Hitbox {
    let (cx, cy) = sprite.center();
    Hitbox::centered(
        cx,
        cy,
        sprite.width() * HITBOX_WIDTH_FACTOR,
        sprite.height() * HITBOX_HEIGHT_FACTOR,
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Contact {
    /// Hitboxes do not overlap.
    Clear,
    /// Hero lands on the enemy from above: enemy dies, hero bounces.
    Stomp,
    /// Any other overlap: hero dies.
    Fatal,
}

/// Classify the contact between hero and enemy.  Stomp is checked first.
pub fn contact(hero: &Hero, enemy: &Enemy) -> Contact {
    if !hitbox(hero).overlaps(&hitbox(enemy)) {
        return Contact::Clear;
    }
    if hero.vel_y > 0.0 && hero.bottom() < enemy.y + STOMP_TOLERANCE {
        Contact::Stomp
    } else {
        Contact::Fatal
    }
}
