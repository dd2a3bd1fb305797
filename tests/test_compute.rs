mod support;

use zombie_island::compute::*;
use zombie_island::entities::*;
use zombie_island::tuning::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use support::assert_close;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Enemy standing still at `x` on the ground lane.
fn parked_enemy(x: f64) -> Enemy {
    Enemy {
        x,
        ..spawn_enemy(GROUND_LANE_Y, 0.0)
    }
}

// ── advance_animation ─────────────────────────────────────────────────────────

#[test]
fn animation_waits_for_threshold() {
    let mut anim = Animation::new(HERO_PREFIX, AnimState::Run);
    advance_animation(&mut anim, 0.05);
    advance_animation(&mut anim, 0.05);
    assert_eq!(anim.frame_index, 1);
    assert_close(anim.timer, 0.1);
    assert_eq!(anim.frame_name(), "hero_run1");
}

#[test]
fn animation_steps_and_resets_timer() {
    let mut anim = Animation::new(HERO_PREFIX, AnimState::Run);
    advance_animation(&mut anim, 0.13);
    assert_eq!(anim.frame_index, 2);
    assert_eq!(anim.timer, 0.0);
    assert_eq!(anim.frame_name(), "hero_run2");
}

#[test]
fn animation_wraps_to_first_frame() {
    let mut anim = Animation::new(HERO_PREFIX, AnimState::Run);
    let seen: Vec<u8> = (0..4)
        .map(|_| {
            advance_animation(&mut anim, 0.13);
            anim.frame_index
        })
        .collect();
    assert_eq!(seen, vec![2, 3, 1, 2]);
}

#[test]
fn animation_state_switch_shows_on_next_step() {
    let mut anim = Animation::new(HERO_PREFIX, AnimState::Run);
    anim.set_state(AnimState::Idle);
    assert_eq!(anim.frame_name(), "hero_run1");
    advance_animation(&mut anim, 0.13);
    assert_eq!(anim.frame_name(), "hero_idle2");
}

#[test]
fn frame_index_stays_in_bounds_across_state_switches() {
    let mut anim = Animation::new(HERO_PREFIX, AnimState::Run);
    let mut rng = seeded_rng();
    for _ in 0..500 {
        if rng.gen_bool(0.2) {
            let state = if rng.gen_bool(0.5) {
                AnimState::Run
            } else {
                AnimState::Idle
            };
            anim.set_state(state);
        }
        advance_animation(&mut anim, rng.gen_range(0.0..0.2));
        assert!(anim.frame_index >= 1 && anim.frame_index <= max_frames(anim.state));
    }
}

// ── apply_physics ─────────────────────────────────────────────────────────────

#[test]
fn physics_airborne_adds_gravity() {
    let mut hero = spawn_hero();
    hero.y = 300.0;
    hero.vel_y = -5.0;
    let event = apply_physics(&mut hero, Input::default());
    assert_eq!(event, HeroEvent::None);
    assert_eq!(hero.vel_y, -5.0 + GRAVITY);
    assert_close(hero.y, 300.0 + (-5.0 + GRAVITY));
    assert!(!hero.grounded);
    assert_eq!(hero.anim.state, AnimState::Idle);
}

#[test]
fn physics_clamps_to_ground() {
    let mut hero = spawn_hero();
    hero.vel_y = 3.0;
    apply_physics(&mut hero, Input::default());
    assert!(hero.grounded);
    assert_eq!(hero.vel_y, 0.0);
    assert_close(hero.bottom(), GROUND_LINE);
    assert_eq!(hero.anim.state, AnimState::Run);
}

#[test]
fn physics_jump_only_when_grounded() {
    let mut hero = spawn_hero();
    hero.y = 200.0;
    let event = apply_physics(&mut hero, Input { jump: true });
    assert_eq!(event, HeroEvent::None);
    assert!(hero.vel_y > 0.0);

    let mut hero = spawn_hero();
    let event = apply_physics(&mut hero, Input { jump: true });
    assert_eq!(event, HeroEvent::Jumped);
    assert_eq!(hero.vel_y, JUMP_IMPULSE);
}

#[test]
fn holding_jump_bounces_repeatedly() {
    let mut hero = spawn_hero();
    let jumps = (0..300)
        .filter(|_| apply_physics(&mut hero, Input { jump: true }) == HeroEvent::Jumped)
        .count();
    assert!(jumps >= 3, "only {jumps} jumps");
}

#[test]
fn hero_never_sinks_below_ground() {
    let mut hero = spawn_hero();
    let mut rng = seeded_rng();
    for _ in 0..2000 {
        let previous = hero.vel_y;
        apply_physics(&mut hero, Input { jump: rng.gen_bool(0.1) });
        advance_animation(&mut hero.anim, 1.0 / 60.0);
        assert!(hero.bottom() <= GROUND_LINE + 1e-9);
        if hero.vel_y != JUMP_IMPULSE {
            if hero.grounded {
                assert_eq!(hero.vel_y, 0.0);
            } else {
                assert_eq!(hero.vel_y, previous + GRAVITY);
            }
        }
    }
}

// ── Enemy motion ──────────────────────────────────────────────────────────────

#[test]
fn enemy_moves_left_by_speed() {
    let mut enemy = spawn_enemy(GROUND_LANE_Y, 6.5);
    advance_enemy(&mut enemy);
    advance_enemy(&mut enemy);
    assert_close(enemy.x, ENEMY_SPAWN_X - 13.0);
    assert_eq!(enemy.y, GROUND_LANE_Y);
}

#[test]
fn enemy_off_screen_only_when_right_edge_passes_zero() {
    // Scaled enemy is 48 wide.
    assert!(is_off_screen(&parked_enemy(-25.0)));
    assert!(!is_off_screen(&parked_enemy(-23.0)));
    assert!(!is_off_screen(&parked_enemy(ENEMY_SPAWN_X)));
}

// ── Spawning ──────────────────────────────────────────────────────────────────

#[test]
fn spawn_roll_hits_zero_and_one_only() {
    assert!(spawn_roll_hits(0));
    assert!(spawn_roll_hits(1));
    assert!(!spawn_roll_hits(2));
    assert!(!spawn_roll_hits(99));
}

#[test]
fn spawn_rate_is_about_two_percent() {
    let mut rng = seeded_rng();
    let hits = (0..100_000)
        .filter(|_| roll_spawn(&mut rng, 0, BASE_SPEED).is_some())
        .count();
    assert!((1_500..2_500).contains(&hits), "{hits} spawns");
}

#[test]
fn spawn_respects_cap() {
    let mut rng = seeded_rng();
    assert!((0..10_000).all(|_| roll_spawn(&mut rng, SPAWN_CAP, BASE_SPEED).is_none()));
}

#[test]
fn spawned_enemy_uses_lane_and_speed() {
    let mut rng = seeded_rng();
    let spawned: Vec<Enemy> = (0..50_000)
        .filter_map(|_| roll_spawn(&mut rng, 1, 7.5))
        .collect();
    assert!(!spawned.is_empty());
    for enemy in &spawned {
        assert_eq!(enemy.x, ENEMY_SPAWN_X);
        assert!(enemy.y == GROUND_LANE_Y || enemy.y == ELEVATED_LANE_Y);
        assert_eq!(enemy.speed, 7.5);
        assert_eq!(enemy.scale, ENEMY_SCALE);
        assert_eq!(enemy.anim.frame_name(), "enemy_walk1");
    }
    assert!(spawned.iter().any(|e| e.y == GROUND_LANE_Y));
    assert!(spawned.iter().any(|e| e.y == ELEVATED_LANE_Y));
}

// ── Difficulty ────────────────────────────────────────────────────────────────

#[test]
fn difficulty_steps_every_thousand_points() {
    assert_eq!(difficulty_speed(0.0), 4.5);
    assert_eq!(difficulty_speed(999.9), 4.5);
    assert_eq!(difficulty_speed(1000.0), 5.5);
    assert_eq!(difficulty_speed(2500.0), 6.5);
}

// ── Hitboxes & contact ────────────────────────────────────────────────────────

#[test]
fn hitbox_is_shrunk_around_center() {
    let hero = spawn_hero(); // 60 × 80 at (150, 500)
    let hb = hitbox(&hero);
    assert_close(hb.w, 30.0);
    assert_close(hb.h, 64.0);
    assert_close(hb.x, 135.0);
    assert_close(hb.y, 468.0);
}

#[test]
fn descending_onto_enemy_is_a_stomp() {
    let enemy = parked_enemy(150.0);
    let mut hero = spawn_hero();
    hero.vel_y = 5.0;
    hero.y = enemy.y + 5.0 - hero.height() / 2.0; // bottom = center_y + 5
    assert_eq!(contact(&hero, &enemy), Contact::Stomp);
}

#[test]
fn side_touch_is_fatal() {
    let enemy = parked_enemy(170.0);
    let hero = spawn_hero();
    assert_eq!(hero.vel_y, 0.0);
    assert_eq!(contact(&hero, &enemy), Contact::Fatal);
}

#[test]
fn rising_into_enemy_is_fatal() {
    let enemy = parked_enemy(150.0);
    let mut hero = spawn_hero();
    hero.vel_y = -5.0;
    hero.y = enemy.y + 5.0 - hero.height() / 2.0;
    assert_eq!(contact(&hero, &enemy), Contact::Fatal);
}

#[test]
fn descending_too_low_is_fatal() {
    let enemy = parked_enemy(150.0);
    let mut hero = spawn_hero();
    hero.vel_y = 5.0;
    hero.y = enemy.y + 15.0 - hero.height() / 2.0; // feet past the tolerance
    assert_eq!(contact(&hero, &enemy), Contact::Fatal);
}

#[test]
fn sprite_overlap_without_hitbox_overlap_is_clear() {
    // Sprites overlap by 10 units horizontally, shrunk hitboxes don't.
    let hero = spawn_hero(); // sprite 120..180
    let enemy = parked_enemy(180.0 + 24.0 - 10.0); // sprite 170..218
    assert!(enemy.left() < hero.right());
    assert_eq!(contact(&hero, &enemy), Contact::Clear);
}
