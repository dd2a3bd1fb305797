//! One playthrough: hero, enemies, score and the MENU → PLAYING → GAME_OVER
//! state machine.
//!
//! All mutation happens inside `update`, in a fixed order, on a single
//! thread.  The renderer reads the session only between updates.

use rand::Rng;
use tracing::{debug, info, trace};

use crate::audio::{Cue, SoundPlayer};
use crate::compute::{
    advance_animation, advance_enemy, apply_physics, contact, difficulty_speed, is_off_screen,
    roll_spawn, spawn_hero, Contact, HeroEvent,
};
use crate::entities::{Enemy, Hero, Input, Phase, SpriteView};
use crate::menu::{button_at, MenuAction};
use crate::tuning::{BASE_SPEED, SCORE_PER_SECOND, STOMP_BONUS, STOMP_BOUNCE};

#[derive(Clone, Debug)]
pub struct GameSession {
    pub hero: Hero,
    /// Live enemies in spawn order.
    pub enemies: Vec<Enemy>,
    pub score: f64,
    /// Speed given to newly spawned enemies.
    pub difficulty_speed: f64,
    pub phase: Phase,
    pub audio_enabled: bool,
    /// The background loop is currently playing.
    pub music_started: bool,
}

impl GameSession {
    pub fn new(audio_enabled: bool) -> Self {
        GameSession {
            hero: spawn_hero(),
            enemies: Vec::new(),
            score: 0.0,
            difficulty_speed: BASE_SPEED,
            phase: Phase::Menu,
            audio_enabled,
            music_started: false,
        }
    }

    /// Start a fresh run and enter PLAYING.
    pub fn reset(&mut self) {
        self.score = 0.0;
        self.difficulty_speed = BASE_SPEED;
        self.enemies.clear();
        self.hero = spawn_hero();
        self.phase = Phase::Playing;
        info!("run started");
    }

    /// GAME_OVER → MENU.  Ignored in any other phase.
    pub fn acknowledge(&mut self) {
        if self.phase == Phase::GameOver {
            self.phase = Phase::Menu;
            info!("back to menu");
        }
    }

    pub fn toggle_audio(&mut self, sounds: &mut dyn SoundPlayer) {
        self.audio_enabled = !self.audio_enabled;
        info!(audio_enabled = self.audio_enabled, "audio toggled");
        self.handle_music(sounds);
    }

    /// Menu click at world coordinates.  Start and audio toggles are applied
    /// here; the chosen action is returned so the caller can act on `Exit`.
    pub fn click(&mut self, x: f64, y: f64, sounds: &mut dyn SoundPlayer) -> Option<MenuAction> {
        if self.phase != Phase::Menu {
            return None;
        }
        let action = button_at(x, y)?;
        match action {
            MenuAction::Start => self.reset(),
            MenuAction::ToggleAudio => self.toggle_audio(sounds),
            MenuAction::Exit => {}
        }
        Some(action)
    }

    /// Keep the background loop in line with `audio_enabled`.  A failed start
    /// is retried on the next call.
    pub fn handle_music(&mut self, sounds: &mut dyn SoundPlayer) {
        if self.audio_enabled && !self.music_started {
            match sounds.start_music() {
                Ok(()) => self.music_started = true,
                Err(err) => trace!(%err, "music start failed"),
            }
        } else if !self.audio_enabled && self.music_started {
            if let Err(err) = sounds.stop_music() {
                trace!(%err, "music stop failed");
            }
            self.music_started = false;
        }
    }

    /// Advance the whole game by one frame of `dt` seconds.
    pub fn update(
        &mut self,
        dt: f64,
        input: Input,
        rng: &mut impl Rng,
        sounds: &mut dyn SoundPlayer,
    ) {
        self.handle_music(sounds);

        if self.phase != Phase::Playing {
            return;
        }

        self.add_score(dt * SCORE_PER_SECOND);

        if apply_physics(&mut self.hero, input) == HeroEvent::Jumped {
            cue(self.audio_enabled, sounds, Cue::Jump);
        }
        advance_animation(&mut self.hero.anim, dt);

        if let Some(enemy) = roll_spawn(rng, self.enemies.len(), self.difficulty_speed) {
            debug!(y = enemy.y, speed = enemy.speed, "enemy spawned");
            self.enemies.push(enemy);
        }

        self.step_enemies(dt, sounds);
    }

    /// Move, animate, collide and despawn every live enemy.
    pub fn step_enemies(&mut self, dt: f64, sounds: &mut dyn SoundPlayer) {
        let audio_enabled = self.audio_enabled;
        let was_playing = self.phase == Phase::Playing;
        let hero = &mut self.hero;
        let phase = &mut self.phase;
        let mut bonus = 0.0;

        self.enemies.retain_mut(|enemy| {
            advance_enemy(enemy);
            advance_animation(&mut enemy.anim, dt);

            if *phase == Phase::Playing {
                match contact(hero, enemy) {
                    Contact::Stomp => {
                        hero.vel_y = STOMP_BOUNCE;
                        bonus += STOMP_BONUS;
                        cue(audio_enabled, sounds, Cue::Stomp);
                        debug!(x = enemy.x, y = enemy.y, "enemy stomped");
                        return false;
                    }
                    Contact::Fatal => {
                        *phase = Phase::GameOver;
                        cue(audio_enabled, sounds, Cue::Hit);
                    }
                    Contact::Clear => {}
                }
            }

            if is_off_screen(enemy) {
                debug!(y = enemy.y, "enemy left the screen");
                return false;
            }
            true
        });

        if bonus > 0.0 {
            self.add_score(bonus);
        }
        if was_playing && self.phase == Phase::GameOver {
            info!(score = self.score as u64, "game over");
        }
    }

    fn add_score(&mut self, points: f64) {
        self.score += points;
        self.difficulty_speed = difficulty_speed(self.score);
    }

    /// Hero first, then enemies in spawn order.
    pub fn sprites(&self) -> Vec<SpriteView> {
        std::iter::once(SpriteView::of(&self.hero))
            .chain(self.enemies.iter().map(SpriteView::of))
            .collect()
    }

    /// Score as shown on screen.
    pub fn display_score(&self) -> u64 {
        self.score as u64
    }
}

/// Play a sound if audio is on.  Failures are dropped.
fn cue(audio_enabled: bool, sounds: &mut dyn SoundPlayer, which: Cue) {
    if !audio_enabled {
        return;
    }
    if let Err(err) = sounds.play(which) {
        trace!(%err, cue = ?which, "sound failed");
    }
}
