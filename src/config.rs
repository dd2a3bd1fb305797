use std::{env, path::PathBuf, time::Duration};

// Runtime constants (not gameplay tuning).

/// One simulation tick per rendered frame.  Physics is per tick, so this
/// also sets the game speed.
pub const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// Longest `dt` fed to a single update, so a stalled terminal doesn't dump
/// seconds of score at once.
pub const MAX_FRAME_DT: f64 = 0.1;

/// A key counts as held if its last press/repeat arrived within this many
/// frames.  Covers terminals that never report key releases.
pub const HOLD_WINDOW: u64 = 8;

/// Where to write logs.  The terminal belongs to the renderer, so without
/// this logs are discarded.
pub fn log_path() -> Option<PathBuf> {
    env::var_os("ZOMBIE_ISLAND_LOG")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Audio starts on unless `ZOMBIE_ISLAND_AUDIO=off`.
pub fn audio_enabled() -> bool {
    parse_audio_flag(env::var("ZOMBIE_ISLAND_AUDIO").ok().as_deref())
}

pub fn parse_audio_flag(value: Option<&str>) -> bool {
    !matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("off" | "0" | "false" | "no")
    )
}
