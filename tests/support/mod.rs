#![allow(dead_code)]

use zombie_island::audio::{AudioError, Cue, SoundPlayer};

/// Records every call; optionally fails all of them.
#[derive(Debug, Default)]
pub struct RecordingPlayer {
    pub played: Vec<Cue>,
    pub music_starts: usize,
    pub music_stops: usize,
    pub fail: bool,
}

impl RecordingPlayer {
    pub fn failing() -> Self {
        RecordingPlayer {
            fail: true,
            ..Default::default()
        }
    }

    fn result(&self) -> Result<(), AudioError> {
        if self.fail {
            Err(AudioError::PlaybackFailed("test".to_string()))
        } else {
            Ok(())
        }
    }
}

impl SoundPlayer for RecordingPlayer {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        self.played.push(cue);
        self.result()
    }

    fn start_music(&mut self) -> Result<(), AudioError> {
        self.music_starts += 1;
        self.result()
    }

    fn stop_music(&mut self) -> Result<(), AudioError> {
        self.music_stops += 1;
        self.result()
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
