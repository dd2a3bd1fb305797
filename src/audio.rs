//! Best-effort audio.
//!
//! The simulation only ever talks to a `SoundPlayer`.  Every failure is
//! reported through `AudioError` and dropped by the caller; nothing here can
//! stop a tick.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Jump,
    Stomp,
    Hit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AudioError {
    DeviceUnavailable,
    PlaybackFailed(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::DeviceUnavailable => write!(f, "no audio output device"),
            AudioError::PlaybackFailed(reason) => write!(f, "playback failed: {reason}"),
        }
    }
}

impl std::error::Error for AudioError {}

pub trait SoundPlayer {
    /// Fire-and-forget one-shot sound.
    fn play(&mut self, cue: Cue) -> Result<(), AudioError>;
    /// Start the looping background track.
    fn start_music(&mut self) -> Result<(), AudioError>;
    fn stop_music(&mut self) -> Result<(), AudioError>;
}

/// Player used when no audio device is wanted.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl SoundPlayer for Silent {
    fn play(&mut self, _cue: Cue) -> Result<(), AudioError> {
        Ok(())
    }

    fn start_music(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn stop_music(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
}

#[cfg(feature = "audio")]
pub use synth::Synth;

#[cfg(feature = "audio")]
mod synth {
    use std::time::Duration;

    use rodio::source::{SineWave, Source};
    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::{AudioError, Cue, SoundPlayer};

    /// Synthesized tones played through the default output device.
    pub struct Synth {
        // Dropping the stream silences everything, so it lives as long as the player.
        _stream: OutputStream,
        handle: OutputStreamHandle,
        music: Option<Sink>,
    }

    impl Synth {
        pub fn open() -> Result<Self, AudioError> {
            let (stream, handle) =
                OutputStream::try_default().map_err(|_| AudioError::DeviceUnavailable)?;
            Ok(Synth {
                _stream: stream,
                handle,
                music: None,
            })
        }

        fn sink(&self) -> Result<Sink, AudioError> {
            Sink::try_new(&self.handle).map_err(|e| AudioError::PlaybackFailed(e.to_string()))
        }
    }

    fn tone(freq: f32, millis: u64, gain: f32) -> impl Source<Item = f32> + Send {
        SineWave::new(freq)
            .take_duration(Duration::from_millis(millis))
            .amplify(gain)
    }

    impl SoundPlayer for Synth {
        fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
            let sink = self.sink()?;
            match cue {
                Cue::Jump => sink.append(tone(660.0, 90, 0.15)),
                Cue::Stomp => {
                    sink.append(tone(880.0, 60, 0.15));
                    sink.append(tone(1320.0, 80, 0.15));
                }
                Cue::Hit => {
                    sink.append(tone(220.0, 150, 0.2));
                    sink.append(tone(110.0, 250, 0.2));
                }
            }
            sink.detach();
            Ok(())
        }

        fn start_music(&mut self) -> Result<(), AudioError> {
            let sink = self.sink()?;
            let bass_line = [196.0, 196.0, 233.0, 175.0]
                .into_iter()
                .map(|freq| tone(freq, 240, 0.05))
                .collect::<Vec<_>>();
            sink.append(rodio::source::from_iter(bass_line).repeat_infinite());
            self.music = Some(sink);
            Ok(())
        }

        fn stop_music(&mut self) -> Result<(), AudioError> {
            if let Some(sink) = self.music.take() {
                sink.stop();
            }
            Ok(())
        }
    }
}
