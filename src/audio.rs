use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;

use crate::game::MatchEvent;

pub const SHOOT_SOUND_PATH: &str = "assets/sounds/shoot.wav";
pub const EXPLOSION_SOUND_PATH: &str = "assets/sounds/explosion.wav";

type Clip = Buffered<Decoder<BufReader<File>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Shoot,
    Explosion,
}

/// Which sound a match event plays, and how loud
pub fn sound_for(event: &MatchEvent) -> Option<(Sound, f32)> {
    match event {
        MatchEvent::Shot => Some((Sound::Shoot, 0.2)),
        MatchEvent::HostileDestroyed { .. } => Some((Sound::Explosion, 1.0)),
        MatchEvent::PlayerHit { .. } => Some((Sound::Explosion, 0.6)),
        MatchEvent::WaveStarted { .. } | MatchEvent::GameOver { .. } => None,
    }
}

/// Audio manager for playing sound effects
pub struct AudioManager {
    /// Output device; None when no device could be opened
    output: Option<(OutputStream, OutputStreamHandle)>,
    /// Pre-loaded and buffered clips (None if loading failed)
    shoot_sound: Option<Clip>,
    explosion_sound: Option<Clip>,
}

impl AudioManager {
    /// Opens the default output and pre-loads every clip.
    /// Anything missing degrades to silence.
    pub fn new() -> Self {
        let output = match OutputStream::try_default() {
            Ok(output) => Some(output),
            Err(err) => {
                log::warn!("failed to open audio output, continuing without sound: {err}");
                None
            }
        };

        Self {
            shoot_sound: output.as_ref().and_then(|_| Self::load_or_warn(SHOOT_SOUND_PATH)),
            explosion_sound: output
                .as_ref()
                .and_then(|_| Self::load_or_warn(EXPLOSION_SOUND_PATH)),
            output,
        }
    }

    /// Manager that never plays anything
    pub fn silent() -> Self {
        Self {
            output: None,
            shoot_sound: None,
            explosion_sound: None,
        }
    }

    fn load(path: &str) -> color_eyre::Result<Clip> {
        let file = File::open(path)?;
        let source = Decoder::new(BufReader::new(file))?;
        Ok(source.buffered())
    }

    fn load_or_warn(path: &str) -> Option<Clip> {
        match Self::load(path) {
            Ok(clip) => {
                log::info!("loaded sound {path}");
                Some(clip)
            }
            Err(err) => {
                log::warn!("failed to load sound {path}: {err}");
                None
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.output.is_some()
    }

    /// Plays every sound the tick's events call for
    pub fn play_events(&self, events: &[MatchEvent]) {
        for (sound, volume) in events.iter().filter_map(sound_for) {
            self.play(sound, volume);
        }
    }

    /// Plays a sound at the given volume; silently does nothing without a device or clip
    pub fn play(&self, sound: Sound, volume: f32) {
        let Some((_, stream_handle)) = &self.output else {
            return;
        };
        let clip = match sound {
            Sound::Shoot => &self.shoot_sound,
            Sound::Explosion => &self.explosion_sound,
        };
        if let Some(clip) = clip {
            // Ignore errors for sound playback - don't want to crash the game
            if let Ok(sink) = Sink::try_new(stream_handle) {
                sink.set_volume(volume);
                // Clone the buffered source (fast - just clones references)
                sink.append(clip.clone());
                sink.detach();
            }
        }
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}
