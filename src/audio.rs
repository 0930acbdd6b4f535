//! Sound cues
//!
//! The simulation never plays audio itself. Tick events map to cues, and an
//! [`AudioSink`] supplied by the platform plays them fire-and-forget.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Looping background track, started with the scene
    BackgroundMusic,
    /// Coin collected
    CoinPickup,
    /// Game over
    GameOver,
}

impl SoundEffect {
    /// Bundled asset file for this cue
    pub fn asset(&self) -> &'static str {
        match self {
            SoundEffect::BackgroundMusic => "2DGameMusic.mp3",
            SoundEffect::CoinPickup => "CoinSoundEffect.wav",
            SoundEffect::GameOver => "GameOverSoundEffect.wav",
        }
    }

    /// Whether the cue loops until stopped
    pub fn looping(&self) -> bool {
        matches!(self, SoundEffect::BackgroundMusic)
    }
}

/// Cue for a simulation event, if it has one
pub fn cue_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::CoinCollected { .. } => Some(SoundEffect::CoinPickup),
        GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
        GameEvent::EnemyExpired { .. } => None,
    }
}

/// Platform audio output
pub trait AudioSink {
    /// Start a sound at `volume` (0.0 - 1.0); never blocks
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Sink that only logs cues (headless runs, tests)
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::info!("♪ {} (volume {:.2})", effect.asset(), volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume for a cue
    fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if effect.looping() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        self.master_volume * channel
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(effect);
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Start the looping background track
    pub fn start_music(&mut self) {
        self.play(SoundEffect::BackgroundMusic);
    }

    /// Play the cue of every event in order
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(cue_for) {
            self.play(effect);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
