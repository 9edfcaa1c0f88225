//! Sound cues
//!
//! Maps frame events to sound effects and forwards them to whatever output the
//! platform provides. Synthesis itself lives outside this crate; without an
//! output device every cue is silently dropped.

use crate::platform::EventSink;
use crate::sim::{FrameEvent, GamePhase};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fires
    Shoot,
    /// An enemy fires
    EnemyShoot,
    /// Swarm enemy destroyed
    InvaderKilled,
    /// Bonus craft appears (start of its drone)
    BonusDrone,
    /// Bonus craft destroyed
    BonusKilled,
    /// Player ship destroyed
    PlayerExplode,
    /// Wave cleared
    WaveClear,
    /// Swarm march tempo for the given speed stage
    MarchTempo(u8),
    /// Run started
    Start,
    /// Game over
    GameOver,
}

/// Sound cue for a frame event, if it has one
pub fn cue_for(event: &FrameEvent) -> Option<SoundEffect> {
    Some(match event {
        FrameEvent::PlayerFired => SoundEffect::Shoot,
        FrameEvent::EnemyFired => SoundEffect::EnemyShoot,
        FrameEvent::EnemyKilled { .. } => SoundEffect::InvaderKilled,
        FrameEvent::BonusSpawned => SoundEffect::BonusDrone,
        FrameEvent::BonusKilled => SoundEffect::BonusKilled,
        FrameEvent::PlayerHit { .. } => SoundEffect::PlayerExplode,
        FrameEvent::WaveAdvanced { .. } => SoundEffect::WaveClear,
        FrameEvent::SpeedStageChanged { stage } => SoundEffect::MarchTempo(*stage),
        FrameEvent::PhaseChanged {
            phase: GamePhase::Playing,
        } => SoundEffect::Start,
        FrameEvent::PhaseChanged {
            phase: GamePhase::GameOver,
        } => SoundEffect::GameOver,
        FrameEvent::PhaseChanged {
            phase: GamePhase::Title,
        } => return None,
    })
}

/// Something that can actually make noise
pub trait SoundOutput {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Output that just records what it was asked to play
#[derive(Debug, Clone, Default)]
pub struct CueLog {
    pub played: Vec<(SoundEffect, f32)>,
}

impl SoundOutput for CueLog {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::trace!("cue {effect:?} @ {volume:.2}");
        self.played.push((effect, volume));
    }
}

/// Audio manager for the game
pub struct AudioManager<O: SoundOutput> {
    output: Option<O>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<O: SoundOutput> AudioManager<O> {
    /// `None` means no device is available; the manager then does nothing
    pub fn new(output: Option<O>) -> Self {
        if output.is_none() {
            log::warn!("No audio output available - audio disabled");
        }
        Self {
            output,
            master_volume: 0.8,
            sfx_volume: 1.0,
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

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(output) = self.output.as_mut() else {
            return;
        };
        output.play(effect, vol);
    }

    pub fn output(&self) -> Option<&O> {
        self.output.as_ref()
    }
}

impl<O: SoundOutput> EventSink for AudioManager<O> {
    fn handle(&mut self, events: &[FrameEvent]) {
        for effect in events.iter().filter_map(cue_for) {
            self.play(effect);
        }
    }
}
