//! Audio requests and voice-pool mixer
//!
//! Gameplay fires sound requests through [`AudioRequester`] and never waits on
//! them. The [`Mixer`] drains the queued requests once per step onto a fixed
//! pool of voices, runs fades, and drives whatever backend implements
//! [`VoiceSink`]. Backends report voice lifecycle through [`VoiceCallback`].

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::settings::AudioSettings;

/// Voices that can play at once
pub const MAX_VOICES: usize = 16;
/// Requests accepted per step
pub const MAX_QUEUED_SOUNDS: usize = 32;

/// Sound assets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Background music loop
    Music,
    /// Heartbeat loop under the music
    Heartbeat,
    /// Player touched a T-Cell
    Death,
    /// Maggot collected
    Maggot,
}

impl SoundEffect {
    /// Asset name a backend can resolve to sample data
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::Music => "music",
            SoundEffect::Heartbeat => "heartbeat",
            SoundEffect::Death => "death",
            SoundEffect::Maggot => "maggot",
        }
    }
}

/// Playback options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayFlags {
    pub looping: bool,
    pub fade_in: bool,
    pub fade_out: bool,
}

impl PlayFlags {
    /// One-shot at full volume
    pub const NONE: Self = Self {
        looping: false,
        fade_in: false,
        fade_out: false,
    };
    /// Loop forever, fading in from silence
    pub const LOOP_FADE_IN: Self = Self {
        looping: true,
        fade_in: true,
        fade_out: false,
    };
}

/// Handle of a requested sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundId(pub u32);

/// Fire-and-forget sound interface used by gameplay
pub trait AudioRequester {
    /// Queue a sound. The id may be ignored.
    fn play(&mut self, sound: SoundEffect, volume: f32, flags: PlayFlags) -> SoundId;
    /// Stop a sound, optionally fading it out
    fn stop(&mut self, id: SoundId, fade: bool);
}

/// Lifecycle notifications a backend sends for one voice
pub trait VoiceCallback {
    fn on_buffer_start(&mut self);
    fn on_buffer_end(&mut self) {}
    fn on_stream_end(&mut self);
    fn on_error(&mut self, _reason: &str) {}
}

/// Audio backend driven by the mixer
pub trait VoiceSink {
    /// Queue sample data on a voice and start it
    fn submit(&mut self, voice: usize, sound: SoundEffect, looping: bool) -> Result<()>;
    fn set_volume(&mut self, voice: usize, volume: f32);
    fn stop(&mut self, voice: usize);
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum RequestKind {
    Play { sound: SoundEffect, volume: f32 },
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SoundRequest {
    id: SoundId,
    kind: RequestKind,
    flags: PlayFlags,
}

/// Playback state of one voice
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Voice {
    pub sound_id: Option<SoundId>,
    pub volume: f32,
    pub fade_in_duration: f32,
    pub fade_out_duration: f32,
    fade_in_timer: f32,
    fade_out_timer: f32,
    pub fading_in: bool,
    pub fading_out: bool,
    pub is_playing: bool,
}

impl Voice {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl VoiceCallback for Voice {
    fn on_buffer_start(&mut self) {
        self.is_playing = true;
    }

    fn on_stream_end(&mut self) {
        self.is_playing = false;
    }

    fn on_error(&mut self, reason: &str) {
        log::warn!("voice error on {:?}: {reason}", self.sound_id);
    }
}

/// Bounded voice pool
pub struct Mixer {
    settings: AudioSettings,
    voices: Vec<Voice>,
    queue: Vec<SoundRequest>,
    next_id: u32,
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new(AudioSettings::default())
    }
}

impl Mixer {
    pub fn new(settings: AudioSettings) -> Self {
        Self {
            settings,
            voices: vec![Voice::default(); MAX_VOICES],
            queue: Vec::with_capacity(MAX_QUEUED_SOUNDS),
            next_id: 0,
        }
    }

    pub fn settings(&self) -> &AudioSettings {
        &self.settings
    }

    /// Set master volume (0.0 - 1.0). Takes effect on the next fade update or play.
    pub fn set_master_volume(&mut self, volume: f32) {
        self.settings.master_volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Voice handle for backend callbacks
    pub fn voice_mut(&mut self, index: usize) -> Option<&mut Voice> {
        self.voices.get_mut(index)
    }

    /// Requests waiting for the next `push_sounds`
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn enqueue(&mut self, request: SoundRequest) {
        if self.queue.len() >= MAX_QUEUED_SOUNDS {
            log::warn!("sound queue full, dropping {:?}", request.kind);
            return;
        }
        self.queue.push(request);
    }

    /// Drain queued requests onto voices and advance fades by `dt`.
    ///
    /// A play request with no free voice is dropped.
    pub fn push_sounds(&mut self, sink: &mut dyn VoiceSink, dt: f32) {
        let master = self.settings.effective_master_volume();

        for request in std::mem::take(&mut self.queue) {
            match request.kind {
                RequestKind::Play { sound, volume } => {
                    let Some(index) = self.voices.iter().position(|v| !v.is_playing) else {
                        log::debug!("no free voice for {sound:?}, dropping");
                        continue;
                    };
                    if let Err(e) = sink.submit(index, sound, request.flags.looping) {
                        log::warn!("{e}");
                        continue;
                    }
                    log::debug!("play {sound:?} on voice {index}");

                    let voice = &mut self.voices[index];
                    *voice = Voice {
                        sound_id: Some(request.id),
                        volume,
                        fade_in_duration: self.settings.fade_in_duration,
                        fade_out_duration: self.settings.fade_out_duration,
                        fading_in: request.flags.fade_in,
                        fading_out: request.flags.fade_out,
                        is_playing: true,
                        ..Default::default()
                    };
                    if !voice.fading_in {
                        sink.set_volume(index, master * volume);
                    }
                }
                RequestKind::Stop => {
                    let Some(index) = self
                        .voices
                        .iter()
                        .position(|v| v.is_playing && v.sound_id == Some(request.id))
                    else {
                        continue;
                    };
                    if request.flags.fade_out {
                        let voice = &mut self.voices[index];
                        voice.fading_out = true;
                        voice.fade_out_timer = 0.0;
                    } else {
                        sink.stop(index);
                        sink.set_volume(index, master);
                        self.voices[index].reset();
                    }
                }
            }
        }

        for (index, voice) in self.voices.iter_mut().enumerate() {
            if voice.fading_in {
                voice.fade_in_timer += dt;
                if voice.fade_in_timer >= voice.fade_in_duration {
                    voice.fade_in_timer = voice.fade_in_duration;
                    voice.fading_in = false;
                }
                let fade = fade_ratio(voice.fade_in_timer, voice.fade_in_duration);
                sink.set_volume(index, master * voice.volume * fade);
                // Fade out waits for the fade in to finish
                continue;
            }

            if voice.fading_out {
                voice.fade_out_timer += dt;
                if voice.fade_out_timer >= voice.fade_out_duration {
                    voice.fade_out_timer = voice.fade_out_duration;
                }
                let fade = 1.0 - fade_ratio(voice.fade_out_timer, voice.fade_out_duration);
                sink.set_volume(index, master * voice.volume * fade);

                if fade <= 0.0 {
                    sink.stop(index);
                    sink.set_volume(index, master);
                    voice.reset();
                }
            }
        }
    }
}

/// `timer / duration`, treating a zero-length fade as already complete
fn fade_ratio(timer: f32, duration: f32) -> f32 {
    if duration > 0.0 { timer / duration } else { 1.0 }
}

impl AudioRequester for Mixer {
    fn play(&mut self, sound: SoundEffect, volume: f32, flags: PlayFlags) -> SoundId {
        let id = SoundId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.enqueue(SoundRequest {
            id,
            kind: RequestKind::Play { sound, volume },
            flags,
        });
        id
    }

    fn stop(&mut self, id: SoundId, fade: bool) {
        self.enqueue(SoundRequest {
            id,
            kind: RequestKind::Stop,
            flags: PlayFlags {
                fade_out: fade,
                ..PlayFlags::NONE
            },
        });
    }
}

/// Start the music and heartbeat loops
pub fn start_ambience(audio: &mut dyn AudioRequester) -> (SoundId, SoundId) {
    let music = audio.play(SoundEffect::Music, 1.0, PlayFlags::LOOP_FADE_IN);
    let heartbeat = audio.play(SoundEffect::Heartbeat, 0.75, PlayFlags::LOOP_FADE_IN);
    (music, heartbeat)
}
