//! Audio output
//!
//! Procedurally generated sound effects - no external files needed. Each
//! effect is rendered once into a sample clip at startup; playing an effect
//! just queues a cursor into the shared mixer that the cpal callback drains.

use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, SampleRate, StreamConfig};

const SAMPLE_RATE: u32 = 44_100;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Laser fired
    LaserShot,
    /// Meteor destroyed by a laser
    Explosion,
    /// Fatal collision, run over
    GameOver,
}

/// A playing clip: shared samples plus a read cursor.
struct Voice {
    clip: Arc<Vec<f32>>,
    cursor: usize,
}

/// State shared with the audio callback.
struct Mixer {
    voices: Vec<Voice>,
    volume: f32,
}

impl Mixer {
    /// Mix all active voices into one mono sample and advance cursors.
    fn next_sample(&mut self) -> f32 {
        let mut sum = 0.0;
        for voice in &mut self.voices {
            sum += voice.clip[voice.cursor];
            voice.cursor += 1;
        }
        self.voices.retain(|v| v.cursor < v.clip.len());
        (sum * self.volume).clamp(-1.0, 1.0)
    }
}

/// Audio manager for the game
pub struct AudioManager {
    mixer: Arc<Mutex<Mixer>>,
    laser_clip: Arc<Vec<f32>>,
    explosion_clip: Arc<Vec<f32>>,
    game_over_clip: Arc<Vec<f32>>,
    muted: bool,
    master_volume: f32,
    // Dropping the stream stops playback
    _stream: Option<cpal::Stream>,
}

impl AudioManager {
    /// Open the default output device. A missing device degrades to silence
    /// with a warning; the game runs on.
    pub fn new(master_volume: f32, muted: bool) -> Self {
        let mixer = Arc::new(Mutex::new(Mixer {
            voices: Vec::new(),
            volume: if muted { 0.0 } else { master_volume },
        }));

        let stream = Self::open_stream(mixer.clone());
        if stream.is_none() {
            log::warn!("no audio output device - sound disabled");
        }

        Self {
            mixer,
            laser_clip: Arc::new(render_laser()),
            explosion_clip: Arc::new(render_explosion()),
            game_over_clip: Arc::new(render_game_over()),
            muted,
            master_volume,
            _stream: stream,
        }
    }

    fn open_stream(mixer: Arc<Mutex<Mixer>>) -> Option<cpal::Stream> {
        let host = cpal::default_host();
        let device = host.default_output_device()?;
        let config = StreamConfig {
            channels: 2,
            sample_rate: SampleRate(SAMPLE_RATE),
            buffer_size: BufferSize::Default,
        };

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _| {
                    let mut mixer = match mixer.lock() {
                        Ok(m) => m,
                        Err(_) => return,
                    };
                    for frame in data.chunks_mut(2) {
                        let sample = mixer.next_sample();
                        for out in frame {
                            *out = sample;
                        }
                    }
                },
                |err| log::error!("audio stream error: {err}"),
                None,
            )
            .map_err(|err| log::warn!("failed to build audio stream: {err}"))
            .ok()?;
        stream
            .play()
            .map_err(|err| log::warn!("failed to start audio stream: {err}"))
            .ok()?;
        Some(stream)
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.sync_volume();
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.sync_volume();
    }

    fn sync_volume(&self) {
        if let Ok(mut mixer) = self.mixer.lock() {
            mixer.volume = if self.muted { 0.0 } else { self.master_volume };
        }
    }

    /// Queue a sound effect.
    pub fn play(&self, effect: SoundEffect) {
        if self.muted || self._stream.is_none() {
            return;
        }
        let clip = match effect {
            SoundEffect::LaserShot => self.laser_clip.clone(),
            SoundEffect::Explosion => self.explosion_clip.clone(),
            SoundEffect::GameOver => self.game_over_clip.clone(),
        };
        if let Ok(mut mixer) = self.mixer.lock() {
            mixer.voices.push(Voice { clip, cursor: 0 });
        }
    }
}

// === Clip synthesis ===

fn seconds(s: f32) -> usize {
    (s * SAMPLE_RATE as f32) as usize
}

/// Laser - bright downward zap, 880 Hz falling to 220 Hz over 0.2 s
fn render_laser() -> Vec<f32> {
    let len = seconds(0.2);
    let mut phase = 0.0f32;
    (0..len)
        .map(|i| {
            let t = i as f32 / len as f32;
            let freq = 880.0 * (1.0 - t) + 220.0 * t;
            phase += std::f32::consts::TAU * freq / SAMPLE_RATE as f32;
            let env = (1.0 - t) * (1.0 - t);
            // Square-ish tone, softened
            let tone = phase.sin().signum() * 0.6 + phase.sin() * 0.4;
            tone * env * 0.3
        })
        .collect()
}

/// Explosion - low rumble sweep plus a noise burst
fn render_explosion() -> Vec<f32> {
    let len = seconds(0.45);
    let mut phase = 0.0f32;
    let mut noise_state = 0x2545_F491u32;
    (0..len)
        .map(|i| {
            let t = i as f32 / len as f32;
            let freq = 110.0 * (1.0 - t) + 30.0 * t;
            phase += std::f32::consts::TAU * freq / SAMPLE_RATE as f32;
            // xorshift noise, loudest at the onset
            noise_state ^= noise_state << 13;
            noise_state ^= noise_state >> 17;
            noise_state ^= noise_state << 5;
            let noise = (noise_state as f32 / u32::MAX as f32) * 2.0 - 1.0;
            let env = (1.0 - t).powi(2);
            (phase.sin() * 0.6 + noise * 0.4 * (1.0 - t)) * env * 0.5
        })
        .collect()
}

/// Game over - four descending sine steps
fn render_game_over() -> Vec<f32> {
    let steps = [400.0f32, 350.0, 300.0, 200.0];
    let step_len = seconds(0.22);
    let mut samples = Vec::with_capacity(step_len * steps.len());
    let mut phase = 0.0f32;
    for freq in steps {
        for i in 0..step_len {
            let t = i as f32 / step_len as f32;
            phase += std::f32::consts::TAU * freq / SAMPLE_RATE as f32;
            let env = (1.0 - t).max(0.0);
            samples.push(phase.sin() * env * 0.3);
        }
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_clip(clip: &[f32], max_seconds: f32) {
        assert!(!clip.is_empty());
        assert!(clip.len() <= seconds(max_seconds));
        for &s in clip {
            assert!(s.is_finite());
            assert!(s.abs() <= 1.0, "sample out of range: {s}");
        }
    }

    #[test]
    fn test_clips_are_finite_and_bounded() {
        check_clip(&render_laser(), 0.25);
        check_clip(&render_explosion(), 0.5);
        check_clip(&render_game_over(), 1.0);
    }

    #[test]
    fn test_mixer_drains_finished_voices() {
        let clip = Arc::new(vec![0.5f32; 8]);
        let mut mixer = Mixer {
            voices: vec![Voice {
                clip: clip.clone(),
                cursor: 0,
            }],
            volume: 1.0,
        };
        for _ in 0..8 {
            assert_eq!(mixer.next_sample(), 0.5);
        }
        assert!(mixer.voices.is_empty());
        assert_eq!(mixer.next_sample(), 0.0);
    }

    #[test]
    fn test_mixer_clamps_stacked_voices() {
        let clip = Arc::new(vec![0.9f32; 4]);
        let mut mixer = Mixer {
            voices: (0..3)
                .map(|_| Voice {
                    clip: clip.clone(),
                    cursor: 0,
                })
                .collect(),
            volume: 1.0,
        };
        assert_eq!(mixer.next_sample(), 1.0);
    }
}
