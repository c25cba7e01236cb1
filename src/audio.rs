//! Sound cues and the backends that play them.
//!
//! The simulation only ever talks to [`Audio`]; playback is fire-and-forget.
//! [`Speaker`] synthesizes every cue with fundsp once at startup and streams
//! the buffers through rodio.

use fundsp::prelude32::*;
use log::{debug, warn};
use rodio::{OutputStream, OutputStreamHandle, Sink, Source, buffer::SamplesBuffer};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Flap,
    Hit,
    Die,
    Point,
}

impl Cue {
    pub const ALL: [Cue; 4] = [Cue::Flap, Cue::Hit, Cue::Die, Cue::Point];
}

pub trait Audio {
    fn play(&mut self, cue: Cue);
    fn set_music_volume(&mut self, volume: f32);
    /// Start the looped background track. Calling it again is a no-op.
    fn start_music(&mut self);
}

/// Plays nothing. Used with `--mute` or when no output device exists.
#[derive(Debug, Default)]
pub struct Silent;

impl Audio for Silent {
    fn play(&mut self, _cue: Cue) {}
    fn set_music_volume(&mut self, _volume: f32) {}
    fn start_music(&mut self) {}
}

/// Records every request instead of playing it.
#[derive(Debug, Default)]
pub struct CueLog {
    pub cues: Vec<Cue>,
    pub music_volume: f32,
    pub music_started: bool,
}

impl CueLog {
    pub fn count(&self, cue: Cue) -> usize {
        self.cues.iter().filter(|&&c| c == cue).count()
    }
}

impl Audio for CueLog {
    fn play(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume;
    }

    fn start_music(&mut self) {
        self.music_started = true;
    }
}

// ── Device output ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no usable audio output device: {0}")]
    Stream(#[from] rodio::StreamError),
    #[error("failed to open playback sink: {0}")]
    Play(#[from] rodio::PlayError),
}

const SAMPLE_RATE: u32 = 44_100;

pub struct Speaker {
    // Dropping the stream silences every sink, so it lives as long as we do.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music: Sink,
    theme: Vec<f32>,
    clips: [Vec<f32>; 4],
}

impl Speaker {
    pub fn new() -> Result<Self, AudioError> {
        let (stream, handle) = OutputStream::try_default()?;
        let music = Sink::try_new(&handle)?;
        let clips = Cue::ALL.map(synthesize);
        debug!(
            "audio ready: {} cue samples synthesized",
            clips.iter().map(Vec::len).sum::<usize>()
        );
        Ok(Self {
            _stream: stream,
            handle,
            music,
            theme: theme(),
            clips,
        })
    }
}

impl Audio for Speaker {
    fn play(&mut self, cue: Cue) {
        let samples = self.clips[cue as usize].clone();
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
                sink.detach();
            }
            Err(e) => warn!("dropping {cue:?} cue: {e}"),
        }
    }

    fn set_music_volume(&mut self, volume: f32) {
        self.music.set_volume(volume.clamp(0.0, 1.0));
    }

    fn start_music(&mut self) {
        if self.music.empty() {
            let track = SamplesBuffer::new(1, SAMPLE_RATE, self.theme.clone());
            self.music.append(track.repeat_infinite());
        }
    }
}

// ── Synthesis ───────────────────────────────────────────────────────────────

fn render(mut unit: impl AudioUnit, seconds: f64) -> Vec<f32> {
    unit.set_sample_rate(SAMPLE_RATE as f64);
    let len = (seconds * SAMPLE_RATE as f64) as usize;
    (0..len).map(|_| unit.get_mono()).collect()
}

fn synthesize(cue: Cue) -> Vec<f32> {
    match cue {
        // Short upward chirp.
        Cue::Flap => {
            let freq = lfo(|t| 500.0 + 400.0 * (t / 0.08).min(1.0));
            let gain = lfo(|t| 0.25 * (-t * 25.0).exp());
            render((freq >> sine()) * gain, 0.12)
        }
        // Low-passed noise burst.
        Cue::Hit => {
            let gain = lfo(|t| 0.3 * (-t * 20.0).exp());
            render((noise() >> lowpass_hz(800.0, 1.0)) * gain, 0.2)
        }
        // Sawtooth sweep from 400Hz down to 80Hz, fading out.
        Cue::Die => {
            let freq = lfo(|t| 400.0 - 320.0 * (t / 0.4).min(1.0));
            let gain = lfo(|t| 0.15 * (1.0 - (t / 0.5).min(1.0)));
            render((freq >> saw()) * gain, 0.5)
        }
        // Two-note ding.
        Cue::Point => {
            let freq = lfo(|t| if t < 0.08 { 988.0 } else { 1319.0 });
            let gain = lfo(|t| 0.2 * (-t * 8.0).exp());
            render((freq >> sine()) * gain, 0.3)
        }
    }
}

/// Two-second arpeggio, looped by the music sink.
fn theme() -> Vec<f32> {
    let freq = lfo(|t| {
        let notes = [523.3, 659.3, 784.0, 659.3, 587.3, 698.5, 880.0, 698.5];
        notes[(t * 4.0) as usize % notes.len()]
    });
    let gain = lfo(|t| 0.08 * (1.0 - (t * 4.0).fract() * 0.6));
    render((freq >> triangle()) * gain, 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_log_counts_each_cue() {
        let mut log = CueLog::default();
        log.play(Cue::Flap);
        log.play(Cue::Point);
        log.play(Cue::Flap);
        assert_eq!(log.count(Cue::Flap), 2);
        assert_eq!(log.count(Cue::Point), 1);
        assert_eq!(log.count(Cue::Hit), 0);
    }

    #[test]
    fn every_cue_synthesizes_audible_samples() {
        for cue in Cue::ALL {
            let samples = synthesize(cue);
            assert!(!samples.is_empty(), "{cue:?} rendered nothing");
            assert!(samples.iter().all(|s| s.is_finite()));
            assert!(samples.iter().any(|s| s.abs() > 1e-4), "{cue:?} is silent");
        }
    }
}
