//! Audio system
//!
//! Procedurally generated tones - no external files needed! The tone tables
//! and the music sequencer are plain data; the wasm build plays them through
//! Web Audio oscillators.

use crate::settings::{MusicTrack, SfxPack};
use crate::sim::AudioCue;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// A single enveloped note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq: f32,
    pub duration_ms: u32,
    pub waveform: Waveform,
    pub gain: f32,
}

const fn tone(freq: f32, duration_ms: u32, waveform: Waveform, gain: f32) -> Tone {
    Tone {
        freq,
        duration_ms,
        waveform,
        gain,
    }
}

/// Tone for a cue in the given pack
pub fn sfx_tone(pack: SfxPack, cue: AudioCue) -> Tone {
    use AudioCue::*;
    use Waveform::*;
    match (pack, cue) {
        (SfxPack::Classic, Flap) => tone(420.0, 60, Square, 0.06),
        (SfxPack::Classic, Score) => tone(620.0, 70, Sine, 0.07),
        (SfxPack::Classic, Power) => tone(840.0, 110, Triangle, 0.07),
        (SfxPack::Classic, Crash) => tone(160.0, 180, Sawtooth, 0.06),

        (SfxPack::Heroic, Flap) => tone(520.0, 70, Triangle, 0.07),
        (SfxPack::Heroic, Score) => tone(740.0, 90, Triangle, 0.07),
        (SfxPack::Heroic, Power) => tone(980.0, 140, Sine, 0.07),
        (SfxPack::Heroic, Crash) => tone(110.0, 220, Sawtooth, 0.07),

        (SfxPack::Robot, Flap) => tone(300.0, 55, Square, 0.06),
        (SfxPack::Robot, Score) => tone(460.0, 75, Square, 0.06),
        (SfxPack::Robot, Power) => tone(620.0, 120, Square, 0.06),
        (SfxPack::Robot, Crash) => tone(90.0, 240, Square, 0.06),
    }
}

/// A looping chord progression
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MusicPattern {
    pub bpm: u32,
    pub steps: &'static [&'static [f32]],
    pub waveform: Waveform,
    pub gain: f32,
}

const CHILL: MusicPattern = MusicPattern {
    bpm: 92,
    steps: &[
        &[220.0, 440.0],
        &[247.0, 494.0],
        &[262.0, 523.0],
        &[247.0, 494.0],
        &[196.0, 392.0],
        &[220.0, 440.0],
        &[247.0, 494.0],
        &[220.0, 440.0],
    ],
    waveform: Waveform::Sine,
    gain: 0.025,
};

const ARCADE: MusicPattern = MusicPattern {
    bpm: 120,
    steps: &[
        &[330.0],
        &[392.0],
        &[440.0],
        &[392.0],
        &[523.0],
        &[392.0],
        &[440.0],
        &[392.0],
    ],
    waveform: Waveform::Square,
    gain: 0.018,
};

const NIGHT: MusicPattern = MusicPattern {
    bpm: 98,
    steps: &[
        &[185.0, 370.0],
        &[207.0, 414.0],
        &[233.0, 466.0],
        &[207.0, 414.0],
        &[155.0, 311.0],
        &[185.0, 370.0],
        &[207.0, 414.0],
        &[185.0, 370.0],
    ],
    waveform: Waveform::Triangle,
    gain: 0.022,
};

/// Notes never play shorter than this
const MIN_NOTE_MS: u32 = 90;

impl MusicPattern {
    /// Pattern for a track (`None` is silence)
    pub fn for_track(track: MusicTrack) -> Option<&'static MusicPattern> {
        match track {
            MusicTrack::None => None,
            MusicTrack::Chill => Some(&CHILL),
            MusicTrack::Arcade => Some(&ARCADE),
            MusicTrack::Night => Some(&NIGHT),
        }
    }

    /// Eighth-note period in milliseconds
    pub fn step_ms(&self) -> u32 {
        (60_000.0 / self.bpm as f64 / 2.0).round() as u32
    }

    /// Note length within a step
    pub fn note_ms(&self) -> u32 {
        self.step_ms().saturating_sub(10).max(MIN_NOTE_MS)
    }
}

/// Frame-driven music clock. Feed it elapsed time; it hands back the chord
/// due on each step boundary.
#[derive(Debug, Clone)]
pub struct MusicSequencer {
    track: MusicTrack,
    pattern: Option<&'static MusicPattern>,
    step: usize,
    elapsed_ms: f64,
}

impl MusicSequencer {
    pub fn new(track: MusicTrack) -> Self {
        Self {
            track,
            pattern: MusicPattern::for_track(track),
            step: 0,
            elapsed_ms: 0.0,
        }
    }

    pub fn track(&self) -> MusicTrack {
        self.track
    }

    pub fn pattern(&self) -> Option<&'static MusicPattern> {
        self.pattern
    }

    /// Switch tracks, restarting from the first step
    pub fn set_track(&mut self, track: MusicTrack) {
        if track != self.track {
            *self = Self::new(track);
        }
    }

    /// Rewind without changing track
    pub fn stop(&mut self) {
        self.step = 0;
        self.elapsed_ms = 0.0;
    }

    /// Advance the clock. Returns the chord to play if a step elapsed.
    /// At most one chord per call; a long stall does not replay a backlog.
    pub fn advance(&mut self, dt_ms: f64) -> Option<&'static [f32]> {
        let pattern = self.pattern?;
        self.elapsed_ms += dt_ms;
        let step_ms = pattern.step_ms() as f64;
        if self.elapsed_ms < step_ms {
            return None;
        }
        self.elapsed_ms %= step_ms;
        let chord = pattern.steps[self.step % pattern.steps.len()];
        self.step += 1;
        Some(chord)
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, OscillatorType};

    use super::{MusicSequencer, Tone, Waveform, sfx_tone};
    use crate::settings::Settings;
    use crate::sim::AudioCue;

    impl From<Waveform> for OscillatorType {
        fn from(w: Waveform) -> Self {
            match w {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Triangle => OscillatorType::Triangle,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
            }
        }
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        music: MusicSequencer,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                music: MusicSequencer::new(settings.music),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                if ctx.state() == web_sys::AudioContextState::Suspended {
                    let _ = ctx.resume();
                }
            }
        }

        /// Pick up a changed music track
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.music.set_track(settings.music);
        }

        /// Play the sound for a cue
        pub fn play_cue(&self, cue: AudioCue, settings: &Settings) {
            if !settings.sound_on {
                return;
            }
            self.resume();
            self.play_tone(sfx_tone(settings.sfx_pack, cue));
        }

        /// Advance music by one frame. `in_game` is false while menus are up.
        pub fn update_music(&mut self, dt_ms: f64, in_game: bool, settings: &Settings) {
            if !in_game || !settings.music_enabled() {
                self.music.stop();
                return;
            }
            let Some(pattern) = self.music.pattern() else {
                return;
            };
            if let Some(chord) = self.music.advance(dt_ms) {
                for &freq in chord {
                    self.play_tone(Tone {
                        freq,
                        duration_ms: pattern.note_ms(),
                        waveform: pattern.waveform,
                        gain: pattern.gain,
                    });
                }
            }
        }

        /// Oscillator with a short attack and exponential release
        fn play_tone(&self, tone: Tone) {
            let Some(ctx) = &self.ctx else { return };
            let (Ok(osc), Ok(gain)) = (ctx.create_oscillator(), ctx.create_gain()) else {
                return;
            };

            osc.set_type(tone.waveform.into());
            osc.frequency().set_value(tone.freq);

            let t0 = ctx.current_time();
            let t1 = t0 + tone.duration_ms as f64 / 1000.0;
            gain.gain().set_value_at_time(0.0001, t0).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(tone.gain, t0 + 0.01)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.0001, t1)
                .ok();

            if osc.connect_with_audio_node(&gain).is_err()
                || gain.connect_with_audio_node(&ctx.destination()).is_err()
            {
                return;
            }
            osc.start_with_when(t0).ok();
            osc.stop_with_when(t1).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pack_covers_every_cue() {
        for pack in SfxPack::ALL {
            for cue in [AudioCue::Flap, AudioCue::Score, AudioCue::Power, AudioCue::Crash] {
                let t = sfx_tone(*pack, cue);
                assert!(t.freq > 0.0 && t.gain > 0.0 && t.duration_ms > 0);
            }
        }
        // Crash is the low note in every pack
        assert_eq!(sfx_tone(SfxPack::Robot, AudioCue::Crash).freq, 90.0);
        assert_eq!(
            sfx_tone(SfxPack::Heroic, AudioCue::Power).waveform,
            Waveform::Sine
        );
    }

    #[test]
    fn test_step_periods() {
        let chill = MusicPattern::for_track(MusicTrack::Chill).unwrap();
        let arcade = MusicPattern::for_track(MusicTrack::Arcade).unwrap();
        let night = MusicPattern::for_track(MusicTrack::Night).unwrap();
        assert_eq!(chill.step_ms(), 326);
        assert_eq!(arcade.step_ms(), 250);
        assert_eq!(night.step_ms(), 306);
        assert_eq!(arcade.note_ms(), 240);
        assert!(MusicPattern::for_track(MusicTrack::None).is_none());
    }

    #[test]
    fn test_sequencer_walks_the_pattern() {
        let mut seq = MusicSequencer::new(MusicTrack::Arcade);
        assert_eq!(seq.advance(100.0), None);
        assert_eq!(seq.advance(150.0), Some(&[330.0][..]));
        assert_eq!(seq.advance(250.0), Some(&[392.0][..]));

        // A stall yields one chord, not a burst
        assert_eq!(seq.advance(5_000.0), Some(&[440.0][..]));
        assert_eq!(seq.advance(0.0), None);

        seq.stop();
        assert_eq!(seq.advance(250.0), Some(&[330.0][..]));
    }

    #[test]
    fn test_silent_track() {
        let mut seq = MusicSequencer::new(MusicTrack::None);
        assert_eq!(seq.advance(10_000.0), None);
        seq.set_track(MusicTrack::Night);
        assert_eq!(seq.advance(306.0), Some(&[185.0, 370.0][..]));
    }
}
