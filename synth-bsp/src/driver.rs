use crate::backend::SynthBackend;
use crate::error::SynthError;
use crate::synth::Synth;

/// Trait for synth peripheral drivers, so application code can be written
/// against the driver operations rather than a concrete backend.
pub trait SynthDriver {
    /// Error type for driver operations.
    type Error;

    /// Power up the output at `sample_rate` Hz with `channels` channels.
    fn init(&mut self, sample_rate: u32, channels: u8) -> Result<(), Self::Error>;

    /// Power down the output and forget the configuration.
    fn deinit(&mut self) -> Result<(), Self::Error>;

    /// Power-cycle the output, keeping sample rate and channel count.
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Output a buffer of signed 16-bit PCM samples.
    fn play_buffer(&mut self, samples: &[i16]) -> Result<(), Self::Error>;

    /// Stop playback.
    fn stop(&mut self) -> Result<(), Self::Error>;

    fn set_sample_rate(&mut self, sample_rate: u32) -> Result<(), Self::Error>;

    fn sample_rate(&self) -> u32;

    /// Set the output volume (0 = silent, 100 = full scale).
    fn set_volume(&mut self, volume: u8) -> Result<(), Self::Error>;

    fn volume(&self) -> u8;

    fn mute(&mut self, enable: bool) -> Result<(), Self::Error>;
}

impl<B: SynthBackend> SynthDriver for Synth<B> {
    type Error = SynthError<B::Error>;

    fn init(&mut self, sample_rate: u32, channels: u8) -> Result<(), Self::Error> {
        // Delegate to the inherent method
        Synth::init(self, sample_rate, channels)
    }

    fn deinit(&mut self) -> Result<(), Self::Error> {
        Synth::deinit(self)
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        Synth::reset(self)
    }

    fn play_buffer(&mut self, samples: &[i16]) -> Result<(), Self::Error> {
        Synth::play_buffer(self, samples)
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        Synth::stop(self)
    }

    fn set_sample_rate(&mut self, sample_rate: u32) -> Result<(), Self::Error> {
        Synth::set_sample_rate(self, sample_rate)
    }

    fn sample_rate(&self) -> u32 {
        Synth::sample_rate(self)
    }

    fn set_volume(&mut self, volume: u8) -> Result<(), Self::Error> {
        Synth::set_volume(self, volume)
    }

    fn volume(&self) -> u8 {
        Synth::volume(self)
    }

    fn mute(&mut self, enable: bool) -> Result<(), Self::Error> {
        Synth::mute(self, enable)
    }
}
