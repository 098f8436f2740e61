/// Sample rate applied by [`SynthConfig::default()`](crate::SynthConfig), in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Channel count applied by [`SynthConfig::default()`](crate::SynthConfig) (stereo).
pub const DEFAULT_CHANNELS: u8 = 2;

/// Volume set by every successful init, on the 0–100 scale.
pub const DEFAULT_VOLUME: u8 = 75;

/// Upper bound of the volume scale. Larger values are clamped to this.
pub const MAX_VOLUME: u8 = 100;

/// Bytes per PCM sample (signed 16-bit).
pub const SAMPLE_BYTES: usize = core::mem::size_of::<i16>();
