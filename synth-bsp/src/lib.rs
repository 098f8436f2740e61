//! # synth-bsp
//!
//! A `no_std` board-support shim for an audio "synth" output peripheral.
//! It keeps the output configuration (sample rate, channels, volume, mute)
//! and forwards playback and control calls to a swappable board-specific
//! I/O backend.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Driver | [`synth`] | [`Synth`] context, lifecycle, playback, controls |
//! | Trait | [`backend`] / [`driver`] | [`SynthBackend`] I/O slots, [`SynthDriver`] driver API |
//! | Backends | [`backend`] | [`IoTable`] function table, `SpiBackend` (feature-gated) |
//! | Errors | [`error`] | [`SynthError`], C-style [`Status`] codes |
//! | Sharing | `shared` | `SharedSynth` critical-section singleton (feature-gated) |
//!
//! ## Quick start
//!
//! ```ignore
//! use synth_bsp::{Synth, SynthConfig};
//!
//! let mut synth = Synth::with_backend(board_backend);
//! synth.init_with(SynthConfig::default())?;   // 44.1 kHz stereo
//! synth.set_volume(80)?;
//!
//! // Whenever a block of samples is ready:
//! synth.play_buffer(&block)?;
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `spi` | yes | `SpiBackend` (requires `embedded-hal`) |
//! | `critical-section` | no | `SharedSynth` for use from a `static` |
//! | `defmt` | no | Logging and `defmt::Format` on public types |
//!
//! ## Defaults
//!
//! - **Sample rate:** 44 100 Hz ([`constants::DEFAULT_SAMPLE_RATE`])
//! - **Channels:** 2 ([`constants::DEFAULT_CHANNELS`])
//! - **Volume:** 75 of 100 ([`constants::DEFAULT_VOLUME`])
//! - **Sample format:** `i16` (signed 16-bit), sent as native-endian bytes

#![no_std]

#[macro_use]
mod fmt;

pub mod constants;
pub mod error;
pub mod backend;
pub mod synth;
pub mod driver;

#[cfg(any(test, feature = "critical-section"))]
pub mod shared;

pub use backend::{IoError, IoTable, SynthBackend};
pub use driver::SynthDriver;
pub use error::{Capability, ErrorKind, Status, SynthError};
pub use synth::{Synth, SynthConfig, SynthContext};

#[cfg(feature = "spi")]
pub use backend::{NoPin, SpiBackend, SpiBackendError};

#[cfg(any(test, feature = "critical-section"))]
pub use shared::SharedSynth;
