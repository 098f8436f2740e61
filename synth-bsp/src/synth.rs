//! Synth driver core.
//!
//! [`Synth`] owns the runtime context (sample rate, channel count, volume,
//! mute flag, initialized flag) together with the registered
//! [`SynthBackend`], validates each operation against the context and
//! forwards to the backend.
//!
//! # Example
//!
//! ```ignore
//! let mut synth = Synth::new();
//! synth.register_backend(backend);
//! synth.init(44_100, 2)?;
//! synth.set_volume(60)?;
//! synth.play_buffer(&block)?;
//! synth.deinit()?;
//! ```
//!
//! # State
//!
//! The driver is `Uninitialized` until [`init`](Synth::init) succeeds and
//! `Ready` afterwards; [`deinit`](Synth::deinit) returns it to
//! `Uninitialized` and zeroes the context. Only playback is gated on the
//! `Ready` state. The sample rate, volume and mute controls read and write the
//! context in either state.
//!
//! Control forwarding to the backend (`set_sample_rate`, `mute`, and the
//! backend `deinit` during teardown) is fire-and-forget: a failing callback
//! is logged and never fails the calling operation.

use crate::backend::SynthBackend;
use crate::constants::{
    DEFAULT_CHANNELS, DEFAULT_SAMPLE_RATE, DEFAULT_VOLUME, MAX_VOLUME, SAMPLE_BYTES,
};
use crate::error::{Capability, SynthError};

// ── Configuration and context ──────────────────────────────────────────────

/// Output configuration applied by [`Synth::init_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SynthConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Number of interleaved output channels.
    pub channels: u8,
}

impl Default for SynthConfig {
    /// 44.1 kHz stereo.
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
        }
    }
}

/// Runtime configuration of the synth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SynthContext {
    pub sample_rate: u32,
    pub channels: u8,
    /// Always within `0..=100`.
    pub volume: u8,
    pub muted: bool,
    pub initialized: bool,
}

impl SynthContext {
    /// The context before init and after deinit.
    pub const ZERO: SynthContext = SynthContext {
        sample_rate: 0,
        channels: 0,
        volume: 0,
        muted: false,
        initialized: false,
    };
}

// ── Driver struct ──────────────────────────────────────────────────────────

/// Synth peripheral driver.
///
/// Generic over the backend. At most one backend is registered at a time;
/// registering another replaces it wholesale.
pub struct Synth<B> {
    backend: Option<B>,
    ctx: SynthContext,
}

impl<B> Default for Synth<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> Synth<B> {
    /// Create a driver with no backend and a zeroed context.
    pub const fn new() -> Self {
        Self {
            backend: None,
            ctx: SynthContext::ZERO,
        }
    }

    /// Create a driver with `backend` already registered.
    pub const fn with_backend(backend: B) -> Self {
        Self {
            backend: Some(backend),
            ctx: SynthContext::ZERO,
        }
    }

    // ── Backend registry ───────────────────────────────────────────────

    /// Register `backend`, replacing any previous registration.
    ///
    /// Returns the backend that was registered before, which is never
    /// called again by this driver. The context is left as it is.
    pub fn register_backend(&mut self, backend: B) -> Option<B> {
        let previous = self.backend.replace(backend);
        debug!("backend registered (replaced: {})", previous.is_some());
        previous
    }

    /// The registered backend, if any.
    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    /// Mutable access to the registered backend, if any.
    pub fn backend_mut(&mut self) -> Option<&mut B> {
        self.backend.as_mut()
    }

    /// Consume the driver and return the registered backend.
    pub fn release(self) -> Option<B> {
        self.backend
    }

    // ── Context accessors ──────────────────────────────────────────────

    /// Current runtime context.
    pub fn context(&self) -> &SynthContext {
        &self.ctx
    }

    pub fn is_initialized(&self) -> bool {
        self.ctx.initialized
    }

    pub fn sample_rate(&self) -> u32 {
        self.ctx.sample_rate
    }

    pub fn channels(&self) -> u8 {
        self.ctx.channels
    }

    pub fn volume(&self) -> u8 {
        self.ctx.volume
    }

    pub fn is_muted(&self) -> bool {
        self.ctx.muted
    }
}

impl<B: SynthBackend> Synth<B> {
    // ── Lifecycle ──────────────────────────────────────────────────────

    /// Initialize the backend and configure the context.
    ///
    /// On success the context holds `sample_rate` and `channels`, volume
    /// [`DEFAULT_VOLUME`], unmuted, and the rate is forwarded to the backend.
    /// On failure the context is not touched.
    ///
    /// Calling this while already initialized re-runs the backend init and
    /// overwrites the context.
    ///
    /// # Errors
    ///
    /// - [`SynthError::NotReady`] if no backend is registered.
    /// - [`SynthError::Unsupported`] if the backend has no `init` callback.
    /// - [`SynthError::Hardware`] if the backend `init` fails.
    pub fn init(&mut self, sample_rate: u32, channels: u8) -> Result<(), SynthError<B::Error>> {
        let backend = self.backend.as_mut().ok_or(SynthError::NotReady)?;
        if self.ctx.initialized {
            debug!("re-initializing synth");
        }

        match backend.init() {
            None => return Err(SynthError::Unsupported(Capability::Init)),
            Some(Err(e)) => {
                warn!("backend init failed");
                return Err(SynthError::Hardware(e));
            }
            Some(Ok(())) => {}
        }

        self.ctx = SynthContext {
            sample_rate,
            channels,
            volume: DEFAULT_VOLUME,
            muted: false,
            initialized: true,
        };
        forward(Capability::SetSampleRate, backend.set_sample_rate(sample_rate));

        info!("synth ready: {} Hz, {} channels", sample_rate, channels);
        Ok(())
    }

    /// Initialize from a [`SynthConfig`]. See [`init`](Self::init).
    pub fn init_with(&mut self, config: SynthConfig) -> Result<(), SynthError<B::Error>> {
        self.init(config.sample_rate, config.channels)
    }

    /// Shut the backend down and zero the context.
    ///
    /// The backend `deinit` is called if present and its failure is ignored.
    /// Always succeeds and may be called any number of times.
    pub fn deinit(&mut self) -> Result<(), SynthError<B::Error>> {
        if let Some(backend) = self.backend.as_mut() {
            forward(Capability::Deinit, backend.deinit());
        }
        self.ctx = SynthContext::ZERO;
        debug!("synth deinitialized");
        Ok(())
    }

    /// Power-cycle the backend with the current sample rate and channel count.
    ///
    /// Volume and mute return to their init defaults. If the backend fails to
    /// come back up the driver is left uninitialized.
    ///
    /// # Errors
    ///
    /// [`SynthError::NotReady`] if not initialized, otherwise as
    /// [`init`](Self::init).
    pub fn reset(&mut self) -> Result<(), SynthError<B::Error>> {
        if !self.ctx.initialized {
            return Err(SynthError::NotReady);
        }
        let SynthContext {
            sample_rate,
            channels,
            ..
        } = self.ctx;
        self.deinit()?;
        self.init(sample_rate, channels)
    }

    // ── Playback ───────────────────────────────────────────────────────

    /// Transmit a buffer of 16-bit PCM samples.
    ///
    /// The backend receives the samples as `samples.len() * 2` native-endian
    /// bytes. The transmit result is returned as is; there is no retry.
    ///
    /// # Errors
    ///
    /// - [`SynthError::NotReady`] if not initialized.
    /// - [`SynthError::Overflow`] if the byte length does not fit in `u32`.
    /// - [`SynthError::Unsupported`] if the backend has no `transmit` callback.
    /// - [`SynthError::Hardware`] if the transmit fails.
    pub fn play_buffer(&mut self, samples: &[i16]) -> Result<(), SynthError<B::Error>> {
        if !self.ctx.initialized {
            return Err(SynthError::NotReady);
        }
        let backend = self.backend.as_mut().ok_or(SynthError::NotReady)?;

        let size = samples
            .len()
            .checked_mul(SAMPLE_BYTES)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or(SynthError::Overflow)?;
        trace!("transmit {} bytes", size);

        let bytes: &[u8] = bytemuck::cast_slice(samples);
        match backend.transmit(bytes) {
            None => Err(SynthError::Unsupported(Capability::Transmit)),
            Some(result) => result.map_err(SynthError::Hardware),
        }
    }

    /// Stop playback. Currently a no-op that always succeeds.
    pub fn stop(&mut self) -> Result<(), SynthError<B::Error>> {
        Ok(())
    }

    // ── Sample rate ────────────────────────────────────────────────────

    /// Store `sample_rate` and forward it to the backend if supported.
    ///
    /// Works in any state and always succeeds.
    pub fn set_sample_rate(&mut self, sample_rate: u32) -> Result<(), SynthError<B::Error>> {
        self.ctx.sample_rate = sample_rate;
        if let Some(backend) = self.backend.as_mut() {
            forward(Capability::SetSampleRate, backend.set_sample_rate(sample_rate));
        }
        Ok(())
    }

    /// Write the stored sample rate to `out`.
    ///
    /// Fails with [`SynthError::InvalidArgument`] if `out` is `None`.
    pub fn read_sample_rate(&self, out: Option<&mut u32>) -> Result<(), SynthError<B::Error>> {
        let out = out.ok_or(SynthError::InvalidArgument)?;
        *out = self.ctx.sample_rate;
        Ok(())
    }

    /// Ask the backend which rate the hardware is running at.
    pub fn backend_sample_rate(&mut self) -> Result<u32, SynthError<B::Error>> {
        let backend = self.backend.as_mut().ok_or(SynthError::NotReady)?;
        match backend.sample_rate() {
            None => Err(SynthError::Unsupported(Capability::GetSampleRate)),
            Some(result) => result.map_err(SynthError::Hardware),
        }
    }

    // ── Volume and mute ────────────────────────────────────────────────

    /// Set the volume on the 0–100 scale. Larger values are clamped to 100.
    pub fn set_volume(&mut self, volume: u8) -> Result<(), SynthError<B::Error>> {
        let clamped = volume.min(MAX_VOLUME);
        if clamped != volume {
            debug!("volume {} clamped to {}", volume, clamped);
        }
        self.ctx.volume = clamped;
        Ok(())
    }

    /// Write the stored volume to `out`.
    ///
    /// Fails with [`SynthError::InvalidArgument`] if `out` is `None`.
    pub fn read_volume(&self, out: Option<&mut u8>) -> Result<(), SynthError<B::Error>> {
        let out = out.ok_or(SynthError::InvalidArgument)?;
        *out = self.ctx.volume;
        Ok(())
    }

    /// Store the mute flag and forward it to the backend if supported.
    ///
    /// Always succeeds.
    pub fn mute(&mut self, enable: bool) -> Result<(), SynthError<B::Error>> {
        self.ctx.muted = enable;
        if let Some(backend) = self.backend.as_mut() {
            forward(Capability::Mute, backend.mute(enable));
        }
        Ok(())
    }
}

/// Swallow the outcome of a fire-and-forget backend call.
fn forward<T, E>(capability: Capability, outcome: Option<Result<T, E>>) {
    match outcome {
        Some(Err(_)) => warn!("backend {} failed, ignored", capability),
        None => trace!("backend has no {}", capability),
        Some(Ok(_)) => {}
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
