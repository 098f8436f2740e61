//! Interrupt-safe global driver.
//!
//! [`SharedSynth`] wraps a [`Synth`] in a `critical_section::Mutex` so a
//! single driver can live in a `static` and be used from both thread mode
//! and interrupt handlers.
//!
//! ```ignore
//! static SYNTH: SharedSynth<MyBackend> = SharedSynth::new();
//!
//! SYNTH.register_backend(backend);
//! SYNTH.with(|s| s.init(44_100, 2))?;
//!
//! // In the audio ISR:
//! SYNTH.with(|s| s.play_buffer(&block)).ok();
//! ```
//!
//! Every access runs inside a critical section. Calling [`SharedSynth::with`]
//! again from inside its own closure panics on the inner `RefCell` borrow.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::synth::{Synth, SynthContext};

/// A [`Synth`] guarded by a critical section.
pub struct SharedSynth<B> {
    inner: Mutex<RefCell<Synth<B>>>,
}

impl<B> Default for SharedSynth<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> SharedSynth<B> {
    /// Create an empty driver with no backend registered.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Synth::new())),
        }
    }

    /// Run `f` with exclusive access to the driver.
    pub fn with<R>(&self, f: impl FnOnce(&mut Synth<B>) -> R) -> R {
        critical_section::with(|cs| {
            let mut synth = self.inner.borrow(cs).borrow_mut();
            f(&mut synth)
        })
    }

    /// Register `backend`, returning the one it replaces.
    pub fn register_backend(&self, backend: B) -> Option<B> {
        self.with(|s| s.register_backend(backend))
    }

    /// Remove and return the registered backend, zeroing the context.
    ///
    /// The backend is not deinitialized.
    pub fn take_backend(&self) -> Option<B> {
        self.with(|s| core::mem::take(s).release())
    }

    /// Copy of the current context.
    pub fn context(&self) -> SynthContext {
        self.with(|s| *s.context())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{IoError, IoTable};
    use crate::error::SynthError;
    use core::sync::atomic::{AtomicUsize, Ordering};

    static TX_BYTES: AtomicUsize = AtomicUsize::new(0);

    fn ok() -> i32 {
        0
    }

    fn count_tx(_data: &[u8], size: u32) -> i32 {
        TX_BYTES.fetch_add(size as usize, Ordering::Relaxed);
        0
    }

    const TABLE: IoTable = IoTable {
        init: Some(ok),
        transmit: Some(count_tx),
        ..IoTable::EMPTY
    };

    static SYNTH: SharedSynth<IoTable> = SharedSynth::new();

    #[test]
    fn static_driver_round_trip() {
        assert!(SYNTH.register_backend(TABLE).is_none());
        assert_eq!(SYNTH.with(|s| s.init(44_100, 2)), Ok(()));
        assert_eq!(SYNTH.with(|s| s.play_buffer(&[0; 32])), Ok(()));
        assert_eq!(TX_BYTES.load(Ordering::Relaxed), 64);

        let ctx = SYNTH.context();
        assert!(ctx.initialized);
        assert_eq!(ctx.sample_rate, 44_100);

        assert!(SYNTH.take_backend().is_some());
        assert!(!SYNTH.context().initialized);
        assert_eq!(
            SYNTH.with(|s| s.init(44_100, 2)),
            Err(SynthError::<IoError>::NotReady)
        );
    }

    #[test]
    fn local_shared_driver() {
        let shared: SharedSynth<IoTable> = SharedSynth::default();
        shared.with(|s| s.set_volume(250)).unwrap();
        assert_eq!(shared.context().volume, 100);
    }
}
