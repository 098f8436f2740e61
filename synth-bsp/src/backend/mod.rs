//! Low-level I/O backends.
//!
//! A backend is the board-specific half of the driver: it powers the audio
//! interface up and down, moves PCM bytes to the hardware and applies the
//! sample rate and mute settings. [`Synth`](crate::Synth) owns exactly one
//! backend and forwards to it.
//!
//! Every callback is optional. A method that returns `None` means the slot
//! is absent, which is what the default implementations do, so a backend only
//! implements the capabilities its board has.
//!
//! ## Provided backends
//!
//! | Backend | Feature | Description |
//! |---------|---------|-------------|
//! | [`IoTable`] | — | Struct of optional `fn` pointers returning `i32` codes |
//! | [`SpiBackend`] | `spi` | PCM over an `embedded-hal` SPI device, GPIO enable/mute |

mod io_table;

#[cfg(feature = "spi")]
mod spi;

pub use io_table::{IoError, IoTable};

#[cfg(feature = "spi")]
pub use spi::{NoPin, SpiBackend, SpiBackendError};

/// Board-specific I/O for the synth peripheral.
///
/// Each method returns `None` when the backend does not provide that
/// callback, or `Some(result)` with the outcome of the call.
pub trait SynthBackend {
    /// Error reported by the backend's callbacks.
    type Error: core::fmt::Debug;

    /// Power up the low-level interface.
    fn init(&mut self) -> Option<Result<(), Self::Error>> {
        None
    }

    /// Power down the low-level interface.
    fn deinit(&mut self) -> Option<Result<(), Self::Error>> {
        None
    }

    /// Hand a buffer of native-endian 16-bit PCM bytes to the hardware.
    fn transmit(&mut self, data: &[u8]) -> Option<Result<(), Self::Error>> {
        let _ = data;
        None
    }

    /// Reconfigure the output sample rate in Hz.
    fn set_sample_rate(&mut self, sample_rate: u32) -> Option<Result<(), Self::Error>> {
        let _ = sample_rate;
        None
    }

    /// Report the sample rate the hardware is running at.
    fn sample_rate(&mut self) -> Option<Result<u32, Self::Error>> {
        None
    }

    /// Mute (`true`) or unmute (`false`) the output.
    fn mute(&mut self, enable: bool) -> Option<Result<(), Self::Error>> {
        let _ = enable;
        None
    }
}

impl<T: SynthBackend + ?Sized> SynthBackend for &mut T {
    type Error = T::Error;

    fn init(&mut self) -> Option<Result<(), Self::Error>> {
        T::init(self)
    }

    fn deinit(&mut self) -> Option<Result<(), Self::Error>> {
        T::deinit(self)
    }

    fn transmit(&mut self, data: &[u8]) -> Option<Result<(), Self::Error>> {
        T::transmit(self, data)
    }

    fn set_sample_rate(&mut self, sample_rate: u32) -> Option<Result<(), Self::Error>> {
        T::set_sample_rate(self, sample_rate)
    }

    fn sample_rate(&mut self) -> Option<Result<u32, Self::Error>> {
        T::sample_rate(self)
    }

    fn mute(&mut self, enable: bool) -> Option<Result<(), Self::Error>> {
        T::mute(self, enable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backend that only knows how to transmit.
    struct TransmitOnly {
        bytes: usize,
    }

    impl SynthBackend for TransmitOnly {
        type Error = ();

        fn transmit(&mut self, data: &[u8]) -> Option<Result<(), ()>> {
            self.bytes += data.len();
            Some(Ok(()))
        }
    }

    #[test]
    fn default_slots_are_absent() {
        let mut b = TransmitOnly { bytes: 0 };
        assert!(b.init().is_none());
        assert!(b.deinit().is_none());
        assert!(b.set_sample_rate(48_000).is_none());
        assert!(b.sample_rate().is_none());
        assert!(b.mute(true).is_none());
        assert_eq!(b.transmit(&[0; 6]), Some(Ok(())));
        assert_eq!(b.bytes, 6);
    }

    #[test]
    fn mutable_reference_forwards() {
        let mut b = TransmitOnly { bytes: 0 };
        {
            let mut r = &mut b;
            assert_eq!(SynthBackend::transmit(&mut r, &[1, 2]), Some(Ok(())));
            assert!(SynthBackend::init(&mut r).is_none());
        }
        assert_eq!(b.bytes, 2);
    }
}
