//! Error and status types.
//!
//! Driver operations return [`SynthError`], generic over the error type of
//! the registered backend. Code that needs the flat C-style status codes can
//! collapse any result into a [`Status`].

use core::fmt;

/// A backend callback slot.
///
/// Used to report which capability a backend is missing, and to label
/// swallowed failures in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Capability {
    /// Power up the low-level interface.
    Init,
    /// Power down the low-level interface.
    Deinit,
    /// Hand PCM bytes to the hardware.
    Transmit,
    /// Reconfigure the output sample rate.
    SetSampleRate,
    /// Report the output sample rate.
    GetSampleRate,
    /// Mute or unmute the output.
    Mute,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Init => "init",
            Capability::Deinit => "deinit",
            Capability::Transmit => "transmit",
            Capability::SetSampleRate => "set_sample_rate",
            Capability::GetSampleRate => "get_sample_rate",
            Capability::Mute => "mute",
        };
        f.write_str(name)
    }
}

/// Error returned by [`Synth`](crate::Synth) operations.
///
/// `E` is the error type of the registered backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SynthError<E> {
    /// No backend is registered, or the synth has not been initialized.
    #[error("synth not ready")]
    NotReady,
    /// The registered backend does not provide a required callback.
    #[error("backend does not provide `{0}`")]
    Unsupported(Capability),
    /// A backend callback reported failure.
    #[error("backend failure: {0:?}")]
    Hardware(E),
    /// A missing output location or backend table was passed in.
    #[error("invalid argument")]
    InvalidArgument,
    /// The byte length of a buffer does not fit the 32-bit transmit size.
    #[error("buffer length overflows transmit size")]
    Overflow,
}

impl<E> SynthError<E> {
    /// Backend-independent classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SynthError::NotReady => ErrorKind::NotReady,
            SynthError::Unsupported(_) => ErrorKind::Unsupported,
            SynthError::Hardware(_) => ErrorKind::Hardware,
            SynthError::InvalidArgument => ErrorKind::InvalidArgument,
            SynthError::Overflow => ErrorKind::Overflow,
        }
    }

    /// `true` for errors that originate in the backend rather than in the
    /// caller's use of the driver.
    pub fn is_hardware(&self) -> bool {
        matches!(self, SynthError::Hardware(_) | SynthError::Unsupported(_))
    }
}

/// Field-less mirror of [`SynthError`], for logging and matching without the
/// backend error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    NotReady,
    Unsupported,
    Hardware,
    InvalidArgument,
    Overflow,
}

/// C-compatible status code.
///
/// Every [`SynthError`] maps to [`Status::Error`]. `Busy` and `Timeout` are
/// reserved and never produced by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Status {
    Ok = 0x00,
    Error = 0x01,
    Busy = 0x02,
    Timeout = 0x03,
}

impl Status {
    /// Raw status code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decode a raw status code.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(Status::Ok),
            0x01 => Some(Status::Error),
            0x02 => Some(Status::Busy),
            0x03 => Some(Status::Timeout),
            _ => None,
        }
    }

    pub const fn is_ok(self) -> bool {
        matches!(self, Status::Ok)
    }
}

impl<T, E> From<Result<T, SynthError<E>>> for Status {
    fn from(result: Result<T, SynthError<E>>) -> Self {
        match result {
            Ok(_) => Status::Ok,
            Err(_) => Status::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn every_error_collapses_to_status_error() {
        let errors: [SynthError<u8>; 5] = [
            SynthError::NotReady,
            SynthError::Unsupported(Capability::Transmit),
            SynthError::Hardware(7),
            SynthError::InvalidArgument,
            SynthError::Overflow,
        ];
        for e in errors {
            assert_eq!(Status::from(Err::<(), _>(e)), Status::Error);
        }
        assert_eq!(Status::from(Ok::<u32, SynthError<u8>>(3)), Status::Ok);
    }

    #[test]
    fn status_codes_match_wire_values() {
        assert_eq!(Status::Ok.code(), 0);
        assert_eq!(Status::Error.code(), 1);
        assert_eq!(Status::Busy.code(), 2);
        assert_eq!(Status::Timeout.code(), 3);
        for code in 0..4 {
            assert_eq!(Status::from_code(code).map(Status::code), Some(code));
        }
        assert_eq!(Status::from_code(4), None);
        assert!(Status::Ok.is_ok());
        assert!(!Status::Busy.is_ok());
    }

    #[test]
    fn kind_and_hardware_classification() {
        let e: SynthError<()> = SynthError::Unsupported(Capability::Init);
        assert_eq!(e.kind(), ErrorKind::Unsupported);
        assert!(e.is_hardware());
        assert!(SynthError::Hardware(()).is_hardware());
        assert!(!SynthError::<()>::NotReady.is_hardware());
        assert_eq!(SynthError::<()>::Overflow.kind(), ErrorKind::Overflow);
    }

    #[test]
    fn capability_display_names() {
        assert_eq!(Capability::SetSampleRate.to_string(), "set_sample_rate");
        let e: SynthError<()> = SynthError::Unsupported(Capability::Transmit);
        assert_eq!(e.to_string(), "backend does not provide `transmit`");
    }
}
