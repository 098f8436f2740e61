//! Function-pointer backend.
//!
//! [`IoTable`] is the classic board-support shape: a struct of optional
//! plain functions, each returning `0` on success and any other value on
//! failure. Boards that already expose such routines can register them
//! without writing a trait implementation.
//!
//! ```ignore
//! fn board_init() -> i32 { /* power up I2S + amp */ 0 }
//! fn board_tx(data: &[u8], size: u32) -> i32 { /* start transfer */ 0 }
//!
//! let table = IoTable {
//!     init: Some(board_init),
//!     transmit: Some(board_tx),
//!     ..IoTable::EMPTY
//! };
//! let mut synth = Synth::new();
//! synth.register_io(Some(&table))?;
//! ```

use super::SynthBackend;
use crate::error::SynthError;
use crate::synth::Synth;

/// Non-zero return code from an [`IoTable`] callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IoError(pub i32);

impl IoError {
    /// Code reported when a buffer is too large for the `u32` size argument.
    pub const LENGTH: IoError = IoError(-1);

    fn check(code: i32) -> Result<(), IoError> {
        if code == 0 {
            Ok(())
        } else {
            Err(IoError(code))
        }
    }
}

/// Table of optional low-level I/O routines.
#[derive(Debug, Clone, Copy, Default)]
pub struct IoTable {
    pub init: Option<fn() -> i32>,
    pub deinit: Option<fn() -> i32>,
    /// Receives the PCM bytes and their length.
    pub transmit: Option<fn(&[u8], u32) -> i32>,
    pub set_sample_rate: Option<fn(u32) -> i32>,
    /// Writes the current rate through the out-parameter.
    pub get_sample_rate: Option<fn(&mut u32) -> i32>,
    pub mute: Option<fn(bool) -> i32>,
}

impl IoTable {
    /// A table with every slot absent.
    pub const EMPTY: IoTable = IoTable {
        init: None,
        deinit: None,
        transmit: None,
        set_sample_rate: None,
        get_sample_rate: None,
        mute: None,
    };
}

impl SynthBackend for IoTable {
    type Error = IoError;

    fn init(&mut self) -> Option<Result<(), IoError>> {
        self.init.map(|f| IoError::check(f()))
    }

    fn deinit(&mut self) -> Option<Result<(), IoError>> {
        self.deinit.map(|f| IoError::check(f()))
    }

    fn transmit(&mut self, data: &[u8]) -> Option<Result<(), IoError>> {
        let f = self.transmit?;
        Some(match u32::try_from(data.len()) {
            Ok(size) => IoError::check(f(data, size)),
            Err(_) => Err(IoError::LENGTH),
        })
    }

    fn set_sample_rate(&mut self, sample_rate: u32) -> Option<Result<(), IoError>> {
        self.set_sample_rate.map(|f| IoError::check(f(sample_rate)))
    }

    fn sample_rate(&mut self) -> Option<Result<u32, IoError>> {
        let f = self.get_sample_rate?;
        let mut rate = 0;
        Some(IoError::check(f(&mut rate)).map(|()| rate))
    }

    fn mute(&mut self, enable: bool) -> Option<Result<(), IoError>> {
        self.mute.map(|f| IoError::check(f(enable)))
    }
}

impl Synth<IoTable> {
    /// Register a routine table by reference, copying it into the driver.
    ///
    /// Fails with [`SynthError::InvalidArgument`] when `table` is `None`, in
    /// which case the current registration is kept. Otherwise returns the
    /// previously registered table, if any.
    pub fn register_io(
        &mut self,
        table: Option<&IoTable>,
    ) -> Result<Option<IoTable>, SynthError<IoError>> {
        let table = table.ok_or(SynthError::InvalidArgument)?;
        Ok(self.register_backend(*table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU32, Ordering};

    fn ok() -> i32 {
        0
    }

    fn fail() -> i32 {
        5
    }

    static TX_SIZE: AtomicU32 = AtomicU32::new(0);

    fn record_tx(data: &[u8], size: u32) -> i32 {
        assert_eq!(data.len() as u32, size);
        TX_SIZE.store(size, Ordering::Relaxed);
        0
    }

    fn report_rate(out: &mut u32) -> i32 {
        *out = 22_050;
        0
    }

    #[test]
    fn empty_table_has_no_slots() {
        let mut t = IoTable::EMPTY;
        assert!(t.init().is_none());
        assert!(t.transmit(&[0; 4]).is_none());
        assert!(t.sample_rate().is_none());
        assert!(IoTable::default().mute.is_none());
    }

    #[test]
    fn return_codes_map_to_results() {
        let mut t = IoTable {
            init: Some(ok),
            deinit: Some(fail),
            ..IoTable::EMPTY
        };
        assert_eq!(t.init(), Some(Ok(())));
        assert_eq!(t.deinit(), Some(Err(IoError(5))));
    }

    #[test]
    fn transmit_passes_byte_length() {
        let mut t = IoTable {
            transmit: Some(record_tx),
            ..IoTable::EMPTY
        };
        assert_eq!(t.transmit(&[0; 10]), Some(Ok(())));
        assert_eq!(TX_SIZE.load(Ordering::Relaxed), 10);
    }

    #[test]
    fn sample_rate_reads_out_parameter() {
        let mut t = IoTable {
            get_sample_rate: Some(report_rate),
            ..IoTable::EMPTY
        };
        assert_eq!(t.sample_rate(), Some(Ok(22_050)));
    }

    #[test]
    fn register_io_rejects_missing_table() {
        let mut synth: Synth<IoTable> = Synth::new();
        let first = IoTable {
            init: Some(ok),
            ..IoTable::EMPTY
        };
        assert!(matches!(synth.register_io(Some(&first)), Ok(None)));
        assert!(matches!(
            synth.register_io(None),
            Err(SynthError::InvalidArgument)
        ));
        // Rejected registration keeps the old table.
        assert!(synth.backend().is_some_and(|t| t.init.is_some()));

        let previous = synth.register_io(Some(&IoTable::EMPTY));
        assert!(matches!(previous, Ok(Some(t)) if t.init.is_some()));
        assert!(synth.backend().is_some_and(|t| t.init.is_none()));
    }
}
