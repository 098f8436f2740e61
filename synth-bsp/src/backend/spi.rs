//! SPI-fed audio backend.
//!
//! Streams PCM bytes to an I2S/SPI DAC through any
//! [`embedded_hal::spi::SpiDevice`], with the output amplifier powered by an
//! enable pin and an optional mute pin.
//!
//! # Example
//!
//! ```ignore
//! let backend = SpiBackend::new(spi_device, amp_enable).with_mute_pin(amp_mute);
//! let mut synth = Synth::with_backend(backend);
//! synth.init(48_000, 2)?;
//! synth.play_buffer(&samples)?;
//! ```
//!
//! The sample clock itself is board configuration; this backend records the
//! requested rate so [`sample_rate`](SynthBackend::sample_rate) can report it.

use core::convert::Infallible;

use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, SpiDevice};

use super::SynthBackend;

/// Error from the SPI bus or one of the control pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiBackendError {
    /// The SPI transfer failed.
    Spi(spi::ErrorKind),
    /// Driving the enable or mute pin failed.
    Pin(digital::ErrorKind),
}

fn spi_err<E: spi::Error>(e: E) -> SpiBackendError {
    SpiBackendError::Spi(e.kind())
}

fn pin_err<E: digital::Error>(e: E) -> SpiBackendError {
    SpiBackendError::Pin(e.kind())
}

/// Placeholder for a board without a mute pin.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPin;

impl digital::ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Audio backend over an SPI device and GPIO control pins.
///
/// Generic over the SPI device, the amplifier enable pin and the mute pin.
/// Both pins are active-high.
pub struct SpiBackend<SPI, EN, MUTE = NoPin> {
    spi: SPI,
    enable: EN,
    mute: Option<MUTE>,
    /// Last rate applied through `set_sample_rate`; 0 until configured.
    sample_rate: u32,
}

impl<SPI, EN> SpiBackend<SPI, EN, NoPin>
where
    SPI: SpiDevice,
    EN: OutputPin,
{
    /// Create a backend without a mute pin. The mute slot is absent.
    pub fn new(spi: SPI, enable: EN) -> Self {
        Self {
            spi,
            enable,
            mute: None,
            sample_rate: 0,
        }
    }

    /// Attach a mute pin, providing the mute slot.
    pub fn with_mute_pin<M: OutputPin>(self, mute: M) -> SpiBackend<SPI, EN, M> {
        SpiBackend {
            spi: self.spi,
            enable: self.enable,
            mute: Some(mute),
            sample_rate: self.sample_rate,
        }
    }
}

impl<SPI, EN, MUTE> SpiBackend<SPI, EN, MUTE> {
    /// Consume the backend and return the SPI device and pins.
    pub fn release(self) -> (SPI, EN, Option<MUTE>) {
        (self.spi, self.enable, self.mute)
    }
}

impl<SPI, EN, MUTE> SynthBackend for SpiBackend<SPI, EN, MUTE>
where
    SPI: SpiDevice,
    EN: OutputPin,
    MUTE: OutputPin,
{
    type Error = SpiBackendError;

    fn init(&mut self) -> Option<Result<(), SpiBackendError>> {
        Some(self.enable.set_high().map_err(pin_err))
    }

    fn deinit(&mut self) -> Option<Result<(), SpiBackendError>> {
        Some(self.enable.set_low().map_err(pin_err))
    }

    fn transmit(&mut self, data: &[u8]) -> Option<Result<(), SpiBackendError>> {
        Some(self.spi.write(data).map_err(spi_err))
    }

    fn set_sample_rate(&mut self, sample_rate: u32) -> Option<Result<(), SpiBackendError>> {
        self.sample_rate = sample_rate;
        Some(Ok(()))
    }

    fn sample_rate(&mut self) -> Option<Result<u32, SpiBackendError>> {
        Some(Ok(self.sample_rate))
    }

    fn mute(&mut self, enable: bool) -> Option<Result<(), SpiBackendError>> {
        let pin = self.mute.as_mut()?;
        let result = if enable { pin.set_high() } else { pin.set_low() };
        Some(result.map_err(pin_err))
    }
}
