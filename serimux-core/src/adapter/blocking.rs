//! Blocking `embedded-hal` SPI bus over [`Spi::swap`]
//!
//! Lets device drivers written against `embedded_hal::spi::SpiBus` share
//! an engine with interrupt-driven endpoints. Chip select stays with the
//! caller (wrap this in an `SpiDevice` implementation if needed).

use embedded_hal::spi::{ErrorType, SpiBus};
use serimux_hal::SerialEngine;

use super::Spi;
use crate::engine::DUMMY_BYTE;
use crate::error::Error;
use crate::registry::EndpointId;

/// One endpoint of an SPI engine as a blocking bus
pub struct SpiBlocking<'a, H, const N: usize> {
    spi: Spi<'a, H, N>,
    id: EndpointId,
}

impl<'a, H: SerialEngine, const N: usize> SpiBlocking<'a, H, N> {
    pub(crate) fn new(spi: Spi<'a, H, N>, id: EndpointId) -> Self {
        Self { spi, id }
    }

    pub fn endpoint(&self) -> EndpointId {
        self.id
    }
}

impl<H: SerialEngine, const N: usize> ErrorType for SpiBlocking<'_, H, N> {
    type Error = Error;
}

impl<H: SerialEngine, const N: usize> SpiBus<u8> for SpiBlocking<'_, H, N> {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Error> {
        for word in words {
            *word = self.spi.swap(self.id, DUMMY_BYTE)?;
        }
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Error> {
        for &word in words {
            self.spi.swap(self.id, word)?;
        }
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Error> {
        for i in 0..read.len().max(write.len()) {
            let out = write.get(i).copied().unwrap_or(DUMMY_BYTE);
            let byte = self.spi.swap(self.id, out)?;
            if let Some(slot) = read.get_mut(i) {
                *slot = byte;
            }
        }
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Error> {
        for word in words {
            *word = self.spi.swap(self.id, *word)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Error> {
        // swap only returns once the shift is complete
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{EndpointConfig, EndpointSettings};
    use crate::mux::Mux;
    use crate::test_support::{leak_buffer, MockEngine};
    use embedded_hal::spi::SpiBus;
    use serimux_hal::spi::{SpiFormat, SpiMode};
    use serimux_hal::EngineId;

    #[test]
    fn test_transfer_pads_short_write() {
        let hw = MockEngine::new();
        let mux: Mux<MockEngine> = Mux::new([(EngineId::A1, hw.clone())]);
        let id = mux
            .register(EndpointConfig::new(
                EndpointSettings::spi(EngineId::A1, 0, SpiFormat::master(SpiMode::Mode0), 2),
                leak_buffer(1),
            ))
            .unwrap();
        for b in [0x00, 0xC2, 0x20, 0x16] {
            hw.queue_reply(b);
        }

        let mut bus = mux.spi(EngineId::A1).blocking(id);
        let mut id_bytes = [0u8; 4];
        bus.transfer(&mut id_bytes, &[0x9F]).unwrap();

        assert_eq!(id_bytes, [0x00, 0xC2, 0x20, 0x16]);
        assert_eq!(hw.state().sent, [0x9F, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_in_place_and_write() {
        let hw = MockEngine::new();
        let mux: Mux<MockEngine> = Mux::new([(EngineId::B0, hw.clone())]);
        let id = mux
            .register(EndpointConfig::new(
                EndpointSettings::spi(EngineId::B0, 1, SpiFormat::master(SpiMode::Mode0), 2),
                leak_buffer(1),
            ))
            .unwrap();
        hw.queue_reply(0x11);
        hw.queue_reply(0x22);

        let mut bus = mux.spi(EngineId::B0).blocking(id);
        let mut words = [0xAA, 0xBB];
        bus.transfer_in_place(&mut words).unwrap();
        assert_eq!(words, [0x11, 0x22]);

        bus.write(&[1, 2, 3]).unwrap();
        bus.flush().unwrap();
        assert_eq!(hw.state().sent, [0xAA, 0xBB, 1, 2, 3]);
    }
}
