//! SPI adapter
//!
//! Writes are interrupt-driven like UART writes. Reads are synchronous:
//! the engine clocks out dummy bytes and the interrupt handler captures
//! what comes back into the endpoint's buffer from offset zero. `swap`
//! bypasses the interrupt path for short command/status exchanges.

use serimux_hal::{EngineId, Mode, SerialEngine};

use super::{start_write, write_and_wait, SpiBlocking};
use crate::engine::{EngineStatus, Ticket};
use crate::error::{Error, Result};
use crate::mux::Mux;
use crate::registry::EndpointId;

/// SPI operations on one engine
pub struct Spi<'a, H, const N: usize> {
    mux: &'a Mux<H, N>,
    engine: EngineId,
}

impl<H, const N: usize> Clone for Spi<'_, H, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H, const N: usize> Copy for Spi<'_, H, N> {}

impl<'a, H: SerialEngine, const N: usize> Spi<'a, H, N> {
    pub(crate) fn new(mux: &'a Mux<H, N>, engine: EngineId) -> Self {
        Self { mux, engine }
    }

    pub fn engine(&self) -> EngineId {
        self.engine
    }

    /// Start sending `data`; bytes clocked in meanwhile are discarded
    pub fn write(&self, id: EndpointId, data: &'static [u8]) -> Result<()> {
        start_write(self.mux, self.engine, Mode::Spi, id, data).map(|_| ())
    }

    /// Send `data` and wait until the last byte has left the TX register
    pub async fn write_async(&self, id: EndpointId, data: &'static [u8]) -> Result<()> {
        write_and_wait(self.mux, self.engine, Mode::Spi, id, data).await
    }

    /// Start clocking in `len` bytes
    ///
    /// Collect them with [`Spi::received`] once the engine is Open again.
    /// `len` may not exceed the endpoint's buffer; zero does nothing.
    pub fn read(&self, id: EndpointId, len: usize) -> Result<()> {
        self.start_read(id, len).map(|_| ())
    }

    fn start_read(&self, id: EndpointId, len: usize) -> Result<Option<Ticket>> {
        self.mux.with(|cs, inner| {
            inner.admit(self.engine, id, Mode::Spi)?;
            if len > inner.registry.get(id)?.rx_buffer.len() {
                return Err(Error::BufferTooSmall);
            }
            if len == 0 {
                return Ok(None);
            }
            Ok(Some(inner.configure(cs, self.engine, id)?.start_capture(cs, len)))
        })
    }

    /// Copy the bytes captured by the last completed read into `out`
    ///
    /// Fails with `Busy` while that read is still running.
    pub fn received(&self, id: EndpointId, out: &mut [u8]) -> Result<usize> {
        self.mux.with(|_, inner| {
            inner.check(self.engine, id, Mode::Spi)?;
            let (slot, endpoint) = inner.split(self.engine, id)?;
            if slot.active() != Some(id) {
                return Ok(0);
            }
            if slot.status() == EngineStatus::Receiving {
                return Err(Error::Busy);
            }
            Ok(slot.captured(&endpoint.rx_buffer[..], out))
        })
    }

    /// Read `out.len()` bytes and wait for the interrupt handler to finish
    pub async fn read_async(&self, id: EndpointId, out: &mut [u8]) -> Result<usize> {
        match self.start_read(id, out.len())? {
            Some(ticket) => self.mux.finished(self.engine, ticket).await?,
            None => return Ok(0),
        }
        self.received(id, out)
    }

    /// Exchange one byte, blocking until it has been shifted
    pub fn swap(&self, id: EndpointId, byte: u8) -> Result<u8> {
        self.mux.with(|cs, inner| {
            inner.admit(self.engine, id, Mode::Spi)?;
            Ok(inner.configure(cs, self.engine, id)?.swap(cs, byte))
        })
    }

    /// Blocking `embedded-hal` bus for `id`, built on [`Spi::swap`]
    pub fn blocking(self, id: EndpointId) -> SpiBlocking<'a, H, N> {
        SpiBlocking::new(self, id)
    }
}
