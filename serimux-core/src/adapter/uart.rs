//! UART adapter
//!
//! Writes are interrupt-driven. Reception is continuous: while an engine is
//! programmed for a UART endpoint every received byte lands in that
//! endpoint's ring buffer, and reads only drain what has already arrived.

use serimux_hal::{EngineId, Mode, SerialEngine};

use super::{start_write, write_and_wait};
use crate::error::Result;
use crate::mux::Mux;
use crate::registry::EndpointId;

/// UART operations on one engine
pub struct Uart<'a, H, const N: usize> {
    mux: &'a Mux<H, N>,
    engine: EngineId,
}

impl<'a, H: SerialEngine, const N: usize> Uart<'a, H, N> {
    pub(crate) fn new(mux: &'a Mux<H, N>, engine: EngineId) -> Self {
        Self { mux, engine }
    }

    pub fn engine(&self) -> EngineId {
        self.engine
    }

    /// Start sending `data`
    ///
    /// Returns as soon as the first byte is loaded; the interrupt handler
    /// sends the rest. Fails with `Busy` while a transfer is in flight.
    pub fn write(&self, id: EndpointId, data: &'static [u8]) -> Result<()> {
        start_write(self.mux, self.engine, Mode::Uart, id, data).map(|_| ())
    }

    /// Send `data` and wait until the last byte has left the TX register
    pub async fn write_async(&self, id: EndpointId, data: &'static [u8]) -> Result<()> {
        write_and_wait(self.mux, self.engine, Mode::Uart, id, data).await
    }

    /// Program the engine for `id` so it starts collecting received bytes
    pub fn listen(&self, id: EndpointId) -> Result<()> {
        self.mux.with(|cs, inner| {
            inner.admit(self.engine, id, Mode::Uart)?;
            inner.configure(cs, self.engine, id).map(|_| ())
        })
    }

    /// Consume up to `len` received bytes without copying them
    ///
    /// Returns how many were consumed. The bytes stay readable in the
    /// endpoint's buffer until overwritten. Never touches the hardware.
    pub fn read(&self, id: EndpointId, len: usize) -> Result<usize> {
        self.drain(id, len, &mut [])
    }

    /// Move received bytes into `out`, oldest first
    pub fn read_into(&self, id: EndpointId, out: &mut [u8]) -> Result<usize> {
        self.drain(id, out.len(), out)
    }

    fn drain(&self, id: EndpointId, len: usize, out: &mut [u8]) -> Result<usize> {
        self.mux.with(|_, inner| {
            inner.check(self.engine, id, Mode::Uart)?;
            let (slot, endpoint) = inner.split(self.engine, id)?;
            if slot.active() != Some(id) {
                return Ok(0);
            }
            Ok(slot.drain(&endpoint.rx_buffer[..], len, out))
        })
    }
}
