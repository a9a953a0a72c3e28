//! Protocol adapters
//!
//! Each adapter is a cheap handle naming one engine of a [`Mux`]. The
//! endpoint passed to every call must have been registered for that engine
//! in the adapter's protocol, otherwise the call fails with
//! `ConfigMismatch`.

mod blocking;
mod i2c;
mod spi;
mod uart;

pub use blocking::SpiBlocking;
pub use i2c::I2c;
pub use spi::Spi;
pub use uart::Uart;

use serimux_hal::{EngineId, Mode, SerialEngine};

use crate::engine::Ticket;
use crate::error::Result;
use crate::mux::Mux;
use crate::registry::EndpointId;

/// Start an interrupt-driven write of `data`
///
/// An empty `data` passes the checks and then does nothing, so no ticket
/// is issued for it.
fn start_write<H: SerialEngine, const N: usize>(
    mux: &Mux<H, N>,
    engine: EngineId,
    mode: Mode,
    id: EndpointId,
    data: &'static [u8],
) -> Result<Option<Ticket>> {
    mux.with(|cs, inner| {
        inner.admit(engine, id, mode)?;
        if data.is_empty() {
            return Ok(None);
        }
        Ok(inner.configure(cs, engine, id)?.start_tx(cs, data))
    })
}

/// Write and wait until the interrupt handler has sent the last byte
async fn write_and_wait<H: SerialEngine, const N: usize>(
    mux: &Mux<H, N>,
    engine: EngineId,
    mode: Mode,
    id: EndpointId,
    data: &'static [u8],
) -> Result<()> {
    match start_write(mux, engine, mode, id, data)? {
        Some(ticket) => mux.finished(engine, ticket).await,
        None => Ok(()),
    }
}
