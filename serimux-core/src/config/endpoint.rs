//! Endpoint configuration records

use serimux_hal::i2c::I2cFormat;
use serimux_hal::spi::SpiFormat;
use serimux_hal::uart::{UartFormat, DEFAULT_CTLW1};
use serimux_hal::EngineId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::resource::ResourceId;

/// Everything needed to program an engine for one endpoint
///
/// This is the persistable half of an [`EndpointConfig`]; the receive
/// buffer cannot be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EndpointSettings {
    /// Engine, protocol and device address
    pub resource: ResourceId,
    /// Control word 0
    pub ctlw0: u16,
    /// Control word 1 (eUSCI only)
    pub ctlw1: u16,
    /// Bit clock divisor
    pub baud_div: u16,
}

impl EndpointSettings {
    /// UART endpoint with the given frame format
    pub const fn uart(engine: EngineId, format: UartFormat, baud_div: u16) -> Self {
        Self {
            resource: ResourceId::uart(engine),
            ctlw0: format.ctlw0(),
            ctlw1: DEFAULT_CTLW1,
            baud_div,
        }
    }

    /// SPI endpoint for chip select `cs`
    pub const fn spi(engine: EngineId, cs: u16, format: SpiFormat, baud_div: u16) -> Self {
        Self {
            resource: ResourceId::spi(engine, cs),
            ctlw0: format.ctlw0(),
            ctlw1: 0,
            baud_div,
        }
    }

    /// I2C endpoint for the device at `address`
    pub const fn i2c(engine: EngineId, address: u16, format: I2cFormat, baud_div: u16) -> Self {
        Self {
            resource: ResourceId::i2c(engine, address),
            ctlw0: format.ctlw0(),
            ctlw1: 0,
            baud_div,
        }
    }
}

/// An endpoint as handed to the registry
///
/// The receive buffer is borrowed for the life of the program: the
/// interrupt handler writes into it whenever this endpoint is active.
#[derive(Debug)]
pub struct EndpointConfig {
    pub settings: EndpointSettings,
    pub rx_buffer: &'static mut [u8],
}

impl EndpointConfig {
    pub fn new(settings: EndpointSettings, rx_buffer: &'static mut [u8]) -> Self {
        Self { settings, rx_buffer }
    }

    pub fn resource(&self) -> ResourceId {
        self.settings.resource
    }
}
