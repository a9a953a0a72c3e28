//! Resource identifiers
//!
//! A resource names the engine an endpoint runs on, the protocol it runs
//! and a 12-bit chip-select or bus address. The packed 16-bit form is
//! `[engine:2][mode:2][address:12]` and is what gets persisted.

use core::fmt;

use serimux_hal::{EngineId, Mode};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mask for the address field
pub const ADDRESS_MASK: u16 = 0x0FFF;

const ENGINE_SHIFT: u16 = 14;
const MODE_SHIFT: u16 = 12;

/// Which engine, in which mode, talking to which device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "u16", into = "u16")
)]
pub struct ResourceId {
    engine: EngineId,
    mode: Mode,
    address: u16,
}

impl ResourceId {
    /// UART on `engine`
    pub const fn uart(engine: EngineId) -> Self {
        Self { engine, mode: Mode::Uart, address: 0 }
    }

    /// SPI on `engine`, selecting device `cs`
    pub const fn spi(engine: EngineId, cs: u16) -> Self {
        Self { engine, mode: Mode::Spi, address: cs & ADDRESS_MASK }
    }

    /// I2C on `engine`, targeting `address`
    pub const fn i2c(engine: EngineId, address: u16) -> Self {
        Self { engine, mode: Mode::I2c, address: address & ADDRESS_MASK }
    }

    /// Decode a packed resource code
    ///
    /// Returns `None` for mode code `0b00`, which names no protocol.
    pub const fn from_raw(raw: u16) -> Option<Self> {
        let engine = match raw >> ENGINE_SHIFT {
            0b01 => EngineId::A0,
            0b10 => EngineId::A1,
            0b11 => EngineId::B0,
            _ => EngineId::B1,
        };
        let mode = match (raw >> MODE_SHIFT) & 0b11 {
            0b01 => Mode::Uart,
            0b10 => Mode::Spi,
            0b11 => Mode::I2c,
            _ => return None,
        };
        Some(Self { engine, mode, address: raw & ADDRESS_MASK })
    }

    /// Packed resource code
    pub const fn raw(self) -> u16 {
        let engine: u16 = match self.engine {
            EngineId::A0 => 0b01,
            EngineId::A1 => 0b10,
            EngineId::B0 => 0b11,
            EngineId::B1 => 0b00,
        };
        let mode: u16 = match self.mode {
            Mode::Uart => 0b01,
            Mode::Spi => 0b10,
            Mode::I2c => 0b11,
        };
        (engine << ENGINE_SHIFT) | (mode << MODE_SHIFT) | (self.address & ADDRESS_MASK)
    }

    pub const fn engine(&self) -> EngineId {
        self.engine
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Chip-select value (SPI) or bus address (I2C); zero for UART
    ///
    /// Always within [`ADDRESS_MASK`].
    pub const fn address(&self) -> u16 {
        self.address
    }

    /// Whether this resource is `mode` on `engine`
    pub fn targets(&self, engine: EngineId, mode: Mode) -> bool {
        self.engine == engine && self.mode == mode
    }
}

/// Packed resource code with an invalid mode field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidResource(pub u16);

impl fmt::Display for InvalidResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid resource code {:#06x}", self.0)
    }
}

impl TryFrom<u16> for ResourceId {
    type Error = InvalidResource;

    fn try_from(raw: u16) -> Result<Self, Self::Error> {
        Self::from_raw(raw).ok_or(InvalidResource(raw))
    }
}

impl From<ResourceId> for u16 {
    fn from(resource: ResourceId) -> u16 {
        resource.raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_codes() {
        // UCA0 UART
        assert_eq!(ResourceId::uart(EngineId::A0).raw(), 0x5000);
        // UCB0 SPI, chip select 3
        assert_eq!(ResourceId::spi(EngineId::B0, 3).raw(), 0xE003);
        // UCB1 I2C, address 0x48
        assert_eq!(ResourceId::i2c(EngineId::B1, 0x48).raw(), 0x3048);
    }

    #[test]
    fn test_invalid_mode_rejected() {
        assert_eq!(ResourceId::from_raw(0x4000), None);
        assert_eq!(ResourceId::try_from(0x0123), Err(InvalidResource(0x0123)));
    }

    #[test]
    fn test_address_masked() {
        let r = ResourceId::spi(EngineId::A1, 0xF123);
        assert_eq!(r.address(), 0x0123);
        assert_eq!(ResourceId::i2c(EngineId::B0, 0xFFFF).address(), ADDRESS_MASK);
        assert!(r.targets(EngineId::A1, Mode::Spi));
        assert!(!r.targets(EngineId::A0, Mode::Spi));
    }

    proptest! {
        #[test]
        fn raw_decodes_to_same_code(raw in any::<u16>()) {
            match ResourceId::from_raw(raw) {
                Some(r) => {
                    prop_assert_eq!(r.raw(), raw);
                    prop_assert!(r.address() <= ADDRESS_MASK);
                }
                None => prop_assert_eq!((raw >> 12) & 0b11, 0),
            }
        }
    }
}
