//! Engine identities and protocol modes
//!
//! MSP430 parts carry up to four serial engines: two "A" blocks that run
//! UART or SPI, and two "B" blocks that run SPI or I2C.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum number of engines on any supported part
pub const MAX_ENGINES: usize = 4;

/// Physical serial engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EngineId {
    /// USCI/eUSCI A0
    A0,
    /// USCI/eUSCI A1
    A1,
    /// USCI/eUSCI B0
    B0,
    /// USCI B1 (absent on FR57xx parts)
    B1,
}

impl EngineId {
    /// All engines in table order
    pub const ALL: [EngineId; MAX_ENGINES] = [EngineId::A0, EngineId::A1, EngineId::B0, EngineId::B1];

    /// Index into per-engine tables
    pub const fn index(self) -> usize {
        match self {
            EngineId::A0 => 0,
            EngineId::A1 => 1,
            EngineId::B0 => 2,
            EngineId::B1 => 3,
        }
    }

    /// Which block family this engine belongs to
    pub const fn kind(self) -> EngineKind {
        match self {
            EngineId::A0 | EngineId::A1 => EngineKind::A,
            EngineId::B0 | EngineId::B1 => EngineKind::B,
        }
    }
}

/// Engine block family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineKind {
    /// Asynchronous-capable block (UART, SPI)
    A,
    /// Synchronous-only block (SPI, I2C)
    B,
}

impl EngineKind {
    /// Check whether this block can run the given protocol
    pub const fn supports(self, mode: Mode) -> bool {
        matches!(
            (self, mode),
            (EngineKind::A, Mode::Uart)
                | (EngineKind::A, Mode::Spi)
                | (EngineKind::B, Mode::Spi)
                | (EngineKind::B, Mode::I2c)
        )
    }
}

/// Electrical protocol an engine is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// Asynchronous UART
    Uart,
    /// Synchronous SPI
    Spi,
    /// I2C
    I2c,
}

impl Mode {
    /// Synchronous modes only receive while the engine clocks dummy bytes
    pub const fn is_synchronous(self) -> bool {
        !matches!(self, Mode::Uart)
    }
}
