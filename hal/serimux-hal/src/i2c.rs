//! I2C control word encoding
//!
//! Only the engine configuration is defined here. Transfer framing for I2C
//! is not implemented by the multiplexer.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::uart::{ClockSource, UCSYNC};

const UCA10: u16 = 0x8000;
const UCSLA10: u16 = 0x4000;
const UCMST: u16 = 0x0800;
const UCMODE_3: u16 = 0x0600;
const UCTR: u16 = 0x0010;

/// Own and slave address width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AddressWidth {
    #[default]
    SevenBit,
    TenBit,
}

/// Data direction of the master
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    #[default]
    Transmit,
    Receive,
}

/// Single-master I2C configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct I2cFormat {
    /// Address width for both own and slave addresses
    pub width: AddressWidth,
    /// Transmitter or receiver
    pub direction: Direction,
}

impl I2cFormat {
    /// Control word 0 for a single-master bus clocked from SMCLK
    pub const fn ctlw0(&self) -> u16 {
        let mut word = UCMST | UCMODE_3 | UCSYNC | ClockSource::Smclk.bits();
        if matches!(self.width, AddressWidth::TenBit) {
            word |= UCA10 | UCSLA10;
        }
        if matches!(self.direction, Direction::Transmit) {
            word |= UCTR;
        }
        word
    }
}
