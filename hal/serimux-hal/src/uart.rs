//! UART control word encoding
//!
//! Builds the control word 0 value for an engine running asynchronous UART
//! and converts baud rates into clock divisors.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Synchronous mode enable (SPI, I2C)
pub const UCSYNC: u16 = 0x0100;
/// MSB first
pub const UCMSB: u16 = 0x2000;
/// 7-bit character length
pub const UC7BIT: u16 = 0x1000;

const UCPEN: u16 = 0x8000;
const UCPAR: u16 = 0x4000;
const UCSPB: u16 = 0x0800;

/// Default control word 1: ~200 ns deglitch
pub const DEFAULT_CTLW1: u16 = 0x0003;

/// Engine clock source selection (UCSSEL field)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClockSource {
    /// External engine clock pin
    Uclk,
    /// Auxiliary clock
    Aclk,
    /// Sub-main clock (what the divisors in this workspace assume)
    #[default]
    Smclk,
}

impl ClockSource {
    /// UCSSEL bits for control word 0
    pub const fn bits(self) -> u16 {
        match self {
            ClockSource::Uclk => 0x0000,
            ClockSource::Aclk => 0x0040,
            ClockSource::Smclk => 0x0080,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StopBits {
    One,
    Two,
}

/// UART frame format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UartFormat {
    /// Number of data bits per frame
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
    /// Clock feeding the baud generator
    pub clock: ClockSource,
}

impl Default for UartFormat {
    fn default() -> Self {
        Self::EIGHT_N_ONE
    }
}

impl UartFormat {
    /// 8 data bits, no parity, 1 stop bit, clocked from SMCLK
    pub const EIGHT_N_ONE: Self = Self {
        data_bits: DataBits::Eight,
        parity: Parity::None,
        stop_bits: StopBits::One,
        clock: ClockSource::Smclk,
    };

    /// 7 data bits, no parity, 1 stop bit, clocked from SMCLK
    pub const SEVEN_N_ONE: Self = Self {
        data_bits: DataBits::Seven,
        ..Self::EIGHT_N_ONE
    };

    /// Control word 0 for this format
    pub const fn ctlw0(&self) -> u16 {
        let mut word = self.clock.bits();
        if matches!(self.data_bits, DataBits::Seven) {
            word |= UC7BIT;
        }
        match self.parity {
            Parity::None => {}
            Parity::Odd => word |= UCPEN,
            Parity::Even => word |= UCPEN | UCPAR,
        }
        if matches!(self.stop_bits, StopBits::Two) {
            word |= UCSPB;
        }
        word
    }
}

/// Convert a target bit rate into a clock divisor
///
/// Returns `None` for a zero rate or when the divisor does not fit the
/// 16-bit divisor register. A rate above the clock yields a divisor of 1.
pub const fn baud_divisor(clock_hz: u32, baud: u32) -> Option<u16> {
    if baud == 0 {
        return None;
    }
    let div = clock_hz / baud;
    if div > u16::MAX as u32 {
        None
    } else if div == 0 {
        Some(1)
    } else {
        Some(div as u16)
    }
}
