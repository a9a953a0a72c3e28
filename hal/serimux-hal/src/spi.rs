//! SPI control word encoding
//!
//! Provides the clock mode and role types for engines running synchronous
//! SPI, and their control word 0 encoding.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::uart::{ClockSource, UCMSB, UCSYNC};

const UCCKPH: u16 = 0x8000;
const UCCKPL: u16 = 0x4000;
const UCMST: u16 = 0x0800;

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpiMode {
    /// Mode 0: CPOL=0, CPHA=0
    #[default]
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl SpiMode {
    /// Clock polarity and phase of this mode
    pub const fn clocking(self) -> (Polarity, Phase) {
        match self {
            SpiMode::Mode0 => (Polarity::IdleLow, Phase::CaptureOnFirstTransition),
            SpiMode::Mode1 => (Polarity::IdleLow, Phase::CaptureOnSecondTransition),
            SpiMode::Mode2 => (Polarity::IdleHigh, Phase::CaptureOnFirstTransition),
            SpiMode::Mode3 => (Polarity::IdleHigh, Phase::CaptureOnSecondTransition),
        }
    }
}

/// Which end of the bus drives the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpiRole {
    #[default]
    Master,
    Slave,
}

/// SPI engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpiFormat {
    /// Clock polarity and phase
    pub mode: SpiMode,
    /// Master or slave
    pub role: SpiRole,
    /// Shift most significant bit first
    pub msb_first: bool,
    /// Bit clock source (ignored by slaves)
    pub clock: ClockSource,
}

impl Default for SpiFormat {
    fn default() -> Self {
        Self::master(SpiMode::Mode0)
    }
}

impl SpiFormat {
    /// 8-bit MSB-first master clocked from SMCLK
    pub const fn master(mode: SpiMode) -> Self {
        Self {
            mode,
            role: SpiRole::Master,
            msb_first: true,
            clock: ClockSource::Smclk,
        }
    }

    /// 8-bit MSB-first slave
    pub const fn slave(mode: SpiMode) -> Self {
        Self {
            mode,
            role: SpiRole::Slave,
            msb_first: true,
            clock: ClockSource::Uclk,
        }
    }

    /// Control word 0 for this format
    ///
    /// The engine's UCCKPH bit is the inverse of CPHA: set means data is
    /// captured on the first edge.
    pub const fn ctlw0(&self) -> u16 {
        let mut word = UCSYNC;
        let (polarity, phase) = self.mode.clocking();
        if matches!(phase, Phase::CaptureOnFirstTransition) {
            word |= UCCKPH;
        }
        if matches!(polarity, Polarity::IdleHigh) {
            word |= UCCKPL;
        }
        if self.msb_first {
            word |= UCMSB;
        }
        if matches!(self.role, SpiRole::Master) {
            word |= UCMST | self.clock.bits();
        }
        word
    }
}
