//! Board-level engine bindings
//!
//! A board wires each engine to exactly one protocol. The binding table
//! is validated once and then used to reject endpoints that would drive an
//! engine in a mode the board never routed.

use heapless::Vec;
use serimux_hal::engine::MAX_ENGINES;
use serimux_hal::{baud_divisor, EngineId, Mode};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Board configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Engine bound twice
    DuplicateEngine(EngineId),
    /// Engine cannot run the bound protocol
    UnsupportedMode(EngineId, Mode),
    /// Failed to encode for storage
    Serialize,
    /// Stored bytes did not decode
    Deserialize,
}

/// One engine and the protocol it runs on this board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineBinding {
    pub engine: EngineId,
    pub mode: Mode,
}

/// Board wiring
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    /// SMCLK frequency the engines are clocked from
    pub smclk_hz: u32,
    /// Protocol per engine
    pub bindings: Vec<EngineBinding, MAX_ENGINES>,
}

impl BoardConfig {
    /// Board with no engines bound
    pub const fn new(smclk_hz: u32) -> Self {
        Self { smclk_hz, bindings: Vec::new() }
    }

    /// Add a binding, checking it against the ones already present
    pub fn bind(mut self, engine: EngineId, mode: Mode) -> Result<Self, ConfigError> {
        if !engine.kind().supports(mode) {
            return Err(ConfigError::UnsupportedMode(engine, mode));
        }
        if self.binding(engine).is_some() {
            return Err(ConfigError::DuplicateEngine(engine));
        }
        // One binding per engine, so the table cannot overflow
        self.bindings
            .push(EngineBinding { engine, mode })
            .map_err(|b| ConfigError::DuplicateEngine(b.engine))?;
        Ok(self)
    }

    /// Protocol bound to `engine`, if any
    pub fn binding(&self, engine: EngineId) -> Option<Mode> {
        self.bindings
            .iter()
            .find(|b| b.engine == engine)
            .map(|b| b.mode)
    }

    /// Check every binding (tables built by hand or loaded from storage)
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, b) in self.bindings.iter().enumerate() {
            if !b.engine.kind().supports(b.mode) {
                return Err(ConfigError::UnsupportedMode(b.engine, b.mode));
            }
            if self.bindings[..i].iter().any(|p| p.engine == b.engine) {
                return Err(ConfigError::DuplicateEngine(b.engine));
            }
        }
        Ok(())
    }

    /// Divisor for `baud` from this board's SMCLK
    pub fn baud_divisor(&self, baud: u32) -> Option<u16> {
        baud_divisor(self.smclk_hz, baud)
    }

    /// Encode into `buf` for non-volatile storage
    #[cfg(feature = "serde")]
    pub fn to_slice<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Serialize)
    }

    /// Decode and validate a stored configuration
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let board: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;
        board.validate()?;
        Ok(board)
    }
}
