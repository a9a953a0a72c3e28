//! Error type shared by every entry point
//!
//! Errors are plain values returned to the immediate caller. None are
//! retried automatically and none leave partial state behind: a rejected
//! call changes nothing.

use core::fmt;

/// Errors returned by the multiplexer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Registry is full
    CapacityExceeded,
    /// Endpoint's resource does not name this engine in this mode
    ConfigMismatch,
    /// Engine is mid-transfer
    Busy,
    /// Endpoint id was never issued by this registry
    UnknownEndpoint,
    /// Engine is not present on this board
    NoSuchEngine,
    /// Requested length exceeds the endpoint's receive buffer
    BufferTooSmall,
    /// Operation has no implementation for this mode
    Unsupported,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded => write!(f, "endpoint registry full"),
            Self::ConfigMismatch => write!(f, "endpoint not configured for this engine/mode"),
            Self::Busy => write!(f, "engine busy"),
            Self::UnknownEndpoint => write!(f, "unknown endpoint"),
            Self::NoSuchEngine => write!(f, "engine not present"),
            Self::BufferTooSmall => write!(f, "receive buffer too small"),
            Self::Unsupported => write!(f, "operation not supported"),
        }
    }
}

impl embedded_hal::spi::Error for Error {
    fn kind(&self) -> embedded_hal::spi::ErrorKind {
        embedded_hal::spi::ErrorKind::Other
    }
}

/// Result type for multiplexer operations
pub type Result<T> = core::result::Result<T, Error>;
