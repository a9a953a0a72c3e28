//! Serial engine multiplexer
//!
//! Shares a handful of physical serial engines between many logical
//! endpoints. This crate is hardware-independent; it drives any engine
//! implementing [`serimux_hal::SerialEngine`]:
//!
//! - Endpoint registry (sequential ids, fixed capacity)
//! - Engine configuration cache (reprogram only on endpoint change)
//! - Interrupt-driven transfer state machine
//! - UART, SPI and I2C adapters
//! - Board and endpoint configuration types

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible everywhere
mod fmt;

pub mod adapter;
pub mod config;
pub mod engine;
pub mod error;
pub mod mux;
pub mod registry;
pub mod resource;

#[cfg(test)]
mod test_support;

pub use adapter::{I2c, Spi, SpiBlocking, Uart};
pub use config::{BoardConfig, ConfigError, EndpointConfig, EndpointSettings, EngineBinding};
pub use engine::{Completion, CompletionSignal, EngineStatus, TransferEvent};
pub use error::{Error, Result};
pub use mux::Mux;
pub use registry::{EndpointId, Registry, MAX_ENDPOINTS};
pub use resource::ResourceId;
pub use serimux_hal::{EngineId, Mode};
