//! Serimux Hardware Abstraction Layer
//!
//! This crate defines the collaborator interfaces the multiplexer core
//! drives: the register surface of one serial engine, the pin-function
//! selection for an engine, and the control-word encodings for each
//! protocol mode. Chip-specific crates implement the traits; the core is
//! generic over them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (endpoints)                │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  serimux-core (registry, engines, ISR)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  serimux-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  serimux-hal-msp430 (eUSCI / USCI MMIO) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`regs::EngineRegisters`] - Control, baud, data and flag registers
//! - [`pins::PinMux`] - Connect/disconnect an engine's signals to pins
//! - [`SerialEngine`] - Both of the above, what the core consumes

#![no_std]
#![deny(unsafe_code)]

pub mod engine;
pub mod i2c;
pub mod pins;
pub mod regs;
pub mod spi;
pub mod uart;

// Re-export key items at crate root for convenience
pub use engine::{EngineId, EngineKind, Mode};
pub use pins::PinMux;
pub use regs::EngineRegisters;
pub use uart::baud_divisor;

/// A complete serial engine: register surface plus pin routing
///
/// This is the bound the multiplexer core places on its hardware type.
pub trait SerialEngine: EngineRegisters + PinMux {}

// Blanket implementation
impl<T: EngineRegisters + PinMux> SerialEngine for T {}
