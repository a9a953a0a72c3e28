//! MSP430-specific HAL for Serimux
//!
//! This crate implements the `serimux-hal` traits for the serial engines
//! found on MSP430 parts. It supports two register families:
//!
//! - eUSCI (FR57xx FRAM parts, e.g. MSP430FR5739: A0, A1, B0)
//! - USCI (F55xx/F534x parts, e.g. MSP430F5510, MSP430F5342: A0, A1, B0, B1)
//!
//! # Usage
//!
//! Pick the chip module, build the engine handles once at startup and hand
//! them to the multiplexer. Each engine's interrupt vector then forwards to
//! the multiplexer's interrupt entry point:
//!
//! ```ignore
//! let engines = unsafe { serimux_hal_msp430::chip::fr57xx::engines() };
//! let mux = MUX.init(Mux::new(engines));
//!
//! #[interrupt]
//! fn USCI_A0() {
//!     MUX.get().on_interrupt(EngineId::A0);
//! }
//! ```

#![no_std]

pub mod chip;
pub mod pins;
pub mod regs;

use serimux_hal::{EngineId, EngineRegisters, Mode, PinMux};

pub use pins::{PinGroup, PinRoute, SelectStyle};
pub use regs::{Family, UsciBlock};

/// One serial engine: its register block plus its pin routing
pub struct Usci {
    id: EngineId,
    regs: &'static dyn UsciBlock,
    route: &'static PinRoute,
    style: SelectStyle,
    connected: Option<Mode>,
}

impl Usci {
    /// Create an engine handle
    ///
    /// # Safety
    ///
    /// `base` must be the address of a real engine register block of the
    /// given family, and no other handle to the same engine may exist.
    pub unsafe fn new(
        id: EngineId,
        base: usize,
        family: Family,
        route: &'static PinRoute,
        style: SelectStyle,
    ) -> Self {
        Self {
            id,
            regs: family.block(base),
            route,
            style,
            connected: None,
        }
    }

    /// Which engine this handle drives
    pub fn id(&self) -> EngineId {
        self.id
    }
}

// SAFETY: a handle is the only path to its engine's registers (see `new`),
// so moving it to another context cannot create shared access.
unsafe impl Send for Usci {}

impl EngineRegisters for Usci {
    fn hold_reset(&mut self) {
        self.regs.hold_reset();
    }

    fn release_reset(&mut self) {
        self.regs.release_reset();
    }

    fn write_ctlw0(&mut self, value: u16) {
        self.regs.write_ctlw0(value);
    }

    fn write_ctlw1(&mut self, value: u16) {
        self.regs.write_ctlw1(value);
    }

    fn write_baud(&mut self, divisor: u16) {
        self.regs.write_baud(divisor);
    }

    fn enable_interrupts(&mut self) {
        self.regs.enable_interrupts();
    }

    fn disable_interrupts(&mut self) {
        self.regs.disable_interrupts();
    }

    fn write_tx(&mut self, byte: u8) {
        self.regs.write_tx(byte);
    }

    fn read_rx(&mut self) -> u8 {
        self.regs.read_rx()
    }

    fn tx_pending(&self) -> bool {
        self.regs.tx_pending()
    }

    fn rx_pending(&self) -> bool {
        self.regs.rx_pending()
    }

    fn rx_error(&self) -> bool {
        self.regs.rx_error()
    }

    fn is_busy(&self) -> bool {
        self.regs.is_busy()
    }

    fn ack_tx(&mut self) {
        self.regs.ack_tx();
    }
}

impl PinMux for Usci {
    fn configure_pins(&mut self, mode: Mode, _address: u16) {
        if let Some(previous) = self.connected.take() {
            pins::apply(self.style, self.route.groups(previous), false);
        }
        pins::apply(self.style, self.route.groups(mode), true);
        self.connected = Some(mode);
    }

    fn clear_pins(&mut self) {
        if let Some(mode) = self.connected.take() {
            pins::apply(self.style, self.route.groups(mode), false);
        }
    }
}
