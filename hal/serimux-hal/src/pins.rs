//! Pin-function selection
//!
//! Each engine's signals (TXD/SIMO, RXD/SOMI, CLK) share pins with GPIO.
//! Before an engine is reprogrammed its pins are switched to the
//! peripheral function for the mode being configured; releasing an engine
//! hands them back to GPIO.

use crate::engine::Mode;

/// Pin routing for one engine
///
/// Implementations should handle the actual port select registers for the
/// specific chip.
pub trait PinMux {
    /// Connect the engine's signals for `mode`
    ///
    /// `address` is the 12-bit chip-select / slave address field of the
    /// endpoint being configured. Chips that route a hardware slave address
    /// may use it; the MSP430 tables ignore it.
    fn configure_pins(&mut self, mode: Mode, address: u16);

    /// Return the engine's pins to GPIO
    fn clear_pins(&mut self);
}
