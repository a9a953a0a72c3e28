//! Engine register surface
//!
//! The multiplexer treats an engine's registers as opaque state that only
//! the configuration cache and the interrupt handler touch. Implementations
//! map each method onto the matching memory-mapped register (or, in host
//! tests, onto a simulated engine).

/// Register-level access to one serial engine
///
/// All methods are infallible single register operations; sequencing and
/// atomicity are the caller's responsibility.
pub trait EngineRegisters {
    /// Hold the engine's state machine in reset (set the software reset bit)
    fn hold_reset(&mut self);

    /// Release the engine from reset and resume operation
    fn release_reset(&mut self);

    /// Write control word 0 (mode, clock source, polarity, phase, ...)
    ///
    /// The value is written while the engine is held in reset; the reset
    /// bit itself is preserved by implementations.
    fn write_ctlw0(&mut self, value: u16);

    /// Write control word 1 (deglitch time and similar)
    ///
    /// Engines without a second control word ignore this.
    fn write_ctlw1(&mut self, value: u16);

    /// Write the baud-rate / bit-clock divisor
    fn write_baud(&mut self, divisor: u16);

    /// Enable the receive and transmit interrupts
    fn enable_interrupts(&mut self);

    /// Disable the receive and transmit interrupts
    fn disable_interrupts(&mut self);

    /// Load a byte into the transmit register
    fn write_tx(&mut self, byte: u8);

    /// Read the receive register (clears the receive flag)
    fn read_rx(&mut self) -> u8;

    /// Transmit register empty, ready for the next byte
    fn tx_pending(&self) -> bool;

    /// A byte has arrived in the receive register
    fn rx_pending(&self) -> bool;

    /// The byte in the receive register was flagged (framing, overrun, parity)
    fn rx_error(&self) -> bool;

    /// A shift is in progress on the wire
    fn is_busy(&self) -> bool;

    /// Acknowledge the transmit interrupt once there is nothing left to send
    fn ack_tx(&mut self);
}
