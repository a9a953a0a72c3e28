//! Simulated engine for host tests

use std::cell::{Ref, RefCell, RefMut};
use std::collections::VecDeque;
use std::rc::Rc;

use serimux_hal::{EngineRegisters, Mode, PinMux};

/// A zeroed buffer that lives for the rest of the test binary
pub fn leak_buffer(len: usize) -> &'static mut [u8] {
    Box::leak(vec![0u8; len].into_boxed_slice())
}

/// Register-level view of the simulated engine
#[derive(Debug, Default)]
pub struct MockState {
    pub in_reset: bool,
    pub irq_enabled: bool,
    pub ctlw0: u16,
    pub ctlw1: u16,
    pub baud: u16,
    /// Number of control word 0 writes (one per reprogram)
    pub ctlw0_writes: usize,
    pub pins: Option<(Mode, u16)>,
    /// Every byte loaded into the TX register
    pub sent: Vec<u8>,
    pub tx_flag: bool,
    /// Byte waiting in the RX register and whether it was flagged
    pub rx: Option<(u8, bool)>,
    /// Bytes the far end clocks back on synchronous writes
    pub replies: VecDeque<(u8, bool)>,
    /// Replies stay in the shift register until the busy flag is polled
    /// or [`MockEngine::finish_shift`] is called
    pub slow_shift: bool,
    /// Reply still being shifted in
    pub shifting: Option<(u8, bool)>,
}

impl MockState {
    pub fn rx_pending(&self) -> bool {
        self.rx.is_some()
    }

    fn synchronous(&self) -> bool {
        self.pins.map_or(false, |(mode, _)| mode.is_synchronous())
    }
}

/// Shared handle so tests can inspect the engine after handing it over
#[derive(Debug, Clone, Default)]
pub struct MockEngine(Rc<RefCell<MockState>>);

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Ref<'_, MockState> {
        self.0.borrow()
    }

    pub fn state_mut(&self) -> RefMut<'_, MockState> {
        self.0.borrow_mut()
    }

    /// The TX register drained into the shift register
    pub fn raise_tx(&self) {
        self.0.borrow_mut().tx_flag = true;
    }

    /// A good byte arrived
    pub fn receive(&self, byte: u8) {
        self.0.borrow_mut().rx = Some((byte, false));
    }

    /// A byte arrived with a framing or overrun error
    pub fn receive_error(&self, byte: u8) {
        self.0.borrow_mut().rx = Some((byte, true));
    }

    /// Queue the byte clocked in by the next synchronous write
    pub fn queue_reply(&self, byte: u8) {
        self.0.borrow_mut().replies.push_back((byte, false));
    }

    pub fn set_slow_shift(&self, slow: bool) {
        self.0.borrow_mut().slow_shift = slow;
    }

    /// The byte in the shift register finished and landed in RX
    pub fn finish_shift(&self) {
        let mut s = self.0.borrow_mut();
        if let Some(reply) = s.shifting.take() {
            s.rx = Some(reply);
        }
    }

    /// Queue a flagged byte for the next synchronous write
    pub fn queue_reply_error(&self, byte: u8) {
        self.0.borrow_mut().replies.push_back((byte, true));
    }
}

impl EngineRegisters for MockEngine {
    fn hold_reset(&mut self) {
        let mut s = self.0.borrow_mut();
        s.in_reset = true;
        s.irq_enabled = false;
    }

    fn release_reset(&mut self) {
        self.0.borrow_mut().in_reset = false;
    }

    fn write_ctlw0(&mut self, value: u16) {
        let mut s = self.0.borrow_mut();
        s.ctlw0 = value;
        s.ctlw0_writes += 1;
    }

    fn write_ctlw1(&mut self, value: u16) {
        self.0.borrow_mut().ctlw1 = value;
    }

    fn write_baud(&mut self, divisor: u16) {
        self.0.borrow_mut().baud = divisor;
    }

    fn enable_interrupts(&mut self) {
        self.0.borrow_mut().irq_enabled = true;
    }

    fn disable_interrupts(&mut self) {
        self.0.borrow_mut().irq_enabled = false;
    }

    fn write_tx(&mut self, byte: u8) {
        let mut s = self.0.borrow_mut();
        s.sent.push(byte);
        s.tx_flag = false;
        if s.synchronous() {
            let reply = s.replies.pop_front().unwrap_or((0x00, false));
            if s.slow_shift {
                s.shifting = Some(reply);
            } else {
                s.rx = Some(reply);
            }
        }
    }

    fn read_rx(&mut self) -> u8 {
        self.0.borrow_mut().rx.take().map_or(0, |(byte, _)| byte)
    }

    fn tx_pending(&self) -> bool {
        self.0.borrow().tx_flag
    }

    fn rx_pending(&self) -> bool {
        self.0.borrow().rx.is_some()
    }

    fn rx_error(&self) -> bool {
        self.0.borrow().rx.map_or(false, |(_, err)| err)
    }

    /// Each poll while a byte is shifting lets that shift finish
    fn is_busy(&self) -> bool {
        let mut s = self.0.borrow_mut();
        match s.shifting.take() {
            Some(reply) => {
                s.rx = Some(reply);
                true
            }
            None => false,
        }
    }

    fn ack_tx(&mut self) {
        self.0.borrow_mut().tx_flag = false;
    }
}

impl PinMux for MockEngine {
    fn configure_pins(&mut self, mode: Mode, address: u16) {
        self.0.borrow_mut().pins = Some((mode, address));
    }

    fn clear_pins(&mut self) {
        self.0.borrow_mut().pins = None;
    }
}
