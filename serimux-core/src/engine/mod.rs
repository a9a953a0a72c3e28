//! Per-engine transfer state
//!
//! One [`Engine`] wraps the hardware for a physical engine together with
//! everything the interrupt handler needs: the active endpoint, the
//! transfer status and both cursors. All access goes through the `Mux`
//! critical section.
//!
//! Every transfer started on an engine gets a [`Ticket`]. Async callers
//! wait on their own ticket rather than on the shared completion signal,
//! so a completion can never be consumed by the wrong caller.

mod cache;
mod cursor;
mod isr;
pub mod state;

use core::task::{Context, Poll};

use critical_section::CriticalSection;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_sync::waitqueue::MultiWakerRegistration;
use serimux_hal::SerialEngine;

use crate::registry::EndpointId;
use cursor::{RxCursor, TxCursor};
pub use state::{EngineStatus, TransferEvent};

/// Byte clocked out to keep a synchronous read running
pub const DUMMY_BYTE: u8 = 0xFF;

/// Posted by the interrupt handler when a transfer finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Completion {
    /// All bytes of a write have left the TX register
    Sent { len: usize },
    /// A synchronous read captured its requested length
    Received { len: usize },
}

/// Completion channel for one engine
pub type CompletionSignal = Signal<CriticalSectionRawMutex, Completion>;

/// Tasks that can wait on one engine before spurious wakeups start
const WAITERS: usize = 4;

/// One transfer on one engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ticket(u32);

/// Hardware plus transfer bookkeeping for one engine
pub(crate) struct Engine<H> {
    hw: H,
    active: Option<EndpointId>,
    /// Active endpoint runs a clocked protocol
    synchronous: bool,
    status: EngineStatus,
    tx: TxCursor,
    rx: RxCursor,
    /// Ticket of the most recently started transfer
    generation: u32,
    waiters: MultiWakerRegistration<WAITERS>,
    rx_errors: u32,
    rx_overruns: u32,
}

impl<H: SerialEngine> Engine<H> {
    pub(crate) fn new(hw: H) -> Self {
        Self {
            hw,
            active: None,
            synchronous: false,
            status: EngineStatus::Open,
            tx: TxCursor::idle(),
            rx: RxCursor::default(),
            generation: 0,
            waiters: MultiWakerRegistration::new(),
            rx_errors: 0,
            rx_overruns: 0,
        }
    }

    pub(crate) fn status(&self) -> EngineStatus {
        self.status
    }

    pub(crate) fn active(&self) -> Option<EndpointId> {
        self.active
    }

    pub(crate) fn rx_errors(&self) -> u32 {
        self.rx_errors
    }

    pub(crate) fn rx_overruns(&self) -> u32 {
        self.rx_overruns
    }

    /// Unread (ring) or captured (synchronous) bytes held for `id`
    pub(crate) fn rx_count(&self, id: EndpointId) -> usize {
        if self.active == Some(id) {
            self.rx.count()
        } else {
            0
        }
    }

    /// Return to Open with empty cursors, keeping the programmed configuration
    ///
    /// Any transfer in flight counts as finished.
    pub(crate) fn reset(&mut self) {
        self.tx = TxCursor::idle();
        self.rx.restart();
        self.status = EngineStatus::Open;
        self.waiters.wake();
    }

    fn next_ticket(&mut self) -> Ticket {
        self.generation = self.generation.wrapping_add(1);
        Ticket(self.generation)
    }

    /// Whether the transfer behind `ticket` is over
    ///
    /// Transfers never overlap, so a newer ticket means ours is done.
    pub(crate) fn finished(&self, ticket: Ticket) -> bool {
        ticket.0 != self.generation || self.status.is_open()
    }

    pub(crate) fn poll_finished(&mut self, ticket: Ticket, cx: &mut Context<'_>) -> Poll<()> {
        if self.finished(ticket) {
            return Poll::Ready(());
        }
        self.waiters.register(cx.waker());
        Poll::Pending
    }

    /// Move to Open after a completed transfer and tell everyone about it
    fn complete(&mut self, event: TransferEvent, completion: Completion, done: &CompletionSignal) {
        self.status = self.status.transition(event);
        done.signal(completion);
        self.waiters.wake();
    }

    /// Arm the TX cursor and prime the interrupt chain with the first byte
    pub(crate) fn start_tx(&mut self, _cs: CriticalSection<'_>, data: &'static [u8]) -> Option<Ticket> {
        let first = self.tx.arm(data)?;
        self.hw.write_tx(first);
        self.status = self.status.transition(TransferEvent::StartTx);
        Some(self.next_ticket())
    }

    /// Arm a synchronous read of `len` bytes and clock out the first dummy
    ///
    /// Waits out a shift still running from an earlier write and discards
    /// its reply, so the first captured byte answers the first dummy.
    pub(crate) fn start_capture(&mut self, _cs: CriticalSection<'_>, len: usize) -> Ticket {
        while self.hw.is_busy() {
            core::hint::spin_loop();
        }
        if self.hw.rx_pending() {
            let _ = self.hw.read_rx();
        }
        self.rx.arm_capture(len);
        self.hw.write_tx(DUMMY_BYTE);
        self.status = self.status.transition(TransferEvent::StartRx);
        self.next_ticket()
    }

    /// Full-duplex exchange of one byte, spinning until the shift is done
    ///
    /// Runs with interrupts masked, so the interrupt handler never sees
    /// the received byte.
    pub(crate) fn swap(&mut self, _cs: CriticalSection<'_>, byte: u8) -> u8 {
        self.hw.write_tx(byte);
        while !self.hw.rx_pending() || self.hw.is_busy() {
            core::hint::spin_loop();
        }
        self.hw.read_rx()
    }

    /// Take up to `len` ring bytes, copying as many as fit into `out`
    pub(crate) fn drain(&mut self, buf: &[u8], len: usize, out: &mut [u8]) -> usize {
        self.rx.drain(buf, len, out)
    }

    /// Copy the bytes captured by the last synchronous read
    pub(crate) fn captured(&self, buf: &[u8], out: &mut [u8]) -> usize {
        let n = self.rx.count().min(out.len()).min(buf.len());
        out[..n].copy_from_slice(&buf[..n]);
        n
    }
}
