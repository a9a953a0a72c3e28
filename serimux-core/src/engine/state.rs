//! Engine transfer status
//!
//! ```text
//!            StartTx                 StartRx
//!   ┌──────────────────┐    ┌──────────────────┐
//!   │                  ▼    │                  ▼
//!  Open          Transmitting               Receiving
//!   ▲                  │                       │
//!   └──── TxComplete ──┘◄──── RxComplete ──────┘
//! ```
//!
//! Anything not drawn above leaves the status where it is. Entry points
//! only ever fire `Start*` events; the interrupt handler only fires the
//! completions.

/// Transfer status of one engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineStatus {
    /// Idle, a new transfer may start
    #[default]
    Open,
    /// Sending; the interrupt handler owns the TX cursor
    Transmitting,
    /// Clocking in a synchronous read; the interrupt handler owns the RX cursor
    Receiving,
}

/// Events that move an engine between statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferEvent {
    /// A write armed the TX cursor
    StartTx,
    /// A synchronous read armed the RX cursor
    StartRx,
    /// The last byte left the TX register
    TxComplete,
    /// The requested byte count has been captured
    RxComplete,
}

impl EngineStatus {
    /// Status after `event`
    pub const fn transition(self, event: TransferEvent) -> Self {
        match (self, event) {
            (Self::Open, TransferEvent::StartTx) => Self::Transmitting,
            (Self::Open, TransferEvent::StartRx) => Self::Receiving,
            (Self::Transmitting, TransferEvent::TxComplete) => Self::Open,
            (Self::Receiving, TransferEvent::RxComplete) => Self::Open,
            (state, _) => state,
        }
    }

    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}
