//! Interrupt-side transfer handling

use critical_section::CriticalSection;
use serimux_hal::{EngineId, SerialEngine};

use super::{Completion, CompletionSignal, Engine, EngineStatus, TransferEvent, DUMMY_BYTE};
use crate::config::EndpointConfig;

impl<H: SerialEngine> Engine<H> {
    /// Service a pending TX and/or RX flag
    ///
    /// `endpoint` is the active endpoint's configuration, or `None` while
    /// the engine is unconfigured.
    pub(crate) fn service(
        &mut self,
        _cs: CriticalSection<'_>,
        engine: EngineId,
        endpoint: Option<&mut EndpointConfig>,
        done: &CompletionSignal,
    ) {
        if self.hw.tx_pending() {
            self.on_tx(done);
        }
        if self.hw.rx_pending() {
            self.on_rx(engine, endpoint, done);
        }
    }

    fn on_tx(&mut self, done: &CompletionSignal) {
        if let Some(byte) = self.tx.advance() {
            self.hw.write_tx(byte);
            return;
        }
        self.hw.ack_tx();
        if self.status != EngineStatus::Transmitting {
            return;
        }
        // The TX flag rises as the last byte enters the shift register; a
        // clocked write is only over once that byte is on the wire.
        if self.synchronous {
            while self.hw.is_busy() {
                core::hint::spin_loop();
            }
        }
        let len = self.tx.len();
        self.complete(TransferEvent::TxComplete, Completion::Sent { len }, done);
    }

    fn on_rx(
        &mut self,
        engine: EngineId,
        endpoint: Option<&mut EndpointConfig>,
        done: &CompletionSignal,
    ) {
        let Some(endpoint) = endpoint else {
            let _ = self.hw.read_rx();
            return;
        };
        let synchronous = endpoint.settings.resource.mode().is_synchronous();

        // Bytes clocked in by a write or a swap belong to nobody
        if synchronous && self.status != EngineStatus::Receiving {
            let _ = self.hw.read_rx();
            return;
        }

        if self.hw.rx_error() {
            let _ = self.hw.read_rx();
            self.rx_errors = self.rx_errors.wrapping_add(1);
            warn!("{}: reception error, byte dropped", engine);
            if synchronous {
                self.hw.write_tx(DUMMY_BYTE);
            }
            return;
        }

        let byte = self.hw.read_rx();
        let buf = &mut *endpoint.rx_buffer;
        if synchronous {
            if self.rx.capture(buf, byte) {
                let len = self.rx.count();
                self.complete(TransferEvent::RxComplete, Completion::Received { len }, done);
            } else {
                self.hw.write_tx(DUMMY_BYTE);
            }
        } else if !self.rx.push(buf, byte) {
            self.rx_overruns = self.rx_overruns.wrapping_add(1);
            warn!("{}: receive ring full", engine);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EndpointSettings;
    use crate::registry::EndpointId;
    use crate::test_support::{leak_buffer, MockEngine};
    use serimux_hal::spi::{SpiFormat, SpiMode};
    use serimux_hal::uart::UartFormat;

    struct Rig {
        hw: MockEngine,
        engine: Engine<MockEngine>,
        endpoint: EndpointConfig,
        done: CompletionSignal,
    }

    impl Rig {
        fn new(settings: EndpointSettings, buf_len: usize) -> Self {
            let hw = MockEngine::new();
            let mut engine = Engine::new(hw.clone());
            let id = EndpointId::new(1).unwrap();
            critical_section::with(|cs| {
                engine.ensure_configured(cs, settings.resource.engine(), id, &settings);
            });
            Self {
                hw,
                engine,
                endpoint: EndpointConfig::new(settings, leak_buffer(buf_len)),
                done: CompletionSignal::new(),
            }
        }

        fn interrupt(&mut self) {
            let Self { engine, endpoint, done, .. } = self;
            critical_section::with(|cs| engine.service(cs, EngineId::A0, Some(endpoint), done));
        }
    }

    fn uart() -> EndpointSettings {
        EndpointSettings::uart(EngineId::A0, UartFormat::EIGHT_N_ONE, 104)
    }

    fn spi() -> EndpointSettings {
        EndpointSettings::spi(EngineId::A0, 1, SpiFormat::master(SpiMode::Mode0), 2)
    }

    #[test]
    fn test_tx_runs_to_completion() {
        let mut rig = Rig::new(uart(), 8);
        critical_section::with(|cs| rig.engine.start_tx(cs, b"abc"));

        for _ in 0..2 {
            rig.hw.raise_tx();
            rig.interrupt();
            assert_eq!(rig.engine.status(), EngineStatus::Transmitting);
        }
        rig.hw.raise_tx();
        rig.interrupt();

        assert_eq!(rig.hw.state().sent, b"abc");
        assert_eq!(rig.engine.status(), EngineStatus::Open);
        assert_eq!(rig.done.try_take(), Some(Completion::Sent { len: 3 }));
    }

    #[test]
    fn test_spi_write_completes_after_last_shift() {
        let mut rig = Rig::new(spi(), 8);
        rig.hw.set_slow_shift(true);
        rig.hw.queue_reply(0x11);
        critical_section::with(|cs| rig.engine.start_tx(cs, b"\x9F"));
        assert!(rig.hw.state().shifting.is_some());

        rig.hw.raise_tx();
        rig.interrupt();

        // Completion waited for the shift; its reply was then drained
        assert_eq!(rig.engine.status(), EngineStatus::Open);
        assert_eq!(rig.hw.state().shifting, None);
        assert!(!rig.hw.state().rx_pending());
        assert_eq!(rig.done.try_take(), Some(Completion::Sent { len: 1 }));
    }

    #[test]
    fn test_idle_tx_flag_acknowledged() {
        let mut rig = Rig::new(uart(), 8);
        rig.hw.raise_tx();
        rig.interrupt();
        assert!(!rig.hw.state().tx_flag);
        assert_eq!(rig.done.try_take(), None);
    }

    #[test]
    fn test_tx_flag_during_receive_keeps_receiving() {
        let mut rig = Rig::new(spi(), 8);
        critical_section::with(|cs| rig.engine.start_capture(cs, 4));
        rig.hw.raise_tx();
        rig.hw.state_mut().rx = None;
        rig.interrupt();
        assert_eq!(rig.engine.status(), EngineStatus::Receiving);
    }

    #[test]
    fn test_uart_rx_accumulates_regardless_of_status() {
        let mut rig = Rig::new(uart(), 8);
        critical_section::with(|cs| rig.engine.start_tx(cs, b"z"));
        rig.hw.receive(0x41);
        rig.interrupt();
        assert_eq!(rig.engine.status(), EngineStatus::Transmitting);
        assert_eq!(rig.engine.rx_count(EndpointId::new(1).unwrap()), 1);
    }

    #[test]
    fn test_uart_rx_error_dropped() {
        let mut rig = Rig::new(uart(), 8);
        rig.hw.receive_error(0x00);
        rig.interrupt();
        rig.hw.receive(0x42);
        rig.interrupt();
        assert_eq!(rig.engine.rx_errors(), 1);
        assert_eq!(rig.engine.rx_count(EndpointId::new(1).unwrap()), 1);
        assert_eq!(rig.endpoint.rx_buffer[0], 0x42);
    }

    #[test]
    fn test_uart_ring_overrun_counted() {
        let mut rig = Rig::new(uart(), 2);
        for b in 0..3 {
            rig.hw.receive(b);
            rig.interrupt();
        }
        assert_eq!(rig.engine.rx_overruns(), 1);
        assert_eq!(rig.engine.rx_count(EndpointId::new(1).unwrap()), 2);
    }

    #[test]
    fn test_spi_rx_outside_read_drained() {
        let mut rig = Rig::new(spi(), 8);
        rig.hw.receive(0x55);
        rig.interrupt();
        assert!(!rig.hw.state().rx_pending());
        assert_eq!(rig.engine.rx_count(EndpointId::new(1).unwrap()), 0);
        assert_eq!(rig.endpoint.rx_buffer[0], 0);
    }

    #[test]
    fn test_unconfigured_rx_drained() {
        let hw = MockEngine::new();
        let mut engine = Engine::new(hw.clone());
        let done = CompletionSignal::new();
        hw.receive(0x01);
        critical_section::with(|cs| engine.service(cs, EngineId::B1, None, &done));
        assert!(!hw.state().rx_pending());
    }
}
