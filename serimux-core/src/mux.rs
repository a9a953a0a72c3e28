//! Process-wide engine multiplexer
//!
//! [`Mux`] owns the endpoint registry and one slot per physical engine. It
//! is built once at startup and shared by reference between foreground
//! code and the engine interrupt vectors:
//!
//! ```ignore
//! static MUX: StaticCell<Mux<Usci>> = StaticCell::new();
//! let mux = MUX.init(Mux::new(unsafe { fr57xx::engines() }));
//!
//! let console = mux.register(EndpointConfig::new(settings, buffer))?;
//! mux.uart(EngineId::A0).write(console, b"boot\r\n")?;
//!
//! // in the USCI_A0 vector
//! mux.on_interrupt(EngineId::A0);
//! ```
//!
//! Every access to shared state, foreground or interrupt, happens inside
//! one `critical_section::with`.

use core::cell::RefCell;
use core::future::poll_fn;
use core::task::Poll;

use critical_section::{CriticalSection, Mutex};
use serimux_hal::engine::MAX_ENGINES;
use serimux_hal::{EngineId, Mode, SerialEngine};

use crate::adapter::{I2c, Spi, Uart};
use crate::config::{BoardConfig, ConfigError, EndpointConfig, EndpointSettings};
use crate::engine::{CompletionSignal, Engine, EngineStatus, Ticket};
use crate::error::{Error, Result};
use crate::registry::{EndpointId, Registry, MAX_ENDPOINTS};

/// Engine multiplexer for hardware type `H` and up to `N` endpoints
pub struct Mux<H, const N: usize = MAX_ENDPOINTS> {
    inner: Mutex<RefCell<Inner<H, N>>>,
    completions: [CompletionSignal; MAX_ENGINES],
}

pub(crate) struct Inner<H, const N: usize> {
    pub(crate) registry: Registry<N>,
    pub(crate) engines: [Option<Engine<H>>; MAX_ENGINES],
    board: Option<BoardConfig>,
}

impl<H: SerialEngine, const N: usize> Inner<H, N> {
    pub(crate) fn engine_mut(&mut self, engine: EngineId) -> Result<&mut Engine<H>> {
        self.engines[engine.index()]
            .as_mut()
            .ok_or(Error::NoSuchEngine)
    }

    /// Check that `id` runs on `engine` in `mode`
    pub(crate) fn check(
        &self,
        engine: EngineId,
        id: EndpointId,
        mode: Mode,
    ) -> Result<EndpointSettings> {
        let settings = self.registry.settings(id)?;
        if !settings.resource.targets(engine, mode) {
            trace!("{}: {} is not {}", engine, id, mode);
            return Err(Error::ConfigMismatch);
        }
        if self.engines[engine.index()].is_none() {
            return Err(Error::NoSuchEngine);
        }
        Ok(settings)
    }

    /// Check that `id` may start a transfer on `engine` in `mode`
    pub(crate) fn admit(
        &mut self,
        engine: EngineId,
        id: EndpointId,
        mode: Mode,
    ) -> Result<EndpointSettings> {
        let settings = self.check(engine, id, mode)?;
        let status = self.engine_mut(engine)?.status();
        if !status.is_open() {
            trace!("{}: busy ({}), {} rejected", engine, status, id);
            return Err(Error::Busy);
        }
        Ok(settings)
    }

    /// Program `engine` for `id` if needed and hand back its slot
    pub(crate) fn configure(
        &mut self,
        cs: CriticalSection<'_>,
        engine: EngineId,
        id: EndpointId,
    ) -> Result<&mut Engine<H>> {
        let settings = self.registry.settings(id)?;
        let slot = self.engine_mut(engine)?;
        slot.ensure_configured(cs, engine, id, &settings);
        Ok(slot)
    }

    /// Engine slot and endpoint record, borrowed together
    pub(crate) fn split(
        &mut self,
        engine: EngineId,
        id: EndpointId,
    ) -> Result<(&mut Engine<H>, &mut EndpointConfig)> {
        let Self { registry, engines, .. } = self;
        let endpoint = registry.get_mut(id)?;
        let slot = engines[engine.index()]
            .as_mut()
            .ok_or(Error::NoSuchEngine)?;
        Ok((slot, endpoint))
    }
}

impl<H: SerialEngine, const N: usize> Mux<H, N> {
    /// Build from the engines present on the board
    pub fn new<I>(engines: I) -> Self
    where
        I: IntoIterator<Item = (EngineId, H)>,
    {
        let mut slots: [Option<Engine<H>>; MAX_ENGINES] = [None, None, None, None];
        for (id, hw) in engines {
            slots[id.index()] = Some(Engine::new(hw));
        }
        Self {
            inner: Mutex::new(RefCell::new(Inner {
                registry: Registry::new(),
                engines: slots,
                board: None,
            })),
            completions: [
                CompletionSignal::new(),
                CompletionSignal::new(),
                CompletionSignal::new(),
                CompletionSignal::new(),
            ],
        }
    }

    /// Build and restrict every engine to the protocol `board` binds it to
    pub fn with_board<I>(board: BoardConfig, engines: I) -> core::result::Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (EngineId, H)>,
    {
        board.validate()?;
        let mux = Self::new(engines);
        mux.with(|_, inner| inner.board = Some(board));
        Ok(mux)
    }

    pub(crate) fn with<R>(&self, f: impl FnOnce(CriticalSection<'_>, &mut Inner<H, N>) -> R) -> R {
        critical_section::with(|cs| f(cs, &mut self.inner.borrow_ref_mut(cs)))
    }

    /// Completions posted by `engine`'s interrupt handler
    ///
    /// For a task that watches the engine as a whole. Callers waiting on
    /// their own transfer use the adapters' async methods instead.
    pub fn completion(&self, engine: EngineId) -> &CompletionSignal {
        &self.completions[engine.index()]
    }

    /// Wait until the transfer behind `ticket` is over
    pub(crate) async fn finished(&self, engine: EngineId, ticket: Ticket) -> Result<()> {
        poll_fn(|cx| {
            self.with(|_, inner| match inner.engine_mut(engine) {
                Ok(slot) => slot.poll_finished(ticket, cx).map(Ok),
                Err(e) => Poll::Ready(Err(e)),
            })
        })
        .await
    }

    /// Add an endpoint; intended for startup, before interrupts run
    pub fn register(&self, config: EndpointConfig) -> Result<EndpointId> {
        self.with(|_, inner| {
            let resource = config.resource();
            if let Some(board) = &inner.board {
                if board.binding(resource.engine()) != Some(resource.mode()) {
                    trace!("{} not routed on this board", resource);
                    return Err(Error::ConfigMismatch);
                }
            }
            let id = inner.registry.register(config)?;
            debug!("registered {} on {}", id, resource);
            Ok(id)
        })
    }

    /// Stored engine settings for `id`
    pub fn settings(&self, id: EndpointId) -> Result<EndpointSettings> {
        self.with(|_, inner| inner.registry.settings(id))
    }

    /// Number of registered endpoints
    pub fn endpoints(&self) -> usize {
        self.with(|_, inner| inner.registry.len())
    }

    pub fn status(&self, engine: EngineId) -> Result<EngineStatus> {
        self.with(|_, inner| inner.engine_mut(engine).map(|e| e.status()))
    }

    /// Endpoint the engine is currently programmed for
    pub fn active(&self, engine: EngineId) -> Result<Option<EndpointId>> {
        self.with(|_, inner| inner.engine_mut(engine).map(|e| e.active()))
    }

    /// Bytes received for `id` and not yet read
    ///
    /// Zero whenever another endpoint holds the engine.
    pub fn rx_available(&self, id: EndpointId) -> Result<usize> {
        self.with(|_, inner| {
            let engine = inner.registry.settings(id)?.resource.engine();
            inner.engine_mut(engine).map(|e| e.rx_count(id))
        })
    }

    /// Bytes discarded because the hardware flagged them
    pub fn rx_errors(&self, engine: EngineId) -> Result<u32> {
        self.with(|_, inner| inner.engine_mut(engine).map(|e| e.rx_errors()))
    }

    /// Bytes dropped because the receive ring was full
    pub fn rx_overruns(&self, engine: EngineId) -> Result<u32> {
        self.with(|_, inner| inner.engine_mut(engine).map(|e| e.rx_overruns()))
    }

    /// Program `engine` for `id` unless it already is
    ///
    /// Returns `true` when the hardware was reprogrammed. Switching
    /// endpoints in the middle of a transfer is refused with `Busy`.
    pub fn ensure_configured(&self, engine: EngineId, id: EndpointId) -> Result<bool> {
        self.with(|cs, inner| {
            let settings = inner.registry.settings(id)?;
            if settings.resource.engine() != engine {
                return Err(Error::ConfigMismatch);
            }
            let slot = inner.engine_mut(engine)?;
            if slot.active() != Some(id) && !slot.status().is_open() {
                return Err(Error::Busy);
            }
            Ok(slot.ensure_configured(cs, engine, id, &settings))
        })
    }

    /// Force the next use of `engine` to reprogram it
    pub fn invalidate(&self, engine: EngineId) -> Result<()> {
        self.with(|_, inner| inner.engine_mut(engine).map(|e| e.invalidate()))
    }

    /// Change the baud divisor of `id`, taking effect on its next transfer
    pub fn set_baud(&self, id: EndpointId, baud_div: u16) -> Result<()> {
        self.with(|_, inner| {
            let endpoint = inner.registry.get_mut(id)?;
            endpoint.settings.baud_div = baud_div;
            let engine = endpoint.settings.resource.engine();
            if let Ok(slot) = inner.engine_mut(engine) {
                slot.invalidate();
            }
            Ok(())
        })
    }

    /// Stop `engine` and disconnect it from its pins
    pub fn release(&self, engine: EngineId) -> Result<()> {
        self.with(|cs, inner| inner.engine_mut(engine).map(|e| e.release(cs)))
    }

    /// Soft reset: empty cursors, status Open, configuration kept
    pub fn reset(&self, engine: EngineId) -> Result<()> {
        self.with(|_, inner| inner.engine_mut(engine).map(|e| e.reset()))
    }

    /// Service `engine`'s interrupt; call from its vector
    pub fn on_interrupt(&self, engine: EngineId) {
        let done = self.completion(engine);
        self.with(|cs, inner| {
            let Inner { registry, engines, .. } = inner;
            let Some(slot) = engines[engine.index()].as_mut() else {
                return;
            };
            let endpoint = match slot.active() {
                Some(id) => registry.get_mut(id).ok(),
                None => None,
            };
            slot.service(cs, engine, endpoint, done);
        });
    }

    /// UART operations on `engine`
    pub fn uart(&self, engine: EngineId) -> Uart<'_, H, N> {
        Uart::new(self, engine)
    }

    /// SPI operations on `engine`
    pub fn spi(&self, engine: EngineId) -> Spi<'_, H, N> {
        Spi::new(self, engine)
    }

    /// I2C operations on `engine`
    pub fn i2c(&self, engine: EngineId) -> I2c<'_, H, N> {
        I2c::new(self, engine)
    }
}
