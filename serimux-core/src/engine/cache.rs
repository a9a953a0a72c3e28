//! Engine configuration cache
//!
//! An engine stays programmed for the last endpoint that used it; switching
//! endpoints is the only thing that touches the control registers.

use critical_section::CriticalSection;
use serimux_hal::{EngineId, SerialEngine};

use super::Engine;
use crate::config::EndpointSettings;
use crate::registry::EndpointId;

impl<H: SerialEngine> Engine<H> {
    /// Program the engine for `id` unless it already is
    ///
    /// Returns `true` when the registers were rewritten.
    pub(crate) fn ensure_configured(
        &mut self,
        _cs: CriticalSection<'_>,
        engine: EngineId,
        id: EndpointId,
        settings: &EndpointSettings,
    ) -> bool {
        if self.active == Some(id) {
            return false;
        }
        debug!("{}: reprogram for {}", engine, id);

        self.hw.hold_reset();
        self.hw
            .configure_pins(settings.resource.mode(), settings.resource.address());
        self.hw.write_ctlw0(settings.ctlw0);
        self.hw.write_ctlw1(settings.ctlw1);
        self.hw.write_baud(settings.baud_div);
        self.reset();
        // Reset clears the interrupt enables, so enable after release
        self.hw.release_reset();
        self.hw.enable_interrupts();

        self.active = Some(id);
        self.synchronous = settings.resource.mode().is_synchronous();
        true
    }

    /// Forget the programmed endpoint so the next use reprograms
    pub(crate) fn invalidate(&mut self) {
        self.active = None;
    }

    /// Stop the engine and hand its pins back to GPIO
    pub(crate) fn release(&mut self, _cs: CriticalSection<'_>) {
        self.hw.disable_interrupts();
        self.hw.hold_reset();
        self.hw.clear_pins();
        self.reset();
        self.invalidate();
    }
}
