//! I2C adapter
//!
//! Endpoints can be registered and checked against the engine, but no
//! transfer framing exists yet: every transfer is `Unsupported`.

use serimux_hal::{EngineId, Mode, SerialEngine};

use crate::error::{Error, Result};
use crate::mux::Mux;
use crate::registry::EndpointId;

/// I2C operations on one engine
pub struct I2c<'a, H, const N: usize> {
    mux: &'a Mux<H, N>,
    engine: EngineId,
}

impl<'a, H: SerialEngine, const N: usize> I2c<'a, H, N> {
    pub(crate) fn new(mux: &'a Mux<H, N>, engine: EngineId) -> Self {
        Self { mux, engine }
    }

    pub fn engine(&self) -> EngineId {
        self.engine
    }

    pub fn write(&self, id: EndpointId, _data: &'static [u8]) -> Result<()> {
        self.unsupported(id)
    }

    pub fn read(&self, id: EndpointId, _len: usize) -> Result<usize> {
        self.unsupported(id).map(|()| 0)
    }

    fn unsupported(&self, id: EndpointId) -> Result<()> {
        self.mux
            .with(|_, inner| inner.check(self.engine, id, Mode::I2c).map(|_| ()))?;
        Err(Error::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{EndpointConfig, EndpointSettings};
    use crate::error::Error;
    use crate::mux::Mux;
    use crate::test_support::{leak_buffer, MockEngine};
    use serimux_hal::i2c::I2cFormat;
    use serimux_hal::uart::UartFormat;
    use serimux_hal::EngineId;

    #[test]
    fn test_checks_then_unsupported() {
        let hw = MockEngine::new();
        let mux: Mux<MockEngine> =
            Mux::new([(EngineId::B1, hw.clone()), (EngineId::A0, MockEngine::new())]);
        let sensor = mux
            .register(EndpointConfig::new(
                EndpointSettings::i2c(EngineId::B1, 0x48, I2cFormat::default(), 80),
                leak_buffer(2),
            ))
            .unwrap();
        let console = mux
            .register(EndpointConfig::new(
                EndpointSettings::uart(EngineId::A0, UartFormat::EIGHT_N_ONE, 104),
                leak_buffer(2),
            ))
            .unwrap();

        let i2c = mux.i2c(EngineId::B1);
        assert_eq!(i2c.write(sensor, b"\x00"), Err(Error::Unsupported));
        assert_eq!(i2c.read(sensor, 2), Err(Error::Unsupported));
        assert_eq!(i2c.write(console, b"\x00"), Err(Error::ConfigMismatch));
        // Nothing reached the hardware
        assert_eq!(hw.state().ctlw0_writes, 0);
    }
}
