//! Per-chip engine tables
//!
//! Base addresses and pinouts for each supported part.

use serimux_hal::EngineId;

use crate::pins::{PinGroup, PinRoute, SelectStyle};
use crate::regs::Family;
use crate::Usci;

/// Static description of one engine on a chip
#[derive(Debug, Clone, Copy)]
pub struct EngineDescriptor {
    pub id: EngineId,
    pub base: usize,
    pub family: Family,
    pub route: &'static PinRoute,
}

impl EngineDescriptor {
    /// Build the engine handle for this descriptor
    ///
    /// # Safety
    ///
    /// At most one handle per engine may exist at a time.
    pub unsafe fn take(&self, style: SelectStyle) -> Usci {
        Usci::new(self.id, self.base, self.family, self.route, style)
    }
}

const NONE: &[PinGroup] = &[];

/// MSP430FR57xx (eUSCI), e.g. MSP430FR5739
///
/// ```text
/// UCA0TXD/SIMO = P2.0   UCA0RXD/SOMI = P2.1   UCA0CLK = P1.5
/// UCA1TXD/SIMO = P2.5   UCA1RXD/SOMI = P2.6   UCA1CLK = P2.4
/// UCB0SIMO/SDA = P1.6   UCB0SOMI/SCL = P1.7   UCB0CLK = P2.2
/// ```
pub mod fr57xx {
    use super::*;

    static A0_ROUTE: PinRoute = PinRoute {
        uart: &[PinGroup::new(2, 0x03)],
        spi: &[PinGroup::new(2, 0x03), PinGroup::new(1, 0x20)],
        i2c: NONE,
    };

    static A1_ROUTE: PinRoute = PinRoute {
        uart: &[PinGroup::new(2, 0x60)],
        spi: &[PinGroup::new(2, 0x70)],
        i2c: NONE,
    };

    static B0_ROUTE: PinRoute = PinRoute {
        uart: NONE,
        spi: &[PinGroup::new(1, 0xC0), PinGroup::new(2, 0x04)],
        i2c: &[PinGroup::new(1, 0xC0), PinGroup::new(2, 0x04)],
    };

    /// Engines present on the part
    pub static ENGINES: [EngineDescriptor; 3] = [
        EngineDescriptor { id: EngineId::A0, base: 0x05C0, family: Family::EusciA, route: &A0_ROUTE },
        EngineDescriptor { id: EngineId::A1, base: 0x05E0, family: Family::EusciA, route: &A1_ROUTE },
        EngineDescriptor { id: EngineId::B0, base: 0x0640, family: Family::EusciB, route: &B0_ROUTE },
    ];

    /// Handles for every engine on the part
    ///
    /// # Safety
    ///
    /// Call once; the handles own the hardware.
    pub unsafe fn engines() -> [(EngineId, Usci); 3] {
        let [a0, a1, b0] = &ENGINES;
        [
            (a0.id, a0.take(SelectStyle::Dual)),
            (a1.id, a1.take(SelectStyle::Dual)),
            (b0.id, b0.take(SelectStyle::Dual)),
        ]
    }
}

/// MSP430F55xx/F534x (USCI), e.g. MSP430F5510 and MSP430F5342
///
/// ```text
/// UCA0TXD/SIMO = P3.3   UCA0RXD/SOMI = P3.4   UCA0CLK = P2.7
/// UCA1TXD/SIMO = P4.4   UCA1RXD/SOMI = P4.5   UCA1CLK = P4.0
/// UCB0SIMO/SDA = P3.0   UCB0SOMI/SCL = P3.1   UCB0CLK = P3.2
/// UCB1SIMO/SDA = P4.1   UCB1SOMI/SCL = P4.2   UCB1CLK = P4.3
/// ```
pub mod f55xx {
    use super::*;

    static A0_ROUTE: PinRoute = PinRoute {
        uart: &[PinGroup::new(3, 0x18)],
        spi: &[PinGroup::new(3, 0x18), PinGroup::new(2, 0x80)],
        i2c: NONE,
    };

    static A1_ROUTE: PinRoute = PinRoute {
        uart: &[PinGroup::new(4, 0x30)],
        spi: &[PinGroup::new(4, 0x31)],
        i2c: NONE,
    };

    static B0_ROUTE: PinRoute = PinRoute {
        uart: NONE,
        spi: &[PinGroup::new(3, 0x07)],
        i2c: &[PinGroup::new(3, 0x03)],
    };

    static B1_ROUTE: PinRoute = PinRoute {
        uart: NONE,
        spi: &[PinGroup::new(4, 0x0E)],
        i2c: &[PinGroup::new(4, 0x06)],
    };

    /// Engines present on the part
    pub static ENGINES: [EngineDescriptor; 4] = [
        EngineDescriptor { id: EngineId::A0, base: 0x05C0, family: Family::Usci, route: &A0_ROUTE },
        EngineDescriptor { id: EngineId::A1, base: 0x0600, family: Family::Usci, route: &A1_ROUTE },
        EngineDescriptor { id: EngineId::B0, base: 0x05E0, family: Family::Usci, route: &B0_ROUTE },
        EngineDescriptor { id: EngineId::B1, base: 0x0620, family: Family::Usci, route: &B1_ROUTE },
    ];

    /// Handles for every engine on the part
    ///
    /// # Safety
    ///
    /// Call once; the handles own the hardware.
    pub unsafe fn engines() -> [(EngineId, Usci); 4] {
        let [a0, a1, b0, b1] = &ENGINES;
        [
            (a0.id, a0.take(SelectStyle::Single)),
            (a1.id, a1.take(SelectStyle::Single)),
            (b0.id, b0.take(SelectStyle::Single)),
            (b1.id, b1.take(SelectStyle::Single)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serimux_hal::{EngineKind, Mode};

    fn check_routes(engines: &[EngineDescriptor]) {
        for engine in engines {
            for mode in [Mode::Uart, Mode::Spi, Mode::I2c] {
                let groups = engine.route.groups(mode);
                // A mode has pins exactly when the engine kind supports it
                assert_eq!(!groups.is_empty(), engine.id.kind().supports(mode));
            }
        }
    }

    #[test]
    fn test_fr57xx_routes_match_kinds() {
        check_routes(&fr57xx::ENGINES);
    }

    #[test]
    fn test_f55xx_routes_match_kinds() {
        check_routes(&f55xx::ENGINES);
    }

    #[test]
    fn test_families_match_parts() {
        for engine in &fr57xx::ENGINES {
            let expected = match engine.id.kind() {
                EngineKind::A => Family::EusciA,
                EngineKind::B => Family::EusciB,
            };
            assert_eq!(engine.family, expected);
        }
        assert!(f55xx::ENGINES.iter().all(|e| e.family == Family::Usci));
    }

    #[test]
    fn test_bases_are_distinct() {
        for table in [&fr57xx::ENGINES[..], &f55xx::ENGINES[..]] {
            for (i, a) in table.iter().enumerate() {
                for b in &table[i + 1..] {
                    assert_ne!(a.base, b.base);
                    assert_ne!(a.id, b.id);
                }
            }
        }
    }
}
