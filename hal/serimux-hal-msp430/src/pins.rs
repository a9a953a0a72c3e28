//! Port function selection for engine signals
//!
//! F55xx parts have a single `PxSEL` register per port; FR57xx parts split
//! it into `PxSEL0`/`PxSEL1`, and engine signals need `SEL1=1, SEL0=0`.

use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::registers::ReadWrite;
use tock_registers::{register_bitfields, register_structs};

use serimux_hal::Mode;

/// Base of the port 1/2 register block
const PORT_BASE: usize = 0x0200;
/// Distance between port pair blocks
const PORT_PAIR_STRIDE: usize = 0x20;

register_structs! {
    /// Two ports sharing one block (P1/P2, P3/P4, ...); index 0 is the odd port
    PortPairRegisters {
        (0x00 => _reserved0),
        /// `PxSEL` on F55xx
        (0x0A => sel0: [ReadWrite<u8, PxSEL::Register>; 2]),
        /// FR57xx only
        (0x0C => sel1: [ReadWrite<u8, PxSEL::Register>; 2]),
        (0x0E => _reserved1),
        (0x20 => @END),
    }
}

register_bitfields![u8,
    PxSEL [
        PIN0 OFFSET(0) NUMBITS(1) [],
        PIN1 OFFSET(1) NUMBITS(1) [],
        PIN2 OFFSET(2) NUMBITS(1) [],
        PIN3 OFFSET(3) NUMBITS(1) [],
        PIN4 OFFSET(4) NUMBITS(1) [],
        PIN5 OFFSET(5) NUMBITS(1) [],
        PIN6 OFFSET(6) NUMBITS(1) [],
        PIN7 OFFSET(7) NUMBITS(1) []
    ]
];

/// How a chip selects peripheral functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelectStyle {
    /// One `PxSEL` register (F55xx, F534x)
    Single,
    /// `PxSEL0`/`PxSEL1` pair (FR57xx)
    Dual,
}

/// Pins of one port used by an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinGroup {
    /// Port number (1-based, as in P1, P2, ...)
    pub port: u8,
    /// Bit mask of the pins within the port
    pub mask: u8,
}

impl PinGroup {
    pub const fn new(port: u8, mask: u8) -> Self {
        Self { port, mask }
    }

    /// Port pair block and the port's index within it
    const fn location(&self) -> (usize, usize) {
        let index = (self.port as usize).saturating_sub(1);
        (PORT_BASE + (index / 2) * PORT_PAIR_STRIDE, index % 2)
    }
}

/// Pins an engine needs in each mode it supports
#[derive(Debug, Clone, Copy)]
pub struct PinRoute {
    pub uart: &'static [PinGroup],
    pub spi: &'static [PinGroup],
    pub i2c: &'static [PinGroup],
}

impl PinRoute {
    /// Groups to switch for `mode`
    pub fn groups(&self, mode: Mode) -> &'static [PinGroup] {
        match mode {
            Mode::Uart => self.uart,
            Mode::Spi => self.spi,
            Mode::I2c => self.i2c,
        }
    }
}

/// Which select register of a port a write targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectRegister {
    Sel0,
    Sel1,
}

/// A read-modify-write on one select register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectWrite {
    pub group: PinGroup,
    pub register: SelectRegister,
    pub set: u8,
    pub clear: u8,
}

impl SelectWrite {
    fn sel0(group: PinGroup, set: u8, clear: u8) -> Self {
        Self { group, register: SelectRegister::Sel0, set, clear }
    }

    fn sel1(group: PinGroup, set: u8, clear: u8) -> Self {
        Self { group, register: SelectRegister::Sel1, set, clear }
    }

    fn apply_to(&self, pair: &PortPairRegisters) {
        let (_, half) = self.group.location();
        let reg = match self.register {
            SelectRegister::Sel0 => &pair.sel0[half],
            SelectRegister::Sel1 => &pair.sel1[half],
        };
        reg.set((reg.get() & !self.clear) | self.set);
    }
}

/// Register writes that connect (or disconnect) one group
pub fn plan(style: SelectStyle, group: PinGroup, connect: bool) -> [Option<SelectWrite>; 2] {
    let mask = group.mask;
    match (style, connect) {
        (SelectStyle::Single, true) => [Some(SelectWrite::sel0(group, mask, 0)), None],
        (SelectStyle::Single, false) => [Some(SelectWrite::sel0(group, 0, mask)), None],
        (SelectStyle::Dual, true) => [
            Some(SelectWrite::sel1(group, mask, 0)),
            Some(SelectWrite::sel0(group, 0, mask)),
        ],
        (SelectStyle::Dual, false) => [
            Some(SelectWrite::sel1(group, 0, mask)),
            Some(SelectWrite::sel0(group, 0, mask)),
        ],
    }
}

/// Perform the writes for every group
pub(crate) fn apply(style: SelectStyle, groups: &[PinGroup], connect: bool) {
    for group in groups {
        let (base, _) = group.location();
        // SAFETY: port pair blocks sit at the same addresses on every
        // supported part, and engine pins are only touched from here.
        let pair = unsafe { &*(base as *const PortPairRegisters) };
        for write in plan(style, *group, connect).into_iter().flatten() {
            write.apply_to(pair);
        }
    }
}
