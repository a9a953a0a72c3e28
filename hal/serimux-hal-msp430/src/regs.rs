//! Engine register blocks
//!
//! eUSCI and USCI blocks share bit positions for everything the multiplexer
//! touches (reset bit, RX/TX interrupt flags, busy and error status), but
//! differ in register width and placement. Each family gets its own block
//! type and all of them implement [`UsciBlock`].

use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};
use tock_registers::registers::{ReadOnly, ReadWrite};
use tock_registers::{register_bitfields, register_structs, LocalRegisterCopy};

register_structs! {
    /// eUSCI_A (UART/SPI), FR57xx
    pub EusciARegisters {
        (0x00 => ctlw0: ReadWrite<u16, UCxCTLW0::Register>),
        (0x02 => ctlw1: ReadWrite<u16>),
        (0x04 => _reserved0),
        (0x06 => brw: ReadWrite<u16>),
        (0x08 => _reserved1),
        (0x0A => statw: ReadWrite<u16, UCxSTATW::Register>),
        (0x0C => rxbuf: ReadOnly<u16>),
        (0x0E => txbuf: ReadWrite<u16>),
        (0x10 => _reserved2),
        (0x1A => ie: ReadWrite<u16, UCxIE::Register>),
        (0x1C => ifg: ReadWrite<u16, UCxIFG::Register>),
        (0x1E => _reserved3),
        (0x20 => @END),
    },

    /// eUSCI_B (SPI/I2C), FR57xx
    pub EusciBRegisters {
        (0x00 => ctlw0: ReadWrite<u16, UCxCTLW0::Register>),
        (0x02 => ctlw1: ReadWrite<u16>),
        (0x04 => _reserved0),
        (0x06 => brw: ReadWrite<u16>),
        (0x08 => statw: ReadWrite<u16, UCxSTATW::Register>),
        (0x0A => _reserved1),
        (0x0C => rxbuf: ReadOnly<u16>),
        (0x0E => txbuf: ReadWrite<u16>),
        (0x10 => _reserved2),
        (0x2A => ie: ReadWrite<u16, UCxIE::Register>),
        (0x2C => ifg: ReadWrite<u16, UCxIFG::Register>),
        (0x2E => _reserved3),
        (0x30 => @END),
    },

    /// USCI_A and USCI_B, F55xx/F534x
    ///
    /// Status and data registers are byte wide; interrupt enable and flags
    /// share one word (enable in the low byte).
    pub UsciRegisters {
        (0x00 => ctlw0: ReadWrite<u16, UCxCTLW0::Register>),
        (0x02 => _reserved0),
        (0x06 => brw: ReadWrite<u16>),
        (0x08 => _reserved1),
        (0x0A => stat: ReadWrite<u8, UCxSTAT::Register>),
        (0x0B => _reserved2),
        (0x0C => rxbuf: ReadOnly<u8>),
        (0x0D => _reserved3),
        (0x0E => txbuf: ReadWrite<u8>),
        (0x0F => _reserved4),
        (0x1C => ictl: ReadWrite<u16, UCxICTL::Register>),
        (0x1E => _reserved5),
        (0x20 => @END),
    }
}

register_bitfields![u16,
    UCxCTLW0 [
        /// Software reset enable
        UCSWRST OFFSET(0) NUMBITS(1) []
    ],
    UCxSTATW [
        /// Transmit or receive operation in progress
        UCBUSY OFFSET(0) NUMBITS(1) [],
        /// Receive error (UART only, reads zero on B blocks)
        UCRXERR OFFSET(2) NUMBITS(1) [],
        /// Overrun
        UCOE OFFSET(5) NUMBITS(1) [],
        /// Framing error
        UCFE OFFSET(6) NUMBITS(1) []
    ],
    UCxIE [
        UCRXIE OFFSET(0) NUMBITS(1) [],
        UCTXIE OFFSET(1) NUMBITS(1) []
    ],
    UCxIFG [
        UCRXIFG OFFSET(0) NUMBITS(1) [],
        UCTXIFG OFFSET(1) NUMBITS(1) []
    ],
    UCxICTL [
        UCRXIE OFFSET(0) NUMBITS(1) [],
        UCTXIE OFFSET(1) NUMBITS(1) [],
        UCRXIFG OFFSET(8) NUMBITS(1) [],
        UCTXIFG OFFSET(9) NUMBITS(1) []
    ]
];

register_bitfields![u8,
    UCxSTAT [
        UCBUSY OFFSET(0) NUMBITS(1) [],
        UCRXERR OFFSET(2) NUMBITS(1) [],
        UCOE OFFSET(5) NUMBITS(1) [],
        UCFE OFFSET(6) NUMBITS(1) []
    ]
];

/// Register family of an engine block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Family {
    EusciA,
    EusciB,
    Usci,
}

impl Family {
    /// View the block at `base` as this family's registers
    ///
    /// # Safety
    ///
    /// `base` must address a real register block of this family, and
    /// nothing else may access it through another path.
    pub unsafe fn block(self, base: usize) -> &'static dyn UsciBlock {
        // SAFETY: the caller vouches for the address; every block type is
        // repr(C) and at most 2-byte aligned, which engine bases always are.
        match self {
            Family::EusciA => &*(base as *const EusciARegisters),
            Family::EusciB => &*(base as *const EusciBRegisters),
            Family::Usci => &*(base as *const UsciRegisters),
        }
    }
}

/// What the multiplexer does to one engine register block
pub trait UsciBlock {
    /// Set the software reset bit
    fn hold_reset(&self);
    /// Clear the software reset bit
    fn release_reset(&self);
    /// Write control word 0, keeping the engine in reset
    fn write_ctlw0(&self, value: u16);
    /// Write control word 1 where the block has one
    fn write_ctlw1(&self, value: u16);
    /// Write the bit rate divisor
    fn write_baud(&self, divisor: u16);
    /// Enable RX and TX interrupts
    fn enable_interrupts(&self);
    /// Disable RX and TX interrupts
    fn disable_interrupts(&self);
    /// Load the transmit buffer
    fn write_tx(&self, byte: u8);
    /// Read the receive buffer
    fn read_rx(&self) -> u8;
    fn tx_pending(&self) -> bool;
    fn rx_pending(&self) -> bool;
    /// Received byte flagged as corrupted
    fn rx_error(&self) -> bool;
    /// Shift in progress
    fn is_busy(&self) -> bool;
    /// Clear the TX flag so an idle transmitter stops interrupting
    fn ack_tx(&self);
}

/// Control word 0 as written: the caller's value with the reset bit held
fn held(value: u16) -> u16 {
    let mut word = LocalRegisterCopy::<u16, UCxCTLW0::Register>::new(value);
    word.modify(UCxCTLW0::UCSWRST::SET);
    word.get()
}

macro_rules! eusci_block {
    ($regs:ty) => {
        impl UsciBlock for $regs {
            fn hold_reset(&self) {
                self.ctlw0.modify(UCxCTLW0::UCSWRST::SET);
            }

            fn release_reset(&self) {
                self.ctlw0.modify(UCxCTLW0::UCSWRST::CLEAR);
            }

            fn write_ctlw0(&self, value: u16) {
                self.ctlw0.set(held(value));
            }

            fn write_ctlw1(&self, value: u16) {
                self.ctlw1.set(value);
            }

            fn write_baud(&self, divisor: u16) {
                self.brw.set(divisor);
            }

            fn enable_interrupts(&self) {
                self.ie.modify(UCxIE::UCRXIE::SET + UCxIE::UCTXIE::SET);
            }

            fn disable_interrupts(&self) {
                self.ie.modify(UCxIE::UCRXIE::CLEAR + UCxIE::UCTXIE::CLEAR);
            }

            fn write_tx(&self, byte: u8) {
                self.txbuf.set(u16::from(byte));
            }

            fn read_rx(&self) -> u8 {
                self.rxbuf.get() as u8
            }

            fn tx_pending(&self) -> bool {
                self.ifg.is_set(UCxIFG::UCTXIFG)
            }

            fn rx_pending(&self) -> bool {
                self.ifg.is_set(UCxIFG::UCRXIFG)
            }

            fn rx_error(&self) -> bool {
                let stat = self.statw.extract();
                stat.is_set(UCxSTATW::UCRXERR)
                    || stat.is_set(UCxSTATW::UCOE)
                    || stat.is_set(UCxSTATW::UCFE)
            }

            fn is_busy(&self) -> bool {
                self.statw.is_set(UCxSTATW::UCBUSY)
            }

            fn ack_tx(&self) {
                self.ifg.modify(UCxIFG::UCTXIFG::CLEAR);
            }
        }
    };
}

eusci_block!(EusciARegisters);
eusci_block!(EusciBRegisters);

impl UsciBlock for UsciRegisters {
    fn hold_reset(&self) {
        self.ctlw0.modify(UCxCTLW0::UCSWRST::SET);
    }

    fn release_reset(&self) {
        self.ctlw0.modify(UCxCTLW0::UCSWRST::CLEAR);
    }

    fn write_ctlw0(&self, value: u16) {
        self.ctlw0.set(held(value));
    }

    // USCI has no control word 1; the deglitch time is fixed
    fn write_ctlw1(&self, _value: u16) {}

    fn write_baud(&self, divisor: u16) {
        self.brw.set(divisor);
    }

    fn enable_interrupts(&self) {
        self.ictl.modify(UCxICTL::UCRXIE::SET + UCxICTL::UCTXIE::SET);
    }

    fn disable_interrupts(&self) {
        self.ictl.modify(UCxICTL::UCRXIE::CLEAR + UCxICTL::UCTXIE::CLEAR);
    }

    fn write_tx(&self, byte: u8) {
        self.txbuf.set(byte);
    }

    fn read_rx(&self) -> u8 {
        self.rxbuf.get()
    }

    fn tx_pending(&self) -> bool {
        self.ictl.is_set(UCxICTL::UCTXIFG)
    }

    fn rx_pending(&self) -> bool {
        self.ictl.is_set(UCxICTL::UCRXIFG)
    }

    fn rx_error(&self) -> bool {
        let stat = self.stat.extract();
        stat.is_set(UCxSTAT::UCRXERR) || stat.is_set(UCxSTAT::UCOE) || stat.is_set(UCxSTAT::UCFE)
    }

    fn is_busy(&self) -> bool {
        self.stat.is_set(UCxSTAT::UCBUSY)
    }

    fn ack_tx(&self) {
        self.ictl.modify(UCxICTL::UCTXIFG::CLEAR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::size_of;

    /// Host memory standing in for one register block
    #[repr(C, align(2))]
    struct FakeBlock([u8; 0x30]);

    impl FakeBlock {
        fn new() -> Self {
            Self([0; 0x30])
        }

        fn view(&mut self, family: Family) -> &dyn UsciBlock {
            // SAFETY: the buffer is large and aligned enough for every block
            // type and is only reached through this view while it lives.
            unsafe { family.block(self.0.as_mut_ptr() as usize) }
        }

        fn word(&self, offset: usize) -> u16 {
            u16::from_ne_bytes([self.0[offset], self.0[offset + 1]])
        }

        fn set_word(&mut self, offset: usize, value: u16) {
            self.0[offset..offset + 2].copy_from_slice(&value.to_ne_bytes());
        }
    }

    #[test]
    fn test_block_sizes() {
        assert_eq!(size_of::<EusciARegisters>(), 0x20);
        assert_eq!(size_of::<EusciBRegisters>(), 0x30);
        assert_eq!(size_of::<UsciRegisters>(), 0x20);
    }

    #[test]
    fn test_ctlw0_write_keeps_reset() {
        let mut mem = FakeBlock::new();
        mem.view(Family::EusciA).write_ctlw0(0x2980);
        assert_eq!(mem.word(0x00), 0x2981);

        mem.view(Family::EusciA).release_reset();
        assert_eq!(mem.word(0x00), 0x2980);
    }

    #[test]
    fn test_eusci_b_interrupt_registers() {
        let mut mem = FakeBlock::new();
        mem.view(Family::EusciB).enable_interrupts();
        assert_eq!(mem.word(0x2A), 0x0003);

        mem.set_word(0x2C, 0x0003);
        let regs = mem.view(Family::EusciB);
        assert!(regs.tx_pending());
        assert!(regs.rx_pending());
        regs.ack_tx();
        assert_eq!(mem.word(0x2C), 0x0001);
    }

    #[test]
    fn test_eusci_status_bits() {
        let mut mem = FakeBlock::new();
        // eUSCI_A keeps its status word at 0x0A, eUSCI_B at 0x08
        mem.set_word(0x0A, 0x0001);
        assert!(mem.view(Family::EusciA).is_busy());
        assert!(!mem.view(Family::EusciB).is_busy());

        mem.set_word(0x08, 0x0020);
        let regs = mem.view(Family::EusciB);
        assert!(regs.rx_error());
        assert!(!regs.is_busy());
    }

    #[test]
    fn test_usci_flags_share_one_word() {
        let mut mem = FakeBlock::new();
        mem.view(Family::Usci).enable_interrupts();
        assert_eq!(mem.0[0x1C], 0x03);
        assert_eq!(mem.0[0x1D], 0x00);

        mem.0[0x1D] = 0x02;
        let regs = mem.view(Family::Usci);
        assert!(regs.tx_pending());
        assert!(!regs.rx_pending());
        regs.ack_tx();
        assert_eq!(mem.0[0x1D], 0x00);
        assert_eq!(mem.0[0x1C], 0x03);
    }

    #[test]
    fn test_usci_byte_buffers() {
        let mut mem = FakeBlock::new();
        mem.0[0x0C] = 0x5A;
        let regs = mem.view(Family::Usci);
        regs.write_tx(0xA5);
        assert_eq!(regs.read_rx(), 0x5A);
        regs.write_ctlw1(0xFFFF);
        assert_eq!(mem.0[0x0E], 0xA5);
        assert_eq!(mem.word(0x02), 0);
    }

    #[test]
    fn test_usci_status_errors() {
        let mut mem = FakeBlock::new();
        mem.0[0x0A] = 0x40;
        assert!(mem.view(Family::Usci).rx_error());
        mem.0[0x0A] = 0x01;
        let regs = mem.view(Family::Usci);
        assert!(!regs.rx_error());
        assert!(regs.is_busy());
    }
}
