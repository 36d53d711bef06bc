//! 8250/16550 register map and bit layouts.

use bitflags::bitflags;

// ---------------------------------------------------------------------------
// Register offsets
// ---------------------------------------------------------------------------

/// Register offsets from the UART base address.
///
/// Several registers alias the same offset; which one is selected depends on
/// the access direction and on [`Lcr::DLAB`].
pub mod reg {
    /// Transmit Holding Register (write, DLAB=0).
    pub const THR: u16 = 0;
    /// Receive Buffer Register (read, DLAB=0).
    pub const RBR: u16 = 0;
    /// Divisor Latch Low byte (DLAB=1).
    pub const DLL: u16 = 0;
    /// Interrupt Enable Register (DLAB=0).
    pub const IER: u16 = 1;
    /// Divisor Latch High byte (DLAB=1).
    pub const DLM: u16 = 1;
    /// Interrupt Identification Register (read).
    pub const IIR: u16 = 2;
    /// FIFO Control Register (write).
    pub const FCR: u16 = 2;
    /// Line Control Register.
    pub const LCR: u16 = 3;
    /// Modem Control Register.
    pub const MCR: u16 = 4;
    /// Line Status Register (read).
    pub const LSR: u16 = 5;
}

/// LSR value read back from an unpopulated I/O address.
pub const LSR_ABSENT: u8 = 0xFF;

// ---------------------------------------------------------------------------
// Bitflag types
// ---------------------------------------------------------------------------

bitflags! {
    /// Interrupt Enable Register bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Ier: u8 {
        /// Enable Received Data Available interrupt.
        const DATA_AVAILABLE    = 1 << 0;
    }
}

bitflags! {
    /// FIFO Control Register bits. The console runs with all of them clear.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Fcr: u8 {
        /// Enable FIFOs.
        const ENABLE            = 1 << 0;
    }
}

bitflags! {
    /// Line Control Register bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Lcr: u8 {
        /// Word length bit 0.
        const WORD_LEN_0        = 1 << 0;
        /// Word length bit 1.
        const WORD_LEN_1        = 1 << 1;
        /// Divisor Latch Access Bit.
        const DLAB              = 1 << 7;

        /// 8 data bits, no parity, 1 stop bit.
        const EIGHT_N_ONE = Self::WORD_LEN_0.bits() | Self::WORD_LEN_1.bits();
    }
}

bitflags! {
    /// Modem Control Register bits. The console asserts none of them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Mcr: u8 {
        /// Data Terminal Ready.
        const DTR               = 1 << 0;
        /// Request To Send.
        const RTS               = 1 << 1;
        /// Auxiliary output 2 (gates the IRQ line on PC-compatible boards).
        const OUT2              = 1 << 3;
    }
}

bitflags! {
    /// Line Status Register bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Lsr: u8 {
        /// Data ready (received data available).
        const DATA_READY        = 1 << 0;
        /// Overrun error.
        const OVERRUN_ERROR     = 1 << 1;
        /// Parity error.
        const PARITY_ERROR      = 1 << 2;
        /// Framing error.
        const FRAMING_ERROR     = 1 << 3;
        /// Break indicator.
        const BREAK_INDICATOR   = 1 << 4;
        /// Transmit Holding Register empty.
        const THR_EMPTY         = 1 << 5;
        /// Transmitter empty (both THR and shift register).
        const TRANSMITTER_EMPTY = 1 << 6;
        /// Error in received FIFO.
        const FIFO_ERROR        = 1 << 7;
    }
}
