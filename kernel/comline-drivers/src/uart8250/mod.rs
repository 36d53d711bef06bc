//! 8250/16550 UART console driver.
//!
//! [`Uart8250`] programs the line (divisor latch, 8N1, FIFO off, RX interrupt
//! on), probes for the device, and then moves single bytes: a bounded
//! busy-wait transmit and a non-blocking receive. All register access goes
//! through a [`PortIo`] capability and every wait through a [`Delay`], so the
//! whole protocol runs against a mock register bank in tests.
//!
//! A missing UART is not an error. The probe result is fixed when
//! [`Uart8250::initialize`] returns, and an absent driver turns every later
//! operation into a no-op that never touches the bus.

use core::fmt;

use comline_core::delay::Delay;
use comline_core::irq::InterruptSink;
use comline_core::port::PortIo;
use comline_core::{DriverError, kdebug, kinfo, kwarn};

use crate::console::ConsoleIntake;

mod config;
mod regs;

pub use config::{
    BaudRate, COM1, COM1_IRQ, COM2, COM2_IRQ, DEFAULT_BANNER, DEFAULT_TX_POLL_DELAY_US,
    DEFAULT_TX_POLL_LIMIT, UART_CLOCK_BAUD, UartConfig,
};
pub use regs::{Fcr, Ier, LSR_ABSENT, Lcr, Lsr, Mcr, reg};


// ---------------------------------------------------------------------------
// Uart8250
// ---------------------------------------------------------------------------

/// An initialized (or known-absent) 8250-compatible UART.
///
/// The only state is whether the probe found a device. It is decided inside
/// [`initialize`](Self::initialize) and cannot change afterwards: the field is
/// private and nothing writes it again.
///
/// Transmit and receive take `&self`. They touch disjoint registers apart
/// from LSR, whose reads are side-effect free, so the receive interrupt may
/// preempt a transmit in progress. On SMP, concurrent transmitters must be
/// serialized by the caller.
#[derive(Debug)]
pub struct Uart8250<P, D> {
    io: P,
    delay: D,
    config: UartConfig,
    present: bool,
}

impl<P: PortIo, D: Delay> Uart8250<P, D> {
    /// Programs the UART described by `config` and probes for it.
    ///
    /// Register sequence: FIFO off, open the divisor latch, write the divisor,
    /// close the latch with 8N1 framing, clear MCR, enable the RX interrupt,
    /// then read LSR. An LSR of `0xFF` means nothing answered at `config.base`
    /// and the returned driver is absent; nothing else is touched.
    ///
    /// When the device is present, stale interrupt conditions are
    /// acknowledged (IIR then RBR), `config.irq` is routed to
    /// `config.target_cpu` through `irq`, and `config.banner` is transmitted.
    /// A routing failure is logged and the driver stays usable by polling.
    pub fn initialize<I>(io: P, delay: D, irq: &I, config: UartConfig) -> Self
    where
        I: InterruptSink + ?Sized,
    {
        let mut uart = Self {
            io,
            delay,
            config,
            present: false,
        };

        uart.program_line();

        if let Err(err) = uart.probe() {
            kwarn!("uart8250: {} at {:#x}, serial disabled", err, config.base);
            return uart;
        }
        uart.present = true;

        uart.acknowledge_interrupts();

        match irq.enable_irq(config.irq, config.target_cpu) {
            Ok(()) => kinfo!(
                "uart8250: {:#x} at {} baud, IRQ {} -> CPU {}",
                config.base,
                config.baud.bits_per_second(),
                config.irq,
                config.target_cpu
            ),
            Err(err) => kwarn!(
                "uart8250: IRQ {} routing failed ({}), receive by polling only",
                config.irq,
                err
            ),
        }

        uart.transmit(config.banner);
        uart
    }

    fn write_reg(&self, offset: u16, value: u8) {
        self.io.write_u8(self.config.port(offset), value);
    }

    fn read_reg(&self, offset: u16) -> u8 {
        self.io.read_u8(self.config.port(offset))
    }

    fn program_line(&self) {
        let (low, high) = self.config.baud.divisor_bytes();

        // 1. FIFO off.
        self.write_reg(reg::FCR, Fcr::empty().bits());

        // 2. Open the divisor latch and program the rate.
        self.write_reg(reg::LCR, Lcr::DLAB.bits());
        self.write_reg(reg::DLL, low);
        self.write_reg(reg::DLM, high);

        // 3. 8N1, clears DLAB in the same write.
        self.write_reg(reg::LCR, Lcr::EIGHT_N_ONE.bits());

        // 4. No modem control lines.
        self.write_reg(reg::MCR, Mcr::empty().bits());

        // 5. Interrupt on received data.
        self.write_reg(reg::IER, Ier::DATA_AVAILABLE.bits());

        kdebug!(
            "uart8250: {:#x} divisor {:#04x}:{:#04x}",
            self.config.base,
            high,
            low
        );
    }

    fn probe(&self) -> Result<(), DriverError> {
        if self.read_reg(reg::LSR) == LSR_ABSENT {
            Err(DriverError::DeviceNotFound)
        } else {
            Ok(())
        }
    }

    fn acknowledge_interrupts(&self) {
        let _ = self.read_reg(reg::IIR);
        let _ = self.read_reg(reg::RBR);
    }

    /// Returns `true` if the probe found a device.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.present
    }

    /// Returns the configuration this driver was initialized with.
    #[must_use]
    pub const fn config(&self) -> &UartConfig {
        &self.config
    }

    /// Returns the current Line Status Register value.
    ///
    /// An absent driver reports an empty status without reading the bus.
    #[must_use]
    pub fn line_status(&self) -> Lsr {
        if !self.present {
            return Lsr::empty();
        }
        Lsr::from_bits_truncate(self.read_reg(reg::LSR))
    }

    /// Sends one byte.
    ///
    /// Polls LSR for THR-empty at most `tx_poll_limit` times, pausing
    /// `tx_poll_delay_us` after every busy reading, then writes THR whether or
    /// not the transmitter ever reported ready. A byte written into a busy
    /// THR may be lost; the caller is never blocked longer than the bound.
    pub fn transmit_byte(&self, byte: u8) {
        if !self.present {
            return;
        }
        for _ in 0..self.config.tx_poll_limit {
            if Lsr::from_bits_truncate(self.read_reg(reg::LSR)).contains(Lsr::THR_EMPTY) {
                break;
            }
            self.delay.delay_us(self.config.tx_poll_delay_us);
        }
        self.write_reg(reg::THR, byte);
    }

    /// Sends `bytes` verbatim, one [`transmit_byte`](Self::transmit_byte) each.
    pub fn transmit(&self, bytes: &[u8]) {
        for &byte in bytes {
            self.transmit_byte(byte);
        }
    }

    /// Sends text for a terminal, expanding `\n` to `\r\n`.
    pub fn write_text(&self, s: &str) {
        for byte in s.bytes() {
            if byte == b'\n' {
                self.transmit_byte(b'\r');
            }
            self.transmit_byte(byte);
        }
    }

    /// Non-blocking read: returns `Some(byte)` if LSR reports data ready.
    ///
    /// Exactly one LSR read, plus one RBR read when data is ready. Never waits.
    #[must_use]
    pub fn poll_receive_byte(&self) -> Option<u8> {
        if !self.present {
            return None;
        }
        if Lsr::from_bits_truncate(self.read_reg(reg::LSR)).contains(Lsr::DATA_READY) {
            Some(self.read_reg(reg::RBR))
        } else {
            None
        }
    }

    /// Receive interrupt entry point.
    ///
    /// Hands `console` a byte source backed by
    /// [`poll_receive_byte`](Self::poll_receive_byte); the console pulls as
    /// many bytes as it wants. An absent driver still calls the console, with
    /// a source that is immediately exhausted.
    pub fn handle_interrupt<C>(&self, console: &mut C)
    where
        C: ConsoleIntake + ?Sized,
    {
        let mut source = || self.poll_receive_byte();
        console.intake(&mut source);
    }
}

impl<P: PortIo, D: Delay> fmt::Write for Uart8250<P, D> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_text(s);
        Ok(())
    }
}
