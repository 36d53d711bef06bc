//! Line and driver configuration.

// ---------------------------------------------------------------------------
// Baud rate
// ---------------------------------------------------------------------------

/// Highest rate the 1.8432 MHz UART clock supports (divisor 1).
pub const UART_CLOCK_BAUD: u32 = 115_200;

/// Baud rate selection for UART initialization.
///
/// The discriminant is the rate in bits per second; the divisor latch value
/// is derived as `115200 / rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum BaudRate {
    /// 115200 baud (divisor = 1).
    Baud115200 = 115_200,
    /// 57600 baud (divisor = 2).
    Baud57600 = 57_600,
    /// 38400 baud (divisor = 3).
    Baud38400 = 38_400,
    /// 19200 baud (divisor = 6).
    Baud19200 = 19_200,
    /// 9600 baud (divisor = 12).
    Baud9600 = 9_600,
}

impl BaudRate {
    /// Returns the rate in bits per second.
    #[inline]
    #[must_use]
    pub const fn bits_per_second(self) -> u32 {
        self as u32
    }

    /// Returns the divisor latch value for this rate.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn divisor(self) -> u16 {
        // Largest quotient is 12, well inside u16.
        (UART_CLOCK_BAUD / self.bits_per_second()) as u16
    }

    /// Returns the `(DLL, DLM)` byte pair written while the latch is open.
    #[inline]
    #[must_use]
    pub const fn divisor_bytes(self) -> (u8, u8) {
        let [low, high] = self.divisor().to_le_bytes();
        (low, high)
    }
}

// ---------------------------------------------------------------------------
// COM port constants
// ---------------------------------------------------------------------------

/// Standard COM1 base I/O port address.
pub const COM1: u16 = 0x3F8;
/// Standard COM2 base I/O port address.
pub const COM2: u16 = 0x2F8;
/// ISA interrupt line wired to COM1.
pub const COM1_IRQ: u8 = 4;
/// ISA interrupt line wired to COM2.
pub const COM2_IRQ: u8 = 3;

/// Liveness string transmitted once the UART has been detected.
pub const DEFAULT_BANNER: &[u8] = b"xv6...\n";

/// Upper bound on LSR polls before a byte is written regardless.
pub const DEFAULT_TX_POLL_LIMIT: u32 = 128;

/// Pause between LSR polls while the transmitter is busy.
pub const DEFAULT_TX_POLL_DELAY_US: u32 = 10;

// ---------------------------------------------------------------------------
// UartConfig
// ---------------------------------------------------------------------------

/// Everything [`Uart8250::initialize`](super::Uart8250::initialize) needs to
/// know about the port it drives.
///
/// The poll limit and delay are empirical; 128 × 10 µs bounds a stalled
/// transmit at roughly 1.28 ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartConfig {
    /// Base I/O port address.
    pub base: u16,
    /// Line rate.
    pub baud: BaudRate,
    /// Interrupt line routed once the device is detected.
    pub irq: u8,
    /// CPU index the interrupt is delivered to.
    pub target_cpu: u32,
    /// Bytes transmitted verbatim after a successful probe.
    pub banner: &'static [u8],
    /// Maximum LSR polls per transmitted byte.
    pub tx_poll_limit: u32,
    /// Delay after each poll that found the transmitter busy.
    pub tx_poll_delay_us: u32,
}

impl UartConfig {
    /// COM1 at 9600 8N1, IRQ 4 routed to CPU 0.
    pub const COM1: Self = Self {
        base: COM1,
        baud: BaudRate::Baud9600,
        irq: COM1_IRQ,
        target_cpu: 0,
        banner: DEFAULT_BANNER,
        tx_poll_limit: DEFAULT_TX_POLL_LIMIT,
        tx_poll_delay_us: DEFAULT_TX_POLL_DELAY_US,
    };

    /// COM2 with otherwise identical settings.
    pub const COM2: Self = Self {
        base: COM2,
        irq: COM2_IRQ,
        ..Self::COM1
    };

    /// Overrides the line rate.
    #[must_use]
    pub const fn with_baud(self, baud: BaudRate) -> Self {
        Self { baud, ..self }
    }

    /// Overrides the interrupt routing.
    #[must_use]
    pub const fn with_irq(self, irq: u8, target_cpu: u32) -> Self {
        Self {
            irq,
            target_cpu,
            ..self
        }
    }

    /// Overrides the startup banner. An empty banner sends nothing.
    #[must_use]
    pub const fn with_banner(self, banner: &'static [u8]) -> Self {
        Self { banner, ..self }
    }

    /// Overrides the transmit poll bound.
    #[must_use]
    pub const fn with_tx_poll(self, limit: u32, delay_us: u32) -> Self {
        Self {
            tx_poll_limit: limit,
            tx_poll_delay_us: delay_us,
            ..self
        }
    }

    /// Absolute port address of the register at `offset`.
    ///
    /// Wraps at the top of the 16-bit I/O space, as the processor does.
    #[inline]
    #[must_use]
    pub const fn port(&self, offset: u16) -> u16 {
        self.base.wrapping_add(offset)
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::COM1
    }
}
