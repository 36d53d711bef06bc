//! Global COM1 console.
//!
//! The kernel owns one serial console for its whole lifetime. [`init_com1`]
//! initializes the UART once at boot and publishes it in a write-once slot;
//! afterwards output paths reach it through [`com1`], the interrupt dispatch
//! calls [`com1_interrupt`], and [`install_log_sink`] routes
//! `comline_core::log` output to it.

use core::fmt;

use comline_core::DriverError;
use comline_core::delay::PortDelay;
use comline_core::irq::InterruptSink;
use comline_core::log::{self, LogLevel};
use comline_core::port::RawPortIo;
use comline_core::sync::WriteOnce;

use crate::console::ConsoleIntake;
use crate::uart8250::{Uart8250, UartConfig};

/// The driver type behind the global console.
pub type Com1Uart = Uart8250<RawPortIo, PortDelay>;

static COM1_UART: WriteOnce<Com1Uart> = WriteOnce::new();

/// Initializes COM1 with [`UartConfig::COM1`] and installs it as the console.
///
/// Returns whether a UART was detected. An absent UART is still installed, so
/// every later console operation is a cheap no-op.
///
/// The console slot is claimed before the first register access, so when
/// callers race exactly one of them programs the UART.
///
/// # Errors
///
/// Returns [`DriverError::AlreadyInitialized`] if the console was already
/// installed or another caller is installing it. The hardware is not touched
/// in that case.
///
/// # Safety
///
/// Must run with I/O privilege, before interrupts for COM1 can be delivered,
/// and the caller must own ports `0x3F8..0x400` and the POST port `0x80`.
pub unsafe fn init_com1<I>(irq: &I) -> Result<bool, DriverError>
where
    I: InterruptSink + ?Sized,
{
    let uart = COM1_UART
        .init_with(|| {
            // SAFETY: Forwarded to our caller.
            let io = unsafe { RawPortIo::new() };
            Uart8250::initialize(io, PortDelay, irq, UartConfig::COM1)
        })
        .ok_or(DriverError::AlreadyInitialized)?;
    Ok(uart.is_present())
}

/// Returns the installed console, if [`init_com1`] has completed.
#[must_use]
pub fn com1() -> Option<&'static Com1Uart> {
    COM1_UART.get()
}

/// IRQ handler body for the COM1 line.
///
/// A spurious interrupt before installation is ignored.
pub fn com1_interrupt(console: &mut dyn ConsoleIntake) {
    if let Some(uart) = com1() {
        uart.handle_interrupt(console);
    }
}

/// Routes the kernel log to COM1.
///
/// Messages logged before [`init_com1`] completes, or while no UART is
/// present, are dropped.
pub fn install_log_sink() {
    // SAFETY: `serial_log` takes no locks and never blocks longer than the
    // bounded transmit poll, so it is callable from any context.
    unsafe { log::set_log_fn(serial_log) };
}

fn serial_log(level: LogLevel, args: fmt::Arguments<'_>) {
    if let Some(uart) = com1() {
        let _ = write_log_line(&mut SerialWriter(uart), level, args);
    }
}

/// Formats one log record as `[LEVEL] message\n`.
fn write_log_line<W: fmt::Write>(
    out: &mut W,
    level: LogLevel,
    args: fmt::Arguments<'_>,
) -> fmt::Result {
    writeln!(out, "[{}] {}", level.name(), args)
}

/// `fmt::Write` adapter over the shared console.
struct SerialWriter(&'static Com1Uart);

impl fmt::Write for SerialWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_text(s);
        Ok(())
    }
}
