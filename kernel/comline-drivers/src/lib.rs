//! Serial console drivers for the comline kernel stack.

#![cfg_attr(not(test), no_std)]

pub mod console;
#[cfg(target_arch = "x86_64")]
pub mod serial_console;
pub mod uart8250;

#[cfg(test)]
pub(crate) mod mock;

pub use self::uart8250::{BaudRate, Uart8250, UartConfig};
