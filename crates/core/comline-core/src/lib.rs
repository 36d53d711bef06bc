//! Core primitives for the comline serial console.
//!
//! Everything the UART driver needs from its environment lives here as a small
//! capability trait: byte-wide port I/O ([`port::PortIo`]), microsecond delays
//! ([`delay::Delay`]) and interrupt routing ([`irq::InterruptSink`]). The raw
//! `in`/`out` instructions behind [`port::RawPortIo`] are the only unsafe
//! hardware access in the workspace.

#![cfg_attr(not(test), no_std)]

pub mod delay;
pub mod error;
pub mod irq;
pub mod log;
pub mod port;
pub mod sync;

pub use error::DriverError;
