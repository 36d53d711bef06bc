//! Byte-wide port I/O.
//!
//! [`PortIo`] is the capability the UART driver is written against: read or
//! write one byte at an absolute port address. Production code uses
//! [`RawPortIo`], which issues x86 `in`/`out` instructions through the typed
//! [`Port`] wrapper; tests substitute a recording register bank.

use core::marker::PhantomData;

/// Byte-level access to an I/O address space.
///
/// Methods take `&self` because device registers are shared hardware state;
/// implementations needing interior bookkeeping use cells.
pub trait PortIo {
    /// Reads one byte from `port`.
    fn read_u8(&self, port: u16) -> u8;

    /// Writes `value` to `port`.
    fn write_u8(&self, port: u16, value: u8);
}

impl<T: PortIo + ?Sized> PortIo for &T {
    #[inline]
    fn read_u8(&self, port: u16) -> u8 {
        (**self).read_u8(port)
    }

    #[inline]
    fn write_u8(&self, port: u16, value: u8) {
        (**self).write_u8(port, value);
    }
}

/// Trait for types that can be read from an I/O port.
///
/// # Safety
///
/// Implementations must use the correct `in` instruction variant for the type
/// size.
pub unsafe trait PortRead {
    /// Reads a value from the given I/O port.
    ///
    /// # Safety
    ///
    /// The caller must ensure `port` is a valid I/O port that is safe to read.
    unsafe fn read_from_port(port: u16) -> Self;
}

/// Trait for types that can be written to an I/O port.
///
/// # Safety
///
/// Implementations must use the correct `out` instruction variant for the type
/// size.
pub unsafe trait PortWrite {
    /// Writes a value to the given I/O port.
    ///
    /// # Safety
    ///
    /// The caller must ensure `port` is a valid I/O port that is safe to write.
    unsafe fn write_to_port(port: u16, value: Self);
}

// SAFETY: Uses `in al, dx` which reads a single byte.
#[cfg(target_arch = "x86_64")]
unsafe impl PortRead for u8 {
    #[inline]
    unsafe fn read_from_port(port: u16) -> Self {
        let val: u8;
        unsafe {
            core::arch::asm!(
                "in al, dx",
                in("dx") port,
                out("al") val,
                options(nomem, nostack, preserves_flags),
            );
        }
        val
    }
}

// SAFETY: Uses `out dx, al` which writes a single byte.
#[cfg(target_arch = "x86_64")]
unsafe impl PortWrite for u8 {
    #[inline]
    unsafe fn write_to_port(port: u16, value: Self) {
        unsafe {
            core::arch::asm!(
                "out dx, al",
                in("dx") port,
                in("al") value,
                options(nomem, nostack, preserves_flags),
            );
        }
    }
}

/// A read-write I/O port at a fixed address, generic over the value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Port<T: PortRead + PortWrite> {
    port: u16,
    _phantom: PhantomData<T>,
}

impl<T: PortRead + PortWrite> Port<T> {
    /// Creates a new port handle. Does **not** perform any I/O.
    #[inline]
    pub const fn new(port: u16) -> Self {
        Self {
            port,
            _phantom: PhantomData,
        }
    }

    /// Reads a value from this port.
    ///
    /// # Safety
    ///
    /// The caller must ensure this port is valid and safe to read.
    #[inline]
    pub unsafe fn read(&self) -> T {
        unsafe { T::read_from_port(self.port) }
    }

    /// Writes a value to this port.
    ///
    /// # Safety
    ///
    /// The caller must ensure this port is valid and safe to write.
    #[inline]
    pub unsafe fn write(&self, value: T) {
        unsafe { T::write_to_port(self.port, value) }
    }
}

/// [`PortIo`] backed by the processor's I/O instructions.
///
/// Zero-sized; the safety obligation is discharged once, at construction.
#[cfg(target_arch = "x86_64")]
#[derive(Debug, Clone, Copy)]
pub struct RawPortIo {
    _private: (),
}

#[cfg(target_arch = "x86_64")]
impl RawPortIo {
    /// Creates a raw port accessor.
    ///
    /// # Safety
    ///
    /// Must only run in a context with I/O privilege (ring 0 or IOPL), and
    /// every address later passed to [`PortIo`] must belong to a device the
    /// caller owns. Reading an unpopulated port returns 0xFF on PC hardware,
    /// which the UART probe relies on.
    #[must_use]
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

#[cfg(target_arch = "x86_64")]
impl PortIo for RawPortIo {
    #[inline]
    fn read_u8(&self, port: u16) -> u8 {
        // SAFETY: Upheld by the contract of `RawPortIo::new`.
        unsafe { Port::<u8>::new(port).read() }
    }

    #[inline]
    fn write_u8(&self, port: u16, value: u8) {
        // SAFETY: Upheld by the contract of `RawPortIo::new`.
        unsafe { Port::<u8>::new(port).write(value) }
    }
}
