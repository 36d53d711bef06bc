//! Coarse busy-wait delays.

#[cfg(target_arch = "x86_64")]
use crate::port::Port;

/// A short busy-wait delay primitive.
pub trait Delay {
    /// Spins for roughly `us` microseconds. Precision is not guaranteed.
    fn delay_us(&self, us: u32);
}

impl<T: Delay + ?Sized> Delay for &T {
    #[inline]
    fn delay_us(&self, us: u32) {
        (**self).delay_us(us);
    }
}

/// POST diagnostic port; writes to it are ignored by hardware.
#[cfg(target_arch = "x86_64")]
const POST_PORT: u16 = 0x80;

/// Delay built from writes to the POST diagnostic port.
///
/// Each ISA bus write takes about one microsecond on PC-compatible chipsets,
/// so `delay_us(n)` issues `n` writes. Usable before any timer is calibrated.
#[cfg(target_arch = "x86_64")]
#[derive(Debug, Clone, Copy, Default)]
pub struct PortDelay;

#[cfg(target_arch = "x86_64")]
impl Delay for PortDelay {
    fn delay_us(&self, us: u32) {
        let port = Port::<u8>::new(POST_PORT);
        for _ in 0..us {
            // SAFETY: Port 0x80 is the POST diagnostic port, writing 0 is
            // harmless and serves as an I/O delay.
            unsafe { port.write(0) };
        }
    }
}
