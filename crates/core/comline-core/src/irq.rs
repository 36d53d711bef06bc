//! Interrupt routing seam.

use crate::error::DriverError;

/// Interrupt controller facade used by drivers to request delivery.
///
/// The UART only needs one call: route its line to a CPU once the device is
/// known to exist. Implementations wrap the I/O APIC (or the legacy PIC) and
/// report lines they cannot route with [`DriverError::IrqUnavailable`].
pub trait InterruptSink {
    /// Enables delivery of interrupt line `irq` to the CPU with index `cpu`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::IrqUnavailable`] if the line cannot be routed.
    fn enable_irq(&self, irq: u8, cpu: u32) -> Result<(), DriverError>;
}

impl<T: InterruptSink + ?Sized> InterruptSink for &T {
    #[inline]
    fn enable_irq(&self, irq: u8, cpu: u32) -> Result<(), DriverError> {
        (**self).enable_irq(irq, cpu)
    }
}
