//! Driver error types.

use core::fmt;

/// Errors reported across the driver's collaborator seams.
///
/// The register protocol itself never fails: an absent UART degrades every
/// operation to a no-op and a transmit timeout still writes the byte. These
/// variants only surface from interrupt routing and global installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// The hardware device was not found or did not respond.
    DeviceNotFound,
    /// The interrupt controller refused to route the requested line.
    IrqUnavailable,
    /// A write-once slot already holds a driver instance.
    AlreadyInitialized,
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceNotFound => f.write_str("device not found"),
            Self::IrqUnavailable => f.write_str("interrupt line unavailable"),
            Self::AlreadyInitialized => f.write_str("driver already initialized"),
        }
    }
}
