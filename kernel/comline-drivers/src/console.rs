//! Seam between the UART receive path and the console line discipline.

/// Consumer of received console bytes.
///
/// The UART interrupt handler does not decide how much to read. It hands the
/// line discipline a byte source and lets it pull until the source runs dry
/// (returns `None`) or its own buffer is full. Each call of the source is one
/// non-blocking status check plus, if data is ready, one receive read.
pub trait ConsoleIntake {
    /// Drains bytes from `source` into the console.
    fn intake(&mut self, source: &mut dyn FnMut() -> Option<u8>);
}
