//! Host-side stand-ins for the UART's collaborators.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use comline_core::DriverError;
use comline_core::delay::Delay;
use comline_core::irq::InterruptSink;
use comline_core::port::PortIo;

use crate::console::ConsoleIntake;
use crate::uart8250::reg;

/// One observed bus access, with the offset relative to the mock's base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    Read(u16, u8),
    Write(u16, u8),
}

/// Recording register bank for a single UART.
///
/// LSR reads pop from a script and fall back to `lsr_idle` once it is empty.
/// RBR reads pop queued receive bytes (0 when empty). Accesses outside the
/// eight registers at `base` (wrapping at 0xFFFF) panic.
pub(crate) struct MockPorts {
    base: u16,
    log: RefCell<Vec<Access>>,
    lsr_script: RefCell<VecDeque<u8>>,
    lsr_idle: Cell<u8>,
    rx: RefCell<VecDeque<u8>>,
    iir: u8,
}

impl MockPorts {
    pub(crate) fn new(base: u16, lsr_idle: u8) -> Self {
        Self {
            base,
            log: RefCell::new(Vec::new()),
            lsr_script: RefCell::new(VecDeque::new()),
            lsr_idle: Cell::new(lsr_idle),
            rx: RefCell::new(VecDeque::new()),
            iir: 0x01,
        }
    }

    pub(crate) fn script_lsr(&self, values: &[u8]) {
        self.lsr_script.borrow_mut().extend(values);
    }

    pub(crate) fn set_lsr_idle(&self, value: u8) {
        self.lsr_idle.set(value);
    }

    pub(crate) fn queue_rx(&self, bytes: &[u8]) {
        self.rx.borrow_mut().extend(bytes);
    }

    pub(crate) fn iir(&self) -> u8 {
        self.iir
    }

    pub(crate) fn accesses(&self) -> Vec<Access> {
        self.log.borrow().clone()
    }

    pub(crate) fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    /// Bytes written to THR, in order. Assumes DLAB was clear for each.
    pub(crate) fn transmitted_after(&self, start: usize) -> Vec<u8> {
        self.log.borrow()[start..]
            .iter()
            .filter_map(|a| match *a {
                Access::Write(reg::THR, v) => Some(v),
                _ => None,
            })
            .collect()
    }

    fn offset(&self, port: u16) -> u16 {
        let offset = port.wrapping_sub(self.base);
        assert!(offset < 8, "port {port:#x} outside UART at {:#x}", self.base);
        offset
    }
}

impl PortIo for MockPorts {
    fn read_u8(&self, port: u16) -> u8 {
        let offset = self.offset(port);
        let value = match offset {
            reg::LSR => self
                .lsr_script
                .borrow_mut()
                .pop_front()
                .unwrap_or(self.lsr_idle.get()),
            reg::RBR => self.rx.borrow_mut().pop_front().unwrap_or(0),
            reg::IIR => self.iir,
            _ => 0,
        };
        self.log.borrow_mut().push(Access::Read(offset, value));
        value
    }

    fn write_u8(&self, port: u16, value: u8) {
        let offset = self.offset(port);
        self.log.borrow_mut().push(Access::Write(offset, value));
    }
}

/// Delay that only records what it was asked to do.
#[derive(Default)]
pub(crate) struct MockDelay {
    calls: RefCell<Vec<u32>>,
}

impl MockDelay {
    pub(crate) fn calls(&self) -> Vec<u32> {
        self.calls.borrow().clone()
    }
}

impl Delay for MockDelay {
    fn delay_us(&self, us: u32) {
        self.calls.borrow_mut().push(us);
    }
}

/// Interrupt controller that records routing requests.
#[derive(Default)]
pub(crate) struct MockIrq {
    enabled: RefCell<Vec<(u8, u32)>>,
    refuse: bool,
}

impl MockIrq {
    pub(crate) fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }

    pub(crate) fn enabled(&self) -> Vec<(u8, u32)> {
        self.enabled.borrow().clone()
    }
}

impl InterruptSink for MockIrq {
    fn enable_irq(&self, irq: u8, cpu: u32) -> Result<(), DriverError> {
        self.enabled.borrow_mut().push((irq, cpu));
        if self.refuse {
            Err(DriverError::IrqUnavailable)
        } else {
            Ok(())
        }
    }
}

/// Line discipline stand-in that drains up to `limit` bytes per intake.
pub(crate) struct MockConsole {
    limit: usize,
    pub(crate) received: Vec<u8>,
    pub(crate) intakes: usize,
}

impl MockConsole {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            limit,
            received: Vec::new(),
            intakes: 0,
        }
    }
}

impl ConsoleIntake for MockConsole {
    fn intake(&mut self, source: &mut dyn FnMut() -> Option<u8>) {
        self.intakes += 1;
        for _ in 0..self.limit {
            match source() {
                Some(byte) => self.received.push(byte),
                None => break,
            }
        }
    }
}
