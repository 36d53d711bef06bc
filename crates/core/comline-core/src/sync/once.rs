//! Write-once cell for boot-time singletons.
//!
//! Provides [`WriteOnce`], which accepts exactly one value and hands out
//! shared references to it afterwards. [`WriteOnce::init_with`] claims the
//! slot before running its constructor, so a constructor with side effects
//! (programming a device) runs at most once even when callers race.
//! [`WriteOnce::set`] stores a value the caller already built and hands it
//! back if the slot was taken.

use core::mem::MaybeUninit;

use super::loom_compat::{AtomicU8, Ordering, UnsafeCell};

const UNINIT: u8 = 0;
const WRITING: u8 = 1;
const READY: u8 = 2;

/// A slot that can be written exactly once and read any number of times.
pub struct WriteOnce<T> {
    state: AtomicU8,
    value: UnsafeCell<MaybeUninit<T>>,
}

// SAFETY: The value is only written by the thread that won the UNINIT ->
// WRITING transition, and only read after READY is published with Release.
unsafe impl<T: Send + Sync> Sync for WriteOnce<T> {}
// SAFETY: Moving the cell moves the (possibly initialized) `T`.
unsafe impl<T: Send> Send for WriteOnce<T> {}

impl<T> WriteOnce<T> {
    /// Creates an empty slot.
    #[cfg(not(loom))]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(UNINIT),
            value: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }

    /// Creates an empty slot.
    #[cfg(loom)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(UNINIT),
            value: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }

    /// Stores `value` if the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns `Err(value)` if another value was already stored, or is being
    /// stored concurrently.
    pub fn set(&self, value: T) -> Result<(), T> {
        if !self.claim() {
            return Err(value);
        }
        self.publish(value);
        Ok(())
    }

    /// Claims the slot, then stores the value produced by `init`.
    ///
    /// Returns `None` without calling `init` if the slot was already claimed
    /// by another `set` or `init_with`. While `init` runs, [`get`](Self::get)
    /// keeps returning `None`. If `init` panics the slot stays claimed and
    /// empty.
    pub fn init_with<F>(&self, init: F) -> Option<&T>
    where
        F: FnOnce() -> T,
    {
        if !self.claim() {
            return None;
        }
        self.publish(init());
        // SAFETY: `publish` stored the value and marked it READY.
        Some(unsafe { self.get_unchecked() })
    }

    /// Returns the stored value, or `None` if the slot is still empty.
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        if self.is_set() {
            // SAFETY: READY is only published after the value was written.
            Some(unsafe { self.get_unchecked() })
        } else {
            None
        }
    }

    fn claim(&self) -> bool {
        self.state
            .compare_exchange(UNINIT, WRITING, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    fn publish(&self, value: T) {
        // SAFETY: The caller won `claim`; no reader touches the value until
        // READY is stored below.
        self.value.with_mut(|slot| unsafe {
            (*slot).write(value);
        });
        self.state.store(READY, Ordering::Release);
    }

    /// # Safety
    ///
    /// The state must be READY.
    unsafe fn get_unchecked(&self) -> &T {
        // SAFETY: Initialized per the caller's contract, and never written
        // again while `self` is shared.
        self.value.with(|slot| unsafe { (*slot).assume_init_ref() })
    }

    /// Returns `true` once a value has been published.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.state.load(Ordering::Acquire) == READY
    }
}

#[cfg(not(loom))]
impl<T> Default for WriteOnce<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for WriteOnce<T> {
    fn drop(&mut self) {
        if self.state.load(Ordering::Acquire) == READY {
            // SAFETY: READY means the value is initialized, and `&mut self`
            // guarantees no outstanding borrows.
            self.value
                .with_mut(|slot| unsafe { (*slot).assume_init_drop() });
        }
    }
}
