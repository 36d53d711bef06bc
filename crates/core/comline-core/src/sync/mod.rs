//! Synchronization primitives usable from `static` items before any
//! allocator or scheduler exists.

mod once;

pub(crate) mod loom_compat;

pub use once::WriteOnce;
