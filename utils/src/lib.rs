//! Infrastructure helpers that don't belong in the IO-free `tabking-types`.
//!
//! - **`atomic_write`**: crash-safe slot persistence (temp + rename)

pub mod atomic_write;

pub use atomic_write::{SyncPolicy, atomic_write_with, recover_bak_file};
