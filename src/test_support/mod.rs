//! Test utilities shared across crate-level unit tests.

pub mod handle;

use std::sync::{LazyLock, Mutex};

pub use handle::ScriptedHandle;

/// Serialises tests that change logger levels or handlers.
pub static LOG_GUARD: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
