//! XORWOW Core - Rust Engine
//!
//! Reproducible parallel random streams with logarithmic jump-ahead.
//!
//! # Architecture
//!
//! - **rng**: Generator state, GF(2) matrix algebra, jump tables
//! - **config**: Stream and worker-set configuration
//! - **checkpoint**: Binary and JSON state persistence
//!
//! # Critical Invariants
//!
//! 1. Same `(seed, subsequence, offset)` produces the same stream everywhere
//! 2. `skip_ahead(n)` is indistinguishable from `n` calls to `next`
//! 3. The shift register is never all zeros

// Module declarations
pub mod checkpoint;
pub mod config;
pub mod rng;

// Re-exports for convenience
pub use checkpoint::{load_state, save_state, CheckpointError, StateSnapshot};
pub use config::{ConfigError, StreamConfig, StreamSetConfig};
pub use rng::{DegenerateStateError, GaussianCache, JumpStrategy, XorwowEngine, XorwowState};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn xorwow_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::xorwow::PyXorwow>()?;
    Ok(())
}
