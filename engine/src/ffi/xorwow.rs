//! PyO3 wrapper for XorwowEngine
//!
//! This module provides the Python interface to the Rust generator.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::checkpoint::{load_state, save_state};
use crate::rng::XorwowEngine;

/// Python wrapper for Rust XorwowEngine
///
/// # Example (from Python)
///
/// ```python
/// from xorwow_core_rs import Xorwow
///
/// rng = Xorwow(1234, subsequence=worker_id)
/// values = rng.next_batch(1000)
/// saved = rng.save_state()
/// ```
#[pyclass(name = "Xorwow")]
pub struct PyXorwow {
    inner: XorwowEngine,
}

#[pymethods]
impl PyXorwow {
    #[new]
    #[pyo3(signature = (seed, subsequence = 0, offset = 0))]
    fn new(seed: u64, subsequence: u64, offset: u64) -> Self {
        PyXorwow {
            inner: XorwowEngine::new(seed, subsequence, offset),
        }
    }

    /// Generate the next 32-bit output
    fn next(&mut self) -> u32 {
        self.inner.next()
    }

    /// Generate `count` outputs
    fn next_batch(&mut self, count: usize) -> Vec<u32> {
        (0..count).map(|_| self.inner.next()).collect()
    }

    /// Skip `offset` outputs
    fn skip_ahead(&mut self, offset: u64) {
        self.inner.skip_ahead(offset);
    }

    /// Skip `subsequence` subsequences of 2^67 outputs
    fn skip_ahead_subsequence(&mut self, subsequence: u64) {
        self.inner.skip_ahead_subsequence(subsequence);
    }

    /// Serialize the state to a JSON checkpoint
    fn save_state(&self) -> PyResult<String> {
        save_state(&self.inner).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Restore a generator from a JSON checkpoint
    #[staticmethod]
    fn load_state(json: &str) -> PyResult<Self> {
        let inner = load_state(json).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(PyXorwow { inner })
    }
}
