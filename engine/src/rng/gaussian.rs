//! Cached second value of a paired Gaussian transform
//!
//! Box-Muller turns two uniforms into two normals. Callers usually want
//! one at a time, so the second is parked here until the next request.
//! The cache belongs to the generator state; distribution code reaches it
//! through [`crate::rng::XorwowEngine::gaussian_cache_mut`].

use serde::{Deserialize, Serialize};

/// One `f32` and one `f64` slot, each with its own validity flag
///
/// Constructed empty. Skip and step operations on the generator never
/// read or write it. An empty slot always holds zero, so equal caches
/// persist to equal bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "GaussianCacheFields")]
pub struct GaussianCache {
    float_ready: bool,
    double_ready: bool,
    float_value: f32,
    double_value: f64,
}

/// Wire form of [`GaussianCache`]; normalized through `from_parts` on load
#[derive(Deserialize)]
struct GaussianCacheFields {
    float_ready: bool,
    double_ready: bool,
    float_value: f32,
    double_value: f64,
}

impl From<GaussianCacheFields> for GaussianCache {
    fn from(fields: GaussianCacheFields) -> Self {
        Self::from_parts(
            fields.float_ready,
            fields.double_ready,
            fields.float_value,
            fields.double_value,
        )
    }
}

impl GaussianCache {
    /// Empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cache from its persisted fields
    pub(crate) fn from_parts(
        float_ready: bool,
        double_ready: bool,
        float_value: f32,
        double_value: f64,
    ) -> Self {
        Self {
            float_ready,
            double_ready,
            float_value: if float_ready { float_value } else { 0.0 },
            double_value: if double_ready { double_value } else { 0.0 },
        }
    }

    /// Park a single-precision value for the next request
    pub fn store_f32(&mut self, value: f32) {
        self.float_value = value;
        self.float_ready = true;
    }

    /// Park a double-precision value for the next request
    pub fn store_f64(&mut self, value: f64) {
        self.double_value = value;
        self.double_ready = true;
    }

    /// Return the parked `f32` and mark the slot empty
    pub fn take_f32(&mut self) -> Option<f32> {
        let value = self.peek_f32();
        self.float_ready = false;
        self.float_value = 0.0;
        value
    }

    /// Return the parked `f64` and mark the slot empty
    pub fn take_f64(&mut self) -> Option<f64> {
        let value = self.peek_f64();
        self.double_ready = false;
        self.double_value = 0.0;
        value
    }

    /// Parked `f32`, left in place
    pub fn peek_f32(&self) -> Option<f32> {
        self.float_ready.then_some(self.float_value)
    }

    /// Parked `f64`, left in place
    pub fn peek_f64(&self) -> Option<f64> {
        self.double_ready.then_some(self.double_value)
    }

    /// Mark both slots empty
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when neither slot holds a value
    pub fn is_empty(&self) -> bool {
        !self.float_ready && !self.double_ready
    }

    /// Raw fields in persisted order: flags, then values
    pub(crate) fn parts(&self) -> (bool, bool, f32, f64) {
        (
            self.float_ready,
            self.double_ready,
            self.float_value,
            self.double_value,
        )
    }
}
