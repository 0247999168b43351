//! Checkpoint - Save/Load Generator State
//!
//! Two formats:
//!
//! - **Binary**: the fixed 48-byte little-endian layout
//!   (`x[0..5]`, `d`, float flag, double flag, `f32`, 4 zero bytes, `f64`).
//!   This matches the in-memory layout used by GPU kernels.
//! - **JSON**: a [`StateSnapshot`] carrying the same fields plus a SHA256
//!   digest of the binary layout, checked on restore.
//!
//! # Critical Invariants
//!
//! - **Bit-exact**: restoring a checkpoint resumes the identical stream,
//!   including the Gaussian cache
//! - **Non-degenerate**: an all-zero register is never accepted

use log::debug;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::rng::{GaussianCache, XorwowEngine, XorwowState};

/// Size of the binary state layout in bytes
pub const STATE_BYTES: usize = 48;

/// Current JSON snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors raised while restoring a checkpoint
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("State must be {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Snapshot digest mismatch: expected {expected}, computed {computed}")]
    DigestMismatch { expected: String, computed: String },

    #[error("Unsupported snapshot version {0}")]
    UnsupportedVersion(u32),

    #[error("Shift register is all zeros")]
    DegenerateState,
}

// ============================================================================
// Binary Layout
// ============================================================================

/// Encode a state into the fixed binary layout
pub fn state_to_bytes(state: &XorwowState) -> [u8; STATE_BYTES] {
    let mut out = [0u8; STATE_BYTES];
    let (float_ready, double_ready, float_value, double_value) = state.gaussian_cache().parts();

    for (chunk, word) in out[..20].chunks_exact_mut(4).zip(state.x()) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    out[20..24].copy_from_slice(&state.d().to_le_bytes());
    out[24..28].copy_from_slice(&u32::from(float_ready).to_le_bytes());
    out[28..32].copy_from_slice(&u32::from(double_ready).to_le_bytes());
    out[32..36].copy_from_slice(&float_value.to_le_bytes());
    // 36..40 is alignment padding for the f64
    out[40..48].copy_from_slice(&double_value.to_le_bytes());
    out
}

fn word_at(bytes: &[u8], offset: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_le_bytes(buf)
}

/// Decode a state from the fixed binary layout
///
/// Nonzero flag words count as set. Padding bytes are ignored.
pub fn state_from_bytes(bytes: &[u8]) -> Result<XorwowState, CheckpointError> {
    if bytes.len() != STATE_BYTES {
        return Err(CheckpointError::InvalidLength {
            expected: STATE_BYTES,
            actual: bytes.len(),
        });
    }

    let mut x = [0u32; 5];
    for (i, word) in x.iter_mut().enumerate() {
        *word = word_at(bytes, i * 4);
    }
    let d = word_at(bytes, 20);

    let float_ready = word_at(bytes, 24) != 0;
    let double_ready = word_at(bytes, 28) != 0;
    let float_value = f32::from_bits(word_at(bytes, 32));
    let mut double_buf = [0u8; 8];
    double_buf.copy_from_slice(&bytes[40..48]);
    let double_value = f64::from_le_bytes(double_buf);

    let gaussian = GaussianCache::from_parts(float_ready, double_ready, float_value, double_value);
    let state = XorwowState::from_parts(x, d, gaussian);
    if state.is_degenerate() {
        return Err(CheckpointError::DegenerateState);
    }
    Ok(state)
}

/// SHA256 of the binary layout, lowercase hex
pub fn compute_state_digest(state: &XorwowState) -> String {
    let mut hasher = Sha256::new();
    hasher.update(state_to_bytes(state));
    format!("{:x}", hasher.finalize())
}

// ============================================================================
// JSON Snapshot
// ============================================================================

/// Serializable generator snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Snapshot format version
    pub version: u32,

    /// Shift register words
    pub x: [u32; 5],

    /// Weyl sequence value
    pub d: u32,

    /// Cached `f32` as raw bits, so non-finite values survive JSON
    pub gaussian_float_bits: Option<u32>,

    /// Cached `f64` as raw bits
    pub gaussian_double_bits: Option<u64>,

    /// SHA256 of the binary layout (for validation)
    pub digest: String,
}

impl From<&XorwowState> for StateSnapshot {
    fn from(state: &XorwowState) -> Self {
        let cache = state.gaussian_cache();
        StateSnapshot {
            version: SNAPSHOT_VERSION,
            x: *state.x(),
            d: state.d(),
            gaussian_float_bits: cache.peek_f32().map(f32::to_bits),
            gaussian_double_bits: cache.peek_f64().map(f64::to_bits),
            digest: compute_state_digest(state),
        }
    }
}

impl StateSnapshot {
    /// Rebuild the state and check it against the stored digest
    pub fn restore(&self) -> Result<XorwowState, CheckpointError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(CheckpointError::UnsupportedVersion(self.version));
        }

        let mut gaussian = GaussianCache::new();
        if let Some(bits) = self.gaussian_float_bits {
            gaussian.store_f32(f32::from_bits(bits));
        }
        if let Some(bits) = self.gaussian_double_bits {
            gaussian.store_f64(f64::from_bits(bits));
        }

        let state = XorwowState::from_parts(self.x, self.d, gaussian);
        if state.is_degenerate() {
            return Err(CheckpointError::DegenerateState);
        }

        let computed = compute_state_digest(&state);
        if computed != self.digest {
            return Err(CheckpointError::DigestMismatch {
                expected: self.digest.clone(),
                computed,
            });
        }

        Ok(state)
    }
}

/// Serialize an engine's state to a JSON snapshot
pub fn save_state(engine: &XorwowEngine) -> Result<String, CheckpointError> {
    let snapshot = StateSnapshot::from(engine.state());
    Ok(serde_json::to_string(&snapshot)?)
}

/// Restore an engine from a JSON snapshot produced by [`save_state`]
///
/// The restored engine uses the default jump strategy.
pub fn load_state(json: &str) -> Result<XorwowEngine, CheckpointError> {
    let snapshot: StateSnapshot = serde_json::from_str(json)?;
    let state = snapshot.restore()?;
    debug!("restored xorwow state with digest {}", snapshot.digest);
    Ok(XorwowEngine::from_state(state))
}
