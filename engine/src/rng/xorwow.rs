//! XORWOW generator (Marsaglia, "Xorshift RNGs", 2003)
//!
//! A 160-bit xorshift register combined with a 32-bit Weyl sequence. The
//! period of the combined output is `2^192 - 2^32`.
//!
//! # Streams
//!
//! The output sequence is split into subsequences of 2^67 outputs. Parallel
//! workers share one seed and each takes a distinct subsequence index; the
//! jump tables make constructing any of them cost `O(log n)` matrix
//! operations instead of `n` steps.
//!
//! # Determinism
//!
//! Seeding constants and the jump tables are a compatibility contract:
//! `XorwowEngine::new(seed, subsequence, offset)` yields the same stream on
//! every run and every platform.

use rand_core::{impls, Error as RandError, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::gaussian::GaussianCache;
use super::gf2::{xorshift_step, StateVector};
use super::jump::{jump, step_table, subsequence_table, JumpStrategy};

/// Seed used by [`XorwowEngine::default`]
pub const XORWOW_DEFAULT_SEED: u64 = 0;

/// Weyl sequence increment per output
pub const WEYL_INCREMENT: u32 = 362437;

const INITIAL_X: StateVector = [123456789, 362436069, 521288629, 88675123, 5783321];
const INITIAL_D: u32 = 6615241;

// Seed expansion constants shared with cuRAND and rocRAND.
const SEED_XOR_LO: u32 = 0xaad26b49;
const SEED_XOR_HI: u32 = 0xf7dcefdd;
const SEED_MUL_LO: u32 = 1099087573;
const SEED_MUL_HI: u32 = 2591861531;

/// Complete XORWOW state
///
/// This is everything that has to be persisted to resume a stream:
/// the register, the Weyl accumulator and the Gaussian cache.
/// Deserializing an all-zero register fails.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "XorwowStateFields")]
pub struct XorwowState {
    /// xorshift register (160 bits)
    x: StateVector,

    /// Weyl sequence value
    d: u32,

    /// Second value of a paired Gaussian transform, if any
    gaussian: GaussianCache,
}

/// Rejected state: the register is the all-zero fixed point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Shift register is all zeros")]
pub struct DegenerateStateError;

#[derive(Deserialize)]
struct XorwowStateFields {
    x: StateVector,
    d: u32,
    gaussian: GaussianCache,
}

impl TryFrom<XorwowStateFields> for XorwowState {
    type Error = DegenerateStateError;

    fn try_from(fields: XorwowStateFields) -> Result<Self, Self::Error> {
        let state = Self::from_parts(fields.x, fields.d, fields.gaussian);
        if state.is_degenerate() {
            return Err(DegenerateStateError);
        }
        Ok(state)
    }
}

impl XorwowState {
    /// Expand `seed` into a state at the start of subsequence 0
    ///
    /// No jumps are applied.
    pub fn seeded(seed: u64) -> Self {
        let mut x = INITIAL_X;
        let mut d = INITIAL_D;

        let s0 = (seed as u32) ^ SEED_XOR_LO;
        let s1 = ((seed >> 32) as u32) ^ SEED_XOR_HI;
        let t0 = SEED_MUL_LO.wrapping_mul(s0);
        let t1 = SEED_MUL_HI.wrapping_mul(s1);

        x[0] = x[0].wrapping_add(t0);
        x[1] ^= t0;
        x[2] = x[2].wrapping_add(t1);
        x[3] ^= t1;
        x[4] = x[4].wrapping_add(t0);
        d = d.wrapping_add(t1.wrapping_add(t0));

        Self {
            x,
            d,
            gaussian: GaussianCache::new(),
        }
    }

    /// Rebuild a state from persisted fields
    pub fn from_parts(x: StateVector, d: u32, gaussian: GaussianCache) -> Self {
        Self { x, d, gaussian }
    }

    /// xorshift register words
    pub fn x(&self) -> &StateVector {
        &self.x
    }

    /// Weyl sequence value
    pub fn d(&self) -> u32 {
        self.d
    }

    /// Gaussian cache carried with the register
    pub fn gaussian_cache(&self) -> &GaussianCache {
        &self.gaussian
    }

    /// True when the register is all zeros, the fixed point of the recurrence
    pub fn is_degenerate(&self) -> bool {
        self.x.iter().all(|&w| w == 0)
    }
}

/// XORWOW engine: state plus the large-distance jump strategy
///
/// # Example
/// ```
/// use xorwow_core_rs::XorwowEngine;
///
/// // Worker 7 of a parallel job, all workers sharing seed 1234
/// let mut rng = XorwowEngine::new(1234, 7, 0);
/// let value = rng.next();
///
/// let mut replay = XorwowEngine::new(1234, 7, 0);
/// assert_eq!(replay.next(), value);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XorwowEngine {
    state: XorwowState,

    #[serde(default)]
    strategy: JumpStrategy,
}

impl XorwowEngine {
    /// Seed the engine, move to `subsequence` (each 2^67 outputs long),
    /// then skip `offset` outputs
    pub fn new(seed: u64, subsequence: u64, offset: u64) -> Self {
        Self::with_strategy(seed, subsequence, offset, JumpStrategy::default())
    }

    /// Same as [`XorwowEngine::new`] with an explicit jump strategy
    pub fn with_strategy(seed: u64, subsequence: u64, offset: u64, strategy: JumpStrategy) -> Self {
        let mut engine = Self {
            state: XorwowState::seeded(seed),
            strategy,
        };
        engine.discard_subsequence(subsequence);
        engine.discard(offset);
        engine.state.gaussian.clear();
        engine
    }

    /// Resume from a previously captured state
    pub fn from_state(state: XorwowState) -> Self {
        Self {
            state,
            strategy: JumpStrategy::default(),
        }
    }

    /// Current state, for persistence or comparison
    pub fn state(&self) -> &XorwowState {
        &self.state
    }

    /// Strategy used for jumps past the table depth
    pub fn strategy(&self) -> JumpStrategy {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: JumpStrategy) {
        self.strategy = strategy;
    }

    /// Generate the next 32-bit output
    #[inline]
    pub fn next(&mut self) -> u32 {
        let x4 = xorshift_step(&mut self.state.x);
        self.state.d = self.state.d.wrapping_add(WEYL_INCREMENT);
        self.state.d.wrapping_add(x4)
    }

    /// Skip `offset` outputs
    pub fn discard(&mut self, offset: u64) {
        jump(&mut self.state.x, offset, step_table(), self.strategy);
        self.state.d = self
            .state
            .d
            .wrapping_add((offset as u32).wrapping_mul(WEYL_INCREMENT));
    }

    /// Skip `subsequence` subsequences of 2^67 outputs
    ///
    /// `d` is untouched: 2^67 increments wrap a 32-bit accumulator exactly.
    pub fn discard_subsequence(&mut self, subsequence: u64) {
        jump(&mut self.state.x, subsequence, subsequence_table(), self.strategy);
    }

    /// Equivalent to calling [`XorwowEngine::next`] `offset` times
    pub fn skip_ahead(&mut self, offset: u64) {
        self.discard(offset);
    }

    /// Equivalent to skipping `subsequence * 2^67` outputs
    pub fn skip_ahead_subsequence(&mut self, subsequence: u64) {
        self.discard_subsequence(subsequence);
    }

    /// Read-only view of the Gaussian cache
    pub fn gaussian_cache(&self) -> &GaussianCache {
        &self.state.gaussian
    }

    /// Mutable access for a distribution transform that parks paired values
    pub fn gaussian_cache_mut(&mut self) -> &mut GaussianCache {
        &mut self.state.gaussian
    }
}

impl Default for XorwowEngine {
    fn default() -> Self {
        Self::new(XORWOW_DEFAULT_SEED, 0, 0)
    }
}

impl RngCore for XorwowEngine {
    fn next_u32(&mut self) -> u32 {
        self.next()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RandError> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for XorwowEngine {
    type Seed = [u8; 8];

    /// Little-endian 64-bit seed, subsequence 0, offset 0
    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed), 0, 0)
    }

    fn seed_from_u64(seed: u64) -> Self {
        Self::new(seed, 0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_zero_expansion() {
        let state = XorwowState::seeded(0);
        assert_eq!(
            state.x(),
            &[0x58213ed2, 0x455f2458, 0xf8a42704, 0xdcd8f87c, 0x511db0d6]
        );
        assert_eq!(state.d(), 0x2abc4dd5);
    }

    #[test]
    fn test_seed_zero_first_outputs() {
        let mut rng = XorwowEngine::new(0, 0, 0);
        let outputs: Vec<u32> = (0..8).map(|_| rng.next()).collect();
        assert_eq!(
            outputs,
            vec![
                3179217846, 1883133293, 2220552389, 674260989, 306521119, 1986458431, 977720403,
                1414583917
            ]
        );
    }

    #[test]
    fn test_default_uses_default_seed() {
        let mut a = XorwowEngine::default();
        let mut b = XorwowEngine::new(XORWOW_DEFAULT_SEED, 0, 0);
        assert_eq!(a.next(), b.next());
    }

    #[test]
    fn test_seed_one_first_outputs() {
        let mut rng = XorwowEngine::new(1, 0, 0);
        let outputs: Vec<u32> = (0..4).map(|_| rng.next()).collect();
        assert_eq!(outputs, vec![2898200796, 3111669439, 2179589753, 379598403]);
    }

    #[test]
    fn test_seed_max_register() {
        let state = XorwowState::seeded(u64::MAX);
        assert_eq!(
            state.x(),
            &[1964219523, 2016254603, 2869142859, 2394454693, 1846546055]
        );
        assert!(!state.is_degenerate());
    }

    #[test]
    fn test_subsequence_one_first_outputs() {
        let mut rng = XorwowEngine::new(0, 1, 0);
        let outputs: Vec<u32> = (0..4).map(|_| rng.next()).collect();
        assert_eq!(outputs, vec![3955638199, 1977250130, 1432217238, 1599962988]);
    }

    #[test]
    fn test_offset_two_pow_32_first_outputs() {
        let mut rng = XorwowEngine::new(0, 0, 1 << 32);
        let outputs: Vec<u32> = (0..4).map(|_| rng.next()).collect();
        assert_eq!(outputs, vec![1218412385, 496706650, 1018329814, 1405919936]);
    }

    #[test]
    fn test_discard_advances_weyl_linearly() {
        let mut rng = XorwowEngine::new(99, 0, 0);
        let before = rng.state().d();
        rng.discard(1_000_003);
        assert_eq!(
            rng.state().d(),
            before.wrapping_add(1_000_003u32.wrapping_mul(WEYL_INCREMENT))
        );
    }

    #[test]
    fn test_discard_subsequence_keeps_weyl() {
        let mut rng = XorwowEngine::new(99, 0, 0);
        let before = rng.state().d();
        rng.discard_subsequence(12345);
        assert_eq!(rng.state().d(), before);
    }

    #[test]
    fn test_skip_does_not_touch_gaussian_cache() {
        let mut rng = XorwowEngine::new(5, 0, 0);
        rng.gaussian_cache_mut().store_f64(0.75);

        rng.skip_ahead(100);
        rng.skip_ahead_subsequence(3);

        assert_eq!(rng.gaussian_cache().peek_f64(), Some(0.75));
    }

    #[test]
    fn test_construction_leaves_cache_empty() {
        let rng = XorwowEngine::new(5, 2, 9);
        assert!(rng.gaussian_cache().is_empty());
    }

    #[test]
    fn test_next_u64_is_low_word_first() {
        let mut a = XorwowEngine::new(77, 0, 0);
        let mut b = XorwowEngine::new(77, 0, 0);

        let lo = u64::from(b.next());
        let hi = u64::from(b.next());
        assert_eq!(a.next_u64(), (hi << 32) | lo);
    }

    #[test]
    fn test_fill_bytes_uses_little_endian_words() {
        let mut a = XorwowEngine::new(3, 0, 0);
        let mut b = XorwowEngine::new(3, 0, 0);

        let mut bytes = [0u8; 8];
        a.fill_bytes(&mut bytes);

        let mut expected = [0u8; 8];
        expected[..4].copy_from_slice(&b.next().to_le_bytes());
        expected[4..].copy_from_slice(&b.next().to_le_bytes());
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_seedable_rng_matches_new() {
        let mut from_seed = XorwowEngine::from_seed(42u64.to_le_bytes());
        let mut from_u64 = XorwowEngine::seed_from_u64(42);
        let mut direct = XorwowEngine::new(42, 0, 0);

        let expected = direct.next();
        assert_eq!(from_seed.next(), expected);
        assert_eq!(from_u64.next(), expected);
    }

    const ZERO_REGISTER_STATE: &str = r#"{"x":[0,0,0,0,0],"d":5,"gaussian":{"float_ready":false,"double_ready":false,"float_value":0.0,"double_value":0.0}}"#;

    #[test]
    fn test_zero_register_state_fails_to_deserialize() {
        let result: Result<XorwowState, _> = serde_json::from_str(ZERO_REGISTER_STATE);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("all zeros"), "unexpected error: {}", err);
    }

    #[test]
    fn test_zero_register_engine_fails_to_deserialize() {
        let json = format!(r#"{{"state":{}}}"#, ZERO_REGISTER_STATE);
        let result: Result<XorwowEngine, _> = serde_json::from_str(&json);
        assert!(result.is_err());
    }

    #[test]
    fn test_engine_serde_round_trip() {
        let mut rng = XorwowEngine::with_strategy(12, 3, 4, JumpStrategy::Linear);
        rng.gaussian_cache_mut().store_f32(0.5);

        let json = serde_json::to_string(&rng).unwrap();
        let restored: XorwowEngine = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, rng);
    }
}
