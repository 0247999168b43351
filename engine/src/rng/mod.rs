//! Deterministic parallel random number generation
//!
//! XORWOW with logarithmic jump-ahead. Every parallel worker builds its own
//! [`XorwowEngine`] from a shared seed and a distinct subsequence index; the
//! jump tables are read-only statics shared by all of them.

pub mod gaussian;
pub mod gf2;
pub mod jump;
mod xorwow;

pub use gaussian::GaussianCache;
pub use jump::JumpStrategy;
pub use xorwow::{
    DegenerateStateError, XorwowEngine, XorwowState, WEYL_INCREMENT, XORWOW_DEFAULT_SEED,
};
