//! Jump-ahead for the XORWOW shift register
//!
//! `x(n + v) = A^v . x(n)`. Powers `A^(4^k)` are precomputed at build time
//! (see `build.rs`), so a 64-bit distance is applied one base-4 digit at a
//! time with at most three matrix-vector products per digit.
//!
//! Distances wider than the table fall back to squaring the last entry, or
//! to repeated application of it when [`JumpStrategy::Linear`] is selected.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::gf2::{mul_mat_vec_inplace, square, JumpMatrix, StateVector, XORWOW_JUMP_LOG2};

include!(concat!(env!("OUT_DIR"), "/xorwow_precomputed.rs"));

/// Precomputed `A^(4^k)`, used to skip individual outputs
pub fn step_table() -> &'static [JumpMatrix] {
    &XORWOW_JUMP_MATRICES
}

/// Precomputed `A^(4^k * 2^67)`, used to skip whole subsequences
pub fn subsequence_table() -> &'static [JumpMatrix] {
    &XORWOW_SEQUENCE_JUMP_MATRICES
}

/// How to cover the part of a distance beyond the precomputed table
///
/// Both strategies produce identical states. `Linear` exists for targets
/// where the squaring loop's code size is a problem; it costs one
/// matrix-vector product per unit of the last table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpStrategy {
    /// Exponentiation by squaring (logarithmic in the residual distance)
    #[default]
    Squaring,
    /// Repeated application of the last table entry
    Linear,
}

/// Advance `x` by `distance` steps of the unit that `table[0]` represents
///
/// Entry `k` of `table` must equal `table[0]^(4^k)`. All entries but the
/// last consume a base-4 digit of `distance`; the last consumes one bit.
/// An empty table leaves `x` unchanged.
pub fn jump(x: &mut StateVector, distance: u64, table: &[JumpMatrix], strategy: JumpStrategy) {
    let Some(last) = table.last() else {
        return;
    };

    let mut v = distance;
    let mut mi = 0;
    while v > 0 && mi < table.len() {
        let l = if mi < table.len() - 1 { XORWOW_JUMP_LOG2 } else { 1 };
        let digit = v & ((1 << l) - 1);
        trace!("jump digit {} at table entry {}", digit, mi);
        for _ in 0..digit {
            mul_mat_vec_inplace(&table[mi], x);
        }
        mi += 1;
        v >>= l;
    }

    if v == 0 {
        return;
    }

    debug!(
        "jump distance {} exceeds {} table entries, residual {} via {:?}",
        distance,
        table.len(),
        v,
        strategy
    );

    match strategy {
        JumpStrategy::Squaring => {
            let mut power = *last;
            loop {
                power = square(&power);
                if v & 1 != 0 {
                    mul_mat_vec_inplace(&power, x);
                }
                v >>= 1;
                if v == 0 {
                    break;
                }
            }
        }
        JumpStrategy::Linear => {
            // Residual bits are in units of twice the last entry.
            for _ in 0..v << 1 {
                mul_mat_vec_inplace(last, x);
            }
        }
    }
}
