//! Linear algebra over GF(2) for the XORWOW shift register
//!
//! The xorshift half of XORWOW is linear over GF(2): every step is a fixed
//! 160 x 160 bit matrix `A` applied to the 160-bit register. Skipping `n`
//! steps is the same as applying `A^n`, so jump-ahead reduces to matrix
//! products here.
//!
//! # Layout
//!
//! A [`JumpMatrix`] is stored as 160 rows of [`XORWOW_N`] words. Row
//! `32 * i + j` is the image of bit `j` of word `i`. Multiplying a vector
//! therefore XORs together the rows selected by its set bits.
//!
//! This file is also compiled into `build.rs` to generate the jump tables,
//! so it must not depend on anything else in the crate.

/// Number of 32-bit words in the xorshift register
pub const XORWOW_N: usize = 5;

/// Bits per register word
pub const XORWOW_M: usize = 32;

/// Number of `u32` words in one jump matrix
pub const XORWOW_SIZE: usize = XORWOW_M * XORWOW_N * XORWOW_N;

/// Number of matrices in each precomputed jump table
pub const XORWOW_JUMP_DEPTH: usize = 32;

/// log2 of the ratio between consecutive table entries (entries are powers of 4)
pub const XORWOW_JUMP_LOG2: u32 = 2;

/// log2 of the subsequence length: one subsequence is 2^67 outputs
pub const XORWOW_SEQUENCE_JUMP_LOG2: u32 = 67;

/// 160-bit register as five words, word 0 holding bits 0..32
pub type StateVector = [u32; XORWOW_N];

/// Bit matrix representing "advance the register by V steps" for one V
pub type JumpMatrix = [u32; XORWOW_SIZE];

/// One step of the xorshift recurrence
///
/// Shifts the register down one word and returns the new top word.
/// This is the only place the recurrence is written down: the generator
/// calls it on every output and the table generator uses it to derive `A`.
#[inline(always)]
pub fn xorshift_step(x: &mut StateVector) -> u32 {
    let t = x[0] ^ (x[0] >> 2);
    x[0] = x[1];
    x[1] = x[2];
    x[2] = x[3];
    x[3] = x[4];
    x[4] = (x[4] ^ (x[4] << 4)) ^ (t ^ (t << 1));
    x[4]
}

/// Row of `matrix` for register bit `bit` (0..160)
#[inline]
fn row(matrix: &JumpMatrix, bit: usize) -> &[u32] {
    let start = bit * XORWOW_N;
    &matrix[start..start + XORWOW_N]
}

/// Compute `v <- m . v`
pub fn mul_mat_vec_inplace(m: &JumpMatrix, v: &mut [u32]) {
    debug_assert_eq!(v.len(), XORWOW_N);

    let mut r = [0u32; XORWOW_N];
    for (i, &word) in v.iter().enumerate() {
        for j in 0..XORWOW_M {
            if word & (1 << j) != 0 {
                for (acc, bits) in r.iter_mut().zip(row(m, i * XORWOW_M + j)) {
                    *acc ^= bits;
                }
            }
        }
    }
    v.copy_from_slice(&r);
}

/// Compute `a <- b . a`
///
/// Each row of `a` is the image of one basis vector, so mapping every row
/// through `b` yields the composition "apply `a`, then `b`".
pub fn mul_mat_mat_inplace(a: &mut JumpMatrix, b: &JumpMatrix) {
    for rows in a.chunks_exact_mut(XORWOW_N) {
        mul_mat_vec_inplace(b, rows);
    }
}

/// Return `m . m`
pub fn square(m: &JumpMatrix) -> JumpMatrix {
    let mut out = *m;
    mul_mat_mat_inplace(&mut out, m);
    out
}

/// Return `m^4`, the step between consecutive table entries
pub fn pow4(m: &JumpMatrix) -> JumpMatrix {
    square(&square(m))
}

/// Identity matrix (zero steps)
pub fn identity() -> JumpMatrix {
    let mut m = [0u32; XORWOW_SIZE];
    for bit in 0..XORWOW_M * XORWOW_N {
        m[bit * XORWOW_N + bit / XORWOW_M] = 1 << (bit % XORWOW_M);
    }
    m
}

/// The single-step transition matrix `A`
///
/// Built by pushing every basis vector through [`xorshift_step`].
pub fn transition_matrix() -> JumpMatrix {
    let mut m = [0u32; XORWOW_SIZE];
    for (bit, rows) in m.chunks_exact_mut(XORWOW_N).enumerate() {
        let mut basis = [0u32; XORWOW_N];
        basis[bit / XORWOW_M] = 1 << (bit % XORWOW_M);
        xorshift_step(&mut basis);
        rows.copy_from_slice(&basis);
    }
    m
}
