//! Generates the XORWOW jump tables
//!
//! Writes `xorwow_precomputed.rs` into `OUT_DIR` with two statics:
//!
//! - `XORWOW_JUMP_MATRICES[k]` = `A^(4^k)`
//! - `XORWOW_SEQUENCE_JUMP_MATRICES[k]` = `A^(4^k * 2^67)`
//!
//! The tables are a compatibility surface: every output sequence depends on
//! them, so they are derived from the same recurrence the generator runs.

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

#[allow(dead_code)]
#[path = "src/rng/gf2.rs"]
mod gf2;

use gf2::{
    pow4, square, transition_matrix, JumpMatrix, XORWOW_JUMP_DEPTH, XORWOW_SEQUENCE_JUMP_LOG2,
    XORWOW_SIZE,
};

fn powers_of_four(first: JumpMatrix) -> Vec<JumpMatrix> {
    let mut table = Vec::with_capacity(XORWOW_JUMP_DEPTH);
    table.push(first);
    while table.len() < XORWOW_JUMP_DEPTH {
        let next = pow4(&table[table.len() - 1]);
        table.push(next);
    }
    table
}

fn write_table(out: &mut String, name: &str, table: &[JumpMatrix]) {
    writeln!(
        out,
        "pub static {}: [[u32; {}]; {}] = [",
        name,
        XORWOW_SIZE,
        table.len()
    )
    .unwrap();
    for matrix in table {
        out.push_str("    [");
        for (i, word) in matrix.iter().enumerate() {
            if i % 10 == 0 {
                out.push_str("\n        ");
            }
            write!(out, "0x{:08x}, ", word).unwrap();
        }
        out.push_str("\n    ],\n");
    }
    out.push_str("];\n\n");
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/rng/gf2.rs");

    let a = transition_matrix();
    let steps = powers_of_four(a);

    let mut subsequence = a;
    for _ in 0..XORWOW_SEQUENCE_JUMP_LOG2 {
        subsequence = square(&subsequence);
    }
    let subsequences = powers_of_four(subsequence);

    let mut out = String::new();
    out.push_str("// @generated by build.rs from the XORWOW transition matrix\n\n");
    write_table(&mut out, "XORWOW_JUMP_MATRICES", &steps);
    write_table(&mut out, "XORWOW_SEQUENCE_JUMP_MATRICES", &subsequences);

    let dest = PathBuf::from(env::var("OUT_DIR").unwrap()).join("xorwow_precomputed.rs");
    fs::write(dest, out).unwrap();
}
