//! Walk-through of 4-lane SIMD arithmetic.
//!
//! Run with `RUST_LOG=debug` (or `trace`) to see what the library does.

use std::process::ExitCode;

use lanewise::simd::{self, SimdVec, F32x4};
use lanewise::{AlignedVec, LanewiseError, SimdAdd, SimdBatchDot, Vector4, VectorBatch};

const ADD_LEN: usize = 8;
const BATCH_LEN: usize = 64;

fn print_floats(values: &[f32]) {
    for value in values {
        println!("{value:.6}");
    }
    println!();
}

/// `foo[i] = i`, `bar[i] = 0.1 * i`, added one lane group at a time.
fn element_wise_add() -> Result<AlignedVec, LanewiseError> {
    let foo: Vec<f32> = (0..ADD_LEN).map(|i| i as f32).collect();
    let bar: Vec<f32> = (0..ADD_LEN).map(|i| i as f32 * 0.1).collect();

    for group in foo.chunks(simd::LANE_COUNT) {
        print!("{:.6} ", F32x4::from_slice(group).to_array()[0]);
    }
    println!("\n");

    foo.as_slice().simd_add(bar.as_slice())
}

/// The naive way to use SIMD for one dot product on AoS data: one multiply,
/// then the lanes have to come back out and be summed by hand. Three
/// operations for a single result, and three of the four lanes of work are
/// thrown away by the horizontal sum.
fn single_aos_dot() -> f32 {
    let vectors = [1.0f32, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0];

    let a = F32x4::from_slice(&vectors[..4]);
    let b = F32x4::from_slice(&vectors[4..]);
    let lanes = (a * b).to_array();

    (lanes[0] + lanes[1]) + (lanes[2] + lanes[3])
}

/// Entry 0 is (1, 1, 1, 1), entries 1..64 are all 0.1, and entry 0 is dotted
/// against the whole batch: 4 multiplies and 3 adds per 4 dot products.
fn batch_dot() -> Result<AlignedVec, LanewiseError> {
    let mut vectors = vec![Vector4::splat(0.1); BATCH_LEN];
    vectors[0] = Vector4::splat(1.0);

    let batch = VectorBatch::from_vectors(&vectors)?;
    let reference = vectors[0];

    batch.simd_dot(reference)
}

fn run() -> Result<(), LanewiseError> {
    log::info!("lane backend: {}", simd::backend());

    let sum = element_wise_add()?;
    print_floats(&sum);

    println!("{:.6} \n", single_aos_dot());

    let dots = batch_dot()?;
    print_floats(&dots[..8]);

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
