//! Main-sequence filtering.
//!
//! A single greedy ascending pass: a ratio is kept when it is the first one
//! or strictly exceeds the last kept ratio by more than [`MAIN_SEQUENCE_MARGIN`].
//! This is not optimal subset selection and must not become one; downstream
//! scores and export codes are defined against exactly this pass.

use crate::carrier::expand::StateSample;

/// Relative step a ratio must exceed over the last kept ratio.
pub const MAIN_SEQUENCE_MARGIN: f64 = 1.02;

/// Greedy keep test shared by both passes.
fn is_distinct_step(last_kept: Option<f64>, ratio: f64) -> bool {
    match last_kept {
        None => true,
        Some(last) => ratio > last * MAIN_SEQUENCE_MARGIN,
    }
}

/// Reduce an ascending ratio list to its main sequence.
///
/// Input must already be sorted ascending; unsorted input is filtered as
/// given.
#[must_use]
pub fn main_sequence(sorted_ratios: &[f64]) -> Vec<f64> {
    let mut kept = Vec::with_capacity(sorted_ratios.len());
    let mut last: Option<f64> = None;
    for &ratio in sorted_ratios {
        if is_distinct_step(last, ratio) {
            kept.push(ratio);
            last = Some(ratio);
        }
    }
    kept
}

/// Split samples into `(main, left_out)`.
///
/// Samples are stably sorted by ratio first, so samples reaching the same
/// ratio keep their expansion order. Exact repeats of a kept ratio always
/// land in `left_out`.
#[must_use]
pub fn partition_main_sequence(samples: &[StateSample]) -> (Vec<StateSample>, Vec<StateSample>) {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.ratio.total_cmp(&b.ratio));

    let mut main = Vec::new();
    let mut left_out = Vec::new();
    let mut last: Option<f64> = None;
    for sample in sorted {
        if is_distinct_step(last, sample.ratio) {
            last = Some(sample.ratio);
            main.push(sample);
        } else {
            left_out.push(sample);
        }
    }
    (main, left_out)
}
