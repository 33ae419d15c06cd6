//! Greedy bin-boundary construction.
//!
//! Given the sorted distinct values of a feature and their counts, the greedy
//! finder places right-open bin edges so that
//!
//! - at most `max_bin` bins are produced,
//! - sparse neighbouring values are merged until a bin holds enough samples,
//! - a value whose count alone reaches the mean bin size gets a bin of its own.
//!
//! The returned bounds are strictly increasing and always end with
//! `f64::INFINITY`. A value `v` falls into the first bin `j` with
//! `v < bounds[j]`.

use crate::core::constants::{LOOK_AHEAD_CLOSE_RATIO, LOOK_AHEAD_MIN_COUNT};
use crate::core::error::{BinningError, Result};
use crate::core::types::SampleCount;
use crate::dataset::binning::stats::validate_statistics;

/// Boundary between two adjacent bins: the last value of the closed bin and
/// the first value of the bin that follows it.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BinEdge {
    upper: f64,
    next_lower: f64,
}

impl BinEdge {
    fn midpoint(&self) -> f64 {
        (self.upper + self.next_lower) / 2.0
    }
}

/// Find bin upper bounds using the greedy algorithm.
///
/// `distinct_values` must be strictly increasing and `counts` must sum to
/// `total_cnt`; both must hold `num_distinct_values` entries. A `max_bin` of
/// zero is a configuration error and is rejected.
pub fn greedy_find_bin(
    distinct_values: &[f64],
    counts: &[SampleCount],
    num_distinct_values: usize,
    max_bin: usize,
    total_cnt: SampleCount,
    min_data_in_bin: usize,
) -> Result<Vec<f64>> {
    if max_bin == 0 {
        return Err(BinningError::invalid_parameter(
            "max_bin",
            max_bin.to_string(),
            "must be greater than 0",
        ));
    }
    validate_statistics(distinct_values, counts, num_distinct_values, total_cnt)?;

    if num_distinct_values == 0 {
        return Ok(vec![f64::INFINITY]);
    }

    let bin_upper_bound = if num_distinct_values <= max_bin {
        log::trace!(
            "{} distinct values fit in {} bins, merging by min_data_in_bin={}",
            num_distinct_values,
            max_bin,
            min_data_in_bin
        );
        find_bin_few_values(distinct_values, counts, min_data_in_bin)
    } else {
        find_bin_many_values(distinct_values, counts, max_bin, total_cnt, min_data_in_bin)
    };

    Ok(bin_upper_bound)
}

/// Every distinct value may get its own bin; sparse runs are merged forward.
fn find_bin_few_values(
    distinct_values: &[f64],
    counts: &[SampleCount],
    min_data_in_bin: usize,
) -> Vec<f64> {
    let mut bin_upper_bound = Vec::new();
    let mut cur_cnt_inbin = 0;

    // the last value always lands in the unbounded tail bin
    for (pair, &count) in distinct_values.windows(2).zip(counts) {
        cur_cnt_inbin += count;
        if cur_cnt_inbin >= min_data_in_bin {
            push_bound(&mut bin_upper_bound, (pair[0] + pair[1]) / 2.0);
            cur_cnt_inbin = 0;
        }
    }

    bin_upper_bound.push(f64::INFINITY);
    bin_upper_bound
}

/// More distinct values than bins: group values, isolating big-count ones.
fn find_bin_many_values(
    distinct_values: &[f64],
    counts: &[SampleCount],
    max_bin: usize,
    total_cnt: SampleCount,
    min_data_in_bin: usize,
) -> Vec<f64> {
    let num_distinct_values = distinct_values.len();

    let mut max_bin = max_bin;
    if min_data_in_bin > 0 {
        max_bin = max_bin.min(total_cnt / min_data_in_bin).max(1);
    }

    let mean_bin_size = total_cnt as f64 / max_bin as f64;
    let is_big_count_value: Vec<bool> = counts
        .iter()
        .map(|&count| count as f64 >= mean_bin_size)
        .collect();

    let mut rest_bin_cnt = max_bin;
    let mut rest_sample_cnt = total_cnt;
    for (&count, &is_big) in counts.iter().zip(&is_big_count_value) {
        if is_big {
            rest_bin_cnt = rest_bin_cnt.saturating_sub(1);
            rest_sample_cnt -= count;
        }
    }
    let mut mean_bin_size = remaining_mean_bin_size(rest_sample_cnt, rest_bin_cnt);

    log::trace!(
        "{} distinct values into at most {} bins: {} big-count values, mean bin size {:.3}",
        num_distinct_values,
        max_bin,
        max_bin - rest_bin_cnt,
        mean_bin_size
    );

    let max_edges = max_bin - 1;
    let mut edges: Vec<BinEdge> = Vec::with_capacity(max_edges);
    let mut cur_cnt_inbin = 0;

    if max_edges > 0 {
        for i in 0..num_distinct_values - 1 {
            if !is_big_count_value[i] {
                rest_sample_cnt -= counts[i];
            }
            cur_cnt_inbin += counts[i];

            let cur = cur_cnt_inbin as f64;
            let close_before_big = is_big_count_value[i + 1]
                && cur >= LOOK_AHEAD_MIN_COUNT.max(mean_bin_size * LOOK_AHEAD_CLOSE_RATIO);

            if is_big_count_value[i] || cur >= mean_bin_size || close_before_big {
                edges.push(BinEdge {
                    upper: distinct_values[i],
                    next_lower: distinct_values[i + 1],
                });
                if edges.len() >= max_edges {
                    break;
                }
                cur_cnt_inbin = 0;
                if !is_big_count_value[i] {
                    rest_bin_cnt = rest_bin_cnt.saturating_sub(1);
                    mean_bin_size = remaining_mean_bin_size(rest_sample_cnt, rest_bin_cnt);
                }
            }
        }
    }

    let mut bin_upper_bound = Vec::with_capacity(edges.len() + 1);
    for edge in &edges {
        push_bound(&mut bin_upper_bound, edge.midpoint());
    }
    bin_upper_bound.push(f64::INFINITY);
    bin_upper_bound
}

/// Mean size of the remaining non-big bins; infinite once the bin budget is
/// spent, so no further size-driven split happens.
fn remaining_mean_bin_size(rest_sample_cnt: SampleCount, rest_bin_cnt: usize) -> f64 {
    if rest_bin_cnt == 0 {
        log::debug!("bin budget exhausted, remaining values stay grouped");
        return f64::INFINITY;
    }
    rest_sample_cnt as f64 / rest_bin_cnt as f64
}

/// Adjacent midpoints can round to the same float; keep bounds strictly increasing.
fn push_bound(bin_upper_bound: &mut Vec<f64>, bound: f64) {
    match bin_upper_bound.last() {
        Some(&last) if bound <= last => {}
        _ => bin_upper_bound.push(bound),
    }
}
