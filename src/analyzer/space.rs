//! Outcome space enumeration
//!
//! Both spaces grow quickly: `faces^dice` ordered tuples and
//! `C(faces + dice - 1, dice)` sorted multisets. Five six-sided dice give
//! 7776 permutations and 252 combinations; twenty give ~3.6e15 and 53130.

use crate::face::Face;

/// Number of ordered outcome tuples, None on overflow
pub fn permutation_space_size(faces: usize, dice: usize) -> Option<usize> {
    faces.checked_pow(u32::try_from(dice).ok()?)
}

/// Number of sorted outcome multisets, None on overflow
pub fn combination_space_size(faces: usize, dice: usize) -> Option<usize> {
    if faces == 0 {
        return Some(usize::from(dice == 0));
    }
    // C(n, k) built up one factor at a time; every partial product is itself
    // a binomial coefficient so the division is exact.
    let n = faces.checked_add(dice)? - 1;
    let mut result: usize = 1;
    for i in 1..=dice {
        result = result.checked_mul(n - dice + i)? / i;
    }
    Some(result)
}

/// Every ordered tuple of `dice` faces, repetition allowed
pub fn permutations(faces: &[Face], dice: usize) -> Vec<Vec<Face>> {
    index_tuples(faces.len(), dice, false)
        .into_iter()
        .map(|idx| idx.into_iter().map(|i| faces[i].clone()).collect())
        .collect()
}

/// Every sorted multiset of `dice` faces
///
/// Tuples come out sorted by face order, matching a sorted played row.
pub fn combinations(faces: &[Face], dice: usize) -> Vec<Vec<Face>> {
    let mut sorted = faces.to_vec();
    sorted.sort();
    sorted.dedup();
    index_tuples(sorted.len(), dice, true)
        .into_iter()
        .map(|idx| idx.into_iter().map(|i| sorted[i].clone()).collect())
        .collect()
}

/// Odometer over `k` digits in base `n`
///
/// With `nondecreasing` set, digits to the right of the one just advanced
/// restart at its value instead of zero, which yields only sorted tuples.
fn index_tuples(n: usize, k: usize, nondecreasing: bool) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    if n == 0 && k > 0 {
        return out;
    }

    let mut idx = vec![0usize; k];
    loop {
        out.push(idx.clone());

        let mut pos = k;
        loop {
            if pos == 0 {
                return out;
            }
            pos -= 1;
            if idx[pos] + 1 < n {
                break;
            }
        }

        idx[pos] += 1;
        let restart = if nondecreasing { idx[pos] } else { 0 };
        for digit in idx.iter_mut().skip(pos + 1) {
            *digit = restart;
        }
    }
}
