//! Generalized bisection
//!
//! Locates the contiguous region of indices where a three-way comparator
//! reports [`Ordering::Equal`], assuming the comparator is monotone over the
//! searched range: every `Less` comes before every `Equal`, which comes before
//! every `Greater`. Ties are fine; the region may hold any number of indices,
//! including none.
//!
//! The comparator may fail. The first error aborts the search and is returned
//! as is.

use std::cmp::Ordering;
use std::ops::Range;

/// Find the `Equal` region of `cmp` within `[lo, hi)`.
///
/// Returns `None` when no index compares `Equal`. Uses two lower-bound
/// searches, so `cmp` is called O(log(hi - lo)) times.
pub fn zero_range<E, F>(lo: usize, hi: usize, mut cmp: F) -> Result<Option<Range<usize>>, E>
where
    F: FnMut(usize) -> Result<Ordering, E>,
{
    if lo >= hi {
        return Ok(None);
    }

    let start = partition_point(lo, hi, |i| Ok(cmp(i)? == Ordering::Less))?;
    if start == hi || cmp(start)? != Ordering::Equal {
        return Ok(None);
    }

    let end = partition_point(start + 1, hi, |i| Ok(cmp(i)? != Ordering::Greater))?;
    Ok(Some(start..end))
}

/// First index in `[lo, hi)` where `pred` is false, or `hi` if none.
///
/// `pred` must be true for a (possibly empty) prefix and false afterwards.
pub fn partition_point<E, P>(mut lo: usize, mut hi: usize, mut pred: P) -> Result<usize, E>
where
    P: FnMut(usize) -> Result<bool, E>,
{
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pred(mid)? {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    Ok(lo)
}
