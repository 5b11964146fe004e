use super::Probe;

/// Quicksort wi' a median-o'-three pivot an' Hoare partitioning.
///
/// Only the smaller side o' each split is recursed into; the larger side
/// is handled by the loop, so stack depth stays at O(log n) whatever the
/// input looks like.
pub fn quick_sort(seq: &mut [i32]) {
    sort_probed(seq, &mut ());
}

pub(crate) fn sort_probed<P: Probe>(mut seq: &mut [i32], probe: &mut P) {
    while seq.len() > 1 {
        let split = partition(seq, probe) + 1;
        let (left, right) = std::mem::take(&mut seq).split_at_mut(split);
        if left.len() < right.len() {
            sort_probed(left, probe);
            seq = right;
        } else {
            sort_probed(right, probe);
            seq = left;
        }
    }
}

/// Partition `seq` (len >= 2) around the value at its floor midpoint.
///
/// Returns `j` wi' `0 <= j < len - 1`: every element o' `seq[..=j]` is
/// <= the pivot an' every element o' `seq[j + 1..]` is >= it, so both
/// sides are non-empty.
fn partition<P: Probe>(seq: &mut [i32], probe: &mut P) -> usize {
    let mid = (seq.len() - 1) / 2;
    if seq.len() >= 3 {
        median_of_three(seq, mid, probe);
    }
    let pivot = seq[mid];

    let mut i = 0;
    let mut j = seq.len() - 1;
    loop {
        while less(seq[i], pivot, probe) {
            i += 1;
        }
        while less(pivot, seq[j], probe) {
            j -= 1;
        }
        if i >= j {
            return j;
        }
        seq.swap(i, j);
        probe.swap();
        i += 1;
        j -= 1;
    }
}

/// Order first, middle an' last so the median sits at `mid`.
fn median_of_three<P: Probe>(seq: &mut [i32], mid: usize, probe: &mut P) {
    let last = seq.len() - 1;
    if less(seq[mid], seq[0], probe) {
        seq.swap(mid, 0);
        probe.swap();
    }
    if less(seq[last], seq[0], probe) {
        seq.swap(last, 0);
        probe.swap();
    }
    if less(seq[last], seq[mid], probe) {
        seq.swap(last, mid);
        probe.swap();
    }
}

#[inline(always)]
fn less<P: Probe>(a: i32, b: i32, probe: &mut P) -> bool {
    probe.compare();
    a < b
}
