use super::Probe;

/// Adjacent compare-an'-swap, `n - 1` passes, each yin leaving the
/// largest remaining element at the end o' the unsorted part.
pub fn bubble_sort(seq: &mut [i32]) {
    sort_probed(seq, &mut ());
}

pub(crate) fn sort_probed<P: Probe>(seq: &mut [i32], probe: &mut P) {
    let n = seq.len();
    for pass in 0..n.saturating_sub(1) {
        for j in 0..n - pass - 1 {
            probe.compare();
            if seq[j] > seq[j + 1] {
                seq.swap(j, j + 1);
                probe.swap();
            }
        }
    }
}
