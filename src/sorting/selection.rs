use super::Probe;

/// Fer each position, find the minimum o' what's left an' swap it in.
pub fn selection_sort(seq: &mut [i32]) {
    sort_probed(seq, &mut ());
}

pub(crate) fn sort_probed<P: Probe>(seq: &mut [i32], probe: &mut P) {
    let n = seq.len();
    for i in 0..n.saturating_sub(1) {
        let mut min_index = i;
        for j in i + 1..n {
            probe.compare();
            if seq[j] < seq[min_index] {
                min_index = j;
            }
        }
        if min_index != i {
            seq.swap(i, min_index);
            probe.swap();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::SortStats;

    #[test]
    fn test_selection_swaps_at_most_n_minus_one() {
        let mut data = vec![4, 3, 2, 1, 0];
        let mut stats = SortStats::default();
        sort_probed(&mut data, &mut stats);
        assert_eq!(data, vec![0, 1, 2, 3, 4]);
        assert_eq!(stats.comparisons, 10);
        assert!(stats.swaps <= 4);
    }

    #[test]
    fn test_selection_sorted_input_never_swaps() {
        let mut data = vec![1, 2, 3, 4];
        let mut stats = SortStats::default();
        sort_probed(&mut data, &mut stats);
        assert_eq!(stats.swaps, 0);
    }
}
