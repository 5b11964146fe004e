use super::Probe;

/// Grow a sorted prefix, shiftin' each new element left past its
/// strictly greater predecessors.
pub fn insertion_sort(seq: &mut [i32]) {
    sort_probed(seq, &mut ());
}

pub(crate) fn sort_probed<P: Probe>(seq: &mut [i32], probe: &mut P) {
    for i in 1..seq.len() {
        let key = seq[i];
        let mut j = i;
        while j > 0 {
            probe.compare();
            if seq[j - 1] <= key {
                break;
            }
            seq[j] = seq[j - 1];
            probe.write();
            j -= 1;
        }
        if j != i {
            seq[j] = key;
            probe.write();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::SortStats;

    #[test]
    fn test_insertion_sorted_input_has_no_shifts() {
        let mut data = vec![1, 2, 3, 4, 5];
        let mut stats = SortStats::default();
        sort_probed(&mut data, &mut stats);
        assert_eq!(data, vec![1, 2, 3, 4, 5]);
        assert_eq!(stats.writes, 0);
        assert_eq!(stats.comparisons, 4);
    }

    #[test]
    fn test_insertion_reverse_input() {
        let mut data = vec![3, 2, 1];
        let mut stats = SortStats::default();
        sort_probed(&mut data, &mut stats);
        assert_eq!(data, vec![1, 2, 3]);
        // three shifts plus two placements
        assert_eq!(stats.writes, 5);
    }
}
