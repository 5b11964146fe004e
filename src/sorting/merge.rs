use super::Probe;

/// Top-doon merge sort. One scratch buffer the length o' the input is
/// allocated up front an' shared by every merge.
pub fn merge_sort(seq: &mut [i32]) {
    sort_probed(seq, &mut ());
}

/// Stable merge sort on any `Copy` element, ordered by `key`.
///
/// Elements wi' equal keys come oot in the order they went in:
///
/// ```
/// use sortbench::sorting::merge_sort_by_key;
///
/// let mut pairs = [(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')];
/// merge_sort_by_key(&mut pairs, |p| p.0);
/// assert_eq!(pairs, [(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
/// ```
pub fn merge_sort_by_key<T: Copy, K: Ord>(seq: &mut [T], mut key: impl FnMut(&T) -> K) {
    let mut le = |a: &T, b: &T| key(a) <= key(b);
    sort_with(seq, &mut le, &mut ());
}

pub(crate) fn sort_probed<P: Probe>(seq: &mut [i32], probe: &mut P) {
    sort_with(seq, &mut |a: &i32, b: &i32| a <= b, probe);
}

fn sort_with<T, F, P>(seq: &mut [T], le: &mut F, probe: &mut P)
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
    P: Probe,
{
    if seq.len() <= 1 {
        return;
    }
    let mut scratch = seq.to_vec();
    split_merge(seq, &mut scratch, le, probe);
}

fn split_merge<T, F, P>(seq: &mut [T], scratch: &mut [T], le: &mut F, probe: &mut P)
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
    P: Probe,
{
    let len = seq.len();
    if len <= 1 {
        return;
    }
    let mid = len / 2;
    {
        let (left, right) = seq.split_at_mut(mid);
        let (left_scratch, right_scratch) = scratch.split_at_mut(mid);
        split_merge(left, left_scratch, le, probe);
        split_merge(right, right_scratch, le, probe);
    }
    merge(seq, mid, scratch, le, probe);
}

/// Merge the sorted runs `seq[..mid]` an' `seq[mid..]`. Ties take the left.
fn merge<T, F, P>(seq: &mut [T], mid: usize, scratch: &mut [T], le: &mut F, probe: &mut P)
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
    P: Probe,
{
    let len = seq.len();
    scratch[..len].copy_from_slice(seq);
    let (left, right) = scratch[..len].split_at(mid);

    let (mut i, mut j, mut k) = (0, 0, 0);
    while i < left.len() && j < right.len() {
        probe.compare();
        if le(&left[i], &right[j]) {
            seq[k] = left[i];
            i += 1;
        } else {
            seq[k] = right[j];
            j += 1;
        }
        probe.write();
        k += 1;
    }
    for &value in left[i..].iter().chain(&right[j..]) {
        seq[k] = value;
        probe.write();
        k += 1;
    }
}
