/// Sorts `keys` ascending in place, moving `payload` entries in lockstep.
///
/// Hoare-style quicksort over two parallel arrays. The position projector
/// uses this to order vertex indices by their distance from a query point,
/// so duplicate keys are common (coincident vertices produce identical
/// distances) and the partition carries a tie adjustment that keeps the
/// scan from stalling on them.
///
/// # Panics
///
/// Panics if the two slices have different lengths.
pub fn sort_by_distance(keys: &mut [f64], payload: &mut [usize]) {
    assert_eq!(
        keys.len(),
        payload.len(),
        "key and payload arrays must have equal length"
    );
    if keys.len() > 1 {
        quicksort(keys, payload, 0, keys.len() - 1);
    }
}

fn quicksort(keys: &mut [f64], payload: &mut [usize], lo: usize, hi: usize) {
    if lo >= hi {
        return;
    }
    let p = partition(keys, payload, lo, hi);
    if p == hi {
        // The right cursor never moved: the pivot is the range maximum
        // and already sits in its final slot.
        quicksort(keys, payload, lo, hi - 1);
    } else {
        quicksort(keys, payload, lo, p);
        quicksort(keys, payload, p + 1, hi);
    }
}

/// Partitions `[lo, hi]` around the middle element's key.
///
/// Returns `p` such that `[lo, p]` holds keys `<=` pivot and `[p+1, hi]`
/// holds keys `>=` pivot. When both cursors stop on equal keys, `right`
/// is decremented once before the swap; without this the scan makes no
/// progress on runs of identical keys.
fn partition(keys: &mut [f64], payload: &mut [usize], lo: usize, hi: usize) -> usize {
    let pivot = keys[lo + (hi - lo) / 2];
    let mut left = lo;
    let mut right = hi;

    loop {
        while keys[left] < pivot {
            left += 1;
        }
        while keys[right] > pivot {
            right -= 1;
        }
        if left >= right {
            return right;
        }
        if keys[left] == keys[right] {
            right -= 1;
        }
        keys.swap(left, right);
        payload.swap(left, right);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Checks that `keys` is non-decreasing and that `payload` is a
    /// permutation of `0..n` still paired with its original key.
    fn assert_sorted_in_lockstep(keys: &[f64], payload: &[usize], original: &[f64]) {
        for w in keys.windows(2) {
            assert!(w[0] <= w[1], "keys not sorted: {keys:?}");
        }
        let mut seen = vec![false; payload.len()];
        for (k, &i) in keys.iter().zip(payload.iter()) {
            assert!(!seen[i], "payload is not a permutation: {payload:?}");
            seen[i] = true;
            assert!(
                (original[i] - k).abs() < f64::EPSILON,
                "payload {i} no longer paired with its key"
            );
        }
    }

    fn run(mut keys: Vec<f64>) {
        let original = keys.clone();
        let mut payload: Vec<usize> = (0..keys.len()).collect();
        sort_by_distance(&mut keys, &mut payload);
        assert_sorted_in_lockstep(&keys, &payload, &original);
    }

    #[test]
    fn empty_and_single() {
        run(vec![]);
        run(vec![42.0]);
    }

    #[test]
    fn two_elements_both_orders() {
        run(vec![1.0, 2.0]);
        run(vec![2.0, 1.0]);
        run(vec![3.0, 3.0]);
    }

    #[test]
    fn already_sorted() {
        run(vec![0.0, 1.0, 2.5, 3.0, 9.0]);
    }

    #[test]
    fn reverse_sorted() {
        run(vec![9.0, 7.0, 5.0, 3.0, 1.0]);
    }

    #[test]
    fn shuffled() {
        run(vec![3.2, 0.1, 7.7, 4.4, 2.2, 9.9, 1.1, 5.5]);
    }

    // Duplicate-heavy inputs are the reason for the partition's tie
    // adjustment; these must terminate, not just sort.

    #[test]
    fn all_keys_equal() {
        run(vec![5.0; 16]);
    }

    #[test]
    fn long_duplicate_runs() {
        let mut keys = vec![1.0; 10];
        keys.extend(vec![2.0; 10]);
        keys.extend(vec![1.0; 10]);
        run(keys);
    }

    #[test]
    fn alternating_duplicates() {
        let keys: Vec<f64> = (0..32).map(|i| f64::from(i % 3)).collect();
        run(keys);
    }

    #[test]
    fn duplicates_with_zero() {
        // Distances from a query sitting on several coincident vertices.
        run(vec![0.0, 4.0, 0.0, 0.0, 2.0, 0.0, 4.0]);
    }

    #[test]
    fn payload_follows_keys() {
        let mut keys = vec![3.0, 1.0, 2.0];
        let mut payload = vec![10, 20, 30];
        sort_by_distance(&mut keys, &mut payload);
        assert_eq!(keys, vec![1.0, 2.0, 3.0]);
        assert_eq!(payload, vec![20, 30, 10]);
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn mismatched_lengths_panic() {
        let mut keys = vec![1.0, 2.0];
        let mut payload = vec![0];
        sort_by_distance(&mut keys, &mut payload);
    }
}
