/// Run-length encode a flat sequence into `(value, count)` pairs.
///
/// Returns an empty vector for an empty input, rather than panicking on the
/// first element like the reference this is based on.
pub fn rle_encode(values: &[i64]) -> Vec<(i64, i64)> {
    let mut runs = Vec::new();
    let mut iter = values.iter();
    let Some(&first) = iter.next() else {
        return runs;
    };

    let mut current = first;
    let mut count = 1i64;
    for &v in iter {
        if v == current {
            count += 1;
        } else {
            runs.push((current, count));
            current = v;
            count = 1;
        }
    }
    runs.push((current, count));
    runs
}

/// Rehydrate `(value, count)` runs back into a flat sequence.
pub fn rle_decode(runs: &[(i64, i64)]) -> Vec<i64> {
    let mut out = Vec::with_capacity(runs.iter().map(|(_, n)| *n as usize).sum());
    for &(value, count) in runs {
        out.extend(std::iter::repeat(value).take(count as usize));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worked_example() {
        let runs = rle_encode(&[5, 5, 5, 7, 7, 3]);
        assert_eq!(runs, vec![(5, 3), (7, 2), (3, 1)]);
        assert_eq!(rle_decode(&runs), vec![5, 5, 5, 7, 7, 3]);
    }

    #[test]
    fn roundtrip_for_arbitrary_sequence() {
        let seq = [1, 1, 2, 3, 3, 3, 3, -1, -1, 0];
        assert_eq!(rle_decode(&rle_encode(&seq)), seq);
    }

    #[test]
    fn empty_sequence_roundtrips() {
        let seq: [i64; 0] = [];
        assert_eq!(rle_encode(&seq), vec![]);
        assert_eq!(rle_decode(&[]), Vec::<i64>::new());
    }
}
