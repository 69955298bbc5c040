//! Pairing backup and intended repositories
//!
//! Repositories are paired positionally. When one list is longer, the last
//! repository of the shorter list is reused for every remaining position
//! ("sticky last pairing") instead of ending the iteration there.

/// Pair two lists positionally, carrying the last element of the shorter
/// list forward. Empty when either list is empty.
pub fn sticky_pairs<'a, A, B>(left: &'a [A], right: &'a [B]) -> Vec<(&'a A, &'a B)> {
    let (Some(left_last), Some(right_last)) = (left.last(), right.last()) else {
        return Vec::new();
    };

    (0..left.len().max(right.len()))
        .map(|idx| {
            (
                left.get(idx).unwrap_or(left_last),
                right.get(idx).unwrap_or(right_last),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_equal_lengths_zip() {
        assert_eq!(sticky_pairs(&[1, 2], &['a', 'b']), vec![(&1, &'a'), (&2, &'b')]);
    }

    #[test]
    fn test_shorter_list_sticks() {
        assert_eq!(
            sticky_pairs(&[1, 2, 3], &['a']),
            vec![(&1, &'a'), (&2, &'a'), (&3, &'a')]
        );
        assert_eq!(sticky_pairs(&[1], &['a', 'b']), vec![(&1, &'a'), (&1, &'b')]);
    }

    #[test]
    fn test_empty_side_yields_nothing() {
        assert!(sticky_pairs::<i32, char>(&[], &['a']).is_empty());
        assert!(sticky_pairs::<i32, char>(&[1], &[]).is_empty());
    }

    proptest! {
        #[test]
        fn test_pair_count_is_longest(left in prop::collection::vec(any::<u8>(), 1..6),
                                      right in prop::collection::vec(any::<u8>(), 1..6)) {
            let pairs = sticky_pairs(&left, &right);
            prop_assert_eq!(pairs.len(), left.len().max(right.len()));
            prop_assert_eq!(pairs.last().map(|p| *p.0), left.last().copied());
            prop_assert_eq!(pairs.last().map(|p| *p.1), right.last().copied());
        }
    }
}
