//! Edit distance primitives used by the fuzzy lexical scorer.

use std::cmp::min;

/// Calculate the Levenshtein distance between two strings: the minimum
/// number of single-character insertions, deletions or substitutions needed
/// to turn one into the other. Operates on chars, not bytes.
pub fn distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Two-row rolling computation.
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0usize; b_chars.len() + 1];

    for (i, &ca) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = min(min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Levenshtein distance with an upper bound for early termination.
///
/// Returns `None` as soon as the distance provably exceeds `max_edits`,
/// which makes candidate filtering cheap.
pub fn bounded_distance(a: &str, b: &str, max_edits: usize) -> Option<usize> {
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    if a_len.abs_diff(b_len) > max_edits {
        return None;
    }
    if a_len == 0 {
        return Some(b_len);
    }
    if b_len == 0 {
        return Some(a_len);
    }

    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0usize; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        let mut row_min = curr[0];
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = min(min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
            row_min = min(row_min, curr[j + 1]);
        }
        if row_min > max_edits {
            return None;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let result = prev[b_len];
    if result <= max_edits { Some(result) } else { None }
}

/// Edit distance scaled by the longer input's length, in [0, 1].
///
/// Two empty strings are at distance 0.
pub fn normalized_distance(a: &str, b: &str) -> f32 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 0.0;
    }
    distance(a, b) as f32 / longest as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_basic() {
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("", ""), 0);
        assert_eq!(distance("abc", ""), 3);
        assert_eq!(distance("", "abc"), 3);
        assert_eq!(distance("same", "same"), 0);
    }

    #[test]
    fn test_distance_arabic() {
        assert_eq!(distance("الله", "الله"), 0);
        assert_eq!(distance("الله", "اله"), 1);
    }

    #[test]
    fn test_bounded_distance() {
        assert_eq!(bounded_distance("kitten", "sitting", 3), Some(3));
        assert_eq!(bounded_distance("kitten", "sitting", 2), None);
        assert_eq!(bounded_distance("abc", "xyz", 1), None);
        assert_eq!(bounded_distance("", "ab", 2), Some(2));
        assert_eq!(bounded_distance("abcdef", "a", 2), None);
    }

    #[test]
    fn test_normalized_distance_bounds() {
        assert_eq!(normalized_distance("", ""), 0.0);
        assert_eq!(normalized_distance("abc", "abc"), 0.0);
        assert_eq!(normalized_distance("abc", "xyz"), 1.0);
        let d = normalized_distance("allah", "allahu");
        assert!(d > 0.0 && d < 0.2);
    }
}
