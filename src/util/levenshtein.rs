//! Character-level edit distance.
//!
//! Distances are computed over Unicode scalar values, so a Hebrew letter counts
//! as one edit regardless of its UTF-8 width.

use std::cmp::min;

/// Minimum number of single-character insertions, deletions or substitutions
/// that turn `s1` into `s2`.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    if s1_chars.is_empty() {
        return s2_chars.len();
    }
    if s2_chars.is_empty() {
        return s1_chars.len();
    }

    let mut prev_row: Vec<usize> = (0..=s2_chars.len()).collect();
    let mut curr_row = vec![0; s2_chars.len() + 1];

    for (i, a) in s1_chars.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b) in s2_chars.iter().enumerate() {
            let cost = usize::from(a != b);
            curr_row[j + 1] = min(
                min(prev_row[j + 1] + 1, curr_row[j] + 1),
                prev_row[j] + cost,
            );
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[s2_chars.len()]
}

/// Levenshtein distance, or `None` as soon as it is known to exceed `threshold`.
pub fn levenshtein_distance_threshold(s1: &str, s2: &str, threshold: usize) -> Option<usize> {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    if s1_chars.len().abs_diff(s2_chars.len()) > threshold {
        return None;
    }
    if s1_chars.is_empty() || s2_chars.is_empty() {
        let distance = s1_chars.len().max(s2_chars.len());
        return (distance <= threshold).then_some(distance);
    }

    let mut prev_row: Vec<usize> = (0..=s2_chars.len()).collect();
    let mut curr_row = vec![0; s2_chars.len() + 1];

    for (i, a) in s1_chars.iter().enumerate() {
        curr_row[0] = i + 1;
        let mut min_in_row = curr_row[0];

        for (j, b) in s2_chars.iter().enumerate() {
            let cost = usize::from(a != b);
            curr_row[j + 1] = min(
                min(prev_row[j + 1] + 1, curr_row[j] + 1),
                prev_row[j] + cost,
            );
            min_in_row = min(min_in_row, curr_row[j + 1]);
        }

        if min_in_row > threshold {
            return None;
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    let distance = prev_row[s2_chars.len()];
    (distance <= threshold).then_some(distance)
}

/// Similarity in `0.0..=1.0`: `1 - distance / max_len`.
///
/// Two empty strings are identical.
///
/// ```
/// use mafteah::util::levenshtein::similarity;
///
/// assert_eq!(similarity("משפט", "משפט"), 1.0);
/// assert_eq!(similarity("משפט", "משפת"), 0.75);
/// ```
pub fn similarity(s1: &str, s2: &str) -> f64 {
    let max_len = s1.chars().count().max(s2.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein_distance(s1, s2) as f64 / max_len as f64
}

/// Similarity of `s1` and `s2` if it reaches `threshold`.
///
/// Uses the bounded distance, so dissimilar pairs are rejected early.
pub fn similarity_at_least(s1: &str, s2: &str, threshold: f64) -> Option<f64> {
    let max_len = s1.chars().count().max(s2.chars().count());
    if max_len == 0 {
        return (threshold <= 1.0).then_some(1.0);
    }
    let max_distance = max_allowed_distance(max_len, threshold);
    let distance = levenshtein_distance_threshold(s1, s2, max_distance)?;
    let score = 1.0 - distance as f64 / max_len as f64;
    (score >= threshold).then_some(score)
}

/// Largest distance `d` with `1 - d / max_len >= threshold`.
pub fn max_allowed_distance(max_len: usize, threshold: f64) -> usize {
    let threshold = threshold.clamp(0.0, 1.0);
    ((1.0 - threshold) * max_len as f64 + 1e-9).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("שלום", "שלומ"), 1);
        assert_eq!(levenshtein_distance("תלמיד", "תלמידים"), 2);
    }

    #[test]
    fn test_levenshtein_distance_threshold() {
        assert_eq!(levenshtein_distance_threshold("kitten", "sitting", 3), Some(3));
        assert_eq!(levenshtein_distance_threshold("kitten", "sitting", 2), None);
        assert_eq!(levenshtein_distance_threshold("a", "abcdef", 2), None);
        assert_eq!(levenshtein_distance_threshold("", "ab", 2), Some(2));
    }

    #[test]
    fn test_similarity() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("abcd", "abcd"), 1.0);
        assert_eq!(similarity("abcd", "abce"), 0.75);
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_similarity_at_least_agrees_with_similarity() {
        let pairs = [
            ("משפטים", "משפטימ"),
            ("תלמיד", "תלמידים"),
            ("כתבה", "כתובה"),
            ("abcdefghij", "abcdefghxx"),
        ];
        for (a, b) in pairs {
            for threshold in [0.5, 0.7, 0.8, 0.9] {
                let expected = similarity(a, b);
                let bounded = similarity_at_least(a, b, threshold);
                if expected >= threshold {
                    assert_eq!(bounded, Some(expected), "{a} {b} {threshold}");
                } else {
                    assert_eq!(bounded, None, "{a} {b} {threshold}");
                }
            }
        }
    }

    #[test]
    fn test_max_allowed_distance() {
        assert_eq!(max_allowed_distance(5, 0.8), 1);
        assert_eq!(max_allowed_distance(10, 0.8), 2);
        assert_eq!(max_allowed_distance(4, 1.0), 0);
        assert_eq!(max_allowed_distance(4, 0.0), 4);
    }
}
