//! Text similarity scoring.
//!
//! Implements the classic SequenceMatcher ratio: `2*M / T` where `M` is the
//! total length of the matching blocks found by greedy longest-common-substring
//! recursion and `T` is the combined length of both inputs. Comparison is
//! literal and character-level: no case folding, no whitespace normalization,
//! and no junk heuristic, so punctuation and casing differences lower the
//! score on purpose.

use std::collections::HashMap;

/// Similarity ratio between two strings in `[0.0, 1.0]`.
///
/// `similarity(a, a) == 1.0` for any `a` (including empty), and
/// `similarity(a, "") == 0.0` for non-empty `a`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        // Two empty strings are identical.
        return 1.0;
    }

    let matches = matching_chars(&a, &b);
    2.0 * matches as f64 / total as f64
}

/// Similarity scaled to the 0-100 value shown to users.
pub fn percent(a: &str, b: &str) -> f64 {
    similarity(a, b) * 100.0
}

/// Total length of all matching blocks between `a` and `b`.
///
/// Finds the longest matching block, then recurses (via an explicit work
/// list) into the pieces to its left and right.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    // Index of each character's positions in `b`, in ascending order.
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &ch) in b.iter().enumerate() {
        b2j.entry(ch).or_default().push(j);
    }

    let mut queue = vec![(0usize, a.len(), 0usize, b.len())];
    let mut matched = 0usize;

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, size) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if size > 0 {
            matched += size;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + size < ahi && j + size < bhi {
                queue.push((i + size, ahi, j + size, bhi));
            }
        }
    }

    matched
}

/// Longest matching block within `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Returns `(i, j, size)` such that `a[i..i+size] == b[j..j+size]`. Ties go
/// to the earliest start in `a`, then the earliest start in `b`.
fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best_i = alo;
    let mut best_j = blo;
    let mut best_size = 0usize;

    // j2len[j] = length of the longest match ending at a[i-1], b[j].
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for i in alo..ahi {
        let mut new_j2len: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(&a[i]) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let len = if j == 0 {
                    1
                } else {
                    j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                };
                new_j2len.insert(j, len);
                if len > best_size {
                    best_i = i + 1 - len;
                    best_j = j + 1 - len;
                    best_size = len;
                }
            }
        }
        j2len = new_j2len;
    }

    (best_i, best_j, best_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(similarity("hello world", "hello world"), 1.0);
        assert_eq!(similarity("a", "a"), 1.0);
    }

    #[test]
    fn empty_against_nonempty_scores_zero() {
        assert_eq!(similarity("hello", ""), 0.0);
        assert_eq!(similarity("", "hello"), 0.0);
    }

    #[test]
    fn both_empty_scores_one() {
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn partial_overlap_scores_between_zero_and_one() {
        let ratio = similarity("hello world", "goodbye world");
        assert!(ratio > 0.0 && ratio < 1.0, "got {}", ratio);
    }

    #[test]
    fn matches_reference_ratio() {
        // difflib.SequenceMatcher(None, "abcd", "bcde").ratio() == 0.75
        let ratio = similarity("abcd", "bcde");
        assert!((ratio - 0.75).abs() < 1e-9, "got {}", ratio);
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert!(similarity("Hello", "hello") < 1.0);
    }

    #[test]
    fn repeated_characters() {
        // Longest block "aaa" plus one more "a": 2 * 4 / (4 + 5)
        let ratio = similarity("aaaa", "aaaaa");
        assert!((ratio - 8.0 / 9.0).abs() < 1e-9, "got {}", ratio);
    }

    #[test]
    fn multibyte_characters_count_as_single_units() {
        // Two chars each, one in common.
        let ratio = similarity("héllo", "hallo");
        assert!(ratio > 0.5 && ratio < 1.0, "got {}", ratio);
    }

    #[test]
    fn percent_scales_to_hundred() {
        assert_eq!(percent("hello world", "hello world"), 100.0);
        assert_eq!(percent("hello", ""), 0.0);
    }
}
