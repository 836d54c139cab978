//! Fuzzy matching algorithms.

/// Calculate Levenshtein edit distance between two strings.
///
/// Insertions, deletions and substitutions each cost one. Distances are
/// counted in `char`s, not bytes.
///
/// # Arguments
/// * `a` - First string
/// * `b` - Second string
///
/// # Returns
/// Number of single-character edits needed to transform a into b
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    levenshtein_chars(&a_chars, &b_chars)
}

/// Edit distance over pre-split character slices.
pub(crate) fn levenshtein_chars(a: &[char], b: &[char]) -> usize {
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows of the (m + 1) x (n + 1) table are enough
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Outcome of a greedy in-order subsequence walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subsequence {
    /// Matched characters whose text index directly follows the previous match.
    pub adjacent: usize,
}

/// Greedily consume `query` characters while walking `text` left to right.
///
/// Returns `None` unless every query character was consumed. An empty query
/// never matches.
pub fn subsequence(text: &[char], query: &[char]) -> Option<Subsequence> {
    if query.is_empty() {
        return None;
    }

    let mut qi = 0;
    let mut adjacent = 0;
    let mut last_match: Option<usize> = None;

    for (ti, &c) in text.iter().enumerate() {
        if qi == query.len() {
            break;
        }
        if c == query[qi] {
            if last_match.is_some_and(|last| ti == last + 1) {
                adjacent += 1;
            }
            last_match = Some(ti);
            qi += 1;
        }
    }

    (qi == query.len()).then_some(Subsequence { adjacent })
}

/// Smallest edit distance between `query` and the leading characters of any
/// whitespace-delimited word in `text`.
///
/// Each word is clipped to `query.len() + 2` characters before comparing, so
/// a long word is judged on its prefix only.
pub fn closest_word_distance(text: &str, query: &[char]) -> Option<usize> {
    let window = query.len() + 2;
    text.split_whitespace()
        .map(|word| {
            let prefix: Vec<char> = word.chars().take(window).collect();
            levenshtein_chars(&prefix, query)
        })
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_levenshtein_same() {
        assert_eq!(levenshtein_distance("hello", "hello"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein_distance("hello", "hallo"), 1);
    }

    #[test]
    fn test_levenshtein_insert() {
        assert_eq!(levenshtein_distance("helo", "hello"), 1);
    }

    #[test]
    fn test_levenshtein_delete() {
        assert_eq!(levenshtein_distance("hello", "helo"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein_distance("", "lamp"), 4);
        assert_eq!(levenshtein_distance("lamp", ""), 4);
        assert_eq!(levenshtein_distance("", ""), 0);
    }

    #[test]
    fn test_levenshtein_classic() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("flaw", "lawn"), 2);
    }

    #[test]
    fn test_levenshtein_counts_chars_not_bytes() {
        assert_eq!(levenshtein_distance("café", "cafe"), 1);
    }

    #[test]
    fn test_subsequence_counts_adjacent_matches() {
        // w-i-r contiguous: two adjacent steps after the first match
        let result = subsequence(&chars("wireless"), &chars("wir")).unwrap();
        assert_eq!(result.adjacent, 2);

        // s-w-h are all separated
        let result = subsequence(&chars("smart watch"), &chars("swh")).unwrap();
        assert_eq!(result.adjacent, 0);
    }

    #[test]
    fn test_subsequence_requires_every_char() {
        assert!(subsequence(&chars("lamp"), &chars("lampshade")).is_none());
        assert!(subsequence(&chars("lamp"), &[]).is_none());
    }

    #[test]
    fn test_closest_word_distance_clips_prefix() {
        // "headphones" vs "headphoens": transposition = 2 edits
        let d = closest_word_distance("wireless headphones", &chars("headphoens"));
        assert_eq!(d, Some(2));
    }

    #[test]
    fn test_closest_word_distance_no_words() {
        assert_eq!(closest_word_distance("   ", &chars("abc")), None);
    }
}
