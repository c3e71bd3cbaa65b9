//! String metrics used to rank "did you mean" candidates.

/// A distance function between two strings; smaller means more similar.
pub type Metric = fn(&str, &str) -> usize;

/// Levenshtein edit distance between `a` and `b`.
///
/// Counts the single-character insertions, deletions and substitutions
/// needed to turn one string into the other, comparing Unicode scalar values.
/// Runs bottom-up with two rows sized by the shorter string.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let (long, short) = if a.chars().count() >= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let short: Vec<char> = short.chars().collect();

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0; short.len() + 1];

    for (i, lc) in long.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &sc) in short.iter().enumerate() {
            let cost = usize::from(lc != sc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORDS: [&str; 8] = ["", "a", "apple", "apples", "--help", "-h", "kitten", "sitting"];

    #[test]
    fn known_distances() {
        assert_eq!(levenshtein("", "apple"), 5);
        assert_eq!(levenshtein("apple", ""), 5);
        assert_eq!(levenshtein("apple", "apples"), 1);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("-nn", "-n"), 1);
        assert_eq!(levenshtein("--count", "-c"), 5);
    }

    #[test]
    fn identity_and_symmetry() {
        for a in WORDS {
            assert_eq!(levenshtein(a, a), 0, "{a}");
            for b in WORDS {
                assert_eq!(levenshtein(a, b), levenshtein(b, a), "{a} / {b}");
            }
        }
    }

    #[test]
    fn empty_string_distance_is_length() {
        for s in WORDS {
            assert_eq!(levenshtein("", s), s.chars().count());
            assert_eq!(levenshtein(s, ""), s.chars().count());
        }
    }

    #[test]
    fn triangle_inequality() {
        for a in WORDS {
            for b in WORDS {
                for c in WORDS {
                    assert!(
                        levenshtein(a, c) <= levenshtein(a, b) + levenshtein(b, c),
                        "{a} / {b} / {c}"
                    );
                }
            }
        }
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(levenshtein("über", "uber"), 1);
        assert_eq!(levenshtein("日本", "日本語"), 1);
    }

    #[test]
    fn long_inputs_stay_fast() {
        let a = "a".repeat(400);
        let b = "b".repeat(300);
        assert_eq!(levenshtein(&a, &b), 400);
    }
}
