//! Approximate matching over the catalog's surface forms.
//!
//! Similarity is normalized Levenshtein: `1 - distance / longest`. The
//! acceptance test is the integer form `5 * distance <= longest`, which is
//! exactly `similarity >= 0.8` without float-boundary surprises. Below the
//! threshold the strategy fails outright rather than returning a weak guess.

/// Compute edit distance between two strings (Levenshtein).
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[n]
}

/// Similarity >= 0.8, in exact integer arithmetic.
pub fn clears_threshold(distance: usize, longest: usize) -> bool {
    longest > 0 && distance * 5 <= longest
}

/// Normalized similarity, for ranking and logging.
pub fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - edit_distance(a, b) as f64 / longest as f64
}

/// The closest candidate to `query` that clears the acceptance threshold.
///
/// `candidates` pairs a lower-cased surface form with its code. Returns the
/// winning code, the matched form, and the similarity score.
pub fn best_match<'a>(
    query: &str,
    candidates: &'a [(String, &'a str)],
) -> Option<(&'a str, &'a str, f64)> {
    let query_len = query.chars().count();
    let mut best: Option<(&str, &str, usize, usize)> = None;

    for (form, code) in candidates {
        let form_len = form.chars().count();
        let longest = query_len.max(form_len);
        let dist = edit_distance(query, form);
        if !clears_threshold(dist, longest) {
            continue;
        }
        let better = match best {
            // Compare d1/l1 < d2/l2 without division.
            Some((_, _, best_dist, best_longest)) => dist * best_longest < best_dist * longest,
            None => true,
        };
        if better {
            best = Some((form.as_str(), *code, dist, longest));
        }
    }

    best.map(|(form, code, dist, longest)| {
        (code, form, 1.0 - dist as f64 / longest as f64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("ташкент", "тошкент"), 1);
        assert_eq!(edit_distance("abc", "abc"), 0);
        assert_eq!(edit_distance("", "abc"), 3);
    }

    #[test]
    fn test_threshold_is_exact() {
        // 15-char form: 3 edits is exactly 0.8, 4 edits is below.
        assert!(clears_threshold(3, 15));
        assert!(!clears_threshold(4, 15));
        assert!(clears_threshold(0, 3));
        assert!(!clears_threshold(1, 4));
        assert!(clears_threshold(1, 5));
        assert!(!clears_threshold(0, 0));
    }

    #[test]
    fn test_similarity() {
        assert!((similarity("ташкент", "ташкент") - 1.0).abs() < 1e-9);
        assert!((similarity("ташкент", "тошкент") - 6.0 / 7.0).abs() < 1e-9);
        assert!((similarity("", "") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_best_match_picks_closest() {
        let candidates = vec![
            ("ташкент".to_string(), "TAS"),
            ("самарканд".to_string(), "SKD"),
        ];
        let (code, form, score) = best_match("тошкент", &candidates).unwrap();
        assert_eq!(code, "TAS");
        assert_eq!(form, "ташкент");
        assert!(score > 0.85);
    }

    #[test]
    fn test_best_match_rejects_weak() {
        let candidates = vec![("ташкент".to_string(), "TAS")];
        assert!(best_match("лондон", &candidates).is_none());
    }

    #[test]
    fn test_best_match_empty_query() {
        let candidates = vec![("ташкент".to_string(), "TAS")];
        assert!(best_match("", &candidates).is_none());
    }
}
