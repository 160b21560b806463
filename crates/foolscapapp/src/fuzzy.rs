//! Fuzzy fallback for note names.
//!
//! Lookups first try the exact key. Only when that misses does the store ask
//! [`fuzzy_guess`] for the closest known name, so a typo like `nots` still finds
//! `note`. Similarity is a normalized edit distance on lowercase characters:
//!
//! ```text
//! ratio = 1 - levenshtein(a, b) / max(len(a), len(b))
//! ```
//!
//! Candidates scoring below the cutoff are rejected. Among the rest the highest
//! ratio wins and ties go to the candidate seen first.

/// Default minimum similarity ratio for a guess to count.
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// Best match for `target` among `candidates`, or `None` if nothing clears `cutoff`.
pub fn fuzzy_guess<I, S>(target: &str, candidates: I, cutoff: f64) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut best: Option<(f64, String)> = None;
    for candidate in candidates {
        let candidate = candidate.as_ref();
        let score = similarity(target, candidate);
        if score < cutoff {
            continue;
        }
        match &best {
            Some((best_score, _)) if *best_score >= score => {}
            _ => best = Some((score, candidate.to_string())),
        }
    }
    best.map(|(_, name)| name)
}

/// Similarity ratio in `[0, 1]`; 1 means equal ignoring case.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(&a.to_lowercase(), &b.to_lowercase())
}
