//! "Did you mean" candidates for unrecognized tokens.

use crate::distance::{Metric, levenshtein};
use crate::flag::FlagSpec;

pub const DEFAULT_TOLERANCE: usize = 3;
pub const DEFAULT_LIMIT: usize = 5;

/// Tuning for [`find_closest`].
#[derive(Debug, Clone, Copy)]
pub struct SuggestOptions {
    /// Largest distance still offered as a candidate.
    pub tolerance: usize,
    /// Maximum number of candidates returned.
    pub limit: usize,
    pub metric: Metric,
}

impl Default for SuggestOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            limit: DEFAULT_LIMIT,
            metric: levenshtein,
        }
    }
}

impl SuggestOptions {
    pub fn tolerance(mut self, tolerance: usize) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }
}

/// A flag close enough to an unknown token to be worth suggesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub flag: &'a FlagSpec,
    pub distance: usize,
}

/// Rank `flags` by how close their name or nearest alias is to `token`.
///
/// Flags farther than the tolerance are dropped. The rest are ordered by
/// ascending distance; equal distances keep the order of `flags`.
pub fn find_closest<'a, I>(token: &str, flags: I, options: &SuggestOptions) -> Vec<Candidate<'a>>
where
    I: IntoIterator<Item = &'a FlagSpec>,
{
    let mut candidates: Vec<Candidate<'a>> = flags
        .into_iter()
        .filter_map(|flag| {
            let distance = flag
                .tokens()
                .map(|name| (options.metric)(token, name))
                .min()?;
            (distance <= options.tolerance).then_some(Candidate { flag, distance })
        })
        .collect();

    // `sort_by_key` is stable, which keeps registry order for ties.
    candidates.sort_by_key(|c| c.distance);
    candidates.truncate(options.limit);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(candidates: &[Candidate<'a>]) -> Vec<&'a str> {
        candidates.iter().map(|c| c.flag.name()).collect()
    }

    fn flags() -> Vec<FlagSpec> {
        vec![
            FlagSpec::bool("-h", "help").alias("--help"),
            FlagSpec::string("-n", "name").alias("--name"),
            FlagSpec::int("-c", "count").alias("--count"),
            FlagSpec::bool("--flag", "a flag"),
        ]
    }

    #[test]
    fn near_miss_is_suggested_first() {
        let flags = flags();
        let found = find_closest("-nn", &flags, &SuggestOptions::default());
        assert_eq!(found[0].flag.name(), "-n");
        assert_eq!(found[0].distance, 1);
    }

    #[test]
    fn alias_distance_counts() {
        let flags = flags();
        let found = find_closest("--nmae", &flags, &SuggestOptions::default().tolerance(2));
        assert_eq!(names(&found), ["-n"]);
        assert_eq!(found[0].distance, 2);
    }

    #[test]
    fn ties_keep_registry_order() {
        let flags = flags();
        let found = find_closest("-x", &flags, &SuggestOptions::default().tolerance(1));
        assert_eq!(names(&found), ["-h", "-n", "-c"]);
        assert!(found.iter().all(|c| c.distance == 1));
    }

    #[test]
    fn tolerance_and_limit_apply() {
        let flags = flags();
        assert!(find_closest("--completely-off", &flags, &SuggestOptions::default()).is_empty());

        let found = find_closest("-x", &flags, &SuggestOptions::default().limit(2));
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn custom_metric_is_used() {
        fn last_char(a: &str, b: &str) -> usize {
            usize::from(a.chars().last() != b.chars().last())
        }
        let flags = flags();
        let options = SuggestOptions::default().tolerance(0).metric(last_char);
        let found = find_closest("xxxxxg", &flags, &options);
        assert_eq!(names(&found), ["--flag"]);
    }
}
