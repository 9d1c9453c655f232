use crate::config::ScorerConfig;
use crate::diff::{DiffResult, PrefixMatcher};
use crate::error::Result;
use std::collections::HashSet;
use std::hash::Hash;

/// Relevance of an alias against the head of a query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AliasScore {
    pub score: f64,

    /// Query terms consumed by the match (`rightmost_aligned + 1`)
    pub matched_length: usize,
}

/// Multiplicative factors that make up a score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreFactors {
    /// Edit cost relative to the aligned span
    pub match_factor: f64,

    /// Share of the retained match that aligned exactly
    pub common_factor: f64,

    /// Penalty for matches starting deep into the query
    pub position_factor: f64,

    /// Retained match length
    pub length_factor: f64,
}

impl ScoreFactors {
    /// Compute factors from a diff. Returns `None` for an empty match.
    pub fn from_diff<T>(diff: &DiffResult<T>) -> Option<Self> {
        let match_len = diff.matched.len();
        if match_len == 0 {
            return None;
        }
        let match_len = match_len as f64;

        let span = diff.aligned_span() as f64;
        let match_factor = if span > diff.cost {
            (span - diff.cost) / span
        } else {
            1.0 / (span + diff.cost)
        };

        let common_factor = diff.common_terms.len() as f64 / match_len;

        let leftmost = diff.leftmost_aligned.unwrap_or(0) as f64;
        let position_factor = (match_len - leftmost).max(0.0) / match_len;

        Some(Self {
            match_factor,
            common_factor,
            position_factor,
            length_factor: match_len,
        })
    }

    pub fn product(&self) -> f64 {
        self.match_factor * self.common_factor * self.position_factor * self.length_factor
    }
}

/// Scores alias prefixes against query windows
#[derive(Debug, Clone)]
pub struct AliasScorer {
    config: ScorerConfig,
    matcher: PrefixMatcher,
}

impl AliasScorer {
    pub fn new(config: ScorerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            matcher: PrefixMatcher::new(config.protected_cost),
            config,
        })
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    pub fn matcher(&self) -> &PrefixMatcher {
        &self.matcher
    }

    /// Whether a score survived the veto rules
    pub fn accepts(&self, score: &AliasScore) -> bool {
        score.score > self.config.no_match_score && score.matched_length > 0
    }

    pub fn score<T, D, P>(
        &self,
        query: &[T],
        prefix: &[T],
        is_downstream: D,
        is_protected: P,
    ) -> AliasScore
    where
        T: Clone + Eq + Hash,
        D: Fn(&T) -> bool,
        P: Fn(&T) -> bool,
    {
        let diff = self.matcher.diff(query, prefix, &is_downstream, is_protected);
        self.score_diff(&diff, prefix, is_downstream)
    }

    /// Turn a diff into a score, applying the veto rules
    pub fn score_diff<T, D>(&self, diff: &DiffResult<T>, prefix: &[T], is_downstream: D) -> AliasScore
    where
        T: Eq + Hash,
        D: Fn(&T) -> bool,
    {
        let no_match = AliasScore {
            score: self.config.no_match_score,
            matched_length: diff.aligned_span(),
        };

        let Some(factors) = ScoreFactors::from_diff(diff) else {
            return AliasScore {
                matched_length: 0,
                ..no_match
            };
        };

        let prefix_terms: HashSet<&T> = prefix.iter().collect();
        let only_downstream = diff.common_terms.iter().all(|t| is_downstream(t));
        if only_downstream && diff.common_terms.len() != prefix_terms.len() {
            log::trace!(
                "veto: {} common terms, all downstream, alias has {} distinct terms",
                diff.common_terms.len(),
                prefix_terms.len()
            );
            return no_match;
        }

        let score = factors.product();
        if score < self.config.min_score {
            log::trace!("veto: score {score:.4} below {}", self.config.min_score);
            return no_match;
        }

        AliasScore {
            score,
            matched_length: diff.aligned_span(),
        }
    }
}

impl Default for AliasScorer {
    fn default() -> Self {
        let config = ScorerConfig::default();
        Self {
            matcher: PrefixMatcher::new(config.protected_cost),
            config,
        }
    }
}
