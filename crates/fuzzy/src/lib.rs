//! # Tokenizer Fuzzy
//!
//! Prefix edit-distance matching and alias relevance scoring.
//!
//! ## Architecture
//!
//! ```text
//! query terms + alias terms
//!     │
//!     ├──> PrefixMatcher (edit matrix)
//!     │      ├─ protected terms cannot be skipped or substituted
//!     │      ├─ unaligned query suffix is free
//!     │      └─ trailing downstream terms are trimmed
//!     │
//!     └──> AliasScorer
//!            ├─ match × common × position × length factors
//!            └─ vetoes: downstream-only partials, scores below threshold
//! ```
//!
//! ## Example
//!
//! ```rust
//! use tokenizer_fuzzy::AliasScorer;
//!
//! let scorer = AliasScorer::default();
//! let result = scorer.score(&[1u32, 2, 3], &[1, 2], |_: &u32| false, |_: &u32| false);
//! assert!(scorer.accepts(&result));
//! assert_eq!(result.matched_length, 2);
//! ```

mod config;
mod diff;
mod error;
mod score;

pub use config::ScorerConfig;
pub use diff::{DiffResult, Edit, PrefixMatcher};
pub use error::{FuzzyError, Result};
pub use score::{AliasScore, AliasScorer, ScoreFactors};
