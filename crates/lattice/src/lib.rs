//! # Tokenizer Lattice
//!
//! Turns a term sequence into the highest-scoring sequence of tokens by
//! searching a weighted lattice of alias matches.
//!
//! ## Architecture
//!
//! ```text
//! Term[]
//!     │
//!     ├──> LatticeBuilder
//!     │      ├─ AliasIndex: candidates starting at each vertex
//!     │      ├─ AliasScorer: fuzzy prefix match → (score, length)
//!     │      └─ default edge per vertex, coalesce, filter
//!     │
//!     ├──> Path search
//!     │      ├─ best_path: single best route
//!     │      ├─ all_co_optimal_paths: every route tying the best score
//!     │      └─ all_paths: every route
//!     │
//!     └──> Walker
//!            └─ advance / retreat / discard / checkpoint / restore
//! ```
//!
//! ## Example
//!
//! ```rust
//! use tokenizer_lattice::{
//!     best_path, AliasTable, LatticeBuilder, LatticeConfig, StaticTermModel, Token,
//! };
//!
//! let mut aliases = AliasTable::new();
//! aliases.insert(vec![10, 11], Token::entity(1, "iced latte"));
//! let model = StaticTermModel::new();
//!
//! let builder = LatticeBuilder::new(&aliases, &model, LatticeConfig::default()).unwrap();
//! let lattice = builder.build(&[10, 11, 12]);
//!
//! let path = best_path(&lattice);
//! assert_eq!(path[0].token, Token::entity(1, "iced latte"));
//! assert_eq!(path[1].token, Token::Unknown);
//! ```

mod builder;
mod config;
mod edge;
mod error;
mod lattice;
mod search;
mod token;
mod walker;

pub use builder::{AliasCandidate, AliasIndex, AliasTable, LatticeBuilder, StaticTermModel, TermModel};
pub use config::LatticeConfig;
pub use edge::{path_length, path_score, Edge, EdgeId, Exclusions};
pub use error::{LatticeError, Result};
pub use lattice::Lattice;
pub use search::{
    all_co_optimal_paths, all_co_optimal_paths_from, all_paths, all_paths_from, best_path,
    best_path_from, PathEnumeration, PathIter,
};
pub use token::{Term, Token};
pub use walker::{Walker, WalkerPaths};

pub use tokenizer_fuzzy::{AliasScore, AliasScorer, ScorerConfig};
