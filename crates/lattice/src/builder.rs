use crate::config::LatticeConfig;
use crate::edge::Edge;
use crate::error::Result;
use crate::lattice::Lattice;
use crate::token::{Term, Token};
use std::collections::{HashMap, HashSet};
use tokenizer_fuzzy::AliasScorer;

/// Alias phrase that stands for a token
#[derive(Debug, Clone, PartialEq)]
pub struct AliasCandidate {
    pub terms: Vec<Term>,
    pub token: Token,
}

/// Source of aliases that could start at the head of a query
pub trait AliasIndex {
    /// Candidates whose first term equals `query[0]`
    fn candidates(&self, query: &[Term]) -> Vec<AliasCandidate>;
}

/// Classifies terms for the fuzzy matcher
pub trait TermModel {
    /// Low-information terms such as connectives
    fn is_downstream(&self, term: Term) -> bool;

    /// Terms that may never be skipped or substituted
    fn is_protected(&self, term: Term) -> bool;
}

/// In-memory alias index keyed by first term
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    by_first_term: HashMap<Term, Vec<AliasCandidate>>,
    len: usize,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an alias. Empty aliases are ignored.
    pub fn insert(&mut self, terms: Vec<Term>, token: Token) {
        let Some(&first) = terms.first() else {
            return;
        };
        self.by_first_term
            .entry(first)
            .or_default()
            .push(AliasCandidate { terms, token });
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AliasIndex for AliasTable {
    fn candidates(&self, query: &[Term]) -> Vec<AliasCandidate> {
        query
            .first()
            .and_then(|term| self.by_first_term.get(term))
            .cloned()
            .unwrap_or_default()
    }
}

/// Term model backed by explicit term sets
#[derive(Debug, Clone, Default)]
pub struct StaticTermModel {
    downstream: HashSet<Term>,
    protected: HashSet<Term>,
}

impl StaticTermModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_downstream(mut self, terms: impl IntoIterator<Item = Term>) -> Self {
        self.downstream.extend(terms);
        self
    }

    pub fn with_protected(mut self, terms: impl IntoIterator<Item = Term>) -> Self {
        self.protected.extend(terms);
        self
    }
}

impl TermModel for StaticTermModel {
    fn is_downstream(&self, term: Term) -> bool {
        self.downstream.contains(&term)
    }

    fn is_protected(&self, term: Term) -> bool {
        self.protected.contains(&term)
    }
}

/// Builds a lattice for one query from fuzzy alias matches
pub struct LatticeBuilder<'a, I, M> {
    index: &'a I,
    model: &'a M,
    scorer: AliasScorer,
    config: LatticeConfig,
}

impl<'a, I: AliasIndex, M: TermModel> LatticeBuilder<'a, I, M> {
    pub fn new(index: &'a I, model: &'a M, config: LatticeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            index,
            model,
            scorer: AliasScorer::new(config.scorer)?,
            config,
        })
    }

    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    /// One default edge per vertex plus one edge per accepted alias match
    pub fn build(&self, terms: &[Term]) -> Lattice {
        let mut lists = Vec::with_capacity(terms.len());
        let mut accepted = 0usize;

        for vertex in 0..terms.len() {
            let query = &terms[vertex..];
            let mut edges = vec![Edge::default_edge()];

            for candidate in self.index.candidates(query) {
                let result = self.scorer.score(
                    query,
                    &candidate.terms,
                    |term: &Term| self.model.is_downstream(*term),
                    |term: &Term| self.model.is_protected(*term),
                );
                if self.scorer.accepts(&result) {
                    log::trace!(
                        "vertex {vertex}: {} score={:.3} length={}",
                        candidate.token,
                        result.score,
                        result.matched_length
                    );
                    edges.push(Edge::new(result.score, result.matched_length, candidate.token));
                    accepted += 1;
                } else {
                    log::trace!("vertex {vertex}: {} rejected", candidate.token);
                }
            }

            lists.push(edges);
        }

        let mut lattice = Lattice::new(lists);
        if self.config.coalesce {
            lattice = lattice.coalesce();
        }
        if let Some(threshold) = self.config.min_edge_score {
            lattice = lattice.filter(threshold);
        }

        log::debug!(
            "built lattice over {} terms: {} alias edges accepted, {} edges kept",
            terms.len(),
            accepted,
            lattice.edge_count()
        );
        lattice
    }
}
