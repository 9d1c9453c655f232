use crate::token::Token;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Scored transition from a vertex to `vertex + length`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub score: f64,
    pub length: usize,
    pub token: Token,
}

impl Edge {
    pub fn new(score: f64, length: usize, token: Token) -> Self {
        Self {
            score,
            length,
            token,
        }
    }

    /// Length 1, score 0, unknown token: keeps every vertex connected
    pub fn default_edge() -> Self {
        Self::new(0.0, 1, Token::Unknown)
    }
}

/// Position of an edge inside a lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId {
    /// Vertex the edge starts at
    pub vertex: usize,

    /// Index in that vertex's edge list
    pub index: usize,
}

impl EdgeId {
    pub fn new(vertex: usize, index: usize) -> Self {
        Self { vertex, index }
    }
}

/// Edges a search must ignore.
///
/// Kept outside the lattice so the lattice itself is never mutated by
/// exploratory traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exclusions {
    edges: HashSet<EdgeId>,
}

impl Exclusions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: EdgeId) -> bool {
        self.edges.insert(id)
    }

    pub fn contains(&self, id: EdgeId) -> bool {
        self.edges.contains(&id)
    }

    /// Drop every exclusion on edges leaving `vertex`
    pub fn clear_vertex(&mut self, vertex: usize) {
        self.edges.retain(|id| id.vertex != vertex);
    }

    pub fn clear(&mut self) {
        self.edges.clear();
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Summed score of a path
pub fn path_score<'a>(path: impl IntoIterator<Item = &'a Edge>) -> f64 {
    path.into_iter().map(|edge| edge.score).sum()
}

/// Summed length of a path (the final vertex for a complete path)
pub fn path_length<'a>(path: impl IntoIterator<Item = &'a Edge>) -> usize {
    path.into_iter().map(|edge| edge.length).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_vertex_only_touches_that_vertex() {
        let mut exclusions = Exclusions::new();
        exclusions.insert(EdgeId::new(0, 1));
        exclusions.insert(EdgeId::new(2, 0));
        exclusions.insert(EdgeId::new(2, 3));

        exclusions.clear_vertex(2);

        assert_eq!(exclusions.len(), 1);
        assert!(exclusions.contains(EdgeId::new(0, 1)));
        assert!(!exclusions.contains(EdgeId::new(2, 0)));
    }

    #[test]
    fn test_path_totals() {
        let edges = [
            Edge::new(1.5, 2, Token::entity(1, "latte")),
            Edge::default_edge(),
        ];
        assert_eq!(path_score(&edges), 1.5);
        assert_eq!(path_length(&edges), 3);
        assert_eq!(path_score(edges.iter()), 1.5);
    }
}
