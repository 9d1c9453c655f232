use crate::edge::{Edge, EdgeId};
use crate::error::{LatticeError, Result};
use crate::token::Token;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Outgoing edge lists indexed by vertex.
///
/// For N input terms there are N + 1 lists and the list at the final vertex
/// is empty. Every edge moves strictly forward, so the graph is acyclic.
/// Deserialized lattices go through [`Lattice::from_vertex_lists`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLattice")]
pub struct Lattice {
    edges: Vec<Vec<Edge>>,
}

#[derive(Deserialize)]
struct RawLattice {
    edges: Vec<Vec<Edge>>,
}

impl TryFrom<RawLattice> for Lattice {
    type Error = LatticeError;

    fn try_from(raw: RawLattice) -> Result<Self> {
        Self::from_vertex_lists(raw.edges)
    }
}

impl Lattice {
    /// Lattice from one edge list per input term; the empty final list is
    /// always appended
    pub fn new(term_edges: Vec<Vec<Edge>>) -> Self {
        let mut edges = term_edges;
        edges.push(Vec::new());
        Self { edges }
    }

    /// Lattice from all N + 1 vertex lists, final list included
    pub fn from_vertex_lists(edges: Vec<Vec<Edge>>) -> Result<Self> {
        match edges.last() {
            None => Err(LatticeError::malformed("no final vertex")),
            Some(last) if !last.is_empty() => Err(LatticeError::malformed(format!(
                "final vertex {} has {} outgoing edges",
                edges.len() - 1,
                last.len()
            ))),
            Some(_) => Ok(Self { edges }),
        }
    }

    /// Lattice over `term_count` terms carrying only default edges
    pub fn with_default_edges(term_count: usize) -> Self {
        let mut edges: Vec<Vec<Edge>> = (0..term_count).map(|_| vec![Edge::default_edge()]).collect();
        edges.push(Vec::new());
        Self { edges }
    }

    pub fn final_vertex(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn vertex_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges_at(&self, vertex: usize) -> &[Edge] {
        self.edges.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.vertex)?.get(id.index)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    /// Iterate `(vertex, edges)` pairs in vertex order
    pub fn vertices(&self) -> impl Iterator<Item = (usize, &[Edge])> {
        self.edges
            .iter()
            .enumerate()
            .map(|(vertex, edges)| (vertex, edges.as_slice()))
    }

    /// Whether every non-final vertex has an outgoing edge that stays in bounds
    pub fn is_connected(&self) -> bool {
        let final_vertex = self.final_vertex();
        self.edges[..final_vertex].iter().enumerate().all(|(vertex, edges)| {
            edges
                .iter()
                .any(|edge| edge.length >= 1 && vertex + edge.length <= final_vertex)
        })
    }

    /// Keep the best edge per `(token, length)` at each vertex, sorted by
    /// descending score
    pub fn coalesce(&self) -> Lattice {
        let edges = self
            .edges
            .iter()
            .map(|edges| {
                let mut kept: Vec<Edge> = Vec::with_capacity(edges.len());
                let mut slots: HashMap<(&Token, usize), usize> = HashMap::new();
                for edge in edges {
                    match slots.get(&(&edge.token, edge.length)) {
                        Some(&slot) => {
                            if edge.score > kept[slot].score {
                                kept[slot] = edge.clone();
                            }
                        }
                        None => {
                            slots.insert((&edge.token, edge.length), kept.len());
                            kept.push(edge.clone());
                        }
                    }
                }
                sort_descending(&mut kept);
                kept
            })
            .collect();
        Lattice { edges }
    }

    /// Drop edges scoring below `threshold`; unknown-token edges always stay
    pub fn filter(&self, threshold: f64) -> Lattice {
        let edges = self
            .edges
            .iter()
            .map(|edges| {
                let mut kept: Vec<Edge> = edges
                    .iter()
                    .filter(|edge| edge.token.is_unknown() || edge.score >= threshold)
                    .cloned()
                    .collect();
                sort_descending(&mut kept);
                kept
            })
            .collect();
        Lattice { edges }
    }
}

fn sort_descending(edges: &mut [Edge]) {
    edges.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}
