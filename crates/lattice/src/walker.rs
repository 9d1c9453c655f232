//! Resumable depth-first exploration of a lattice.
//!
//! A [`Walker`] keeps the edges committed so far (`left`), the best
//! completion from the current vertex (`right`) and a private set of
//! discarded edges. Discarding the head of `right` and backing up with
//! `retreat(true)` walks every tokenization without rebuilding the lattice.

use crate::edge::{Edge, EdgeId, Exclusions};
use crate::error::{LatticeError, Result};
use crate::lattice::Lattice;
use crate::search::find_best;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct Walker {
    lattice: Lattice,
    exclusions: Exclusions,
    left: Vec<EdgeId>,
    right: VecDeque<EdgeId>,
    vertex: usize,
    // One marker per visited vertex, starting with the root
    checkpoints: Vec<bool>,
}

impl Walker {
    pub fn new(lattice: Lattice) -> Self {
        let right = find_best(&lattice, 0, &Exclusions::new())
            .unwrap_or_default()
            .into();
        Self {
            lattice,
            exclusions: Exclusions::new(),
            left: Vec::new(),
            right,
            vertex: 0,
            checkpoints: vec![false],
        }
    }

    /// Walk every path reachable by discard-and-backtrack, depth first
    pub fn enumerate(lattice: Lattice) -> WalkerPaths {
        WalkerPaths {
            walker: Self::new(lattice),
            exhausted: false,
        }
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn into_lattice(self) -> Lattice {
        self.lattice
    }

    pub fn current_vertex(&self) -> usize {
        self.vertex
    }

    pub fn complete(&self) -> bool {
        self.vertex == self.lattice.final_vertex()
    }

    pub fn left_path(&self) -> Vec<&Edge> {
        self.resolve(self.left.iter())
    }

    pub fn right_path(&self) -> Vec<&Edge> {
        self.resolve(self.right.iter())
    }

    /// Committed edges followed by the current best completion
    pub fn path(&self) -> Vec<&Edge> {
        self.resolve(self.left.iter().chain(self.right.iter()))
    }

    /// Commit the first edge of the right path. Returns false when there is
    /// nothing left to commit.
    pub fn advance(&mut self) -> bool {
        let Some(id) = self.right.pop_front() else {
            return false;
        };
        let length = self.lattice.edge(id).map_or(0, |edge| edge.length);
        self.left.push(id);
        self.vertex += length;
        self.checkpoints.push(false);
        log::trace!("advance {} -> {}", id.vertex, self.vertex);
        true
    }

    /// Give back the last committed edge.
    ///
    /// With `reset`, discards made at the vertex being left are forgotten and
    /// the right path is recomputed from the new current vertex.
    pub fn retreat(&mut self, reset: bool) -> Result<()> {
        if self.left.is_empty() {
            return Err(LatticeError::empty_path("retreat"));
        }
        self.step_back(reset);
        Ok(())
    }

    /// Exclude the first edge of the right path and search again.
    ///
    /// Returns `Ok(false)` when no path is left from the current vertex.
    pub fn discard(&mut self) -> Result<bool> {
        let Some(&id) = self.right.front() else {
            return Err(LatticeError::NothingToDiscard {
                vertex: self.vertex,
            });
        };
        self.exclusions.insert(id);
        self.recompute();
        log::trace!(
            "discard edge {}/{}: {}",
            id.vertex,
            id.index,
            if self.right.is_empty() {
                "exhausted"
            } else {
                "alternative found"
            }
        );
        Ok(!self.right.is_empty())
    }

    /// Mark the current vertex as a restore point
    pub fn checkpoint(&mut self) {
        if let Some(marker) = self.checkpoints.last_mut() {
            *marker = true;
        }
    }

    /// Retreat until the most recent checkpoint (or the root) is reached
    pub fn restore(&mut self, reset: bool) -> Result<()> {
        if self.left.is_empty() {
            return Err(LatticeError::empty_path("restore"));
        }
        while !self.checkpoints.last().copied().unwrap_or(true) && !self.left.is_empty() {
            self.step_back(reset);
        }
        self.recompute();
        log::trace!("restored to vertex {}", self.vertex);
        Ok(())
    }

    fn step_back(&mut self, reset: bool) {
        let Some(id) = self.left.pop() else {
            return;
        };
        let leaving = self.vertex;
        self.vertex = id.vertex;
        self.right.push_front(id);
        self.checkpoints.pop();
        if reset {
            self.exclusions.clear_vertex(leaving);
            self.recompute();
        }
        log::trace!("retreat {} -> {}", leaving, self.vertex);
    }

    fn recompute(&mut self) {
        self.right = find_best(&self.lattice, self.vertex, &self.exclusions)
            .unwrap_or_default()
            .into();
    }

    fn resolve<'a>(&self, ids: impl Iterator<Item = &'a EdgeId>) -> Vec<&Edge> {
        ids.filter_map(|id| self.lattice.edge(*id)).collect()
    }
}

/// Paths produced by driving a [`Walker`] through advance, retreat and
/// discard. Yields owned edges since the walker keeps changing.
#[derive(Debug, Clone)]
pub struct WalkerPaths {
    walker: Walker,
    exhausted: bool,
}

impl WalkerPaths {
    /// Back up to the nearest vertex that still has an untried edge
    fn backtrack(&mut self) -> bool {
        while !self.walker.left.is_empty() {
            self.walker.step_back(true);
            match self.walker.discard() {
                Ok(true) => return true,
                Ok(false) => continue,
                Err(_) => return false,
            }
        }
        false
    }
}

impl Iterator for WalkerPaths {
    type Item = Vec<Edge>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        while self.walker.advance() {}
        if !self.walker.complete() {
            self.exhausted = true;
            return None;
        }

        let path = self.walker.left_path().into_iter().cloned().collect();
        if !self.backtrack() {
            self.exhausted = true;
        }
        Some(path)
    }
}
