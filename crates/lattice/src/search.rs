//! Path search over a [`Lattice`].
//!
//! All searches run a forward pass in vertex order, which is a topological
//! order because every edge moves forward. Edges that would overshoot the
//! final vertex are ignored, and so are edges listed in the caller's
//! [`Exclusions`].

use crate::edge::{Edge, EdgeId, Exclusions};
use crate::error::{LatticeError, Result};
use crate::lattice::Lattice;
use std::rc::Rc;

/// Highest-scoring path from vertex 0 to the final vertex.
///
/// Ties go to the first edge seen in vertex and edge-list order. Returns an
/// empty path when the final vertex is unreachable.
pub fn best_path(lattice: &Lattice) -> Vec<&Edge> {
    find_best(lattice, 0, &Exclusions::new())
        .map(|ids| ids.into_iter().filter_map(|id| lattice.edge(id)).collect())
        .unwrap_or_default()
}

/// Highest-scoring path from `start` to the final vertex, skipping excluded
/// edges. `Ok(None)` means no route exists.
pub fn best_path_from(
    lattice: &Lattice,
    start: usize,
    exclusions: &Exclusions,
) -> Result<Option<Vec<EdgeId>>> {
    check_vertex(lattice, start)?;
    Ok(find_best(lattice, start, exclusions))
}

/// Every path whose score equals the best score, enumerated lazily
pub fn all_co_optimal_paths(lattice: &Lattice) -> PathEnumeration<'_> {
    PathEnumeration::build(lattice, 0, &Exclusions::new(), Mode::CoOptimal)
}

pub fn all_co_optimal_paths_from<'a>(
    lattice: &'a Lattice,
    start: usize,
    exclusions: &Exclusions,
) -> Result<PathEnumeration<'a>> {
    check_vertex(lattice, start)?;
    Ok(PathEnumeration::build(lattice, start, exclusions, Mode::CoOptimal))
}

/// Every structurally distinct path regardless of score, enumerated lazily
pub fn all_paths(lattice: &Lattice) -> PathEnumeration<'_> {
    PathEnumeration::build(lattice, 0, &Exclusions::new(), Mode::Exhaustive)
}

pub fn all_paths_from<'a>(
    lattice: &'a Lattice,
    start: usize,
    exclusions: &Exclusions,
) -> Result<PathEnumeration<'a>> {
    check_vertex(lattice, start)?;
    Ok(PathEnumeration::build(lattice, start, exclusions, Mode::Exhaustive))
}

fn check_vertex(lattice: &Lattice, vertex: usize) -> Result<()> {
    if vertex > lattice.final_vertex() {
        return Err(LatticeError::InvalidVertex {
            vertex,
            final_vertex: lattice.final_vertex(),
        });
    }
    Ok(())
}

/// Vertex reached by `edge` leaving `vertex`, if it stays in bounds
fn edge_target(vertex: usize, edge: &Edge, final_vertex: usize) -> Option<usize> {
    if edge.length == 0 {
        return None;
    }
    let target = vertex + edge.length;
    (target <= final_vertex).then_some(target)
}

/// Outgoing edges of `vertex` that are neither excluded nor overshooting
fn usable_edges<'a>(
    lattice: &'a Lattice,
    vertex: usize,
    exclusions: &'a Exclusions,
) -> impl Iterator<Item = (EdgeId, &'a Edge, usize)> + 'a {
    let final_vertex = lattice.final_vertex();
    lattice
        .edges_at(vertex)
        .iter()
        .enumerate()
        .filter_map(move |(index, edge)| {
            let id = EdgeId::new(vertex, index);
            if exclusions.contains(id) {
                return None;
            }
            edge_target(vertex, edge, final_vertex).map(|target| (id, edge, target))
        })
}

pub(crate) fn find_best(lattice: &Lattice, start: usize, exclusions: &Exclusions) -> Option<Vec<EdgeId>> {
    let final_vertex = lattice.final_vertex();
    if start > final_vertex {
        return None;
    }

    let mut scores = vec![f64::NEG_INFINITY; final_vertex + 1];
    let mut back: Vec<Option<EdgeId>> = vec![None; final_vertex + 1];
    scores[start] = 0.0;

    for vertex in start..final_vertex {
        let base = scores[vertex];
        if base == f64::NEG_INFINITY {
            continue;
        }
        for (id, edge, target) in usable_edges(lattice, vertex, exclusions) {
            let candidate = base + edge.score;
            if candidate > scores[target] {
                scores[target] = candidate;
                back[target] = Some(id);
            }
        }
    }

    if scores[final_vertex] == f64::NEG_INFINITY {
        return None;
    }

    let mut path = Vec::new();
    let mut vertex = final_vertex;
    while vertex != start {
        let id = back[vertex]?;
        path.push(id);
        vertex = id.vertex;
    }
    path.reverse();
    Some(path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Keep only links achieving the best score into each vertex
    CoOptimal,
    /// Keep every link regardless of score
    Exhaustive,
}

#[derive(Debug, Clone, Copy)]
struct BackLink {
    predecessor: usize,
    edge: EdgeId,
}

#[derive(Debug, Clone)]
struct SearchVertex {
    best_score: f64,
    reached: bool,
    links: Vec<BackLink>,
}

impl SearchVertex {
    fn unreached() -> Self {
        Self {
            best_score: f64::NEG_INFINITY,
            reached: false,
            links: Vec::new(),
        }
    }

    /// At most one link per `(predecessor, token)` pair
    fn has_link(&self, lattice: &Lattice, predecessor: usize, edge: &Edge) -> bool {
        self.links.iter().any(|link| {
            link.predecessor == predecessor
                && lattice
                    .edge(link.edge)
                    .map_or(false, |linked| linked.token == edge.token)
        })
    }
}

/// Backlink graph from one search, ready to enumerate paths.
///
/// Each call to [`PathEnumeration::iter`] starts a fresh lazy walk, so the
/// enumeration can be restarted or abandoned at any point.
#[derive(Debug, Clone)]
pub struct PathEnumeration<'a> {
    lattice: &'a Lattice,
    start: usize,
    vertices: Rc<[SearchVertex]>,
}

impl<'a> PathEnumeration<'a> {
    fn build(lattice: &'a Lattice, start: usize, exclusions: &Exclusions, mode: Mode) -> Self {
        let final_vertex = lattice.final_vertex();
        let mut vertices = vec![SearchVertex::unreached(); final_vertex + 1];
        vertices[start].best_score = 0.0;
        vertices[start].reached = true;

        for vertex in start..final_vertex {
            if !vertices[vertex].reached {
                continue;
            }
            let base = vertices[vertex].best_score;
            for (id, edge, target) in usable_edges(lattice, vertex, exclusions) {
                let candidate = base + edge.score;
                let link = BackLink {
                    predecessor: vertex,
                    edge: id,
                };
                let next = &mut vertices[target];
                match mode {
                    Mode::CoOptimal => {
                        if candidate == f64::NEG_INFINITY {
                            continue;
                        }
                        if candidate > next.best_score {
                            next.best_score = candidate;
                            next.links.clear();
                            next.links.push(link);
                            next.reached = true;
                        } else if candidate == next.best_score
                            && !next.has_link(lattice, vertex, edge)
                        {
                            next.links.push(link);
                        }
                    }
                    Mode::Exhaustive => {
                        if candidate > next.best_score {
                            next.best_score = candidate;
                        }
                        if !next.has_link(lattice, vertex, edge) {
                            next.links.push(link);
                        }
                        next.reached = true;
                    }
                }
            }
        }

        log::debug!(
            "{:?} search from vertex {}: final vertex {} {}, {} backlinks",
            mode,
            start,
            final_vertex,
            if vertices[final_vertex].reached {
                "reached"
            } else {
                "unreachable"
            },
            vertices.iter().map(|v| v.links.len()).sum::<usize>()
        );

        Self {
            lattice,
            start,
            vertices: vertices.into(),
        }
    }

    /// Whether any path reaches the final vertex
    pub fn is_reachable(&self) -> bool {
        self.final_state().reached
    }

    /// Best score at the final vertex, if reachable
    pub fn best_score(&self) -> Option<f64> {
        let state = self.final_state();
        state.reached.then_some(state.best_score)
    }

    pub fn iter(&self) -> PathIter<'a> {
        let final_vertex = self.lattice.final_vertex();
        let stack = if self.is_reachable() {
            vec![Frame {
                vertex: final_vertex,
                cursor: 0,
            }]
        } else {
            Vec::new()
        };
        PathIter {
            lattice: self.lattice,
            vertices: Rc::clone(&self.vertices),
            start: self.start,
            stack,
            chosen: Vec::new(),
        }
    }

    fn final_state(&self) -> &SearchVertex {
        &self.vertices[self.lattice.final_vertex()]
    }
}

impl<'a> IntoIterator for PathEnumeration<'a> {
    type Item = Vec<&'a Edge>;
    type IntoIter = PathIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &PathEnumeration<'a> {
    type Item = Vec<&'a Edge>;
    type IntoIter = PathIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    vertex: usize,
    cursor: usize,
}

/// Lazy backtrace over a [`PathEnumeration`].
///
/// Walks backlinks from the final vertex with an explicit stack; each frame
/// remembers which incoming link it tries next, so paths come out in a fixed
/// order determined by the lattice's edge order.
#[derive(Debug, Clone)]
pub struct PathIter<'a> {
    lattice: &'a Lattice,
    vertices: Rc<[SearchVertex]>,
    start: usize,
    stack: Vec<Frame>,
    chosen: Vec<EdgeId>,
}

impl<'a> PathIter<'a> {
    fn pop_frame(&mut self) {
        self.stack.pop();
        if !self.stack.is_empty() {
            self.chosen.pop();
        }
    }
}

impl<'a> Iterator for PathIter<'a> {
    type Item = Vec<&'a Edge>;

    fn next(&mut self) -> Option<Self::Item> {
        let lattice = self.lattice;
        loop {
            let frame = *self.stack.last()?;

            if frame.vertex == self.start {
                let path = self
                    .chosen
                    .iter()
                    .rev()
                    .filter_map(|id| lattice.edge(*id))
                    .collect();
                self.pop_frame();
                return Some(path);
            }

            match self.vertices[frame.vertex].links.get(frame.cursor).copied() {
                Some(link) => {
                    if let Some(top) = self.stack.last_mut() {
                        top.cursor += 1;
                    }
                    self.chosen.push(link.edge);
                    self.stack.push(Frame {
                        vertex: link.predecessor,
                        cursor: 0,
                    });
                }
                None => self.pop_frame(),
            }
        }
    }
}
