use std::collections::HashSet;
use std::hash::Hash;

/// Edit recorded in each cell of the alignment matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Top-left origin cell
    None,
    /// Skip a query term
    DeleteA,
    /// Skip a prefix term
    DeleteB,
    /// Query and prefix terms are equal
    Match,
    /// Query term stands in for a different prefix term
    Replace,
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    cost: f64,
    step: f64,
    edit: Edit,
}

impl Cell {
    const ORIGIN: Cell = Cell {
        cost: 0.0,
        step: 0.0,
        edit: Edit::None,
    };
}

/// Outcome of aligning an alias prefix against the head of a query
#[derive(Debug, Clone)]
pub struct DiffResult<T> {
    /// Retained query terms, in query order
    pub matched: Vec<T>,

    /// Edit cost, excluding the unaligned query suffix
    pub cost: f64,

    /// Smallest query index retained through a match or replace
    pub leftmost_aligned: Option<usize>,

    /// Largest query index retained through a match or replace
    pub rightmost_aligned: Option<usize>,

    /// Number of exact matches retained
    pub alignment_count: usize,

    /// Distinct terms from retained exact matches
    pub common_terms: HashSet<T>,
}

impl<T> DiffResult<T> {
    /// Query span covered by the alignment (`rightmost_aligned + 1`)
    pub fn aligned_span(&self) -> usize {
        self.rightmost_aligned.map_or(0, |idx| idx + 1)
    }
}

/// Levenshtein-style prefix matcher with protected query terms.
///
/// Deleting or substituting a protected query term costs `protected_cost`
/// instead of 1, so such edits lose to any alignment that keeps the term.
#[derive(Debug, Clone, Copy)]
pub struct PrefixMatcher {
    protected_cost: f64,
}

impl PrefixMatcher {
    pub fn new(protected_cost: f64) -> Self {
        Self { protected_cost }
    }

    pub fn protected_cost(&self) -> f64 {
        self.protected_cost
    }

    /// Align `prefix` against the head of `query`.
    ///
    /// Callers slice `query` to the start offset they care about. Query terms
    /// past the aligned region are never charged, and trailing downstream
    /// terms are trimmed from the retained match.
    pub fn diff<T, D, P>(
        &self,
        query: &[T],
        prefix: &[T],
        is_downstream: D,
        is_protected: P,
    ) -> DiffResult<T>
    where
        T: Clone + Eq + Hash,
        D: Fn(&T) -> bool,
        P: Fn(&T) -> bool,
    {
        let cells = self.fill(query, prefix, &is_protected);
        let width = prefix.len() + 1;
        let start_row = cheapest_final_row(&cells, query.len(), width);
        backtrace(&cells, width, query, start_row, prefix.len(), &is_downstream)
    }

    fn fill<T, P>(&self, query: &[T], prefix: &[T], is_protected: &P) -> Vec<Cell>
    where
        T: Eq,
        P: Fn(&T) -> bool,
    {
        let width = prefix.len() + 1;
        let mut cells = vec![Cell::ORIGIN; (query.len() + 1) * width];

        for j in 1..width {
            cells[j] = Cell {
                cost: j as f64,
                step: 1.0,
                edit: Edit::DeleteB,
            };
        }

        for i in 1..=query.len() {
            let term = &query[i - 1];
            let penalty = if is_protected(term) {
                self.protected_cost
            } else {
                1.0
            };
            let row = i * width;
            let above = (i - 1) * width;

            cells[row] = Cell {
                cost: cells[above].cost + penalty,
                step: penalty,
                edit: Edit::DeleteA,
            };

            for j in 1..width {
                // Fill order doubles as tie policy: first candidate wins ties.
                let mut best = Cell {
                    cost: cells[above + j].cost + penalty,
                    step: penalty,
                    edit: Edit::DeleteA,
                };

                let delete_b = cells[row + j - 1].cost + 1.0;
                if delete_b < best.cost {
                    best = Cell {
                        cost: delete_b,
                        step: 1.0,
                        edit: Edit::DeleteB,
                    };
                }

                let (step, edit) = if *term == prefix[j - 1] {
                    (0.0, Edit::Match)
                } else {
                    (penalty, Edit::Replace)
                };
                let diagonal = cells[above + j - 1].cost + step;
                if diagonal < best.cost {
                    best = Cell {
                        cost: diagonal,
                        step,
                        edit,
                    };
                }

                cells[row + j] = best;
            }
        }

        cells
    }
}

impl Default for PrefixMatcher {
    fn default() -> Self {
        Self::new(crate::ScorerConfig::default().protected_cost)
    }
}

/// Row of the last column where the backtrace starts.
///
/// Rows below it are the unaligned query suffix and are free; among equal
/// costs the row consuming more of the query wins.
fn cheapest_final_row(cells: &[Cell], query_len: usize, width: usize) -> usize {
    let last = width - 1;
    let mut best_row = 0;
    for i in 1..=query_len {
        if cells[i * width + last].cost <= cells[best_row * width + last].cost {
            best_row = i;
        }
    }
    best_row
}

fn backtrace<T, D>(
    cells: &[Cell],
    width: usize,
    query: &[T],
    mut i: usize,
    mut j: usize,
    is_downstream: &D,
) -> DiffResult<T>
where
    T: Clone + Eq + Hash,
    D: Fn(&T) -> bool,
{
    let prefix_len = j;
    let mut reversed = Vec::new();
    let mut cost = 0.0;
    let mut aligned = false;
    let mut leftmost_aligned = None;
    let mut rightmost_aligned = None;
    let mut alignment_count = 0;
    let mut common_terms = HashSet::new();

    loop {
        let cell = cells[i * width + j];
        match cell.edit {
            Edit::None => break,
            Edit::DeleteA => {
                if aligned {
                    cost += cell.step;
                    if !reversed.is_empty() {
                        reversed.push(query[i - 1].clone());
                    }
                }
                i -= 1;
            }
            Edit::DeleteB => {
                cost += cell.step;
                j -= 1;
            }
            Edit::Match | Edit::Replace => {
                aligned = true;
                cost += cell.step;

                let term = &query[i - 1];
                // a match on the last prefix term completes the alias
                let completes_prefix = cell.edit == Edit::Match && j == prefix_len;
                if !reversed.is_empty() || completes_prefix || !is_downstream(term) {
                    reversed.push(term.clone());
                    leftmost_aligned = Some(i - 1);
                    rightmost_aligned.get_or_insert(i - 1);
                    if cell.edit == Edit::Match {
                        alignment_count += 1;
                        common_terms.insert(term.clone());
                    }
                }

                i -= 1;
                j -= 1;
            }
        }
    }

    reversed.reverse();
    DiffResult {
        matched: reversed,
        cost,
        leftmost_aligned,
        rightmost_aligned,
        alignment_count,
        common_terms,
    }
}
