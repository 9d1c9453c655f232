use proptest::prelude::*;
use std::collections::HashSet;
use tokenizer_lattice::{
    all_co_optimal_paths, all_paths, path_score, AliasTable, Edge, Lattice, LatticeBuilder,
    LatticeConfig, StaticTermModel, Token, Walker,
};

type Signature = Vec<(Token, usize)>;

fn signature<'a>(path: impl IntoIterator<Item = &'a Edge>) -> Signature {
    path.into_iter()
        .map(|edge| (edge.token.clone(), edge.length))
        .collect()
}

fn walker_signatures(lattice: &Lattice) -> Vec<Signature> {
    Walker::enumerate(lattice.clone())
        .map(|path| signature(&path))
        .collect()
}

fn exhaustive_signatures(lattice: &Lattice) -> HashSet<Signature> {
    all_paths(lattice).iter().map(signature).collect()
}

/// Walker paths scoring as well as the best path, in walk order
fn best_scoring_walker_signatures(lattice: &Lattice) -> Vec<Signature> {
    let Some(best) = all_co_optimal_paths(lattice).best_score() else {
        return Vec::new();
    };
    Walker::enumerate(lattice.clone())
        .filter(|path| path_score(path) == best)
        .map(|path| signature(&path))
        .collect()
}

fn co_optimal_signatures(lattice: &Lattice) -> Vec<Signature> {
    all_co_optimal_paths(lattice).iter().map(signature).collect()
}

fn assert_same_paths(lattice: &Lattice) {
    let walked = walker_signatures(lattice);
    let distinct: HashSet<Signature> = walked.iter().cloned().collect();

    assert_eq!(distinct.len(), walked.len(), "walker repeated a path");
    assert_eq!(distinct, exhaustive_signatures(lattice));
}

#[test]
fn walker_matches_exhaustive_search_on_built_lattice() {
    let mut table = AliasTable::new();
    table.insert(vec![1], Token::attribute(10, "small"));
    table.insert(vec![1, 2], Token::entity(11, "small latte"));
    table.insert(vec![2], Token::entity(20, "latte"));
    table.insert(vec![2, 3], Token::entity(21, "latte macchiato"));
    table.insert(vec![3], Token::entity(30, "macchiato"));
    let model = StaticTermModel::new();
    let builder = LatticeBuilder::new(&table, &model, LatticeConfig::default()).expect("builder");

    let lattice = builder.build(&[1, 2, 3]);

    assert_same_paths(&lattice);
    // 0→1→2→3 with two choices per unit step, plus the spans:
    // 8 unit-step paths, 2 via "small latte", 2 via "latte macchiato"
    assert_eq!(walker_signatures(&lattice).len(), 12);
}

#[test]
fn walker_best_scoring_paths_match_co_optimal_search() {
    // two tied heads, one strong middle, two tied tails
    let lattice = Lattice::new(vec![
        vec![
            Edge::default_edge(),
            Edge::new(1.0, 1, Token::entity(1, "e1")),
            Edge::new(1.0, 1, Token::entity(2, "e2")),
        ],
        vec![Edge::default_edge(), Edge::new(2.0, 1, Token::entity(3, "e3"))],
        vec![
            Edge::default_edge(),
            Edge::new(1.0, 1, Token::entity(4, "e4")),
            Edge::new(1.0, 1, Token::entity(5, "e5")),
        ],
    ]);

    let walked = best_scoring_walker_signatures(&lattice);
    let expected = co_optimal_signatures(&lattice);

    assert_eq!(walked.len(), 4);
    assert_eq!(expected.len(), 4);
    assert_eq!(
        walked.iter().cloned().collect::<HashSet<_>>(),
        expected.into_iter().collect::<HashSet<_>>()
    );
    // the first walk is always a best path
    assert_eq!(walked.first(), walker_signatures(&lattice).first());
    assert_eq!(walker_signatures(&lattice).len(), 18);
}

#[test]
fn walker_leaves_lattice_reusable() {
    let lattice = Lattice::with_default_edges(3);
    let mut walker = Walker::new(lattice.clone());
    walker.advance();
    walker.discard().expect("discard");

    let restored = walker.into_lattice();
    assert_eq!(restored, lattice);
    assert_eq!(all_paths(&restored).iter().count(), 1);
}

fn arb_lattice() -> impl Strategy<Value = Lattice> {
    let edge = (0u32..4, 1usize..4, 0u32..3).prop_map(|(score, length, pid)| {
        Edge::new(score as f64, length, Token::entity(pid, format!("e{pid}")))
    });
    proptest::collection::vec(proptest::collection::vec(edge, 0..3), 0..6).prop_map(|lists| {
        let lists = lists
            .into_iter()
            .map(|mut edges| {
                edges.push(Edge::default_edge());
                edges
            })
            .collect();
        Lattice::new(lists).coalesce()
    })
}

proptest! {
    #[test]
    fn proptest_walker_enumerates_every_path_once(lattice in arb_lattice()) {
        let walked = walker_signatures(&lattice);
        let distinct: HashSet<Signature> = walked.iter().cloned().collect();

        prop_assert_eq!(distinct.len(), walked.len());
        prop_assert_eq!(distinct, exhaustive_signatures(&lattice));
    }

    #[test]
    fn proptest_walker_best_paths_equal_co_optimal_paths(lattice in arb_lattice()) {
        let walked = best_scoring_walker_signatures(&lattice);
        let expected = co_optimal_signatures(&lattice);

        prop_assert_eq!(walked.len(), expected.len());
        prop_assert_eq!(
            walked.into_iter().collect::<HashSet<_>>(),
            expected.into_iter().collect::<HashSet<_>>()
        );
    }
}
