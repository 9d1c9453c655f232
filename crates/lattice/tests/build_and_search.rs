use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;
use tokenizer_lattice::{
    all_co_optimal_paths, best_path, path_score, AliasTable, Edge, LatticeBuilder, LatticeConfig,
    LatticeError, StaticTermModel, Term, Token,
};

const SMALL: Term = 1;
const LATTE: Term = 2;
const WITH: Term = 3;
const OAT: Term = 4;
const MILK: Term = 5;
const ICED: Term = 7;
const HOT: Term = 9;

fn aliases() -> AliasTable {
    let mut table = AliasTable::new();
    table.insert(vec![SMALL], Token::attribute(10, "small"));
    table.insert(vec![LATTE], Token::entity(20, "latte"));
    table.insert(vec![ICED, LATTE], Token::entity(21, "iced latte"));
    table.insert(vec![OAT, MILK], Token::attribute(30, "oat milk"));
    table
}

fn tokens(path: &[&Edge]) -> Vec<Token> {
    path.iter().map(|edge| edge.token.clone()).collect()
}

#[test]
fn exact_aliases_form_the_best_path() {
    let table = aliases();
    let model = StaticTermModel::new().with_downstream([WITH]);
    let builder = LatticeBuilder::new(&table, &model, LatticeConfig::default()).expect("builder");

    let lattice = builder.build(&[SMALL, LATTE, WITH, OAT, MILK]);
    let path = best_path(&lattice);

    assert_eq!(
        tokens(&path),
        vec![
            Token::attribute(10, "small"),
            Token::entity(20, "latte"),
            Token::Unknown,
            Token::attribute(30, "oat milk"),
        ]
    );
    assert_eq!(path_score(path.iter().copied()), 4.0);
    assert_eq!(all_co_optimal_paths(&lattice).iter().count(), 1);
}

#[test]
fn fuzzy_alias_spans_an_unknown_word() {
    let table = aliases();
    let model = StaticTermModel::new();
    let builder = LatticeBuilder::new(&table, &model, LatticeConfig::default()).expect("builder");

    let lattice = builder.build(&[ICED, HOT, LATTE]);
    let path = best_path(&lattice);

    assert_eq!(tokens(&path), vec![Token::entity(21, "iced latte")]);
    assert!((path[0].score - 4.0 / 3.0).abs() < 1e-9);
    assert_eq!(path[0].length, 3);
}

#[test]
fn protected_term_is_not_swallowed() {
    let table = aliases();
    let model = StaticTermModel::new().with_protected([HOT]);
    let builder = LatticeBuilder::new(&table, &model, LatticeConfig::default()).expect("builder");

    let lattice = builder.build(&[ICED, HOT, LATTE]);
    let path = best_path(&lattice);

    assert_eq!(
        tokens(&path),
        vec![
            Token::entity(21, "iced latte"),
            Token::Unknown,
            Token::entity(20, "latte"),
        ]
    );
    assert_eq!(path[0].length, 1);
    assert!((path[0].score - 0.5).abs() < 1e-9);
}

#[test]
fn config_file_threshold_filters_weak_edges() {
    let temp = TempDir::new().expect("tempdir");
    let config_path = temp.path().join("lattice.toml");
    fs::write(
        &config_path,
        r#"
coalesce = true
min_edge_score = 0.75

[scorer]
min_score = 0.05
"#,
    )
    .expect("write config");

    let config = LatticeConfig::load(&config_path).expect("load config");
    let table = aliases();
    let model = StaticTermModel::new().with_protected([HOT]);
    let builder = LatticeBuilder::new(&table, &model, config).expect("builder");

    let lattice = builder.build(&[ICED, HOT, LATTE]);

    assert_eq!(lattice.edges_at(0), &[Edge::default_edge()]);
    assert_eq!(
        tokens(&best_path(&lattice)),
        vec![Token::Unknown, Token::Unknown, Token::entity(20, "latte")]
    );
}

#[test]
fn invalid_config_file_is_reported() {
    let temp = TempDir::new().expect("tempdir");
    let config_path = temp.path().join("lattice.toml");
    fs::write(&config_path, "[scorer]\nno_match_score = 1.0\n").expect("write config");

    let err = LatticeConfig::load(&config_path).expect_err("invalid config");
    assert!(format!("{err:#}").contains("no_match_score"));

    assert!(LatticeConfig::load(temp.path().join("missing.toml")).is_err());
}

#[test]
fn builder_rejects_invalid_scorer_config() {
    let table = aliases();
    let model = StaticTermModel::new();
    let mut config = LatticeConfig::default();
    config.scorer.protected_cost = 0.0;

    let result = LatticeBuilder::new(&table, &model, config);

    assert!(matches!(result, Err(LatticeError::Fuzzy(_))));
}
