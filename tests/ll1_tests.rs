//! Integration-level tests for LL(1) table construction and the predictive
//! driver built on top of it.

use cfg_tables::{build_grammar, build_ll1_table, Ll1Driver, NonTerminal, Production, Symbol, Terminal};

fn nt(name: &str) -> NonTerminal {
    NonTerminal::new(name)
}

fn t(name: &str) -> Symbol {
    Symbol::Terminal(Terminal::new(name))
}

fn n(name: &str) -> Symbol {
    Symbol::NonTerminal(nt(name))
}

fn term(name: &str) -> Terminal {
    Terminal::new(name)
}

/// S -> A B ; A -> a A | d ; B -> b B c | e
fn indirect_grammar() -> cfg_tables::Grammar {
    build_grammar(
        nt("S"),
        vec![
            Production::new(nt("S"), vec![n("A"), n("B")]),
            Production::new(nt("A"), vec![t("a"), n("A")]),
            Production::new(nt("A"), vec![t("d")]),
            Production::new(nt("B"), vec![t("b"), n("B"), t("c")]),
            Production::new(nt("B"), vec![t("e")]),
        ],
    )
    .unwrap()
}

#[test]
fn ll1_table_accepts_valid_strings() {
    let grammar = indirect_grammar();
    let table = build_ll1_table(&grammar);
    let driver = Ll1Driver::new(&table, grammar.start_symbol());

    assert!(driver.parse(&[term("d"), term("e")]).is_ok());
    assert!(driver.parse(&[term("a"), term("d"), term("b"), term("e"), term("c")]).is_ok());
}

#[test]
fn ll1_table_rejects_invalid_strings() {
    let grammar = indirect_grammar();
    let table = build_ll1_table(&grammar);
    let driver = Ll1Driver::new(&table, grammar.start_symbol());

    assert!(driver.parse(&[term("a")]).is_err());
    assert!(driver.parse(&[term("b")]).is_err());
    assert!(driver.parse(&[term("d"), term("d")]).is_err());
}

#[test]
fn left_recursive_grammar_is_not_ll1() {
    // S -> S a | b
    let grammar = build_grammar(
        nt("S"),
        vec![
            Production::new(nt("S"), vec![n("S"), t("a")]),
            Production::new(nt("S"), vec![t("b")]),
        ],
    )
    .unwrap();

    let table = build_ll1_table(&grammar);
    assert!(
        table.values().any(|productions| productions.len() > 1),
        "directly left-recursive grammar should produce a multi-valued table cell"
    );
}

#[test]
fn epsilon_production_is_predicted_through_follow() {
    // S -> A ; A -> a | epsilon
    let grammar = build_grammar(
        nt("S"),
        vec![
            Production::new(nt("S"), vec![n("A")]),
            Production::new(nt("A"), vec![t("a")]),
            Production::new(nt("A"), vec![Symbol::Epsilon]),
        ],
    )
    .unwrap();

    let table = build_ll1_table(&grammar);
    let driver = Ll1Driver::new(&table, grammar.start_symbol());

    assert!(driver.parse(&[term("a")]).is_ok());
    assert!(driver.parse(&[]).is_ok());
}
