//! Integration-level tests for the symbol module's cross-variant ordering
//! and fresh-name generation.

use cfg_tables::{build_grammar, Grammar, NonTerminal, Production, Symbol, Terminal};

fn nt(name: &str) -> NonTerminal {
    NonTerminal::new(name)
}

fn t(name: &str) -> Symbol {
    Symbol::Terminal(Terminal::new(name))
}

fn n(name: &str) -> Symbol {
    Symbol::NonTerminal(nt(name))
}

#[test]
fn terminal_sorts_before_nonterminal_before_dot_before_epsilon() {
    assert!(t("a") < n("A"));
    assert!(n("A") < Symbol::Dot);
    assert!(Symbol::Dot < Symbol::Epsilon);
}

#[test]
fn nonterminal_ordering_is_by_name_then_id() {
    let base = NonTerminal::new("A");
    let fresh = NonTerminal::with_id("A", 1);
    assert!(base < fresh);
}

#[test]
fn fresh_non_terminal_skips_ids_already_in_the_grammar() {
    let grammar: Grammar = build_grammar(
        nt("A"),
        vec![
            Production::new(nt("A"), vec![t("a")]),
            Production::new(NonTerminal::with_id("A", 1), vec![t("b")]),
        ],
    )
    .unwrap();

    let fresh = nt("A").fresh(&grammar);
    assert_eq!(fresh, NonTerminal::with_id("A", 2));
}

#[test]
fn display_renders_tick_suffix_for_generated_non_terminals() {
    assert_eq!(NonTerminal::new("A").to_string(), "A");
    assert_eq!(NonTerminal::with_id("A", 1).to_string(), "A1'");
}

#[test]
fn terminal_end_is_the_stable_sentinel() {
    let end = Terminal::end();
    assert_eq!(end.name, "$");
    assert!(end.is_end);
}
