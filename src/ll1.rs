//! LL(1) parsing table construction.

use crate::first_follow::{compute_first_sets, compute_follow_sets};
use crate::grammar::{Grammar, Production};
use crate::symbol::{NonTerminal, Symbol, Terminal};
use std::collections::{BTreeSet, HashMap};

/// The LL(1) parse table: `M[(A, t)]` holds every production of `A` whose
/// alternative can be chosen on lookahead `t`. A cell with more than one
/// production means the grammar is not LL(1); the table is returned as-is
/// so the caller can diagnose that rather than the builder erroring.
pub type Ll1Table = HashMap<(NonTerminal, Terminal), BTreeSet<Production>>;

/// Builds the LL(1) parsing table for `grammar`.
///
/// For each production `A -> alpha`: adds `A -> alpha` to `M[A, t]` for
/// every `t` in `FIRST(alpha) \ {epsilon}`, and, if `epsilon` is in
/// `FIRST(alpha)`, to `M[A, t]` for every `t` in `FOLLOW(A)`.
pub fn build_ll1_table(grammar: &Grammar) -> Ll1Table {
    let first_sets = compute_first_sets(grammar);
    let follow_sets = compute_follow_sets(grammar, &first_sets);
    let mut table: Ll1Table = HashMap::new();

    for production in grammar.all_productions() {
        let first_alpha = crate::first_follow::first_of_sequence_internal(&first_sets, &production.rhs);

        for symbol in &first_alpha {
            if let Symbol::Terminal(terminal) = symbol {
                table
                    .entry((production.lhs.clone(), terminal.clone()))
                    .or_default()
                    .insert(production.clone());
            }
        }

        if first_alpha.contains(&Symbol::Epsilon) {
            let follow_a = follow_sets.get(&production.lhs).cloned().unwrap_or_default();
            for symbol in &follow_a {
                if let Symbol::Terminal(terminal) = symbol {
                    table
                        .entry((production.lhs.clone(), terminal.clone()))
                        .or_default()
                        .insert(production.clone());
                }
            }
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Production;

    fn nt(name: &str) -> NonTerminal {
        NonTerminal::new(name)
    }

    fn t(name: &str) -> Symbol {
        Symbol::Terminal(Terminal::new(name))
    }

    fn n(name: &str) -> Symbol {
        Symbol::NonTerminal(nt(name))
    }

    /// S -> '+' S S | '*' S S | 'a'
    fn prefix_expr_grammar() -> Grammar {
        Grammar::build(
            nt("S"),
            vec![
                Production::new(nt("S"), vec![t("+"), n("S"), n("S")]),
                Production::new(nt("S"), vec![t("*"), n("S"), n("S")]),
                Production::new(nt("S"), vec![t("a")]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn every_cell_is_a_singleton_for_an_ll1_grammar() {
        let grammar = prefix_expr_grammar();
        let table = build_ll1_table(&grammar);

        assert_eq!(table.len(), 3);
        for productions in table.values() {
            assert_eq!(productions.len(), 1);
        }

        let plus_entry = &table[&(nt("S"), Terminal::new("+"))];
        assert_eq!(plus_entry.iter().next().unwrap().rhs, vec![t("+"), n("S"), n("S")]);
    }

    #[test]
    fn ambiguous_grammar_produces_multi_entry_cell() {
        // S -> a | a b   (not LL(1): both alternatives start with 'a')
        let grammar = Grammar::build(
            nt("S"),
            vec![
                Production::new(nt("S"), vec![t("a")]),
                Production::new(nt("S"), vec![t("a"), t("b")]),
            ],
        )
        .unwrap();

        let table = build_ll1_table(&grammar);
        let cell = &table[&(nt("S"), Terminal::new("a"))];
        assert_eq!(cell.len(), 2);
    }
}
