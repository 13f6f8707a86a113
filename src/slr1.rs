//! SLR(1) parsing table construction.
//!
//! Builds the LR(0) canonical collection of the augmented grammar, then
//! resolves reduces through FOLLOW sets.

use crate::first_follow::{compute_first_sets, compute_follow_sets};
use crate::grammar::Grammar;
use crate::item::augmented;
use crate::lr0::canonical_collection;
use crate::symbol::{Symbol, Terminal};
use crate::table::{insert_action, Action, ParsingTable};

/// Builds an SLR(1) parsing table for `grammar`.
pub fn build_slr_table(grammar: &Grammar) -> ParsingTable {
    let augmented_grammar = augmented(grammar);
    let automaton = canonical_collection(&augmented_grammar);

    let first_sets = compute_first_sets(&augmented_grammar);
    let follow_sets = compute_follow_sets(&augmented_grammar, &first_sets);

    let mut table = ParsingTable::new(automaton.states.clone());

    for (&state_id, state) in &automaton.states {
        let items: Vec<_> = state.iter().collect();

        for item in &items {
            if item.is_reduce().expect("item always has a dot") {
                if item.lhs == *augmented_grammar.start_symbol() {
                    insert_action(
                        &mut table.action,
                        &augmented_grammar,
                        (state_id, Symbol::Terminal(Terminal::end())),
                        Action::Accept,
                    );
                } else {
                    let production = item.production().expect("item always has a dot");
                    for symbol in follow_sets.get(&item.lhs).cloned().unwrap_or_default() {
                        if let Symbol::Terminal(t) = symbol {
                            insert_action(
                                &mut table.action,
                                &augmented_grammar,
                                (state_id, Symbol::Terminal(t)),
                                Action::Reduce(production.clone()),
                            );
                        }
                    }
                }
            } else if let Some(Symbol::Terminal(a)) = item.after_dot().expect("item always has a dot") {
                if let Some(&target) = automaton.transitions.get(&(state_id, Symbol::Terminal(a.clone()))) {
                    insert_action(
                        &mut table.action,
                        &augmented_grammar,
                        (state_id, Symbol::Terminal(a.clone())),
                        Action::Shift(target),
                    );
                }
            }
        }
    }

    for ((state_id, symbol), &target) in &automaton.transitions {
        if symbol.is_nonterminal() {
            table.goto.insert((*state_id, symbol.clone()), target);
        }
    }

    table
}
