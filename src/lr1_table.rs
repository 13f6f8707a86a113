//! Canonical LR(1) parsing table construction.

use crate::grammar::Grammar;
use crate::item::augmented;
use crate::lr1::canonical_collection;
use crate::symbol::{Symbol, Terminal};
use crate::table::{insert_action, Action, ParsingTable};

/// Builds a canonical LR(1) parsing table for `grammar`. Same skeleton as
/// [`crate::slr1::build_slr_table`] but reduces are gated on the item's
/// own lookahead terminal rather than the whole of FOLLOW.
pub fn build_lr1_table(grammar: &Grammar) -> ParsingTable {
    let augmented_grammar = augmented(grammar);
    let automaton = canonical_collection(&augmented_grammar);

    let mut table = ParsingTable::new(automaton.states.clone());

    for (&state_id, state) in &automaton.states {
        for item in state.iter() {
            if item.is_reduce().expect("item always has a dot") {
                if item.lhs == *augmented_grammar.start_symbol()
                    && item.lookahead.contains(&Terminal::end())
                {
                    insert_action(
                        &mut table.action,
                        &augmented_grammar,
                        (state_id, Symbol::Terminal(Terminal::end())),
                        Action::Accept,
                    );
                } else if item.lhs != *augmented_grammar.start_symbol() {
                    let production = item.production().expect("item always has a dot");
                    for terminal in item.lookahead.terminals() {
                        insert_action(
                            &mut table.action,
                            &augmented_grammar,
                            (state_id, Symbol::Terminal(terminal)),
                            Action::Reduce(production.clone()),
                        );
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
