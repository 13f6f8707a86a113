//! LR(1) automaton construction: CLOSURE, GOTO, and the canonical
//! collection with single-terminal lookahead.

use crate::first_follow::{compute_first_sets, first_of_sequence_internal, FirstSets};
use crate::grammar::Grammar;
use crate::item::{augmented, FrozenItemSet, Item, ItemSet, Lookahead};
use crate::symbol::{Symbol, Terminal};
use std::collections::{HashMap, VecDeque};

/// Computes CLOSURE(I) for LR(1) items: for every item
/// `[A -> alpha . B beta, a]` with `B` non-terminal and every production
/// `B -> gamma`, adds `[B -> . gamma, b]` for each `b` in `FIRST(beta a)`.
pub fn closure(grammar: &Grammar, first_sets: &FirstSets, items: &ItemSet) -> ItemSet {
    let mut result = items.clone();
    let mut worklist: Vec<Item> = items.iter().cloned().collect();

    while let Some(item) = worklist.pop() {
        let Some(Symbol::NonTerminal(b)) = item.after_dot().expect("item always has a dot") else {
            continue;
        };

        let beta = item.beta().expect("item always has a dot");
        let tail = &beta[1..];

        for lookahead in item.lookahead.terminals() {
            let mut sequence: Vec<Symbol> = tail.to_vec();
            sequence.push(Symbol::Terminal(lookahead));
            let propagated = first_of_sequence_internal(first_sets, &sequence);

            for production in grammar.productions_from(b) {
                for symbol in &propagated {
                    if let Symbol::Terminal(b_terminal) = symbol {
                        let new_item = Item::initial(
                            production.lhs.clone(),
                            production.rhs.clone(),
                            Lookahead::One(b_terminal.clone()),
                        );
                        if result.insert(new_item.clone()) {
                            worklist.push(new_item);
                        }
                    }
                }
            }
        }
    }

    result
}

/// Computes GOTO(I, X) for LR(1) items: shifts the dot over `x`, carrying
/// each item's lookahead through unchanged, then closes the result.
pub fn goto(grammar: &Grammar, first_sets: &FirstSets, items: &ItemSet, x: &Symbol) -> ItemSet {
    let mut moved = ItemSet::new();
    for item in items {
        if let Some(shifted) = item.shift_dot(x).expect("item always has a dot") {
            moved.insert(shifted);
        }
    }
    closure(grammar, first_sets, &moved)
}

/// A constructed LR(1) automaton.
#[derive(Debug)]
pub struct Lr1Automaton {
    pub states: HashMap<usize, FrozenItemSet>,
    pub transitions: HashMap<(usize, Symbol), usize>,
}

/// Constructs the canonical LR(1) collection of `grammar`, which must
/// already be augmented. Seeded the same deterministic way as
/// [`crate::lr0::canonical_collection`]: state 0 is the closure of
/// `[S' -> . S, end]`, and later states are discovered in a fixed
/// (terminal-then-non-terminal, each sorted) symbol order.
pub fn canonical_collection(grammar: &Grammar) -> Lr1Automaton {
    let first_sets = compute_first_sets(grammar);

    let start_production = &grammar.productions_from(grammar.start_symbol())[0];
    let start_item = Item::initial(
        grammar.start_symbol().clone(),
        start_production.rhs.clone(),
        Lookahead::One(Terminal::end()),
    );
    let initial_state = closure(grammar, &first_sets, &ItemSet::from([start_item]));

    let mut states: HashMap<usize, FrozenItemSet> = HashMap::new();
    let mut index_of: HashMap<FrozenItemSet, usize> = HashMap::new();
    let mut open_states: HashMap<usize, ItemSet> = HashMap::new();
    let mut transitions: HashMap<(usize, Symbol), usize> = HashMap::new();

    let frozen_initial = FrozenItemSet::from(&initial_state);
    states.insert(0, frozen_initial.clone());
    index_of.insert(frozen_initial, 0);
    open_states.insert(0, initial_state);

    let mut worklist: VecDeque<usize> = VecDeque::from([0]);

    let mut symbols: Vec<Symbol> = grammar
        .terminals_sorted()
        .into_iter()
        .map(Symbol::Terminal)
        .collect();
    symbols.extend(grammar.non_terminals_sorted().into_iter().map(Symbol::NonTerminal));

    while let Some(state_id) = worklist.pop_front() {
        let state = open_states[&state_id].clone();

        for symbol in &symbols {
            let target = goto(grammar, &first_sets, &state, symbol);
            if target.is_empty() {
                continue;
            }
            let frozen_target = FrozenItemSet::from(&target);

            let target_id = if let Some(&existing) = index_of.get(&frozen_target) {
                existing
            } else {
                let new_id = states.len();
                states.insert(new_id, frozen_target.clone());
                index_of.insert(frozen_target, new_id);
                open_states.insert(new_id, target);
                worklist.push_back(new_id);
                new_id
            };

            transitions.insert((state_id, symbol.clone()), target_id);
        }
    }

    Lr1Automaton { states, transitions }
}

/// Convenience wrapper: augments `grammar` then constructs its LR(1)
/// canonical collection.
pub fn canonical_collection_of_augmented(grammar: &Grammar) -> (Grammar, Lr1Automaton) {
    let augmented_grammar = augmented(grammar);
    let automaton = canonical_collection(&augmented_grammar);
    (augmented_grammar, automaton)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Production;
    use crate::symbol::NonTerminal;

    fn nt(name: &str) -> NonTerminal {
        NonTerminal::new(name)
    }

    fn t(name: &str) -> Symbol {
        Symbol::Terminal(Terminal::new(name))
    }

    fn n(name: &str) -> Symbol {
        Symbol::NonTerminal(nt(name))
    }

    /// S -> ( S ) S | ε
    fn balanced_parens_grammar() -> Grammar {
        Grammar::build(
            nt("S"),
            vec![
                Production::new(nt("S"), vec![t("("), n("S"), t(")"), n("S")]),
                Production::new(nt("S"), vec![Symbol::Epsilon]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn start_state_has_end_lookahead() {
        let (grammar, automaton) = canonical_collection_of_augmented(&balanced_parens_grammar());
        let start = &automaton.states[&0];
        assert!(start.iter().any(|item| {
            item.lhs == *grammar.start_symbol()
                && item.dot_position().unwrap() == 0
                && item.lookahead == Lookahead::One(Terminal::end())
        }));
    }

    #[test]
    fn closure_is_idempotent() {
        let (grammar, automaton) = canonical_collection_of_augmented(&balanced_parens_grammar());
        let first_sets = compute_first_sets(&grammar);
        for state in automaton.states.values() {
            let items: ItemSet = state.iter().cloned().collect();
            let closed = closure(&grammar, &first_sets, &items);
            assert_eq!(FrozenItemSet::from(&closed), state.clone());
        }
    }

    #[test]
    fn lr1_has_at_least_as_many_states_as_lr0() {
        use crate::lr0;
        let grammar = balanced_parens_grammar();
        let (_, lr0_automaton) = lr0::canonical_collection_of_augmented(&grammar);
        let (_, lr1_automaton) = canonical_collection_of_augmented(&grammar);
        assert!(lr1_automaton.states.len() >= lr0_automaton.states.len());
    }
}
