//! LR(0) automaton construction: CLOSURE, GOTO, and the canonical
//! collection without lookaheads.

use crate::grammar::Grammar;
use crate::item::{augmented, FrozenItemSet, Item, ItemSet, Lookahead};
use crate::symbol::Symbol;
use std::collections::{HashMap, VecDeque};

/// Computes CLOSURE(I): for every item `[A -> alpha . B beta]` with `B`
/// non-terminal, adds `[B -> . gamma]` for each production `B -> gamma`,
/// iterated to a fixed point.
pub fn closure(grammar: &Grammar, items: &ItemSet) -> ItemSet {
    let mut result = items.clone();
    let mut worklist: Vec<Item> = items.iter().cloned().collect();

    while let Some(item) = worklist.pop() {
        let Some(Symbol::NonTerminal(b)) = item.after_dot().expect("item always has a dot") else {
            continue;
        };

        for production in grammar.productions_from(b) {
            let new_item = Item::initial(production.lhs.clone(), production.rhs.clone(), Lookahead::None);
            if result.insert(new_item.clone()) {
                worklist.push(new_item);
            }
        }
    }

    result
}

/// Computes GOTO(I, X): shifts the dot over `x` in every item of `I` that
/// can, then closes the result.
pub fn goto(grammar: &Grammar, items: &ItemSet, x: &Symbol) -> ItemSet {
    let mut moved = ItemSet::new();
    for item in items {
        if let Some(shifted) = item.shift_dot(x).expect("item always has a dot") {
            moved.insert(shifted);
        }
    }
    closure(grammar, &moved)
}

/// A constructed LR(0) automaton: the numbered states plus shift/goto
/// transitions between them.
#[derive(Debug)]
pub struct Lr0Automaton {
    pub states: HashMap<usize, FrozenItemSet>,
    pub transitions: HashMap<(usize, Symbol), usize>,
}

/// Constructs the canonical LR(0) collection of `grammar`, which must
/// already be augmented. State 0 is seeded directly from the closure of
/// the augmented start item; further states are discovered by a
/// deterministic worklist walk over symbols sorted by name/`(name, id)`,
/// so indices reflect first-discovery order without a renumbering pass.
pub fn canonical_collection(grammar: &Grammar) -> Lr0Automaton {
    let start_production = &grammar.productions_from(grammar.start_symbol())[0];
    let start_item = Item::initial(
        grammar.start_symbol().clone(),
        start_production.rhs.clone(),
        Lookahead::None,
    );
    let initial_state = closure(grammar, &ItemSet::from([start_item]));

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
            let target = goto(grammar, &state, symbol);
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

    Lr0Automaton { states, transitions }
}

/// Convenience wrapper: augments `grammar` then constructs its LR(0)
/// canonical collection.
pub fn canonical_collection_of_augmented(grammar: &Grammar) -> (Grammar, Lr0Automaton) {
    let augmented_grammar = augmented(grammar);
    let automaton = canonical_collection(&augmented_grammar);
    (augmented_grammar, automaton)
}
