//! LALR(1) parsing table construction: build the canonical LR(1)
//! automaton, then merge states that share a core.

use crate::grammar::Grammar;
use crate::item::{augmented, FrozenItemSet, Item, Lookahead};
use crate::lr1::canonical_collection;
use crate::symbol::{Symbol, Terminal};
use crate::table::{insert_action, Action, ParsingTable};
use std::collections::{BTreeSet, HashMap};

/// An item with its lookahead erased, used as the merge key for states
/// that share a core.
fn core_of(item: &Item) -> Item {
    Item {
        lhs: item.lhs.clone(),
        rhs: item.rhs.clone(),
        lookahead: Lookahead::None,
    }
}

/// Builds a LALR(1) parsing table for `grammar`: constructs the canonical
/// LR(1) table's automaton, then merges every state sharing a core into
/// one, unioning their lookaheads.
pub fn build_lalr_table(grammar: &Grammar) -> ParsingTable {
    let augmented_grammar = augmented(grammar);
    let automaton = canonical_collection(&augmented_grammar);

    let mut state_ids: Vec<usize> = automaton.states.keys().copied().collect();
    state_ids.sort_unstable();

    let mut core_index_of: HashMap<BTreeSet<Item>, usize> = HashMap::new();
    let mut state_to_core: HashMap<usize, usize> = HashMap::new();
    let mut core_items: HashMap<usize, BTreeSet<Item>> = HashMap::new();
    let mut lookaheads: HashMap<(usize, Item), BTreeSet<Terminal>> = HashMap::new();

    for &state_id in &state_ids {
        let state = &automaton.states[&state_id];
        let core_set: BTreeSet<Item> = state.iter().map(core_of).collect();

        let next_index = core_index_of.len();
        let core_idx = *core_index_of.entry(core_set.clone()).or_insert(next_index);

        state_to_core.insert(state_id, core_idx);
        core_items.entry(core_idx).or_insert(core_set);

        for item in state.iter() {
            let key = (core_idx, core_of(item));
            lookaheads.entry(key).or_default().extend(item.lookahead.terminals());
        }
    }

    debug_assert_eq!(
        state_to_core[&0], 0,
        "core 0 must correspond to the augmented-start state"
    );

    let mut merged_states: HashMap<usize, FrozenItemSet> = HashMap::new();
    for (&core_idx, items) in &core_items {
        let merged_items: BTreeSet<Item> = items
            .iter()
            .map(|core_item| {
                let terminals = lookaheads
                    .get(&(core_idx, core_item.clone()))
                    .cloned()
                    .unwrap_or_default();
                Item {
                    lhs: core_item.lhs.clone(),
                    rhs: core_item.rhs.clone(),
                    lookahead: Lookahead::Set(terminals),
                }
            })
            .collect();
        merged_states.insert(core_idx, FrozenItemSet::from_btree_set(merged_items));
    }

    let mut table = ParsingTable::new(merged_states.clone());

    for ((orig_state, symbol), &target_state) in &automaton.transitions {
        let core_idx = state_to_core[orig_state];
        let target_core = state_to_core[&target_state];

        match symbol {
            Symbol::NonTerminal(_) => {
                table.goto.insert((core_idx, symbol.clone()), target_core);
            }
            Symbol::Terminal(_) => {
                insert_action(
                    &mut table.action,
                    &augmented_grammar,
                    (core_idx, symbol.clone()),
                    Action::Shift(target_core),
                );
            }
            Symbol::Epsilon | Symbol::Dot => {}
        }
    }

    for (&core_idx, merged_state) in &merged_states {
        for item in merged_state.iter() {
            if !item.is_reduce().expect("item always has a dot") {
                continue;
            }

            if item.lhs == *augmented_grammar.start_symbol() && item.lookahead.contains(&Terminal::end()) {
                insert_action(
                    &mut table.action,
                    &augmented_grammar,
                    (core_idx, Symbol::Terminal(Terminal::end())),
                    Action::Accept,
                );
            } else if item.lhs != *augmented_grammar.start_symbol() {
                let production = item.production().expect("item always has a dot");
                for terminal in item.lookahead.terminals() {
                    insert_action(
                        &mut table.action,
                        &augmented_grammar,
                        (core_idx, Symbol::Terminal(terminal)),
                        Action::Reduce(production.clone()),
                    );
                }
            }
        }
    }

    table
}
