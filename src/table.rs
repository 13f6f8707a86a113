//! The parsing table object and the shared deterministic tie-break used
//! when SLR/LR(1)/LALR(1) construction hits a shift/reduce or
//! reduce/reduce conflict.

use crate::grammar::{Grammar, Production};
use crate::item::FrozenItemSet;
use crate::symbol::Symbol;
use std::collections::HashMap;

/// One entry of the ACTION table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Shift(usize),
    Reduce(Production),
    Accept,
}

/// A complete LR parsing table: numbered states, the ACTION map keyed by
/// (state, terminal), and the GOTO map keyed by (state, non-terminal).
#[derive(Debug, Clone)]
pub struct ParsingTable {
    pub states: HashMap<usize, FrozenItemSet>,
    pub action: HashMap<(usize, Symbol), Action>,
    pub goto: HashMap<(usize, Symbol), usize>,
}

impl ParsingTable {
    pub fn new(states: HashMap<usize, FrozenItemSet>) -> Self {
        ParsingTable {
            states,
            action: HashMap::new(),
            goto: HashMap::new(),
        }
    }
}

/// Inserts `action` into `table` at `key`, resolving a conflict with any
/// action already there by the fixed tie-break: Accept beats Shift beats
/// Reduce, and between two Reduce actions the one whose production comes
/// first in `grammar.all_productions()` wins. Conflicts are never an
/// error here — the table silently reflects the winner, and a caller that
/// wants to detect the conflict can compare the table against FIRST/FOLLOW
/// itself.
pub fn insert_action(
    table: &mut HashMap<(usize, Symbol), Action>,
    grammar: &Grammar,
    key: (usize, Symbol),
    action: Action,
) {
    match table.get(&key) {
        None => {
            table.insert(key, action);
        }
        Some(existing) if rank(existing) < rank(&action) => {
            table.insert(key, action);
        }
        Some(Action::Reduce(existing_prod)) => {
            if let Action::Reduce(new_prod) = &action {
                if production_index(grammar, new_prod) < production_index(grammar, existing_prod) {
                    table.insert(key, action);
                }
            }
            // Accept/Shift already present outranks a new Reduce: keep existing.
        }
        Some(_) => {
            // existing already outranks or ties a non-Reduce candidate: keep it.
        }
    }
}

fn rank(action: &Action) -> u8 {
    match action {
        Action::Reduce(_) => 0,
        Action::Shift(_) => 1,
        Action::Accept => 2,
    }
}

fn production_index(grammar: &Grammar, production: &Production) -> usize {
    grammar
        .all_productions()
        .iter()
        .position(|p| p == production)
        .unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{NonTerminal, Terminal};

    fn nt(name: &str) -> NonTerminal {
        NonTerminal::new(name)
    }

    fn t(name: &str) -> Symbol {
        Symbol::Terminal(Terminal::new(name))
    }

    #[test]
    fn accept_beats_shift_and_reduce() {
        let grammar = Grammar::build(nt("S"), vec![Production::new(nt("S"), vec![t("a")])]).unwrap();
        let mut table = HashMap::new();
        let key = (0, t("a"));
        insert_action(&mut table, &grammar, key.clone(), Action::Reduce(grammar.all_productions()[0].clone()));
        insert_action(&mut table, &grammar, key.clone(), Action::Shift(1));
        insert_action(&mut table, &grammar, key.clone(), Action::Accept);
        assert_eq!(table[&key], Action::Accept);
    }

    #[test]
    fn shift_beats_reduce() {
        let grammar = Grammar::build(nt("S"), vec![Production::new(nt("S"), vec![t("a")])]).unwrap();
        let mut table = HashMap::new();
        let key = (0, t("a"));
        insert_action(&mut table, &grammar, key.clone(), Action::Reduce(grammar.all_productions()[0].clone()));
        insert_action(&mut table, &grammar, key.clone(), Action::Shift(2));
        assert_eq!(table[&key], Action::Shift(2));
    }

    #[test]
    fn reduce_reduce_prefers_lower_production_index() {
        let grammar = Grammar::build(
            nt("S"),
            vec![
                Production::new(nt("S"), vec![t("a")]),
                Production::new(nt("S"), vec![t("b")]),
            ],
        )
        .unwrap();
        let mut table = HashMap::new();
        let key = (0, t("c"));
        let second = grammar.all_productions()[1].clone();
        let first = grammar.all_productions()[0].clone();

        insert_action(&mut table, &grammar, key.clone(), Action::Reduce(second));
        insert_action(&mut table, &grammar, key.clone(), Action::Reduce(first.clone()));
        assert_eq!(table[&key], Action::Reduce(first));
    }
}
